use chrono::{DateTime, Utc};

use sqlx::PgExecutor;

use uuid::Uuid;

use crate::domain::{EmailAddress, RequiredText, SubscriberSource};

/// A first-time newsletter subscription, ready to persist
#[derive(Debug)]
pub struct NewNewsletterSubscriber {
    pub email: EmailAddress,
    pub name: Option<RequiredText>,
    pub source: SubscriberSource,
}

/// Stored subscriber row
#[derive(Debug, sqlx::FromRow)]
pub struct NewsletterSubscriberRecord {
    pub id: Uuid,
    pub email: String,
    pub status: String,
    pub welcome_email_sent: bool,
    pub subscribed_at: DateTime<Utc>,
}

/// Repository for the newsletter-subscribers collection.
/// Uniqueness on email is enforced by the table's unique index.
pub struct NewsletterSubscriberRepo;

impl NewsletterSubscriberRepo {
    /// Insert a new subscriber. Status defaults to `active`, `subscribed_at`
    /// to now, and the welcome gate to false.
    #[tracing::instrument(name = "Insert newsletter subscriber", skip(executor))]
    pub async fn insert<'con>(
        executor: impl PgExecutor<'con>,
        subscriber: &NewNewsletterSubscriber,
    ) -> sqlx::Result<Uuid> {
        let id = sqlx::query_scalar::<_, Uuid>(
            "insert into newsletter_subscribers(email, name, source) \
             values ($1, $2, $3) returning id",
        )
        .bind(subscriber.email.as_ref())
        .bind(subscriber.name.as_ref().map(|name| name.as_ref()))
        .bind(subscriber.source.as_str())
        .fetch_one(executor)
        .await?;

        Ok(id)
    }

    #[tracing::instrument(name = "Fetch subscriber by email", skip(executor))]
    pub async fn find_by_email<'con>(
        executor: impl PgExecutor<'con>,
        email: &EmailAddress,
    ) -> sqlx::Result<Option<NewsletterSubscriberRecord>> {
        sqlx::query_as::<_, NewsletterSubscriberRecord>(
            "select id, email, status, welcome_email_sent, subscribed_at \
             from newsletter_subscribers where email=$1",
        )
        .bind(email.as_ref())
        .fetch_optional(executor)
        .await
    }

    /// Flip the welcome gate after a successful welcome-email dispatch
    #[tracing::instrument(name = "Mark welcome email sent", skip(executor))]
    pub async fn mark_welcome_sent<'con>(
        executor: impl PgExecutor<'con>,
        id: Uuid,
    ) -> sqlx::Result<()> {
        sqlx::query("update newsletter_subscribers set welcome_email_sent=true where id=$1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(())
    }
}

/// Postgres raises SQLSTATE 23505 when an insert hits a unique index
pub fn is_unique_violation(error: &sqlx::Error) -> bool {
    match error {
        sqlx::Error::Database(db_error) => db_error.code().as_deref() == Some("23505"),
        _ => false,
    }
}
