use sqlx::PgExecutor;

use uuid::Uuid;

use crate::domain::{ContactSubject, EmailAddress, RequiredText};

/// A validated contact-form submission, ready to persist
#[derive(Debug)]
pub struct NewContactSubmission {
    pub name: RequiredText,
    pub email: EmailAddress,
    pub phone: Option<RequiredText>,
    pub subject: ContactSubject,
    pub message: RequiredText,
}

/// Repository for the contact-submissions collection
pub struct ContactSubmissionRepo;

impl ContactSubmissionRepo {
    /// Insert a new submission. The status column defaults to `new`.
    #[tracing::instrument(name = "Insert contact submission", skip(executor))]
    pub async fn insert<'con>(
        executor: impl PgExecutor<'con>,
        submission: &NewContactSubmission,
    ) -> sqlx::Result<Uuid> {
        let id = sqlx::query_scalar::<_, Uuid>(
            "insert into contact_submissions(name, email, phone, subject, message) \
             values ($1, $2, $3, $4, $5) returning id",
        )
        .bind(submission.name.as_ref())
        .bind(submission.email.as_ref())
        .bind(submission.phone.as_ref().map(|phone| phone.as_ref()))
        .bind(submission.subject.as_str())
        .bind(submission.message.as_ref())
        .fetch_one(executor)
        .await?;

        Ok(id)
    }
}
