use chrono::{DateTime, Utc};

use sqlx::PgExecutor;

use uuid::Uuid;

use crate::domain::{CourseName, EmailAddress, FarmingExperience, RequiredText};

/// A validated course registration, ready to persist
#[derive(Debug)]
pub struct NewCourseRegistration {
    pub name: RequiredText,
    pub email: EmailAddress,
    pub phone: RequiredText,
    pub district: RequiredText,
    pub course_name: CourseName,
    pub preferred_date: Option<String>,
    pub farming_experience: FarmingExperience,
    /// Defaulted to `pending` by the form action when the caller omits it
    pub payment_method: String,
    pub payment_amount: Option<f64>,
    /// Weak reference to a previously uploaded receipt in the media collection
    pub payment_receipt: Option<Uuid>,
    pub transaction_reference: Option<String>,
    pub additional_notes: Option<String>,
}

/// Stored registration row, read back for confirmation and admin follow-up
#[derive(Debug, sqlx::FromRow)]
pub struct CourseRegistrationRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub course_name: String,
    pub status: String,
    pub payment_method: String,
    pub payment_receipt: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Repository for the course-registrations collection
pub struct CourseRegistrationRepo;

impl CourseRegistrationRepo {
    /// Insert a new registration. The status column defaults to `pending`.
    #[tracing::instrument(name = "Insert course registration", skip(executor))]
    pub async fn insert<'con>(
        executor: impl PgExecutor<'con>,
        registration: &NewCourseRegistration,
    ) -> sqlx::Result<Uuid> {
        let id = sqlx::query_scalar::<_, Uuid>(
            "insert into course_registrations\
             (name, email, phone, district, course_name, preferred_date, \
              farming_experience, payment_method, payment_amount, payment_receipt, \
              transaction_reference, additional_notes) \
             values ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) returning id",
        )
        .bind(registration.name.as_ref())
        .bind(registration.email.as_ref())
        .bind(registration.phone.as_ref())
        .bind(registration.district.as_ref())
        .bind(registration.course_name.as_str())
        .bind(registration.preferred_date.as_deref())
        .bind(registration.farming_experience.as_str())
        .bind(&registration.payment_method)
        .bind(registration.payment_amount)
        .bind(registration.payment_receipt)
        .bind(registration.transaction_reference.as_deref())
        .bind(registration.additional_notes.as_deref())
        .fetch_one(executor)
        .await?;

        Ok(id)
    }

    #[tracing::instrument(name = "Fetch course registration by id", skip(executor))]
    pub async fn find_by_id<'con>(
        executor: impl PgExecutor<'con>,
        id: Uuid,
    ) -> sqlx::Result<Option<CourseRegistrationRecord>> {
        sqlx::query_as::<_, CourseRegistrationRecord>(
            "select id, name, email, course_name, status, payment_method, \
             payment_receipt, created_at \
             from course_registrations where id=$1",
        )
        .bind(id)
        .fetch_optional(executor)
        .await
    }
}
