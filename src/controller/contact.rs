use actix_web::dev::HttpServiceFactory;
use actix_web::{post, web, HttpResponse, Responder};

use serde::Deserialize;

use sqlx::PgPool;

use crate::controller::{optional_text, require_email, require_text};
use crate::domain::ContactSubject;
use crate::error::{ActionError, FormResult, MISSING_FIELDS_MESSAGE};
use crate::notify::{self, Notifier};
use crate::repo::{ContactSubmissionRepo, NewContactSubmission};

const SUCCESS_MESSAGE: &str = "Thank you for contacting us. We will get back to you soon.";

/// Deserialization wrapper for the contact form; every field optional so
/// validation owns the error messages
#[derive(Debug, Deserialize)]
pub struct ContactForm {
    name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    subject: Option<String>,
    message: Option<String>,
}

fn validate(form: ContactForm) -> Result<NewContactSubmission, ActionError> {
    // Presence of every required field is checked before shape, so a form
    // with several problems reports the missing fields first
    let any_missing = [&form.name, &form.email, &form.subject, &form.message]
        .iter()
        .any(|field| field.as_deref().map(str::trim).unwrap_or("").is_empty());
    if any_missing {
        return Err(ActionError::Validation(MISSING_FIELDS_MESSAGE.into()));
    }

    let name = require_text(form.name)?;
    let email = require_email(form.email)?;
    let subject: ContactSubject = form
        .subject
        .as_deref()
        .unwrap_or_default()
        .parse()
        .map_err(|_| ActionError::Validation(MISSING_FIELDS_MESSAGE.into()))?;
    let message = require_text(form.message)?;
    let phone = optional_text(form.phone).and_then(|phone| phone.parse().ok());

    Ok(NewContactSubmission {
        name,
        email,
        phone,
        subject,
        message,
    })
}

/// Contact form action: validate, persist with status `new`, then one
/// advisory admin notification
#[tracing::instrument(name = "Submit contact form", skip(pool, notifier))]
#[post("")]
async fn submit(
    pool: web::Data<PgPool>,
    notifier: web::Data<Notifier>,
    form: web::Json<ContactForm>,
) -> impl Responder {
    match handle(pool.get_ref(), notifier.get_ref(), form.into_inner()).await {
        Ok(response) => response,
        Err(error) => error.into_response(),
    }
}

async fn handle(
    pool: &PgPool,
    notifier: &Notifier,
    form: ContactForm,
) -> Result<HttpResponse, ActionError> {
    let submission = validate(form)?;

    ContactSubmissionRepo::insert(pool, &submission).await?;

    // Advisory: the record is the source of truth, a lost notification
    // never turns a persisted submission into a user-facing failure
    let email = notify::contact_notification(&submission);
    notifier
        .send_advisory(notifier.admin_address(), &email)
        .await;

    Ok(HttpResponse::Ok().json(FormResult {
        success: true,
        message: SUCCESS_MESSAGE.into(),
    }))
}

/// Contact form endpoints
pub fn scope() -> impl HttpServiceFactory {
    web::scope("/contact").service(submit)
}
