use actix_web::dev::HttpServiceFactory;
use actix_web::{post, web, HttpResponse, Responder};

use serde::Deserialize;

use sqlx::PgPool;

use crate::controller::optional_text;
use crate::domain::{EmailAddress, SubscriberSource};
use crate::error::{ActionError, FormResult, INVALID_EMAIL_MESSAGE};
use crate::notify::{self, Notifier};
use crate::repo::{is_unique_violation, NewNewsletterSubscriber, NewsletterSubscriberRepo};

const SUCCESS_MESSAGE: &str = "Thank you for subscribing to our newsletter!";
const ALREADY_SUBSCRIBED_MESSAGE: &str = "You are already subscribed to our newsletter.";

/// Deserialization wrapper for the newsletter signup form
#[derive(Debug, Deserialize)]
pub struct SubscribeForm {
    email: Option<String>,
    name: Option<String>,
    source: Option<String>,
}

/// Newsletter subscription action: idempotent on email, with a one-shot
/// welcome email gated by the `welcome_email_sent` column
#[tracing::instrument(name = "Subscribe to newsletter", skip(pool, notifier))]
#[post("")]
async fn subscribe(
    pool: web::Data<PgPool>,
    notifier: web::Data<Notifier>,
    form: web::Json<SubscribeForm>,
) -> impl Responder {
    match handle(pool.get_ref(), notifier.get_ref(), form.into_inner()).await {
        Ok(response) => response,
        Err(error) => error.into_response(),
    }
}

async fn handle(
    pool: &PgPool,
    notifier: &Notifier,
    form: SubscribeForm,
) -> Result<HttpResponse, ActionError> {
    let email: EmailAddress = form
        .email
        .as_deref()
        .unwrap_or_default()
        .parse()
        .map_err(|_| ActionError::Validation(INVALID_EMAIL_MESSAGE.into()))?;

    // Idempotent path: no duplicate record, and the welcome gate means no
    // repeat welcome email either
    if NewsletterSubscriberRepo::find_by_email(pool, &email)
        .await?
        .is_some()
    {
        return Ok(already_subscribed());
    }

    let subscriber = NewNewsletterSubscriber {
        email,
        name: optional_text(form.name).and_then(|name| name.parse().ok()),
        source: form
            .source
            .as_deref()
            .and_then(|source| source.parse().ok())
            .unwrap_or(SubscriberSource::Website),
    };

    let id = match NewsletterSubscriberRepo::insert(pool, &subscriber).await {
        Ok(id) => id,
        // Lost a race with a concurrent subscribe for the same email
        Err(error) if is_unique_violation(&error) => return Ok(already_subscribed()),
        Err(error) => return Err(error.into()),
    };

    let welcome = notify::newsletter_welcome(subscriber.name.as_ref().map(AsRef::as_ref));
    if notifier.send_advisory(&subscriber.email, &welcome).await {
        if let Err(error) = NewsletterSubscriberRepo::mark_welcome_sent(pool, id).await {
            // The subscriber exists and the welcome went out; a resend on a
            // later duplicate attempt is the only consequence
            tracing::error!(error.cause_chain = ?error, "Failed to record welcome-email send");
        }
    }

    Ok(HttpResponse::Ok().json(FormResult {
        success: true,
        message: SUCCESS_MESSAGE.into(),
    }))
}

fn already_subscribed() -> HttpResponse {
    HttpResponse::Ok().json(FormResult {
        success: true,
        message: ALREADY_SUBSCRIBED_MESSAGE.into(),
    })
}

/// Newsletter endpoints
pub fn scope() -> impl HttpServiceFactory {
    web::scope("/newsletter").service(subscribe)
}
