use actix_web::dev::HttpServiceFactory;
use actix_web::{post, web, HttpMessage, HttpRequest, HttpResponse, Responder};

use serde::{Deserialize, Serialize};

use sqlx::PgPool;

use uuid::Uuid;

use crate::client::MediaClient;
use crate::controller::{optional_text, require_email, require_text};
use crate::error::{ActionError, MISSING_FIELDS_MESSAGE};
use crate::notify::{self, Notifier};
use crate::repo::{CourseRegistrationRepo, MediaRepo, NewCourseRegistration, NewMediaAsset};

const SUBMIT_SUCCESS_MESSAGE: &str =
    "Registration received. Our team will contact you to confirm your training date.";
const UPLOAD_SUCCESS_MESSAGE: &str = "Receipt uploaded successfully.";
const INVALID_TYPE_MESSAGE: &str =
    "Invalid file type. Please upload a JPEG, PNG, GIF, WebP or PDF file.";
const OVERSIZED_MESSAGE: &str = "File size exceeds 5MB limit.";

/// 5 MiB, inclusive
pub const MAX_RECEIPT_BYTES: usize = 5 * 1024 * 1024;

const ALLOWED_RECEIPT_TYPES: &[&str] = &[
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
    "application/pdf",
];

/// Deserialization wrapper for the registration form
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationForm {
    name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    district: Option<String>,
    course_name: Option<String>,
    preferred_date: Option<String>,
    farming_experience: Option<String>,
    payment_method: Option<String>,
    payment_amount: Option<f64>,
    transaction_reference: Option<String>,
    /// Media id from an earlier call to the receipt upload endpoint
    payment_receipt_id: Option<Uuid>,
    additional_notes: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RegistrationResponse {
    success: bool,
    message: String,
    registration_id: Uuid,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UploadResponse {
    success: bool,
    message: String,
    media_id: Uuid,
    url: String,
}

fn validate(form: RegistrationForm) -> Result<NewCourseRegistration, ActionError> {
    let any_missing = [
        &form.name,
        &form.email,
        &form.phone,
        &form.district,
        &form.course_name,
        &form.farming_experience,
    ]
    .iter()
    .any(|field| field.as_deref().map(str::trim).unwrap_or("").is_empty());
    if any_missing {
        return Err(ActionError::Validation(MISSING_FIELDS_MESSAGE.into()));
    }

    let name = require_text(form.name)?;
    let email = require_email(form.email)?;
    let phone = require_text(form.phone)?;
    let district = require_text(form.district)?;
    let course_name = form
        .course_name
        .as_deref()
        .unwrap_or_default()
        .parse()
        .map_err(|_| ActionError::Validation(MISSING_FIELDS_MESSAGE.into()))?;
    let farming_experience = form
        .farming_experience
        .as_deref()
        .unwrap_or_default()
        .parse()
        .map_err(|_| ActionError::Validation(MISSING_FIELDS_MESSAGE.into()))?;

    Ok(NewCourseRegistration {
        name,
        email,
        phone,
        district,
        course_name,
        preferred_date: optional_text(form.preferred_date),
        farming_experience,
        payment_method: optional_text(form.payment_method).unwrap_or_else(|| "pending".into()),
        payment_amount: form.payment_amount,
        payment_receipt: form.payment_receipt_id,
        transaction_reference: optional_text(form.transaction_reference),
        additional_notes: optional_text(form.additional_notes),
    })
}

/// Registration submission action: validate, persist with status `pending`,
/// then two independent advisory notifications
#[tracing::instrument(name = "Submit course registration", skip(pool, notifier))]
#[post("")]
async fn submit(
    pool: web::Data<PgPool>,
    notifier: web::Data<Notifier>,
    form: web::Json<RegistrationForm>,
) -> impl Responder {
    match handle_submit(pool.get_ref(), notifier.get_ref(), form.into_inner()).await {
        Ok(response) => response,
        Err(error) => error.into_response(),
    }
}

async fn handle_submit(
    pool: &PgPool,
    notifier: &Notifier,
    form: RegistrationForm,
) -> Result<HttpResponse, ActionError> {
    let registration = validate(form)?;

    let registration_id = CourseRegistrationRepo::insert(pool, &registration).await?;

    // Both sends are advisory and independent of each other; the registrant
    // confirmation failing must not stop the intake notification
    let confirmation = notify::registration_confirmation(&registration);
    notifier
        .send_advisory(&registration.email, &confirmation)
        .await;

    let admin_notification = notify::registration_admin_notification(&registration, registration_id);
    notifier
        .send_advisory(notifier.intake_address(), &admin_notification)
        .await;

    Ok(HttpResponse::Ok().json(RegistrationResponse {
        success: true,
        message: SUBMIT_SUCCESS_MESSAGE.into(),
        registration_id,
    }))
}

#[derive(Debug, Deserialize)]
struct UploadQuery {
    filename: Option<String>,
}

/// Receipt upload action. Independent of, and usually preceding, the
/// submission step: the returned media id is linked by a later submit call.
#[tracing::instrument(name = "Upload payment receipt", skip(pool, media_client, body))]
#[post("/receipt")]
async fn upload_receipt(
    req: HttpRequest,
    query: web::Query<UploadQuery>,
    body: web::Bytes,
    pool: web::Data<PgPool>,
    media_client: web::Data<MediaClient>,
) -> impl Responder {
    let mime_type = req.content_type().to_string();
    let filename = query
        .into_inner()
        .filename
        .unwrap_or_else(|| "receipt".into());

    match handle_upload(pool.get_ref(), media_client.get_ref(), body, mime_type, filename).await {
        Ok(response) => response,
        Err(error) => error.into_response(),
    }
}

async fn handle_upload(
    pool: &PgPool,
    media_client: &MediaClient,
    body: web::Bytes,
    mime_type: String,
    filename: String,
) -> Result<HttpResponse, ActionError> {
    if !ALLOWED_RECEIPT_TYPES.contains(&mime_type.to_lowercase().as_str()) {
        return Err(ActionError::UploadRejected(INVALID_TYPE_MESSAGE.into()));
    }
    if body.len() > MAX_RECEIPT_BYTES {
        return Err(ActionError::UploadRejected(OVERSIZED_MESSAGE.into()));
    }

    let size = body.len() as i64;
    let asset = media_client
        .upload(body.to_vec(), &mime_type, &filename)
        .await
        .map_err(ActionError::UploadSink)?;

    let new_asset = NewMediaAsset {
        url: asset.url.clone(),
        public_id: asset.public_id,
        mime_type,
        size,
        source_filename: filename,
    };
    let media_id = MediaRepo::insert(pool, &new_asset).await?;

    Ok(HttpResponse::Ok().json(UploadResponse {
        success: true,
        message: UPLOAD_SUCCESS_MESSAGE.into(),
        media_id,
        url: asset.url,
    }))
}

/// Course registration endpoints
pub fn scope() -> impl HttpServiceFactory {
    web::scope("/registrations")
        .service(submit)
        .service(upload_receipt)
}
