use actix_web::dev::HttpServiceFactory;
use actix_web::{get, web, HttpResponse, Responder};

use sqlx::PgPool;

use crate::repo::{PaymentInstructions, PaymentInstructionsRepo};

/// Served whenever the configuration table is empty or unreachable, so the
/// registration form can always render payment details
fn fallback_instructions() -> PaymentInstructions {
    PaymentInstructions {
        bank_name: "Agricultural Development Bank".into(),
        bank_account_name: "Cashew Growers Cooperative Union".into(),
        bank_account_number: "1021 0004 5566 01".into(),
        bank_branch: Some("Techiman Main Branch".into()),
        momo_provider: "MTN Mobile Money".into(),
        momo_number: "024 000 1122".into(),
        momo_name: "Cashew Growers Cooperative Union".into(),
        reference_note: Some("Use your full name as the payment reference.".into()),
    }
}

/// Read-only payment-instruction configuration. Degrades to the hardcoded
/// fallback instead of erroring.
#[tracing::instrument(name = "Fetch payment instructions", skip(pool))]
#[get("")]
async fn instructions(pool: web::Data<PgPool>) -> impl Responder {
    let instructions = match PaymentInstructionsRepo::fetch(pool.get_ref()).await {
        Ok(Some(configured)) => configured,
        Ok(None) => fallback_instructions(),
        Err(error) => {
            tracing::warn!(
                error.cause_chain = ?error,
                "Serving fallback payment instructions",
            );
            fallback_instructions()
        }
    };

    HttpResponse::Ok().json(instructions)
}

/// Payment instruction endpoints
pub fn scope() -> impl HttpServiceFactory {
    web::scope("/payment-instructions").service(instructions)
}
