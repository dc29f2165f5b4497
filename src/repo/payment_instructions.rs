use serde::Serialize;

use sqlx::PgExecutor;

/// Bank and mobile-money details shown on the registration form
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInstructions {
    pub bank_name: String,
    pub bank_account_name: String,
    pub bank_account_number: String,
    pub bank_branch: Option<String>,
    pub momo_provider: String,
    pub momo_number: String,
    pub momo_name: String,
    pub reference_note: Option<String>,
}

/// Repository for the payment-instructions configuration row
pub struct PaymentInstructionsRepo;

impl PaymentInstructionsRepo {
    /// Fetch the most recently updated configuration, if any exists
    #[tracing::instrument(name = "Fetch payment instructions", skip(executor))]
    pub async fn fetch<'con>(
        executor: impl PgExecutor<'con>,
    ) -> sqlx::Result<Option<PaymentInstructions>> {
        sqlx::query_as::<_, PaymentInstructions>(
            "select bank_name, bank_account_name, bank_account_number, bank_branch, \
             momo_provider, momo_number, momo_name, reference_note \
             from payment_instructions order by updated_at desc limit 1",
        )
        .fetch_optional(executor)
        .await
    }
}
