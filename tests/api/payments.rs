use serde_json::json;

use sqlx::PgPool;

use crate::helpers::{response_body, TestApp};

#[sqlx::test(migrations = "./migrations")]
async fn unconfigured_store_serves_the_fallback(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    let res = app
        .payment_instructions()
        .await
        .expect("Failed to execute request");

    assert!(res.status().is_success());

    // The registration form must always get usable payment details
    let body = response_body(res).await;
    assert_eq!(json!("Agricultural Development Bank"), body["bankName"]);
    assert!(!body["momoNumber"].as_str().unwrap().is_empty());

    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn configured_instructions_are_served(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    sqlx::query(
        "insert into payment_instructions\
         (bank_name, bank_account_name, bank_account_number, momo_provider, momo_number, momo_name) \
         values ('Test Bank', 'Coop Union', '12345678', 'Vodafone Cash', '050 111 2222', 'Coop Union')",
    )
    .execute(&pool)
    .await?;

    let res = app
        .payment_instructions()
        .await
        .expect("Failed to execute request");

    let body = response_body(res).await;
    assert_eq!(json!("Test Bank"), body["bankName"]);
    assert_eq!(json!("Vodafone Cash"), body["momoProvider"]);
    assert_eq!(json!(null), body["bankBranch"]);

    Ok(())
}
