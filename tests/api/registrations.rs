use serde_json::json;

use sqlx::PgPool;

use uuid::Uuid;

use wiremock::matchers::*;
use wiremock::{Mock, ResponseTemplate};

use cashew_coop::repo::{CourseRegistrationRepo, MediaRepo};

use crate::helpers::{response_body, TestApp, TEST_INTAKE_ADDRESS};

const FIVE_MIB: usize = 5 * 1024 * 1024;

fn valid_registration() -> serde_json::Value {
    json!({
        "name": "Kofi Boateng",
        "email": "kofi@test.com",
        "phone": "+233 24 333 4444",
        "district": "Bono East",
        "courseName": "pest-management",
        "farmingExperience": "beginner",
    })
}

fn mount_upload_success() -> Mock {
    Mock::given(path("/upload"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "public_id": "payment-receipts/abc123",
            "url": "https://cdn.test/payment-receipts/abc123.jpg",
        })))
}

#[sqlx::test(migrations = "./migrations")]
async fn valid_registration_is_persisted_with_defaults(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .mount(&app.email_server)
        .await;

    let res = app
        .registration_submit(&valid_registration())
        .await
        .expect("Failed to execute request");

    let body = response_body(res).await;
    assert_eq!(json!(true), body["success"]);

    let registration_id: Uuid = body["registrationId"]
        .as_str()
        .expect("registrationId missing from response")
        .parse()
        .expect("registrationId is not a uuid");

    let record = CourseRegistrationRepo::find_by_id(&pool, registration_id)
        .await?
        .expect("Registration missing after submit");

    assert_eq!("pest-management", record.course_name);
    assert_eq!("pending", record.status);
    assert_eq!("pending", record.payment_method);
    assert!(record.payment_receipt.is_none());

    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn registration_sends_confirmation_and_intake_notification(
    pool: PgPool,
) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        // One confirmation to the registrant, one notification to intake
        .expect(2)
        .mount(&app.email_server)
        .await;

    let _res = app
        .registration_submit(&valid_registration())
        .await
        .expect("Failed to execute request");

    let requests = app.email_server.received_requests().await.unwrap();
    let recipients: Vec<String> = requests
        .iter()
        .map(|req| {
            let body: serde_json::Value = serde_json::from_slice(&req.body).unwrap();
            body["To"].as_str().unwrap().to_string()
        })
        .collect();

    assert!(recipients.contains(&"kofi@test.com".to_string()));
    assert!(recipients.contains(&TEST_INTAKE_ADDRESS.to_string()));

    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn missing_fields_fail_without_persisting(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    for field in [
        "name",
        "email",
        "phone",
        "district",
        "courseName",
        "farmingExperience",
    ] {
        let mut registration = valid_registration();
        registration.as_object_mut().unwrap().remove(field);

        let res = app
            .registration_submit(&registration)
            .await
            .expect("Failed to execute request");

        let body = response_body(res).await;
        assert_eq!(
            json!(false),
            body["success"],
            "API accepted a registration missing {}",
            field
        );
    }

    let count: i64 = sqlx::query_scalar("select count(*) from course_registrations")
        .fetch_one(&pool)
        .await?;
    assert_eq!(0, count);

    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn email_failures_do_not_fail_the_registration(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&app.email_server)
        .await;

    let res = app
        .registration_submit(&valid_registration())
        .await
        .expect("Failed to execute request");

    let body = response_body(res).await;
    assert_eq!(json!(true), body["success"]);

    let count: i64 = sqlx::query_scalar("select count(*) from course_registrations")
        .fetch_one(&pool)
        .await?;
    assert_eq!(1, count);

    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn uploaded_receipt_links_into_the_registration(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    mount_upload_success().expect(1).mount(&app.media_server).await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .mount(&app.email_server)
        .await;

    // Step one: upload a receipt and collect the media id
    let res = app
        .upload_receipt(vec![0xFF, 0xD8, 0xFF, 0xE0], "image/jpeg", "receipt.jpg")
        .await
        .expect("Failed to execute request");

    let body = response_body(res).await;
    assert_eq!(json!(true), body["success"]);

    let media_id: Uuid = body["mediaId"]
        .as_str()
        .expect("mediaId missing from response")
        .parse()
        .expect("mediaId is not a uuid");

    // Step two: submit the registration with the receipt attached
    let mut registration = valid_registration();
    registration["paymentReceiptId"] = json!(media_id);
    registration["paymentMethod"] = json!("mobile-money");

    let res = app
        .registration_submit(&registration)
        .await
        .expect("Failed to execute request");

    let body = response_body(res).await;
    assert_eq!(json!(true), body["success"]);

    let registration_id: Uuid = body["registrationId"].as_str().unwrap().parse().unwrap();
    let record = CourseRegistrationRepo::find_by_id(&pool, registration_id)
        .await?
        .expect("Registration missing after submit");

    assert_eq!(Some(media_id), record.payment_receipt);
    assert_eq!("mobile-money", record.payment_method);

    // The linked asset resolves to what the storage API reported
    let asset = MediaRepo::find_by_id(&pool, media_id)
        .await?
        .expect("Media asset missing after upload");
    assert_eq!("payment-receipts/abc123", asset.public_id);
    assert_eq!("image/jpeg", asset.mime_type);

    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn disallowed_file_type_is_rejected_before_upload(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    let res = app
        .upload_receipt(vec![0u8; 64], "application/zip", "receipt.zip")
        .await
        .expect("Failed to execute request");

    let body = response_body(res).await;
    assert_eq!(json!(false), body["success"]);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("Invalid file type"));

    // Nothing reached the storage API and nothing was recorded
    assert!(app.media_server.received_requests().await.unwrap().is_empty());
    let count: i64 = sqlx::query_scalar("select count(*) from media")
        .fetch_one(&pool)
        .await?;
    assert_eq!(0, count);

    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn five_mib_receipt_is_accepted(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    mount_upload_success().expect(1).mount(&app.media_server).await;

    let res = app
        .upload_receipt(vec![0u8; FIVE_MIB], "image/png", "receipt.png")
        .await
        .expect("Failed to execute request");

    let body = response_body(res).await;
    assert_eq!(json!(true), body["success"]);

    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn oversized_receipt_is_rejected(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    let res = app
        .upload_receipt(vec![0u8; FIVE_MIB + 1], "image/png", "receipt.png")
        .await
        .expect("Failed to execute request");

    let body = response_body(res).await;
    assert_eq!(json!(false), body["success"]);
    assert_eq!(json!("File size exceeds 5MB limit."), body["message"]);

    assert!(app.media_server.received_requests().await.unwrap().is_empty());

    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn storage_failure_reports_the_generic_message(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&app.media_server)
        .await;

    let res = app
        .upload_receipt(vec![0u8; 64], "image/jpeg", "receipt.jpg")
        .await
        .expect("Failed to execute request");

    let body = response_body(res).await;
    assert_eq!(json!(false), body["success"]);
    assert_eq!(
        json!("An error occurred. Please try again later."),
        body["message"]
    );

    Ok(())
}
