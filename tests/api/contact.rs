use serde_json::json;

use sqlx::{PgPool, Row};

use wiremock::matchers::*;
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::{response_body, TestApp, TEST_ADMIN_ADDRESS};

fn valid_submission() -> serde_json::Value {
    json!({
        "name": "Ama Owusu",
        "email": "ama@test.com",
        "subject": "membership",
        "message": "I would like to join the cooperative.",
    })
}

#[sqlx::test(migrations = "./migrations")]
async fn valid_submission_is_persisted_with_status_new(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .mount(&app.email_server)
        .await;

    let res = app
        .contact_submit(&valid_submission())
        .await
        .expect("Failed to execute request");

    let body = response_body(res).await;
    assert_eq!(json!(true), body["success"]);

    let row = sqlx::query("select name, email, subject, status from contact_submissions")
        .fetch_one(&pool)
        .await
        .expect("Failed to fetch inserted row");

    assert_eq!("Ama Owusu", row.get::<String, _>("name"));
    assert_eq!("ama@test.com", row.get::<String, _>("email"));
    assert_eq!("membership", row.get::<String, _>("subject"));
    assert_eq!("new", row.get::<String, _>("status"));

    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn missing_fields_fail_without_persisting(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    for field in ["name", "email", "subject", "message"] {
        let mut submission = valid_submission();
        submission.as_object_mut().unwrap().remove(field);

        let res = app
            .contact_submit(&submission)
            .await
            .expect("Failed to execute request");

        let body = response_body(res).await;
        assert_eq!(
            json!(false),
            body["success"],
            "API accepted a submission missing {}",
            field
        );
        assert_eq!(
            json!("Please fill in all required fields."),
            body["message"]
        );
    }

    let count: i64 = sqlx::query_scalar("select count(*) from contact_submissions")
        .fetch_one(&pool)
        .await?;
    assert_eq!(0, count);

    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn malformed_email_fails_before_persistence(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    for bad_email in ["bob@", "bob", "@x.com"] {
        let mut submission = valid_submission();
        submission["email"] = json!(bad_email);

        let res = app
            .contact_submit(&submission)
            .await
            .expect("Failed to execute request");

        let body = response_body(res).await;
        assert_eq!(json!(false), body["success"], "API accepted {}", bad_email);
        assert_eq!(json!("Please enter a valid email address."), body["message"]);
    }

    let count: i64 = sqlx::query_scalar("select count(*) from contact_submissions")
        .fetch_one(&pool)
        .await?;
    assert_eq!(0, count);

    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn admin_notification_goes_to_admin_with_reply_to(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let _res = app
        .contact_submit(&valid_submission())
        .await
        .expect("Failed to execute request");

    let email_request = &app.email_server.received_requests().await.unwrap()[0];
    let body: serde_json::Value = serde_json::from_slice(&email_request.body).unwrap();

    assert_eq!(json!(TEST_ADMIN_ADDRESS), body["To"]);
    assert_eq!(json!("ama@test.com"), body["ReplyTo"]);

    Ok(())
}

#[sqlx::test(migrations = "./migrations")]
async fn notification_failure_does_not_fail_the_submission(pool: PgPool) -> sqlx::Result<()> {
    let app = TestApp::spawn(&pool).await;

    Mock::given(path("/email"))
        .and(method("POST"))
        // Ensure that send-email fails
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let res = app
        .contact_submit(&valid_submission())
        .await
        .expect("Failed to execute request");

    let body = response_body(res).await;
    assert_eq!(json!(true), body["success"]);

    // The record is the source of truth and must exist despite the failure
    let count: i64 = sqlx::query_scalar("select count(*) from contact_submissions")
        .fetch_one(&pool)
        .await?;
    assert_eq!(1, count);

    Ok(())
}
