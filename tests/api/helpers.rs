use std::net::TcpListener;
use std::time::Duration;

use reqwest::{Client, Method, Response};

use secrecy::Secret;

use sqlx::PgPool;

use url::Url;

use wiremock::MockServer;

use cashew_coop::app;
use cashew_coop::client::{EmailClient, MediaClient};
use cashew_coop::notify::Notifier;

pub const TEST_ADMIN_ADDRESS: &str = "admin@test.com";
pub const TEST_INTAKE_ADDRESS: &str = "training@test.com";

pub struct TestApp {
    addr: String,

    pub client: Client,
    pub email_server: MockServer,
    pub media_server: MockServer,
}

impl TestApp {
    pub async fn spawn(pool: &PgPool) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to listen on random port");
        let port = listener.local_addr().unwrap().port();

        let addr = format!("http://127.0.0.1:{}", port);

        let email_server = MockServer::start().await;
        let media_server = MockServer::start().await;

        let email_client = {
            let sender = "noreply@test.com"
                .parse()
                .expect("Failed to parse sender email address");
            let api_base_url =
                Url::parse(&email_server.uri()).expect("Failed to parse mock server uri");
            let api_auth_token = "TestAuthorization"
                .parse()
                .expect("Failed to parse auth token");
            let api_timeout = Duration::from_secs(2);

            EmailClient::new(sender, api_timeout, api_base_url, api_auth_token)
                .expect("Failed to create email client")
        };

        let notifier = Notifier::new(
            email_client,
            TEST_ADMIN_ADDRESS.parse().expect("Failed to parse address"),
            TEST_INTAKE_ADDRESS.parse().expect("Failed to parse address"),
        );

        let media_client = {
            let api_base_url =
                Url::parse(&media_server.uri()).expect("Failed to parse mock server uri");
            let api_auth_token = Secret::new("TestToken".to_string());
            let api_timeout = Duration::from_secs(2);

            MediaClient::new(api_timeout, api_base_url, api_auth_token)
                .expect("Failed to create media client")
        };

        let server = app::run(listener, pool.clone(), notifier, media_client)
            .expect("Failed to spawn app instance");
        let _ = tokio::spawn(server);

        let client = Client::new();

        Self {
            addr,
            client,
            email_server,
            media_server,
        }
    }

    pub fn request(&self, method: Method, url: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/{}", &self.addr, url);
        self.client.request(method, url)
    }

    pub async fn health_check(&self) -> reqwest::Result<Response> {
        self.request(Method::GET, "health_check").send().await
    }

    pub async fn contact_submit(&self, body: &serde_json::Value) -> reqwest::Result<Response> {
        self.request(Method::POST, "contact")
            .json(body)
            .send()
            .await
    }

    pub async fn registration_submit(&self, body: &serde_json::Value) -> reqwest::Result<Response> {
        self.request(Method::POST, "registrations")
            .json(body)
            .send()
            .await
    }

    pub async fn upload_receipt(
        &self,
        bytes: Vec<u8>,
        mime_type: &str,
        filename: &str,
    ) -> reqwest::Result<Response> {
        self.request(Method::POST, "registrations/receipt")
            .query(&[("filename", filename)])
            .header("Content-Type", mime_type)
            .body(bytes)
            .send()
            .await
    }

    pub async fn newsletter_subscribe(&self, body: &serde_json::Value) -> reqwest::Result<Response> {
        self.request(Method::POST, "newsletter")
            .json(body)
            .send()
            .await
    }

    pub async fn payment_instructions(&self) -> reqwest::Result<Response> {
        self.request(Method::GET, "payment-instructions")
            .send()
            .await
    }
}

/// Read the uniform `{success, message, ...}` body
pub async fn response_body(res: Response) -> serde_json::Value {
    res.json().await.expect("Failed to parse response body")
}
