use std::time::Duration;

use anyhow::Context;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;

use serde::Deserialize;

use secrecy::Secret;

use url::Url;

/// All receipt uploads land in one fixed asset folder on the CDN
const RECEIPT_FOLDER: &str = "payment-receipts";

/// Client for the CDN-backed binary object store
#[derive(Debug)]
pub struct MediaClient {
    client: Client,

    api_upload_url: Url,
    api_auth_token: Secret<String>,
}

/// Durable identifiers returned by the object store for an accepted upload
#[derive(Debug, Clone, Deserialize)]
pub struct UploadedAsset {
    pub public_id: String,
    pub url: String,
}

impl MediaClient {
    pub fn new(
        api_timeout: Duration,
        api_base_url: Url,
        api_auth_token: Secret<String>,
    ) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(api_timeout)
            .build()
            .context("Failed to build http client")?;

        let api_upload_url = api_base_url
            .join("upload")
            .context("Failed to create upload endpoint URL")?;

        Ok(Self {
            client,
            api_upload_url,
            api_auth_token,
        })
    }

    /// Push a byte buffer to the object store and return its durable
    /// content-addressed identifiers
    #[tracing::instrument(name = "Upload file via storage API", skip(self, bytes))]
    pub async fn upload(
        &self,
        bytes: Vec<u8>,
        mime_type: &str,
        filename: &str,
    ) -> anyhow::Result<UploadedAsset> {
        use secrecy::ExposeSecret;

        let asset = self
            .client
            .post(self.api_upload_url.clone())
            .query(&[("folder", RECEIPT_FOLDER), ("filename", filename)])
            .header(CONTENT_TYPE, mime_type)
            .header(
                AUTHORIZATION,
                format!("Bearer {}", self.api_auth_token.expose_secret()),
            )
            .body(bytes)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .context("Failed to parse storage API response")?;

        Ok(asset)
    }
}
