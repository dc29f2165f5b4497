mod email_client;
mod media_client;

pub use email_client::{Email, EmailAuthorizationToken, EmailClient};
pub use media_client::{MediaClient, UploadedAsset};
