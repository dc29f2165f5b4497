/// Contact form action
pub mod contact;
/// Newsletter subscription action
pub mod newsletter;
/// Payment-instruction configuration endpoint
pub mod payments;
/// Course registration actions: receipt upload and submission
pub mod registrations;

use crate::domain::{EmailAddress, RequiredText};
use crate::error::{ActionError, INVALID_EMAIL_MESSAGE, MISSING_FIELDS_MESSAGE};

/// A required free-text field: absent or blank fails validation
pub(crate) fn require_text(value: Option<String>) -> Result<RequiredText, ActionError> {
    value
        .as_deref()
        .unwrap_or_default()
        .parse()
        .map_err(|_| ActionError::Validation(MISSING_FIELDS_MESSAGE.into()))
}

/// A required email field: absence reads as a missing field, a present but
/// malformed address gets the email-specific message
pub(crate) fn require_email(value: Option<String>) -> Result<EmailAddress, ActionError> {
    let value = value.map(|email| email.trim().to_string()).unwrap_or_default();
    if value.is_empty() {
        return Err(ActionError::Validation(MISSING_FIELDS_MESSAGE.into()));
    }
    value
        .parse()
        .map_err(|_| ActionError::Validation(INVALID_EMAIL_MESSAGE.into()))
}

/// Optional text: blank input is treated as absent
pub(crate) fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}
