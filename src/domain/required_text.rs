use std::fmt;
use std::str::FromStr;

use unicode_segmentation::UnicodeSegmentation;

const MAX_LEN: usize = 1024;

/// A user supplied free-text field that must be present (name, phone,
/// district, message body)
#[derive(Debug, PartialEq, Clone)]
pub struct RequiredText(String);

impl FromStr for RequiredText {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();

        if value.is_empty() {
            return Err("Field cannot be empty".into());
        }
        if value.graphemes(true).count() > MAX_LEN {
            return Err("Field too long".into());
        }

        Ok(Self(value.to_string()))
    }
}

impl AsRef<str> for RequiredText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequiredText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
