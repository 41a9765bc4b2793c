//! Flash messages shown at the top of a page.

use serde::{Deserialize, Serialize};

/// Severity level for status messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl MessageLevel {
    /// CSS class of the alert box for this level.
    pub fn css_class(&self) -> &'static str {
        match self {
            MessageLevel::Info => "alert-info",
            MessageLevel::Success => "alert-success",
            MessageLevel::Warning => "alert-warning",
            MessageLevel::Error => "alert-danger",
        }
    }
}

impl std::fmt::Display for MessageLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageLevel::Info => write!(f, "info"),
            MessageLevel::Success => write!(f, "success"),
            MessageLevel::Warning => write!(f, "warning"),
            MessageLevel::Error => write!(f, "error"),
        }
    }
}

/// A status message with severity level.
///
/// Serializes with its CSS class alongside, so templates can write
/// `<div class="alert {{ m.class }}">` without a lookup table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Message {
    pub level: MessageLevel,
    pub text: String,
}

impl Message {
    pub fn new(level: MessageLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(MessageLevel::Info, text)
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(MessageLevel::Success, text)
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(MessageLevel::Warning, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(MessageLevel::Error, text)
    }
}

impl Serialize for Message {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("Message", 3)?;
        state.serialize_field("level", &self.level)?;
        state.serialize_field("text", &self.text)?;
        state.serialize_field("class", self.level.css_class())?;
        state.end()
    }
}
