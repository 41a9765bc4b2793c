//! FormView result type and builder.
//!
//! A form view carries what an add or edit form needs to render: the
//! current field values, where to post them, and any validation errors
//! from the previous attempt.

use serde::Serialize;

use super::{Message, MessageLevel};

/// A validation error for a specific field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// The form field that failed (e.g. `product_name`, `price`).
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Whether a form creates a new record or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormMode {
    Create,
    Update,
}

impl FormMode {
    /// Submit button label.
    pub fn submit_label(&self) -> &'static str {
        match self {
            FormMode::Create => "Add Product",
            FormMode::Update => "Save Changes",
        }
    }
}

/// Result type for form pages.
#[derive(Debug, Clone)]
pub struct FormViewResult<T> {
    pub values: T,
    pub mode: FormMode,
    /// URL the form posts to.
    pub action: String,
    pub validation_errors: Vec<ValidationError>,
    pub messages: Vec<Message>,
}

impl<T> FormViewResult<T> {
    pub fn has_validation_errors(&self) -> bool {
        !self.validation_errors.is_empty()
    }

    /// First error message reported for `field`.
    pub fn error_for(&self, field: &str) -> Option<&str> {
        self.validation_errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

impl<T: Serialize> Serialize for FormViewResult<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("FormViewResult", 6)?;
        state.serialize_field("values", &self.values)?;
        state.serialize_field("mode", &self.mode)?;
        state.serialize_field("action", &self.action)?;
        state.serialize_field("submit_label", self.mode.submit_label())?;
        state.serialize_field("validation_errors", &self.validation_errors)?;
        state.serialize_field("messages", &self.messages)?;
        state.end()
    }
}

/// Builder for [`FormViewResult`].
///
/// ```rust
/// use catalog_dashboard::views::{form_view, FormMode, ValidationError};
///
/// let form = form_view(serde_json::json!({"product_name": ""}), "/products")
///     .validation_errors(vec![ValidationError::new("product_name", "Product name is required")])
///     .build();
/// assert_eq!(form.mode, FormMode::Create);
/// assert_eq!(form.error_for("product_name"), Some("Product name is required"));
/// ```
#[derive(Debug)]
pub struct FormViewBuilder<T> {
    values: T,
    mode: FormMode,
    action: String,
    validation_errors: Vec<ValidationError>,
    messages: Vec<Message>,
}

impl<T> FormViewBuilder<T> {
    pub fn new(values: T, action: impl Into<String>) -> Self {
        Self {
            values,
            mode: FormMode::Create,
            action: action.into(),
            validation_errors: Vec::new(),
            messages: Vec::new(),
        }
    }

    pub fn mode(mut self, mode: FormMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn validation_error(mut self, field: impl Into<String>, message: impl Into<String>) -> Self {
        self.validation_errors
            .push(ValidationError::new(field, message));
        self
    }

    pub fn validation_errors(mut self, errors: Vec<ValidationError>) -> Self {
        self.validation_errors.extend(errors);
        self
    }

    pub fn message(mut self, level: MessageLevel, text: impl Into<String>) -> Self {
        self.messages.push(Message::new(level, text));
        self
    }

    pub fn build(self) -> FormViewResult<T> {
        FormViewResult {
            values: self.values,
            mode: self.mode,
            action: self.action,
            validation_errors: self.validation_errors,
            messages: self.messages,
        }
    }
}

/// Starts building a form view that posts to `action`.
pub fn form_view<T>(values: T, action: impl Into<String>) -> FormViewBuilder<T> {
    FormViewBuilder::new(values, action)
}
