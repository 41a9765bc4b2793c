//! DetailView result type and builder.
//!
//! A detail view shows one record with a title, subtitle, the actions that
//! can be taken on it, and any flash messages.
//!
//! ```rust
//! use catalog_dashboard::views::detail_view;
//!
//! let result = detail_view(serde_json::json!({"product_id": 7}))
//!     .title("Canvas Tote")
//!     .subtitle("Bags")
//!     .link("Edit", "/products/7/edit")
//!     .form_action("Delete", "/products/7/delete")
//!     .build();
//! assert_eq!(result.actions.len(), 2);
//! ```

use serde::Serialize;

use super::{Message, MessageLevel};

/// How an action is triggered from the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ActionMethod {
    /// A plain link.
    Get,
    /// A button inside a form that posts to `href`.
    Post,
}

/// An action that can be taken on the displayed item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionSuggestion {
    pub label: String,
    pub href: String,
    pub method: ActionMethod,
}

impl ActionSuggestion {
    pub fn new(label: impl Into<String>, href: impl Into<String>, method: ActionMethod) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
            method,
        }
    }
}

/// Result type for detail pages.
#[derive(Debug, Clone, Serialize)]
pub struct DetailViewResult<T> {
    pub item: T,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<ActionSuggestion>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<Message>,
}

impl<T> DetailViewResult<T> {
    pub fn has_actions(&self) -> bool {
        !self.actions.is_empty()
    }
}

/// Builder for [`DetailViewResult`].
#[derive(Debug)]
pub struct DetailViewBuilder<T>(DetailViewResult<T>);

impl<T> DetailViewBuilder<T> {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.0.title = Some(title.into());
        self
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.0.subtitle = Some(subtitle.into());
        self
    }

    fn action(mut self, label: impl Into<String>, href: impl Into<String>, method: ActionMethod) -> Self {
        self.0.actions.push(ActionSuggestion::new(label, href, method));
        self
    }

    /// Adds a link action.
    pub fn link(self, label: impl Into<String>, href: impl Into<String>) -> Self {
        self.action(label, href, ActionMethod::Get)
    }

    /// Adds a posting action, rendered as a form button.
    pub fn form_action(self, label: impl Into<String>, href: impl Into<String>) -> Self {
        self.action(label, href, ActionMethod::Post)
    }

    pub fn message(mut self, level: MessageLevel, text: impl Into<String>) -> Self {
        self.0.messages.push(Message::new(level, text));
        self
    }

    pub fn build(self) -> DetailViewResult<T> {
        self.0
    }
}

/// Starts building a detail view.
pub fn detail_view<T>(item: T) -> DetailViewBuilder<T> {
    DetailViewBuilder(DetailViewResult {
        item,
        title: None,
        subtitle: None,
        actions: Vec::new(),
        messages: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actions_keep_order_and_method() {
        let result = detail_view(1)
            .link("Back", "/")
            .form_action("Delete", "/products/1/delete")
            .build();
        assert!(result.has_actions());
        assert_eq!(result.actions[0].method, ActionMethod::Get);
        assert_eq!(result.actions[1].method, ActionMethod::Post);
        assert_eq!(result.actions[1].href, "/products/1/delete");
    }

    #[test]
    fn bare_detail_has_no_actions() {
        let result = detail_view("item").build();
        assert!(!result.has_actions());
        assert!(result.title.is_none());
    }

    #[test]
    fn serialized_method_is_uppercase() {
        let result = detail_view("item")
            .title("Title")
            .form_action("Delete", "/x")
            .message(MessageLevel::Info, "hi")
            .build();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["title"], "Title");
        assert_eq!(json["actions"][0]["method"], "POST");
        assert!(json.get("subtitle").is_none());
        assert_eq!(json["messages"][0]["class"], "alert-info");
    }
}
