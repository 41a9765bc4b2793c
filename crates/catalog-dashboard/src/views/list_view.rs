//! The product grid's view result.
//!
//! Besides the items, a list view carries a heading, flash messages, and
//! enough bookkeeping for a "showing X of Y, matching ..." line.

use serde::Serialize;

use super::{Message, MessageLevel};

/// Result type for list pages.
#[derive(Debug, Clone, Serialize)]
pub struct ListViewResult<T> {
    /// Items to display (post-search, post-sort).
    pub items: Vec<T>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub intro: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<Message>,

    /// Size of the collection before searching.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_count: Option<usize>,

    /// Describes the active search, e.g. `matching "nike"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_summary: Option<String>,
}

impl<T> ListViewResult<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when a search hid some of the collection.
    pub fn is_partial(&self) -> bool {
        self.total_count.is_some_and(|total| self.items.len() < total)
    }
}

/// Builder for [`ListViewResult`].
///
/// ```rust
/// use catalog_dashboard::views::list_view;
///
/// let result = list_view(vec!["Tote", "Belt"])
///     .intro("All Products")
///     .total_count(5)
///     .filter_summary("matching \"t\"")
///     .build();
/// assert!(result.is_partial());
/// ```
#[derive(Debug)]
pub struct ListViewBuilder<T>(ListViewResult<T>);

impl<T> ListViewBuilder<T> {
    pub fn intro(mut self, text: impl Into<String>) -> Self {
        self.0.intro = Some(text.into());
        self
    }

    pub fn message(self, level: MessageLevel, text: impl Into<String>) -> Self {
        self.maybe_message(Some(Message::new(level, text)))
    }

    pub fn success(self, text: impl Into<String>) -> Self {
        self.message(MessageLevel::Success, text)
    }

    /// Adds an already-built message, if any.
    pub fn maybe_message(mut self, message: Option<Message>) -> Self {
        self.0.messages.extend(message);
        self
    }

    pub fn total_count(mut self, count: usize) -> Self {
        self.0.total_count = Some(count);
        self
    }

    pub fn filter_summary(mut self, summary: impl Into<String>) -> Self {
        self.0.filter_summary = Some(summary.into());
        self
    }

    pub fn build(self) -> ListViewResult<T> {
        self.0
    }
}

/// Starts building a list view.
pub fn list_view<T>(items: impl IntoIterator<Item = T>) -> ListViewBuilder<T> {
    ListViewBuilder(ListViewResult {
        items: items.into_iter().collect(),
        intro: None,
        messages: Vec::new(),
        total_count: None,
        filter_summary: None,
    })
}
