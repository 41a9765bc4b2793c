//! View results handed to the templates.
//!
//! Handlers build one of these, serialize it, and render it with a page
//! template:
//!
//! - [`ListViewResult`] for the product grid
//! - [`DetailViewResult`] for a single product with its actions
//! - [`FormViewResult`] for the add and edit forms
//!
//! ```rust
//! use catalog_dashboard::views::{list_view, MessageLevel};
//!
//! let result = list_view(vec!["Tote", "Belt"])
//!     .intro("All Products")
//!     .message(MessageLevel::Success, "Product created successfully!")
//!     .build();
//! assert_eq!(result.len(), 2);
//! ```

mod detail_view;
mod form_view;
mod list_view;
mod message;

pub use detail_view::{detail_view, ActionMethod, ActionSuggestion, DetailViewBuilder, DetailViewResult};
pub use form_view::{form_view, FormMode, FormViewBuilder, FormViewResult, ValidationError};
pub use list_view::{list_view, ListViewBuilder, ListViewResult};
pub use message::{Message, MessageLevel};
