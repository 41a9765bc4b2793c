//! Compiled-in assets.

pub mod templates;
