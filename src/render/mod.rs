//! HTML rendering for the recommendation page.
//!
//! This is the only place where absent metadata turns into the `N/A`
//! placeholder.

use std::fmt::Display;

use html_escape::encode_text;

pub mod page;

pub use page::{render_page, PageContext};

/// Shown wherever a metadata value is absent
pub const PLACEHOLDER: &str = "N/A";

/// Escaped value, or the placeholder when absent
pub fn or_placeholder<T: Display>(value: Option<&T>) -> String {
    match value {
        Some(v) => encode_text(&v.to_string()).into_owned(),
        None => PLACEHOLDER.to_string(),
    }
}

/// Escaped comma-separated list
pub fn join_list(items: &[String]) -> String {
    encode_text(&items.join(", ")).into_owned()
}
