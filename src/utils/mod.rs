//! Utility functions

pub mod common;

pub use common::{format_money, format_display_date, wrap_text};
