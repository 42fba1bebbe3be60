//! Output formatting for allocation results.
//!
//! - [`terminal`] - quoted-field table and JSON result line

mod terminal;

pub use terminal::{format_field, print_allocations};
