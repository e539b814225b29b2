//! Terminal-facing state.
//!
//! - [`viewport`]: Scroll buffer owning the rendered page and its offsets

pub mod viewport;

pub use viewport::{MAX_COLUMNS, ScrollBuffer};
