// module_name_repetitions is pure style preference (e.g. viewport::ScrollBuffer)
#![allow(clippy::module_name_repetitions)]

//! # Gemless
//!
//! The rendering core of a terminal gemtext browser.
//!
//! Gemless turns gemtext into display rows:
//! - Parsing lines into typed blocks
//! - Word-wrapping blocks to a fixed width with link anchors
//! - Keeping a link table for numeric link selection
//! - Scrolling a viewport over the rendered rows
//!
//! ## Architecture
//!
//! Data flows one way: text is parsed into [`document::Block`]s, laid out
//! into [`document::Metaline`]s, collected in a [`document::Page`] with its
//! [`document::Links`], and loaded into a [`ui::ScrollBuffer`]. Parsing and
//! layout are pure; the scroll buffer is the only mutable state.
//!
//! ## Modules
//!
//! - [`document`]: Gemtext parsing, layout and link table
//! - [`ui`]: Scroll buffer and viewport arithmetic
//! - [`config`]: Flag-file configuration and render options
//! - [`perf`]: Timing instrumentation

pub mod config;
pub mod document;
pub mod perf;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::document::{Links, Metaline, Page, RenderMode, RenderOptions};
    pub use crate::ui::viewport::ScrollBuffer;
}
