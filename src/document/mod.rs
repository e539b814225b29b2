//! Gemtext document parsing and rendering.
//!
//! This module handles:
//! - Parsing gemtext into structural blocks
//! - Laying blocks out into fixed-width metalines with link ids
//! - Collecting the link table of a rendered document

mod layout;
mod links;
mod page;
mod parser;
mod types;

pub use layout::{layout, layout_plain, wrap_words};
pub use links::Links;
pub use page::{GEMTEXT_MIME, PLAIN_TEXT_MIME, Page};
pub use parser::{FENCE, parse};
pub use types::{Block, LineType, LinkExtra, Metaline, OptionsError, RenderMode, RenderOptions};

/// File extensions rendered as gemtext rather than plain text.
const GEMTEXT_EXTENSIONS: &[&str] = &["gmi", "gemini"];

/// Returns true if the file extension is a gemtext one.
pub fn is_gemtext_file(path: &std::path::Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| GEMTEXT_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

/// Build a page for a local file, picking the renderer from its extension.
pub fn page_for_file(file_path: &std::path::Path, content: &str, options: &RenderOptions) -> Page {
    if is_gemtext_file(file_path) {
        Page::from_gemtext(content, options)
    } else {
        Page::from_text(content)
    }
}
