//! A rendered document ready to be loaded in a scroll buffer.

use super::layout::{layout, layout_plain};
use super::links::Links;
use super::parser::parse;
use super::types::{Block, LineType, Metaline, RenderOptions};
use crate::perf;

pub const GEMTEXT_MIME: &str = "text/gemini";
pub const PLAIN_TEXT_MIME: &str = "text/plain";

/// Rendered rows of a document along with its link table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    /// Original source text
    source: String,
    /// Rendered rows, top to bottom
    metalines: Vec<Metaline>,
    links: Links,
    /// Text of the first title, if any
    title: Option<String>,
    mime: Option<String>,
    encoding: Option<String>,
}

impl Page {
    /// Parse and lay out a gemtext document.
    ///
    /// # Example
    ///
    /// ```
    /// use gemless::document::{Page, RenderOptions};
    ///
    /// let page = Page::from_gemtext("# Home\n=> gemini://example.org/", &RenderOptions::default());
    /// assert_eq!(page.title(), Some("Home"));
    /// assert_eq!(page.links().get(1), Some("gemini://example.org/"));
    /// ```
    pub fn from_gemtext(source: &str, options: &RenderOptions) -> Self {
        let _scope = perf::scope("page.from_gemtext");
        let blocks = parse(source);
        let title = blocks.iter().find_map(|block| match block {
            Block::Title { text, .. } => Some(text.clone()),
            _ => None,
        });
        let (metalines, _) = layout(&blocks, options, 1);
        let links = Links::from_metalines(&metalines);
        tracing::debug!(
            rows = metalines.len(),
            links = links.len(),
            width = options.width,
            mode = %options.mode,
            "rendered gemtext page"
        );
        Self {
            source: source.to_string(),
            metalines,
            links,
            title,
            mime: Some(GEMTEXT_MIME.to_string()),
            encoding: None,
        }
    }

    /// Render text that is not gemtext, line by line.
    pub fn from_text(source: &str) -> Self {
        Self {
            source: source.to_string(),
            metalines: layout_plain(source),
            links: Links::default(),
            title: None,
            mime: Some(PLAIN_TEXT_MIME.to_string()),
            encoding: None,
        }
    }

    /// A single error row, shown when a document could not be obtained.
    pub fn from_error(message: &str) -> Self {
        Self {
            source: String::new(),
            metalines: vec![Metaline::new(LineType::Error, message.to_string())],
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }

    #[must_use]
    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = Some(encoding.into());
        self
    }

    pub fn metalines(&self) -> &[Metaline] {
        &self.metalines
    }

    pub const fn links(&self) -> &Links {
        &self.links
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn mime(&self) -> Option<&str> {
        self.mime.as_deref()
    }

    pub fn encoding(&self) -> Option<&str> {
        self.encoding.as_deref()
    }
}
