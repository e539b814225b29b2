//! Core document types.

use std::fmt;
use std::str::FromStr;

/// Render options that the layout engine cannot work with.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum OptionsError {
    #[error("text width must be a positive number of columns")]
    ZeroWidth,
    #[error("list item bullet must not be empty")]
    EmptyBullet,
    #[error("unknown render mode {0:?}, expected \"fancy\" or \"dumb\"")]
    UnknownMode(String),
}

/// A structural unit of a gemtext document, prior to layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Heading with level (1-3)
    Title { level: u8, text: String },
    /// Any line that matches no other pattern
    Paragraph(String),
    /// `=>` line; `text` is empty when the line carries only a URL
    Link { url: String, text: String },
    /// Lines collected between two fences, verbatim
    Preformatted(Vec<String>),
    /// `>` line
    Blockquote(String),
    /// `* ` line
    ListItem(String),
}

/// How blocks are laid out relative to each other.
#[derive(clap::ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderMode {
    /// Blank separators between blocks for readability.
    #[default]
    Fancy,
    /// No separators; one metaline at least per block.
    Dumb,
}

impl RenderMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fancy => "fancy",
            Self::Dumb => "dumb",
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RenderMode {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fancy" => Ok(Self::Fancy),
            "dumb" => Ok(Self::Dumb),
            other => Err(OptionsError::UnknownMode(other.to_string())),
        }
    }
}

/// Options driving the layout engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Text width in columns
    pub width: usize,
    pub mode: RenderMode,
    /// Prefix of the first row of a list item, e.g. `"• "`
    pub bullet: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 80,
            mode: RenderMode::Fancy,
            bullet: "• ".to_string(),
        }
    }
}

impl RenderOptions {
    /// Check the options before handing them to the layout engine.
    ///
    /// # Errors
    /// Returns an error if the width is zero or the bullet is empty.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.width == 0 {
            return Err(OptionsError::ZeroWidth);
        }
        if self.bullet.is_empty() {
            return Err(OptionsError::EmptyBullet);
        }
        Ok(())
    }
}

/// Type of a metaline, used by the display to pick attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineType {
    /// Block separator
    None,
    Title1,
    Title2,
    Title3,
    Paragraph,
    Link,
    Preformatted,
    Blockquote,
    ListItem,
    /// Not part of gemtext; used for failure messages shown in place of a page.
    Error,
}

impl LineType {
    /// Map a title level to its line type.
    pub const fn from_title_level(level: u8) -> Option<Self> {
        match level {
            1 => Some(Self::Title1),
            2 => Some(Self::Title2),
            3 => Some(Self::Title3),
            _ => None,
        }
    }
}

/// Link annotation carried by the first row of a rendered link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkExtra {
    pub url: String,
    pub link_id: usize,
}

/// One display row plus its rendering metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metaline {
    line_type: LineType,
    text: String,
    extra: Option<LinkExtra>,
}

impl Metaline {
    /// Create a metaline without link metadata.
    pub const fn new(line_type: LineType, text: String) -> Self {
        Self {
            line_type,
            text,
            extra: None,
        }
    }

    /// Create the first row of a link.
    pub const fn with_link(text: String, url: String, link_id: usize) -> Self {
        Self {
            line_type: LineType::Link,
            text,
            extra: Some(LinkExtra { url, link_id }),
        }
    }

    /// Blank row inserted between blocks.
    pub const fn separator() -> Self {
        Self::new(LineType::None, String::new())
    }

    pub const fn line_type(&self) -> LineType {
        self.line_type
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub const fn extra(&self) -> Option<&LinkExtra> {
        self.extra.as_ref()
    }

    pub fn link_id(&self) -> Option<usize> {
        self.extra.as_ref().map(|extra| extra.link_id)
    }

    pub fn url(&self) -> Option<&str> {
        self.extra.as_ref().map(|extra| extra.url.as_str())
    }
}
