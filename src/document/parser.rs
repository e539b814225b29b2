//! Gemtext parsing.

use std::sync::LazyLock;

use regex::Regex;

use super::types::Block;

/// Line prefix opening and closing a preformatted block.
pub const FENCE: &str = "```";

static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,3})\s+(.+)").expect("title pattern is valid"));
static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^=>\s*(?P<url>\S+)(?:\s+(?P<text>.+))?").expect("link pattern is valid")
});
static BLOCKQUOTE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^>\s*(.*)").expect("blockquote pattern is valid"));
static LIST_ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\*\s(.*)").expect("list item pattern is valid"));

/// Parse gemtext into an ordered list of blocks.
///
/// Every line ends up in some block: gemtext has no syntax errors. Blank
/// lines outside of preformatted blocks are dropped, and a preformatted
/// block still open at the end of the input is discarded.
///
/// # Example
///
/// ```
/// use gemless::document::{parse, Block};
///
/// let blocks = parse("# Hello\n=> gemini://example.org/ Example");
/// assert_eq!(blocks.len(), 2);
/// assert!(matches!(blocks[0], Block::Title { level: 1, .. }));
/// ```
pub fn parse(text: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut preformatted: Option<Vec<String>> = None;

    for raw_line in text.lines() {
        if let Some(lines) = preformatted.as_mut() {
            if raw_line.starts_with(FENCE) {
                blocks.push(Block::Preformatted(std::mem::take(lines)));
                preformatted = None;
            } else {
                lines.push(raw_line.to_string());
            }
            continue;
        }

        let line = raw_line.trim_end();
        if line.is_empty() {
            continue;
        }

        if let Some(caps) = TITLE_RE.captures(line) {
            let level = match &caps[1] {
                "#" => 1,
                "##" => 2,
                _ => 3,
            };
            blocks.push(Block::Title {
                level,
                text: caps[2].to_string(),
            });
        } else if let Some(caps) = LINK_RE.captures(line) {
            blocks.push(Block::Link {
                url: caps["url"].to_string(),
                text: caps
                    .name("text")
                    .map_or_else(String::new, |m| m.as_str().to_string()),
            });
        } else if line.starts_with(FENCE) {
            preformatted = Some(Vec::new());
        } else if let Some(caps) = BLOCKQUOTE_RE.captures(line) {
            blocks.push(Block::Blockquote(caps[1].to_string()));
        } else if let Some(caps) = LIST_ITEM_RE.captures(line) {
            blocks.push(Block::ListItem(caps[1].to_string()));
        } else {
            blocks.push(Block::Paragraph(line.to_string()));
        }
    }

    if let Some(lines) = preformatted {
        tracing::debug!(
            dropped = lines.len(),
            "unterminated preformatted block discarded"
        );
    }

    blocks
}
