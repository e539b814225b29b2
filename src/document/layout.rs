//! Layout of parsed blocks into metalines.
//!
//! Layout is a pure function of its inputs: the link id counter is passed in
//! and the next free id is handed back, so laying out the same blocks twice
//! gives the same rows.

use super::types::{Block, LineType, Metaline, RenderMode, RenderOptions};

/// Characters words are split on. Whitespace becomes its own token, a hyphen
/// stays attached to the word before it.
const SPLIT_CHARS: &[char] = &[' ', '\t', '-'];
/// Appended to the fragments of a word too long to fit on a line.
const JOIN_CHAR: char = '-';
/// Indent of level 2 titles and blockquotes.
const BLOCK_INDENT: usize = 2;

/// How a block is separated from its neighbours in fancy mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Margin {
    /// Always separated from whatever comes before.
    Thick,
    /// Packed together with blocks of the same kind.
    Thin(ThinKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ThinKind {
    Link,
    ListItem,
}

impl Margin {
    const fn of(block: &Block) -> Self {
        match block {
            Block::Title { .. }
            | Block::Paragraph(_)
            | Block::Preformatted(_)
            | Block::Blockquote(_) => Self::Thick,
            Block::Link { .. } => Self::Thin(ThinKind::Link),
            Block::ListItem(_) => Self::Thin(ThinKind::ListItem),
        }
    }

    /// Whether a separator goes between `previous` and a block with this margin.
    fn needs_separator(self, previous: Option<Self>) -> bool {
        match (self, previous) {
            (_, None) => false,
            (Self::Thick, Some(_)) | (Self::Thin(_), Some(Self::Thick)) => true,
            (Self::Thin(current), Some(Self::Thin(last))) => current != last,
        }
    }
}

/// Lay out blocks into display rows.
///
/// Link ids are assigned sequentially starting at `start_link_id`; the
/// returned id is the first one not handed out. `options.width` must be
/// positive, which callers check with [`RenderOptions::validate`].
///
/// # Example
///
/// ```
/// use gemless::document::{layout, parse, LineType, RenderOptions};
///
/// let options = RenderOptions { width: 10, ..RenderOptions::default() };
/// let (lines, next_id) = layout(&parse("# Title"), &options, 1);
/// assert_eq!(lines[0].text(), "  Title   ");
/// assert_eq!(lines[0].line_type(), LineType::Title1);
/// assert_eq!(next_id, 1);
/// ```
pub fn layout(
    blocks: &[Block],
    options: &RenderOptions,
    start_link_id: usize,
) -> (Vec<Metaline>, usize) {
    let mut metalines = Vec::new();
    let mut next_link_id = start_link_id;
    let mut previous: Option<Margin> = None;

    for block in blocks {
        let mut block_lines = match block {
            Block::Title { level, text } => format_title(*level, text, options),
            Block::Paragraph(text) => wrap_into(LineType::Paragraph, text, options.width, 0),
            Block::Link { url, text } => {
                let link_id = next_link_id;
                next_link_id += 1;
                format_link(url, text, link_id, options)
            }
            Block::Preformatted(lines) => lines
                .iter()
                .map(|line| Metaline::new(LineType::Preformatted, line.clone()))
                .collect(),
            Block::Blockquote(text) => {
                wrap_into(LineType::Blockquote, text, options.width, BLOCK_INDENT)
            }
            Block::ListItem(text) => format_list_item(text, options),
        };

        let margin = Margin::of(block);
        match options.mode {
            RenderMode::Dumb => {
                if block_lines.is_empty() {
                    block_lines.push(Metaline::new(LineType::Paragraph, String::new()));
                }
            }
            RenderMode::Fancy => {
                if margin.needs_separator(previous) {
                    metalines.push(Metaline::separator());
                }
            }
        }
        previous = Some(margin);
        metalines.append(&mut block_lines);
    }

    tracing::trace!(
        blocks = blocks.len(),
        metalines = metalines.len(),
        links = next_link_id - start_link_id,
        "laid out document"
    );
    (metalines, next_link_id)
}

/// Lay out text that is not gemtext: one paragraph row per source line.
pub fn layout_plain(text: &str) -> Vec<Metaline> {
    text.lines()
        .map(|line| Metaline::new(LineType::Paragraph, line.to_string()))
        .collect()
}

fn format_title(level: u8, text: &str, options: &RenderOptions) -> Vec<Metaline> {
    let width = options.width;
    let (line_type, lines): (LineType, Vec<String>) = match LineType::from_title_level(level) {
        Some(LineType::Title1) => (
            LineType::Title1,
            wrap_words(text, width, 0)
                .into_iter()
                .map(|line| format!("{line:^width$}"))
                .collect(),
        ),
        Some(LineType::Title2) => (LineType::Title2, wrap_words(text, width, BLOCK_INDENT)),
        Some(line_type) => (line_type, wrap_words(text, width, 0)),
        None => (LineType::Paragraph, wrap_words(text, width, 0)),
    };
    lines
        .into_iter()
        .map(|line| Metaline::new(line_type, line))
        .collect()
}

fn format_link(url: &str, text: &str, link_id: usize, options: &RenderOptions) -> Vec<Metaline> {
    let anchor = format!("[{link_id}] ");
    let label = if text.is_empty() { url } else { text };
    let mut lines = wrap_words(label, options.width, anchor.len()).into_iter();
    let first = lines
        .next()
        .map_or_else(|| anchor.clone(), |line| replace_indent(&line, &anchor, anchor.len()));

    let mut metalines = vec![Metaline::with_link(first, url.to_string(), link_id)];
    metalines.extend(lines.map(|line| Metaline::new(LineType::Link, line)));
    metalines
}

fn format_list_item(text: &str, options: &RenderOptions) -> Vec<Metaline> {
    let bullet = &options.bullet;
    let indent = bullet.chars().count();
    let mut lines = wrap_words(text, options.width, indent);
    match lines.first_mut() {
        Some(first) => *first = replace_indent(first, bullet, indent),
        None => lines.push(bullet.clone()),
    }
    lines
        .into_iter()
        .map(|line| Metaline::new(LineType::ListItem, line))
        .collect()
}

fn wrap_into(line_type: LineType, text: &str, width: usize, indent: usize) -> Vec<Metaline> {
    wrap_words(text, width, indent)
        .into_iter()
        .map(|line| Metaline::new(line_type, line))
        .collect()
}

/// Swap the leading `indent` spaces of a wrapped line for `prefix`.
fn replace_indent(line: &str, prefix: &str, indent: usize) -> String {
    // Wrapped lines always start with `indent` ASCII spaces.
    let rest = line.get(indent..).unwrap_or_default();
    format!("{prefix}{rest}")
}

/// Wrap text into lines of at most `width` characters, each starting with
/// `indent` spaces.
///
/// Words are packed greedily. A word that cannot fit on an indented line on
/// its own is split into fragments of exactly `width` characters, each
/// ending with a hyphen.
pub fn wrap_words(text: &str, width: usize, indent: usize) -> Vec<String> {
    let margin = " ".repeat(indent);
    let mut lines = Vec::new();
    let mut line = margin.clone();
    let mut line_len = indent;

    for token in explode_words(text) {
        let mut word = token;
        let mut word_len = word.chars().count();

        if line_len + word_len > width {
            if line_len > indent {
                lines.push(std::mem::replace(&mut line, margin.clone()));
                line_len = indent;
            }
            let chunk = width.saturating_sub(indent + 1).max(1);
            while indent + word_len > width && word_len > chunk {
                let split_at = word
                    .char_indices()
                    .nth(chunk)
                    .map_or(word.len(), |(index, _)| index);
                lines.push(format!("{margin}{}{JOIN_CHAR}", &word[..split_at]));
                word = &word[split_at..];
                word_len -= chunk;
            }
            word = word.trim_start();
            word_len = word.chars().count();
        }

        line.push_str(word);
        line_len += word_len;
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Split text into words and whitespace tokens.
fn explode_words(text: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let mut rest = text;
    while let Some(index) = rest.find(SPLIT_CHARS) {
        // All split characters are one byte long.
        let (word, tail) = rest.split_at(index + 1);
        if word.ends_with(JOIN_CHAR) {
            words.push(word);
        } else {
            let (word, separator) = word.split_at(index);
            words.push(word);
            words.push(separator);
        }
        rest = tail;
    }
    words.push(rest);
    words
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parse;

    fn options(width: usize) -> RenderOptions {
        RenderOptions {
            width,
            ..RenderOptions::default()
        }
    }

    fn texts(lines: &[Metaline]) -> Vec<&str> {
        lines.iter().map(Metaline::text).collect()
    }

    #[test]
    fn test_wrap_words_forces_long_words() {
        let text = "wrap me wrap me youcantwrapthisonewithoutforce bla bla bla bla";
        assert_eq!(
            wrap_words(text, 10, 0),
            vec![
                "wrap me ",
                "wrap me ",
                "youcantwr-",
                "apthisone-",
                "withoutfo-",
                "rce bla ",
                "bla bla ",
                "bla",
            ]
        );
    }

    #[test]
    fn test_wrap_words_with_indent() {
        assert_eq!(
            wrap_words("aaa bbb ccc", 8, 2),
            vec!["  aaa ", "  bbb ", "  ccc"]
        );
    }

    #[test]
    fn test_hard_split_fragment_is_exactly_width() {
        let lines = wrap_words("abcdefghijklmnop", 8, 3);
        assert_eq!(lines, vec!["   abcd-", "   efgh-", "   ijkl-", "   mnop"]);
        for fragment in &lines[..3] {
            assert_eq!(fragment.chars().count(), 8);
        }
    }

    #[test]
    fn test_wrap_counts_characters_not_bytes() {
        let lines = wrap_words("ééééé ééééé", 6, 0);
        assert_eq!(lines, vec!["ééééé ", "ééééé"]);
    }

    #[test]
    fn test_indent_wider_than_width_terminates() {
        let (lines, _) = layout(&parse("=> gemini://a/ ab"), &options(3), 1);
        assert_eq!(lines[0].text(), "[1] a-");
        assert_eq!(lines.last().map(Metaline::text), Some("    b"));
    }

    #[test]
    fn test_wrap_empty_text_without_indent_is_empty() {
        assert!(wrap_words("", 10, 0).is_empty());
    }

    #[test]
    fn test_explode_words() {
        let words = explode_words("unsplittableword word-dash\ttabatmyleft dot.sep");
        assert_eq!(
            words,
            vec![
                "unsplittableword",
                " ",
                "word-",
                "dash",
                "\t",
                "tabatmyleft",
                " ",
                "dot.sep"
            ]
        );
    }

    #[test]
    fn test_hyphenated_words_break_after_hyphen() {
        assert_eq!(
            wrap_words("well-known thing", 6, 0),
            vec!["well-", "known ", "thing"]
        );
    }

    #[test]
    fn test_title_1_is_centered_with_extra_pad_on_the_right() {
        let (lines, _) = layout(&parse("# Title"), &options(10), 1);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].line_type(), LineType::Title1);
        assert_eq!(lines[0].text(), "  Title   ");
    }

    #[test]
    fn test_title_2_is_indented() {
        let (lines, _) = layout(&parse("## Sub"), &options(20), 1);
        assert_eq!(texts(&lines), vec!["  Sub"]);
        assert_eq!(lines[0].line_type(), LineType::Title2);
    }

    #[test]
    fn test_title_3_is_not_indented() {
        let (lines, _) = layout(&parse("### Small"), &options(20), 1);
        assert_eq!(texts(&lines), vec!["Small"]);
        assert_eq!(lines[0].line_type(), LineType::Title3);
    }

    #[test]
    fn test_link_anchor_and_continuation_indent() {
        let blocks = parse("=> gemini://x.example/ Hello world this is long");
        let (lines, next_id) = layout(&blocks, &options(15), 1);
        assert_eq!(next_id, 2);
        assert_eq!(texts(&lines), vec!["[1] Hello world", "    this is ", "    long"]);
        assert_eq!(lines[0].link_id(), Some(1));
        assert_eq!(lines[0].url(), Some("gemini://x.example/"));
        for line in &lines[1..] {
            assert_eq!(line.line_type(), LineType::Link);
            assert!(line.extra().is_none());
        }
    }

    #[test]
    fn test_link_without_text_shows_url() {
        let (lines, _) = layout(&parse("=> gemini://a.example/"), &options(40), 1);
        assert_eq!(texts(&lines), vec!["[1] gemini://a.example/"]);
    }

    #[test]
    fn test_link_ids_continue_from_start_id() {
        let blocks = parse("=> a A\n=> b B");
        let (lines, next_id) = layout(&blocks, &options(40), 7);
        assert_eq!(next_id, 9);
        assert_eq!(lines[0].link_id(), Some(7));
        assert_eq!(lines[1].link_id(), Some(8));
    }

    #[test]
    fn test_list_item_uses_bullet() {
        let opts = RenderOptions {
            width: 12,
            bullet: "- ".to_string(),
            ..RenderOptions::default()
        };
        let (lines, _) = layout(&parse("* one two three"), &opts, 1);
        assert_eq!(texts(&lines), vec!["- one two ", "  three"]);
    }

    #[test]
    fn test_multibyte_bullet_indent_counts_characters() {
        let (lines, _) = layout(&parse("* alpha beta"), &options(8), 1);
        assert_eq!(texts(&lines), vec!["• alpha ", "  beta"]);
    }

    #[test]
    fn test_blockquote_is_indented() {
        let (lines, _) = layout(&parse("> quoted"), &options(20), 1);
        assert_eq!(texts(&lines), vec!["  quoted"]);
        assert_eq!(lines[0].line_type(), LineType::Blockquote);
    }

    #[test]
    fn test_preformatted_is_not_wrapped() {
        let (lines, _) = layout(&parse("```\nabcdefghijklmnop qrs\n```"), &options(5), 1);
        assert_eq!(texts(&lines), vec!["abcdefghijklmnop qrs"]);
        assert_eq!(lines[0].line_type(), LineType::Preformatted);
    }

    #[test]
    fn test_same_kind_list_items_are_packed() {
        let (lines, _) = layout(&parse("* item\n* item"), &options(40), 1);
        assert_eq!(texts(&lines), vec!["• item", "• item"]);
    }

    #[test]
    fn test_list_item_then_link_gets_separator() {
        let (lines, _) = layout(&parse("* item\n=> url text"), &options(40), 1);
        assert_eq!(texts(&lines), vec!["• item", "", "[1] text"]);
        assert_eq!(lines[1].line_type(), LineType::None);
    }

    #[test]
    fn test_thick_blocks_are_separated() {
        let (lines, _) = layout(&parse("# T\npara\n> quote"), &options(20), 1);
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[1], Metaline::separator());
        assert_eq!(lines[3], Metaline::separator());
    }

    #[test]
    fn test_thin_after_thick_and_thick_after_thin() {
        let (lines, _) = layout(&parse("para\n=> a A\n=> b B\npara"), &options(20), 1);
        assert_eq!(texts(&lines), vec!["para", "", "[1] A", "[2] B", "", "para"]);
    }

    #[test]
    fn test_no_separator_before_first_thin_block() {
        let (lines, _) = layout(&parse("=> a A\npara"), &options(20), 1);
        assert_eq!(texts(&lines), vec!["[1] A", "", "para"]);
    }

    #[test]
    fn test_dumb_mode_has_no_separators() {
        let opts = RenderOptions {
            mode: RenderMode::Dumb,
            ..options(20)
        };
        let (lines, _) = layout(&parse("# T\npara\n* item\n=> a A"), &opts, 1);
        assert_eq!(lines.len(), 4);
        assert!(lines.iter().all(|l| l.line_type() != LineType::None));
    }

    #[test]
    fn test_dumb_mode_keeps_empty_blocks_as_rows() {
        let opts = RenderOptions {
            mode: RenderMode::Dumb,
            ..options(20)
        };
        let (lines, _) = layout(&parse("a\n```\n```\nb"), &opts, 1);
        assert_eq!(texts(&lines), vec!["a", "", "b"]);
        assert_eq!(lines[1].line_type(), LineType::Paragraph);
    }

    #[test]
    fn test_fancy_mode_empty_preformatted_yields_only_separator() {
        let (lines, _) = layout(&parse("a\n```\n```\nb"), &options(20), 1);
        assert_eq!(texts(&lines), vec!["a", "", "", "b"]);
    }

    #[test]
    fn test_layout_plain_keeps_lines() {
        let lines = layout_plain("first\n\n# not a title");
        assert_eq!(texts(&lines), vec!["first", "", "# not a title"]);
        assert!(lines.iter().all(|l| l.line_type() == LineType::Paragraph));
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn wrapped_lines_fit_width(
                text in "[a-z -]{0,200}",
                width in 4..60usize,
                indent in 0..3usize,
            ) {
                for line in wrap_words(&text, width, indent) {
                    prop_assert!(line.chars().count() <= width, "{line:?} exceeds {width}");
                }
            }

            #[test]
            fn link_ids_are_contiguous(
                labels in proptest::collection::vec("[a-z ]{1,60}", 0..20),
                width in 10..40usize,
            ) {
                let source = labels
                    .iter()
                    .map(|label| format!("=> gemini://host/ {label}"))
                    .collect::<Vec<_>>()
                    .join("\n");
                let (lines, next_id) = layout(&parse(&source), &options(width), 1);
                let ids: Vec<usize> = lines.iter().filter_map(Metaline::link_id).collect();
                prop_assert_eq!(ids, (1..=labels.len()).collect::<Vec<_>>());
                prop_assert_eq!(next_id, labels.len() + 1);
            }

            #[test]
            fn layout_is_idempotent(
                source in "([#>*=]{0,2} ?[a-z ]{0,30}\n){0,10}",
                width in 5..50usize,
            ) {
                let blocks = parse(&source);
                let first = layout(&blocks, &options(width), 3);
                let second = layout(&blocks, &options(width), 3);
                prop_assert_eq!(first, second);
            }
        }
    }
}
