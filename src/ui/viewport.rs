//! Scroll buffer holding the rendered page.
//!
//! The [`ScrollBuffer`] owns the loaded [`Page`] and tracks the offset of
//! the viewport over it. The viewport size is not stored: every scroll call
//! receives the current height or width, and a non-positive size makes the
//! call a no-op.

use crate::document::{Metaline, Page};

/// Width of the virtual area rows are drawn on.
pub const MAX_COLUMNS: usize = 1000;

/// Owns a rendered page and the viewport offset over it.
///
/// Every scroll operation returns whether the offset changed, so the caller
/// knows when to repaint.
///
/// # Example
///
/// ```
/// use gemless::document::{Page, RenderOptions};
/// use gemless::ui::viewport::ScrollBuffer;
///
/// let text = (0..100).map(|i| format!("* line {i}")).collect::<Vec<_>>().join("\n");
/// let mut buffer = ScrollBuffer::new();
/// buffer.load(Page::from_gemtext(&text, &RenderOptions::default()));
///
/// assert!(buffer.scroll_vertical(1000, 20));
/// assert_eq!(buffer.current_line(), 80);
/// assert!(!buffer.scroll_vertical(1, 20));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrollBuffer {
    page: Page,
    rows: usize,
    current_line: usize,
    current_column: usize,
}

impl ScrollBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current page and go back to the top left corner.
    pub fn load(&mut self, page: Page) {
        self.rows = page.metalines().len();
        self.page = page;
        self.current_line = 0;
        self.current_column = 0;
        tracing::debug!(rows = self.rows, "page loaded in scroll buffer");
    }

    pub const fn page(&self) -> &Page {
        &self.page
    }

    /// Number of rendered rows.
    pub const fn rows(&self) -> usize {
        self.rows
    }

    pub const fn max_columns(&self) -> usize {
        MAX_COLUMNS
    }

    /// Index of the row shown at the top of the viewport.
    pub const fn current_line(&self) -> usize {
        self.current_line
    }

    /// Index of the column shown at the left of the viewport.
    pub const fn current_column(&self) -> usize {
        self.current_column
    }

    /// Scroll by `delta` rows, negative values going up.
    ///
    /// The offset is clamped to `[0, rows - viewport_height]` for the height
    /// given here. After the viewport grew, an offset past the new ceiling is
    /// pulled back to it whatever the sign of `delta`, so a downward call may
    /// move the view up; a zero `delta` only performs that clamp.
    pub fn scroll_vertical(&mut self, delta: isize, viewport_height: isize) -> bool {
        let Some(height) = positive(viewport_height) else {
            return false;
        };
        let ceiling = self.rows.saturating_sub(height);
        let changed = scroll_offset(&mut self.current_line, delta, ceiling);
        if changed {
            tracing::trace!(line = self.current_line, delta, "scrolled vertically");
        }
        changed
    }

    /// Scroll by `delta` columns, negative values going left.
    ///
    /// Clamped to `[0, MAX_COLUMNS - viewport_width]` the same way as
    /// [`Self::scroll_vertical`].
    pub fn scroll_horizontal(&mut self, delta: isize, viewport_width: isize) -> bool {
        let Some(width) = positive(viewport_width) else {
            return false;
        };
        let ceiling = MAX_COLUMNS.saturating_sub(width);
        let changed = scroll_offset(&mut self.current_column, delta, ceiling);
        if changed {
            tracing::trace!(column = self.current_column, delta, "scrolled horizontally");
        }
        changed
    }

    /// Scroll down one viewport height.
    pub fn page_down(&mut self, viewport_height: isize) -> bool {
        self.scroll_vertical(viewport_height, viewport_height)
    }

    /// Scroll up one viewport height.
    pub fn page_up(&mut self, viewport_height: isize) -> bool {
        self.scroll_vertical(viewport_height.saturating_neg(), viewport_height)
    }

    pub fn go_to_top(&mut self) -> bool {
        jump(&mut self.current_line, 0)
    }

    /// Show the last rows of the page.
    pub fn go_to_bottom(&mut self, viewport_height: isize) -> bool {
        let Some(height) = positive(viewport_height) else {
            return false;
        };
        jump(&mut self.current_line, self.rows.saturating_sub(height))
    }

    pub fn go_to_first_column(&mut self) -> bool {
        jump(&mut self.current_column, 0)
    }

    /// Rows currently visible in a viewport of the given height.
    pub fn visible_metalines(&self, viewport_height: isize) -> &[Metaline] {
        let metalines = self.page.metalines();
        let Some(height) = positive(viewport_height) else {
            return &[];
        };
        let start = self.current_line.min(metalines.len());
        let end = start.saturating_add(height).min(metalines.len());
        &metalines[start..end]
    }

    /// Get the scroll percentage (0-100).
    pub fn scroll_percent(&self, viewport_height: isize) -> u8 {
        let max_offset = positive(viewport_height)
            .map_or(0, |height| self.rows.saturating_sub(height));
        if max_offset == 0 {
            return 100;
        }

        // Percentage value always 0-100
        #[allow(
            clippy::cast_precision_loss,
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss
        )]
        {
            ((self.current_line.min(max_offset) as f64 / max_offset as f64) * 100.0).round() as u8
        }
    }
}

fn positive(size: isize) -> Option<usize> {
    usize::try_from(size).ok().filter(|size| *size > 0)
}

/// Move `offset` by `delta`, then clamp it into `[0, ceiling]`.
fn scroll_offset(offset: &mut usize, delta: isize, ceiling: usize) -> bool {
    let target = if delta < 0 {
        offset.saturating_sub(delta.unsigned_abs())
    } else {
        offset.saturating_add(delta.unsigned_abs())
    };
    jump(offset, target.min(ceiling))
}

fn jump(offset: &mut usize, target: usize) -> bool {
    if *offset == target {
        return false;
    }
    *offset = target;
    true
}
