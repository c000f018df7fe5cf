//! [`ViewportCursor`]: selection index plus scroll window over a list of
//! `count` entries.
//!
//! After every operation `top <= selected < top + max_visible`, and the
//! window never extends past the end of a list longer than the window.
//! Moves clamp at both ends; they never wrap.

use std::ops::Range;

/// Selection and scroll-window state.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ViewportCursor {
    selected: usize,
    top: usize,
    count: usize,
    max_visible: usize,
}

impl ViewportCursor {
    /// Create a cursor over an empty list. `max_visible` is clamped to at
    /// least one row.
    pub fn new(max_visible: usize) -> Self {
        Self {
            selected: 0,
            top: 0,
            count: 0,
            max_visible: max_visible.max(1),
        }
    }

    #[inline]
    pub fn selected(&self) -> usize {
        self.selected
    }

    #[inline]
    pub fn top(&self) -> usize {
        self.top
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn max_visible(&self) -> usize {
        self.max_visible
    }

    /// Establish a new list size and return to the first entry.
    pub fn set_count(&mut self, n: usize) {
        self.count = n;
        self.reset();
    }

    /// Select the first entry.
    pub fn reset(&mut self) {
        self.selected = 0;
        self.top = 0;
    }

    /// Change the list size, keeping the selection where possible.
    pub fn resize(&mut self, n: usize) {
        self.count = n;
        if n == 0 {
            self.reset();
            return;
        }
        self.selected = self.selected.min(n - 1);
        self.top = self.top.min(self.selected);
        if self.selected >= self.top + self.max_visible {
            self.top = self.selected + 1 - self.max_visible;
        }
        self.top = self.top.min(n.saturating_sub(self.max_visible));
    }

    /// Select the previous entry. Returns whether the cursor moved.
    pub fn move_up(&mut self) -> bool {
        if self.selected == 0 {
            return false;
        }
        self.selected -= 1;
        if self.selected < self.top {
            self.top = self.selected;
        }
        log::trace!("cursor: up to {} (top {})", self.selected, self.top);
        true
    }

    /// Select the next entry. Returns whether the cursor moved.
    pub fn move_down(&mut self) -> bool {
        if self.selected + 1 >= self.count {
            return false;
        }
        self.selected += 1;
        if self.selected >= self.top + self.max_visible {
            self.top += 1;
        }
        log::trace!("cursor: down to {} (top {})", self.selected, self.top);
        true
    }

    /// Half-open range of entry indices to render.
    pub fn visible_range(&self) -> Range<usize> {
        self.top..(self.top + self.max_visible).min(self.count)
    }

    /// Whether entries are hidden above the window.
    #[inline]
    pub fn has_more_above(&self) -> bool {
        self.top > 0
    }

    /// Whether entries are hidden below the window.
    #[inline]
    pub fn has_more_below(&self) -> bool {
        self.top + self.max_visible < self.count
    }
}
