use oledmenu_core::View;

use crate::cell::{Cell, Point};
use crate::grid::Grid;

/// Glyphs and spacing used by [`Painter`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PainterStyle {
    /// Blank columns before each label.
    pub padding: u16,
    /// Shown in the top-right corner when entries are hidden above.
    pub arrow_up: char,
    /// Shown in the bottom-right corner when entries are hidden below.
    pub arrow_down: char,
    /// Shown after a label that opens a submenu.
    pub submenu: char,
}

impl Default for PainterStyle {
    fn default() -> Self {
        Self {
            padding: 1,
            arrow_up: '▲',
            arrow_down: '▼',
            submenu: '>',
        }
    }
}

/// Lays a [`View`] out on a [`Grid`], one entry per row.
///
/// The rightmost column is kept for the scroll arrows and the one before it
/// for the submenu marker; labels are clipped to the space left.
#[derive(Debug, Clone, Default)]
pub struct Painter {
    style: PainterStyle,
}

impl Painter {
    pub fn new(style: PainterStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &PainterStyle {
        &self.style
    }

    /// Clear `grid` and draw `view` into it.
    pub fn paint(&self, grid: &mut Grid, view: &View<'_>) {
        grid.fill(Cell::BLANK);
        let (w, h) = (grid.width(), grid.height());
        if w == 0 || h == 0 {
            return;
        }
        if view.items.len() > h as usize {
            log::debug!(
                "painter: {} rows requested, panel has {h}",
                view.items.len()
            );
        }

        let arrow_col = w - 1;
        let marker_col = w.saturating_sub(2);
        for (row, item) in view.items.iter().take(h as usize).enumerate() {
            let y = row as u16;
            let inverse = item.highlighted;
            if inverse {
                // the bar stops before the arrow column
                for x in 0..arrow_col.max(1) {
                    grid.set(Point::new(x, y), Cell::BLANK.with_inverse(true));
                }
            }
            grid.print(Point::new(self.style.padding, y), marker_col, item.label, inverse);
            if item.has_children && marker_col < arrow_col {
                grid.set(
                    Point::new(marker_col, y),
                    Cell::BLANK.with_char(self.style.submenu).with_inverse(inverse),
                );
            }
        }

        if view.more_above {
            grid.set(
                Point::new(arrow_col, 0),
                Cell::BLANK.with_char(self.style.arrow_up),
            );
        }
        if view.more_below {
            grid.set(
                Point::new(arrow_col, h - 1),
                Cell::BLANK.with_char(self.style.arrow_down),
            );
        }
    }
}
