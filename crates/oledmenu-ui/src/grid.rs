//! The [`Grid`] type, a fixed-size panel of [`Cell`]s, and the [`Frame`]
//! diff between two grids.

use crate::cell::{Cell, Point};

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// A `width` × `height` buffer of cells, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Cell>,
    width: u16,
    height: u16,
}

impl Grid {
    /// Create a blank grid.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            cells: vec![Cell::BLANK; width as usize * height as usize],
            width,
            height,
        }
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x < self.width && p.y < self.height
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        self.contains(p)
            .then(|| p.y as usize * self.width as usize + p.x as usize)
    }

    /// Read the cell at `p`; blank outside the grid.
    pub fn at(&self, p: Point) -> Cell {
        self.index(p).map(|i| self.cells[i]).unwrap_or_default()
    }

    /// Set the cell at `p`. No-op outside the grid.
    pub fn set(&mut self, p: Point, cell: Cell) {
        if let Some(i) = self.index(p) {
            self.cells[i] = cell;
        }
    }

    /// Fill every cell with `cell`.
    pub fn fill(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    /// Write `text` from `start` rightwards, stopping at column `end`
    /// (exclusive). Returns the column after the last character written.
    pub fn print(&mut self, start: Point, end: u16, text: &str, inverse: bool) -> u16 {
        let end = end.min(self.width);
        let mut x = start.x;
        for ch in text.chars() {
            if x >= end {
                break;
            }
            self.set(
                Point::new(x, start.y),
                Cell::BLANK.with_char(ch).with_inverse(inverse),
            );
            x += 1;
        }
        x
    }

    /// The characters of row `y` as a string.
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width).map(|x| self.at(Point::new(x, y)).ch).collect()
    }

    /// Row-major iterator over `(Point, Cell)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Point, Cell)> + '_ {
        let w = self.width.max(1) as usize;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, c)| (Point::new((i % w) as u16, (i / w) as u16), *c))
    }
}

// ---------------------------------------------------------------------------
// Frame / FrameCell / compute_frame
// ---------------------------------------------------------------------------

/// A single cell that changed between frames.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameCell {
    pub cell: Cell,
    pub pos: Point,
}

/// The cells that changed between two grids.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame {
    pub cells: Vec<FrameCell>,
    pub width: u16,
    pub height: u16,
}

impl Frame {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Compute the cells of `curr` that differ from `prev`.
///
/// Grids of different sizes diff as if `prev` were blank, so every
/// non-blank cell of `curr` is included.
pub fn compute_frame(prev: &Grid, curr: &Grid) -> Frame {
    let same_size = prev.width == curr.width && prev.height == curr.height;
    let cells = curr
        .iter()
        .filter(|&(p, c)| {
            if same_size {
                prev.at(p) != c
            } else {
                c != Cell::BLANK
            }
        })
        .map(|(pos, cell)| FrameCell { cell, pos })
        .collect();
    Frame {
        cells,
        width: curr.width,
        height: curr.height,
    }
}

/// Every cell of `grid`, blanks included, for painting a screen whose
/// contents are unknown.
pub fn full_frame(grid: &Grid) -> Frame {
    Frame {
        cells: grid.iter().map(|(pos, cell)| FrameCell { cell, pos }).collect(),
        width: grid.width,
        height: grid.height,
    }
}
