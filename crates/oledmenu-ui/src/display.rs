//! [`GridDisplay`]: a [`Render`] that paints into a grid and forwards only
//! the changed cells to a [`FrameSink`].

use std::error::Error;

use oledmenu_core::{Render, View};

use crate::grid::{compute_frame, full_frame, Frame, Grid};
use crate::painter::Painter;

/// Back-end that puts changed cells on a real screen.
pub trait FrameSink {
    /// Prepare the screen.
    fn init(&mut self) -> Result<(), Box<dyn Error>> {
        Ok(())
    }

    /// Write a diff frame.
    fn flush(&mut self, frame: Frame) -> Result<(), Box<dyn Error>>;

    /// Set contrast / brightness.
    fn set_brightness(&mut self, _level: u8) -> Result<(), Box<dyn Error>> {
        Ok(())
    }

    /// Restore the screen.
    fn close(&mut self) {}
}

impl FrameSink for Vec<Frame> {
    fn flush(&mut self, frame: Frame) -> Result<(), Box<dyn Error>> {
        self.push(frame);
        Ok(())
    }
}

/// Paints each [`View`] with a [`Painter`], diffs against the previous
/// grid, and flushes non-empty diffs to `S`.
#[derive(Debug)]
pub struct GridDisplay<S> {
    sink: S,
    painter: Painter,
    prev: Grid,
    curr: Grid,
    flushed_once: bool,
}

impl<S: FrameSink> GridDisplay<S> {
    /// A `width` × `height` panel drawn with the default painter style.
    pub fn new(sink: S, width: u16, height: u16) -> Self {
        Self::with_painter(sink, width, height, Painter::default())
    }

    pub fn with_painter(sink: S, width: u16, height: u16, painter: Painter) -> Self {
        Self {
            sink,
            painter,
            prev: Grid::new(width, height),
            curr: Grid::new(width, height),
            flushed_once: false,
        }
    }

    /// The grid as last drawn.
    pub fn grid(&self) -> &Grid {
        &self.prev
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Forget what is on screen so the next render repaints every cell.
    pub fn invalidate(&mut self) {
        self.flushed_once = false;
    }
}

impl<S: FrameSink> Render for GridDisplay<S> {
    fn init(&mut self) -> Result<(), Box<dyn Error>> {
        self.sink.init()?;
        self.invalidate();
        Ok(())
    }

    fn render(&mut self, view: &View<'_>) -> Result<(), Box<dyn Error>> {
        self.painter.paint(&mut self.curr, view);
        let frame = if self.flushed_once {
            compute_frame(&self.prev, &self.curr)
        } else {
            full_frame(&self.curr)
        };
        if !frame.is_empty() {
            self.sink.flush(frame)?;
        }
        self.flushed_once = true;
        std::mem::swap(&mut self.prev, &mut self.curr);
        Ok(())
    }

    fn set_brightness(&mut self, level: u8) -> Result<(), Box<dyn Error>> {
        self.sink.set_brightness(level)
    }

    fn close(&mut self) {
        self.sink.close();
    }
}
