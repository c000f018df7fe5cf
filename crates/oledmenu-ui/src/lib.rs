//! Character-cell rendering for oledmenu.
//!
//! [`Painter`] lays a [`View`](oledmenu_core::View) out on a [`Grid`] the
//! way a two-row monochrome panel shows it: inverted highlight bar, submenu
//! marker, scroll arrows on the right edge. [`GridDisplay`] keeps the last
//! grid and hands only the changed cells to a [`FrameSink`].

mod cell;
mod display;
mod grid;
mod painter;

pub use cell::{Cell, Point};
pub use display::{FrameSink, GridDisplay};
pub use grid::{compute_frame, full_frame, Frame, FrameCell, Grid};
pub use painter::{Painter, PainterStyle};
