//! The render request ([`View`]) and the [`Render`] capability that paints
//! it. The core never draws pixels itself.

use std::error::Error;

/// One row of the visible window.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VisibleItem<'a> {
    pub label: &'a str,
    pub highlighted: bool,
    /// The entry opens a submenu.
    pub has_children: bool,
}

/// Everything a display needs to draw the current menu state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct View<'a> {
    pub items: Vec<VisibleItem<'a>>,
    pub more_above: bool,
    pub more_below: bool,
}

impl View<'_> {
    /// Index within `items` of the highlighted row.
    pub fn highlighted(&self) -> Option<usize> {
        self.items.iter().position(|i| i.highlighted)
    }

    /// Copy into an owned [`Snapshot`].
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            labels: self.items.iter().map(|i| i.label.to_owned()).collect(),
            highlighted: self.highlighted(),
            submenus: self.items.iter().map(|i| i.has_children).collect(),
            more_above: self.more_above,
            more_below: self.more_below,
        }
    }
}

/// An owned copy of a [`View`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub labels: Vec<String>,
    pub highlighted: Option<usize>,
    pub submenus: Vec<bool>,
    pub more_above: bool,
    pub more_below: bool,
}

// ---------------------------------------------------------------------------
// Render capability
// ---------------------------------------------------------------------------

/// Display back-end (an OLED panel, a terminal, a test recorder).
pub trait Render {
    /// Prepare the display. Called once by [`MenuUi::begin`](crate::MenuUi::begin).
    fn init(&mut self) -> Result<(), Box<dyn Error>> {
        Ok(())
    }

    /// Paint the visible window.
    fn render(&mut self, view: &View<'_>) -> Result<(), Box<dyn Error>>;

    /// Set panel contrast / brightness.
    fn set_brightness(&mut self, _level: u8) -> Result<(), Box<dyn Error>> {
        Ok(())
    }

    /// Release the display.
    fn close(&mut self) {}
}

impl<R: Render + ?Sized> Render for &mut R {
    fn init(&mut self) -> Result<(), Box<dyn Error>> {
        (**self).init()
    }

    fn render(&mut self, view: &View<'_>) -> Result<(), Box<dyn Error>> {
        (**self).render(view)
    }

    fn set_brightness(&mut self, level: u8) -> Result<(), Box<dyn Error>> {
        (**self).set_brightness(level)
    }

    fn close(&mut self) {
        (**self).close()
    }
}

// ---------------------------------------------------------------------------
// Recorder
// ---------------------------------------------------------------------------

/// A [`Render`] that keeps every frame it is asked to draw.
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    frames: Vec<Snapshot>,
    brightness: Option<u8>,
    initialized: bool,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// All frames drawn so far, oldest first.
    pub fn frames(&self) -> &[Snapshot] {
        &self.frames
    }

    pub fn last(&self) -> Option<&Snapshot> {
        self.frames.last()
    }

    pub fn brightness(&self) -> Option<u8> {
        self.brightness
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }
}

impl Render for Recorder {
    fn init(&mut self) -> Result<(), Box<dyn Error>> {
        self.initialized = true;
        Ok(())
    }

    fn render(&mut self, view: &View<'_>) -> Result<(), Box<dyn Error>> {
        self.frames.push(view.snapshot());
        Ok(())
    }

    fn set_brightness(&mut self, level: u8) -> Result<(), Box<dyn Error>> {
        self.brightness = Some(level);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_copies_view() {
        let view = View {
            items: vec![
                VisibleItem {
                    label: "Display",
                    highlighted: false,
                    has_children: true,
                },
                VisibleItem {
                    label: "Save",
                    highlighted: true,
                    has_children: false,
                },
            ],
            more_above: true,
            more_below: false,
        };
        let snap = view.snapshot();
        assert_eq!(snap.labels, vec!["Display", "Save"]);
        assert_eq!(snap.highlighted, Some(1));
        assert_eq!(snap.submenus, vec![true, false]);
        assert!(snap.more_above);
    }

    #[test]
    fn recorder_tracks_frames_and_brightness() {
        let mut rec = Recorder::new();
        rec.init().unwrap();
        rec.render(&View::default()).unwrap();
        rec.set_brightness(0x8f).unwrap();
        assert!(rec.is_initialized());
        assert_eq!(rec.frames().len(), 1);
        assert_eq!(rec.last().unwrap().highlighted, None);
        assert_eq!(rec.brightness(), Some(0x8f));
    }
}
