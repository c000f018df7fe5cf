//! [`MenuUi`]: the host-facing bundle of controller and capabilities, driven
//! one [`poll_once`](MenuUi::poll_once) at a time by the caller's loop.
//!
//! Each poll samples the input, handles every active button in order and
//! redraws once after each press that changed state. Nothing runs in the
//! background; a poll with idle input does nothing.

use std::error::Error;

use crate::config::MenuConfig;
use crate::feedback::{Feedback, FeedbackKind, Silent};
use crate::input::{Button, Input};
use crate::nav::{NavAction, NavigationController};
use crate::render::Render;

/// A menu wired to its input, display and feedback collaborators.
pub struct MenuUi<I, R, F = Silent> {
    nav: NavigationController,
    input: I,
    display: R,
    feedback: F,
    config: MenuConfig,
    redraws: u64,
}

impl<I: Input, R: Render> MenuUi<I, R, Silent> {
    /// Create a menu with no feedback device.
    pub fn new(config: MenuConfig, input: I, display: R) -> Self {
        Self {
            nav: NavigationController::new(config.max_visible),
            input,
            display,
            feedback: Silent,
            config,
            redraws: 0,
        }
    }
}

impl<I: Input, R: Render, F: Feedback> MenuUi<I, R, F> {
    /// Attach a feedback device (buzzer, bell, haptics).
    pub fn with_feedback<G: Feedback>(self, feedback: G) -> MenuUi<I, R, G> {
        MenuUi {
            nav: self.nav,
            input: self.input,
            display: self.display,
            feedback,
            config: self.config,
            redraws: self.redraws,
        }
    }

    /// Initialise the display, apply the configured brightness and draw the
    /// first frame.
    pub fn begin(&mut self) -> Result<(), Box<dyn Error>> {
        self.display.init()?;
        if let Some(level) = self.config.brightness {
            self.display.set_brightness(level)?;
        }
        self.redraw();
        Ok(())
    }

    /// Sample the input once and handle every active button. Returns the
    /// number of presses handled.
    pub fn poll_once(&mut self) -> usize {
        let sample = self.input.sample();
        let mut handled = 0;
        for button in sample.active() {
            self.handle(button);
            handled += 1;
        }
        self.refresh();
        handled
    }

    /// Handle a single press as if it came from the input.
    pub fn handle(&mut self, button: Button) -> NavAction {
        if self.config.feedback {
            self.feedback.notify(FeedbackKind::for_button(button));
        }
        let action = self.nav.handle(button);
        self.refresh();
        action
    }

    /// Draw if anything changed since the last frame. Returns whether a
    /// frame was drawn.
    pub fn refresh(&mut self) -> bool {
        if !self.nav.is_dirty() {
            return false;
        }
        self.redraw();
        true
    }

    /// Draw the current window now.
    ///
    /// A display failure is logged and otherwise ignored; the menu keeps
    /// running.
    pub fn redraw(&mut self) {
        self.nav.take_dirty();
        let view = self.nav.view();
        if let Err(e) = self.display.render(&view) {
            log::warn!("menu: render failed: {e}");
        }
        self.redraws += 1;
    }

    /// Enable or disable press confirmation.
    pub fn set_feedback_enabled(&mut self, enabled: bool) {
        self.config.feedback = enabled;
    }

    /// Change the display brightness. Failures are logged.
    pub fn set_brightness(&mut self, level: u8) {
        self.config.brightness = Some(level);
        if let Err(e) = self.display.set_brightness(level) {
            log::warn!("menu: brightness {level} rejected: {e}");
        }
    }

    /// Release the display.
    pub fn end(&mut self) {
        self.display.close();
    }

    // -- accessors --

    pub fn controller(&self) -> &NavigationController {
        &self.nav
    }

    /// Configure items or the tree. Changes are drawn by the next
    /// [`poll_once`](Self::poll_once) or [`refresh`](Self::refresh).
    pub fn controller_mut(&mut self) -> &mut NavigationController {
        &mut self.nav
    }

    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn display(&self) -> &R {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut R {
        &mut self.display
    }

    pub fn feedback_mut(&mut self) -> &mut F {
        &mut self.feedback
    }

    /// Frames drawn since creation.
    pub fn redraw_count(&self) -> u64 {
        self.redraws
    }
}
