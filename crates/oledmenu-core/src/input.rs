//! Input events: the four logical [`Button`]s, the sampled [`InputState`],
//! the [`Input`] capability and the [`EdgeTriggered`] shim.

use std::time::{Duration, Instant};

use crate::config::MenuConfig;

// ---------------------------------------------------------------------------
// Button
// ---------------------------------------------------------------------------

/// A logical menu button.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Button {
    Up,
    Down,
    Select,
    Back,
}

impl Button {
    /// All buttons, in the order a single poll handles them.
    pub const ALL: [Button; 4] = [Button::Up, Button::Down, Button::Select, Button::Back];
}

// ---------------------------------------------------------------------------
// InputState
// ---------------------------------------------------------------------------

/// One sample of the four inputs.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub select: bool,
    pub back: bool,
}

impl InputState {
    /// A sample with nothing active.
    pub const IDLE: Self = Self {
        up: false,
        down: false,
        select: false,
        back: false,
    };

    /// A sample with only `button` active.
    pub fn only(button: Button) -> Self {
        let mut s = Self::IDLE;
        s.set(button, true);
        s
    }

    #[inline]
    pub fn is_active(&self, button: Button) -> bool {
        match button {
            Button::Up => self.up,
            Button::Down => self.down,
            Button::Select => self.select,
            Button::Back => self.back,
        }
    }

    pub fn set(&mut self, button: Button, active: bool) {
        match button {
            Button::Up => self.up = active,
            Button::Down => self.down = active,
            Button::Select => self.select = active,
            Button::Back => self.back = active,
        }
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        *self == Self::IDLE
    }

    /// Active buttons in handling order.
    pub fn active(self) -> impl Iterator<Item = Button> {
        Button::ALL.into_iter().filter(move |b| self.is_active(*b))
    }
}

impl From<Button> for InputState {
    fn from(button: Button) -> Self {
        Self::only(button)
    }
}

// ---------------------------------------------------------------------------
// Input capability
// ---------------------------------------------------------------------------

/// Source of button samples, read once per poll.
///
/// The core treats every active button in a sample as one event, so an
/// implementation should report presses, not held levels. Wrap a
/// level-reporting source (GPIO pins) in [`EdgeTriggered`].
pub trait Input {
    fn sample(&mut self) -> InputState;
}

impl<I: Input + ?Sized> Input for &mut I {
    fn sample(&mut self) -> InputState {
        (**self).sample()
    }
}

impl<I: Input + ?Sized> Input for Box<I> {
    fn sample(&mut self) -> InputState {
        (**self).sample()
    }
}

// ---------------------------------------------------------------------------
// EdgeTriggered
// ---------------------------------------------------------------------------

/// Turns level samples into press events and drops presses that arrive
/// sooner than `min_spacing` after the previous accepted one.
#[derive(Debug)]
pub struct EdgeTriggered<I> {
    inner: I,
    prev: InputState,
    min_spacing: Duration,
    last_accepted: Option<Instant>,
}

impl<I: Input> EdgeTriggered<I> {
    pub fn new(inner: I, min_spacing: Duration) -> Self {
        Self {
            inner,
            prev: InputState::IDLE,
            min_spacing,
            last_accepted: None,
        }
    }

    /// Wrap `inner` with the press spacing of
    /// [`MenuConfig::repeat_delay`].
    pub fn from_config(inner: I, config: &MenuConfig) -> Self {
        Self::new(inner, config.repeat_delay)
    }

    /// Access the wrapped source.
    pub fn inner_mut(&mut self) -> &mut I {
        &mut self.inner
    }

    pub fn into_inner(self) -> I {
        self.inner
    }

    fn sample_at(&mut self, now: Instant) -> InputState {
        let level = self.inner.sample();
        let mut pressed = InputState::IDLE;
        for b in Button::ALL {
            pressed.set(b, level.is_active(b) && !self.prev.is_active(b));
        }
        self.prev = level;

        if pressed.is_idle() {
            return pressed;
        }
        if let Some(last) = self.last_accepted {
            if now.saturating_duration_since(last) < self.min_spacing {
                log::trace!("input: press within {:?}, dropped", self.min_spacing);
                return InputState::IDLE;
            }
        }
        self.last_accepted = Some(now);
        pressed
    }
}

impl<I: Input> Input for EdgeTriggered<I> {
    fn sample(&mut self) -> InputState {
        self.sample_at(Instant::now())
    }
}

// ---------------------------------------------------------------------------
// Scripted
// ---------------------------------------------------------------------------

/// An [`Input`] replaying a fixed sequence of samples, then idling.
#[derive(Debug, Clone, Default)]
pub struct Scripted {
    samples: std::collections::VecDeque<InputState>,
}

impl Scripted {
    pub fn new<T: Into<InputState>>(samples: impl IntoIterator<Item = T>) -> Self {
        Self {
            samples: samples.into_iter().map(Into::into).collect(),
        }
    }

    /// Queue another sample.
    pub fn push(&mut self, sample: impl Into<InputState>) {
        self.samples.push_back(sample.into());
    }

    /// Samples not yet consumed.
    pub fn remaining(&self) -> usize {
        self.samples.len()
    }
}

impl Input for Scripted {
    fn sample(&mut self) -> InputState {
        self.samples.pop_front().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_buttons_follow_handling_order() {
        let s = InputState {
            up: false,
            down: true,
            select: false,
            back: true,
        };
        let got: Vec<_> = s.active().collect();
        assert_eq!(got, vec![Button::Down, Button::Back]);
        assert!(InputState::IDLE.active().next().is_none());
    }

    #[test]
    fn scripted_replays_then_idles() {
        let mut input = Scripted::new([Button::Up, Button::Select]);
        assert_eq!(input.sample(), InputState::only(Button::Up));
        assert_eq!(input.sample(), InputState::only(Button::Select));
        assert!(input.sample().is_idle());
        assert_eq!(input.remaining(), 0);
    }

    #[test]
    fn held_button_fires_once() {
        let held = InputState::only(Button::Down);
        let mut input = EdgeTriggered::new(
            Scripted::new([held, held, held, InputState::IDLE, held]),
            Duration::ZERO,
        );
        let t = Instant::now();
        assert_eq!(input.sample_at(t), held);
        assert!(input.sample_at(t).is_idle());
        assert!(input.sample_at(t).is_idle());
        assert!(input.sample_at(t).is_idle());
        assert_eq!(input.sample_at(t), held);
    }

    #[test]
    fn presses_closer_than_spacing_are_dropped() {
        let up = InputState::only(Button::Up);
        let mut input = EdgeTriggered::new(
            Scripted::new([up, InputState::IDLE, up, InputState::IDLE, up]),
            Duration::from_millis(200),
        );
        let t0 = Instant::now();
        assert_eq!(input.sample_at(t0), up);
        input.sample_at(t0 + Duration::from_millis(50));
        assert!(input.sample_at(t0 + Duration::from_millis(100)).is_idle());
        input.sample_at(t0 + Duration::from_millis(150));
        assert_eq!(input.sample_at(t0 + Duration::from_millis(250)), up);
    }

    #[test]
    fn spacing_comes_from_config() {
        let config = MenuConfig::default().with_repeat_delay(Duration::from_millis(500));
        let mut input = EdgeTriggered::from_config(Scripted::new([Button::Down]), &config);
        assert_eq!(input.min_spacing, Duration::from_millis(500));
        assert_eq!(input.sample(), InputState::only(Button::Down));
    }
}
