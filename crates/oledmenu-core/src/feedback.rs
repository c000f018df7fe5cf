//! Audible / haptic confirmation: the [`Feedback`] capability.

use crate::input::Button;

/// What kind of confirmation to give.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FeedbackKind {
    /// Short tick for moving or backing out.
    Scroll,
    /// Longer, higher tone for selecting.
    Activate,
}

impl FeedbackKind {
    /// The confirmation given for a press of `button`.
    pub fn for_button(button: Button) -> Self {
        match button {
            Button::Select => Self::Activate,
            Button::Up | Button::Down | Button::Back => Self::Scroll,
        }
    }
}

/// A buzzer, vibration motor, or anything else that can confirm a press.
pub trait Feedback {
    fn notify(&mut self, kind: FeedbackKind);
}

/// Feedback that does nothing.
#[derive(Copy, Clone, Debug, Default)]
pub struct Silent;

impl Feedback for Silent {
    fn notify(&mut self, _kind: FeedbackKind) {}
}

impl<F: FnMut(FeedbackKind)> Feedback for F {
    fn notify(&mut self, kind: FeedbackKind) {
        self(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_activates_everything_else_scrolls() {
        assert_eq!(FeedbackKind::for_button(Button::Select), FeedbackKind::Activate);
        assert_eq!(FeedbackKind::for_button(Button::Up), FeedbackKind::Scroll);
        assert_eq!(FeedbackKind::for_button(Button::Back), FeedbackKind::Scroll);
    }

    #[test]
    fn closures_are_feedback() {
        let mut seen = Vec::new();
        {
            let mut f = |k: FeedbackKind| seen.push(k);
            f.notify(FeedbackKind::Scroll);
            f.notify(FeedbackKind::Activate);
        }
        assert_eq!(seen, vec![FeedbackKind::Scroll, FeedbackKind::Activate]);
    }
}
