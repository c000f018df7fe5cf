//! [`MenuConfig`]: the settings fixed when a menu is built.

use std::time::Duration;

/// Configuration for a [`NavigationController`](crate::NavigationController)
/// and its [`MenuUi`](crate::MenuUi) host.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MenuConfig {
    /// Rows the display can show at once (at least 1).
    pub max_visible: usize,
    /// Whether presses are confirmed through the feedback capability.
    pub feedback: bool,
    /// Minimum spacing between accepted presses, applied by
    /// [`EdgeTriggered::from_config`](crate::EdgeTriggered::from_config).
    pub repeat_delay: Duration,
    /// Brightness applied by [`MenuUi::begin`](crate::MenuUi::begin).
    pub brightness: Option<u8>,
}

impl MenuConfig {
    pub fn with_max_visible(mut self, rows: usize) -> Self {
        self.max_visible = rows;
        self
    }

    pub fn with_feedback(mut self, enabled: bool) -> Self {
        self.feedback = enabled;
        self
    }

    pub fn with_repeat_delay(mut self, delay: Duration) -> Self {
        self.repeat_delay = delay;
        self
    }

    pub fn with_brightness(mut self, level: u8) -> Self {
        self.brightness = Some(level);
        self
    }
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            max_visible: 2,
            feedback: true,
            repeat_delay: Duration::from_millis(200),
            brightness: None,
        }
    }
}
