//! Settings menu shared by the terminal demo and its tests.
//!
//! Demonstrates: nested submenus, commands that change shared state, a
//! static picker list swapped in and out of tree mode, and brightness
//! requests applied by the host loop.

use std::cell::Cell;
use std::rc::Rc;

use oledmenu_core::{MenuError, NavigationController};

pub const PANEL_WIDTH: u16 = 16;
pub const PANEL_ROWS: u16 = 2;

/// Brightness presets offered under Display.
pub const BRIGHTNESS_LEVELS: [(&str, u8); 3] = [("Low", 0x20), ("Medium", 0x80), ("High", 0xff)];

pub const LANGUAGES: [&str; 4] = ["English", "Deutsch", "Francais", "Espanol"];

/// State the menu commands write to.
#[derive(Debug, Default, Clone)]
pub struct Settings {
    pub volume: Rc<Cell<u8>>,
    /// A level chosen in the menu, not yet sent to the panel.
    pub pending_brightness: Rc<Cell<Option<u8>>>,
    /// Set by the Language command; the host swaps in the picker list.
    pub open_language: Rc<Cell<bool>>,
    pub language: Rc<Cell<usize>>,
    pub saves: Rc<Cell<u32>>,
}

impl Settings {
    pub fn new() -> Self {
        let s = Self::default();
        s.volume.set(5);
        s
    }

    /// Take the brightness requested since the last call.
    pub fn take_brightness(&self) -> Option<u8> {
        self.pending_brightness.take()
    }
}

/// Build the settings tree into `nav`:
///
/// ```text
/// Display >  Low | Medium | High
/// Sound   >  Volume + | Volume -
/// Language
/// Save
/// ```
pub fn build_settings(
    nav: &mut NavigationController,
    settings: &Settings,
) -> Result<(), MenuError> {
    let display = nav.add_node("Display", None, None)?;
    for (label, level) in BRIGHTNESS_LEVELS {
        let pending = Rc::clone(&settings.pending_brightness);
        nav.add_command(label, Some(display), move || pending.set(Some(level)))?;
    }

    let sound = nav.add_node("Sound", None, None)?;
    let v = Rc::clone(&settings.volume);
    nav.add_command("Volume +", Some(sound), move || {
        v.set(v.get().saturating_add(1).min(10))
    })?;
    let v = Rc::clone(&settings.volume);
    nav.add_command("Volume -", Some(sound), move || v.set(v.get().saturating_sub(1)))?;

    let open = Rc::clone(&settings.open_language);
    nav.add_command("Language", None, move || open.set(true))?;

    let saves = Rc::clone(&settings.saves);
    nav.add_command("Save", None, move || {
        saves.set(saves.get() + 1);
        log::info!("settings saved");
    })?;
    Ok(())
}

/// Swap the language picker into `nav`. Picking or backing out both set
/// `done`, after which the host rebuilds the tree with [`build_settings`].
pub fn open_language_picker(
    nav: &mut NavigationController,
    settings: &Settings,
    done: Rc<Cell<bool>>,
) {
    nav.set_items(LANGUAGES);
    let language = Rc::clone(&settings.language);
    let picked = Rc::clone(&done);
    nav.on_select(move |i| {
        language.set(i);
        picked.set(true);
    });
    nav.on_back(move || done.set(true));
}

#[cfg(test)]
mod tests {
    use super::*;
    use oledmenu_core::{Button, NavAction};

    fn menu() -> (NavigationController, Settings) {
        let settings = Settings::new();
        let mut nav = NavigationController::new(PANEL_ROWS as usize);
        build_settings(&mut nav, &settings).unwrap();
        (nav, settings)
    }

    #[test]
    fn top_level_layout() {
        let (nav, _) = menu();
        let view = nav.view();
        assert_eq!(nav.len(), 4);
        assert_eq!(view.items.len(), 2);
        assert!(view.items[0].has_children);
        assert!(view.more_below);
    }

    #[test]
    fn brightness_command_sets_pending_level() {
        let (mut nav, settings) = menu();
        assert_eq!(nav.handle(Button::Select), NavAction::Enter);
        nav.handle(Button::Down);
        nav.handle(Button::Down);
        assert_eq!(nav.handle(Button::Select), NavAction::Activate);
        assert_eq!(settings.take_brightness(), Some(0xff));
        assert_eq!(settings.take_brightness(), None);
        assert_eq!(nav.breadcrumb(), vec!["Display"]);
    }

    #[test]
    fn volume_is_clamped() {
        let (mut nav, settings) = menu();
        nav.handle(Button::Down);
        nav.handle(Button::Select);
        for _ in 0..8 {
            nav.handle(Button::Select);
        }
        assert_eq!(settings.volume.get(), 10);
    }

    #[test]
    fn language_picker_round_trip() {
        let (mut nav, settings) = menu();
        nav.handle(Button::Down);
        nav.handle(Button::Down);
        nav.handle(Button::Select);
        assert!(settings.open_language.get());

        let done = Rc::new(Cell::new(false));
        open_language_picker(&mut nav, &settings, Rc::clone(&done));
        assert!(nav.is_static());
        nav.handle(Button::Down);
        nav.handle(Button::Select);
        assert!(done.get());
        assert_eq!(settings.language.get(), 1);

        build_settings(&mut nav, &settings).unwrap();
        assert!(nav.is_tree());
        assert_eq!(nav.label(0), Some("Display"));
    }
}
