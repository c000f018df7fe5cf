//! Settings menu on a 16×2 panel drawn in the terminal.
//!
//! Arrows or hjkl navigate, Enter selects, Esc goes back, q quits.

use std::cell::Cell;
use std::error::Error;
use std::rc::Rc;

use oledmenu_core::{MenuConfig, MenuUi};
use oledmenu_crossterm::{TermBell, TermInput, term_display};
use oledmenu_demos::{
    PANEL_ROWS, PANEL_WIDTH, Settings, build_settings, open_language_picker,
};
use oledmenu_ui::Point;

fn run() -> Result<(), Box<dyn Error>> {
    let settings = Settings::new();
    let config = MenuConfig::default()
        .with_max_visible(PANEL_ROWS as usize)
        .with_brightness(0x80);
    let display = term_display(PANEL_WIDTH, PANEL_ROWS, Point::new(2, 1));
    let mut ui = MenuUi::new(config, TermInput::new(), display).with_feedback(TermBell::default());

    build_settings(ui.controller_mut(), &settings)?;
    ui.begin()?;

    let picker_done = Rc::new(Cell::new(false));
    while !ui.input_mut().quit_requested() {
        ui.poll_once();

        if let Some(level) = settings.take_brightness() {
            ui.set_brightness(level);
            ui.display_mut().invalidate();
            ui.redraw();
        }
        if settings.open_language.take() {
            picker_done.set(false);
            open_language_picker(ui.controller_mut(), &settings, Rc::clone(&picker_done));
        } else if picker_done.take() {
            build_settings(ui.controller_mut(), &settings)?;
        }
        ui.refresh();
    }

    ui.end();
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
