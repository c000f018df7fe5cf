//! Crossterm terminal collaborators for oledmenu.
//!
//! Stands in for the buttons, panel and buzzer of a device: [`TermInput`]
//! maps keys onto the four menu buttons, [`TermScreen`] writes grid frames
//! to the terminal, and [`TermBell`] rings the terminal bell.

use std::collections::VecDeque;
use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Attribute, Print, SetAttribute},
    terminal::{self, ClearType},
};

use oledmenu_core::{Button, Feedback, FeedbackKind, Input, InputState};
use oledmenu_ui::{Frame, FrameSink, GridDisplay, Point};

// ---------------------------------------------------------------------------
// Keymap
// ---------------------------------------------------------------------------

/// Key bindings for the four menu buttons, plus quit.
#[derive(Debug, Clone)]
pub struct Keymap {
    pub up: Vec<KeyCode>,
    pub down: Vec<KeyCode>,
    pub select: Vec<KeyCode>,
    pub back: Vec<KeyCode>,
    pub quit: Vec<KeyCode>,
}

impl Default for Keymap {
    fn default() -> Self {
        Self {
            up: vec![KeyCode::Up, KeyCode::Char('k')],
            down: vec![KeyCode::Down, KeyCode::Char('j')],
            select: vec![KeyCode::Enter, KeyCode::Right, KeyCode::Char('l')],
            back: vec![
                KeyCode::Esc,
                KeyCode::Left,
                KeyCode::Backspace,
                KeyCode::Char('h'),
            ],
            quit: vec![KeyCode::Char('q')],
        }
    }
}

impl Keymap {
    /// The button bound to `code`, if any.
    pub fn button(&self, code: KeyCode) -> Option<Button> {
        if self.up.contains(&code) {
            Some(Button::Up)
        } else if self.down.contains(&code) {
            Some(Button::Down)
        } else if self.select.contains(&code) {
            Some(Button::Select)
        } else if self.back.contains(&code) {
            Some(Button::Back)
        } else {
            None
        }
    }

    fn is_quit(&self, key: &KeyEvent) -> bool {
        self.quit.contains(&key.code)
            || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
    }
}

// ---------------------------------------------------------------------------
// TermInput
// ---------------------------------------------------------------------------

/// Keyboard [`Input`]. Key presses are queued in arrival order and handed
/// out one per sample, so fast typing is neither merged nor reordered. A key
/// press is already an edge, so no
/// [`EdgeTriggered`](oledmenu_core::EdgeTriggered) wrapper is needed.
#[derive(Debug)]
pub struct TermInput {
    keymap: Keymap,
    timeout: Duration,
    pending: VecDeque<Button>,
    quit: bool,
}

impl TermInput {
    /// Wait up to 16 ms for input when no press is queued.
    pub fn new() -> Self {
        Self {
            keymap: Keymap::default(),
            timeout: Duration::from_millis(16),
            pending: VecDeque::new(),
            quit: false,
        }
    }

    pub fn with_keymap(mut self, keymap: Keymap) -> Self {
        self.keymap = keymap;
        self
    }

    /// How long a sample waits for the first event.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Whether a quit key has been pressed.
    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Presses read from the terminal but not yet sampled.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    fn translate(&mut self, ev: Event) {
        let Event::Key(key) = ev else {
            return;
        };
        if key.kind != KeyEventKind::Press {
            return;
        }
        if self.keymap.is_quit(&key) {
            self.quit = true;
        } else if let Some(button) = self.keymap.button(key.code) {
            self.pending.push_back(button);
        }
    }

    fn read_pending(&mut self) -> io::Result<()> {
        let wait = if self.pending.is_empty() {
            self.timeout
        } else {
            Duration::ZERO
        };
        if !event::poll(wait)? {
            return Ok(());
        }
        while event::poll(Duration::ZERO)? {
            let ev = event::read()?;
            self.translate(ev);
        }
        Ok(())
    }

    fn next_press(&mut self) -> InputState {
        self.pending
            .pop_front()
            .map(InputState::only)
            .unwrap_or_default()
    }
}

impl Default for TermInput {
    fn default() -> Self {
        Self::new()
    }
}

impl Input for TermInput {
    fn sample(&mut self) -> InputState {
        if let Err(e) = self.read_pending() {
            log::warn!("term: reading input failed: {e}");
        }
        self.next_press()
    }
}

// ---------------------------------------------------------------------------
// TermScreen
// ---------------------------------------------------------------------------

/// A [`FrameSink`] drawing the panel at a fixed terminal offset.
#[derive(Debug)]
pub struct TermScreen {
    origin: Point,
    dim: bool,
    active: bool,
}

impl TermScreen {
    pub fn new() -> Self {
        Self {
            origin: Point::new(0, 0),
            dim: false,
            active: false,
        }
    }

    /// Draw the panel with its top-left corner at `origin`.
    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }
}

impl Default for TermScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameSink for TermScreen {
    fn init(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        terminal::enable_raw_mode()?;
        execute!(
            io::stdout(),
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        self.active = true;
        Ok(())
    }

    fn flush(&mut self, frame: Frame) -> Result<(), Box<dyn std::error::Error>> {
        let mut stdout = io::stdout();
        for fc in &frame.cells {
            let p = fc.pos;
            queue!(
                stdout,
                cursor::MoveTo(self.origin.x + p.x, self.origin.y + p.y)
            )?;
            if self.dim {
                queue!(stdout, SetAttribute(Attribute::Dim))?;
            }
            if fc.cell.inverse {
                queue!(stdout, SetAttribute(Attribute::Reverse))?;
            }
            queue!(stdout, Print(fc.cell.ch), SetAttribute(Attribute::Reset))?;
        }
        stdout.flush()?;
        Ok(())
    }

    /// Terminals have no contrast control; low levels draw dimmed.
    fn set_brightness(&mut self, level: u8) -> Result<(), Box<dyn std::error::Error>> {
        self.dim = level < 0x40;
        log::debug!("term: brightness {level} (dim: {})", self.dim);
        Ok(())
    }

    fn close(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        let _ = execute!(io::stdout(), cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

impl Drop for TermScreen {
    fn drop(&mut self) {
        self.close();
    }
}

/// A terminal panel of `width` × `height` character cells.
pub type TermDisplay = GridDisplay<TermScreen>;

/// Build a [`TermDisplay`] drawn at `origin`.
pub fn term_display(width: u16, height: u16, origin: Point) -> TermDisplay {
    GridDisplay::new(TermScreen::new().with_origin(origin), width, height)
}

// ---------------------------------------------------------------------------
// TermBell
// ---------------------------------------------------------------------------

/// [`Feedback`] through the terminal bell. Rings on activation, and on
/// scrolling too when asked.
#[derive(Debug, Clone, Copy, Default)]
pub struct TermBell {
    pub on_scroll: bool,
}

impl Feedback for TermBell {
    fn notify(&mut self, kind: FeedbackKind) {
        if kind == FeedbackKind::Scroll && !self.on_scroll {
            return;
        }
        let mut stdout = io::stdout();
        if let Err(e) = stdout.write_all(b"\x07").and_then(|()| stdout.flush()) {
            log::debug!("term: bell failed: {e}");
        }
    }
}
