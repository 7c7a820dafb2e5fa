//! Keyboard handling: crossterm events in, logical commands out.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Flap,
    Exit,
}

pub fn map_key(key: KeyEvent) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Exit),
        KeyCode::Esc | KeyCode::Char('q') => Some(Command::Exit),
        KeyCode::Char(' ') | KeyCode::Up | KeyCode::Enter => Some(Command::Flap),
        _ => None,
    }
}

/// Everything the player did since the previous frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub flap: bool,
    pub exit: bool,
    /// Latest terminal size in cells, if it changed.
    pub resize: Option<(u16, u16)>,
}

impl FrameInput {
    pub fn flap() -> Self {
        Self {
            flap: true,
            ..Self::default()
        }
    }

    pub fn exit() -> Self {
        Self {
            exit: true,
            ..Self::default()
        }
    }

    pub fn record(&mut self, event: Event) {
        match event {
            Event::Key(key) => match map_key(key) {
                Some(Command::Flap) => self.flap = true,
                Some(Command::Exit) => self.exit = true,
                None => {}
            },
            Event::Resize(cols, rows) => self.resize = Some((cols, rows)),
            _ => {}
        }
    }
}

/// Source of per-frame input for the game loop.
pub trait InputSource {
    fn poll(&mut self) -> io::Result<FrameInput>;
}

/// Drains the terminal's pending events without blocking.
#[derive(Debug, Default)]
pub struct TerminalInput;

impl InputSource for TerminalInput {
    fn poll(&mut self) -> io::Result<FrameInput> {
        let mut input = FrameInput::default();
        while event::poll(Duration::ZERO)? {
            input.record(event::read()?);
        }
        Ok(input)
    }
}
