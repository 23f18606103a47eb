use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, terminal};
use ratatui::backend::CrosstermBackend;
use ratatui::{Frame, Terminal};

use super::{InputDriver, OutputDriver};

/// Drop key releases and repeats, and fold Shift+Tab into BackTab.
/// Terminals disagree on both.
pub fn normalize(evt: Event) -> Option<Event> {
    match evt {
        Event::Key(mut key) => {
            if key.kind != KeyEventKind::Press {
                return None;
            }
            if key.code == KeyCode::Tab && key.modifiers.contains(KeyModifiers::SHIFT) {
                key.code = KeyCode::BackTab;
                key.modifiers.remove(KeyModifiers::SHIFT);
            }
            Some(Event::Key(key))
        }
        other => Some(other),
    }
}

#[derive(Debug, Default)]
pub struct ConsoleInputDriver;

impl ConsoleInputDriver {
    pub fn new() -> Self {
        Self
    }
}

impl InputDriver for ConsoleInputDriver {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool> {
        crossterm::event::poll(timeout)
    }

    fn read(&mut self) -> io::Result<Event> {
        loop {
            if let Some(evt) = normalize(crossterm::event::read()?) {
                return Ok(evt);
            }
        }
    }
}

pub struct ConsoleOutputDriver {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    entered: bool,
}

impl ConsoleOutputDriver {
    pub fn new() -> io::Result<Self> {
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;
        Ok(Self {
            terminal,
            entered: false,
        })
    }

    pub fn area(&self) -> io::Result<ratatui::prelude::Rect> {
        let size = self
            .terminal
            .size()
            .map_err(|err| io::Error::other(err.to_string()))?;
        Ok(ratatui::prelude::Rect::new(0, 0, size.width, size.height))
    }
}

impl OutputDriver for ConsoleOutputDriver {
    fn enter(&mut self) -> io::Result<()> {
        if self.entered {
            return Ok(());
        }
        execute!(
            self.terminal.backend_mut(),
            EnterAlternateScreen,
            EnableMouseCapture
        )?;
        terminal::enable_raw_mode()?;
        self.terminal.hide_cursor()?;
        self.entered = true;
        Ok(())
    }

    fn exit(&mut self) -> io::Result<()> {
        if !self.entered {
            return Ok(());
        }
        terminal::disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            DisableMouseCapture,
            LeaveAlternateScreen
        )?;
        self.terminal.show_cursor()?;
        self.entered = false;
        Ok(())
    }

    fn draw<F>(&mut self, f: F) -> io::Result<()>
    where
        F: FnOnce(&mut Frame<'_>),
    {
        self.terminal
            .draw(f)
            .map(|_| ())
            .map_err(|err| io::Error::other(err.to_string()))
    }
}

impl Drop for ConsoleOutputDriver {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}
