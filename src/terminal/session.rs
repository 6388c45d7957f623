//! Terminal session: raw mode, alternate screen and input, restored on drop.

use crate::actor::{EventReader, InputEvent};
use crate::error::Result;
use crossbeam_channel::{bounded, Receiver};
use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io;
use std::time::Duration;
use tracing::debug;

/// What [`Terminal::init`] takes over.
#[derive(Debug, Clone)]
pub struct TerminalConfig {
    /// Draw on the alternate screen, leaving the shell's scrollback alone.
    pub alternate_screen: bool,
    /// Report clicks, drags and the wheel as [`InputEvent`]s.
    pub mouse_capture: bool,
    /// Longest the input thread blocks before noticing a stop request.
    pub poll_timeout: Duration,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            alternate_screen: true,
            mouse_capture: true,
            poll_timeout: Duration::from_millis(10),
        }
    }
}

/// Raw-mode terminal plus the thread reading its input.
///
/// Dropping it stops the reader and puts the terminal back the way it was,
/// on early returns and unwinding panics too.
pub struct Terminal {
    config: TerminalConfig,
    events: Receiver<InputEvent>,
    reader: Option<EventReader>,
}

impl Terminal {
    /// Enter raw mode and start reading input.
    ///
    /// # Errors
    ///
    /// Returns an error if raw mode, the alternate screen, mouse capture or
    /// the reader thread cannot be set up. Anything already enabled is
    /// restored before returning.
    pub fn init(config: TerminalConfig) -> Result<Self> {
        let (tx, events) = bounded::<InputEvent>(64);

        terminal::enable_raw_mode()?;
        // Constructed now so that Drop cleans up after any later failure.
        let mut term = Self {
            config,
            events,
            reader: None,
        };
        term.enter()?;
        term.reader = Some(EventReader::spawn(tx, term.config.poll_timeout)?);
        debug!(config = ?term.config, "terminal initialized");
        Ok(term)
    }

    fn enter(&self) -> io::Result<()> {
        let mut out = io::stdout();
        if self.config.alternate_screen {
            execute!(out, EnterAlternateScreen)?;
        }
        if self.config.mouse_capture {
            execute!(out, EnableMouseCapture)?;
        }
        execute!(out, cursor::Hide)
    }

    /// Best effort: every step runs even if an earlier one failed.
    fn leave(&self) {
        let mut out = io::stdout();
        let _ = execute!(out, cursor::Show);
        if self.config.mouse_capture {
            let _ = execute!(out, DisableMouseCapture);
        }
        if self.config.alternate_screen {
            let _ = execute!(out, LeaveAlternateScreen);
        }
        let _ = terminal::disable_raw_mode();
    }

    /// Input events from the reader thread.
    #[inline]
    pub const fn events(&self) -> &Receiver<InputEvent> {
        &self.events
    }

    /// Current size in columns and rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be queried.
    pub fn size(&self) -> Result<(u16, u16)> {
        Ok(terminal::size()?)
    }

    /// Settings this terminal was initialized with.
    pub const fn config(&self) -> &TerminalConfig {
        &self.config
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        if let Some(reader) = self.reader.take() {
            reader.join();
        }
        self.leave();
        debug!("terminal restored");
    }
}
