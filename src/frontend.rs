//! The seams between the engine and whatever shows it and steers it.

use crate::direction::Direction;
use crate::session::GameSession;
use crate::settings::Settings;
use std::io;
use std::time::Duration;

/// A player intent, already decoded from whatever device produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    /// Pause or resume; starts a game from the menu or game-over screen.
    Pause,
    Start,
    Menu,
    Quit,
}

pub trait InputSource {
    /// Waits up to `timeout` for the next command.
    fn poll(&mut self, timeout: Duration) -> io::Result<Option<Command>>;
}

/// Paints the session. Must not assume anything changed since the last call.
pub trait Renderer {
    fn begin(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn render(&mut self, session: &GameSession, settings: &Settings) -> io::Result<()>;

    fn finish(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Draws nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _session: &GameSession, _settings: &Settings) -> io::Result<()> {
        Ok(())
    }
}
