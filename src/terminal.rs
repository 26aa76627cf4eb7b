//! Crossterm front end: draws the playfield two columns per cell and turns
//! key presses into commands.

use crate::direction::Direction;
use crate::food::FoodItem;
use crate::frontend::{Command, InputSource, Renderer};
use crate::grid::GridConfig;
use crate::session::{GameSession, Status};
use crate::settings::{Rgb, Settings};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::warn;
use std::io::{self, Stdout, Write};
use std::time::Duration;

/// Plain food colour when the catalog gave no colour of its own.
const PLAIN_FOOD: Rgb = Rgb::new(0xff, 0x00, 0x00);

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Terminal column and row of a grid cell, inside a one character border.
fn screen_pos(x: i32, y: i32) -> (u16, u16) {
    (1 + 2 * x as u16, 1 + y as u16)
}

fn food_glyph(item: &FoodItem) -> String {
    let initial = item
        .look
        .as_ref()
        .and_then(|look| look.sprite.as_deref())
        .and_then(|name| name.chars().find(|c| c.is_alphanumeric()))
        .map(|c| c.to_ascii_uppercase());

    match (item.is_long(), initial) {
        (true, Some(c)) => format!("[{}=]", c),
        (true, None) => "[==]".to_string(),
        (false, Some(c)) => format!("{}*", c),
        (false, None) => "()".to_string(),
    }
}

fn food_color(item: &FoodItem) -> Rgb {
    item.look
        .as_ref()
        .and_then(|look| look.color)
        .unwrap_or(PLAIN_FOOD)
}

pub struct TerminalRenderer<W: Write> {
    out: W,
}

impl TerminalRenderer<Stdout> {
    pub fn stdout() -> Self {
        TerminalRenderer { out: io::stdout() }
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        TerminalRenderer { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn draw_border(&mut self, grid: &GridConfig, settings: &Settings) -> io::Result<()> {
        let size = grid.size() as u16;
        let right = size * 2 + 1;
        let bottom = size + 1;

        queue!(self.out, SetForegroundColor(color(settings.outline_color)))?;
        for x in 0..=right {
            queue!(self.out, MoveTo(x, 0), Print("#"), MoveTo(x, bottom), Print("#"))?;
        }
        for y in 1..bottom {
            queue!(self.out, MoveTo(0, y), Print("#"), MoveTo(right, y), Print("#"))?;
        }
        Ok(())
    }

    fn draw_food(&mut self, session: &GameSession) -> io::Result<()> {
        for item in session.food().items() {
            let (col, row) = screen_pos(item.grid_x, item.grid_y);
            queue!(
                self.out,
                MoveTo(col, row),
                SetForegroundColor(color(food_color(item))),
                Print(food_glyph(item))
            )?;
        }
        Ok(())
    }

    fn draw_snake(&mut self, session: &GameSession, settings: &Settings) -> io::Result<()> {
        let grid = session.grid();
        let body = color(settings.snake_color);
        let head = color(settings.snake_color.adjust(50));
        let outline = settings.outline_width > 0;

        // Tail first so the head is painted last.
        for (i, pos) in session.snake().positions().iter().enumerate().rev() {
            let cell = grid.to_grid(*pos);
            if !grid.contains(cell) {
                continue;
            }
            let (col, row) = screen_pos(cell.x, cell.y);
            queue!(self.out, MoveTo(col, row))?;
            if i == 0 {
                queue!(self.out, SetForegroundColor(head), Print("██"))?;
            } else if outline {
                queue!(
                    self.out,
                    SetForegroundColor(body),
                    SetBackgroundColor(color(settings.outline_color)),
                    Print("▓▓"),
                    SetBackgroundColor(color(settings.background_color))
                )?;
            } else {
                queue!(self.out, SetForegroundColor(body), Print("██"))?;
            }
        }
        Ok(())
    }

    fn draw_overlay(&mut self, session: &GameSession) -> io::Result<()> {
        let text = match session.status() {
            Status::Running => return Ok(()),
            Status::Menu => "SPACE to start, q to quit".to_string(),
            Status::Paused => "Paused, SPACE to continue".to_string(),
            Status::GameOver => format!("GAME OVER! {} points, SPACE to play again", session.score()),
        };

        let size = session.grid().size() as u16;
        let width = size * 2 + 2;
        let col = width.saturating_sub(text.chars().count() as u16) / 2;
        queue!(
            self.out,
            MoveTo(col, size / 2 + 1),
            SetForegroundColor(Color::White),
            Print(text)
        )?;
        Ok(())
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn begin(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(self.out, EnterAlternateScreen, Hide)?;
        Ok(())
    }

    fn render(&mut self, session: &GameSession, settings: &Settings) -> io::Result<()> {
        let grid = session.grid();
        queue!(
            self.out,
            SetBackgroundColor(color(settings.background_color)),
            Clear(ClearType::All)
        )?;

        self.draw_border(grid, settings)?;
        self.draw_food(session)?;
        self.draw_snake(session, settings)?;
        self.draw_overlay(session)?;

        let below = grid.size() as u16 + 2;
        queue!(
            self.out,
            ResetColor,
            MoveTo(0, below),
            Print(format!(
                "Score: {}    High Score: {}",
                session.score(),
                session.high_score()
            )),
            MoveTo(0, below + 1),
            Print("Arrows/WASD to move, SPACE to pause, ESC for menu, q to quit")
        )?;

        self.out.flush()
    }

    fn finish(&mut self) -> io::Result<()> {
        execute!(self.out, ResetColor, Show, LeaveAlternateScreen)?;
        terminal::disable_raw_mode()
    }
}

/// Columns and rows needed to show a grid of `size` plus the status lines.
pub fn required_size(size: u32) -> (u16, u16) {
    let size = size as u16;
    (size * 2 + 2, size + 4)
}

/// Logs a warning when the terminal is too small for the playfield.
pub fn check_terminal_size(grid: &GridConfig) {
    let (need_cols, need_rows) = required_size(grid.size());
    if let Ok((cols, rows)) = terminal::size() {
        if cols < need_cols || rows < need_rows {
            warn!(
                "Terminal is {}x{} but a {}-cell grid needs {}x{}",
                cols,
                rows,
                grid.size(),
                need_cols,
                need_rows
            );
        }
    }
}

pub fn map_key(key: KeyEvent) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Command::Quit);
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Command::Turn(Direction::Up)),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(Command::Turn(Direction::Down))
        }
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(Command::Turn(Direction::Left))
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(Command::Turn(Direction::Right))
        }
        KeyCode::Char(' ') => Some(Command::Pause),
        KeyCode::Enter => Some(Command::Start),
        KeyCode::Esc => Some(Command::Menu),
        KeyCode::Char('q') => Some(Command::Quit),
        _ => None,
    }
}

/// Keyboard input from the terminal.
#[derive(Debug, Default)]
pub struct TerminalInput;

impl InputSource for TerminalInput {
    fn poll(&mut self, timeout: Duration) -> io::Result<Option<Command>> {
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                return Ok(map_key(key));
            }
        }
        Ok(None)
    }
}
