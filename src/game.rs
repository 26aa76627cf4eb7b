use crate::clock::GameClock;
use crate::frontend::{Command, InputSource, Renderer};
use crate::session::{GameEvent, GameSession, Status};
use crate::settings::Settings;
use log::{debug, info};
use std::io;
use std::time::{Duration, Instant};

/// How long to wait for input while nothing is animating.
const IDLE_POLL: Duration = Duration::from_millis(50);

/// Drives a session with a clock, one input source and one renderer.
pub struct Game<R: Renderer, I: InputSource> {
    session: GameSession,
    settings: Settings,
    clock: GameClock,
    renderer: R,
    input: I,
    dirty: bool,
    quit: bool,
}

impl<R: Renderer, I: InputSource> Game<R, I> {
    pub fn new(session: GameSession, settings: Settings, renderer: R, input: I) -> Self {
        Game {
            session,
            settings,
            clock: GameClock::default(),
            renderer,
            input,
            dirty: true,
            quit: false,
        }
    }

    pub fn with_clock(mut self, clock: GameClock) -> Self {
        self.clock = clock;
        self
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn clock(&self) -> &GameClock {
        &self.clock
    }

    pub fn is_done(&self) -> bool {
        self.quit
    }

    fn start(&mut self, now: Instant) {
        self.session.start();
        self.clock.start(now);
    }

    pub fn handle(&mut self, command: Command, now: Instant) {
        debug!("Command {:?} in {:?}", command, self.session.status());
        match command {
            Command::Turn(direction) => {
                self.session.enqueue_direction(direction);
            }
            Command::Pause => match self.session.status() {
                Status::Running | Status::Paused => {
                    if self.session.toggle_pause() == Status::Running {
                        self.clock.start(now);
                    } else {
                        self.clock.stop();
                    }
                }
                Status::Menu | Status::GameOver => self.start(now),
            },
            Command::Start => self.start(now),
            Command::Menu => {
                self.session.open_menu();
                self.clock.stop();
            }
            Command::Quit => self.quit = true,
        }
        self.dirty = true;
    }

    /// Runs whatever the clock says is due at `now`.
    pub fn advance(&mut self, now: Instant) -> io::Result<()> {
        let pulse = self.clock.poll(now);

        if pulse.step {
            for event in self.session.tick() {
                if let GameEvent::GameOver { .. } = event {
                    self.clock.stop();
                }
            }
        }

        if pulse.paint || self.dirty {
            self.renderer.render(&self.session, &self.settings)?;
            self.dirty = false;
        }
        Ok(())
    }

    pub fn run(&mut self) -> io::Result<()> {
        self.renderer.begin()?;
        let result = self.run_loop();
        self.renderer.finish()?;
        info!(
            "Leaving with score {} and high score {}",
            self.session.score(),
            self.session.high_score()
        );
        result
    }

    fn run_loop(&mut self) -> io::Result<()> {
        while !self.quit {
            let timeout = self
                .clock
                .until_next_paint(Instant::now())
                .unwrap_or(IDLE_POLL);

            if let Some(command) = self.input.poll(timeout)? {
                self.handle(command, Instant::now());
            }

            self.advance(Instant::now())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direction::Direction;
    use crate::frontend::NullRenderer;
    use crate::grid::{Cell, GridConfig};
    use std::collections::VecDeque;

    /// Replays a fixed list of commands, then quits.
    struct Script(VecDeque<Command>);

    impl InputSource for Script {
        fn poll(&mut self, _timeout: Duration) -> io::Result<Option<Command>> {
            Ok(Some(self.0.pop_front().unwrap_or(Command::Quit)))
        }
    }

    #[derive(Default)]
    struct CountingRenderer {
        frames: usize,
        began: bool,
        finished: bool,
    }

    impl Renderer for CountingRenderer {
        fn begin(&mut self) -> io::Result<()> {
            self.began = true;
            Ok(())
        }

        fn render(&mut self, _session: &GameSession, _settings: &Settings) -> io::Result<()> {
            self.frames += 1;
            Ok(())
        }

        fn finish(&mut self) -> io::Result<()> {
            self.finished = true;
            Ok(())
        }
    }

    fn game<R: Renderer>(renderer: R) -> Game<R, Script> {
        let session = GameSession::with_defaults(GridConfig::default());
        Game::new(session, Settings::default(), renderer, Script(VecDeque::new()))
            .with_clock(GameClock::new(Duration::from_millis(10), Duration::from_millis(100)))
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_pause_starts_from_menu() {
        let mut game = game(NullRenderer);
        let now = Instant::now();
        assert_eq!(game.session().status(), Status::Menu);

        game.handle(Command::Pause, now);
        assert_eq!(game.session().status(), Status::Running);
        assert!(game.clock().is_running());
    }

    #[test]
    fn test_pause_stops_the_clock() {
        let mut game = game(NullRenderer);
        let now = Instant::now();
        game.handle(Command::Start, now);

        game.handle(Command::Pause, now);
        assert_eq!(game.session().status(), Status::Paused);
        assert!(!game.clock().is_running());

        game.advance(now + ms(1000)).unwrap();
        assert_eq!(
            game.session().grid().to_grid(game.session().snake().head()),
            Cell::new(12, 12)
        );

        game.handle(Command::Pause, now + ms(1000));
        assert_eq!(game.session().status(), Status::Running);
        assert!(game.clock().is_running());
    }

    #[test]
    fn test_steps_follow_the_clock() {
        let mut game = game(NullRenderer);
        let start = Instant::now();
        game.handle(Command::Start, start);

        for t in 1..=250 {
            game.advance(start + ms(t)).unwrap();
        }
        let head = game.session().grid().to_grid(game.session().snake().head());
        assert_eq!(head, Cell::new(14, 12));
    }

    #[test]
    fn test_turn_applies_on_the_next_step() {
        let mut game = game(NullRenderer);
        let start = Instant::now();
        game.handle(Command::Start, start);
        game.handle(Command::Turn(Direction::Down), start + ms(5));

        for t in 1..=100 {
            game.advance(start + ms(t)).unwrap();
        }
        assert_eq!(game.session().direction(), Direction::Down);
    }

    #[test]
    fn test_menu_stops_everything() {
        let mut game = game(NullRenderer);
        let now = Instant::now();
        game.handle(Command::Start, now);
        game.handle(Command::Menu, now);
        assert_eq!(game.session().status(), Status::Menu);
        assert!(!game.clock().is_running());
    }

    #[test]
    fn test_renders_on_paint_and_on_commands() {
        let mut game = game(CountingRenderer::default());
        let start = Instant::now();

        // Initial frame is drawn even though the clock is stopped.
        game.advance(start).unwrap();
        assert_eq!(game.renderer.frames, 1);
        game.advance(start + ms(500)).unwrap();
        assert_eq!(game.renderer.frames, 1);

        game.handle(Command::Start, start);
        game.advance(start).unwrap();
        assert_eq!(game.renderer.frames, 2);

        for t in 1..=100 {
            game.advance(start + ms(t)).unwrap();
        }
        assert_eq!(game.renderer.frames, 12);
    }

    #[test]
    fn test_run_until_quit() {
        let mut game = game(CountingRenderer::default());
        game.input = Script(VecDeque::from([
            Command::Start,
            Command::Turn(Direction::Up),
            Command::Pause,
        ]));

        game.run().unwrap();
        assert!(game.is_done());
        assert!(game.renderer.began);
        assert!(game.renderer.finished);
        assert_eq!(game.session().status(), Status::Paused);
    }
}
