use std::time::{Duration, Instant};

/// Time between movement steps.
pub const STEP_INTERVAL: Duration = Duration::from_millis(150);
/// Time between paints, roughly 60 per second.
pub const FRAME_INTERVAL: Duration = Duration::from_micros(16_667);

/// A repeating deadline. Fires at most once per check, so a stalled caller
/// gets one late tick rather than a burst.
#[derive(Debug, Clone)]
pub struct Interval {
    period: Duration,
    last: Option<Instant>,
}

impl Interval {
    pub fn new(period: Duration) -> Self {
        Interval { period, last: None }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Arms the interval so the next tick is one period after `now`.
    pub fn reset(&mut self, now: Instant) {
        self.last = Some(now);
    }

    pub fn cancel(&mut self) {
        self.last = None;
    }

    pub fn is_armed(&self) -> bool {
        self.last.is_some()
    }

    pub fn due(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.duration_since(last) >= self.period => {
                self.last = Some(now);
                true
            }
            _ => false,
        }
    }

    /// Time left until the next tick, zero if overdue, `None` when cancelled.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.last
            .map(|last| self.period.saturating_sub(now.duration_since(last)))
    }
}

/// What a poll of the clock asks the caller to do.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Pulse {
    pub paint: bool,
    pub step: bool,
}

/// Drives paints and movement steps off a single monotonic clock.
///
/// Steps are only taken on paint pulses, and several paints may happen
/// between two steps.
#[derive(Debug, Clone)]
pub struct GameClock {
    frame: Interval,
    step: Interval,
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new(FRAME_INTERVAL, STEP_INTERVAL)
    }
}

impl GameClock {
    pub fn new(frame: Duration, step: Duration) -> Self {
        GameClock {
            frame: Interval::new(frame),
            step: Interval::new(step),
        }
    }

    /// (Re)arms both intervals from `now`. Starting a running clock restarts
    /// it; there is only ever one pending tick of each kind.
    pub fn start(&mut self, now: Instant) {
        self.frame.reset(now);
        self.step.reset(now);
    }

    pub fn stop(&mut self) {
        self.frame.cancel();
        self.step.cancel();
    }

    pub fn is_running(&self) -> bool {
        self.frame.is_armed()
    }

    pub fn poll(&mut self, now: Instant) -> Pulse {
        let paint = self.frame.due(now);
        let step = paint && self.step.due(now);
        Pulse { paint, step }
    }

    /// How long the caller may sleep before the next paint is due.
    pub fn until_next_paint(&self, now: Instant) -> Option<Duration> {
        self.frame.remaining(now)
    }
}
