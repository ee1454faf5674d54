use core::fmt;
use core::time::Duration;
use serde::{Deserialize, Serialize};
use web_time::Instant;

/// Elapsed play time split the way a game timer displays it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Elapsed {
    pub hours: u32,
    pub minutes: u8,
    pub seconds: u8,
}

impl Elapsed {
    pub const fn from_secs(total: u64) -> Self {
        let hours = total / 3600;
        Self {
            hours: if hours > u32::MAX as u64 {
                u32::MAX
            } else {
                hours as u32
            },
            minutes: ((total / 60) % 60) as u8,
            seconds: (total % 60) as u8,
        }
    }

    pub const fn from_duration(duration: Duration) -> Self {
        Self::from_secs(duration.as_secs())
    }

    pub const fn total_secs(&self) -> u64 {
        self.hours as u64 * 3600 + self.minutes as u64 * 60 + self.seconds as u64
    }
}

impl fmt::Display for Elapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

/// Time keeping service the engine drives. It starts the clock on the first
/// selection of a board, pauses it on a win and resets it on restart.
pub trait ElapsedClock {
    fn start(&mut self);

    fn pause(&mut self);

    fn reset(&mut self);

    fn elapsed(&self) -> Duration;

    fn is_running(&self) -> bool;

    fn read(&self) -> Elapsed {
        Elapsed::from_duration(self.elapsed())
    }
}

/// Wall clock stopwatch.
#[derive(Copy, Clone, Debug, Default)]
pub struct Stopwatch {
    accumulated: Duration,
    started_at: Option<Instant>,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ElapsedClock for Stopwatch {
    fn start(&mut self) {
        if self.started_at.is_none() {
            self.started_at = Some(Instant::now());
        }
    }

    fn pause(&mut self) {
        if let Some(started_at) = self.started_at.take() {
            self.accumulated += started_at.elapsed();
        }
    }

    fn reset(&mut self) {
        *self = Self::default();
    }

    fn elapsed(&self) -> Duration {
        self.accumulated
            + self
                .started_at
                .map_or(Duration::ZERO, |started_at| started_at.elapsed())
    }

    fn is_running(&self) -> bool {
        self.started_at.is_some()
    }
}

/// Clock that only moves when told to. For hosts that tick time themselves, and for tests.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ManualClock {
    elapsed: Duration,
    running: bool,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `delta` if the clock is running.
    pub fn advance(&mut self, delta: Duration) {
        if self.running {
            self.elapsed += delta;
        }
    }
}

impl ElapsedClock for ManualClock {
    fn start(&mut self) {
        self.running = true;
    }

    fn pause(&mut self) {
        self.running = false;
    }

    fn reset(&mut self) {
        *self = Self::default();
    }

    fn elapsed(&self) -> Duration {
        self.elapsed
    }

    fn is_running(&self) -> bool {
        self.running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_splits_into_hours_minutes_seconds() {
        let elapsed = Elapsed::from_secs(3 * 3600 + 25 * 60 + 7);
        assert_eq!(
            elapsed,
            Elapsed {
                hours: 3,
                minutes: 25,
                seconds: 7
            }
        );
        assert_eq!(elapsed.total_secs(), 3 * 3600 + 25 * 60 + 7);
        assert_eq!(alloc::format!("{elapsed}"), "03:25:07");
    }

    #[test]
    fn manual_clock_only_advances_while_running() {
        let mut clock = ManualClock::new();
        clock.advance(Duration::from_secs(5));
        assert_eq!(clock.elapsed(), Duration::ZERO);

        clock.start();
        clock.advance(Duration::from_secs(61));
        clock.pause();
        clock.advance(Duration::from_secs(30));
        assert_eq!(clock.read(), Elapsed::from_secs(61));

        clock.reset();
        assert_eq!(clock.read(), Elapsed::default());
        assert!(!clock.is_running());
    }

    #[test]
    fn stopwatch_keeps_time_across_pauses() {
        let mut watch = Stopwatch::new();
        assert!(!watch.is_running());

        watch.start();
        assert!(watch.is_running());
        watch.pause();
        let paused = watch.elapsed();
        assert!(!watch.is_running());
        assert_eq!(watch.elapsed(), paused);

        watch.reset();
        assert_eq!(watch.elapsed(), Duration::ZERO);
    }
}
