//! Time management utilities

use std::time::{Duration, Instant};

/// Fixed-interval tick timer
///
/// Keeps an absolute deadline that advances by one interval per tick, so
/// the time a tick spends working does not push later ticks back. Also
/// measures how long the last tick-to-tick interval actually took.
pub struct TickTimer {
    interval: Duration,
    next_tick: Instant,
    last_tick: Option<Instant>,
    delta: Duration,
    tick_count: u64,
}

impl TickTimer {
    /// Create a timer for the given interval; the first tick is due now
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_tick: Instant::now(),
            last_tick: None,
            delta: Duration::ZERO,
            tick_count: 0,
        }
    }

    /// Record that a tick is starting and move the deadline on by one interval.
    ///
    /// After an overrun the deadline restarts from now rather than firing a
    /// burst of late ticks.
    pub fn mark_tick(&mut self) {
        let now = Instant::now();
        if let Some(last) = self.last_tick {
            self.delta = now.duration_since(last);
        }
        self.last_tick = Some(now);
        self.tick_count += 1;

        self.next_tick += self.interval;
        if self.next_tick < now {
            self.next_tick = now + self.interval;
        }
    }

    /// Time remaining until the next tick is due (zero when overdue)
    pub fn until_next_tick(&self) -> Duration {
        self.next_tick.saturating_duration_since(Instant::now())
    }

    /// Measured time between the starts of the last two ticks
    pub fn delta(&self) -> Duration {
        self.delta
    }

    /// Number of ticks recorded so far
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Configured interval
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

/// Simple stopwatch for measuring elapsed time
pub struct Stopwatch {
    start_time: Option<Instant>,
    elapsed: Duration,
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

impl Stopwatch {
    /// Create a new stopped stopwatch
    pub fn new() -> Self {
        Self {
            start_time: None,
            elapsed: Duration::ZERO,
        }
    }

    /// Create a new stopwatch and start it immediately
    pub fn start_new() -> Self {
        let mut stopwatch = Self::new();
        stopwatch.start();
        stopwatch
    }

    /// Start the stopwatch
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Stop the stopwatch and accumulate elapsed time
    pub fn stop(&mut self) {
        if let Some(start) = self.start_time {
            self.elapsed += start.elapsed();
            self.start_time = None;
        }
    }

    /// Total elapsed time, including the running segment
    pub fn elapsed(&self) -> Duration {
        self.elapsed + self.start_time.map_or(Duration::ZERO, |start| start.elapsed())
    }
}
