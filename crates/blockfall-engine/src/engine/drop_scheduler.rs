use std::time::Duration;

/// Time accumulator that decides when the falling piece descends on its own.
///
/// Each call to [`Self::advance`] adds the elapsed frame time. Once the accumulated time
/// is strictly greater than the active interval, one step is due and the accumulator
/// restarts from zero. At most one step is reported per call; time beyond the interval
/// is discarded.
///
/// The active interval is the fast one while a fast-drop request is held, the normal
/// one otherwise.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use blockfall_engine::DropScheduler;
///
/// let mut scheduler = DropScheduler::new(Duration::from_millis(500), Duration::from_millis(50));
///
/// assert!(!scheduler.advance(Duration::from_millis(500)));
/// assert!(scheduler.advance(Duration::from_millis(1)));
///
/// scheduler.set_fast_drop(true);
/// assert!(scheduler.advance(Duration::from_millis(51)));
/// ```
#[derive(Debug, Clone)]
pub struct DropScheduler {
    normal_interval: Duration,
    fast_interval: Duration,
    fast_drop: bool,
    elapsed: Duration,
}

impl DropScheduler {
    #[must_use]
    pub const fn new(normal_interval: Duration, fast_interval: Duration) -> Self {
        Self {
            normal_interval,
            fast_interval,
            fast_drop: false,
            elapsed: Duration::ZERO,
        }
    }

    /// Interval currently in effect.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        if self.fast_drop {
            self.fast_interval
        } else {
            self.normal_interval
        }
    }

    #[must_use]
    pub const fn is_fast_drop(&self) -> bool {
        self.fast_drop
    }

    /// Time accumulated since the last step.
    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Switches between the fast and normal interval.
    ///
    /// The accumulated time is kept, so switching to fast drop after a long pause makes
    /// the next [`Self::advance`] step immediately.
    pub const fn set_fast_drop(&mut self, fast_drop: bool) {
        self.fast_drop = fast_drop;
    }

    /// Adds `elapsed` and reports whether a step is due.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        self.elapsed = self.elapsed.saturating_add(elapsed);
        if self.elapsed > self.interval() {
            self.elapsed = Duration::ZERO;
            return true;
        }
        false
    }

    /// Restarts the accumulator, typically after a step made outside the scheduler.
    pub const fn reset_elapsed(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    /// Clears both the accumulator and the fast-drop request.
    pub const fn reset(&mut self) {
        self.fast_drop = false;
        self.elapsed = Duration::ZERO;
    }
}
