//! Time budget shared by one top-level decision.
//!
//! The budget is the only cancellation checkpoint of the search: every
//! recursive node calls [`TimeBudget::check`] once on entry, and an `Err`
//! unwinds the whole depth through `?`.

use std::time::{Duration, Instant};

/// Raised when the remaining time drops below the abort threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("search cancelled: time budget exhausted")]
pub struct Cancelled;

pub struct TimeBudget<'a> {
    time_left: &'a dyn Fn() -> f64,
    threshold_ms: f64,
}

impl<'a> TimeBudget<'a> {
    pub fn new(time_left: &'a dyn Fn() -> f64, threshold_ms: f64) -> Self {
        Self {
            time_left,
            threshold_ms,
        }
    }

    /// Milliseconds left, as reported by the harness.
    pub fn remaining(&self) -> f64 {
        (self.time_left)()
    }

    pub fn threshold_ms(&self) -> f64 {
        self.threshold_ms
    }

    /// Queries the clock exactly once.
    pub fn check(&self) -> Result<(), Cancelled> {
        if self.remaining() < self.threshold_ms {
            Err(Cancelled)
        } else {
            Ok(())
        }
    }

    pub fn has_time(&self) -> bool {
        self.remaining() > self.threshold_ms
    }
}

/// Builds a `time_left` callable counting down from now.
pub fn countdown(limit: Duration) -> impl Fn() -> f64 {
    let deadline = Instant::now() + limit;
    move || {
        let now = Instant::now();
        if now >= deadline {
            -(now.duration_since(deadline).as_secs_f64() * 1000.0)
        } else {
            deadline.duration_since(now).as_secs_f64() * 1000.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_check_below_threshold() {
        let clock = || 5.0;
        let budget = TimeBudget::new(&clock, 10.0);
        assert_eq!(budget.check(), Err(Cancelled));
        assert!(!budget.has_time());
    }

    #[test]
    fn test_check_at_threshold_is_not_cancelled() {
        let clock = || 10.0;
        let budget = TimeBudget::new(&clock, 10.0);
        assert_eq!(budget.threshold_ms(), 10.0);
        assert_eq!(budget.remaining(), 10.0);
        assert_eq!(budget.check(), Ok(()));
        // ループ継続には閾値を厳密に上回る必要がある
        assert!(!budget.has_time());
    }

    #[test]
    fn test_check_queries_clock_once() {
        let calls = Cell::new(0);
        let clock = || {
            calls.set(calls.get() + 1);
            100.0
        };
        let budget = TimeBudget::new(&clock, 10.0);
        budget.check().unwrap();
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_countdown() {
        let left = countdown(Duration::from_secs(60));
        let ms = left();
        assert!(ms > 59_000.0 && ms <= 60_000.0);

        let expired = countdown(Duration::ZERO);
        std::thread::sleep(Duration::from_millis(2));
        assert!(expired() < 0.0);
    }
}
