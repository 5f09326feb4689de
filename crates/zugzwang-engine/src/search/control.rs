//! Search control — stop flag and time management.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Node interval at which the time-check poll runs inside negamax and at
/// every quiescence entry.
pub const TIME_CHECK_INTERVAL: u64 = 1000;

/// Fraction of the time budget past which iterative deepening will not
/// start a new iteration, since it is unlikely to finish.
const ITERATION_CUTOFF: f64 = 0.75;

/// Controls when a search should stop.
///
/// Checked periodically by the search (every [`TIME_CHECK_INTERVAL`] nodes)
/// to decide whether to abort. Time sources are monotonic wall-clock
/// (`Instant`); suspension/cancellation happens only at this poll.
pub struct SearchControl {
    stopped: Arc<AtomicBool>,
    start: Instant,
    time_limit: Option<Duration>,
}

impl SearchControl {
    /// Create control for an unbounded search (depth-limited only).
    pub fn new_infinite(stopped: Arc<AtomicBool>) -> Self {
        Self {
            stopped,
            start: Instant::now(),
            time_limit: None,
        }
    }

    /// Create control with a time budget; the clock starts immediately.
    pub fn new_timed(stopped: Arc<AtomicBool>, time_limit: Duration) -> Self {
        Self {
            stopped,
            start: Instant::now(),
            time_limit: Some(time_limit),
        }
    }

    /// Check whether the search should abort immediately.
    ///
    /// Returns `true` if the external stop flag is set, or if the time
    /// budget has been exceeded (checked only every
    /// [`TIME_CHECK_INTERVAL`] nodes for performance). When the budget
    /// fires, the stop flag is set so subsequent calls short-circuit.
    pub fn should_stop(&self, nodes: u64) -> bool {
        if self.stopped.load(Ordering::Relaxed) {
            return true;
        }

        if nodes % TIME_CHECK_INTERVAL != 0 {
            return false;
        }

        if let Some(limit) = self.time_limit
            && self.elapsed() >= limit
        {
            self.stopped.store(true, Ordering::Release);
            return true;
        }

        false
    }

    /// Check whether iterative deepening should start a new iteration.
    ///
    /// Returns `true` once elapsed time exceeds [`ITERATION_CUTOFF`] of the
    /// time budget, since a new iteration is unlikely to finish in time.
    pub fn should_stop_iterating(&self) -> bool {
        if self.stopped.load(Ordering::Relaxed) {
            return true;
        }

        if let Some(limit) = self.time_limit {
            let cutoff = limit.mul_f64(ITERATION_CUTOFF);
            return self.elapsed() >= cutoff;
        }

        false
    }

    /// Elapsed time since the control was created.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Reference to the shared stop flag, also used by the external `stop` command.
    pub fn stop_flag(&self) -> &Arc<AtomicBool> {
        &self.stopped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn infinite_control_never_stops_on_time() {
        let stopped = Arc::new(AtomicBool::new(false));
        let control = SearchControl::new_infinite(stopped);
        assert!(!control.should_stop(1000));
        assert!(!control.should_stop_iterating());
    }

    #[test]
    fn timed_control_does_not_stop_immediately() {
        let stopped = Arc::new(AtomicBool::new(false));
        let control = SearchControl::new_timed(stopped, Duration::from_secs(10));
        assert!(!control.should_stop(1000));
        assert!(!control.should_stop_iterating());
    }

    #[test]
    fn time_check_only_polls_on_interval() {
        let stopped = Arc::new(AtomicBool::new(false));
        let control = SearchControl::new_timed(stopped, Duration::from_millis(0));
        // Node counts that are not a multiple of the interval skip the poll
        // entirely, so they report "not stopped" even though the budget is
        // already exhausted.
        assert!(!control.should_stop(1));
    }

    #[test]
    fn external_stop_flag_takes_effect_immediately() {
        let stopped = Arc::new(AtomicBool::new(false));
        let control = SearchControl::new_infinite(Arc::clone(&stopped));
        stopped.store(true, Ordering::Relaxed);
        assert!(control.should_stop(1));
        assert!(control.should_stop_iterating());
    }

    #[test]
    fn zero_time_limit_stops_on_next_poll_boundary() {
        let stopped = Arc::new(AtomicBool::new(false));
        let control = SearchControl::new_timed(stopped, Duration::from_millis(0));
        assert!(control.should_stop(TIME_CHECK_INTERVAL));
    }
}
