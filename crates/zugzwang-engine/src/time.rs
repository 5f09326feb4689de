//! Time management — convert clock parameters to a search time budget.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use zugzwang_core::Color;

use crate::search::control::SearchControl;

/// Cap on the time allotted from a single remaining-clock reading.
const MAX_ALLOCATION: Duration = Duration::from_millis(5000);

/// Compute the time budget for a move given only the remaining clock time:
/// `min(remaining / 30, 5000ms)`.
pub fn compute_limit(remaining: Duration) -> Duration {
    (remaining / 30).min(MAX_ALLOCATION)
}

/// Build a [`SearchControl`] from `go` parameters and the side to move.
///
/// Priority order:
/// 1. `infinite: true` -> unbounded (depth/node limits still apply).
/// 2. `movetime: Some(d)` -> fixed time budget `d`.
/// 3. `wtime/btime` present -> [`compute_limit`] on the side to move's clock.
/// 4. `depth` only / bare `go` -> unbounded.
pub fn limits_from_go(
    wtime: Option<Duration>,
    btime: Option<Duration>,
    movetime: Option<Duration>,
    infinite: bool,
    side: Color,
    stopped: Arc<AtomicBool>,
) -> SearchControl {
    if infinite {
        return SearchControl::new_infinite(stopped);
    }

    if let Some(mt) = movetime {
        return SearchControl::new_timed(stopped, mt);
    }

    let remaining = match side {
        Color::White => wtime,
        Color::Black => btime,
    };

    if let Some(rem) = remaining {
        return SearchControl::new_timed(stopped, compute_limit(rem));
    }

    SearchControl::new_infinite(stopped)
}
