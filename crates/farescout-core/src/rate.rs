//! Client-side rate gate for upstream search calls.
//!
//! The upstream provider enforces a request quota; the gate rejects calls
//! locally once the configured budget for the window is spent. A rejected
//! call is reported as a rate-limited provider error and becomes a skipped
//! fan-out leg. No queueing, no retry.

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use governor::clock::DefaultClock;
use governor::state::direct::NotKeyed;
use governor::state::InMemoryState;
use governor::{Quota, RateLimiter};

type DirectRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

#[derive(Clone)]
pub struct RateGate {
    limiter: Arc<DirectRateLimiter>,
}

impl RateGate {
    /// Allow at most `limit` calls per `window`, with the full limit
    /// available as burst.
    pub fn new(window: Duration, limit: u32) -> Self {
        Self {
            limiter: Arc::new(RateLimiter::direct(quota_from_window(window, limit))),
        }
    }

    /// Returns whether the call may proceed, consuming one cell of budget.
    pub fn check(&self) -> bool {
        self.limiter.check().is_ok()
    }
}

fn quota_from_window(window: Duration, limit: u32) -> Quota {
    let safe_limit = limit.max(1);
    let burst = NonZeroU32::new(safe_limit).expect("safe limit must be non-zero");

    let seconds_per_cell = (window.as_secs_f64() / f64::from(safe_limit)).max(0.001);
    let period = Duration::from_secs_f64(seconds_per_cell);

    Quota::with_period(period)
        .expect("period is always greater than zero")
        .allow_burst(burst)
}
