use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use governor::clock::DefaultClock;
use governor::state::direct::NotKeyed;
use governor::state::InMemoryState;
use governor::{Quota, RateLimiter};

type DirectRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// In-memory request budget guarding a metered upstream API.
///
/// Shared between clones so every handle draws from the same quota.
#[derive(Clone)]
pub struct RequestBudget {
    limiter: Arc<DirectRateLimiter>,
    retry_delay: Duration,
}

impl RequestBudget {
    pub fn new(quota_window: Duration, quota_limit: u32, retry_delay: Duration) -> Self {
        let quota = quota_from_window(quota_window, quota_limit);
        Self {
            limiter: Arc::new(RateLimiter::direct(quota)),
            retry_delay,
        }
    }

    /// Generous default sized for the metered spot API's free tier.
    pub fn per_minute(quota_limit: u32) -> Self {
        Self::new(
            Duration::from_secs(60),
            quota_limit,
            Duration::from_secs(5),
        )
    }

    /// Tries to acquire rate budget. When budget is unavailable the
    /// recommended wait before retrying is returned.
    pub fn acquire(&self) -> Result<(), Duration> {
        if self.limiter.check().is_ok() {
            return Ok(());
        }
        Err(self.retry_delay)
    }
}

fn quota_from_window(quota_window: Duration, quota_limit: u32) -> Quota {
    let safe_limit = quota_limit.max(1);
    let burst = NonZeroU32::new(safe_limit).expect("safe limit must be non-zero");

    let seconds_per_cell = (quota_window.as_secs_f64() / f64::from(safe_limit)).max(0.001);
    let period = Duration::from_secs_f64(seconds_per_cell);

    Quota::with_period(period)
        .expect("period is always greater than zero")
        .allow_burst(burst)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn denies_once_the_window_quota_is_spent() {
        let budget = RequestBudget::new(Duration::from_secs(60), 2, Duration::from_secs(3));

        assert!(budget.acquire().is_ok());
        assert!(budget.acquire().is_ok());

        let delay = budget.acquire().expect_err("third request should wait");
        assert_eq!(delay, Duration::from_secs(3));
    }

    #[test]
    fn clones_share_one_quota() {
        let budget = RequestBudget::new(Duration::from_secs(60), 1, Duration::from_secs(1));
        let sibling = budget.clone();

        assert!(budget.acquire().is_ok());
        assert!(sibling.acquire().is_err());
    }
}
