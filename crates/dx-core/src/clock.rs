use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::time::Instant;

/// Source of time for polling deadlines and output timestamps.
#[async_trait]
pub trait Clock: Send + Sync + 'static {
    /// Monotonic time, used for deadlines.
    fn now(&self) -> Instant;

    /// Wall-clock time, used for `generated_at`.
    fn utc_now(&self) -> DateTime<Utc>;

    async fn sleep(&self, duration: Duration);
}

/// Clock backed by the tokio timer.
///
/// Under a paused runtime (`start_paused = true`) sleeps complete instantly
/// and advance `now()` by exactly the slept duration.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

#[async_trait]
impl Clock for TokioClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn utc_now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
