//! Randomized pause between page advances

use crate::config::CrawlerConfig;
use rand::Rng;
use std::time::Duration;

/// Produces `base + uniform(0..=jitter)` delays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacer {
    base: Duration,
    jitter: Duration,
}

impl Pacer {
    pub fn new(base: Duration, jitter: Duration) -> Self {
        Self { base, jitter }
    }

    pub fn from_config(config: &CrawlerConfig) -> Self {
        Self::new(
            Duration::from_millis(config.pacing_base_ms),
            Duration::from_millis(config.pacing_jitter_ms),
        )
    }

    /// A pacer that never sleeps
    pub fn none() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    /// Picks the next delay
    pub fn next_delay(&self) -> Duration {
        let jitter_ms = self.jitter.as_millis() as u64;
        if jitter_ms == 0 {
            return self.base;
        }
        self.base + Duration::from_millis(rand::rng().random_range(0..=jitter_ms))
    }

    /// Sleeps for the next delay
    pub async fn pause(&self) {
        let delay = self.next_delay();
        if !delay.is_zero() {
            tracing::debug!("Pausing {}ms before scanning", delay.as_millis());
            tokio::time::sleep(delay).await;
        }
    }
}
