//! Injectable pacing for assistant-authored messages.
//!
//! The UI paces replies with a short artificial delay so the assistant
//! doesn't answer instantly. Modeled as a port so tests swap in a no-op and
//! never wait; cancellation is dropping the future.

use async_trait::async_trait;
use std::time::Duration;

/// Applies the pacing delay before an assistant message is surfaced.
#[async_trait]
pub trait ResponsePacer: Send + Sync {
    /// Waits out the given delay.
    async fn pause(&self, delay: Duration);
}

/// Production pacer backed by the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioPacer;

#[async_trait]
impl ResponsePacer for TokioPacer {
    async fn pause(&self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }
}

/// Test pacer that returns immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPacer;

#[async_trait]
impl ResponsePacer for NoopPacer {
    async fn pause(&self, _delay: Duration) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn noop_pacer_returns_immediately() {
        let started = Instant::now();
        NoopPacer.pause(Duration::from_secs(5)).await;
        assert!(started.elapsed() < Duration::from_millis(100));
    }

    #[tokio::test(start_paused = true)]
    async fn tokio_pacer_waits_out_the_delay() {
        let started = tokio::time::Instant::now();
        TokioPacer.pause(Duration::from_millis(1200)).await;
        assert_eq!(started.elapsed(), Duration::from_millis(1200));
    }
}
