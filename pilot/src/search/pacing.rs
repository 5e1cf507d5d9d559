use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};
use tracing::debug;

/// Gate in front of every outbound insights request.
#[async_trait]
pub trait Pacer: Send + Sync {
    /// Wait until the next request may be sent.
    async fn acquire(&self);

    /// Called once the request let through by `acquire` has completed.
    async fn release(&self) {}
}

/// Enforces a minimum quiet interval between successive requests.
///
/// The first acquire returns immediately; later ones sleep for whatever is
/// left of `interval` since the previous request finished (or started, if it
/// was never released).
#[derive(Clone)]
pub struct FixedDelayPacer {
    interval: Duration,
    last_acquire: Arc<Mutex<Option<Instant>>>,
}

impl FixedDelayPacer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_acquire: Arc::new(Mutex::new(None)),
        }
    }

    pub fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }
}

#[async_trait]
impl Pacer for FixedDelayPacer {
    async fn acquire(&self) {
        let mut last = self.last_acquire.lock().await;

        if let Some(last_time) = *last {
            let elapsed = last_time.elapsed();
            if elapsed < self.interval {
                let wait = self.interval - elapsed;
                debug!(wait_ms = wait.as_millis() as u64, "Pacing insights request");
                sleep(wait).await;
            }
        }

        *last = Some(Instant::now());
    }

    async fn release(&self) {
        *self.last_acquire.lock().await = Some(Instant::now());
    }
}

/// No pacing at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPacing;

#[async_trait]
impl Pacer for NoPacing {
    async fn acquire(&self) {}
}
