//! In-flight request counter used to drive busy indicators.

use std::sync::Arc;
use tokio::sync::watch;

/// Number of backend calls currently in flight.
///
/// Every request holds a [`RequestGuard`] from just before it is sent until
/// it settles; dropping the guard (including when the request future itself
/// is dropped) decrements the count. Clones share the same counter.
#[derive(Debug, Clone)]
pub struct LiveRequests {
    tx: Arc<watch::Sender<usize>>,
}

impl LiveRequests {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(0);
        Self { tx: Arc::new(tx) }
    }

    pub fn current(&self) -> usize {
        *self.tx.borrow()
    }

    pub fn is_idle(&self) -> bool {
        self.current() == 0
    }

    /// Receiver that observes every change of the count.
    pub fn subscribe(&self) -> watch::Receiver<usize> {
        self.tx.subscribe()
    }

    /// Resolve once no request is in flight.
    pub async fn wait_idle(&self) {
        let mut rx = self.subscribe();
        // The sender lives in `self`, so the channel cannot close here.
        let _ = rx.wait_for(|count| *count == 0).await;
    }

    #[must_use = "the request is only counted while the guard is alive"]
    pub fn track(&self) -> RequestGuard {
        self.tx.send_modify(|count| *count += 1);
        RequestGuard {
            tx: Arc::clone(&self.tx),
        }
    }
}

impl Default for LiveRequests {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub struct RequestGuard {
    tx: Arc<watch::Sender<usize>>,
}

impl Drop for RequestGuard {
    fn drop(&mut self) {
        self.tx
            .send_modify(|count| *count = count.saturating_sub(1));
    }
}
