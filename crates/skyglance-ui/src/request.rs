//! Supersession of in-flight widget actions.
//!
//! Each action takes a [`RequestTicket`]. Starting a new action cancels the
//! previous ticket, so a slow response can never overwrite a newer one.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Default)]
pub struct RequestTracker {
    generation: AtomicU64,
    active: Mutex<CancellationToken>,
}

/// Handle owned by one action.
#[derive(Debug, Clone)]
pub struct RequestTicket {
    generation: u64,
    token: CancellationToken,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new action, cancelling whichever one was running.
    pub fn begin(&self) -> RequestTicket {
        let mut active = self.active.lock();
        active.cancel();

        let token = CancellationToken::new();
        *active = token.clone();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!("Starting request generation {}", generation);

        RequestTicket { generation, token }
    }

    /// Whether `ticket` belongs to the most recent action.
    pub fn is_current(&self, ticket: &RequestTicket) -> bool {
        !ticket.token.is_cancelled() && self.generation.load(Ordering::SeqCst) == ticket.generation
    }
}

impl RequestTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Drive `fut` unless this ticket is superseded first.
    pub async fn guard<F: Future>(&self, fut: F) -> Option<F::Output> {
        tokio::select! {
            biased;
            _ = self.token.cancelled() => None,
            out = fut => Some(out),
        }
    }
}
