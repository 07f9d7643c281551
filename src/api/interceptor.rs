//! Single-flight refresh coordination
//!
//! The gate has two states. `Idle`: no refresh outstanding; the first 401
//! claims leadership and runs the refresh. `Refreshing`: a refresh is in
//! flight; further 401s become waiters on the pending channel. The leader
//! resolves the channel exactly once and every party observes the same
//! outcome. Resolution returns the gate to `Idle` before waiters wake, so a
//! 401 that arrives after resolution starts a new cycle instead of reading a
//! stale one.

use std::sync::Mutex;
use tokio::sync::watch;

/// Shared result of one refresh cycle
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RefreshOutcome {
    /// New access token every queued request retries with
    Refreshed(String),
    /// The refresh was rejected; carries the error text
    Failed(String),
}

/// What a 401 handler drew from the gate
pub(crate) enum RefreshTicket {
    /// This caller runs the refresh and must call [`RefreshGate::resolve`]
    Leader(watch::Sender<Option<RefreshOutcome>>),
    /// A refresh is already in flight; wait on this receiver
    Waiter(watch::Receiver<Option<RefreshOutcome>>),
}

/// Gate guaranteeing at most one refresh in flight process-wide
pub(crate) struct RefreshGate {
    pending: Mutex<Option<watch::Receiver<Option<RefreshOutcome>>>>,
}

impl RefreshGate {
    pub fn new() -> Self {
        Self {
            pending: Mutex::new(None),
        }
    }

    /// Join the current refresh cycle, becoming the leader if none is active
    pub fn join(&self) -> RefreshTicket {
        let mut pending = self.pending.lock().unwrap();
        if let Some(rx) = &*pending {
            return RefreshTicket::Waiter(rx.clone());
        }

        let (tx, rx) = watch::channel(None);
        *pending = Some(rx);
        RefreshTicket::Leader(tx)
    }

    /// Publish the outcome and return the gate to idle. The gate goes idle
    /// first so late 401s start a fresh cycle rather than adopting this one.
    pub fn resolve(&self, leader: watch::Sender<Option<RefreshOutcome>>, outcome: RefreshOutcome) {
        {
            let mut pending = self.pending.lock().unwrap();
            *pending = None;
        }
        let _ = leader.send(Some(outcome));
    }

    /// Wait for the in-flight refresh to resolve. A leader that disappears
    /// without resolving reads as a failure rather than a hang.
    pub async fn wait(mut rx: watch::Receiver<Option<RefreshOutcome>>) -> RefreshOutcome {
        match rx.wait_for(|outcome| outcome.is_some()).await {
            Ok(outcome) => outcome
                .clone()
                .unwrap_or_else(|| RefreshOutcome::Failed("refresh abandoned".to_string())),
            Err(_) => RefreshOutcome::Failed("refresh abandoned".to_string()),
        }
    }
}
