// Refresh machinery - request tickets and the periodic task handle
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Monotonic ticket counter shared by every stats request. A response is
/// applied only while its ticket is still the newest one issued, so a slow
/// reply can never overwrite a fresher one.
#[derive(Debug, Default)]
pub struct RequestSequence {
    issued: AtomicU64,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the ticket for a request about to go out.
    pub fn begin(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// True while no newer ticket has been issued.
    pub fn is_current(&self, ticket: u64) -> bool {
        self.issued.load(Ordering::SeqCst) == ticket
    }
}

/// What one stats refresh pass did to the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Fresh stats written to the page.
    Applied { chart_rendered: bool },
    /// Payload carried the error flag; page left untouched.
    Unauthorized,
    /// A newer request went out while this one was in flight; response
    /// discarded.
    Stale,
    /// Page has no stats elements; nothing to refresh.
    Skipped,
    /// Transport or decode failure; page left untouched.
    Failed,
}

/// Handle to the spawned periodic-refresh loop. Dropping the handle without
/// [`RefreshTask::stop`] also ends the loop, since the shutdown channel
/// closes with it.
pub struct RefreshTask {
    handle: JoinHandle<()>,
    shutdown: watch::Sender<bool>,
}

impl RefreshTask {
    pub fn new(handle: JoinHandle<()>, shutdown: watch::Sender<bool>) -> Self {
        Self { handle, shutdown }
    }

    /// Signal the loop to stop and wait for it to wind down.
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        let _ = self.handle.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticket_is_current_until_superseded() {
        let sequence = RequestSequence::new();
        let first = sequence.begin();
        assert!(sequence.is_current(first));

        let second = sequence.begin();
        assert!(!sequence.is_current(first));
        assert!(sequence.is_current(second));
    }

    #[test]
    fn test_tickets_increase() {
        let sequence = RequestSequence::new();
        let a = sequence.begin();
        let b = sequence.begin();
        assert!(b > a);
    }
}
