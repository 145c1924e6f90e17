//! Induced process termination.

use std::sync::Arc;

use tokio::sync::watch;

/// One-shot latch recording that the process must exit, and with what status.
///
/// Clones share the same latch. The first trigger wins; later triggers are
/// ignored.
#[derive(Clone)]
pub struct Terminator {
    tx: Arc<watch::Sender<Option<i32>>>,
}

impl Terminator {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(None);
        Self { tx: Arc::new(tx) }
    }

    /// Request termination with `exit_code`. Returns false if already requested.
    pub fn trigger(&self, exit_code: i32) -> bool {
        self.tx.send_if_modified(|requested| {
            if requested.is_some() {
                return false;
            }
            *requested = Some(exit_code);
            true
        })
    }

    /// Exit code requested so far, if any.
    pub fn requested(&self) -> Option<i32> {
        *self.tx.borrow()
    }

    /// Wait until termination is requested and return the exit code.
    pub async fn triggered(&self) -> i32 {
        let mut rx = self.tx.subscribe();
        // The sender lives in `self`, so the channel cannot close while we wait.
        let code = rx
            .wait_for(Option::is_some)
            .await
            .map(|code| (*code).unwrap_or_default());
        match code {
            Ok(code) => code,
            Err(_) => std::future::pending().await,
        }
    }
}

impl Default for Terminator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn first_trigger_wins() {
        let terminator = Terminator::new();
        assert_eq!(terminator.requested(), None);

        assert!(terminator.trigger(3));
        assert!(!terminator.clone().trigger(7));
        assert_eq!(terminator.requested(), Some(3));
    }

    #[tokio::test]
    async fn waiters_observe_trigger_from_clone() {
        let terminator = Terminator::new();
        let waiter = {
            let terminator = terminator.clone();
            tokio::spawn(async move { terminator.triggered().await })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiter.is_finished());

        terminator.trigger(2);
        let code = tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(code, 2);
    }

    fn assert_send<T: Send>(_: &T) {}

    #[test]
    fn triggered_future_is_send() {
        let terminator = Terminator::new();
        let waiting = terminator.triggered();
        assert_send(&waiting);
    }

    #[tokio::test]
    async fn triggered_can_drive_a_spawned_task() {
        let terminator = Terminator::new();
        let waiter = tokio::spawn({
            let terminator = terminator.clone();
            async move {
                tokio::select! {
                    code = terminator.triggered() => code,
                    _ = tokio::time::sleep(Duration::from_secs(5)) => -1,
                }
            }
        });
        terminator.trigger(9);
        assert_eq!(waiter.await.unwrap(), 9);
    }

    #[tokio::test]
    async fn already_triggered_resolves_immediately() {
        let terminator = Terminator::new();
        terminator.trigger(1);
        assert_eq!(terminator.triggered().await, 1);
    }
}
