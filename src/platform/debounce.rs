use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

struct Shared<T> {
    generation: u64,
    settled: watch::Sender<T>,
}

/// Publishes a value only after it has stayed unchanged for the quiet period.
///
/// Every [`Debouncer::push`] aborts the pending timer and arms a new one.
/// Dropping the debouncer cancels the pending timer; the generation check
/// under the lock guarantees nothing is published after `cancel` returns,
/// even if the timer already woke up.
pub struct Debouncer<T> {
    quiet: Duration,
    shared: Arc<Mutex<Shared<T>>>,
    pending: Option<JoinHandle<()>>,
}

impl<T> Debouncer<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    pub fn new(initial: T, quiet: Duration) -> Self {
        let (settled, _) = watch::channel(initial);
        Self {
            quiet,
            shared: Arc::new(Mutex::new(Shared {
                generation: 0,
                settled,
            })),
            pending: None,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<T> {
        lock(&self.shared).settled.subscribe()
    }

    /// Last published value.
    #[cfg(test)]
    pub fn settled(&self) -> T {
        lock(&self.shared).settled.borrow().clone()
    }

    #[cfg(test)]
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Must be called from within a tokio runtime.
    pub fn push(&mut self, value: T) {
        let generation = self.bump_generation();
        let shared = Arc::clone(&self.shared);
        let quiet = self.quiet;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(quiet).await;
            let shared = lock(&shared);
            if shared.generation != generation {
                return;
            }
            shared.settled.send_if_modified(|current| {
                if *current == value {
                    return false;
                }
                *current = value;
                true
            });
        }));
    }

    pub fn cancel(&mut self) {
        self.bump_generation();
    }

    fn bump_generation(&mut self) -> u64 {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
        let mut shared = lock(&self.shared);
        shared.generation += 1;
        shared.generation
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
        lock(&self.shared).generation += 1;
    }
}

fn lock<T>(shared: &Mutex<Shared<T>>) -> std::sync::MutexGuard<'_, Shared<T>> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUIET: Duration = Duration::from_millis(300);

    #[tokio::test(start_paused = true)]
    async fn publishes_value_after_quiet_period() {
        let mut debouncer = Debouncer::new(String::new(), QUIET);
        let updates = debouncer.subscribe();

        debouncer.push("alice".to_string());
        tokio::time::sleep(Duration::from_millis(299)).await;
        assert_eq!(debouncer.settled(), "", "value should not settle early");

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(debouncer.settled(), "alice");
        assert!(updates.has_changed().expect("sender should be alive"));
    }

    #[tokio::test(start_paused = true)]
    async fn change_before_quiet_period_restarts_timer() {
        let mut debouncer = Debouncer::new(String::new(), QUIET);
        let mut updates = debouncer.subscribe();

        debouncer.push("a".to_string());
        tokio::time::sleep(Duration::from_millis(200)).await;
        debouncer.push("ab".to_string());
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(debouncer.settled(), "", "first value should be discarded");
        assert!(debouncer.is_pending());

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(debouncer.settled(), "ab");

        updates.borrow_and_update();
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(
            !updates.has_changed().expect("sender should be alive"),
            "only the settled value should be published"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn unchanged_value_does_not_notify() {
        let mut debouncer = Debouncer::new("same".to_string(), QUIET);
        let updates = debouncer.subscribe();

        debouncer.push("same".to_string());
        tokio::time::sleep(Duration::from_millis(400)).await;

        assert!(!updates.has_changed().expect("sender should be alive"));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_discards_pending_value() {
        let mut debouncer = Debouncer::new(String::new(), QUIET);

        debouncer.push("bob".to_string());
        tokio::time::sleep(Duration::from_millis(100)).await;
        debouncer.cancel();
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert_eq!(debouncer.settled(), "");
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn drop_prevents_late_update() {
        let mut debouncer = Debouncer::new(String::new(), QUIET);
        let updates = debouncer.subscribe();

        debouncer.push("carol".to_string());
        tokio::time::sleep(Duration::from_millis(100)).await;
        drop(debouncer);
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert_eq!(*updates.borrow(), "", "no update may fire after teardown");
    }
}
