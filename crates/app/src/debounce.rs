//! Cancellable delayed jobs for search-as-you-type.
//!
//! Each submission supersedes the pending one: the old task is aborted and a
//! new one sleeps for the quiet period before running. Every job carries a
//! ticket from a monotonic counter, and a result is only published if its
//! ticket is newer than the last published one, so a slow stale job can
//! never overwrite a fresher result.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

/// A published result and the ticket of the submission that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct Debounced<T> {
    pub ticket: u64,
    pub value: T,
}

type Slot<T> = watch::Sender<Option<Debounced<T>>>;

pub struct Debouncer<T> {
    delay: Duration,
    next_ticket: AtomicU64,
    pending: Mutex<Option<JoinHandle<()>>>,
    published: Arc<Slot<T>>,
}

impl<T: Send + Sync + 'static> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        let (published, _) = watch::channel(None);
        Self {
            delay,
            next_ticket: AtomicU64::new(0),
            pending: Mutex::new(None),
            published: Arc::new(published),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Watch published results
    pub fn subscribe(&self) -> watch::Receiver<Option<Debounced<T>>> {
        self.published.subscribe()
    }

    /// Run `job` once the quiet period passes without another submission.
    ///
    /// Must be called from within a tokio runtime. Returns the job's ticket.
    pub fn submit<F>(&self, job: F) -> u64
    where
        F: FnOnce() -> T + Send + 'static,
    {
        let ticket = self.next_ticket.fetch_add(1, Ordering::SeqCst) + 1;
        let delay = self.delay;
        let published = Arc::clone(&self.published);

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let value = job();
            if publish(&published, ticket, value) {
                debug!(ticket, "Published debounced result");
            }
        });

        if let Some(previous) = self.pending().replace(handle) {
            previous.abort();
        }
        ticket
    }

    /// Abort the pending job, if any
    pub fn cancel(&self) {
        if let Some(previous) = self.pending().take() {
            previous.abort();
        }
    }

    fn pending(&self) -> std::sync::MutexGuard<'_, Option<JoinHandle<()>>> {
        self.pending.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<T: Clone + Send + Sync + 'static> Debouncer<T> {
    /// The most recently published result
    pub fn latest(&self) -> Option<Debounced<T>> {
        self.published.borrow().clone()
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        let pending = match self.pending.get_mut() {
            Ok(pending) => pending,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(handle) = pending.take() {
            handle.abort();
        }
    }
}

/// Store `value` unless a result with an equal or newer ticket is already out
fn publish<T>(slot: &Slot<T>, ticket: u64, value: T) -> bool {
    slot.send_if_modified(|current| {
        if current.as_ref().is_some_and(|c| c.ticket >= ticket) {
            return false;
        }
        *current = Some(Debounced { ticket, value });
        true
    })
}
