//! Loading flags with scoped cleanup.
//!
//! A [`LoadingFlag`] is raised by [`LoadingFlag::begin`] and lowered when the
//! returned [`LoadingGuard`] drops, so the flag clears on every exit path of
//! an action, early returns and errors included.
//!
//! Flags are shared: overlapping actions may hold the same flag (the global
//! one in particular). The flag counts holders and reads `true` while at
//! least one is alive.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::watch;

/// An observable boolean "operation in progress" flag.
#[derive(Debug, Clone)]
pub struct LoadingFlag {
    inner: Arc<LoadingInner>,
}

#[derive(Debug)]
struct LoadingInner {
    holders: Mutex<usize>,
    tx: watch::Sender<bool>,
    transitions: AtomicUsize,
}

impl LoadingFlag {
    /// Create a lowered flag.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self {
            inner: Arc::new(LoadingInner {
                holders: Mutex::new(0),
                tx,
                transitions: AtomicUsize::new(0),
            }),
        }
    }

    /// Raise the flag until the guard drops.
    #[must_use = "the flag is lowered as soon as the guard is dropped"]
    pub fn begin(&self) -> LoadingGuard {
        let mut holders = self
            .inner
            .holders
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *holders += 1;
        if *holders == 1 {
            self.set(true);
        }
        LoadingGuard {
            flag: self.clone(),
        }
    }

    /// Current value.
    pub fn is_loading(&self) -> bool {
        *self.inner.tx.borrow()
    }

    /// Watch the flag for changes.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.inner.tx.subscribe()
    }

    /// Number of times the flag has flipped (up or down) since creation.
    ///
    /// Even whenever the flag is lowered.
    pub fn transitions(&self) -> usize {
        self.inner.transitions.load(Ordering::SeqCst)
    }

    fn end(&self) {
        let mut holders = self
            .inner
            .holders
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *holders = holders.saturating_sub(1);
        if *holders == 0 {
            self.set(false);
        }
    }

    fn set(&self, value: bool) {
        self.inner.tx.send_replace(value);
        self.inner.transitions.fetch_add(1, Ordering::SeqCst);
    }
}

impl Default for LoadingFlag {
    fn default() -> Self {
        Self::new()
    }
}

/// Keeps a [`LoadingFlag`] raised while alive.
#[derive(Debug)]
pub struct LoadingGuard {
    flag: LoadingFlag,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.flag.end();
    }
}
