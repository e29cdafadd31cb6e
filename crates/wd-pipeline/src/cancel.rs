// SPDX-License-Identifier: MIT OR Apache-2.0
//! Cooperative cancellation of in-flight `(scanner, target)` tasks: an
//! interrupt at the pipeline level aborts pending tasks.
//!
//! Tasks never check this token blindly in a hot loop; they race it against
//! the scan future with `tokio::select!` so a cancellation lands as soon as
//! the current await point yields.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

/// Why a run was cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancellationReason {
    /// An operator interrupt (Ctrl-C, signal).
    UserRequested,
    /// The run exceeded its configured wall-clock ceiling.
    Timeout,
}

impl CancellationReason {
    /// Human-readable description, used in the interrupted-run summary.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::UserRequested => "cancelled by operator interrupt",
            Self::Timeout => "cancelled after exceeding the run's timeout",
        }
    }
}

struct TokenInner {
    cancelled: AtomicBool,
    notify: Notify,
}

/// A cloneable handle shared by every in-flight `(scanner, target)` task.
/// Cancelling any clone cancels all of them.
#[derive(Clone)]
pub struct CancellationToken(Arc<TokenInner>);

impl CancellationToken {
    /// A fresh, not-yet-cancelled token.
    #[must_use]
    pub fn new() -> Self {
        Self(Arc::new(TokenInner {
            cancelled: AtomicBool::new(false),
            notify: Notify::new(),
        }))
    }

    /// Mark this token (and every clone of it) cancelled.
    pub fn cancel(&self) {
        self.0.cancelled.store(true, Ordering::SeqCst);
        self.0.notify.notify_waiters();
    }

    /// `true` once [`cancel`](Self::cancel) has been called.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.cancelled.load(Ordering::SeqCst)
    }

    /// Resolves once the token is cancelled. Intended for use inside a
    /// `tokio::select!` race against the work being guarded.
    pub async fn cancelled(&self) {
        if self.is_cancelled() {
            return;
        }
        self.0.notify.notified().await;
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}
