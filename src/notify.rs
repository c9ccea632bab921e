//! Centralized notification center.
//!
//! Handlers used to toast ad-hoc strings at every call site; instead, every
//! operation outcome goes through one [`Notifier`] invoked with an operation
//! label and the `Result` itself, so success and failure paths read the
//! same everywhere. Notices queue in memory for the UI layer to drain and
//! are mirrored to the `log` facade.

use std::fmt::Display;
use std::sync::{Arc, RwLock};

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// One entry in the notification queue.
#[derive(Debug, Clone)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    /// Blocking notices (validation failures) must be acknowledged before
    /// the form can be resubmitted; the rest are transient toasts.
    pub blocking: bool,
}

/// Shared, cloneable notification queue.
#[derive(Clone, Default)]
pub struct Notifier {
    entries: Arc<RwLock<Vec<Notice>>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report the outcome of an operation.
    pub fn report<T, E: Display>(&self, label: &str, result: &Result<T, E>) {
        match result {
            Ok(_) => self.success(format!("{} succeeded", label)),
            Err(err) => self.error(format!("{} failed: {}", label, err)),
        }
    }

    /// Push a success toast.
    pub fn success(&self, message: impl Into<String>) {
        let message = message.into();
        log::info!("{}", message);
        self.push(Notice {
            level: NoticeLevel::Success,
            message,
            blocking: false,
        });
    }

    /// Push an error toast.
    pub fn error(&self, message: impl Into<String>) {
        let message = message.into();
        log::warn!("{}", message);
        self.push(Notice {
            level: NoticeLevel::Error,
            message,
            blocking: false,
        });
    }

    /// Push a blocking validation error.
    pub fn blocking_error(&self, message: impl Into<String>) {
        let message = message.into();
        log::warn!("{}", message);
        self.push(Notice {
            level: NoticeLevel::Error,
            message,
            blocking: true,
        });
    }

    /// Take all queued notices, leaving the queue empty.
    pub fn drain(&self) -> Vec<Notice> {
        match self.entries.write() {
            Ok(mut guard) => std::mem::take(&mut *guard),
            Err(_) => Vec::new(),
        }
    }

    /// Number of queued notices.
    pub fn len(&self) -> usize {
        self.entries.read().map(|guard| guard.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn push(&self, notice: Notice) {
        if let Ok(mut guard) = self.entries.write() {
            guard.push(notice);
        }
    }
}
