//! Outbound user notifications.
//!
//! [`LogNotifier`] stands in for a real mailer in the binary; it records the
//! message through `tracing` and always succeeds. [`InMemoryNotifier`]
//! captures messages for tests and can be told to fail.
//!
//! Features send notifications after their change is stored and never wait
//! on them: delivery runs on its own task and a failure is only logged.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;

use super::user::User;

/// A message addressed to a single recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub subject: String,
    pub body: String,
}

impl Notification {
    pub fn new(subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
        }
    }

    /// Welcome message sent after a user is created.
    pub fn welcome(user: &User) -> Self {
        let greeting = match user.name() {
            Some(name) => format!("Hello {name},"),
            None => "Hello,".to_string(),
        };
        Self::new(
            "Welcome!",
            format!("{greeting}\n\nYour account for {} is ready.", user.email()),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotifyError {
    #[error("delivery to {target} failed: {reason}")]
    Delivery { target: String, reason: String },
    #[error("notifier lock poisoned")]
    LockPoisoned,
}

/// Delivery capability for notifications.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, target: &str, notification: &Notification) -> Result<(), NotifyError>;
}

/// Writes notifications to the log instead of sending them.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, target: &str, notification: &Notification) -> Result<(), NotifyError> {
        tracing::info!(
            target_address = target,
            subject = %notification.subject,
            "notification sent"
        );
        Ok(())
    }
}

/// Records every notification it is asked to send.
///
/// Delivery may happen on a background task, so tests wait for it with
/// [`InMemoryNotifier::wait_for_attempts`] before reading what was sent.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNotifier {
    sent: Arc<Mutex<Vec<(String, Notification)>>>,
    attempts: Arc<AtomicUsize>,
    attempted: Arc<Notify>,
    fail: bool,
}

impl InMemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// A notifier whose every delivery fails. Nothing is recorded.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// `(target, notification)` pairs in send order.
    pub fn sent(&self) -> Result<Vec<(String, Notification)>, NotifyError> {
        let sent = self.sent.lock().map_err(|_| NotifyError::LockPoisoned)?;
        Ok(sent.clone())
    }

    pub fn count(&self) -> Result<usize, NotifyError> {
        let sent = self.sent.lock().map_err(|_| NotifyError::LockPoisoned)?;
        Ok(sent.len())
    }

    /// Deliveries attempted so far, failed ones included.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    /// Wait until at least `n` deliveries were attempted or `within` elapses,
    /// then return the attempt count.
    pub async fn wait_for_attempts(&self, n: usize, within: Duration) -> usize {
        let deadline = tokio::time::Instant::now() + within;
        loop {
            let attempted = self.attempted.notified();
            let attempts = self.attempts();
            if attempts >= n {
                return attempts;
            }
            if tokio::time::timeout_at(deadline, attempted).await.is_err() {
                return self.attempts();
            }
        }
    }

    fn record(&self, target: &str, notification: &Notification) -> Result<(), NotifyError> {
        if self.fail {
            return Err(NotifyError::Delivery {
                target: target.to_string(),
                reason: "notifier configured to fail".to_string(),
            });
        }
        self.sent
            .lock()
            .map_err(|_| NotifyError::LockPoisoned)?
            .push((target.to_string(), notification.clone()));
        Ok(())
    }
}

#[async_trait]
impl Notifier for InMemoryNotifier {
    async fn notify(&self, target: &str, notification: &Notification) -> Result<(), NotifyError> {
        let result = self.record(target, notification);
        self.attempts.fetch_add(1, Ordering::SeqCst);
        self.attempted.notify_waiters();
        result
    }
}
