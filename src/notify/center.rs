use parking_lot::Mutex;
use std::sync::Arc;

use crate::constants::NOTICE_TTL_MILLIS;

/// Severity of a user-visible notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Info,
}

/// A transient, auto-dismissing notification
#[derive(Debug, Clone)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
    /// Milliseconds until auto-dismiss; frozen while the panel is focused
    pub ttl_remaining_ms: i64,
}

/// Sink through which the gateway and the session container emit
/// notifications without knowing about the UI
pub trait Notifier: Send + Sync {
    fn notify(&self, severity: Severity, message: String);

    fn success(&self, message: &str) {
        self.notify(Severity::Success, message.to_string());
    }

    fn error(&self, message: &str) {
        self.notify(Severity::Error, message.to_string());
    }
}

/// Shared handle to a notification sink
pub type SharedNotifier = Arc<dyn Notifier>;

/// Stack of pending notices, newest appended last.
///
/// The event loop drives expiry by reporting elapsed wall time; while the
/// panel is focused the countdown is frozen (hover-pause analog).
#[derive(Default)]
pub struct NotificationCenter {
    notices: Vec<Notice>,
    paused: bool,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, severity: Severity, message: String) {
        self.notices.push(Notice {
            severity,
            message,
            ttl_remaining_ms: NOTICE_TTL_MILLIS,
        });
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Dismiss the oldest notice (user-initiated)
    pub fn dismiss_oldest(&mut self) {
        if !self.notices.is_empty() {
            self.notices.remove(0);
        }
    }

    /// Advance countdowns and drop expired notices; frozen while paused
    pub fn tick(&mut self, elapsed_ms: i64) {
        if self.paused {
            return;
        }
        for notice in &mut self.notices {
            notice.ttl_remaining_ms -= elapsed_ms;
        }
        self.notices.retain(|n| n.ttl_remaining_ms > 0);
    }
}

/// Cloneable handle shared between the event loop, the gateway, and the
/// session container
#[derive(Clone, Default)]
pub struct NoticeBoard {
    inner: Arc<Mutex<NotificationCenter>>,
}

impl NoticeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run a closure against the underlying center
    pub fn with<R>(&self, f: impl FnOnce(&mut NotificationCenter) -> R) -> R {
        f(&mut self.inner.lock())
    }

    /// Snapshot of the pending notices for rendering
    pub fn snapshot(&self) -> Vec<Notice> {
        self.inner.lock().notices().to_vec()
    }
}

impl Notifier for NoticeBoard {
    fn notify(&self, severity: Severity, message: String) {
        self.inner.lock().push(severity, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_notices_stack_and_expire() {
        let mut center = NotificationCenter::new();
        center.push(Severity::Success, "first".to_string());
        center.push(Severity::Error, "second".to_string());
        assert_eq!(center.notices().len(), 2);

        center.tick(NOTICE_TTL_MILLIS - 1);
        assert_eq!(center.notices().len(), 2);

        center.tick(1);
        assert_eq!(center.notices().len(), 0);
    }

    #[test]
    fn test_pause_freezes_countdown() {
        let mut center = NotificationCenter::new();
        center.push(Severity::Info, "hello".to_string());

        center.set_paused(true);
        center.tick(NOTICE_TTL_MILLIS * 10);
        assert_eq!(center.notices().len(), 1);

        center.set_paused(false);
        center.tick(NOTICE_TTL_MILLIS);
        assert_eq!(center.notices().len(), 0);
    }

    #[test]
    fn test_dismiss_oldest_removes_front() {
        let mut center = NotificationCenter::new();
        center.push(Severity::Info, "old".to_string());
        center.push(Severity::Info, "new".to_string());

        center.dismiss_oldest();
        assert_eq!(center.notices().len(), 1);
        assert_eq!(center.notices()[0].message, "new");
    }

    #[test]
    fn test_board_is_a_notifier() {
        let board = NoticeBoard::new();
        board.error("boom");
        let notices = board.snapshot();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].severity, Severity::Error);
    }
}
