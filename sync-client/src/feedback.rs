//! Feedback sink: the user-visible activity log and transient notifications.
//!
//! Controllers report outcomes here. Log entries are timestamped with local
//! wall-clock time, kept in a bounded in-memory log and mirrored to `tracing`.
//! Notifications are fire-and-forget: they go out on a broadcast channel and
//! are dropped when nobody is listening.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Local};
use tokio::sync::broadcast;
use tokio::time::Instant;
use tracing::{error, info, warn};

/// Default number of log entries kept.
pub const DEFAULT_LOG_CAPACITY: usize = 500;

/// Default time a notification stays on screen.
pub const DEFAULT_NOTIFICATION_DURATION: Duration = Duration::from_secs(3);

const NOTIFICATION_BUFFER: usize = 64;

/// How an entry should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Neutral progress information.
    Info,
    /// An operation completed.
    Success,
    /// Something worth attention that did not fail.
    Warning,
    /// An operation failed.
    Error,
}

impl Severity {
    /// Lowercase label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of the activity log.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    /// Local time the entry was recorded.
    pub timestamp: DateTime<Local>,
    /// Entry severity.
    pub severity: Severity,
    /// Entry text.
    pub message: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.timestamp.format("%H:%M:%S"), self.message)
    }
}

/// A transient, auto-dismissing message.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    /// Notification text.
    pub message: String,
    /// Notification severity.
    pub severity: Severity,
    /// How long it should stay visible.
    pub duration: Duration,
    /// When it was issued.
    pub issued_at: Instant,
}

impl Notification {
    /// Whether the notification should have been dismissed by `now`.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.issued_at) >= self.duration
    }

    /// Whether the notification should have been dismissed by now.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }
}

/// Collects log entries and publishes notifications.
#[derive(Debug)]
pub struct FeedbackSink {
    entries: Mutex<VecDeque<LogEntry>>,
    capacity: usize,
    notification_duration: Duration,
    notifications: broadcast::Sender<Notification>,
}

impl Default for FeedbackSink {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_CAPACITY, DEFAULT_NOTIFICATION_DURATION)
    }
}

impl FeedbackSink {
    /// Create a sink keeping at most `capacity` entries.
    pub fn new(capacity: usize, notification_duration: Duration) -> Self {
        let (notifications, _) = broadcast::channel(NOTIFICATION_BUFFER);
        Self {
            entries: Mutex::new(VecDeque::new()),
            capacity: capacity.max(1),
            notification_duration,
            notifications,
        }
    }

    /// Append a log entry. The oldest entry is dropped once the log is full.
    pub fn log(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Info | Severity::Success => info!(%severity, "{}", message),
            Severity::Warning => warn!("{}", message),
            Severity::Error => error!("{}", message),
        }

        let entry = LogEntry {
            timestamp: Local::now(),
            severity,
            message: message.to_string(),
        };
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if entries.len() == self.capacity {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    /// Publish a notification. Never blocks.
    pub fn notify(&self, message: &str, severity: Severity) {
        let notification = Notification {
            message: message.to_string(),
            severity,
            duration: self.notification_duration,
            issued_at: Instant::now(),
        };
        // No subscriber means nobody is showing notifications.
        let _ = self.notifications.send(notification);
    }

    /// Log and notify.
    pub fn report(&self, message: &str, severity: Severity) {
        self.log(message, severity);
        self.notify(message, severity);
    }

    /// Receive notifications issued from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.notifications.subscribe()
    }

    /// Snapshot of the log, oldest first.
    pub fn entries(&self) -> Vec<LogEntry> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.iter().cloned().collect()
    }

    /// The most recent entry.
    pub fn last_entry(&self) -> Option<LogEntry> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.back().cloned()
    }

    /// Maximum number of retained entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn entries_render_with_clock_prefix() {
        let entry = LogEntry {
            timestamp: Local.with_ymd_and_hms(2024, 5, 1, 9, 5, 7).unwrap(),
            severity: Severity::Success,
            message: "Server started on port 8080".into(),
        };
        assert_eq!(entry.to_string(), "[09:05:07] Server started on port 8080");
    }

    #[test]
    fn log_keeps_order_and_severity() {
        let sink = FeedbackSink::default();
        sink.log("first", Severity::Info);
        sink.log("second", Severity::Error);

        let entries = sink.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].message, "first");
        assert_eq!(entries[1].severity, Severity::Error);
        assert_eq!(sink.last_entry().unwrap().message, "second");
    }

    #[test]
    fn log_is_capped() {
        let sink = FeedbackSink::new(3, DEFAULT_NOTIFICATION_DURATION);
        for i in 0..5 {
            sink.log(&format!("entry {}", i), Severity::Info);
        }

        let messages: Vec<_> = sink.entries().into_iter().map(|e| e.message).collect();
        assert_eq!(messages, vec!["entry 2", "entry 3", "entry 4"]);
    }

    #[test]
    fn notify_without_subscriber_does_not_log() {
        let sink = FeedbackSink::default();
        sink.notify("nobody listening", Severity::Warning);
        assert!(sink.entries().is_empty());
    }

    #[tokio::test]
    async fn report_logs_and_notifies() {
        let sink = FeedbackSink::default();
        let mut rx = sink.subscribe();

        sink.report("Connected to server", Severity::Success);

        let notification = rx.recv().await.unwrap();
        assert_eq!(notification.message, "Connected to server");
        assert_eq!(notification.severity, Severity::Success);
        assert_eq!(notification.duration, DEFAULT_NOTIFICATION_DURATION);
        assert_eq!(sink.entries().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn notifications_expire_after_their_duration() {
        let sink = FeedbackSink::new(10, Duration::from_secs(3));
        let mut rx = sink.subscribe();
        sink.notify("Hosting stopped", Severity::Info);
        let notification = rx.recv().await.unwrap();

        assert!(!notification.is_expired());
        tokio::time::advance(Duration::from_secs(3)).await;
        assert!(notification.is_expired());
    }
}
