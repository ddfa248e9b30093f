//! User-facing notifications
//!
//! The dashboard surfaces every mutation outcome as a toast. The
//! orchestration layer only knows this trait; the UI shell provides the
//! real sink, and tests install a recording one.

/// Notice severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// Sink for user-facing notices
pub trait Notifier: Send + Sync {
    fn notify(&self, level: NoticeLevel, message: &str);
}

/// Default sink: routes notices into the tracing pipeline
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, level: NoticeLevel, message: &str) {
        match level {
            NoticeLevel::Success => tracing::info!(notice = %message, "user notice"),
            NoticeLevel::Error => tracing::warn!(notice = %message, "user notice"),
        }
    }
}
