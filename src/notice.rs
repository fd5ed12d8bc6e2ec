use std::time::{Duration, SystemTime};

use crate::error::HuntError;

pub const DEFAULT_NOTICE_MS: u64 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Error,
    /// Advisory only, e.g. reselecting a found icon.
    Hint,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub message: String,
    pub kind: NoticeKind,
    pub target_related: bool,
    /// Raised because the picture could not be laid out.
    pub layout_related: bool,
    pub raised_at: SystemTime,
}

/// The single user-visible notice slot. A new notice replaces the old one and
/// restarts the dismiss timer.
#[derive(Debug)]
pub struct NoticeBoard {
    current: Option<Notice>,
    ttl: Duration,
}

impl Default for NoticeBoard {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_NOTICE_MS))
    }
}

impl NoticeBoard {
    pub fn new(ttl: Duration) -> Self {
        Self { current: None, ttl }
    }

    pub fn current(&self) -> Option<&Notice> {
        self.current.as_ref()
    }

    pub fn raise(&mut self, err: &HuntError, now: SystemTime) {
        let kind = match err {
            HuntError::AlreadyFound(_) | HuntError::UserInput(_) => NoticeKind::Hint,
            _ => NoticeKind::Error,
        };
        tracing::warn!(error = %err, "notice raised");
        self.current = Some(Notice {
            message: err.to_string(),
            kind,
            target_related: err.is_target_related(),
            layout_related: matches!(err, HuntError::Configuration(_)),
            raised_at: now,
        });
    }

    /// Drop the notice once it has been visible for the full interval.
    pub fn tick(&mut self, now: SystemTime) {
        let expired = self.current.as_ref().is_some_and(|n| {
            now.duration_since(n.raised_at).unwrap_or_default() >= self.ttl
        });
        if expired {
            self.current = None;
        }
    }

    /// Clear a notice about target selection, e.g. once a valid target is
    /// picked.
    pub fn clear_target_notice(&mut self) {
        if self.current.as_ref().is_some_and(|n| n.target_related) {
            self.current = None;
        }
    }

    /// A fresh layout makes any earlier sizing complaint stale.
    pub fn clear_layout_notice(&mut self) {
        if self.current.as_ref().is_some_and(|n| n.layout_related) {
            self.current = None;
        }
    }
}
