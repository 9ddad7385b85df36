//! Transient, self-expiring user notifications
//!
//! Time is passed in as milliseconds since an arbitrary epoch so the queue
//! works the same under a browser clock, the system clock, or a test clock.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default display duration
pub const DEFAULT_TTL_MS: u64 = 4_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NotificationId(u64);

impl NotificationId {
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
            NotificationKind::Info => "info",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub text: String,
    pub expires_at_ms: u64,
}

/// Oldest-first queue of notifications.
///
/// Ids come from a per-queue counter and are never reused, so a late expiry
/// can never hit a different notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationQueue {
    items: Vec<Notification>,
    next_id: u64,
    ttl_ms: u64,
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new(DEFAULT_TTL_MS)
    }
}

impl NotificationQueue {
    pub fn new(ttl_ms: u64) -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
            ttl_ms,
        }
    }

    pub fn ttl_ms(&self) -> u64 {
        self.ttl_ms
    }

    pub fn push(&mut self, kind: NotificationKind, text: impl Into<String>, now_ms: u64) -> NotificationId {
        let id = NotificationId(self.next_id);
        self.next_id += 1;
        self.items.push(Notification {
            id,
            kind,
            text: text.into(),
            expires_at_ms: now_ms.saturating_add(self.ttl_ms),
        });
        id
    }

    /// Dismisses `id`. Removing an absent id is a no-op.
    pub fn remove(&mut self, id: NotificationId) -> bool {
        let before = self.items.len();
        self.items.retain(|n| n.id != id);
        self.items.len() != before
    }

    /// Drops every notification whose display time has elapsed and returns their ids
    pub fn expire(&mut self, now_ms: u64) -> Vec<NotificationId> {
        let mut expired = Vec::new();
        self.items.retain(|n| {
            let keep = n.expires_at_ms > now_ms;
            if !keep {
                expired.push(n.id);
            }
            keep
        });
        expired
    }

    /// Earliest pending expiry, if any
    pub fn next_deadline(&self) -> Option<u64> {
        self.items.iter().map(|n| n.expires_at_ms).min()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Empties the queue, returning everything in display order
    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.items)
    }
}
