//! Entry Module
//!
//! Defines the stored value unit: a string or list payload plus an absolute
//! expiry.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

// == Entry Kind ==
/// Which payload an entry carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    String,
    List,
}

// == Entry Value ==
/// Payload of an entry. The variant fixes the kind; the kind of a stored
/// entry only changes by replacing the whole entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryValue {
    String(String),
    /// Head of the list is index 0
    List(Vec<String>),
}

// == Entry ==
/// A single stored entry with its expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// The stored payload
    pub value: EntryValue,
    /// Expiration timestamp (Unix milliseconds), None = never expires
    pub expires_at: Option<u64>,
}

impl Entry {
    // == Constructors ==
    /// Creates a string entry that expires `ttl` from now.
    pub fn string(value: impl Into<String>, ttl: Duration) -> Self {
        Self {
            value: EntryValue::String(value.into()),
            expires_at: Some(expiry_after(ttl)),
        }
    }

    /// Creates a list entry that expires `ttl` from now, keeping the order
    /// of `items`.
    pub fn list<I, S>(items: I, ttl: Duration) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            value: EntryValue::List(items.into_iter().map(Into::into).collect()),
            expires_at: Some(expiry_after(ttl)),
        }
    }

    /// Creates an entry that never expires.
    ///
    /// The service always sets a TTL; this is for callers writing to an
    /// [`EntryRepository`](crate::store::EntryRepository) directly. Stores
    /// and eviction skip entries without an expiry.
    pub fn persistent(value: EntryValue) -> Self {
        Self {
            value,
            expires_at: None,
        }
    }

    pub fn kind(&self) -> EntryKind {
        match self.value {
            EntryValue::String(_) => EntryKind::String,
            EntryValue::List(_) => EntryKind::List,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// Expiration is inclusive: an entry is expired once the current time is
    /// greater than or equal to its expiry.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(current_timestamp_ms())
    }

    /// Checks expiry against a given instant (Unix milliseconds).
    pub fn is_expired_at(&self, now_ms: u64) -> bool {
        match self.expires_at {
            Some(expires) => now_ms >= expires,
            None => false,
        }
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn expiry_after(ttl: Duration) -> u64 {
    let ttl_ms = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX);
    current_timestamp_ms().saturating_add(ttl_ms)
}
