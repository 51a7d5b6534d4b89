//! Shared, lock-protected revocation set for bearer tokens.
//!
//! Keyed by the raw token string; an entry lives until the token's natural
//! expiry. The list is injected into the token verifier rather than held as
//! process-global state, so tests and multi-tenant wiring can scope it.

use chrono::{DateTime, Utc};
use dashmap::DashMap;

/// Expiring set of revoked token strings.
///
/// `DashMap` shards its locks, so concurrent insert/lookup from request
/// handlers is safe without an outer mutex. Expired entries are purged
/// opportunistically on lookup and can be swept in bulk via
/// [`RevocationList::purge_expired`].
#[derive(Debug, Default)]
pub struct RevocationList {
    entries: DashMap<String, DateTime<Utc>>,
}

impl RevocationList {
    /// Creates an empty revocation list.
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Revokes a token until the given expiry.
    ///
    /// Revoking an already-revoked token extends the entry to the later
    /// expiry, which keeps the operation idempotent.
    pub fn revoke(&self, token: &str, expires_at: DateTime<Utc>) {
        self.entries
            .entry(token.to_string())
            .and_modify(|e| {
                if *e < expires_at {
                    *e = expires_at;
                }
            })
            .or_insert(expires_at);
    }

    /// Checks whether a token is currently revoked.
    ///
    /// Entries past their expiry are dropped on the way out: the token would
    /// fail expiry validation anyway, so the set only needs to cover a
    /// token's natural lifetime.
    pub fn is_revoked(&self, token: &str) -> bool {
        let live = match self.entries.get(token) {
            Some(entry) => *entry.value() > Utc::now(),
            None => return false,
        };
        if !live {
            self.entries.remove(token);
        }
        live
    }

    /// Removes every expired entry. Intended for periodic maintenance.
    pub fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let before = self.entries.len();
        self.entries.retain(|_, expires_at| *expires_at > now);
        before - self.entries.len()
    }

    /// Number of live entries (including not-yet-purged expired ones).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
