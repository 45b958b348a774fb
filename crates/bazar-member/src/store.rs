//! In-memory member store with a unique email index.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// A registered member. The password hash never leaves this crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Thread-safe in-memory member store keyed by email.
///
/// The write lock spans the existence check and the insert, so two
/// concurrent registrations of the same email cannot both succeed.
#[derive(Clone)]
pub struct MemberStore {
    members: Arc<RwLock<HashMap<String, Member>>>,
    next_id: Arc<AtomicI64>,
}

impl Default for MemberStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemberStore {
    pub fn new() -> Self {
        Self {
            members: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }

    /// Create a member; returns `None` when the email is already taken.
    pub fn create(&self, email: &str, password_hash: String) -> Option<Member> {
        let mut guard = self.members.write();
        if guard.contains_key(email) {
            return None;
        }
        let member = Member {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            email: email.to_string(),
            password_hash,
            created_at: Utc::now(),
        };
        guard.insert(email.to_string(), member.clone());
        Some(member)
    }

    /// Look up a member by email.
    pub fn find_by_email(&self, email: &str) -> Option<Member> {
        self.members.read().get(email).cloned()
    }

    pub fn len(&self) -> usize {
        self.members.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_assigns_sequential_ids() {
        let store = MemberStore::new();
        let a = store.create("a@example.com", "hash-a".into()).unwrap();
        let b = store.create("b@example.com", "hash-b".into()).unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
    }

    #[test]
    fn duplicate_email_rejected() {
        let store = MemberStore::new();
        assert!(store.create("a@example.com", "hash-1".into()).is_some());
        assert!(store.create("a@example.com", "hash-2".into()).is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn find_by_email_is_exact() {
        let store = MemberStore::new();
        store.create("a@example.com", "hash".into());
        assert!(store.find_by_email("a@example.com").is_some());
        assert!(store.find_by_email("A@example.com").is_none());
        assert!(store.find_by_email("b@example.com").is_none());
    }
}
