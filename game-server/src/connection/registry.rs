use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::fmt;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::connection::handlers::SessionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Tracks which live connection currently plays as each username.
///
/// A username can be held by one connection at a time, so two sessions
/// never race on the same game collection.
#[derive(Debug, Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<DashMap<String, ConnectionId>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `user_id` for `connection_id`. The claim lasts until the
    /// returned guard is dropped.
    pub fn claim(
        &self,
        user_id: &str,
        connection_id: ConnectionId,
    ) -> Result<SessionClaim, SessionError> {
        match self.sessions.entry(user_id.to_string()) {
            Entry::Occupied(entry) if *entry.get() != connection_id => {
                return Err(SessionError::UserAlreadyConnected {
                    user_id: user_id.to_string(),
                });
            }
            Entry::Occupied(_) => {}
            Entry::Vacant(entry) => {
                entry.insert(connection_id);
            }
        }

        Ok(SessionClaim {
            sessions: self.sessions.clone(),
            user_id: user_id.to_string(),
            connection_id,
        })
    }

    pub fn is_connected(&self, user_id: &str) -> bool {
        self.sessions.contains_key(user_id)
    }

    pub fn connection_for(&self, user_id: &str) -> Option<ConnectionId> {
        self.sessions.get(user_id).map(|entry| *entry.value())
    }

    pub fn active_sessions(&self) -> usize {
        self.sessions.len()
    }
}

/// RAII guard releasing a username when the owning session ends.
#[derive(Debug)]
pub struct SessionClaim {
    sessions: Arc<DashMap<String, ConnectionId>>,
    user_id: String,
    connection_id: ConnectionId,
}

impl SessionClaim {
    pub fn user_id(&self) -> &str {
        &self.user_id
    }
}

impl Drop for SessionClaim {
    fn drop(&mut self) {
        let released = self
            .sessions
            .remove_if(&self.user_id, |_, holder| *holder == self.connection_id);

        if released.is_some() {
            debug!(
                "Released user {} held by connection {}",
                self.user_id, self.connection_id
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_and_release() {
        let registry = SessionRegistry::new();
        let conn = ConnectionId::new();

        let claim = registry.claim("alice", conn).unwrap();
        assert_eq!(claim.user_id(), "alice");
        assert!(registry.is_connected("alice"));
        assert_eq!(registry.connection_for("alice"), Some(conn));

        drop(claim);
        assert!(!registry.is_connected("alice"));
        assert_eq!(registry.active_sessions(), 0);
    }

    #[test]
    fn test_second_connection_is_rejected() {
        let registry = SessionRegistry::new();
        let _claim = registry.claim("alice", ConnectionId::new()).unwrap();

        let err = registry.claim("alice", ConnectionId::new()).unwrap_err();
        assert!(matches!(err, SessionError::UserAlreadyConnected { .. }));
    }

    #[test]
    fn test_name_is_free_again_after_release() {
        let registry = SessionRegistry::new();
        drop(registry.claim("alice", ConnectionId::new()).unwrap());

        assert!(registry.claim("alice", ConnectionId::new()).is_ok());
    }
}
