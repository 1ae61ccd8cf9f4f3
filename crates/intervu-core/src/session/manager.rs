//! Session manager.
//!
//! Owns the single active authentication state, authenticates against the
//! user directory, and keeps the in-memory state and the durable record
//! moving together.

use super::store::{SessionStore, StoredSession};
use crate::error::{IntervuError, Result};
use crate::user::{UserDirectory, UserRole, UserSession};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use uuid::Uuid;

/// The three resolvable authentication states.
///
/// `Resolving` exists only between construction and the first
/// [`SessionManager::bootstrap`] call; callers seeing it should show a
/// neutral waiting indicator and decide nothing else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    /// Startup rehydration has not completed yet.
    Resolving,
    /// No active session.
    Unauthenticated,
    /// A single active session exists.
    Authenticated(UserSession),
}

impl AuthState {
    /// Returns true once bootstrap has resolved the state either way.
    pub fn is_resolved(&self) -> bool {
        !matches!(self, Self::Resolving)
    }

    /// Returns true if a session is active.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// Returns the active session, if any.
    pub fn session(&self) -> Option<&UserSession> {
        match self {
            Self::Authenticated(session) => Some(session),
            _ => None,
        }
    }
}

/// Tunable session manager behavior.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Artificial delay standing in for network latency on login/register.
    /// A real backend call replaces the delay but keeps the suspend/resume
    /// contract.
    pub simulated_latency: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            simulated_latency: Duration::from_millis(500),
        }
    }
}

/// Manages the client session lifecycle.
///
/// `SessionManager` is responsible for:
/// - Rehydrating the persisted session once at startup
/// - Authenticating logins against the user directory
/// - Registering new users
/// - Destroying the session on logout
///
/// It is the only authorized mutator of the active session. Every
/// successful login/register/logout updates the in-memory state and the
/// durable record together; the only divergence path is bootstrap's
/// intentional self-heal of a corrupt record.
///
/// A second login/register issued while one is in flight is a documented
/// race: the last resolution to complete wins. No cancellation token is
/// provided for in-flight calls.
pub struct SessionManager {
    state: RwLock<AuthState>,
    store: Arc<dyn SessionStore>,
    directory: Arc<dyn UserDirectory>,
    config: SessionConfig,
}

impl SessionManager {
    /// Creates a new `SessionManager` in the `Resolving` state.
    ///
    /// # Arguments
    ///
    /// * `store` - Durable backend for the single session record
    /// * `directory` - Read-only account directory for authentication
    /// * `config` - Latency simulation settings
    pub fn new(
        store: Arc<dyn SessionStore>,
        directory: Arc<dyn UserDirectory>,
        config: SessionConfig,
    ) -> Self {
        Self {
            state: RwLock::new(AuthState::Resolving),
            store,
            directory,
            config,
        }
    }

    /// Rehydrates the persisted session at startup.
    ///
    /// - Valid record: transitions to `Authenticated`.
    /// - Missing record: transitions to `Unauthenticated`.
    /// - Unparsable record: deletes it from the store and transitions to
    ///   `Unauthenticated`. The corruption is never surfaced as an error.
    /// - Unreadable store (IO or access failure): transitions to
    ///   `Unauthenticated` without deleting anything; the record may still
    ///   be valid and must survive a transient failure.
    ///
    /// Calling bootstrap again after the state has resolved is a no-op
    /// that returns the current state, so the self-heal is idempotent.
    pub async fn bootstrap(&self) -> AuthState {
        {
            let state = self.state.read().await;
            if state.is_resolved() {
                return state.clone();
            }
        }

        let resolved = match self.store.load().await {
            Ok(Some(record)) => {
                tracing::debug!(user_id = %record.session.id, "restored persisted session");
                AuthState::Authenticated(record.session)
            }
            Ok(None) => AuthState::Unauthenticated,
            Err(err) if err.is_serialization() => {
                tracing::warn!("discarding corrupt session record: {}", err);
                if let Err(clear_err) = self.store.clear().await {
                    tracing::warn!("failed to remove corrupt session record: {}", clear_err);
                }
                AuthState::Unauthenticated
            }
            Err(err) => {
                // Not a corrupt record: the store itself failed. Leave the
                // record in place for the next startup.
                tracing::warn!("session store unavailable: {}", err);
                AuthState::Unauthenticated
            }
        };

        let mut state = self.state.write().await;
        // A concurrent bootstrap may have resolved while the store was read.
        if !state.is_resolved() {
            *state = resolved;
        }
        state.clone()
    }

    /// Authenticates against the directory and activates a session.
    ///
    /// Suspends for the configured simulated latency, then queries the
    /// directory for an exact (email, secret) match.
    ///
    /// # Errors
    ///
    /// Returns [`IntervuError::InvalidCredentials`] when no account
    /// matches; session state and store are left untouched.
    pub async fn login(&self, email: &str, secret: &str) -> Result<UserSession> {
        tokio::time::sleep(self.config.simulated_latency).await;

        let account = self
            .directory
            .find_by_credentials(email, secret)
            .await?
            .ok_or(IntervuError::InvalidCredentials)?;

        let session = account.strip();
        self.activate(session.clone()).await?;
        tracing::debug!(user_id = %session.id, "login succeeded");
        Ok(session)
    }

    /// Registers a new user and activates a session for them.
    ///
    /// The new user gets a freshly generated unique id and the standard
    /// role. The directory itself is read-only from this core and is not
    /// mutated.
    ///
    /// # Errors
    ///
    /// Returns [`IntervuError::EmailTaken`] when the directory already
    /// contains the email; nothing is mutated in that case.
    pub async fn register(
        &self,
        display_name: &str,
        email: &str,
        _secret: &str,
    ) -> Result<UserSession> {
        tokio::time::sleep(self.config.simulated_latency).await;

        if self.directory.exists_by_email(email).await? {
            return Err(IntervuError::email_taken(email));
        }

        let session = UserSession {
            id: Uuid::new_v4().to_string(),
            display_name: display_name.to_string(),
            email: email.to_string(),
            role: UserRole::Standard,
        };
        self.activate(session.clone()).await?;
        tracing::debug!(user_id = %session.id, "registered new user");
        Ok(session)
    }

    /// Destroys the active session.
    ///
    /// Deletes the stored record and transitions to `Unauthenticated`.
    pub async fn logout(&self) -> Result<()> {
        self.store.clear().await?;
        *self.state.write().await = AuthState::Unauthenticated;
        tracing::debug!("logged out");
        Ok(())
    }

    /// Returns a snapshot of the current authentication state.
    pub async fn auth_state(&self) -> AuthState {
        self.state.read().await.clone()
    }

    /// Returns the active session, if any.
    pub async fn current_session(&self) -> Option<UserSession> {
        self.state.read().await.session().cloned()
    }

    /// Persists the record first, then updates memory, so a storage
    /// failure leaves both sides unchanged.
    async fn activate(&self, session: UserSession) -> Result<()> {
        self.store.save(&StoredSession::new(session.clone())).await?;
        *self.state.write().await = AuthState::Authenticated(session);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::UserAccount;
    use async_trait::async_trait;
    use std::sync::Mutex;

    // Mock SessionStore for testing. `corrupt` makes load() fail the way a
    // store with an unparsable record does, until clear() is called;
    // `io_failure` fails the next load() the way an unreadable file does.
    struct MockSessionStore {
        record: Mutex<Option<StoredSession>>,
        corrupt: Mutex<bool>,
        io_failure: Mutex<bool>,
        save_count: Mutex<usize>,
    }

    impl MockSessionStore {
        fn new() -> Self {
            Self {
                record: Mutex::new(None),
                corrupt: Mutex::new(false),
                io_failure: Mutex::new(false),
                save_count: Mutex::new(0),
            }
        }

        fn corrupted() -> Self {
            let store = Self::new();
            *store.corrupt.lock().unwrap() = true;
            store
        }

        fn fail_next_load_with_io(&self) {
            *self.io_failure.lock().unwrap() = true;
        }

        fn saves(&self) -> usize {
            *self.save_count.lock().unwrap()
        }
    }

    #[async_trait]
    impl SessionStore for MockSessionStore {
        async fn load(&self) -> Result<Option<StoredSession>> {
            if std::mem::take(&mut *self.io_failure.lock().unwrap()) {
                return Err(IntervuError::io("permission denied"));
            }
            if *self.corrupt.lock().unwrap() {
                return Err(IntervuError::Serialization {
                    format: "JSON".to_string(),
                    message: "unexpected token".to_string(),
                });
            }
            Ok(self.record.lock().unwrap().clone())
        }

        async fn save(&self, record: &StoredSession) -> Result<()> {
            *self.record.lock().unwrap() = Some(record.clone());
            *self.save_count.lock().unwrap() += 1;
            Ok(())
        }

        async fn clear(&self) -> Result<()> {
            *self.record.lock().unwrap() = None;
            *self.corrupt.lock().unwrap() = false;
            Ok(())
        }
    }

    struct MockUserDirectory {
        accounts: Vec<UserAccount>,
    }

    impl MockUserDirectory {
        fn with_demo_accounts() -> Self {
            Self {
                accounts: vec![
                    UserAccount {
                        id: "user-1".to_string(),
                        display_name: "Alex Johnson".to_string(),
                        email: "alex@example.com".to_string(),
                        secret: "password123".to_string(),
                        role: UserRole::Standard,
                    },
                    UserAccount {
                        id: "admin-1".to_string(),
                        display_name: "Morgan Lee".to_string(),
                        email: "admin@example.com".to_string(),
                        secret: "admin123".to_string(),
                        role: UserRole::Admin,
                    },
                ],
            }
        }
    }

    #[async_trait]
    impl UserDirectory for MockUserDirectory {
        async fn find_by_credentials(
            &self,
            email: &str,
            secret: &str,
        ) -> Result<Option<UserAccount>> {
            Ok(self
                .accounts
                .iter()
                .find(|a| a.email == email && a.secret == secret)
                .cloned())
        }

        async fn exists_by_email(&self, email: &str) -> Result<bool> {
            Ok(self.accounts.iter().any(|a| a.email == email))
        }
    }

    fn manager_with(store: Arc<MockSessionStore>) -> SessionManager {
        SessionManager::new(
            store,
            Arc::new(MockUserDirectory::with_demo_accounts()),
            SessionConfig {
                simulated_latency: Duration::from_millis(1),
            },
        )
    }

    #[tokio::test]
    async fn test_bootstrap_without_record_is_unauthenticated() {
        let manager = manager_with(Arc::new(MockSessionStore::new()));
        assert!(!manager.auth_state().await.is_resolved());

        let state = manager.bootstrap().await;
        assert_eq!(state, AuthState::Unauthenticated);
    }

    #[tokio::test]
    async fn test_bootstrap_restores_persisted_session() {
        let store = Arc::new(MockSessionStore::new());
        let session = UserSession {
            id: "user-1".to_string(),
            display_name: "Alex Johnson".to_string(),
            email: "alex@example.com".to_string(),
            role: UserRole::Standard,
        };
        store.save(&StoredSession::new(session.clone())).await.unwrap();

        let manager = manager_with(store);
        let state = manager.bootstrap().await;
        assert_eq!(state, AuthState::Authenticated(session));
    }

    #[tokio::test]
    async fn test_bootstrap_corrupt_record_self_heals_idempotently() {
        let store = Arc::new(MockSessionStore::corrupted());
        let manager = manager_with(store.clone());

        let state = manager.bootstrap().await;
        assert_eq!(state, AuthState::Unauthenticated);
        // The corrupt record was removed from the store.
        assert!(store.load().await.unwrap().is_none());

        // A second bootstrap is a no-op with the same result.
        let state = manager.bootstrap().await;
        assert_eq!(state, AuthState::Unauthenticated);
    }

    #[tokio::test]
    async fn test_bootstrap_io_error_keeps_record_and_resolves_unauthenticated() {
        let store = Arc::new(MockSessionStore::new());
        let session = UserSession {
            id: "user-1".to_string(),
            display_name: "Alex Johnson".to_string(),
            email: "alex@example.com".to_string(),
            role: UserRole::Standard,
        };
        store.save(&StoredSession::new(session)).await.unwrap();
        store.fail_next_load_with_io();

        let manager = manager_with(store.clone());
        let state = manager.bootstrap().await;
        assert_eq!(state, AuthState::Unauthenticated);

        // Only corrupt records are deleted; a store failure must leave
        // the valid record for the next startup.
        assert!(store.load().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_login_success_persists_secret_free_session() {
        let store = Arc::new(MockSessionStore::new());
        let manager = manager_with(store.clone());
        manager.bootstrap().await;

        let session = manager.login("alex@example.com", "password123").await.unwrap();
        assert_eq!(session.id, "user-1");
        assert_eq!(session.role, UserRole::Standard);
        assert!(manager.auth_state().await.is_authenticated());

        let record = store.load().await.unwrap().expect("record persisted");
        assert_eq!(record.session, session);
        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("password123"));
    }

    #[tokio::test]
    async fn test_login_failure_leaves_state_unchanged() {
        let store = Arc::new(MockSessionStore::new());
        let manager = manager_with(store.clone());
        manager.bootstrap().await;

        let err = manager.login("alex@example.com", "wrong").await.unwrap_err();
        assert!(err.is_invalid_credentials());
        assert_eq!(manager.auth_state().await, AuthState::Unauthenticated);
        assert_eq!(store.saves(), 0);

        // A failed login must also not disturb an existing session.
        let session = manager.login("alex@example.com", "password123").await.unwrap();
        let err = manager.login("nobody@example.com", "x").await.unwrap_err();
        assert!(err.is_invalid_credentials());
        assert_eq!(manager.current_session().await, Some(session));
    }

    #[tokio::test]
    async fn test_register_taken_email_mutates_nothing() {
        let store = Arc::new(MockSessionStore::new());
        let manager = manager_with(store.clone());
        manager.bootstrap().await;

        let err = manager
            .register("Someone", "alex@example.com", "pw")
            .await
            .unwrap_err();
        assert!(err.is_email_taken());
        assert_eq!(manager.auth_state().await, AuthState::Unauthenticated);
        assert_eq!(store.saves(), 0);
    }

    #[tokio::test]
    async fn test_register_creates_standard_role_with_fresh_id() {
        let store = Arc::new(MockSessionStore::new());
        let manager = manager_with(store.clone());
        manager.bootstrap().await;

        let session = manager
            .register("New User", "new@example.com", "pw")
            .await
            .unwrap();
        assert_eq!(session.role, UserRole::Standard);
        assert!(Uuid::parse_str(&session.id).is_ok());
        assert!(manager.auth_state().await.is_authenticated());
        assert!(store.load().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_logout_clears_store_and_state() {
        let store = Arc::new(MockSessionStore::new());
        let manager = manager_with(store.clone());
        manager.bootstrap().await;
        manager.login("alex@example.com", "password123").await.unwrap();

        manager.logout().await.unwrap();
        assert_eq!(manager.auth_state().await, AuthState::Unauthenticated);
        assert!(store.load().await.unwrap().is_none());
    }
}
