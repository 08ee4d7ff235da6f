//! Auth Gate
//!
//! Mock sign-in against fixed demo credentials. The session token and
//! profile go to the persistent store when `remember_me` is set, otherwise
//! to the session store. There is no real security boundary here.

use chrono::Utc;
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::DashboardResult;
use crate::models::auth::{Credentials, LoginOutcome, UserProfile};
use crate::services::kv_store::KeyValueStore;

pub const AUTH_TOKEN_KEY: &str = "authToken";
pub const USER_DATA_KEY: &str = "userData";

pub const DEMO_EMAIL: &str = "admin@agrichain.com";
pub const DEMO_USERNAME: &str = "admin";
const ACCEPTED_PASSWORDS: [&str; 2] = ["password123", "admin123"];

const INVALID_CREDENTIALS: &str = "Invalid email or password";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResetOutcome {
    pub success: bool,
    pub message: String,
}

pub struct AuthGate {
    persistent: Arc<dyn KeyValueStore>,
    session: Arc<dyn KeyValueStore>,
    user: RwLock<Option<UserProfile>>,
}

impl AuthGate {
    /// Build the gate and restore any session left in either store.
    pub fn new(persistent: Arc<dyn KeyValueStore>, session: Arc<dyn KeyValueStore>) -> Self {
        let restored = restore(persistent.as_ref()).or_else(|| restore(session.as_ref()));
        if let Some(user) = &restored {
            info!(user = %user.username, "Restored previous session");
        }

        Self {
            persistent,
            session,
            user: RwLock::new(restored),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.read().is_some()
    }

    pub fn current_user(&self) -> Option<UserProfile> {
        self.user.read().clone()
    }

    /// Check credentials and open a session.
    ///
    /// Wrong credentials are reported in the outcome, not as an error; the
    /// error path is reserved for storage failures.
    pub fn login(&self, credentials: &Credentials) -> DashboardResult<LoginOutcome> {
        let known_account = credentials.email.as_deref() == Some(DEMO_EMAIL)
            || credentials.username.as_deref() == Some(DEMO_USERNAME);
        let known_password = ACCEPTED_PASSWORDS.contains(&credentials.password.as_str());

        if !(known_account && known_password) {
            warn!(
                email = ?credentials.email,
                username = ?credentials.username,
                "Rejected login attempt"
            );
            return Ok(LoginOutcome::failed(INVALID_CREDENTIALS));
        }

        let profile = UserProfile {
            id: 1,
            username: DEMO_USERNAME.to_string(),
            email: credentials
                .email
                .clone()
                .unwrap_or_else(|| DEMO_EMAIL.to_string()),
            name: "Admin User".to_string(),
            role: "administrator".to_string(),
            avatar: None,
            login_time: Utc::now(),
        };

        let store = if credentials.remember_me {
            &self.persistent
        } else {
            &self.session
        };
        self.open_session(store.as_ref(), profile, credentials.remember_me)?;
        Ok(LoginOutcome::ok())
    }

    pub fn logout(&self) -> DashboardResult<()> {
        let previous = self.user.write().take();
        for store in [&self.persistent, &self.session] {
            store.remove(AUTH_TOKEN_KEY)?;
            store.remove(USER_DATA_KEY)?;
        }
        if let Some(user) = previous {
            info!(user = %user.username, "Signed out");
        }
        Ok(())
    }

    pub fn reset_password(&self, email: &str) -> ResetOutcome {
        info!(email, "Password reset requested");
        ResetOutcome {
            success: true,
            message: "Password reset instructions sent to your email".to_string(),
        }
    }

    fn open_session(&self, store: &dyn KeyValueStore, profile: UserProfile, remembered: bool) -> DashboardResult<()> {
        let token = format!("mock_jwt_token_{}", Utc::now().timestamp_millis());
        store.set(AUTH_TOKEN_KEY, &token)?;
        store.set(USER_DATA_KEY, &serde_json::to_string(&profile)?)?;

        info!(user = %profile.username, remembered, "Signed in");
        *self.user.write() = Some(profile);
        Ok(())
    }
}

fn restore(store: &dyn KeyValueStore) -> Option<UserProfile> {
    store.get(AUTH_TOKEN_KEY)?;
    let raw = store.get(USER_DATA_KEY)?;
    match serde_json::from_str(&raw) {
        Ok(profile) => Some(profile),
        Err(e) => {
            warn!(error = %e, "Discarding unreadable stored profile");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::kv_store::MemoryKvStore;

    fn stores() -> (Arc<MemoryKvStore>, Arc<MemoryKvStore>) {
        (Arc::new(MemoryKvStore::new()), Arc::new(MemoryKvStore::new()))
    }

    fn gate(persistent: &Arc<MemoryKvStore>, session: &Arc<MemoryKvStore>) -> AuthGate {
        AuthGate::new(persistent.clone(), session.clone())
    }

    fn credentials(email: &str, password: &str, remember_me: bool) -> Credentials {
        Credentials {
            email: Some(email.to_string()),
            username: None,
            password: password.to_string(),
            remember_me,
        }
    }

    #[test]
    fn test_demo_credentials_accepted() {
        let (persistent, session) = stores();
        let gate = gate(&persistent, &session);
        assert!(!gate.is_authenticated());

        let outcome = gate.login(&credentials(DEMO_EMAIL, "password123", false)).unwrap();
        assert!(outcome.success);
        assert!(gate.is_authenticated());
        assert_eq!(gate.current_user().unwrap().role, "administrator");
    }

    #[test]
    fn test_username_login() {
        let (persistent, session) = stores();
        let gate = gate(&persistent, &session);
        let creds = Credentials {
            email: None,
            username: Some("admin".to_string()),
            password: "admin123".to_string(),
            remember_me: false,
        };
        assert!(gate.login(&creds).unwrap().success);
        assert_eq!(gate.current_user().unwrap().email, DEMO_EMAIL);
    }

    #[test]
    fn test_wrong_password_rejected() {
        let (persistent, session) = stores();
        let gate = gate(&persistent, &session);
        let outcome = gate.login(&credentials(DEMO_EMAIL, "hunter22", true)).unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.error.as_deref(), Some("Invalid email or password"));
        assert!(!gate.is_authenticated());
        assert!(persistent.get(AUTH_TOKEN_KEY).is_none());
    }

    #[test]
    fn test_remember_me_selects_store() {
        let (persistent, session) = stores();
        let gate = gate(&persistent, &session);

        gate.login(&credentials(DEMO_EMAIL, "password123", false)).unwrap();
        assert!(session.get(AUTH_TOKEN_KEY).unwrap().starts_with("mock_jwt_token_"));
        assert!(persistent.get(AUTH_TOKEN_KEY).is_none());

        gate.logout().unwrap();
        gate.login(&credentials(DEMO_EMAIL, "password123", true)).unwrap();
        assert!(persistent.get(AUTH_TOKEN_KEY).is_some());
        assert!(session.get(AUTH_TOKEN_KEY).is_none());
    }

    #[test]
    fn test_session_restored_on_startup() {
        let (persistent, session) = stores();
        gate(&persistent, &session)
            .login(&credentials(DEMO_EMAIL, "password123", true))
            .unwrap();

        let restarted = gate(&persistent, &session);
        assert!(restarted.is_authenticated());
        assert_eq!(restarted.current_user().unwrap().username, "admin");
    }

    #[test]
    fn test_logout_clears_both_stores() {
        let (persistent, session) = stores();
        let gate = gate(&persistent, &session);
        gate.login(&credentials(DEMO_EMAIL, "password123", true)).unwrap();
        gate.logout().unwrap();

        assert!(!gate.is_authenticated());
        for store in [&persistent, &session] {
            assert!(store.get(AUTH_TOKEN_KEY).is_none());
            assert!(store.get(USER_DATA_KEY).is_none());
        }
    }
}
