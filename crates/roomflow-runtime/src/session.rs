//! Explicit session context.
//!
//! Created once at startup from storage, handed by reference to the HTTP
//! layer, and changed only by [`SessionContext::begin`] (login),
//! [`SessionContext::end`] (logout or 401) and profile updates.

use std::sync::{Arc, RwLock};

use roomflow_types::{AuthSession, UserProfile};

use crate::storage::{
    ACCESS_TOKEN_KEY, KeyValueStore, REFRESH_TOKEN_KEY, SESSION_KEYS, USER_PROFILE_KEY,
};
use crate::Result;

#[derive(Clone)]
pub struct SessionContext {
    store: Arc<dyn KeyValueStore>,
    current: Arc<RwLock<Option<AuthSession>>>,
}

impl SessionContext {
    /// Restore whatever session storage holds. A missing token means
    /// signed out; an unreadable profile is treated as empty.
    pub fn load(store: Arc<dyn KeyValueStore>) -> Result<Self> {
        let access_token = store.get(ACCESS_TOKEN_KEY)?.filter(|t| !t.is_empty());
        let refresh_token = store.get(REFRESH_TOKEN_KEY)?.unwrap_or_default();
        let user_profile = match store.get(USER_PROFILE_KEY)? {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                tracing::warn!("Ignoring unreadable cached profile: {}", err);
                UserProfile::default()
            }),
            None => UserProfile::default(),
        };

        let session = access_token.map(|access_token| AuthSession {
            access_token,
            refresh_token,
            user_profile,
        });
        Ok(Self {
            store,
            current: Arc::new(RwLock::new(session)),
        })
    }

    pub fn begin(&self, session: AuthSession) -> Result<()> {
        let profile = serde_json::to_string(&session.user_profile)?;
        self.store.set_many(&[
            (ACCESS_TOKEN_KEY, session.access_token.as_str()),
            (REFRESH_TOKEN_KEY, session.refresh_token.as_str()),
            (USER_PROFILE_KEY, profile.as_str()),
        ])?;
        *self.write() = Some(session);
        Ok(())
    }

    /// Tear down the session. Memory is cleared even if storage fails.
    pub fn end(&self) -> Result<()> {
        *self.write() = None;
        self.store.remove_many(&SESSION_KEYS)
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().is_some()
    }

    pub fn access_token(&self) -> Option<String> {
        self.read().as_ref().map(|s| s.access_token.clone())
    }

    pub fn profile(&self) -> Option<UserProfile> {
        self.read().as_ref().map(|s| s.user_profile.clone())
    }

    pub fn snapshot(&self) -> Option<AuthSession> {
        self.read().clone()
    }

    pub fn update_profile(&self, profile: UserProfile) -> Result<()> {
        let raw = serde_json::to_string(&profile)?;
        self.store.set(USER_PROFILE_KEY, &raw)?;
        if let Some(session) = self.write().as_mut() {
            session.user_profile = profile;
        }
        Ok(())
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Option<AuthSession>> {
        self.current.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Option<AuthSession>> {
        self.current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
