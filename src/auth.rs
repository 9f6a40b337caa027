use serde_json::{Value, json};

use crate::{
    error::{AuthError, StorageError},
    http::ApiClient,
    models::{LoginRequest, LoginResponse, Session, User},
    storage::{StorageState, TOKEN_KEY, USER_KEY},
};

pub const LOGIN_ENDPOINT: &str = "/auth/login";
pub const LOGOUT_ENDPOINT: &str = "/auth/logout";

/// SessionManager
///
/// Owns the single authenticated session of this client and keeps it in
/// step with durable storage. Navigation is not its concern: `App` decides
/// where to go after `login` and `logout`.
///
/// Lifecycle:
/// 1. `initialize` rehydrates from storage (at start, or lazily by the guard).
/// 2. `login` creates the session and persists `user` + `token`.
/// 3. `logout` destroys it locally no matter what the server says.
pub struct SessionManager {
    api: ApiClient,
    storage: StorageState,
    session: Option<Session>,
    return_url: Option<String>,
}

impl SessionManager {
    pub fn new(api: ApiClient, storage: StorageState) -> Self {
        Self {
            api,
            storage,
            session: None,
            return_url: None,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn user(&self) -> Option<&User> {
        self.session.as_ref().map(|s| &s.user)
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.as_ref().is_some_and(|s| !s.token.is_empty())
    }

    pub fn is_admin(&self) -> bool {
        self.user().is_some_and(|u| u.has_role("admin"))
    }

    pub fn return_url(&self) -> Option<&str> {
        self.return_url.as_deref()
    }

    pub fn set_return_url(&mut self, url: impl Into<String>) {
        self.return_url = Some(url.into());
    }

    /// initialize
    ///
    /// Loads the persisted user record and token. Both must be present;
    /// a user record that does not parse is treated as corrupted and both
    /// entries are deleted. Calling it again re-reads storage and overwrites
    /// the in-memory session.
    ///
    /// # Errors
    /// Only storage I/O failures are returned. Parse failures are recovered.
    pub fn initialize(&mut self) -> Result<(), StorageError> {
        let stored_user = self.storage.get_item(USER_KEY)?;
        let stored_token = self.storage.get_item(TOKEN_KEY)?;

        let (Some(raw_user), Some(token)) = (stored_user, stored_token) else {
            return Ok(());
        };

        match serde_json::from_str::<User>(&raw_user) {
            Ok(user) => {
                tracing::debug!(user = %user.username, "session restored from storage");
                self.session = Some(Session { user, token });
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to parse user/token from storage");
                self.session = None;
                self.storage.remove_item(USER_KEY)?;
                self.storage.remove_item(TOKEN_KEY)?;
            }
        }
        Ok(())
    }

    /// login
    ///
    /// Exchanges credentials for a session and persists it. The pending
    /// return URL is left untouched; `App::login` consumes it.
    ///
    /// # Errors
    /// `AuthError::Rejected` with the server's message (or the generic
    /// failure string) when the request fails; `AuthError::Storage` when the
    /// session cannot be persisted, in which case nothing is kept in memory
    /// either.
    pub async fn login(&mut self, identifier: &str, secret: &str) -> Result<Session, AuthError> {
        let request = LoginRequest {
            login: identifier,
            password: secret,
        };
        let response: LoginResponse = match self.api.post(LOGIN_ENDPOINT, &request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(error = %e, "Login failed");
                return Err(e.into());
            }
        };

        let raw_user = serde_json::to_string(&response.user).map_err(StorageError::from)?;
        if let Err(e) = self
            .storage
            .set_item(USER_KEY, &raw_user)
            .and_then(|()| self.storage.set_item(TOKEN_KEY, &response.token))
        {
            // Never leave half a session on disk.
            let _ = self.storage.remove_item(USER_KEY);
            let _ = self.storage.remove_item(TOKEN_KEY);
            return Err(e.into());
        }

        let session = Session {
            user: response.user,
            token: response.token,
        };
        tracing::info!(user = %session.user.username, "logged in");
        self.session = Some(session.clone());
        Ok(session)
    }

    /// Takes the pending return URL, leaving none behind.
    pub fn take_return_url(&mut self) -> Option<String> {
        self.return_url.take()
    }

    /// logout
    ///
    /// Notifies the server when a token is held, then clears the session,
    /// the return URL and both storage entries. Server and storage failures
    /// are logged and swallowed: local sign-out always completes.
    pub async fn logout(&mut self) {
        if let Some(token) = self.session.as_ref().map(|s| s.token.clone()) {
            if let Err(e) = self
                .api
                .post_with_token::<Value, _>(LOGOUT_ENDPOINT, &token, &json!({}))
                .await
            {
                tracing::warn!(error = %e, "Logout API error, forcing client logout");
            }
        }

        self.session = None;
        self.return_url = None;
        for key in [USER_KEY, TOKEN_KEY] {
            if let Err(e) = self.storage.remove_item(key) {
                tracing::warn!(key, error = %e, "could not clear storage entry on logout");
            }
        }
        tracing::info!("logged out");
    }
}
