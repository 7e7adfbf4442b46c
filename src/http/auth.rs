//! # Authentication
//!
//! [`HttpAuth`] implements the session endpoints; [`AuthSession`] is the client-side login
//! state a view reads (`is_authenticated`, the current [`User`]).
//!
//! ```rust,ignore
//! let session = AuthSession::new(Arc::new(HttpAuth::new(api.clone())), api.token().clone(), store);
//! session.login("alice", "secret").await?;
//! assert!(session.is_authenticated());
//! ```

use super::client::ApiClient;
use super::token::{SessionToken, TokenStore, TokenStoreError};
use crate::framework::{AuthGateway, GatewayError};
use crate::model::{LoginRequest, LoginResponse, QueryParams, SignUp, User};
use async_trait::async_trait;
use reqwest::Method;
use std::sync::{Arc, PoisonError, RwLock};
use thiserror::Error;
use tracing::{debug, error, info, instrument, warn};

/// [`AuthGateway`] over `login/`, `logout/`, `me/` and `signup/`.
#[derive(Debug, Clone)]
pub struct HttpAuth {
    api: ApiClient,
}

impl HttpAuth {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl AuthGateway for HttpAuth {
    #[instrument(skip(self, password))]
    async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, GatewayError> {
        let url = self.api.endpoint("login/", &QueryParams::new())?;
        let body = LoginRequest { username, password };
        self.api.request(Method::POST, url, Some(&body)).await
    }

    #[instrument(skip(self))]
    async fn me(&self) -> Result<User, GatewayError> {
        let url = self.api.endpoint("me/", &QueryParams::new())?;
        self.api.request(Method::GET, url, None::<&()>).await
    }

    #[instrument(skip(self))]
    async fn logout(&self) -> Result<(), GatewayError> {
        let url = self.api.endpoint("logout/", &QueryParams::new())?;
        self.api.execute(Method::POST, url, None::<&()>).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn signup(&self, data: &SignUp) -> Result<User, GatewayError> {
        let url = self.api.endpoint("signup/", &QueryParams::new())?;
        self.api.request(Method::POST, url, Some(data)).await
    }
}

/// Errors of [`AuthSession`] operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error(transparent)]
    Store(#[from] TokenStoreError),
}

/// Login state of the client: the token (persisted) and the current user (cached).
pub struct AuthSession {
    gateway: Arc<dyn AuthGateway>,
    token: SessionToken,
    store: Arc<dyn TokenStore>,
    user: RwLock<Option<User>>,
}

impl AuthSession {
    /// Creates a session, restoring the token persisted by a previous run.
    ///
    /// An unreadable store is logged and treated as logged out.
    pub fn new(
        gateway: Arc<dyn AuthGateway>,
        token: SessionToken,
        store: Arc<dyn TokenStore>,
    ) -> Self {
        match store.load() {
            Ok(Some(saved)) => {
                debug!("Restored saved token");
                token.set(Some(saved));
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "Ignoring unreadable token store"),
        }
        Self {
            gateway,
            token,
            store,
            user: RwLock::new(None),
        }
    }

    pub fn token(&self) -> Option<String> {
        self.token.get()
    }

    /// The cached current user, if [`fetch_user`](Self::fetch_user) has run.
    pub fn user(&self) -> Option<User> {
        self.user
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_set()
    }

    /// Exchanges credentials for a token, persists it, then loads the current user.
    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<(), AuthError> {
        let result = self.try_login(username, password).await;
        if let Err(e) = &result {
            error!(error = %e, "Login failed");
        }
        result
    }

    async fn try_login(&self, username: &str, password: &str) -> Result<(), AuthError> {
        let response = self.gateway.login(username, password).await?;
        self.token.set(Some(response.token.clone()));
        self.store.save(&response.token)?;
        if let Some(user) = response.user {
            self.set_user(Some(user));
        }
        self.fetch_user().await?;
        info!(username, "Logged in");
        Ok(())
    }

    /// Loads the current user unless one is cached. Without a token there is nothing to load.
    pub async fn fetch_user(&self) -> Result<Option<User>, AuthError> {
        if let Some(user) = self.user() {
            return Ok(Some(user));
        }
        if !self.token.is_set() {
            return Ok(None);
        }
        let user = self.gateway.me().await?;
        self.set_user(Some(user.clone()));
        Ok(Some(user))
    }

    /// Ends the session on the backend, then forgets the token and user.
    ///
    /// When the backend call fails the local session is kept.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), AuthError> {
        self.gateway.logout().await?;
        self.token.set(None);
        self.set_user(None);
        self.store.clear()?;
        info!("Logged out");
        Ok(())
    }

    /// Registers a new account. Does not log in.
    pub async fn signup(&self, data: &SignUp) -> Result<User, AuthError> {
        Ok(self.gateway.signup(data).await?)
    }

    fn set_user(&self, user: Option<User>) {
        *self.user.write().unwrap_or_else(PoisonError::into_inner) = user;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::token::MemoryTokenStore;
    use reqwest::StatusCode;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct FakeAuth {
        me_calls: AtomicUsize,
        reject_logout: bool,
    }

    #[async_trait]
    impl AuthGateway for FakeAuth {
        async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, GatewayError> {
            if password != "secret" {
                return Err(GatewayError::Status {
                    status: StatusCode::BAD_REQUEST,
                    body: "{\"non_field_errors\":[\"bad credentials\"]}".to_string(),
                });
            }
            Ok(LoginResponse {
                token: format!("token-{username}"),
                user: None,
            })
        }

        async fn me(&self) -> Result<User, GatewayError> {
            self.me_calls.fetch_add(1, Ordering::SeqCst);
            Ok(User::new(1, "alice"))
        }

        async fn logout(&self) -> Result<(), GatewayError> {
            if self.reject_logout {
                return Err(GatewayError::Status {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    body: String::new(),
                });
            }
            Ok(())
        }

        async fn signup(&self, data: &SignUp) -> Result<User, GatewayError> {
            Ok(User::new(2, data.username.clone()))
        }
    }

    #[tokio::test]
    async fn test_login_stores_token_and_user() {
        let gateway = Arc::new(FakeAuth::default());
        let store = Arc::new(MemoryTokenStore::default());
        let session = AuthSession::new(gateway.clone(), SessionToken::default(), store.clone());
        assert!(!session.is_authenticated());

        session.login("alice", "secret").await.unwrap();

        assert!(session.is_authenticated());
        assert_eq!(session.token().as_deref(), Some("token-alice"));
        assert_eq!(store.load().unwrap().as_deref(), Some("token-alice"));
        assert_eq!(session.user(), Some(User::new(1, "alice")));

        // Cached: no second `me/` call.
        session.fetch_user().await.unwrap();
        assert_eq!(gateway.me_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_login_propagates() {
        let store = Arc::new(MemoryTokenStore::default());
        let session = AuthSession::new(
            Arc::new(FakeAuth::default()),
            SessionToken::default(),
            store.clone(),
        );

        let err = session.login("alice", "wrong").await.unwrap_err();
        assert!(matches!(err, AuthError::Gateway(ref e) if e.status() == Some(StatusCode::BAD_REQUEST)));
        assert!(!session.is_authenticated());
        assert_eq!(store.load().unwrap(), None);
    }

    #[tokio::test]
    async fn test_fetch_user_without_token_is_noop() {
        let gateway = Arc::new(FakeAuth::default());
        let session = AuthSession::new(
            gateway.clone(),
            SessionToken::default(),
            Arc::new(MemoryTokenStore::default()),
        );

        assert_eq!(session.fetch_user().await.unwrap(), None);
        assert_eq!(gateway.me_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_restored_token_and_logout() {
        let store = Arc::new(MemoryTokenStore::new(Some("saved".to_string())));
        let token = SessionToken::default();
        let session = AuthSession::new(Arc::new(FakeAuth::default()), token.clone(), store.clone());
        assert_eq!(token.get().as_deref(), Some("saved"));

        session.logout().await.unwrap();
        assert!(!session.is_authenticated());
        assert!(session.user().is_none());
        assert_eq!(store.load().unwrap(), None);
    }

    #[tokio::test]
    async fn test_rejected_logout_keeps_session() {
        let store = Arc::new(MemoryTokenStore::new(Some("saved".to_string())));
        let gateway = Arc::new(FakeAuth {
            reject_logout: true,
            ..Default::default()
        });
        let session = AuthSession::new(gateway, SessionToken::default(), store.clone());

        assert!(session.logout().await.is_err());
        assert!(session.is_authenticated());
        assert_eq!(store.load().unwrap().as_deref(), Some("saved"));
    }
}
