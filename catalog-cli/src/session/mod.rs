//! Session state: whether a bearer token is held, and the flows that create
//! and destroy it.

mod store;

pub use store::*;

use crate::client::CatalogApi;
use catalog_models::{RegisterRequest, User};
use std::sync::Arc;
use tracing::{error, info};

pub const LOGIN_REJECTED: &str =
    "Login failed. Please check your credentials.";
pub const LOGIN_FAILED: &str = "Login failed. Please try again.";
pub const REGISTER_FAILED: &str = "Registration failed. Please try again.";

/// Where the user ends up after a session flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Landing,
    Dashboard,
    Login { registered: bool },
}

/// Result of a flow that either navigates or shows an inline error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    Navigate(Navigation),
    Error(String),
}

/// Which session controls are offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthControls {
    pub login: bool,
    pub register: bool,
    pub logout: bool,
    pub dashboard: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UserInfo {
    User(User),
    /// The token was rejected and has been dropped.
    LoggedOut,
    Unavailable(String),
}

#[derive(Clone)]
pub struct Session {
    tokens: Arc<dyn TokenStore>,
}

impl Session {
    pub fn new(tokens: Arc<dyn TokenStore>) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    pub fn is_logged_in(&self) -> bool {
        self.tokens.token().is_some()
    }

    pub fn check_auth_status(&self) -> AuthControls {
        let authenticated = self.is_logged_in();
        AuthControls {
            login: !authenticated,
            register: !authenticated,
            logout: authenticated,
            dashboard: authenticated,
        }
    }

    pub async fn login(
        &self,
        api: &dyn CatalogApi,
        username: &str,
        password: &str,
    ) -> AuthOutcome {
        match api.login(username, password).await {
            Ok(reply) => match reply.access_token.filter(|t| !t.is_empty()) {
                Some(token) => match self.tokens.store(&token) {
                    Ok(()) => {
                        info!("logged in as {username}");
                        AuthOutcome::Navigate(Navigation::Dashboard)
                    }
                    Err(e) => {
                        error!("Failed to persist session: {e:#}");
                        AuthOutcome::Error(LOGIN_FAILED.to_string())
                    }
                },
                None => AuthOutcome::Error(LOGIN_REJECTED.to_string()),
            },
            Err(e) => AuthOutcome::Error(non_empty_or(e.to_string(), LOGIN_FAILED)),
        }
    }

    pub async fn register(
        &self,
        api: &dyn CatalogApi,
        request: &RegisterRequest,
    ) -> AuthOutcome {
        match api.register(request).await {
            Ok(body) if body.get("id").is_some_and(|id| !id.is_null()) => {
                AuthOutcome::Navigate(Navigation::Login { registered: true })
            }
            Ok(_) => AuthOutcome::Error(REGISTER_FAILED.to_string()),
            Err(e) => {
                AuthOutcome::Error(non_empty_or(e.to_string(), REGISTER_FAILED))
            }
        }
    }

    /// Clears the token unconditionally.
    pub fn logout(&self) -> anyhow::Result<Navigation> {
        self.tokens.clear()?;
        Ok(Navigation::Landing)
    }

    /// Current user for display. A rejected token ends the session.
    pub async fn load_user_info(&self, api: &dyn CatalogApi) -> UserInfo {
        match api.current_user().await {
            Ok(user) => UserInfo::User(user),
            Err(e) => {
                error!("Error loading user info: {e}");
                if e.is_unauthorized() {
                    match self.logout() {
                        Ok(_) => UserInfo::LoggedOut,
                        Err(clear_err) => {
                            UserInfo::Unavailable(format!("{clear_err:#}"))
                        }
                    }
                } else {
                    UserInfo::Unavailable(e.to_string())
                }
            }
        }
    }
}

fn non_empty_or(message: String, fallback: &str) -> String {
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Call, FakeApi};
    use serde_json::json;

    fn session(token: Option<&str>) -> Session {
        Session::new(Arc::new(MemoryTokenStore::new(token.map(String::from))))
    }

    #[test]
    fn auth_controls_follow_token() {
        let controls = session(None).check_auth_status();
        assert!(controls.login && controls.register);
        assert!(!controls.logout && !controls.dashboard);

        let controls = session(Some("t")).check_auth_status();
        assert!(!controls.login && !controls.register);
        assert!(controls.logout && controls.dashboard);
    }

    #[tokio::test]
    async fn login_stores_token_and_goes_to_dashboard() {
        let api = FakeApi {
            issued_token: Some("fresh".into()),
            ..Default::default()
        };
        let session = session(None);

        let outcome = session.login(&api, "ada", "pw").await;
        assert_eq!(outcome, AuthOutcome::Navigate(Navigation::Dashboard));
        assert_eq!(session.tokens().token().as_deref(), Some("fresh"));
        assert_eq!(api.calls(), vec![Call::Login("ada".into())]);
    }

    #[tokio::test]
    async fn login_without_token_is_rejected() {
        let api = FakeApi::default();
        let session = session(None);

        let outcome = session.login(&api, "ada", "pw").await;
        assert_eq!(outcome, AuthOutcome::Error(LOGIN_REJECTED.into()));
        assert!(!session.is_logged_in());
    }

    #[tokio::test]
    async fn login_failure_surfaces_detail() {
        let api = FakeApi {
            login_error: Some((401, "Incorrect username or password".into())),
            ..Default::default()
        };
        let outcome = session(None).login(&api, "ada", "bad").await;
        assert_eq!(
            outcome,
            AuthOutcome::Error("Incorrect username or password".into())
        );
    }

    #[test]
    fn logout_clears_token() {
        let session = session(Some("t"));
        assert_eq!(session.logout().unwrap(), Navigation::Landing);
        assert!(!session.is_logged_in());
    }

    #[tokio::test]
    async fn register_redirects_to_login() {
        let api = FakeApi::default();
        let request = RegisterRequest {
            username: "ada".into(),
            name: "ada".into(),
            email: "ada@example.com".into(),
            password: "pw".into(),
        };
        let outcome = session(None).register(&api, &request).await;
        assert_eq!(
            outcome,
            AuthOutcome::Navigate(Navigation::Login { registered: true })
        );
    }

    fn request() -> RegisterRequest {
        RegisterRequest {
            username: "ada".into(),
            name: "ada".into(),
            email: "ada@example.com".into(),
            password: "pw".into(),
        }
    }

    #[tokio::test]
    async fn register_reply_without_id_fails() {
        for reply in [json!({"detail": "ok"}), json!({"id": null})] {
            let api = FakeApi {
                register_reply: Some(reply),
                ..Default::default()
            };
            let outcome = session(None).register(&api, &request()).await;
            assert_eq!(outcome, AuthOutcome::Error(REGISTER_FAILED.into()));
        }
    }

    #[tokio::test]
    async fn register_error_surfaces_reason() {
        let api = FakeApi {
            write_error: Some((400, "Username already registered".into())),
            ..Default::default()
        };
        let outcome = session(None).register(&api, &request()).await;
        assert_eq!(
            outcome,
            AuthOutcome::Error("Username already registered".into())
        );
    }

    #[tokio::test]
    async fn register_error_without_reason_uses_fallback() {
        let api = FakeApi {
            write_error: Some((500, "  ".into())),
            ..Default::default()
        };
        let outcome = session(None).register(&api, &request()).await;
        assert_eq!(outcome, AuthOutcome::Error(REGISTER_FAILED.into()));
    }

    #[tokio::test]
    async fn rejected_token_logs_out() {
        let api = FakeApi::default();
        let session = session(Some("stale"));

        assert_eq!(session.load_user_info(&api).await, UserInfo::LoggedOut);
        assert!(!session.is_logged_in());
    }

    #[tokio::test]
    async fn user_info_failure_keeps_session() {
        let api = FakeApi {
            user_error: Some((503, "Service unavailable".into())),
            ..FakeApi::with_user(4)
        };
        let session = session(Some("t"));

        assert_eq!(
            session.load_user_info(&api).await,
            UserInfo::Unavailable("Service unavailable".into())
        );
        assert!(session.is_logged_in());
    }

    #[tokio::test]
    async fn user_info_returns_user() {
        let api = FakeApi::with_user(4);
        match session(Some("t")).load_user_info(&api).await {
            UserInfo::User(user) => assert_eq!(user.id, 4),
            other => panic!("unexpected {other:?}"),
        }
    }
}
