use std::{future::Future, sync::Arc};

use crate::{
    api::{ApiClient, ApiError, LoginRequest},
    navigation::{Navigator, Route},
    state::token::TokenStore,
};

/// Gatekeeper for every protected call.
///
/// Owns the only path to the stored token: it is read here, handed to the
/// request closure, and cleared here when the server rejects it.
#[derive(Clone)]
pub struct SessionGuard {
    api: ApiClient,
    tokens: Arc<dyn TokenStore>,
    navigator: Arc<dyn Navigator>,
}

impl SessionGuard {
    pub fn new(
        api: ApiClient,
        tokens: Arc<dyn TokenStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            api,
            tokens,
            navigator,
        }
    }

    pub fn navigator(&self) -> &Arc<dyn Navigator> {
        &self.navigator
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.tokens.load(), Ok(Some(_)))
    }

    /// On failure the server message is returned as-is and any previous token
    /// is left untouched.
    pub async fn login(&self, request: &LoginRequest) -> Result<(), ApiError> {
        let response = self.api.login(request).await?;
        if response.token.is_empty() {
            return Err(ApiError::MalformedResponse(
                "login response carried an empty token".into(),
            ));
        }
        self.tokens.save(&response.token)?;
        tracing::info!("session established");
        self.navigator.navigate(Route::Home);
        Ok(())
    }

    pub fn logout(&self) -> Result<(), ApiError> {
        self.tokens.clear()?;
        tracing::info!("signed out");
        self.navigator.navigate(Route::Login);
        Ok(())
    }

    /// Runs `call` with the stored token.
    ///
    /// Without a token the call is never attempted. A 401/403 answer clears the
    /// store. Both cases redirect to login and yield `AuthenticationRequired`.
    pub async fn run<T, F, Fut>(&self, call: F) -> Result<T, ApiError>
    where
        F: FnOnce(ApiClient, String) -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let Some(token) = self.tokens.load()? else {
            tracing::info!("no stored session; redirecting to login");
            self.navigator.navigate(Route::Login);
            return Err(ApiError::AuthenticationRequired);
        };

        match call(self.api.clone(), token).await {
            Err(err) if err.is_auth_failure() => {
                tracing::warn!(error = %err, "session rejected by server");
                self.expire_session();
                Err(ApiError::AuthenticationRequired)
            }
            result => result,
        }
    }

    fn expire_session(&self) {
        if let Err(err) = self.tokens.clear() {
            tracing::error!(error = %err, "failed to clear rejected session token");
        }
        self.navigator.navigate(Route::Login);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{navigation::HistoryNavigator, state::token::MemoryTokenStore};
    use httpmock::prelude::*;
    use serde_json::json;

    fn guard(
        server: &MockServer,
        tokens: Arc<MemoryTokenStore>,
    ) -> (SessionGuard, Arc<HistoryNavigator>) {
        let nav = Arc::new(HistoryNavigator::new());
        let guard = SessionGuard::new(
            ApiClient::new_with_base_url(server.url("/api")),
            tokens,
            nav.clone(),
        );
        (guard, nav)
    }

    fn credentials() -> LoginRequest {
        LoginRequest {
            email: "a@b.com".into(),
            password: "x".into(),
        }
    }

    #[tokio::test]
    async fn login_persists_token_and_enters_home() {
        let server = MockServer::start_async().await;
        let login = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/auth/login")
                    .json_body(json!({ "email": "a@b.com", "password": "x" }));
                then.status(200).json_body(json!({ "token": "t1" }));
            })
            .await;
        let tokens = Arc::new(MemoryTokenStore::default());
        let (guard, nav) = guard(&server, tokens.clone());

        guard.login(&credentials()).await.unwrap();

        login.assert_async().await;
        assert_eq!(tokens.load().unwrap().as_deref(), Some("t1"));
        assert_eq!(nav.history(), vec![Route::Home]);
        assert!(guard.is_authenticated());
    }

    #[tokio::test]
    async fn failed_login_surfaces_message_and_keeps_prior_token() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/auth/login");
                then.status(401)
                    .json_body(json!({ "message": "Invalid email or password" }));
            })
            .await;
        let tokens = Arc::new(MemoryTokenStore::with_token("old"));
        let (guard, nav) = guard(&server, tokens.clone());

        let err = guard.login(&credentials()).await.unwrap_err();

        assert_eq!(err.user_message(), "Invalid email or password");
        assert_eq!(tokens.load().unwrap().as_deref(), Some("old"));
        assert!(nav.history().is_empty());
    }

    #[tokio::test]
    async fn missing_token_aborts_before_the_call() {
        let server = MockServer::start_async().await;
        let (guard, nav) = guard(&server, Arc::new(MemoryTokenStore::default()));
        let mut attempted = false;

        let err = guard
            .run(|_, _| {
                attempted = true;
                async { Ok::<_, ApiError>(()) }
            })
            .await
            .unwrap_err();

        assert_eq!(err, ApiError::AuthenticationRequired);
        assert!(!attempted);
        assert_eq!(nav.history(), vec![Route::Login]);
    }

    #[tokio::test]
    async fn rejected_token_is_cleared_and_redirects() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/student/schedule");
                then.status(401).json_body(json!({ "message": "Token expired" }));
            })
            .await;
        let tokens = Arc::new(MemoryTokenStore::with_token("stale"));
        let (guard, nav) = guard(&server, tokens.clone());

        let err = guard
            .run(|api, token| async move { api.get_schedule(&token).await })
            .await
            .unwrap_err();

        assert_eq!(err, ApiError::AuthenticationRequired);
        assert!(tokens.load().unwrap().is_none());
        assert_eq!(nav.last(), Some(Route::Login));
    }

    #[tokio::test]
    async fn other_rejections_pass_through_untouched() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/student/schedule");
                then.status(500).body("database down");
            })
            .await;
        let tokens = Arc::new(MemoryTokenStore::with_token("t1"));
        let (guard, nav) = guard(&server, tokens.clone());

        let err = guard
            .run(|api, token| async move { api.get_schedule(&token).await })
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ApiError::ServerRejected {
                status: 500,
                message: "database down".into()
            }
        );
        assert_eq!(tokens.load().unwrap().as_deref(), Some("t1"));
        assert!(nav.history().is_empty());
    }

    #[test]
    fn logout_clears_token_and_redirects() {
        let tokens = Arc::new(MemoryTokenStore::with_token("t1"));
        let nav = Arc::new(HistoryNavigator::new());
        let guard = SessionGuard::new(
            ApiClient::new_with_base_url("http://localhost:3000/api"),
            tokens.clone(),
            nav.clone(),
        );

        guard.logout().unwrap();

        assert!(tokens.load().unwrap().is_none());
        assert_eq!(nav.history(), vec![Route::Login]);
        assert!(!guard.is_authenticated());
    }
}
