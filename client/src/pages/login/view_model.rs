use super::{repository::LoginRepository, utils::LoginForm};
use crate::{api::ApiError, state::SessionGuard};

pub struct LoginViewModel {
    repo: LoginRepository,
    pub form: LoginForm,
    pub loading: bool,
    pub error: Option<String>,
}

impl LoginViewModel {
    pub fn new(session: SessionGuard) -> Self {
        Self {
            repo: LoginRepository::new(session),
            form: LoginForm::default(),
            loading: false,
            error: None,
        }
    }

    pub fn has_session(&self) -> bool {
        self.repo.has_session()
    }

    /// Validates the form, then signs in. The session guard stores the token
    /// and navigates home; the password is cleared from the form afterwards.
    pub async fn submit(&mut self) -> Result<(), ApiError> {
        if self.loading {
            return Err(ApiError::validation("Signing in, please wait."));
        }
        let request = match self.form.to_request() {
            Ok(request) => request,
            Err(err) => {
                self.error = Some(err.surface("sign in"));
                return Err(err);
            }
        };

        self.loading = true;
        self.error = None;
        let result = self.repo.login(&request).await;
        self.loading = false;

        match result {
            Ok(()) => {
                self.form.password.clear();
                Ok(())
            }
            Err(err) => {
                self.error = Some(err.surface("sign in"));
                Err(err)
            }
        }
    }

    pub fn logout(&mut self) -> Result<(), ApiError> {
        self.form = LoginForm::default();
        self.repo.logout().map_err(|err| {
            self.error = Some(err.surface("sign out"));
            err
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        api::ApiClient,
        navigation::{HistoryNavigator, Route},
        state::{MemoryTokenStore, TokenStore},
    };
    use httpmock::prelude::*;
    use serde_json::json;
    use std::sync::Arc;

    fn view_model(
        base_url: String,
    ) -> (LoginViewModel, Arc<MemoryTokenStore>, Arc<HistoryNavigator>) {
        let tokens = Arc::new(MemoryTokenStore::default());
        let nav = Arc::new(HistoryNavigator::new());
        let session = SessionGuard::new(
            ApiClient::new_with_base_url(base_url),
            tokens.clone(),
            nav.clone(),
        );
        (LoginViewModel::new(session), tokens, nav)
    }

    #[tokio::test]
    async fn empty_form_never_reaches_the_server() {
        let server = MockServer::start_async().await;
        let login = server
            .mock_async(|when, then| {
                when.method(POST).path("/api/auth/login");
                then.status(200).json_body(json!({ "token": "t1" }));
            })
            .await;
        let (mut vm, tokens, nav) = view_model(server.url("/api"));

        let err = vm.submit().await.unwrap_err();

        assert!(matches!(err, ApiError::Validation(_)));
        assert_eq!(vm.error.as_deref(), Some("Please enter your email."));
        assert!(tokens.load().unwrap().is_none());
        assert!(nav.history().is_empty());
        login.assert_hits_async(0).await;
    }

    #[tokio::test]
    async fn successful_login_stores_token_and_clears_password() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/auth/login")
                    .json_body(json!({ "email": "a@b.com", "password": "x" }));
                then.status(200).json_body(json!({ "token": "t1" }));
            })
            .await;
        let (mut vm, tokens, nav) = view_model(server.url("/api"));
        vm.form = LoginForm::new("a@b.com", "x");

        vm.submit().await.unwrap();

        assert_eq!(tokens.load().unwrap().as_deref(), Some("t1"));
        assert_eq!(vm.form.email, "a@b.com");
        assert!(vm.form.password.is_empty());
        assert!(!vm.loading);
        assert!(vm.has_session());
        assert_eq!(nav.history(), vec![Route::Home]);
    }

    #[tokio::test]
    async fn rejected_credentials_show_server_message() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/auth/login");
                then.status(401).json_body(json!({ "message": "Invalid credentials" }));
            })
            .await;
        let (mut vm, tokens, nav) = view_model(server.url("/api"));
        vm.form = LoginForm::new("a@b.com", "wrong");

        vm.submit().await.unwrap_err();

        assert_eq!(vm.error.as_deref(), Some("Invalid credentials"));
        assert_eq!(vm.form.password, "wrong");
        assert!(tokens.load().unwrap().is_none());
        assert!(nav.history().is_empty());
    }

    #[test]
    fn logout_clears_token_and_returns_to_login() {
        let tokens = Arc::new(MemoryTokenStore::with_token("t1"));
        let nav = Arc::new(HistoryNavigator::new());
        let session = SessionGuard::new(
            ApiClient::new_with_base_url("http://127.0.0.1:1/api"),
            tokens.clone(),
            nav.clone(),
        );
        let mut vm = LoginViewModel::new(session);

        vm.logout().unwrap();

        assert!(tokens.load().unwrap().is_none());
        assert_eq!(nav.history(), vec![Route::Login]);
    }
}
