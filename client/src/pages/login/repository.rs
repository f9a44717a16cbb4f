use crate::{
    api::{ApiError, LoginRequest},
    state::SessionGuard,
};

#[derive(Clone)]
pub struct LoginRepository {
    session: SessionGuard,
}

impl LoginRepository {
    pub fn new(session: SessionGuard) -> Self {
        Self { session }
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<(), ApiError> {
        self.session.login(request).await
    }

    pub fn logout(&self) -> Result<(), ApiError> {
        self.session.logout()
    }

    pub fn has_session(&self) -> bool {
        self.session.is_authenticated()
    }
}
