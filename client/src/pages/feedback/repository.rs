use crate::{
    api::{ApiError, FeedbackRequest, FeedbackResponse},
    state::SessionGuard,
};

#[derive(Clone)]
pub struct FeedbackRepository {
    session: SessionGuard,
}

impl FeedbackRepository {
    pub fn new(session: SessionGuard) -> Self {
        Self { session }
    }

    pub async fn submit(
        &self,
        lesson_id: &str,
        request: FeedbackRequest,
    ) -> Result<FeedbackResponse, ApiError> {
        let lesson_id = lesson_id.to_string();
        self.session
            .run(|api, token| async move { api.submit_feedback(&token, &lesson_id, &request).await })
            .await
    }
}
