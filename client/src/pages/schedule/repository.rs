use crate::{
    api::{ApiError, Lesson},
    state::SessionGuard,
};

#[derive(Clone)]
pub struct ScheduleRepository {
    session: SessionGuard,
}

impl ScheduleRepository {
    pub fn new(session: SessionGuard) -> Self {
        Self { session }
    }

    pub async fn fetch_schedule(&self) -> Result<Vec<Lesson>, ApiError> {
        self.session
            .run(|api, token| async move { api.get_schedule(&token).await })
            .await
    }

    pub async fn fetch_lesson(&self, lesson_id: &str) -> Result<Lesson, ApiError> {
        let lesson_id = lesson_id.to_string();
        self.session
            .run(|api, token| async move { api.get_lesson(&token, &lesson_id).await })
            .await
    }
}
