use crate::{
    api::{ApiError, AttendanceStatusResponse, MarkAttendanceResponse},
    state::SessionGuard,
};

#[derive(Clone)]
pub struct AttendanceRepository {
    session: SessionGuard,
}

impl AttendanceRepository {
    pub fn new(session: SessionGuard) -> Self {
        Self { session }
    }

    pub async fn fetch_status(&self, lesson_id: &str) -> Result<AttendanceStatusResponse, ApiError> {
        let lesson_id = lesson_id.to_string();
        self.session
            .run(|api, token| async move { api.get_attendance(&token, &lesson_id).await })
            .await
    }

    pub async fn mark_present(&self, lesson_id: &str) -> Result<MarkAttendanceResponse, ApiError> {
        let lesson_id = lesson_id.to_string();
        self.session
            .run(|api, token| async move { api.mark_attendance(&token, &lesson_id).await })
            .await
    }
}
