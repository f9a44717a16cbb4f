use serde_json::json;

use super::{
    client::ApiClient,
    types::{
        ApiError, AttendanceStatusResponse, FeedbackRequest, FeedbackResponse, Lesson,
        LessonResponse, MarkAttendanceResponse, ScheduleResponse,
    },
};

impl ApiClient {
    pub async fn get_schedule(&self, token: &str) -> Result<Vec<Lesson>, ApiError> {
        let response: ScheduleResponse = self.get_json("/student/schedule", Some(token)).await?;
        Ok(response.schedule)
    }

    pub async fn get_lesson(&self, token: &str, lesson_id: &str) -> Result<Lesson, ApiError> {
        let response: LessonResponse = self
            .get_json(&format!("/student/lessons/{}", lesson_id), Some(token))
            .await?;
        Ok(response.into_lesson())
    }

    pub async fn get_attendance(
        &self,
        token: &str,
        lesson_id: &str,
    ) -> Result<AttendanceStatusResponse, ApiError> {
        self.get_json(
            &format!("/student/lessons/{}/attendance", lesson_id),
            Some(token),
        )
        .await
    }

    pub async fn mark_attendance(
        &self,
        token: &str,
        lesson_id: &str,
    ) -> Result<MarkAttendanceResponse, ApiError> {
        self.post_json(
            &format!("/student/lessons/{}/attendance", lesson_id),
            &json!({}),
            Some(token),
        )
        .await
    }

    pub async fn submit_feedback(
        &self,
        token: &str,
        lesson_id: &str,
        request: &FeedbackRequest,
    ) -> Result<FeedbackResponse, ApiError> {
        self.post_json(
            &format!("/student/lessons/{}/feedback", lesson_id),
            request,
            Some(token),
        )
        .await
    }
}
