use super::{
    client::ApiClient,
    types::{ApiError, Quiz, QuizAnswer, QuizResponse, QuizSubmission, QuizSubmitResponse},
};

impl ApiClient {
    pub async fn get_quiz(&self, token: &str, quiz_id: &str) -> Result<Quiz, ApiError> {
        let response: QuizResponse = self
            .get_json(&format!("/student/quizzes/{}", quiz_id), Some(token))
            .await?;
        Ok(response.into_quiz())
    }

    pub async fn submit_quiz(
        &self,
        token: &str,
        quiz_id: &str,
        answers: Vec<QuizAnswer>,
    ) -> Result<QuizSubmitResponse, ApiError> {
        self.post_json(
            &format!("/student/quizzes/{}/submit", quiz_id),
            &QuizSubmission { answers },
            Some(token),
        )
        .await
    }
}
