use crate::{
    api::{ApiError, Quiz, QuizAnswer, QuizSubmitResponse},
    state::SessionGuard,
};

#[derive(Clone)]
pub struct QuizRepository {
    session: SessionGuard,
}

impl QuizRepository {
    pub fn new(session: SessionGuard) -> Self {
        Self { session }
    }

    /// Resolves the lesson's quiz through the lesson record: lesson, then its
    /// first linked quiz id, then the quiz. `None` when the lesson has no quiz.
    pub async fn resolve_for_lesson(&self, lesson_id: &str) -> Result<Option<Quiz>, ApiError> {
        let lesson_id = lesson_id.to_string();
        self.session
            .run(|api, token| async move {
                let lesson = api.get_lesson(&token, &lesson_id).await?;
                match lesson.quiz_ids.first() {
                    Some(quiz_id) => api.get_quiz(&token, quiz_id).await.map(Some),
                    None => Ok(None),
                }
            })
            .await
    }

    pub async fn submit(
        &self,
        quiz_id: &str,
        answers: Vec<QuizAnswer>,
    ) -> Result<QuizSubmitResponse, ApiError> {
        let quiz_id = quiz_id.to_string();
        self.session
            .run(|api, token| async move { api.submit_quiz(&token, &quiz_id, answers).await })
            .await
    }
}
