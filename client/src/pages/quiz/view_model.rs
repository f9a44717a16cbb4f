use std::{fmt, sync::Arc};

use super::{
    attempt::{Advance, QuizAttempt},
    repository::QuizRepository,
};
use crate::{
    api::ApiError,
    navigation::{Navigator, Route},
    state::{ScreenScope, SessionGuard},
};

pub const NO_QUIZ_MESSAGE: &str = "There is no quiz for this lesson yet.";

/// Server-scored outcome of a submitted attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizResult {
    pub score: u32,
    pub total: usize,
}

impl fmt::Display for QuizResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Your score: {}/{}", self.score, self.total)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizPhase {
    Loading,
    NoQuiz,
    InProgress(QuizAttempt),
    Completed(QuizResult),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizStep {
    /// Moved on to the question at this index.
    Next(usize),
    Finished(QuizResult),
    /// The screen was dismissed while the submission was in flight.
    Discarded,
}

pub struct QuizViewModel {
    repo: QuizRepository,
    navigator: Arc<dyn Navigator>,
    scope: ScreenScope,
    lesson_id: String,
    phase: QuizPhase,
    pub submitting: bool,
    pub error: Option<String>,
}

impl QuizViewModel {
    pub fn new(session: SessionGuard, lesson_id: impl Into<String>) -> Self {
        Self {
            navigator: session.navigator().clone(),
            repo: QuizRepository::new(session),
            scope: ScreenScope::new(),
            lesson_id: lesson_id.into(),
            phase: QuizPhase::Loading,
            submitting: false,
            error: None,
        }
    }

    pub fn scope(&self) -> &ScreenScope {
        &self.scope
    }

    pub fn phase(&self) -> &QuizPhase {
        &self.phase
    }

    pub fn attempt(&self) -> Option<&QuizAttempt> {
        match &self.phase {
            QuizPhase::InProgress(attempt) => Some(attempt),
            _ => None,
        }
    }

    fn attempt_mut(&mut self) -> Result<&mut QuizAttempt, ApiError> {
        match &mut self.phase {
            QuizPhase::InProgress(attempt) => Ok(attempt),
            _ => Err(ApiError::validation("No quiz is in progress.")),
        }
    }

    /// Resolves the lesson's quiz and starts a fresh attempt.
    pub async fn load(&mut self) -> Result<(), ApiError> {
        self.phase = QuizPhase::Loading;
        let result = self.repo.resolve_for_lesson(&self.lesson_id).await;
        if !self.scope.is_active() {
            return Ok(());
        }

        match result {
            Ok(Some(quiz)) => {
                tracing::info!(lesson_id = %self.lesson_id, quiz_id = %quiz.id, questions = quiz.questions.len(), "quiz loaded");
                self.phase = QuizPhase::InProgress(QuizAttempt::new(quiz));
                self.error = None;
                Ok(())
            }
            Ok(None) => {
                tracing::info!(lesson_id = %self.lesson_id, "lesson has no quiz");
                self.phase = QuizPhase::NoQuiz;
                self.error = Some(NO_QUIZ_MESSAGE.to_string());
                Ok(())
            }
            Err(err) => {
                self.error = Some(err.surface("load quiz"));
                Err(err)
            }
        }
    }

    pub fn select_option(&mut self, question_index: usize, option_index: usize) -> Result<(), ApiError> {
        let result = self
            .attempt_mut()
            .and_then(|attempt| attempt.select_option(question_index, option_index));
        match &result {
            Ok(()) => self.error = None,
            Err(err) => self.error = Some(err.surface("select answer")),
        }
        result
    }

    /// "Next question": moves forward, or submits from the last question.
    pub async fn advance(&mut self) -> Result<QuizStep, ApiError> {
        let step = self.attempt_mut().and_then(QuizAttempt::advance);
        match step {
            Ok(Advance::Next(index)) => {
                self.error = None;
                Ok(QuizStep::Next(index))
            }
            Ok(Advance::Submit) => self.submit().await,
            Err(err) => {
                self.error = Some(err.surface("advance quiz"));
                Err(err)
            }
        }
    }

    /// Posts every answer. The attempt is kept untouched on failure so a retry
    /// resubmits the same selections.
    pub async fn submit(&mut self) -> Result<QuizStep, ApiError> {
        if self.submitting {
            tracing::debug!(lesson_id = %self.lesson_id, "quiz submission already in flight");
            return Err(ApiError::validation("Your answers are already being sent."));
        }
        let (quiz_id, answers, total) = {
            let attempt = self.attempt_mut()?;
            (
                attempt.quiz().id.clone(),
                attempt.answers(),
                attempt.question_count(),
            )
        };

        self.submitting = true;
        self.error = None;
        let result = self.repo.submit(&quiz_id, answers).await;
        if !self.scope.is_active() {
            return Ok(QuizStep::Discarded);
        }
        self.submitting = false;

        match result {
            Ok(response) => {
                let outcome = QuizResult {
                    score: response.score,
                    total,
                };
                tracing::info!(quiz_id = %quiz_id, score = outcome.score, total, "quiz submitted");
                self.phase = QuizPhase::Completed(outcome);
                self.navigator.navigate(Route::Back);
                Ok(QuizStep::Finished(outcome))
            }
            Err(err) => {
                self.error = Some(err.surface("submit quiz"));
                Err(err)
            }
        }
    }
}
