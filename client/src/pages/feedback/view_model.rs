use std::sync::Arc;

use super::{repository::FeedbackRepository, utils::FeedbackDraft};
use crate::{
    api::ApiError,
    navigation::{Navigator, Route},
    state::{ScreenScope, SessionGuard},
};

pub const DEFAULT_THANK_YOU: &str = "Thank you! Your feedback has been sent.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedbackOutcome {
    Sent(String),
    Discarded,
}

pub struct FeedbackViewModel {
    repo: FeedbackRepository,
    navigator: Arc<dyn Navigator>,
    scope: ScreenScope,
    lesson_id: String,
    pub draft: FeedbackDraft,
    pub submitting: bool,
    pub error: Option<String>,
}

impl FeedbackViewModel {
    pub fn new(session: SessionGuard, lesson_id: impl Into<String>) -> Self {
        Self {
            navigator: session.navigator().clone(),
            repo: FeedbackRepository::new(session),
            scope: ScreenScope::new(),
            lesson_id: lesson_id.into(),
            draft: FeedbackDraft::default(),
            submitting: false,
            error: None,
        }
    }

    pub fn scope(&self) -> &ScreenScope {
        &self.scope
    }

    pub fn set_rating(&mut self, rating: u8) {
        self.draft.rating = rating;
    }

    /// Validates locally, then posts. On success the draft is cleared and the
    /// screen closes; on failure the draft stays for a retry.
    pub async fn submit(&mut self) -> Result<FeedbackOutcome, ApiError> {
        if self.submitting {
            return Err(ApiError::validation("Your feedback is already being sent."));
        }
        let request = match self.draft.validate() {
            Ok(request) => request,
            Err(err) => {
                self.error = Some(err.surface("submit feedback"));
                return Err(err);
            }
        };

        self.submitting = true;
        self.error = None;
        let result = self.repo.submit(&self.lesson_id, request).await;
        if !self.scope.is_active() {
            return Ok(FeedbackOutcome::Discarded);
        }
        self.submitting = false;

        match result {
            Ok(response) => {
                self.draft = FeedbackDraft::default();
                tracing::info!(lesson_id = %self.lesson_id, "feedback sent");
                self.navigator.navigate(Route::Back);
                Ok(FeedbackOutcome::Sent(
                    response
                        .message
                        .filter(|m| !m.trim().is_empty())
                        .unwrap_or_else(|| DEFAULT_THANK_YOU.to_string()),
                ))
            }
            Err(err) => {
                self.error = Some(err.surface("submit feedback"));
                Err(err)
            }
        }
    }
}
