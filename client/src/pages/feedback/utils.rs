use crate::api::{ApiError, FeedbackRequest};

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// Unsent feedback for one lesson. Lives only as long as the screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackDraft {
    /// 0 means no star picked yet.
    pub rating: u8,
    pub text: String,
    pub anonymous: bool,
}

impl FeedbackDraft {
    /// Checks the draft and builds the request body; nothing is sent when this fails.
    pub fn validate(&self) -> Result<FeedbackRequest, ApiError> {
        if !(MIN_RATING..=MAX_RATING).contains(&self.rating) {
            return Err(ApiError::validation(format!(
                "Please choose a rating between {} and {}.",
                MIN_RATING, MAX_RATING
            )));
        }
        let text = self.text.trim();
        if text.is_empty() {
            return Err(ApiError::validation("Please write your feedback before sending."));
        }
        Ok(FeedbackRequest {
            feedback_text: text.to_string(),
            rating: self.rating,
            is_anonymous: self.anonymous,
        })
    }
}
