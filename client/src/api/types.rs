use serde::{Deserialize, Serialize};

use crate::utils::storage::StorageError;

pub const NETWORK_UNAVAILABLE_MESSAGE: &str =
    "Could not reach the server. Please check your internet connection.";
pub const SERVER_ERROR_MESSAGE: &str = "The server sent an unexpected response. Please try again.";
pub const SESSION_EXPIRED_MESSAGE: &str = "Your session has ended. Please sign in again.";
pub const STORAGE_ERROR_MESSAGE: &str = "The saved session could not be accessed on this device.";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Client-side input failure; never reaches the network.
    #[error("{0}")]
    Validation(String),
    #[error("authentication required")]
    AuthenticationRequired,
    #[error("server rejected request ({status}): {message}")]
    ServerRejected { status: u16, message: String },
    #[error("network unavailable: {0}")]
    NetworkUnavailable(String),
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    #[error("token storage failed: {0}")]
    Storage(String),
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        ApiError::Validation(msg.into())
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::AuthenticationRequired => "AUTHENTICATION_REQUIRED",
            ApiError::ServerRejected { .. } => "SERVER_REJECTED",
            ApiError::NetworkUnavailable(_) => "NETWORK_UNAVAILABLE",
            ApiError::MalformedResponse(_) => "MALFORMED_RESPONSE",
            ApiError::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// HTTP 401/403 from a protected endpoint.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, ApiError::ServerRejected { status, .. } if *status == 401 || *status == 403)
    }

    pub fn user_message(&self) -> String {
        match self {
            ApiError::Validation(msg) => msg.clone(),
            ApiError::ServerRejected { message, .. } => message.clone(),
            ApiError::AuthenticationRequired => SESSION_EXPIRED_MESSAGE.to_string(),
            ApiError::NetworkUnavailable(_) => NETWORK_UNAVAILABLE_MESSAGE.to_string(),
            ApiError::MalformedResponse(_) => SERVER_ERROR_MESSAGE.to_string(),
            ApiError::Storage(_) => STORAGE_ERROR_MESSAGE.to_string(),
        }
    }

    /// Translates the error into the single notification shown to the user.
    /// Validation failures are expected input mistakes and are not logged.
    pub fn surface(&self, action: &str) -> String {
        match self {
            ApiError::Validation(_) => {}
            ApiError::MalformedResponse(detail) => {
                tracing::error!(action, code = self.code(), detail = %detail, "unparseable server response");
            }
            _ => {
                tracing::warn!(action, code = self.code(), error = %self, "request failed");
            }
        }
        self.user_message()
    }
}

impl From<StorageError> for ApiError {
    fn from(error: StorageError) -> Self {
        ApiError::Storage(error.to_string())
    }
}

/// Error body returned by the API on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub title: String,
    /// Calendar date or full timestamp as sent by the server.
    pub date: String,
    #[serde(default)]
    pub time: String,
    pub teacher: Teacher,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, alias = "quizzes")]
    pub quiz_ids: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleResponse {
    #[serde(default)]
    pub schedule: Vec<Lesson>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LessonResponse {
    Wrapped { lesson: Lesson },
    Bare(Lesson),
}

impl LessonResponse {
    pub fn into_lesson(self) -> Lesson {
        match self {
            LessonResponse::Wrapped { lesson } | LessonResponse::Bare(lesson) => lesson,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AttendanceStatusResponse {
    pub attended: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MarkAttendanceResponse {
    pub attended: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest {
    pub feedback_text: String,
    pub rating: u8,
    pub is_anonymous: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedbackResponse {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QuizOption {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub question_text: String,
    pub options: Vec<QuizOption>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Quiz {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub lesson: Option<String>,
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum QuizResponse {
    Wrapped { quiz: Quiz },
    Bare(Quiz),
}

impl QuizResponse {
    pub fn into_quiz(self) -> Quiz {
        match self {
            QuizResponse::Wrapped { quiz } | QuizResponse::Bare(quiz) => quiz,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizAnswer {
    pub question_id: String,
    pub selected_option: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuizSubmission {
    pub answers: Vec<QuizAnswer>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuizSubmitResponse {
    pub score: u32,
}
