use super::repository::AttendanceRepository;
use crate::{
    api::ApiError,
    state::{ScreenScope, SessionGuard},
};

pub const DEFAULT_MARKED_MESSAGE: &str = "Your attendance has been recorded.";

/// Attendance for one (student, lesson) pair.
///
/// `Unknown` until the server answers; once `Present` it never goes back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AttendanceStatus {
    #[default]
    Unknown,
    Absent,
    Present,
}

impl AttendanceStatus {
    pub fn from_server(attended: bool) -> Self {
        if attended {
            AttendanceStatus::Present
        } else {
            AttendanceStatus::Absent
        }
    }

    pub fn is_present(self) -> bool {
        self == AttendanceStatus::Present
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkOutcome {
    /// Already present; nothing was sent.
    AlreadyPresent,
    /// The server confirmed; carries the confirmation text.
    Marked(String),
    /// The screen went away before the answer arrived.
    Discarded,
}

pub struct AttendanceViewModel {
    repo: AttendanceRepository,
    scope: ScreenScope,
    lesson_id: String,
    status: AttendanceStatus,
    pub submitting: bool,
    pub notice: Option<String>,
    pub error: Option<String>,
}

impl AttendanceViewModel {
    pub fn new(session: SessionGuard, lesson_id: impl Into<String>) -> Self {
        Self {
            repo: AttendanceRepository::new(session),
            scope: ScreenScope::new(),
            lesson_id: lesson_id.into(),
            status: AttendanceStatus::Unknown,
            submitting: false,
            notice: None,
            error: None,
        }
    }

    pub fn scope(&self) -> &ScreenScope {
        &self.scope
    }

    pub fn lesson_id(&self) -> &str {
        &self.lesson_id
    }

    pub fn status(&self) -> AttendanceStatus {
        self.status
    }

    /// The mark control is enabled only while a submission could change anything.
    pub fn can_mark(&self) -> bool {
        !self.submitting && !self.status.is_present()
    }

    /// Background refresh. Failures are logged, never shown, and leave the
    /// status where it was.
    pub async fn check_status(&mut self) {
        let result = self.repo.fetch_status(&self.lesson_id).await;
        if !self.scope.is_active() {
            return;
        }
        match result {
            Ok(response) => self.status = AttendanceStatus::from_server(response.attended),
            Err(err) => {
                tracing::warn!(lesson_id = %self.lesson_id, code = err.code(), error = %err, "attendance status check failed");
            }
        }
    }

    pub async fn mark_present(&mut self) -> Result<MarkOutcome, ApiError> {
        if self.status.is_present() {
            tracing::debug!(lesson_id = %self.lesson_id, "already present; not resubmitting");
            return Ok(MarkOutcome::AlreadyPresent);
        }
        if self.submitting {
            return Err(ApiError::validation("Attendance is already being recorded."));
        }

        self.submitting = true;
        self.error = None;
        let result = self.repo.mark_present(&self.lesson_id).await;
        if !self.scope.is_active() {
            return Ok(MarkOutcome::Discarded);
        }
        self.submitting = false;

        match result {
            Ok(response) => {
                if !response.attended {
                    tracing::warn!(lesson_id = %self.lesson_id, "server confirmed marking but reported attended=false");
                }
                self.status = AttendanceStatus::Present;
                let message = response
                    .message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_MARKED_MESSAGE.to_string());
                self.notice = Some(message.clone());
                Ok(MarkOutcome::Marked(message))
            }
            Err(err) => {
                self.error = Some(err.surface("mark attendance"));
                Err(err)
            }
        }
    }
}
