use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use common::model::wizard::{ErrorBody, WizardStage};
use thiserror::Error;

/// Failures a wizard request can end with.
///
/// Per-file upload problems are not errors: they become warnings on the
/// `UploadSummary`. Only conditions that stop the request land here.
#[derive(Debug, Error)]
pub enum WizardError {
    #[error("No files selected")]
    NoFilesSelected,

    #[error("No valid headers found in uploaded files")]
    NoValidHeaders,

    #[error("Wizard session '{0}' not found")]
    SessionNotFound(String),

    #[error("Wizard step not ready: {required:?} must be completed first")]
    StepNotReady { required: WizardStage },

    #[error("Invalid upload: {0}")]
    Multipart(#[from] actix_multipart::MultipartError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl WizardError {
    pub fn status(&self) -> StatusCode {
        match self {
            WizardError::NoFilesSelected | WizardError::NoValidHeaders => StatusCode::BAD_REQUEST,
            WizardError::Multipart(_) => StatusCode::BAD_REQUEST,
            WizardError::SessionNotFound(_) => StatusCode::NOT_FOUND,
            WizardError::StepNotReady { .. } => StatusCode::CONFLICT,
            WizardError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// JSON error body `{"error": "<message>"}` with the matching status.
    pub fn to_response(&self) -> HttpResponse {
        HttpResponse::build(self.status()).json(ErrorBody {
            error: self.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_match_the_failure() {
        assert_eq!(WizardError::NoFilesSelected.status(), StatusCode::BAD_REQUEST);
        assert_eq!(WizardError::NoValidHeaders.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            WizardError::SessionNotFound("x".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            WizardError::StepNotReady {
                required: WizardStage::ColumnsConfirmed
            }
            .status(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn messages_are_user_facing() {
        assert_eq!(
            WizardError::NoValidHeaders.to_string(),
            "No valid headers found in uploaded files"
        );
    }
}
