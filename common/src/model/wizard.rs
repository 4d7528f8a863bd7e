use crate::model::csv::HeaderSource;
use serde::{Deserialize, Serialize};

/// Response of the upload step.
///
/// `session_id` keys every later wizard request. `warnings` carries the
/// per-file problems that did not abort the upload (skipped extensions,
/// unreadable files) so the UI can show them as notifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadSummary {
    pub session_id: String,
    /// Unique headers across all files, in first-seen order.
    pub headers: Vec<HeaderSource>,
    pub detected_usecase: String,
    pub warnings: Vec<String>,
}

/// One row of `reference.csv`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsecaseReference {
    pub business_usecase_name: String,
    pub database_name: String,
}

/// Data shown on the confirm-usecase step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsecaseStep {
    pub detected_usecase: String,
    pub reference_usecases: Vec<UsecaseReference>,
    /// Text already submitted for this session, if any.
    pub user_usecase: Option<String>,
}

/// How far a wizard session has progressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WizardStage {
    Uploaded,
    UsecaseConfirmed,
    ColumnsConfirmed,
}

/// JSON body of every failed wizard request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
