use crate::model::column_type::InferredType;
use serde::{Deserialize, Serialize};

/// Request payload for `POST /api/wizard/{session_id}/usecase`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmUsecaseRequest {
    #[serde(default)]
    pub usecase_text: String,
}

/// Request payload for `POST /api/wizard/{session_id}/columns`.
///
/// Headers without an entry keep their proposal unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmColumnsRequest {
    #[serde(default)]
    pub columns: Vec<ColumnEdit>,
}

/// The user's changes to one proposed column. `None` or blank text means
/// "keep the proposal"; `default_value` is the exception, where an explicit
/// empty string is a real value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnEdit {
    pub source_header: String,
    #[serde(default)]
    pub target_header: Option<String>,
    #[serde(default)]
    pub target_table: Option<String>,
    #[serde(default)]
    pub column_type: Option<InferredType>,
    #[serde(default)]
    pub default_value: Option<String>,
}
