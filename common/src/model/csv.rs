use crate::model::column_type::InferredType;
use serde::{Deserialize, Serialize};

/// Result of running the inferencer over one CSV column.
///
/// Built on the backend while preparing the confirm-columns step and shipped
/// to the frontend inside each `ColumnProposal`, where it pre-fills the type
/// and default inputs. `sample_values` gives the user a few concrete values
/// so they can judge whether the inferred type is right.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct ColumnProfile {
    /// The type whose rule matched every non-blank value.
    pub inferred_type: InferredType,
    /// Default proposed for `inferred_type`.
    pub default_value: String,
    /// Up to the first three raw values of the column, untrimmed.
    pub sample_values: Vec<String>,
}

impl ColumnProfile {
    pub fn new(inferred_type: InferredType, sample_values: Vec<String>) -> Self {
        Self {
            inferred_type,
            default_value: inferred_type.default_value().to_string(),
            sample_values,
        }
    }
}

impl Default for ColumnProfile {
    fn default() -> Self {
        Self::new(InferredType::String, Vec::new())
    }
}

/// A header together with the uploaded file that first contained it.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct HeaderSource {
    pub header: String,
    pub file_name: String,
}
