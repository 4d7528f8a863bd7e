use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic type assigned to a CSV column by the inferencer.
///
/// Each variant carries a fixed default value that pre-fills the
/// confirmation form when the user does not supply one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InferredType {
    #[default]
    String,
    Integer,
    Float,
    Date,
    Boolean,
}

impl InferredType {
    /// Every variant, in the order the confirmation form lists them.
    pub const ALL: [InferredType; 5] = [
        InferredType::String,
        InferredType::Integer,
        InferredType::Float,
        InferredType::Date,
        InferredType::Boolean,
    ];

    /// The placeholder default proposed for a column of this type.
    pub fn default_value(self) -> &'static str {
        match self {
            InferredType::String => "",
            InferredType::Integer => "0",
            InferredType::Float => "0.0",
            InferredType::Date => "",
            InferredType::Boolean => "false",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            InferredType::String => "string",
            InferredType::Integer => "integer",
            InferredType::Float => "float",
            InferredType::Date => "date",
            InferredType::Boolean => "boolean",
        }
    }

    /// Parses the lowercase name produced by [`InferredType::as_str`].
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for InferredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
