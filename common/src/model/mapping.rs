use crate::model::column_type::InferredType;
use crate::model::csv::ColumnProfile;
use crate::requests::ColumnEdit;
use serde::{Deserialize, Serialize};

/// What the confirm-columns step proposes for a single source header.
///
/// Proposals are generated once per wizard session. Every field except
/// `source_header` and `source_file` can be overridden by a `ColumnEdit`
/// before the final `MappingDecision` is produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnProposal {
    /// Header as it appears in the uploaded CSV.
    pub source_header: String,
    /// Sanitised name of the file that first contained the header.
    pub source_file: String,
    /// Suggested column name in the destination table.
    pub target_header: String,
    /// Suggested destination table. Defaults to the source file name.
    pub target_table: String,
    /// Type, default and example values inferred from the column data.
    pub profile: ColumnProfile,
}

impl ColumnProposal {
    /// Applies the user's edit on top of this proposal.
    ///
    /// Blank edit fields keep the proposed value, like an untouched form input.
    pub fn decide(&self, edit: Option<&ColumnEdit>) -> MappingDecision {
        let pick = |edited: Option<&String>, proposed: &str| -> String {
            edited
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .unwrap_or(proposed)
                .to_string()
        };

        let target_header = pick(edit.and_then(|e| e.target_header.as_ref()), &self.target_header);
        let target_table = pick(edit.and_then(|e| e.target_table.as_ref()), &self.target_table);
        let column_type = edit
            .and_then(|e| e.column_type)
            .unwrap_or(self.profile.inferred_type);
        // A type override without a default takes that type's default.
        let fallback_default = if column_type == self.profile.inferred_type {
            self.profile.default_value.as_str()
        } else {
            column_type.default_value()
        };
        let default_value = edit
            .and_then(|e| e.default_value.clone())
            .unwrap_or_else(|| fallback_default.to_string());

        MappingDecision {
            header_modified: target_header != self.target_header,
            source_header: self.source_header.clone(),
            source_file: self.source_file.clone(),
            proposed_header: self.target_header.clone(),
            target_header,
            target_table,
            column_type,
            default_value,
        }
    }
}

/// The user-confirmed mapping of one source column.
///
/// Produced when the wizard completes, logged once and returned to the
/// client; nothing keeps it afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingDecision {
    pub source_header: String,
    pub source_file: String,
    /// The header that was proposed before the user's edit.
    pub proposed_header: String,
    pub target_header: String,
    pub target_table: String,
    pub column_type: InferredType,
    pub default_value: String,
    /// True when `target_header` differs from `proposed_header`.
    pub header_modified: bool,
}

/// Returned once the wizard has been processed and its session cleared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmationSummary {
    pub usecase: Option<String>,
    pub decisions: Vec<MappingDecision>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proposal() -> ColumnProposal {
        ColumnProposal {
            source_header: "age".to_string(),
            source_file: "people.csv".to_string(),
            target_header: "age_417".to_string(),
            target_table: "people.csv".to_string(),
            profile: ColumnProfile::new(InferredType::Integer, vec!["31".to_string()]),
        }
    }

    #[test]
    fn no_edit_keeps_the_proposal() {
        let decision = proposal().decide(None);
        assert_eq!(decision.target_header, "age_417");
        assert_eq!(decision.target_table, "people.csv");
        assert_eq!(decision.column_type, InferredType::Integer);
        assert_eq!(decision.default_value, "0");
        assert!(!decision.header_modified);
    }

    #[test]
    fn blank_fields_are_not_edits() {
        let edit = ColumnEdit {
            source_header: "age".to_string(),
            target_header: Some("   ".to_string()),
            target_table: Some(String::new()),
            column_type: None,
            default_value: None,
        };
        let decision = proposal().decide(Some(&edit));
        assert_eq!(decision.target_header, "age_417");
        assert_eq!(decision.target_table, "people.csv");
        assert!(!decision.header_modified);
    }

    #[test]
    fn edits_override_every_field() {
        let edit = ColumnEdit {
            source_header: "age".to_string(),
            target_header: Some("person_age".to_string()),
            target_table: Some("persons".to_string()),
            column_type: Some(InferredType::Float),
            default_value: Some("18.0".to_string()),
        };
        let decision = proposal().decide(Some(&edit));
        assert_eq!(decision.target_header, "person_age");
        assert_eq!(decision.proposed_header, "age_417");
        assert_eq!(decision.target_table, "persons");
        assert_eq!(decision.column_type, InferredType::Float);
        assert_eq!(decision.default_value, "18.0");
        assert!(decision.header_modified);
    }

    #[test]
    fn type_override_brings_its_own_default() {
        let edit = ColumnEdit {
            source_header: "age".to_string(),
            column_type: Some(InferredType::Boolean),
            ..ColumnEdit::default()
        };
        let decision = proposal().decide(Some(&edit));
        assert_eq!(decision.column_type, InferredType::Boolean);
        assert_eq!(decision.default_value, "false");
    }

    #[test]
    fn explicit_empty_default_is_kept() {
        let edit = ColumnEdit {
            source_header: "age".to_string(),
            default_value: Some(String::new()),
            ..ColumnEdit::default()
        };
        assert_eq!(proposal().decide(Some(&edit)).default_value, "");
    }
}
