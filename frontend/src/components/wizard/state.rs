//! Component state for the column mapping wizard.
//!
//! The wizard moves forward through `Step`s; each step keeps the server data
//! it was rendered from so going back is never needed. `ColumnForm` mirrors
//! the inputs of one row in the columns table.

use common::model::column_type::InferredType;
use common::model::mapping::{ColumnProposal, ConfirmationSummary};
use common::model::wizard::{UploadSummary, UsecaseStep};
use yew::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Upload,
    Usecase,
    Columns,
    Done,
}

/// Current values of one row of the columns table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnForm {
    pub target_header: String,
    pub target_table: String,
    pub column_type: InferredType,
    pub default_value: String,
}

impl ColumnForm {
    pub fn from_proposal(proposal: &ColumnProposal) -> Self {
        Self {
            target_header: proposal.target_header.clone(),
            target_table: proposal.target_table.clone(),
            column_type: proposal.profile.inferred_type,
            default_value: proposal.profile.default_value.clone(),
        }
    }
}

pub struct WizardComponent {
    pub step: Step,

    /// True while a request is in flight; disables the step's buttons.
    pub busy: bool,

    /// Reference to the `<input type="file" multiple>` of the upload step.
    pub file_input_ref: NodeRef,

    pub upload: Option<UploadSummary>,
    pub usecase_step: Option<UsecaseStep>,
    pub usecase_text: String,

    /// Server proposals and the matching editable rows, index-aligned.
    pub proposals: Vec<ColumnProposal>,
    pub forms: Vec<ColumnForm>,

    pub summary: Option<ConfirmationSummary>,
}

impl WizardComponent {
    pub fn new() -> Self {
        Self {
            step: Step::Upload,
            busy: false,
            file_input_ref: NodeRef::default(),
            upload: None,
            usecase_step: None,
            usecase_text: String::new(),
            proposals: Vec::new(),
            forms: Vec::new(),
            summary: None,
        }
    }

    pub fn session_id(&self) -> Option<String> {
        self.upload.as_ref().map(|u| u.session_id.clone())
    }
}
