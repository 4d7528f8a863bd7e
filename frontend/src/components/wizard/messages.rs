use common::model::column_type::InferredType;
use common::model::mapping::{ColumnProposal, ConfirmationSummary};
use common::model::wizard::{UploadSummary, UsecaseStep};

#[derive(Clone)]
pub enum Msg {
    Upload,
    Uploaded(UploadSummary),
    UsecaseLoaded(UsecaseStep),
    SetUsecaseText(String),
    SubmitUsecase,
    ColumnsLoaded(Vec<ColumnProposal>),
    EditColumn(usize, ColumnField),
    SubmitColumns,
    Confirmed(ConfirmationSummary),
    Cancel,
    Reset,
    Failed(String),
}

/// One editable input of a row in the columns table.
#[derive(Clone)]
pub enum ColumnField {
    TargetHeader(String),
    TargetTable(String),
    ColumnType(InferredType),
    DefaultValue(String),
}
