//! Final step of the wizard.
//!
//! Builds the mapping decisions from the session's proposals and the user's
//! edits, writes them to the log as a `USER CHANGES` block, clears the
//! session and returns the decisions so the client can show a summary.
//! No migration runs and nothing is persisted; the log is the only output.

use super::error::WizardError;
use crate::wizard_controller::state::WizardsState;
use actix_web::{web, HttpResponse, Responder};
use common::model::mapping::{ConfirmationSummary, MappingDecision};
use log::info;

/// `POST /api/wizard/{session_id}/confirm`.
///
/// - `200 OK` with the `ConfirmationSummary`.
/// - `404` for an unknown (or already confirmed) session.
/// - `409` when the columns step has not been submitted yet.
pub(crate) async fn process(
    session_id: web::Path<String>,
    state: web::Data<WizardsState>,
) -> impl Responder {
    match process_confirmation(&session_id, &state).await {
        Ok(summary) => HttpResponse::Ok().json(summary),
        Err(e) => e.to_response(),
    }
}

pub async fn process_confirmation(
    session_id: &str,
    state: &WizardsState,
) -> Result<ConfirmationSummary, WizardError> {
    let mut session = state.take_confirmed(session_id).await?;
    let decisions = session.decisions();
    session.teardown();
    let decisions = decisions?;
    let usecase = session.user_usecase.take();

    for line in render_changes(usecase.as_deref(), &decisions) {
        info!("{}", line);
    }
    info!("Wizard session {} completed and cleared", session_id);

    Ok(ConfirmationSummary { usecase, decisions })
}

/// Lines of the `USER CHANGES` log block.
fn render_changes(usecase: Option<&str>, decisions: &[MappingDecision]) -> Vec<String> {
    let mut lines = vec!["=== USER CHANGES ===".to_string()];
    if let Some(usecase) = usecase {
        lines.push(format!("Business usecase: '{}'", usecase));
    }
    for d in decisions {
        lines.push(format!(
            "Column '{}' from file '{}':",
            d.source_header, d.source_file
        ));
        lines.push(format!("  - Table Name: '{}'", d.target_table));
        if d.header_modified {
            lines.push(format!(
                "  - Modified Header: '{}' -> '{}'",
                d.proposed_header, d.target_header
            ));
        } else {
            lines.push(format!(
                "  - Modified Header: No changes (kept as '{}')",
                d.proposed_header
            ));
        }
        lines.push(format!(
            "  - Type: {} (default '{}')",
            d.column_type, d.default_value
        ));
    }
    lines.push("===================".to_string());
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::data_sources::csv::CatalogColumn;
    use crate::wizard_controller::state::WizardSession;
    use common::model::column_type::InferredType;
    use common::model::csv::HeaderSource;
    use common::requests::ColumnEdit;
    use futures_util::{join, poll};
    use std::pin::pin;

    fn decision(modified: bool) -> MappingDecision {
        MappingDecision {
            source_header: "age".to_string(),
            source_file: "people.csv".to_string(),
            proposed_header: "age_512".to_string(),
            target_header: if modified { "years" } else { "age_512" }.to_string(),
            target_table: "persons".to_string(),
            column_type: InferredType::Integer,
            default_value: "0".to_string(),
            header_modified: modified,
        }
    }

    #[test]
    fn renders_modified_header() {
        let lines = render_changes(Some("Onboarding"), &[decision(true)]);
        assert_eq!(
            lines,
            vec![
                "=== USER CHANGES ===",
                "Business usecase: 'Onboarding'",
                "Column 'age' from file 'people.csv':",
                "  - Table Name: 'persons'",
                "  - Modified Header: 'age_512' -> 'years'",
                "  - Type: integer (default '0')",
                "===================",
            ]
        );
    }

    #[test]
    fn renders_unchanged_header() {
        let lines = render_changes(None, &[decision(false)]);
        assert!(lines.contains(&"  - Modified Header: No changes (kept as 'age_512')".to_string()));
        assert!(!lines.iter().any(|l| l.starts_with("Business usecase")));
    }

    async fn confirmed_state() -> WizardsState {
        let state = WizardsState::new();
        let mut session = WizardSession::new(
            vec![CatalogColumn {
                source: HeaderSource {
                    header: "age".to_string(),
                    file_name: "people.csv".to_string(),
                },
                values: vec!["41".to_string()],
            }],
            None,
        );
        session.confirm_columns(Vec::new());
        state.insert("s".to_string(), session).await;
        state
    }

    #[actix_web::test]
    async fn concurrent_confirms_succeed_once() {
        let state = confirmed_state().await;

        // Both confirmations queue on the lock before either runs.
        let guard = state.sessions.read().await;
        let mut first = pin!(process_confirmation("s", &state));
        let mut second = pin!(process_confirmation("s", &state));
        assert!(poll!(first.as_mut()).is_pending());
        assert!(poll!(second.as_mut()).is_pending());
        drop(guard);

        let (first, second) = join!(first, second);
        assert_eq!(first.unwrap().decisions.len(), 1);
        assert!(matches!(second, Err(WizardError::SessionNotFound(_))));
    }

    #[actix_web::test]
    async fn edits_racing_a_confirmation_are_not_acknowledged() {
        let state = confirmed_state().await;

        let guard = state.sessions.read().await;
        let mut confirm = pin!(process_confirmation("s", &state));
        let mut edit = pin!(state.with_session("s", |session| {
            session.confirm_columns(vec![ColumnEdit {
                source_header: "age".to_string(),
                target_header: Some("years".to_string()),
                ..ColumnEdit::default()
            }])
        }));
        assert!(poll!(confirm.as_mut()).is_pending());
        assert!(poll!(edit.as_mut()).is_pending());
        drop(guard);

        let (confirm, edit) = join!(confirm, edit);
        let summary = confirm.unwrap();
        assert_ne!(summary.decisions[0].target_header, "years");
        assert!(matches!(edit, Err(WizardError::SessionNotFound(_))));
    }

    #[actix_web::test]
    async fn unready_session_survives_a_confirm() {
        let state = WizardsState::new();
        state
            .insert("s".to_string(), WizardSession::new(Vec::new(), None))
            .await;
        assert!(matches!(
            process_confirmation("s", &state).await,
            Err(WizardError::StepNotReady { .. })
        ));
        assert!(state.contains("s").await);
    }
}
