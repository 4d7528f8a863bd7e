//! Holds the short-lived state of every wizard in progress.
//!
//! Each upload opens a `WizardSession` keyed by a random session id. The
//! following steps (usecase, columns, confirmation) look the session up by
//! that id, and the session is removed again when the wizard is confirmed or
//! cancelled. Removing a session also deletes its upload folder, so nothing
//! outlives the wizard.
//!
//! - `WizardsState`: clonable, thread-safe map of sessions, injected into the
//!   Actix application as `web::Data` in `main.rs`. Sessions left idle for
//!   longer than the configured TTL are evicted and torn down, so abandoned
//!   wizards do not pile up.
//! - `WizardSession`: the per-wizard context (headers, column values, user
//!   input, generated proposals) and the rules for moving between steps.

use crate::config::DEFAULT_SESSION_TTL_SECS;
use crate::services::data_sources::csv::CatalogColumn;
use crate::services::wizard::error::WizardError;
use common::inference;
use common::model::mapping::{ColumnProposal, MappingDecision};
use common::model::wizard::WizardStage;
use common::requests::ColumnEdit;
use log::{debug, error, info};
use std::io::ErrorKind;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Label shown on the usecase step until real detection exists.
pub const DETECTED_USECASE: &str = "Business usecase that is detected";

/// A thread-safe, shareable container for all open wizard sessions.
#[derive(Clone)]
pub struct WizardsState {
    /// Session id to session. Writers are the step handlers and the
    /// eviction sweep.
    pub sessions: Arc<RwLock<HashMap<String, WizardSession>>>,
    /// Idle time after which a session is evicted.
    ttl: Duration,
}

impl Default for WizardsState {
    fn default() -> Self {
        Self::with_ttl(Duration::from_secs(DEFAULT_SESSION_TTL_SECS))
    }
}

impl WizardsState {
    #[cfg(test)]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub async fn insert(&self, session_id: String, session: WizardSession) {
        self.evict_expired().await;
        self.sessions.write().await.insert(session_id, session);
    }

    /// Runs `f` against the session while holding the write lock and marks
    /// the session as used.
    pub async fn with_session<R>(
        &self,
        session_id: &str,
        f: impl FnOnce(&mut WizardSession) -> R,
    ) -> Result<R, WizardError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(session_id)
            .ok_or_else(|| WizardError::SessionNotFound(session_id.to_string()))?;
        session.last_touched = Instant::now();
        Ok(f(session))
    }

    /// Takes the session out of the map and deletes its uploaded files.
    pub async fn remove(&self, session_id: &str) -> Result<WizardSession, WizardError> {
        let session = self
            .sessions
            .write()
            .await
            .remove(session_id)
            .ok_or_else(|| WizardError::SessionNotFound(session_id.to_string()))?;
        session.teardown();
        Ok(session)
    }

    /// Takes the session out of the map if its columns are confirmed.
    ///
    /// Check and removal happen under one write lock, so of several
    /// concurrent callers exactly one receives the session. A session that
    /// is not ready stays in place. The caller owns the teardown.
    pub async fn take_confirmed(&self, session_id: &str) -> Result<WizardSession, WizardError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get(session_id)
            .ok_or_else(|| WizardError::SessionNotFound(session_id.to_string()))?;
        session.require_stage(WizardStage::ColumnsConfirmed)?;
        sessions
            .remove(session_id)
            .ok_or_else(|| WizardError::SessionNotFound(session_id.to_string()))
    }

    /// Removes and tears down every session idle for longer than the TTL.
    /// Returns how many were evicted.
    pub async fn evict_expired(&self) -> usize {
        let expired: Vec<(String, WizardSession)> = {
            let mut sessions = self.sessions.write().await;
            let ids: Vec<String> = sessions
                .iter()
                .filter(|(_, s)| s.last_touched.elapsed() > self.ttl)
                .map(|(id, _)| id.clone())
                .collect();
            ids.into_iter()
                .filter_map(|id| sessions.remove(&id).map(|s| (id, s)))
                .collect()
        };

        for (id, session) in &expired {
            session.teardown();
            info!("Wizard session {} expired and was cleared", id);
        }
        expired.len()
    }

    #[cfg(test)]
    pub async fn contains(&self, session_id: &str) -> bool {
        self.sessions.read().await.contains_key(session_id)
    }
}

/// Everything one wizard remembers between steps.
#[derive(Debug)]
pub struct WizardSession {
    pub stage: WizardStage,
    /// Folder holding this session's uploaded files, removed on teardown.
    pub upload_dir: Option<PathBuf>,
    /// Unique headers with their values pooled across the uploaded files.
    pub columns: Vec<CatalogColumn>,
    pub detected_usecase: String,
    pub user_usecase: Option<String>,
    /// Last time a step handler used this session; drives eviction.
    pub last_touched: Instant,
    /// Generated on first request so the random suffixes stay stable.
    proposals: Option<Vec<ColumnProposal>>,
    /// User edits keyed by source header.
    edits: HashMap<String, ColumnEdit>,
}

impl WizardSession {
    pub fn new(columns: Vec<CatalogColumn>, upload_dir: Option<PathBuf>) -> Self {
        Self {
            stage: WizardStage::Uploaded,
            upload_dir,
            columns,
            detected_usecase: DETECTED_USECASE.to_string(),
            user_usecase: None,
            last_touched: Instant::now(),
            proposals: None,
            edits: HashMap::new(),
        }
    }

    pub fn confirm_usecase(&mut self, usecase_text: String) {
        self.user_usecase = Some(usecase_text);
        self.stage = self.stage.max(WizardStage::UsecaseConfirmed);
    }

    /// Column proposals, generated on first call and reused afterwards.
    pub fn proposals(&mut self) -> &[ColumnProposal] {
        self.ensure_proposals();
        self.proposals.as_deref().unwrap_or_default()
    }

    /// Stores the user's edits, replacing any earlier submission.
    ///
    /// Edits for headers that are not part of this session are ignored.
    pub fn confirm_columns(&mut self, edits: Vec<ColumnEdit>) {
        self.ensure_proposals();
        let known: Vec<&str> = self.columns.iter().map(|c| c.source.header.as_str()).collect();
        self.edits = edits
            .into_iter()
            .filter(|edit| known.contains(&edit.source_header.as_str()))
            .map(|edit| (edit.source_header.clone(), edit))
            .collect();
        self.stage = WizardStage::ColumnsConfirmed;
    }

    /// Final decisions, one per header in header order.
    pub fn decisions(&mut self) -> Result<Vec<MappingDecision>, WizardError> {
        self.require_stage(WizardStage::ColumnsConfirmed)?;
        self.ensure_proposals();
        let proposals = self.proposals.as_deref().unwrap_or_default();
        Ok(proposals
            .iter()
            .map(|p| p.decide(self.edits.get(&p.source_header)))
            .collect())
    }

    /// Deletes the session's upload folder. A folder that is already gone
    /// is not an error.
    pub fn teardown(&self) {
        if let Some(dir) = &self.upload_dir {
            if let Err(e) = std::fs::remove_dir_all(dir) {
                if e.kind() != ErrorKind::NotFound {
                    error!("Failed to remove upload folder {}: {}", dir.display(), e);
                }
            }
        }
    }

    fn require_stage(&self, required: WizardStage) -> Result<(), WizardError> {
        if self.stage < required {
            return Err(WizardError::StepNotReady { required });
        }
        Ok(())
    }

    fn ensure_proposals(&mut self) {
        if self.proposals.is_none() {
            self.proposals = Some(build_proposals(&self.columns));
        }
    }
}

fn build_proposals(columns: &[CatalogColumn]) -> Vec<ColumnProposal> {
    columns
        .iter()
        .map(|column| {
            let profile = inference::infer(column.values.as_slice());
            debug!(
                "Column '{}' from '{}' inferred as {} over {} values",
                column.source.header,
                column.source.file_name,
                profile.inferred_type,
                column.values.len()
            );
            ColumnProposal {
                source_header: column.source.header.clone(),
                source_file: column.source.file_name.clone(),
                target_header: format!("{}_{}", column.source.header, random_suffix()),
                target_table: column.source.file_name.clone(),
                profile,
            }
        })
        .collect()
}

/// Random three-digit number in `100..=999`.
pub fn random_suffix() -> u16 {
    100 + (Uuid::new_v4().as_u128() % 900) as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::model::column_type::InferredType;
    use common::model::csv::HeaderSource;

    fn column(header: &str, file: &str, values: &[&str]) -> CatalogColumn {
        CatalogColumn {
            source: HeaderSource {
                header: header.to_string(),
                file_name: file.to_string(),
            },
            values: values.iter().map(|v| v.to_string()).collect(),
        }
    }

    fn session() -> WizardSession {
        WizardSession::new(
            vec![
                column("id", "people.csv", &["1", "2"]),
                column("joined", "people.csv", &["2024-01-15", ""]),
                column("name", "people.csv", &["Alice", "Bob"]),
            ],
            None,
        )
    }

    #[test]
    fn suffix_is_three_digits() {
        for _ in 0..200 {
            let suffix = random_suffix();
            assert!((100..=999).contains(&suffix), "{suffix}");
        }
    }

    #[test]
    fn proposals_are_inferred_and_stable() {
        let mut session = session();
        let first = session.proposals().to_vec();
        let second = session.proposals().to_vec();
        assert_eq!(first, second);

        assert_eq!(first[0].profile.inferred_type, InferredType::Integer);
        assert_eq!(first[1].profile.inferred_type, InferredType::Date);
        assert_eq!(first[2].profile.inferred_type, InferredType::String);
        assert!(first[0].target_header.starts_with("id_"));
        assert_eq!(first[0].target_header.len(), "id_".len() + 3);
        assert_eq!(first[0].target_table, "people.csv");
    }

    #[test]
    fn decisions_require_confirmed_columns() {
        let mut session = session();
        session.confirm_usecase("Onboarding".to_string());
        assert!(matches!(
            session.decisions(),
            Err(WizardError::StepNotReady { .. })
        ));
    }

    #[test]
    fn decisions_apply_edits_in_header_order() {
        let mut session = session();
        let proposed = session.proposals()[0].target_header.clone();
        session.confirm_columns(vec![
            ColumnEdit {
                source_header: "name".to_string(),
                target_header: Some("full_name".to_string()),
                ..ColumnEdit::default()
            },
            ColumnEdit {
                source_header: "unknown".to_string(),
                target_table: Some("ignored".to_string()),
                ..ColumnEdit::default()
            },
        ]);

        let decisions = session.decisions().unwrap();
        let headers: Vec<_> = decisions.iter().map(|d| d.source_header.as_str()).collect();
        assert_eq!(headers, vec!["id", "joined", "name"]);
        assert_eq!(decisions[0].target_header, proposed);
        assert!(!decisions[0].header_modified);
        assert_eq!(decisions[2].target_header, "full_name");
        assert!(decisions[2].header_modified);
    }

    #[test]
    fn usecase_confirmation_does_not_rewind_stage() {
        let mut session = session();
        session.confirm_columns(Vec::new());
        session.confirm_usecase("Later".to_string());
        assert_eq!(session.stage, WizardStage::ColumnsConfirmed);
        assert_eq!(session.user_usecase.as_deref(), Some("Later"));
    }

    #[actix_web::test]
    async fn remove_tears_down_session_and_folder() {
        let dir = tempfile::tempdir().unwrap();
        let upload_dir = dir.path().join("session");
        std::fs::create_dir_all(&upload_dir).unwrap();
        std::fs::write(upload_dir.join("a.csv"), "x\n1\n").unwrap();

        let state = WizardsState::new();
        state
            .insert("abc".to_string(), WizardSession::new(Vec::new(), Some(upload_dir.clone())))
            .await;
        assert!(state.contains("abc").await);

        state.remove("abc").await.unwrap();
        assert!(!state.contains("abc").await);
        assert!(!upload_dir.exists());
        assert!(matches!(
            state.remove("abc").await,
            Err(WizardError::SessionNotFound(_))
        ));
    }

    #[actix_web::test]
    async fn idle_sessions_are_evicted_with_their_folder() {
        let dir = tempfile::tempdir().unwrap();
        let stale_dir = dir.path().join("stale");
        std::fs::create_dir_all(&stale_dir).unwrap();
        std::fs::write(stale_dir.join("a.csv"), "x\n1\n").unwrap();

        let state = WizardsState::with_ttl(Duration::from_secs(60));
        let mut stale = WizardSession::new(Vec::new(), Some(stale_dir.clone()));
        stale.last_touched = Instant::now()
            .checked_sub(Duration::from_secs(120))
            .unwrap();
        state.sessions.write().await.insert("stale".to_string(), stale);
        state
            .insert("fresh".to_string(), WizardSession::new(Vec::new(), None))
            .await;

        assert!(!state.contains("stale").await);
        assert!(state.contains("fresh").await);
        assert!(!stale_dir.exists());
        assert_eq!(state.evict_expired().await, 0);
    }

    #[actix_web::test]
    async fn using_a_session_keeps_it_alive() {
        let state = WizardsState::with_ttl(Duration::from_secs(60));
        let mut session = WizardSession::new(Vec::new(), None);
        session.last_touched = Instant::now()
            .checked_sub(Duration::from_secs(50))
            .unwrap();
        state.sessions.write().await.insert("s".to_string(), session);

        state.with_session("s", |_| ()).await.unwrap();
        let touched = state
            .with_session("s", |s| s.last_touched.elapsed())
            .await
            .unwrap();
        assert!(touched < Duration::from_secs(50));
        assert_eq!(state.evict_expired().await, 0);
    }

    #[actix_web::test]
    async fn take_confirmed_leaves_unready_sessions_in_place() {
        let state = WizardsState::new();
        state
            .insert("s".to_string(), WizardSession::new(Vec::new(), None))
            .await;
        assert!(matches!(
            state.take_confirmed("s").await,
            Err(WizardError::StepNotReady { .. })
        ));
        assert!(state.contains("s").await);

        state.with_session("s", |s| s.confirm_columns(Vec::new())).await.unwrap();
        assert!(state.take_confirmed("s").await.is_ok());
        assert!(matches!(
            state.take_confirmed("s").await,
            Err(WizardError::SessionNotFound(_))
        ));
    }

    #[actix_web::test]
    async fn unknown_session_is_reported() {
        let state = WizardsState::new();
        let result = state.with_session("missing", |s| s.stage).await;
        assert!(matches!(result, Err(WizardError::SessionNotFound(id)) if id == "missing"));
    }
}
