//! The column mapping wizard API.
//!
//! A wizard starts with an upload, which opens a session, and walks through
//! the usecase and column steps before the final confirmation clears it.
//!
//! Routes, all under `/api/wizard`:
//! - `POST /upload`: multipart upload with one or more `files` parts. Saves
//!   the CSVs, aggregates their headers and returns an `UploadSummary`
//!   holding the new session id.
//! - `GET /{session_id}/usecase`, `POST /{session_id}/usecase`: show the
//!   detected usecase with the reference list, then store the user's text.
//! - `GET /{session_id}/columns`, `POST /{session_id}/columns`: show the
//!   column proposals (target name, table, inferred type and default), then
//!   store the user's edits.
//! - `POST /{session_id}/confirm`: log the final mapping and clear the session.
//! - `DELETE /{session_id}`: cancel the wizard.

use actix_web::web::{delete, get, post, scope};
use actix_web::Scope;

mod cancel;
mod columns;
mod confirm;
pub mod error;
mod upload;
mod usecase;

const API_PATH: &str = "/api/wizard";

/// Configures and returns the Actix scope for the wizard routes.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/upload", post().to(upload::process))
        .route("/{session_id}/usecase", get().to(usecase::show))
        .route("/{session_id}/usecase", post().to(usecase::submit))
        .route("/{session_id}/columns", get().to(columns::show))
        .route("/{session_id}/columns", post().to(columns::submit))
        .route("/{session_id}/confirm", post().to(confirm::process))
        .route("/{session_id}", delete().to(cancel::process))
}
