use super::error::WizardError;
use crate::config::AppConfig;
use crate::services::data_sources::csv::{is_allowed_file, read_columns, secure_filename, HeaderCatalog};
use crate::wizard_controller::state::{WizardSession, WizardsState};
use actix_multipart::{Field, Multipart};
use actix_web::{web, HttpResponse, Responder};
use common::model::wizard::UploadSummary;
use futures_util::StreamExt;
use log::{info, warn};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Name of the multipart field carrying the CSV files.
const FILES_FIELD: &str = "files";

/// HTTP handler wrapper for `POST /api/wizard/upload`.
///
/// - On success: `200 OK` with the `UploadSummary` as JSON.
/// - On failure: the error's status with a JSON `{"error": ...}` body.
pub(crate) async fn process(
    payload: Multipart,
    state: web::Data<WizardsState>,
    config: web::Data<AppConfig>,
) -> impl Responder {
    match upload_files(payload, &state, &config).await {
        Ok(summary) => HttpResponse::Ok().json(summary),
        Err(e) => e.to_response(),
    }
}

/// Saves every uploaded CSV into a fresh session folder, reads their headers
/// and column values, and opens a wizard session for them.
///
/// Files that are skipped or unreadable produce warnings instead of failing
/// the upload. The upload fails only when no file was sent at all or none of
/// the files yielded a header.
pub async fn upload_files(
    mut payload: Multipart,
    state: &WizardsState,
    config: &AppConfig,
) -> Result<UploadSummary, WizardError> {
    let session_id = uuid::Uuid::new_v4().to_string();
    let session_dir = config.upload_dir.join(&session_id);
    fs::create_dir_all(&session_dir)?;

    let result = receive_files(&mut payload, &session_dir).await;
    let (received, mut warnings, saved) = match result {
        Ok(parts) => parts,
        Err(e) => {
            discard_folder(&session_dir);
            return Err(e);
        }
    };

    if received == 0 {
        discard_folder(&session_dir);
        return Err(WizardError::NoFilesSelected);
    }

    let mut catalog = HeaderCatalog::new();
    for file_name in &saved {
        match read_columns(&session_dir.join(file_name), config.sample_rows) {
            Ok(columns) => catalog.add_file(file_name, columns),
            Err(e) => {
                warn!("Error reading {}: {}", file_name, e);
                warnings.push(format!("Error reading {}: {}", file_name, e));
            }
        }
    }

    if catalog.is_empty() {
        discard_folder(&session_dir);
        return Err(WizardError::NoValidHeaders);
    }

    let headers = catalog.headers();
    let session = WizardSession::new(catalog.into_columns(), Some(session_dir));
    let detected_usecase = session.detected_usecase.clone();
    state.insert(session_id.clone(), session).await;
    info!(
        "Wizard session {} opened with {} file(s), {} unique header(s)",
        session_id,
        saved.len(),
        headers.len()
    );

    Ok(UploadSummary {
        session_id,
        headers,
        detected_usecase,
        warnings,
    })
}

/// Reads the multipart stream, writing accepted files to `dir`.
///
/// Returns how many named files were received, the warnings collected, and
/// the saved file names in upload order (each name once).
async fn receive_files(
    payload: &mut Multipart,
    dir: &Path,
) -> Result<(usize, Vec<String>, Vec<String>), WizardError> {
    let mut received = 0usize;
    let mut warnings = Vec::new();
    let mut saved: Vec<String> = Vec::new();

    while let Some(item) = payload.next().await {
        let mut field = item?;
        let field_name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()));
        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename().map(|f| f.to_string()))
            .unwrap_or_default();

        if field_name.as_deref() != Some(FILES_FIELD) || filename.is_empty() {
            drain(&mut field).await?;
            continue;
        }
        received += 1;

        if !is_allowed_file(&filename) {
            warn!("Skipping '{}': not a .csv file", filename);
            warnings.push(format!("Skipped {}: only .csv files are accepted", filename));
            drain(&mut field).await?;
            continue;
        }

        let safe_name = secure_filename(&filename);
        if safe_name.is_empty() {
            warn!("Skipping '{}': no usable file name", filename);
            warnings.push(format!("Skipped {}: invalid file name", filename));
            drain(&mut field).await?;
            continue;
        }

        save_field(&mut field, &dir.join(&safe_name)).await?;
        if !saved.contains(&safe_name) {
            saved.push(safe_name);
        }
    }

    Ok((received, warnings, saved))
}

async fn save_field(field: &mut Field, path: &Path) -> Result<(), WizardError> {
    let mut writer = BufWriter::new(File::create(path)?);
    while let Some(chunk) = field.next().await {
        writer.write_all(&chunk?)?;
    }
    writer.flush()?;
    Ok(())
}

async fn drain(field: &mut Field) -> Result<(), WizardError> {
    while let Some(chunk) = field.next().await {
        chunk?;
    }
    Ok(())
}

fn discard_folder(dir: &Path) {
    if let Err(e) = fs::remove_dir_all(dir) {
        warn!("Could not remove {}: {}", dir.display(), e);
    }
}
