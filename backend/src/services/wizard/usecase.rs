use super::error::WizardError;
use crate::config::AppConfig;
use crate::services::data_sources::reference::read_reference_usecases;
use crate::wizard_controller::state::WizardsState;
use actix_web::{web, HttpResponse, Responder};
use common::model::wizard::UsecaseStep;
use common::requests::ConfirmUsecaseRequest;

/// `GET /api/wizard/{session_id}/usecase`: detected label and the reference
/// usecases to choose from.
pub(crate) async fn show(
    session_id: web::Path<String>,
    state: web::Data<WizardsState>,
    config: web::Data<AppConfig>,
) -> impl Responder {
    match usecase_step(&session_id, &state, &config).await {
        Ok(step) => HttpResponse::Ok().json(step),
        Err(e) => e.to_response(),
    }
}

/// `POST /api/wizard/{session_id}/usecase`: stores the user's usecase text.
pub(crate) async fn submit(
    session_id: web::Path<String>,
    state: web::Data<WizardsState>,
    req: web::Json<ConfirmUsecaseRequest>,
) -> impl Responder {
    let usecase_text = req.into_inner().usecase_text;
    match state
        .with_session(&session_id, |session| session.confirm_usecase(usecase_text))
        .await
    {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => e.to_response(),
    }
}

async fn usecase_step(
    session_id: &str,
    state: &WizardsState,
    config: &AppConfig,
) -> Result<UsecaseStep, WizardError> {
    let (detected_usecase, user_usecase) = state
        .with_session(session_id, |session| {
            (session.detected_usecase.clone(), session.user_usecase.clone())
        })
        .await?;

    // Read on every request so edits to the file show up without a restart.
    let reference_usecases = read_reference_usecases(&config.reference_csv);

    Ok(UsecaseStep {
        detected_usecase,
        reference_usecases,
        user_usecase,
    })
}
