use crate::wizard_controller::state::WizardsState;
use actix_web::{web, HttpResponse, Responder};
use common::requests::ConfirmColumnsRequest;

/// `GET /api/wizard/{session_id}/columns`: one proposal per unique header,
/// pre-filled with the inferred type and default.
pub(crate) async fn show(
    session_id: web::Path<String>,
    state: web::Data<WizardsState>,
) -> impl Responder {
    match state
        .with_session(&session_id, |session| session.proposals().to_vec())
        .await
    {
        Ok(proposals) => HttpResponse::Ok().json(proposals),
        Err(e) => e.to_response(),
    }
}

/// `POST /api/wizard/{session_id}/columns`: stores the user's edits.
pub(crate) async fn submit(
    session_id: web::Path<String>,
    state: web::Data<WizardsState>,
    req: web::Json<ConfirmColumnsRequest>,
) -> impl Responder {
    let edits = req.into_inner().columns;
    match state
        .with_session(&session_id, |session| session.confirm_columns(edits))
        .await
    {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => e.to_response(),
    }
}
