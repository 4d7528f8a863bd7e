use crate::wizard_controller::state::WizardsState;
use actix_web::{web, HttpResponse, Responder};
use log::info;

/// `DELETE /api/wizard/{session_id}`: abandons the wizard and removes its
/// uploaded files.
pub(crate) async fn process(
    session_id: web::Path<String>,
    state: web::Data<WizardsState>,
) -> impl Responder {
    match state.remove(&session_id).await {
        Ok(_) => {
            info!("Wizard session {} cancelled", session_id);
            HttpResponse::NoContent().finish()
        }
        Err(e) => e.to_response(),
    }
}
