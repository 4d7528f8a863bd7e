//! Update function for the wizard component.
//!
//! Elm-style: receives the state, the `Context` and a `Msg`, mutates the
//! state and returns whether the view should re-render. Server calls run in
//! `spawn_local` and report back with a follow-up message; every failure
//! ends in `Msg::Failed`, which shows a toast and re-enables the buttons.

use common::requests::{ConfirmColumnsRequest, ConfirmUsecaseRequest};
use web_sys::{FormData, HtmlInputElement};
use yew::platform::spawn_local;
use yew::prelude::*;

use super::api;
use super::helpers::{build_column_edits, show_toast};
use super::messages::{ColumnField, Msg};
use super::state::{ColumnForm, Step, WizardComponent};

pub fn update(component: &mut WizardComponent, ctx: &Context<WizardComponent>, msg: Msg) -> bool {
    match msg {
        Msg::Upload => {
            let Some(form) = selected_files(component) else {
                show_toast("No files selected");
                return false;
            };
            component.busy = true;
            let link = ctx.link().clone();
            spawn_local(async move {
                match api::upload(form).await {
                    Ok(summary) => link.send_message(Msg::Uploaded(summary)),
                    Err(err) => link.send_message(Msg::Failed(err)),
                }
            });
            true
        }
        Msg::Uploaded(summary) => {
            for warning in &summary.warnings {
                show_toast(warning);
            }
            let session_id = summary.session_id.clone();
            component.upload = Some(summary);
            let link = ctx.link().clone();
            spawn_local(async move {
                match api::usecase(&session_id).await {
                    Ok(step) => link.send_message(Msg::UsecaseLoaded(step)),
                    Err(err) => link.send_message(Msg::Failed(err)),
                }
            });
            true
        }
        Msg::UsecaseLoaded(step) => {
            component.usecase_text = step.user_usecase.clone().unwrap_or_default();
            component.usecase_step = Some(step);
            component.step = Step::Usecase;
            component.busy = false;
            true
        }
        Msg::SetUsecaseText(text) => {
            component.usecase_text = text;
            false
        }
        Msg::SubmitUsecase => {
            let Some(session_id) = component.session_id() else {
                return false;
            };
            component.busy = true;
            let req = ConfirmUsecaseRequest {
                usecase_text: component.usecase_text.clone(),
            };
            let link = ctx.link().clone();
            spawn_local(async move {
                let result = match api::submit_usecase(&session_id, &req).await {
                    Ok(()) => api::columns(&session_id).await,
                    Err(err) => Err(err),
                };
                match result {
                    Ok(proposals) => link.send_message(Msg::ColumnsLoaded(proposals)),
                    Err(err) => link.send_message(Msg::Failed(err)),
                }
            });
            true
        }
        Msg::ColumnsLoaded(proposals) => {
            component.forms = proposals.iter().map(ColumnForm::from_proposal).collect();
            component.proposals = proposals;
            component.step = Step::Columns;
            component.busy = false;
            true
        }
        Msg::EditColumn(idx, field) => {
            let Some(form) = component.forms.get_mut(idx) else {
                return false;
            };
            match field {
                ColumnField::TargetHeader(value) => form.target_header = value,
                ColumnField::TargetTable(value) => form.target_table = value,
                ColumnField::ColumnType(column_type) => {
                    form.column_type = column_type;
                    form.default_value = column_type.default_value().to_string();
                }
                ColumnField::DefaultValue(value) => form.default_value = value,
            }
            true
        }
        Msg::SubmitColumns => {
            let Some(session_id) = component.session_id() else {
                return false;
            };
            component.busy = true;
            let req = ConfirmColumnsRequest {
                columns: build_column_edits(&component.proposals, &component.forms),
            };
            let link = ctx.link().clone();
            spawn_local(async move {
                let result = match api::submit_columns(&session_id, &req).await {
                    Ok(()) => api::confirm(&session_id).await,
                    Err(err) => Err(err),
                };
                match result {
                    Ok(summary) => link.send_message(Msg::Confirmed(summary)),
                    Err(err) => link.send_message(Msg::Failed(err)),
                }
            });
            true
        }
        Msg::Confirmed(summary) => {
            component.summary = Some(summary);
            component.step = Step::Done;
            component.busy = false;
            true
        }
        Msg::Cancel => {
            if let Some(session_id) = component.session_id() {
                spawn_local(async move {
                    if let Err(err) = api::cancel(&session_id).await {
                        gloo_console::warn!(format!("Cancel failed: {}", err));
                    }
                });
            }
            ctx.link().send_message(Msg::Reset);
            false
        }
        Msg::Reset => {
            *component = WizardComponent::new();
            true
        }
        Msg::Failed(err) => {
            gloo_console::error!(err.clone());
            show_toast(&err);
            component.busy = false;
            true
        }
    }
}

/// Collects the chosen files into a multipart form under the `files` field.
fn selected_files(component: &WizardComponent) -> Option<FormData> {
    let input = component.file_input_ref.cast::<HtmlInputElement>()?;
    let files = input.files()?;
    if files.length() == 0 {
        return None;
    }
    let form = FormData::new().ok()?;
    for idx in 0..files.length() {
        if let Some(file) = files.get(idx) {
            form.append_with_blob_and_filename("files", &file, &file.name())
                .ok()?;
        }
    }
    Some(form)
}
