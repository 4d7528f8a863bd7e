//! Calls to the wizard endpoints under `/api/wizard`.
//!
//! Every function resolves to the decoded success body or to a message fit
//! for a toast. Error bodies are `ErrorBody` JSON; anything else is shown
//! as raw text.

use common::model::mapping::{ColumnProposal, ConfirmationSummary};
use common::model::wizard::{ErrorBody, UploadSummary, UsecaseStep};
use common::requests::{ConfirmColumnsRequest, ConfirmUsecaseRequest};
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use web_sys::FormData;

const API_PATH: &str = "/api/wizard";

pub async fn upload(form: FormData) -> Result<UploadSummary, String> {
    let request = Request::post(&format!("{}/upload", API_PATH))
        .body(form)
        .map_err(|e| e.to_string())?;
    decode(request.send().await.map_err(|e| e.to_string())?).await
}

pub async fn usecase(session_id: &str) -> Result<UsecaseStep, String> {
    let response = Request::get(&format!("{}/{}/usecase", API_PATH, session_id))
        .send()
        .await
        .map_err(|e| e.to_string())?;
    decode(response).await
}

pub async fn submit_usecase(session_id: &str, req: &ConfirmUsecaseRequest) -> Result<(), String> {
    let request = Request::post(&format!("{}/{}/usecase", API_PATH, session_id))
        .json(req)
        .map_err(|e| e.to_string())?;
    expect_success(request.send().await.map_err(|e| e.to_string())?).await
}

pub async fn columns(session_id: &str) -> Result<Vec<ColumnProposal>, String> {
    let response = Request::get(&format!("{}/{}/columns", API_PATH, session_id))
        .send()
        .await
        .map_err(|e| e.to_string())?;
    decode(response).await
}

pub async fn submit_columns(session_id: &str, req: &ConfirmColumnsRequest) -> Result<(), String> {
    let request = Request::post(&format!("{}/{}/columns", API_PATH, session_id))
        .json(req)
        .map_err(|e| e.to_string())?;
    expect_success(request.send().await.map_err(|e| e.to_string())?).await
}

pub async fn confirm(session_id: &str) -> Result<ConfirmationSummary, String> {
    let response = Request::post(&format!("{}/{}/confirm", API_PATH, session_id))
        .send()
        .await
        .map_err(|e| e.to_string())?;
    decode(response).await
}

pub async fn cancel(session_id: &str) -> Result<(), String> {
    let response = Request::delete(&format!("{}/{}", API_PATH, session_id))
        .send()
        .await
        .map_err(|e| e.to_string())?;
    expect_success(response).await
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, String> {
    if response.ok() {
        response.json::<T>().await.map_err(|e| e.to_string())
    } else {
        Err(error_message(response).await)
    }
}

async fn expect_success(response: Response) -> Result<(), String> {
    if response.ok() {
        Ok(())
    } else {
        Err(error_message(response).await)
    }
}

async fn error_message(response: Response) -> String {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    match serde_json::from_str::<ErrorBody>(&text) {
        Ok(body) => body.error,
        Err(_) if text.is_empty() => format!("Request failed with status {}", status),
        Err(_) => text,
    }
}
