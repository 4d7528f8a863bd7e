//! Helper functions for the wizard component.
//!
//! - **User Feedback**: temporary "toast" notifications for warnings and
//!   failed requests.
//! - **Form Diffing**: turning the edited table rows into the `ColumnEdit`
//!   list the backend expects, sending only values the user changed.

use common::model::mapping::ColumnProposal;
use common::requests::ColumnEdit;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use super::state::ColumnForm;

/// Displays a temporary notification message at the bottom of the screen.
///
/// The toast is a plain `div` appended to `<body>` and removed again after
/// a few seconds. Text is set with `set_text_content`, so server messages
/// that contain file names are never interpreted as HTML.
pub fn show_toast(message: &str) {
    if let Some(window) = web_sys::window() {
        if let Some(document) = window.document() {
            if let (Ok(toast), Some(body)) = (document.create_element("div"), document.body()) {
                toast.set_text_content(Some(message));
                let html_toast: HtmlElement = toast.unchecked_into();
                let style = html_toast.style();
                style.set_property("position", "fixed").ok();
                style.set_property("bottom", "20px").ok();
                style.set_property("left", "50%").ok();
                style.set_property("transform", "translateX(-50%)").ok();
                style.set_property("background", "rgba(0, 0, 0, 0.8)").ok();
                style.set_property("color", "#fff").ok();
                style.set_property("padding", "10px 20px").ok();
                style.set_property("border-radius", "4px").ok();
                style.set_property("z-index", "10000").ok();
                style.set_property("font-family", "Arial, sans-serif").ok();

                if body.append_child(&html_toast).is_ok() {
                    wasm_bindgen_futures::spawn_local(async move {
                        gloo_timers::future::TimeoutFuture::new(4000).await;
                        if let Some(parent) = html_toast.parent_node() {
                            parent.remove_child(&html_toast).ok();
                        }
                    });
                }
            }
        }
    }
}

/// Builds the edit list for `POST /columns`.
///
/// A field is sent only when it differs from the proposal; rows without
/// any change are left out entirely.
pub fn build_column_edits(proposals: &[ColumnProposal], forms: &[ColumnForm]) -> Vec<ColumnEdit> {
    proposals
        .iter()
        .zip(forms)
        .filter_map(|(proposal, form)| {
            let changed = |value: &str, proposed: &str| {
                (value.trim() != proposed).then(|| value.trim().to_string())
            };
            let column_type = (form.column_type != proposal.profile.inferred_type)
                .then_some(form.column_type);
            // A type override always carries the form's default.
            let default_value = (column_type.is_some()
                || form.default_value != proposal.profile.default_value)
                .then(|| form.default_value.clone());
            let edit = ColumnEdit {
                source_header: proposal.source_header.clone(),
                target_header: changed(&form.target_header, &proposal.target_header),
                target_table: changed(&form.target_table, &proposal.target_table),
                column_type,
                default_value,
            };
            let untouched = edit.target_header.is_none()
                && edit.target_table.is_none()
                && edit.column_type.is_none()
                && edit.default_value.is_none();
            (!untouched).then_some(edit)
        })
        .collect()
}
