//! View rendering for the column mapping wizard.
//!
//! One page per `Step`: file upload, usecase confirmation, the editable
//! columns table and the final summary. Every step after the upload offers a
//! "Cancel" button that clears the server session and starts over.

use common::model::column_type::InferredType;
use common::model::mapping::{ColumnProposal, ConfirmationSummary, MappingDecision};
use common::model::wizard::UsecaseStep;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::html::Scope;
use yew::prelude::*;

use super::messages::{ColumnField, Msg};
use super::state::{ColumnForm, Step, WizardComponent};

pub fn view(component: &WizardComponent, ctx: &Context<WizardComponent>) -> Html {
    let link = ctx.link();

    html! {
        <div class="wizard-root">
            <h1>{"CSV column wizard"}</h1>
            {
                match component.step {
                    Step::Upload => build_upload_step(component, link),
                    Step::Usecase => build_usecase_step(component, link),
                    Step::Columns => build_columns_step(component, link),
                    Step::Done => build_done_step(component, link),
                }
            }
        </div>
    }
}

fn build_upload_step(component: &WizardComponent, link: &Scope<WizardComponent>) -> Html {
    let onsubmit = link.callback(|e: SubmitEvent| {
        e.prevent_default();
        Msg::Upload
    });

    html! {
        <form class="wizard-step" {onsubmit}>
            <h2>{"1. Upload CSV files"}</h2>
            <input
                type="file"
                accept=".csv"
                multiple=true
                ref={component.file_input_ref.clone()}
            />
            <button type="submit" disabled={component.busy}>{"Upload"}</button>
        </form>
    }
}

fn build_usecase_step(component: &WizardComponent, link: &Scope<WizardComponent>) -> Html {
    let Some(step) = &component.usecase_step else {
        return html! {};
    };
    let oninput = link.callback(|e: InputEvent| {
        Msg::SetUsecaseText(e.target_unchecked_into::<HtmlInputElement>().value())
    });

    html! {
        <div class="wizard-step">
            <h2>{"2. Confirm the business usecase"}</h2>
            { build_uploaded_headers(component) }
            <p>
                <strong>{"Detected: "}</strong>
                { step.detected_usecase.clone() }
            </p>
            { build_reference_table(step) }
            <label>
                {"Usecase"}
                <input
                    type="text"
                    value={component.usecase_text.clone()}
                    placeholder={step.detected_usecase.clone()}
                    {oninput}
                />
            </label>
            <div class="wizard-actions">
                { cancel_button(component, link) }
                <button
                    disabled={component.busy}
                    onclick={link.callback(|_| Msg::SubmitUsecase)}
                >
                    {"Next"}
                </button>
            </div>
        </div>
    }
}

fn build_uploaded_headers(component: &WizardComponent) -> Html {
    let Some(upload) = &component.upload else {
        return html! {};
    };

    html! {
        <details class="uploaded-headers">
            <summary>{ format!("{} column(s) found", upload.headers.len()) }</summary>
            <ul>
                { for upload.headers.iter().map(|h| html! {
                    <li>{ format!("{} ({})", h.header, h.file_name) }</li>
                }) }
            </ul>
        </details>
    }
}

fn build_reference_table(step: &UsecaseStep) -> Html {
    if step.reference_usecases.is_empty() {
        return html! { <p class="muted">{"No reference usecases available."}</p> };
    }

    html! {
        <table class="reference-table">
            <thead>
                <tr>
                    <th>{"Business usecase"}</th>
                    <th>{"Database"}</th>
                </tr>
            </thead>
            <tbody>
                { for step.reference_usecases.iter().map(|r| html! {
                    <tr>
                        <td>{ r.business_usecase_name.clone() }</td>
                        <td>{ r.database_name.clone() }</td>
                    </tr>
                }) }
            </tbody>
        </table>
    }
}

fn build_columns_step(component: &WizardComponent, link: &Scope<WizardComponent>) -> Html {
    html! {
        <div class="wizard-step">
            <h2>{"3. Confirm the columns"}</h2>
            <table class="columns-table">
                <thead>
                    <tr>
                        <th>{"Source column"}</th>
                        <th>{"File"}</th>
                        <th>{"Target header"}</th>
                        <th>{"Target table"}</th>
                        <th>{"Type"}</th>
                        <th>{"Default"}</th>
                        <th>{"Samples"}</th>
                    </tr>
                </thead>
                <tbody>
                    { for component
                        .proposals
                        .iter()
                        .zip(component.forms.iter())
                        .enumerate()
                        .map(|(idx, (proposal, form))| build_column_row(idx, proposal, form, link)) }
                </tbody>
            </table>
            <div class="wizard-actions">
                { cancel_button(component, link) }
                <button
                    disabled={component.busy}
                    onclick={link.callback(|_| Msg::SubmitColumns)}
                >
                    {"Confirm"}
                </button>
            </div>
        </div>
    }
}

fn build_column_row(
    idx: usize,
    proposal: &ColumnProposal,
    form: &ColumnForm,
    link: &Scope<WizardComponent>,
) -> Html {
    let on_header = text_callback(link, idx, ColumnField::TargetHeader);
    let on_table = text_callback(link, idx, ColumnField::TargetTable);
    let on_default = text_callback(link, idx, ColumnField::DefaultValue);
    let on_type = link.batch_callback(move |e: Event| {
        let value = e.target_unchecked_into::<HtmlSelectElement>().value();
        InferredType::from_name(&value).map(|t| Msg::EditColumn(idx, ColumnField::ColumnType(t)))
    });

    html! {
        <tr>
            <td>{ proposal.source_header.clone() }</td>
            <td>{ proposal.source_file.clone() }</td>
            <td><input type="text" value={form.target_header.clone()} oninput={on_header} /></td>
            <td><input type="text" value={form.target_table.clone()} oninput={on_table} /></td>
            <td>
                <select onchange={on_type}>
                    { for InferredType::ALL.iter().map(|t| html! {
                        <option value={t.as_str()} selected={*t == form.column_type}>
                            { t.as_str() }
                        </option>
                    }) }
                </select>
            </td>
            <td><input type="text" value={form.default_value.clone()} oninput={on_default} /></td>
            <td class="samples">{ proposal.profile.sample_values.join(", ") }</td>
        </tr>
    }
}

/// Builds an `oninput` callback that sends the input's value as `field`.
fn text_callback(
    link: &Scope<WizardComponent>,
    idx: usize,
    field: fn(String) -> ColumnField,
) -> Callback<InputEvent> {
    link.callback(move |e: InputEvent| {
        Msg::EditColumn(idx, field(e.target_unchecked_into::<HtmlInputElement>().value()))
    })
}

fn build_done_step(component: &WizardComponent, link: &Scope<WizardComponent>) -> Html {
    let Some(summary) = &component.summary else {
        return html! {};
    };

    html! {
        <div class="wizard-step">
            <h2>{"Done"}</h2>
            { build_summary(summary) }
            <button onclick={link.callback(|_| Msg::Reset)}>{"Start over"}</button>
        </div>
    }
}

fn build_summary(summary: &ConfirmationSummary) -> Html {
    html! {
        <>
            {
                match &summary.usecase {
                    Some(usecase) => html! { <p><strong>{"Business usecase: "}</strong>{ usecase.clone() }</p> },
                    None => html! {},
                }
            }
            <ul class="decisions">
                { for summary.decisions.iter().map(build_decision) }
            </ul>
        </>
    }
}

fn build_decision(decision: &MappingDecision) -> Html {
    let header = if decision.header_modified {
        format!("{} -> {}", decision.proposed_header, decision.target_header)
    } else {
        format!("{} (unchanged)", decision.target_header)
    };

    html! {
        <li>
            <strong>{ format!("{} ({})", decision.source_header, decision.source_file) }</strong>
            { format!(
                ": table '{}', header {}, {} with default '{}'",
                decision.target_table, header, decision.column_type, decision.default_value
            ) }
        </li>
    }
}

fn cancel_button(component: &WizardComponent, link: &Scope<WizardComponent>) -> Html {
    html! {
        <button
            class="secondary"
            disabled={component.busy}
            onclick={link.callback(|_| Msg::Cancel)}
        >
            {"Cancel"}
        </button>
    }
}
