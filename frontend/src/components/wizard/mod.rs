//! Column mapping wizard: root module wiring the Yew `Component`
//! implementation with submodules for state, update logic, view rendering,
//! API calls and helpers.
//!
//! The component holds no properties; all data comes from the
//! `/api/wizard` endpoints.

use yew::prelude::*;

mod api;
mod helpers;
mod messages;
mod state;
mod update;
mod view;

pub use messages::{ColumnField, Msg};
pub use state::WizardComponent;

impl Component for WizardComponent {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        WizardComponent::new()
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }
}
