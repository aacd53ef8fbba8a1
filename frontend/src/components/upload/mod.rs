//! PDF uploader: root module wiring the Yew `Component` implementation with
//! submodules for state, update logic, view rendering, and helpers.
//!
//! Responsibilities
//! - Accept one PDF through drag-and-drop or the file picker.
//! - Post it to the flashcard endpoint and wait for the generated deck.
//! - Hand the deck to `FlashcardsComponent` once it arrives.
//!
//! The selection/loading rules themselves live in `common::upload::UploadState`;
//! this module only translates DOM events into messages and back.

use yew::prelude::*;

mod helpers;
mod messages;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use state::PdfUploadComponent;

impl Component for PdfUploadComponent {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        PdfUploadComponent::new()
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }
}
