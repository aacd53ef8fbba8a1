//! Flashcard reviewer: shows one card of the generated deck at a time.
//!
//! The component owns a `ReviewSession` built from its `cards` prop. The
//! session is rebuilt whenever the parent hands over a different deck, so no
//! selection or reveal state leaks from one deck to the next.

use std::rc::Rc;

use gloo_console as console;
use yew::prelude::*;

mod messages;
mod props;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use props::FlashcardsProps;
pub use state::FlashcardsComponent;

impl Component for FlashcardsComponent {
    type Message = Msg;
    type Properties = FlashcardsProps;

    fn create(ctx: &Context<Self>) -> Self {
        FlashcardsComponent::from_props(ctx.props())
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, msg)
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        if Rc::ptr_eq(&ctx.props().cards, &old_props.cards) {
            return false;
        }
        console::log!("Flashcard deck replaced, restarting review");
        *self = FlashcardsComponent::from_props(ctx.props());
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }
}
