//! Defines the properties for the `FlashcardsComponent`.

use std::rc::Rc;

use common::model::Flashcard;
use yew::prelude::*;

/// Properties for the `FlashcardsComponent`.
#[derive(Properties, PartialEq, Clone)]
pub struct FlashcardsProps {
    /// The deck to review, in display order.
    ///
    /// Shared with the uploader and never mutated. Passing a different deck
    /// restarts the review from the first card.
    pub cards: Rc<[Flashcard]>,
}
