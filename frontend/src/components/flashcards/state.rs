use gloo_console as console;

use common::review::ReviewSession;

use super::props::FlashcardsProps;

pub struct FlashcardsComponent {
    /// `None` only when the parent passed an empty deck.
    pub session: Option<ReviewSession>,
}

impl FlashcardsComponent {
    pub fn from_props(props: &FlashcardsProps) -> Self {
        let session = match ReviewSession::new(props.cards.clone()) {
            Ok(session) => Some(session),
            Err(err) => {
                console::warn!(format!("Nothing to review: {}", err));
                None
            }
        };
        Self { session }
    }
}
