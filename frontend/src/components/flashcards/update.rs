//! Update function for the flashcard reviewer.
//!
//! Every message maps onto one `ReviewSession` transition; the session
//! reports whether anything changed, which doubles as the re-render flag.

use super::messages::Msg;
use super::state::FlashcardsComponent;

pub fn update(component: &mut FlashcardsComponent, msg: Msg) -> bool {
    let Some(session) = component.session.as_mut() else {
        return false;
    };

    match msg {
        Msg::SelectOption(option_id) => session.select_option(&option_id),
        Msg::CheckAnswer => session.check_answer(),
        Msg::FlipCard => session.flip(),
        Msg::ToggleExplanation => session.toggle_explanation(),
        Msg::Next => session.next(),
        Msg::Previous => session.previous(),
    }
}
