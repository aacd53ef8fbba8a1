//! Review session: the state machine behind the Reviewer component.
//!
//! A session walks an immutable, non-empty deck one card at a time. Per card
//! it tracks which options the user picked, whether the back side is showing,
//! and whether the explanation is expanded. All three reset whenever the
//! current card changes.
//!
//! Every mutating method returns `true` when the state actually changed, so a
//! component can return it straight from its `update`.

use std::collections::BTreeSet;
use std::rc::Rc;

use thiserror::Error;

use crate::model::{Flashcard, QuestionType};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReviewError {
    #[error("cannot review an empty deck")]
    Empty,
}

/// Outcome shown on the back of a revealed choice card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Incorrect,
}

impl Verdict {
    pub fn label(self) -> &'static str {
        match self {
            Verdict::Correct => "Correct!",
            Verdict::Incorrect => "Incorrect",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReviewSession {
    cards: Rc<[Flashcard]>,
    current_index: usize,
    revealed: bool,
    selected: BTreeSet<String>,
    explanation_visible: bool,
}

impl ReviewSession {
    pub fn new(cards: impl Into<Rc<[Flashcard]>>) -> Result<Self, ReviewError> {
        let cards = cards.into();
        if cards.is_empty() {
            return Err(ReviewError::Empty);
        }
        Ok(Self {
            cards,
            current_index: 0,
            revealed: false,
            selected: BTreeSet::new(),
            explanation_visible: false,
        })
    }

    pub fn current(&self) -> &Flashcard {
        &self.cards[self.current_index]
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// 1-based position of the current card, for "Card i of n".
    pub fn position(&self) -> usize {
        self.current_index + 1
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn selected(&self) -> &BTreeSet<String> {
        &self.selected
    }

    pub fn is_selected(&self, option_id: &str) -> bool {
        self.selected.contains(option_id)
    }

    pub fn explanation_visible(&self) -> bool {
        self.explanation_visible
    }

    /// Picks an option on the current card.
    ///
    /// Single choice replaces the selection, multiple choice toggles the
    /// option. Open cards, unknown ids and revealed cards are left alone.
    pub fn select_option(&mut self, option_id: &str) -> bool {
        if self.revealed || !self.current().has_option(option_id) {
            return false;
        }

        match self.current().question_type() {
            QuestionType::SingleChoice => {
                if self.selected.len() == 1 && self.selected.contains(option_id) {
                    return false;
                }
                self.selected.clear();
                self.selected.insert(option_id.to_string());
            }
            QuestionType::MultipleChoice => {
                if !self.selected.remove(option_id) {
                    self.selected.insert(option_id.to_string());
                }
            }
            QuestionType::Open => return false,
        }
        true
    }

    /// Whether the "Check answer" control is enabled.
    pub fn can_check(&self) -> bool {
        self.current().question_type().is_choice() && !self.revealed && !self.selected.is_empty()
    }

    pub fn check_answer(&mut self) -> bool {
        if !self.can_check() {
            return false;
        }
        self.revealed = true;
        true
    }

    /// Turns an open card over. Choice cards only reveal through `check_answer`.
    pub fn flip(&mut self) -> bool {
        if self.current().question_type() != QuestionType::Open {
            return false;
        }
        self.revealed = !self.revealed;
        if !self.revealed {
            self.explanation_visible = false;
        }
        true
    }

    /// Correctness of the current selection, once a choice card is revealed.
    pub fn verdict(&self) -> Option<Verdict> {
        if !self.revealed {
            return None;
        }
        self.current()
            .grade(&self.selected)
            .map(|correct| if correct { Verdict::Correct } else { Verdict::Incorrect })
    }

    pub fn can_toggle_explanation(&self) -> bool {
        self.revealed && self.current().explanation().is_some()
    }

    pub fn toggle_explanation(&mut self) -> bool {
        if !self.can_toggle_explanation() {
            return false;
        }
        self.explanation_visible = !self.explanation_visible;
        true
    }

    pub fn has_next(&self) -> bool {
        self.current_index + 1 < self.cards.len()
    }

    pub fn has_previous(&self) -> bool {
        self.current_index > 0
    }

    pub fn next(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.move_to(self.current_index + 1);
        true
    }

    pub fn previous(&mut self) -> bool {
        if !self.has_previous() {
            return false;
        }
        self.move_to(self.current_index - 1);
        true
    }

    fn move_to(&mut self, index: usize) {
        self.current_index = index;
        self.revealed = false;
        self.selected.clear();
        self.explanation_visible = false;
    }
}
