pub mod deck;
pub mod flashcard;

pub use deck::{parse_flashcards, DeckError};
pub use flashcard::{AnswerOption, CardBody, Flashcard, FlashcardError, QuestionType};
