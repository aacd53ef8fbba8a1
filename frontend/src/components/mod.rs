pub mod flashcards;
pub mod upload;
