//! Validation of a whole generated deck.

use std::collections::HashSet;

use thiserror::Error;

use super::flashcard::Flashcard;

#[derive(Debug, Error)]
pub enum DeckError {
    #[error("response is not valid JSON: {0}")]
    Json(#[source] serde_json::Error),
    #[error("response is not a list of flashcards")]
    NotAnArray,
    #[error("no flashcards were generated")]
    Empty,
    #[error("flashcard #{index} is invalid: {source}")]
    InvalidCard {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("flashcard id `{0}` is used more than once")]
    DuplicateId(String),
}

/// Parses and validates the generation service's response body.
///
/// The body must be a non-empty JSON array of flashcards with distinct ids.
/// Errors name the offending element so a broken deck can be reported
/// instead of rendered.
pub fn parse_flashcards(body: &str) -> Result<Vec<Flashcard>, DeckError> {
    let value: serde_json::Value = serde_json::from_str(body).map_err(DeckError::Json)?;
    let serde_json::Value::Array(items) = value else {
        return Err(DeckError::NotAnArray);
    };
    if items.is_empty() {
        return Err(DeckError::Empty);
    }

    let mut seen = HashSet::with_capacity(items.len());
    let mut cards = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let card: Flashcard = serde_json::from_value(item)
            .map_err(|source| DeckError::InvalidCard { index, source })?;
        if !seen.insert(card.id.clone()) {
            return Err(DeckError::DuplicateId(card.id));
        }
        cards.push(card);
    }
    Ok(cards)
}
