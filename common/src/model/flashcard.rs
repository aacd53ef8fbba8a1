//! The flashcard model and its JSON wire format.
//!
//! The generation service returns loosely typed objects where `answer` is
//! either a string or an array depending on `type`, and `options` is only
//! meaningful for choice questions. On the Rust side each card kind carries
//! exactly the fields it needs (`CardBody`), and the conversion from the wire
//! shape (`RawFlashcard`) is where the invariants are enforced:
//!
//! - choice cards have a non-empty list of options with unique ids;
//! - every answer id refers to one of those options;
//! - open cards carry a free-text answer and no options.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One selectable option of a choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub id: String,
    pub text: String,
}

/// The three kinds of flashcard, named as they appear on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionType {
    #[serde(rename = "SCQ")]
    SingleChoice,
    #[serde(rename = "MCQ")]
    MultipleChoice,
    #[serde(rename = "QA")]
    Open,
}

impl QuestionType {
    /// Short badge text shown on the card.
    pub fn label(self) -> &'static str {
        match self {
            QuestionType::SingleChoice => "SCQ",
            QuestionType::MultipleChoice => "MCQ",
            QuestionType::Open => "QA",
        }
    }

    pub fn is_choice(self) -> bool {
        !matches!(self, QuestionType::Open)
    }
}

/// Kind-specific content of a flashcard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardBody {
    SingleChoice {
        options: Vec<AnswerOption>,
        answer: String,
    },
    MultipleChoice {
        options: Vec<AnswerOption>,
        answer: BTreeSet<String>,
    },
    Open {
        answer: String,
    },
}

/// A reviewable unit: a prompt, its kind-specific body and an optional explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawFlashcard", into = "RawFlashcard")]
pub struct Flashcard {
    pub id: String,
    pub question: String,
    pub body: CardBody,
    pub explanation: Option<String>,
}

/// Reasons a wire object cannot become a `Flashcard`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlashcardError {
    #[error("flashcard is missing an id")]
    MissingId,
    #[error("flashcard `{id}` has an empty question")]
    EmptyQuestion { id: String },
    #[error("flashcard `{id}` needs at least one option")]
    MissingOptions { id: String },
    #[error("flashcard `{id}` lists option `{option}` more than once")]
    DuplicateOption { id: String, option: String },
    #[error("flashcard `{id}` answer references unknown option `{option}`")]
    UnknownOption { id: String, option: String },
    #[error("flashcard `{id}` answer must be {expected}")]
    AnswerShape { id: String, expected: &'static str },
}

impl Flashcard {
    pub fn question_type(&self) -> QuestionType {
        match self.body {
            CardBody::SingleChoice { .. } => QuestionType::SingleChoice,
            CardBody::MultipleChoice { .. } => QuestionType::MultipleChoice,
            CardBody::Open { .. } => QuestionType::Open,
        }
    }

    /// Options in display order. Open cards have none.
    pub fn options(&self) -> &[AnswerOption] {
        match &self.body {
            CardBody::SingleChoice { options, .. } | CardBody::MultipleChoice { options, .. } => {
                options.as_slice()
            }
            CardBody::Open { .. } => &[],
        }
    }

    pub fn has_option(&self, option_id: &str) -> bool {
        self.options().iter().any(|option| option.id == option_id)
    }

    pub fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref()
    }

    /// Free-text answer of an open card, shown for self-assessment.
    pub fn reference_answer(&self) -> Option<&str> {
        match &self.body {
            CardBody::Open { answer } => Some(answer.as_str()),
            _ => None,
        }
    }

    pub fn is_correct_option(&self, option_id: &str) -> bool {
        match &self.body {
            CardBody::SingleChoice { answer, .. } => answer == option_id,
            CardBody::MultipleChoice { answer, .. } => answer.contains(option_id),
            CardBody::Open { .. } => false,
        }
    }

    /// The options making up the correct answer, in display order.
    pub fn correct_options(&self) -> Vec<&AnswerOption> {
        self.options()
            .iter()
            .filter(|option| self.is_correct_option(&option.id))
            .collect()
    }

    /// Grades a selection against the answer.
    ///
    /// Returns `None` for open cards, which are self-assessed.
    pub fn grade(&self, selected: &BTreeSet<String>) -> Option<bool> {
        match &self.body {
            CardBody::SingleChoice { answer, .. } => {
                Some(selected.len() == 1 && selected.contains(answer))
            }
            CardBody::MultipleChoice { answer, .. } => Some(selected == answer),
            CardBody::Open { .. } => None,
        }
    }
}

/// Flashcard exactly as the generation service sends it.
#[derive(Debug, Serialize, Deserialize)]
struct RawFlashcard {
    id: RawId,
    question: String,
    #[serde(rename = "type")]
    question_type: QuestionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    options: Option<Vec<AnswerOption>>,
    answer: RawAnswer,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    explanation: Option<String>,
}

/// Generated decks sometimes number their cards instead of quoting the ids.
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(serde_json::Number),
}

impl RawId {
    fn into_string(self) -> String {
        match self {
            RawId::Text(text) => text,
            RawId::Number(number) => number.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum RawAnswer {
    One(String),
    Many(Vec<String>),
}

impl TryFrom<RawFlashcard> for Flashcard {
    type Error = FlashcardError;

    fn try_from(raw: RawFlashcard) -> Result<Self, Self::Error> {
        let id = raw.id.into_string();
        if id.trim().is_empty() {
            return Err(FlashcardError::MissingId);
        }
        if raw.question.trim().is_empty() {
            return Err(FlashcardError::EmptyQuestion { id });
        }

        let body = match raw.question_type {
            QuestionType::SingleChoice => {
                let options = checked_options(&id, raw.options)?;
                let answer = match raw.answer {
                    RawAnswer::One(answer) => answer,
                    RawAnswer::Many(mut answers) if answers.len() == 1 => answers.remove(0),
                    RawAnswer::Many(_) => {
                        return Err(FlashcardError::AnswerShape {
                            id,
                            expected: "a single option id",
                        });
                    }
                };
                ensure_known_option(&id, &options, &answer)?;
                CardBody::SingleChoice { options, answer }
            }
            QuestionType::MultipleChoice => {
                let options = checked_options(&id, raw.options)?;
                let answer: BTreeSet<String> = match raw.answer {
                    RawAnswer::One(answer) => BTreeSet::from([answer]),
                    RawAnswer::Many(answers) => answers.into_iter().collect(),
                };
                if answer.is_empty() {
                    return Err(FlashcardError::AnswerShape {
                        id,
                        expected: "a non-empty list of option ids",
                    });
                }
                for option in &answer {
                    ensure_known_option(&id, &options, option)?;
                }
                CardBody::MultipleChoice { options, answer }
            }
            QuestionType::Open => match raw.answer {
                RawAnswer::One(answer) => CardBody::Open { answer },
                RawAnswer::Many(_) => {
                    return Err(FlashcardError::AnswerShape {
                        id,
                        expected: "free text",
                    });
                }
            },
        };

        Ok(Flashcard {
            id,
            question: raw.question,
            body,
            explanation: raw.explanation.filter(|text| !text.trim().is_empty()),
        })
    }
}

impl From<Flashcard> for RawFlashcard {
    fn from(card: Flashcard) -> Self {
        let (question_type, options, answer) = match card.body {
            CardBody::SingleChoice { options, answer } => (
                QuestionType::SingleChoice,
                Some(options),
                RawAnswer::One(answer),
            ),
            CardBody::MultipleChoice { options, answer } => (
                QuestionType::MultipleChoice,
                Some(options),
                RawAnswer::Many(answer.into_iter().collect()),
            ),
            CardBody::Open { answer } => (QuestionType::Open, None, RawAnswer::One(answer)),
        };

        RawFlashcard {
            id: RawId::Text(card.id),
            question: card.question,
            question_type,
            options,
            answer,
            explanation: card.explanation,
        }
    }
}

fn checked_options(
    id: &str,
    options: Option<Vec<AnswerOption>>,
) -> Result<Vec<AnswerOption>, FlashcardError> {
    let options = options.unwrap_or_default();
    if options.is_empty() {
        return Err(FlashcardError::MissingOptions { id: id.to_string() });
    }

    let mut seen = HashSet::new();
    for option in &options {
        if !seen.insert(option.id.as_str()) {
            return Err(FlashcardError::DuplicateOption {
                id: id.to_string(),
                option: option.id.clone(),
            });
        }
    }
    Ok(options)
}

fn ensure_known_option(
    id: &str,
    options: &[AnswerOption],
    option_id: &str,
) -> Result<(), FlashcardError> {
    if options.iter().any(|option| option.id == option_id) {
        Ok(())
    } else {
        Err(FlashcardError::UnknownOption {
            id: id.to_string(),
            option: option_id.to_string(),
        })
    }
}
