//! Shared domain for the PDF flashcard reviewer.
//!
//! - `model`: the `Flashcard` type, its JSON wire format and deck validation.
//! - `review`: the per-card review state machine driven by the Reviewer component.
//! - `upload`: the file selection / submission state machine driven by the Uploader.
//!
//! Nothing in here touches the browser or the network, so both the frontend
//! and the backend depend on it and the logic is tested natively.

pub mod model;
pub mod review;
pub mod upload;
