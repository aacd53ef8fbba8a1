//! Relay between the browser uploader and the external flashcard generator.
//!
//! - `POST /upload-pdf`: expects a multipart form with a single `pdf` field.
//!   The file is checked for PDF type and the configured size limit, forwarded
//!   to the generator, and the generator's reply is validated before it is
//!   re-encoded as the deck JSON the frontend renders.
//!
//! Failures map onto status codes through `RelayError`: 400 for a bad form
//! or a non-PDF, 413 for an oversized file, 502 when the generator is down or
//! answers with something that is not a deck, 504 when it is too slow.

use actix_web::web::{post, resource};
use actix_web::Resource;

mod error;
mod generator;
mod process;

pub use generator::{FlashcardGenerator, HttpGenerator};

const API_PATH: &str = "/upload-pdf";

/// Per-request limits shared with the handler through `web::Data`.
#[derive(Debug, Clone, Copy)]
pub struct UploadLimits {
    pub max_bytes: usize,
}

pub fn configure_routes() -> Resource {
    resource(API_PATH).route(post().to(process::process))
}
