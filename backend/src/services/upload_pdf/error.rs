use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use common::model::DeckError;
use thiserror::Error;

/// Everything that can go wrong between the browser's form and the generator's deck.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RelayError {
    #[error("malformed multipart body: {0}")]
    Multipart(String),
    #[error("the form has no `pdf` field")]
    MissingField,
    #[error("`{0}` is not a PDF file")]
    NotPdf(String),
    #[error("the PDF is larger than {limit} bytes")]
    TooLarge { limit: usize },
    #[error("flashcard generator is unreachable: {0}")]
    Unreachable(String),
    #[error("flashcard generator answered {status}: {message}")]
    GeneratorStatus { status: u16, message: String },
    #[error("flashcard generator returned an invalid deck: {0}")]
    InvalidDeck(#[from] DeckError),
    #[error("flashcard generator did not answer in time")]
    Timeout,
}

impl ResponseError for RelayError {
    fn status_code(&self) -> StatusCode {
        match self {
            RelayError::Multipart(_) | RelayError::MissingField | RelayError::NotPdf(_) => {
                StatusCode::BAD_REQUEST
            }
            RelayError::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            RelayError::Unreachable(_)
            | RelayError::GeneratorStatus { .. }
            | RelayError::InvalidDeck(_) => StatusCode::BAD_GATEWAY,
            RelayError::Timeout => StatusCode::GATEWAY_TIMEOUT,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .content_type("text/plain; charset=utf-8")
            .body(self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::model::parse_flashcards;

    #[test]
    fn client_mistakes_are_bad_requests() {
        assert_eq!(RelayError::MissingField.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            RelayError::NotPdf("notes.txt".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            RelayError::TooLarge { limit: 10 }.status_code(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
    }

    #[test]
    fn generator_failures_are_gateway_errors() {
        let invalid = RelayError::from(parse_flashcards("[]").unwrap_err());

        assert_eq!(invalid.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            RelayError::GeneratorStatus {
                status: 500,
                message: "boom".into()
            }
            .status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(RelayError::Timeout.status_code(), StatusCode::GATEWAY_TIMEOUT);
    }
}
