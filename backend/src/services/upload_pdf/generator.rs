//! Client side of the external flashcard generator.

use std::time::Duration;

use async_trait::async_trait;
use common::model::{parse_flashcards, Flashcard};
use common::upload::PDF_MEDIA_TYPE;
use reqwest::multipart::{Form, Part};
use reqwest::Client;

use super::error::RelayError;

/// A PDF received from the browser, already checked for type and size.
#[derive(Debug, Clone)]
pub struct PdfUpload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Turns a PDF into a validated deck.
#[async_trait]
pub trait FlashcardGenerator: Send + Sync {
    async fn generate(&self, pdf: PdfUpload) -> Result<Vec<Flashcard>, RelayError>;
}

/// Forwards the PDF as a multipart `pdf` field to the generator's HTTP endpoint.
pub struct HttpGenerator {
    client: Client,
    url: String,
}

impl HttpGenerator {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl FlashcardGenerator for HttpGenerator {
    async fn generate(&self, pdf: PdfUpload) -> Result<Vec<Flashcard>, RelayError> {
        let part = Part::bytes(pdf.bytes)
            .file_name(pdf.filename)
            .mime_str(PDF_MEDIA_TYPE)
            .map_err(|e| RelayError::Unreachable(e.to_string()))?;
        let form = Form::new().part("pdf", part);

        let response = self
            .client
            .post(&self.url)
            .multipart(form)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;
        if !status.is_success() {
            return Err(RelayError::GeneratorStatus {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(parse_flashcards(&body)?)
    }
}

fn transport_error(err: reqwest::Error) -> RelayError {
    if err.is_timeout() {
        RelayError::Timeout
    } else {
        RelayError::Unreachable(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::dev::ServerHandle;
    use actix_web::{web, App, HttpResponse, HttpServer};

    const DECK: &str = r#"[{"id": "1", "question": "2 + 2?", "type": "QA", "answer": "4"}]"#;

    /// Starts a throwaway generator on a free port and returns its upload URL.
    fn spawn_generator(status: u16, body: &'static str, delay: Duration) -> (String, ServerHandle) {
        let server = HttpServer::new(move || {
            App::new().route(
                "/upload-pdf",
                web::post().to(move || async move {
                    actix_web::rt::time::sleep(delay).await;
                    HttpResponse::build(
                        actix_web::http::StatusCode::from_u16(status).unwrap(),
                    )
                    .content_type("application/json")
                    .body(body)
                }),
            )
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .unwrap();
        let addr = server.addrs()[0];
        let running = server.run();
        let handle = running.handle();
        actix_web::rt::spawn(running);
        (format!("http://{}/upload-pdf", addr), handle)
    }

    fn sample_pdf() -> PdfUpload {
        PdfUpload {
            filename: "notes.pdf".into(),
            bytes: b"%PDF-1.4 sample".to_vec(),
        }
    }

    #[actix_web::test]
    async fn returns_the_generated_deck() {
        let (url, handle) = spawn_generator(200, DECK, Duration::ZERO);
        let generator = HttpGenerator::new(url, Duration::from_secs(5)).unwrap();

        let cards = generator.generate(sample_pdf()).await.unwrap();

        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].id, "1");
        handle.stop(false).await;
    }

    #[actix_web::test]
    async fn garbage_reply_is_an_invalid_deck() {
        let (url, handle) = spawn_generator(200, "<html>oops</html>", Duration::ZERO);
        let generator = HttpGenerator::new(url, Duration::from_secs(5)).unwrap();

        let err = generator.generate(sample_pdf()).await.unwrap_err();

        assert!(matches!(err, RelayError::InvalidDeck(_)));
        handle.stop(false).await;
    }

    #[actix_web::test]
    async fn error_status_is_passed_along() {
        let (url, handle) = spawn_generator(500, "model crashed", Duration::ZERO);
        let generator = HttpGenerator::new(url, Duration::from_secs(5)).unwrap();

        let err = generator.generate(sample_pdf()).await.unwrap_err();

        match err {
            RelayError::GeneratorStatus { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "model crashed");
            }
            other => panic!("unexpected error: {other}"),
        }
        handle.stop(false).await;
    }

    #[actix_web::test]
    async fn slow_generator_times_out() {
        let (url, handle) = spawn_generator(200, DECK, Duration::from_secs(3));
        let generator = HttpGenerator::new(url, Duration::from_millis(200)).unwrap();

        let err = generator.generate(sample_pdf()).await.unwrap_err();

        assert!(matches!(err, RelayError::Timeout));
        handle.stop(false).await;
    }
}
