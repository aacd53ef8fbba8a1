use actix_multipart::{Field, Multipart};
use actix_web::{web, HttpResponse};
use common::upload::PDF_MEDIA_TYPE;
use futures_util::StreamExt;
use log::{error, info, warn};
use uuid::Uuid;

use super::error::RelayError;
use super::generator::{FlashcardGenerator, PdfUpload};
use super::UploadLimits;

const FIELD_NAME: &str = "pdf";
const PDF_MAGIC: &[u8] = b"%PDF-";

/// Reads the `pdf` field, hands it to the generator and answers with the deck.
pub async fn process(
    payload: Multipart,
    generator: web::Data<dyn FlashcardGenerator>,
    limits: web::Data<UploadLimits>,
) -> Result<HttpResponse, RelayError> {
    let request_id = Uuid::new_v4();

    let pdf = read_pdf(payload, limits.max_bytes).await.map_err(|err| {
        warn!("[{}] rejected upload: {}", request_id, err);
        err
    })?;
    info!(
        "[{}] forwarding `{}` ({} bytes) to the generator",
        request_id,
        pdf.filename,
        pdf.bytes.len()
    );

    let cards = generator.generate(pdf).await.map_err(|err| {
        error!("[{}] generation failed: {}", request_id, err);
        err
    })?;
    info!("[{}] generated {} flashcards", request_id, cards.len());

    Ok(HttpResponse::Ok().json(cards))
}

/// Pulls the PDF out of the form. Other fields are drained and ignored.
async fn read_pdf(mut payload: Multipart, max_bytes: usize) -> Result<PdfUpload, RelayError> {
    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| RelayError::Multipart(e.to_string()))?;
        let name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()));

        if name.as_deref() != Some(FIELD_NAME) {
            drain(&mut field).await?;
            continue;
        }

        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename().map(|f| f.to_string()))
            .unwrap_or_default();
        let declared_pdf = field
            .content_type()
            .is_some_and(|mime| mime.essence_str() == PDF_MEDIA_TYPE)
            || filename.to_ascii_lowercase().ends_with(".pdf");
        if !declared_pdf {
            return Err(RelayError::NotPdf(filename));
        }

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| RelayError::Multipart(e.to_string()))?;
            if bytes.len() + chunk.len() > max_bytes {
                return Err(RelayError::TooLarge { limit: max_bytes });
            }
            bytes.extend_from_slice(&chunk);
        }
        if !bytes.starts_with(PDF_MAGIC) {
            return Err(RelayError::NotPdf(filename));
        }

        return Ok(PdfUpload { filename, bytes });
    }

    Err(RelayError::MissingField)
}

async fn drain(field: &mut Field) -> Result<(), RelayError> {
    while let Some(chunk) = field.next().await {
        chunk.map_err(|e| RelayError::Multipart(e.to_string()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use actix_web::http::{header, StatusCode};
    use actix_web::{test, App};
    use async_trait::async_trait;
    use common::model::{parse_flashcards, Flashcard};

    use super::super::configure_routes;
    use super::*;

    const BOUNDARY: &str = "flashcards-test-boundary";
    const DECK: &str = r#"[
        {"id": 1, "question": "Capital of France?", "type": "SCQ",
         "options": [{"id": "a", "text": "Paris"}, {"id": "b", "text": "Rome"}],
         "answer": "a"},
        {"id": "2", "question": "Define entropy.", "type": "QA",
         "answer": "A measure of disorder."}
    ]"#;

    /// Replays a canned generator outcome and remembers what it was given.
    struct StubGenerator {
        reply: fn() -> Result<Vec<Flashcard>, RelayError>,
        received: Mutex<Option<PdfUpload>>,
    }

    #[async_trait]
    impl FlashcardGenerator for StubGenerator {
        async fn generate(&self, pdf: PdfUpload) -> Result<Vec<Flashcard>, RelayError> {
            *self.received.lock().unwrap() = Some(pdf);
            (self.reply)()
        }
    }

    fn stub(reply: fn() -> Result<Vec<Flashcard>, RelayError>) -> Arc<StubGenerator> {
        Arc::new(StubGenerator {
            reply,
            received: Mutex::new(None),
        })
    }

    fn good_deck() -> Result<Vec<Flashcard>, RelayError> {
        Ok(parse_flashcards(DECK)?)
    }

    fn garbage_deck() -> Result<Vec<Flashcard>, RelayError> {
        Ok(parse_flashcards("this is not json")?)
    }

    fn form(field: &str, filename: &str, media_type: &str, content: &[u8]) -> Vec<u8> {
        let mut body = format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n\
             Content-Type: {media_type}\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    async fn post_form(generator: Arc<StubGenerator>, max_bytes: usize, body: Vec<u8>) -> (StatusCode, String) {
        let generator: Arc<dyn FlashcardGenerator> = generator;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::from(generator))
                .app_data(web::Data::new(UploadLimits { max_bytes }))
                .service(configure_routes()),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/upload-pdf")
            .insert_header((
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            ))
            .set_payload(body)
            .to_request();

        let resp = test::call_service(&app, req).await;
        let status = resp.status();
        let body = test::read_body(resp).await;
        (status, String::from_utf8_lossy(&body).into_owned())
    }

    #[actix_web::test]
    async fn relays_pdf_and_returns_the_deck() {
        let generator = stub(good_deck);
        let body = form("pdf", "notes.pdf", "application/pdf", b"%PDF-1.7 lecture notes");

        let (status, reply) = post_form(generator.clone(), 1024, body).await;

        assert_eq!(status, StatusCode::OK);
        let cards = parse_flashcards(&reply).unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].id, "1");
        assert_eq!(cards[1].reference_answer(), Some("A measure of disorder."));

        let received = generator.received.lock().unwrap().clone().unwrap();
        assert_eq!(received.filename, "notes.pdf");
        assert_eq!(received.bytes, b"%PDF-1.7 lecture notes");
    }

    #[actix_web::test]
    async fn rejects_files_that_are_not_pdf() {
        let generator = stub(good_deck);
        let body = form("pdf", "notes.txt", "text/plain", b"just text");

        let (status, reply) = post_form(generator.clone(), 1024, body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(reply.contains("notes.txt"));
        assert!(generator.received.lock().unwrap().is_none());
    }

    #[actix_web::test]
    async fn rejects_pdf_name_without_pdf_content() {
        let generator = stub(good_deck);
        let body = form("pdf", "fake.pdf", "application/pdf", b"GIF89a");

        let (status, _) = post_form(generator, 1024, body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn rejects_form_without_pdf_field() {
        let generator = stub(good_deck);
        let body = form("document", "notes.pdf", "application/pdf", b"%PDF-1.7");

        let (status, _) = post_form(generator.clone(), 1024, body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(generator.received.lock().unwrap().is_none());
    }

    #[actix_web::test]
    async fn rejects_oversized_pdf() {
        let generator = stub(good_deck);
        let mut content = b"%PDF-1.7 ".to_vec();
        content.resize(4096, b'x');
        let body = form("pdf", "big.pdf", "application/pdf", &content);

        let (status, _) = post_form(generator.clone(), 1024, body).await;

        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert!(generator.received.lock().unwrap().is_none());
    }

    #[actix_web::test]
    async fn invalid_generator_reply_is_bad_gateway() {
        let body = form("pdf", "notes.pdf", "application/pdf", b"%PDF-1.7");

        let (status, reply) = post_form(stub(garbage_deck), 1024, body).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(reply.contains("invalid deck"));
    }
}
