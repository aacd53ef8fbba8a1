//! Utility functions for the PDF uploader component.
//!
//! - **Submission**: packaging the selected file as `multipart/form-data`,
//!   posting it to the flashcard endpoint, and validating the reply into a
//!   deck. The request is raced against a timeout so a silent service does
//!   not leave the uploader spinning forever.
//! - **User feedback**: short-lived toast notifications for rejected files.

use futures_util::future::{select, Either};
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{FormData, HtmlElement};

use common::model::{parse_flashcards, Flashcard};
use common::upload::{PickedFile, UploadError};

use super::state::SelectedPdf;
use crate::config;

/// Multipart field the generation service reads the document from.
const PDF_FIELD: &str = "pdf";

/// Posts `file` to the upload endpoint and returns the validated deck.
///
/// Every failure mode (network, non-2xx status, unusable body, timeout) comes
/// back as an `UploadError`; nothing here panics or retries.
pub async fn submit_pdf(file: &SelectedPdf) -> Result<Vec<Flashcard>, UploadError> {
    let timeout_secs = config::upload_timeout_secs();
    let request = Box::pin(post_pdf(file));
    let timeout = Box::pin(TimeoutFuture::new(timeout_secs.saturating_mul(1000)));

    match select(request, timeout).await {
        Either::Left((outcome, _)) => outcome,
        Either::Right(_) => Err(UploadError::Timeout(timeout_secs)),
    }
}

async fn post_pdf(file: &SelectedPdf) -> Result<Vec<Flashcard>, UploadError> {
    let form = FormData::new().map_err(js_error)?;
    form.append_with_blob_and_filename(PDF_FIELD, &file.0, &file.name())
        .map_err(js_error)?;

    // The browser fills in the multipart boundary when the body is a FormData.
    let response = Request::post(config::UPLOAD_ENDPOINT)
        .body(form)
        .map_err(|err| UploadError::Network(err.to_string()))?
        .send()
        .await
        .map_err(|err| UploadError::Network(err.to_string()))?;

    let body = response
        .text()
        .await
        .map_err(|err| UploadError::Network(err.to_string()))?;

    if !response.ok() {
        return Err(UploadError::Status {
            status: response.status(),
            message: body.trim().to_string(),
        });
    }

    Ok(parse_flashcards(&body)?)
}

fn js_error(err: JsValue) -> UploadError {
    UploadError::Network(
        err.as_string()
            .unwrap_or_else(|| "browser refused to build the upload request".to_string()),
    )
}

/// Displays a temporary notification message at the bottom of the screen.
///
/// Creates and injects a styled `div` into the DOM and removes it again
/// after a few seconds.
pub fn show_toast(message: &str) {
    if let Some(window) = web_sys::window() {
        if let Some(document) = window.document() {
            if let (Ok(toast), Some(body)) = (document.create_element("div"), document.body()) {
                toast.set_text_content(Some(message));
                let html_toast: HtmlElement = toast.unchecked_into();
                let style = html_toast.style();
                style.set_property("position", "fixed").ok();
                style.set_property("bottom", "20px").ok();
                style.set_property("left", "50%").ok();
                style.set_property("transform", "translateX(-50%)").ok();
                style.set_property("background", "rgba(0, 0, 0, 0.8)").ok();
                style.set_property("color", "#fff").ok();
                style.set_property("padding", "10px 20px").ok();
                style.set_property("border-radius", "4px").ok();
                style.set_property("z-index", "10000").ok();

                if body.append_child(&html_toast).is_ok() {
                    wasm_bindgen_futures::spawn_local(async move {
                        TimeoutFuture::new(3000).await;
                        if let Some(parent) = html_toast.parent_node() {
                            parent.remove_child(&html_toast).ok();
                        }
                    });
                }
            }
        }
    }
}
