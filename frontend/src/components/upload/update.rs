//! Update function for the PDF uploader component.
//!
//! Elm-style: receives the component state, the `Context` and a `Msg`,
//! mutates the state and returns whether the view should re-render.
//!
//! Key behaviors
//! - Drag highlight and drop/picker selection, with a toast for non-PDF files.
//! - A single submission at a time; the request runs in `spawn_local` and
//!   reports back through `Msg::Finished`.
//! - Failures are logged to the console and kept in the state so the view can
//!   offer a retry.

use gloo_console as console;
use yew::platform::spawn_local;
use yew::prelude::*;

use common::upload::UploadError;

use super::helpers::{show_toast, submit_pdf};
use super::messages::Msg;
use super::state::{PdfUploadComponent, SelectedPdf};

pub fn update(component: &mut PdfUploadComponent, ctx: &Context<PdfUploadComponent>, msg: Msg) -> bool {
    match msg {
        Msg::DragOver => component.upload.drag_over(),
        Msg::DragLeave => component.upload.drag_leave(),
        Msg::Dropped(file) => {
            if let Err(err) = component.upload.drop_file(file.map(SelectedPdf)) {
                reject_selection(&err);
            }
            true
        }
        Msg::FileChosen(Some(file)) => match component.upload.select(SelectedPdf(file)) {
            Ok(()) => true,
            Err(err) => {
                reject_selection(&err);
                false
            }
        },
        Msg::FileChosen(None) => false,
        Msg::RemoveFile => component.upload.remove(),
        Msg::Submit => {
            let file = match component.upload.begin_submit() {
                Ok(file) => file.clone(),
                Err(err) => {
                    console::warn!(format!("Upload not started: {}", err));
                    return false;
                }
            };

            let link = ctx.link().clone();
            spawn_local(async move {
                let outcome = submit_pdf(&file).await;
                link.send_message(Msg::Finished(outcome));
            });
            true
        }
        Msg::Finished(outcome) => {
            match &outcome {
                Ok(cards) => console::log!(format!("File uploaded successfully: {} flashcards", cards.len())),
                Err(err) => console::error!(format!("Error uploading file: {}", err)),
            }
            component.upload.finish(outcome)
        }
    }
}

fn reject_selection(err: &UploadError) {
    console::warn!(format!("File rejected: {}", err));
    if let UploadError::NotPdf(_) = err {
        show_toast("Only PDF files are supported.");
    }
}
