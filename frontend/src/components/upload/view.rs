//! View rendering for the PDF uploader component.
//!
//! Three shapes depending on the state:
//! - deck available: delegate entirely to `FlashcardsComponent`;
//! - no file: the drop zone with a "browse" picker;
//! - file selected: its name and size, a remove button and the upload button,
//!   plus the last failure (if any) with a retry hint.

use common::upload::{format_file_size, PickedFile, UploadError};
use web_sys::{DragEvent, HtmlInputElement};
use yew::html::Scope;
use yew::prelude::*;

use super::messages::Msg;
use super::state::{PdfUploadComponent, SelectedPdf};
use crate::components::flashcards::FlashcardsComponent;

pub fn view(component: &PdfUploadComponent, ctx: &Context<PdfUploadComponent>) -> Html {
    if let Some(cards) = component.upload.flashcards() {
        return html! { <FlashcardsComponent cards={cards.clone()} /> };
    }

    let link = ctx.link();
    html! {
        <div class="upload-root">
            <div class="upload-card">
                <div class="upload-header">
                    <span class="material-icons">{"upload_file"}</span>
                    <h1>{"PDF Upload"}</h1>
                </div>
                {
                    match component.upload.file() {
                        Some(file) => build_selected_file(component, file, link),
                        None => build_drop_zone(component, link),
                    }
                }
                { build_error(component.upload.error()) }
            </div>
        </div>
    }
}

fn build_drop_zone(component: &PdfUploadComponent, link: &Scope<PdfUploadComponent>) -> Html {
    html! {
        <div
            class={classes!("drop-zone", component.upload.is_dragging().then_some("dragging"))}
            ondragover={link.callback(|e: DragEvent| {
                e.prevent_default();
                Msg::DragOver
            })}
            ondragleave={link.callback(|e: DragEvent| {
                e.prevent_default();
                Msg::DragLeave
            })}
            ondrop={link.callback(|e: DragEvent| {
                e.prevent_default();
                let file = e
                    .data_transfer()
                    .and_then(|transfer| transfer.files())
                    .and_then(|files| files.get(0));
                Msg::Dropped(file)
            })}
        >
            <span class="material-icons drop-icon">{"cloud_upload"}</span>
            <p>
                {"Drag and drop your PDF here, or "}
                <label class="browse-link">
                    {"browse"}
                    <input
                        type="file"
                        class="hidden"
                        accept=".pdf,application/pdf"
                        onchange={link.callback(|e: Event| {
                            let input: HtmlInputElement = e.target_unchecked_into();
                            let file = input.files().and_then(|files| files.get(0));
                            // Allow picking the same file again after a removal.
                            input.set_value("");
                            Msg::FileChosen(file)
                        })}
                    />
                </label>
            </p>
            <p class="hint">{"Only PDF files are supported"}</p>
        </div>
    }
}

fn build_selected_file(
    component: &PdfUploadComponent,
    file: &SelectedPdf,
    link: &Scope<PdfUploadComponent>,
) -> Html {
    let loading = component.upload.is_loading();

    html! {
        <div class="selected-file">
            <div class="file-row">
                <span class="material-icons">{"description"}</span>
                <div class="file-meta">
                    <p class="file-name">{ file.name() }</p>
                    <p class="file-size">{ format_file_size(file.size()) }</p>
                </div>
                <button
                    class="icon-btn"
                    title="Remove file"
                    onclick={link.callback(|_| Msg::RemoveFile)}
                >
                    <i class="material-icons">{"close"}</i>
                </button>
            </div>
            <button
                class={classes!("upload-btn", loading.then_some("loading"))}
                disabled={!component.upload.can_submit()}
                onclick={link.callback(|_| Msg::Submit)}
            >
                {
                    if loading {
                        html! { <span class="spinner"></span> }
                    } else {
                        html! { <span class="material-icons">{"upload"}</span> }
                    }
                }
                <span>{ if loading { "Uploading..." } else { "Upload PDF" } }</span>
            </button>
        </div>
    }
}

fn build_error(error: Option<&UploadError>) -> Html {
    match error {
        Some(err) => html! {
            <div class="upload-error" role="alert">
                <p>{ err.to_string() }</p>
                <p class="hint">{"Check the file and press Upload PDF to try again."}</p>
            </div>
        },
        None => html! {},
    }
}
