//! Component state for the PDF uploader.
//!
//! The state is a thin shell around `UploadState`, parameterised over the
//! browser `File` handle through the `SelectedPdf` newtype.

use common::upload::{PickedFile, UploadState};

/// A file handed over by the picker or a drop, as seen by `UploadState`.
#[derive(Clone)]
pub struct SelectedPdf(pub web_sys::File);

impl PickedFile for SelectedPdf {
    fn name(&self) -> String {
        self.0.name()
    }

    fn size(&self) -> u64 {
        self.0.size() as u64
    }

    fn media_type(&self) -> String {
        self.0.type_()
    }
}

/// Main state container for the `PdfUploadComponent`.
pub struct PdfUploadComponent {
    /// Selected file, drag highlight and submission phase.
    pub upload: UploadState<SelectedPdf>,
}

impl PdfUploadComponent {
    pub fn new() -> Self {
        Self {
            upload: UploadState::new(),
        }
    }
}
