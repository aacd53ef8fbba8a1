//! Upload state: the state machine behind the Uploader component.
//!
//! The browser's file handle is abstracted behind [`PickedFile`] so this
//! module stays free of `web-sys` and can be exercised natively.
//!
//! Phases:
//!
//! ```text
//! Idle ──submit──▶ Loading ──finish(Ok)──▶ Ready(cards)
//!   ▲                 │
//!   │            finish(Err)
//!   │                 ▼
//!   └──────────── Failed(error) ──submit──▶ Loading
//! ```
//!
//! `Loading` is the single-flight guard: a second submit is refused until the
//! outstanding one finishes. `Ready` is terminal for the uploader.

use std::rc::Rc;

use thiserror::Error;

use crate::model::{DeckError, Flashcard};

pub const PDF_MEDIA_TYPE: &str = "application/pdf";

/// Metadata the uploader needs from a user-picked file.
pub trait PickedFile {
    fn name(&self) -> String;
    fn size(&self) -> u64;
    fn media_type(&self) -> String;

    fn is_pdf(&self) -> bool {
        self.media_type() == PDF_MEDIA_TYPE
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("only PDF files are supported (got `{0}`)")]
    NotPdf(String),
    #[error("select a PDF file first")]
    NoFile,
    #[error("an upload is already in progress")]
    InFlight,
    #[error("flashcards have already been generated")]
    AlreadyLoaded,
    #[error("could not reach the flashcard service: {0}")]
    Network(String),
    #[error("flashcard service answered with status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("flashcard service sent an unusable response: {0}")]
    Malformed(String),
    #[error("flashcard service did not answer within {0} seconds")]
    Timeout(u32),
}

impl From<DeckError> for UploadError {
    fn from(err: DeckError) -> Self {
        UploadError::Malformed(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UploadPhase {
    Idle,
    Loading,
    Failed(UploadError),
    Ready(Rc<[Flashcard]>),
}

#[derive(Debug)]
pub struct UploadState<F> {
    file: Option<F>,
    dragging: bool,
    phase: UploadPhase,
}

impl<F> Default for UploadState<F> {
    fn default() -> Self {
        Self {
            file: None,
            dragging: false,
            phase: UploadPhase::Idle,
        }
    }
}

impl<F: PickedFile> UploadState<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(&self) -> Option<&F> {
        self.file.as_ref()
    }

    pub fn phase(&self) -> &UploadPhase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, UploadPhase::Loading)
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn error(&self) -> Option<&UploadError> {
        match &self.phase {
            UploadPhase::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// The generated deck, once available.
    pub fn flashcards(&self) -> Option<&Rc<[Flashcard]>> {
        match &self.phase {
            UploadPhase::Ready(cards) => Some(cards),
            _ => None,
        }
    }

    /// Whether the submit control should be enabled.
    pub fn can_submit(&self) -> bool {
        self.file.is_some() && matches!(self.phase, UploadPhase::Idle | UploadPhase::Failed(_))
    }

    /// Stores `file` as the selection, replacing any previous one.
    ///
    /// Non-PDF files are refused and leave the current selection untouched.
    /// A selection made while a submission is in flight is kept for the next
    /// submit; the request already owns its copy of the earlier file.
    pub fn select(&mut self, file: F) -> Result<(), UploadError> {
        if matches!(self.phase, UploadPhase::Ready(_)) {
            return Err(UploadError::AlreadyLoaded);
        }
        if !file.is_pdf() {
            return Err(UploadError::NotPdf(file.media_type()));
        }
        self.file = Some(file);
        if matches!(self.phase, UploadPhase::Failed(_)) {
            self.phase = UploadPhase::Idle;
        }
        Ok(())
    }

    /// Clears the selection. Returns `false` when there was nothing to clear.
    pub fn remove(&mut self) -> bool {
        self.file.take().is_some()
    }

    pub fn drag_over(&mut self) -> bool {
        !std::mem::replace(&mut self.dragging, true)
    }

    pub fn drag_leave(&mut self) -> bool {
        std::mem::replace(&mut self.dragging, false)
    }

    /// Ends a drag gesture and selects the first dropped file, if any.
    pub fn drop_file(&mut self, file: Option<F>) -> Result<(), UploadError> {
        self.dragging = false;
        match file {
            Some(file) => self.select(file),
            None => Ok(()),
        }
    }

    /// Enters `Loading` and hands back the file to send.
    pub fn begin_submit(&mut self) -> Result<&F, UploadError> {
        self.ensure_editable()?;
        let Some(file) = self.file.as_ref() else {
            return Err(UploadError::NoFile);
        };
        self.phase = UploadPhase::Loading;
        Ok(file)
    }

    /// Records the outcome of the in-flight submission.
    ///
    /// Outcomes arriving while no submission is outstanding are dropped and
    /// `false` is returned.
    pub fn finish(&mut self, outcome: Result<Vec<Flashcard>, UploadError>) -> bool {
        if !self.is_loading() {
            return false;
        }
        self.phase = match outcome {
            Ok(cards) if cards.is_empty() => UploadPhase::Failed(DeckError::Empty.into()),
            Ok(cards) => UploadPhase::Ready(cards.into()),
            Err(err) => UploadPhase::Failed(err),
        };
        true
    }

    fn ensure_editable(&self) -> Result<(), UploadError> {
        match self.phase {
            UploadPhase::Loading => Err(UploadError::InFlight),
            UploadPhase::Ready(_) => Err(UploadError::AlreadyLoaded),
            UploadPhase::Idle | UploadPhase::Failed(_) => Ok(()),
        }
    }
}

/// Human readable size in megabytes, e.g. `"1.50 MB"`.
pub fn format_file_size(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / 1024.0 / 1024.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::parse_flashcards;

    #[derive(Debug, Clone, PartialEq)]
    struct FakeFile {
        name: &'static str,
        media_type: &'static str,
    }

    impl PickedFile for FakeFile {
        fn name(&self) -> String {
            self.name.to_string()
        }

        fn size(&self) -> u64 {
            2048
        }

        fn media_type(&self) -> String {
            self.media_type.to_string()
        }
    }

    fn pdf(name: &'static str) -> FakeFile {
        FakeFile {
            name,
            media_type: PDF_MEDIA_TYPE,
        }
    }

    fn deck() -> Vec<Flashcard> {
        parse_flashcards(r#"[{"id": "1", "type": "QA", "question": "Q", "answer": "A"}]"#)
            .unwrap()
    }

    #[test]
    fn selecting_a_pdf_stores_it() {
        let mut state = UploadState::new();

        state.select(pdf("notes.pdf")).unwrap();
        assert_eq!(state.file(), Some(&pdf("notes.pdf")));

        state.select(pdf("other.pdf")).unwrap();
        assert_eq!(state.file().map(PickedFile::name).as_deref(), Some("other.pdf"));
    }

    #[test]
    fn non_pdf_selection_keeps_previous_file() {
        let mut state = UploadState::new();
        state.select(pdf("notes.pdf")).unwrap();

        let err = state
            .select(FakeFile {
                name: "photo.png",
                media_type: "image/png",
            })
            .unwrap_err();

        assert_eq!(err, UploadError::NotPdf("image/png".into()));
        assert_eq!(state.file(), Some(&pdf("notes.pdf")));
    }

    #[test]
    fn non_pdf_selection_with_nothing_stored() {
        let mut state: UploadState<FakeFile> = UploadState::new();

        assert!(state
            .select(FakeFile {
                name: "notes.txt",
                media_type: "text/plain",
            })
            .is_err());
        assert!(state.file().is_none());
    }

    #[test]
    fn remove_clears_selection() {
        let mut state: UploadState<FakeFile> = UploadState::new();
        assert!(!state.remove());

        state.select(pdf("notes.pdf")).unwrap();
        assert!(state.remove());
        assert!(state.file().is_none());
        assert!(!state.can_submit());
    }

    #[test]
    fn drop_selects_and_clears_highlight() {
        let mut state = UploadState::new();

        assert!(state.drag_over());
        assert!(!state.drag_over());
        assert!(state.is_dragging());

        state.drop_file(Some(pdf("dropped.pdf"))).unwrap();
        assert!(!state.is_dragging());
        assert_eq!(state.file(), Some(&pdf("dropped.pdf")));

        state.drag_over();
        assert!(state.drag_leave());
        assert!(!state.drag_leave());
        state.drop_file(None).unwrap();
        assert_eq!(state.file(), Some(&pdf("dropped.pdf")));
    }

    #[test]
    fn submit_needs_a_file() {
        let mut state: UploadState<FakeFile> = UploadState::new();

        assert_eq!(state.begin_submit().unwrap_err(), UploadError::NoFile);
        assert_eq!(state.phase(), &UploadPhase::Idle);
    }

    #[test]
    fn only_one_submission_in_flight() {
        let mut state = UploadState::new();
        state.select(pdf("notes.pdf")).unwrap();

        assert_eq!(state.begin_submit().unwrap(), &pdf("notes.pdf"));
        assert!(state.is_loading());
        assert!(!state.can_submit());
        assert_eq!(state.begin_submit().unwrap_err(), UploadError::InFlight);
    }

    #[test]
    fn selection_during_upload_is_kept_for_later() {
        let mut state = UploadState::new();
        state.select(pdf("a.pdf")).unwrap();
        state.begin_submit().unwrap();

        assert!(state.remove());
        state.select(pdf("b.pdf")).unwrap();

        assert_eq!(state.file(), Some(&pdf("b.pdf")));
        assert!(state.is_loading());
        assert!(!state.can_submit());
        assert_eq!(state.begin_submit().unwrap_err(), UploadError::InFlight);

        assert!(state.finish(Err(UploadError::Timeout(180))));
        assert!(state.can_submit());
        assert_eq!(state.begin_submit().unwrap(), &pdf("b.pdf"));
    }

    #[test]
    fn selection_is_refused_once_flashcards_exist() {
        let mut state = UploadState::new();
        state.select(pdf("a.pdf")).unwrap();
        state.begin_submit().unwrap();
        state.finish(Ok(deck()));

        assert_eq!(
            state.select(pdf("b.pdf")).unwrap_err(),
            UploadError::AlreadyLoaded
        );
        assert_eq!(state.file(), Some(&pdf("a.pdf")));
    }

    #[test]
    fn successful_finish_yields_deck() {
        let mut state = UploadState::new();
        state.select(pdf("notes.pdf")).unwrap();
        state.begin_submit().unwrap();

        assert!(state.finish(Ok(deck())));
        assert!(!state.is_loading());
        assert_eq!(state.flashcards().map(|cards| cards.len()), Some(1));
        assert_eq!(state.begin_submit().unwrap_err(), UploadError::AlreadyLoaded);
    }

    #[test]
    fn failure_is_recoverable_by_resubmitting() {
        let mut state = UploadState::new();
        state.select(pdf("notes.pdf")).unwrap();
        state.begin_submit().unwrap();

        let failure = UploadError::Status {
            status: 500,
            message: "boom".into(),
        };
        assert!(state.finish(Err(failure.clone())));
        assert_eq!(state.error(), Some(&failure));
        assert!(state.flashcards().is_none());
        assert!(state.can_submit());

        state.begin_submit().unwrap();
        assert!(state.error().is_none());
        assert!(state.finish(Ok(deck())));
        assert!(state.flashcards().is_some());
    }

    #[test]
    fn empty_result_counts_as_failure() {
        let mut state = UploadState::new();
        state.select(pdf("notes.pdf")).unwrap();
        state.begin_submit().unwrap();

        state.finish(Ok(Vec::new()));
        assert!(matches!(state.error(), Some(UploadError::Malformed(_))));
    }

    #[test]
    fn stale_outcomes_are_ignored() {
        let mut state: UploadState<FakeFile> = UploadState::new();

        assert!(!state.finish(Ok(deck())));
        assert_eq!(state.phase(), &UploadPhase::Idle);
    }

    #[test]
    fn reselecting_after_failure_returns_to_idle() {
        let mut state = UploadState::new();
        state.select(pdf("notes.pdf")).unwrap();
        state.begin_submit().unwrap();
        state.finish(Err(UploadError::Timeout(180)));

        state.select(pdf("fixed.pdf")).unwrap();
        assert_eq!(state.phase(), &UploadPhase::Idle);
    }

    #[test]
    fn formats_sizes_in_megabytes() {
        assert_eq!(format_file_size(0), "0.00 MB");
        assert_eq!(format_file_size(1_572_864), "1.50 MB");
    }
}
