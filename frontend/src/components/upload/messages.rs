use common::model::Flashcard;
use common::upload::UploadError;

pub enum Msg {
    DragOver,
    DragLeave,
    Dropped(Option<web_sys::File>),
    FileChosen(Option<web_sys::File>),
    RemoveFile,
    Submit,
    Finished(Result<Vec<Flashcard>, UploadError>),
}
