//! Build-time settings for the browser bundle.
//!
//! The bundle is static, so these are baked in with `option_env!` when
//! `trunk build` runs. Both have defaults that match the bundled host.

/// Where the Uploader posts the selected PDF.
pub const UPLOAD_ENDPOINT: &str = match option_env!("FLASHCARDS_UPLOAD_ENDPOINT") {
    Some(endpoint) => endpoint,
    None => "/upload-pdf",
};

const DEFAULT_UPLOAD_TIMEOUT_SECS: u32 = 180;

/// How long a submission may stay in flight before it is reported as failed.
pub fn upload_timeout_secs() -> u32 {
    option_env!("FLASHCARDS_UPLOAD_TIMEOUT_SECS")
        .and_then(|secs| secs.parse().ok())
        .filter(|secs| *secs > 0)
        .unwrap_or(DEFAULT_UPLOAD_TIMEOUT_SECS)
}
