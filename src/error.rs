use thiserror::Error;

/// Errors surfaced by the transcoding pipeline.
///
/// Every failure is detected synchronously and returned to the caller;
/// no operation ever hands back a partially filled buffer.
#[derive(Debug, Error)]
pub enum TranscodeError {
    /// The payload was not valid base64 (bad alphabet or padding).
    #[error("invalid base64 audio payload: {0}")]
    InvalidEncoding(#[from] base64::DecodeError),

    /// The decoded byte stream does not split into whole 16-bit samples.
    #[error("malformed PCM stream: {len} bytes is not a whole number of 16-bit samples")]
    MalformedAudioData { len: usize },

    /// The caller supplied a format the WAV container cannot carry.
    #[error("invalid WAV format: {0}")]
    InvalidFormat(String),
}
