//! Audio transcoding core for speech-synthesis playback.
//!
//! Speech services hand back raw signed 16-bit little-endian PCM as a base64
//! string; players and download sinks want a self-contained WAV file. This
//! crate is the glue between the two: [`pcm::decode_base64_pcm`] turns the
//! payload into normalized `f32` samples, [`wav::encode_wav`] wraps samples
//! in a RIFF/WAVE container, and [`engine::AudioEngine`] plays the result.

pub mod config_loader;
pub mod engine;
pub mod error;
pub mod pcm;
pub mod wav;

pub use error::TranscodeError;
pub use pcm::{decode_base64_pcm, encode_base64_pcm, samples_from_pcm_bytes};
pub use wav::{encode_wav, WavFormat, HEADER_LEN, WAV_MIME};
