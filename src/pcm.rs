use crate::error::TranscodeError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// Decodes a base64 speech-synthesis payload into normalized samples.
///
/// The payload is expected to be raw signed 16-bit little-endian PCM, mono.
/// Each sample is normalized by 32768, so the output lands in
/// [-1.0, 32767/32768]. An empty payload decodes to an empty buffer.
pub fn decode_base64_pcm(encoded: &str) -> Result<Vec<f32>, TranscodeError> {
    let bytes = STANDARD.decode(encoded)?;
    log::debug!("decoded {} bytes of PCM from base64 payload", bytes.len());
    samples_from_pcm_bytes(&bytes)
}

/// Interprets raw bytes as little-endian i16 PCM and normalizes to f32.
///
/// Rejects streams whose length is odd instead of dropping the trailing byte.
pub fn samples_from_pcm_bytes(bytes: &[u8]) -> Result<Vec<f32>, TranscodeError> {
    if bytes.len() % 2 != 0 {
        return Err(TranscodeError::MalformedAudioData { len: bytes.len() });
    }

    let mut samples = Vec::with_capacity(bytes.len() / 2);
    for chunk in bytes.chunks_exact(2) {
        let v = i16::from_le_bytes([chunk[0], chunk[1]]);
        samples.push(f32::from(v) / 32768.0);
    }

    Ok(samples)
}

/// Packs i16 samples as little-endian bytes and encodes them to base64,
/// the wire shape speech services traffic in.
pub fn encode_base64_pcm(samples: &[i16]) -> String {
    let mut bytes = Vec::with_capacity(samples.len() * 2);
    for &sample in samples {
        bytes.extend_from_slice(&sample.to_le_bytes());
    }

    STANDARD.encode(bytes)
}
