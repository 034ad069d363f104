use crate::config_loader::SETTINGS;
use crate::error::TranscodeError;
use serde::{Deserialize, Serialize};

/// MIME type for the buffers produced by [`encode_wav`].
pub const WAV_MIME: &str = "audio/wav";

/// Byte length of the RIFF/WAVE header preceding the data section.
pub const HEADER_LEN: usize = 44;

/// Container parameters for an uncompressed WAV file.
///
/// Only mono 16-bit PCM is admitted; the fields stay data (rather than
/// constants) because the header is written from them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WavFormat {
    pub sample_rate: u32,
    pub channels: u16,
    pub bits_per_sample: u16,
}

impl Default for WavFormat {
    fn default() -> Self {
        Self {
            sample_rate: 24000,
            channels: 1,
            bits_per_sample: 16,
        }
    }
}

impl WavFormat {
    /// Mono 16-bit format at the given sample rate.
    pub fn new(sample_rate: u32) -> Result<Self, TranscodeError> {
        let format = Self {
            sample_rate,
            ..Self::default()
        };
        format.validate()?;
        Ok(format)
    }

    /// Mono 16-bit format at the configured default sample rate.
    pub fn from_settings() -> Self {
        let sample_rate = SETTINGS
            .read()
            .map(|s| s.sample_rate)
            .unwrap_or(Self::default().sample_rate);

        Self {
            sample_rate,
            ..Self::default()
        }
    }

    /// Bytes consumed per second of audio.
    pub fn byte_rate(&self) -> u32 {
        self.sample_rate * u32::from(self.channels) * u32::from(self.bits_per_sample) / 8
    }

    /// Bytes per sample frame across all channels.
    pub fn block_align(&self) -> u16 {
        self.channels * self.bits_per_sample / 8
    }

    pub fn validate(&self) -> Result<(), TranscodeError> {
        if self.sample_rate == 0 {
            return Err(TranscodeError::InvalidFormat(
                "sample rate must be greater than 0".to_string(),
            ));
        }
        if self.channels != 1 || self.bits_per_sample != 16 {
            return Err(TranscodeError::InvalidFormat(format!(
                "unsupported layout: {} channel(s) at {} bits (only mono 16-bit PCM is supported)",
                self.channels, self.bits_per_sample
            )));
        }
        Ok(())
    }
}

/// Quantizes a normalized sample to i16 after clamping to [-1.0, 1.0].
///
/// The scale is asymmetric on purpose: positives map through 32767 and
/// negatives through 32768, mirroring the 32768 normalization on the decode
/// side. Re-quantizing decoder output reproduces the source integer exactly
/// for every negative value and the lower half of the positive range; near
/// full scale, positives land one unit low, an accepted property of the
/// convention.
pub fn quantize(sample: f32) -> i16 {
    let s = sample.clamp(-1.0, 1.0);
    if s < 0.0 {
        (s * 32768.0).round() as i16
    } else {
        (s * 32767.0).round() as i16
    }
}

/// Encodes normalized samples into a complete RIFF/WAVE byte buffer.
///
/// The result is self-describing and playable without external metadata:
/// a 44-byte header followed by the quantized samples as little-endian i16.
/// An empty sample slice yields a structurally valid 44-byte file.
pub fn encode_wav(samples: &[f32], format: &WavFormat) -> Result<Vec<u8>, TranscodeError> {
    format.validate()?;

    let data_size = u32::try_from(samples.len() * 2)
        .ok()
        .filter(|size| size.checked_add(36).is_some())
        .ok_or_else(|| {
            TranscodeError::InvalidFormat(format!(
                "{} samples exceed the RIFF size field capacity",
                samples.len()
            ))
        })?;

    let mut buf = Vec::with_capacity(HEADER_LEN + data_size as usize);

    // RIFF chunk descriptor
    buf.extend_from_slice(b"RIFF");
    buf.extend_from_slice(&(36 + data_size).to_le_bytes());
    buf.extend_from_slice(b"WAVE");

    // fmt sub-chunk
    buf.extend_from_slice(b"fmt ");
    buf.extend_from_slice(&16u32.to_le_bytes()); // Subchunk1Size (16 for PCM)
    buf.extend_from_slice(&1u16.to_le_bytes()); // AudioFormat (1 for PCM)
    buf.extend_from_slice(&format.channels.to_le_bytes());
    buf.extend_from_slice(&format.sample_rate.to_le_bytes());
    buf.extend_from_slice(&format.byte_rate().to_le_bytes());
    buf.extend_from_slice(&format.block_align().to_le_bytes());
    buf.extend_from_slice(&format.bits_per_sample.to_le_bytes());

    // data sub-chunk
    buf.extend_from_slice(b"data");
    buf.extend_from_slice(&data_size.to_le_bytes());

    for &sample in samples {
        buf.extend_from_slice(&quantize(sample).to_le_bytes());
    }

    log::debug!(
        "encoded {} samples into a {}-byte WAV buffer at {} Hz",
        samples.len(),
        buf.len(),
        format.sample_rate
    );

    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u16_at(buf: &[u8], offset: usize) -> u16 {
        u16::from_le_bytes([buf[offset], buf[offset + 1]])
    }

    fn u32_at(buf: &[u8], offset: usize) -> u32 {
        u32::from_le_bytes([buf[offset], buf[offset + 1], buf[offset + 2], buf[offset + 3]])
    }

    #[test]
    fn test_header_layout() {
        let format = WavFormat::new(24000).unwrap();
        let buf = encode_wav(&[0.0, 0.5], &format).unwrap();

        assert_eq!(buf.len(), 48);
        assert_eq!(&buf[0..4], b"RIFF");
        assert_eq!(u32_at(&buf, 4), 40); // 36 + dataSize
        assert_eq!(&buf[8..12], b"WAVE");
        assert_eq!(&buf[12..16], b"fmt ");
        assert_eq!(u32_at(&buf, 16), 16);
        assert_eq!(u16_at(&buf, 20), 1); // PCM
        assert_eq!(u16_at(&buf, 22), 1); // mono
        assert_eq!(u32_at(&buf, 24), 24000);
        assert_eq!(u32_at(&buf, 28), 48000); // byte rate
        assert_eq!(u16_at(&buf, 32), 2); // block align
        assert_eq!(u16_at(&buf, 34), 16);
        assert_eq!(&buf[36..40], b"data");
        assert_eq!(u32_at(&buf, 40), 4);
    }

    #[test]
    fn test_empty_buffer_yields_valid_header_only_file() {
        let buf = encode_wav(&[], &WavFormat::default()).unwrap();
        assert_eq!(buf.len(), HEADER_LEN);
        assert_eq!(u32_at(&buf, 4), 36);
        assert_eq!(u32_at(&buf, 40), 0);
    }

    #[test]
    fn test_boundary_quantization() {
        assert_eq!(quantize(1.0), 32767);
        assert_eq!(quantize(-1.0), -32768);
        assert_eq!(quantize(0.0), 0);
    }

    #[test]
    fn test_out_of_range_samples_are_clamped() {
        assert_eq!(quantize(1.5), 32767);
        assert_eq!(quantize(-2.0), -32768);
    }

    #[test]
    fn test_zero_sample_rate_is_rejected() {
        let format = WavFormat {
            sample_rate: 0,
            ..WavFormat::default()
        };
        assert!(matches!(
            encode_wav(&[0.0], &format),
            Err(TranscodeError::InvalidFormat(_))
        ));
        assert!(WavFormat::new(0).is_err());
    }

    #[test]
    fn test_stereo_layout_is_rejected() {
        let format = WavFormat {
            channels: 2,
            ..WavFormat::default()
        };
        assert!(matches!(
            format.validate(),
            Err(TranscodeError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_derived_rates_follow_sample_rate() {
        let format = WavFormat::new(16000).unwrap();
        assert_eq!(format.byte_rate(), 32000);
        assert_eq!(format.block_align(), 2);
    }
}
