//! Canonical 16-bit PCM WAV encoder
//!
//! Layout (all integers little-endian):
//!
//! | Offset | Size | Field |
//! |---|---|---|
//! | 0  | 4 | `"RIFF"` |
//! | 4  | 4 | file size - 8 |
//! | 8  | 4 | `"WAVE"` |
//! | 12 | 4 | `"fmt "` |
//! | 16 | 4 | 16 (fmt chunk size) |
//! | 20 | 2 | 1 (PCM) |
//! | 22 | 2 | channels |
//! | 24 | 4 | sample rate |
//! | 28 | 4 | byte rate = rate * channels * 2 |
//! | 32 | 2 | block align = channels * 2 |
//! | 34 | 2 | 16 (bits per sample) |
//! | 36 | 4 | `"data"` |
//! | 40 | 4 | sample count * 2 |
//! | 44 | .. | samples as i16 |
//!
//! Out-of-range samples saturate silently to `[-32768, 32767]`.

use crate::error::EditError;
use crate::io::sample_buffer::AudioBuffer;

/// Size of the canonical WAV header in bytes
pub const HEADER_SIZE: usize = 44;

/// Bytes per encoded sample
pub const BYTES_PER_SAMPLE: usize = 2;

/// Bit depth of the encoded stream
pub const BITS_PER_SAMPLE: u16 = 16;

/// `fmt ` audio format tag for integer PCM
pub const PCM_FORMAT: u16 = 1;

/// Scale between float samples and 16-bit integers
pub const I16_SCALE: f32 = 32767.0;

/// Quantize one float sample to a signed 16-bit value
///
/// `clamp(round(s * 32767), -32768, 32767)`
#[inline]
pub fn quantize_sample(sample: f32) -> i16 {
    (sample * I16_SCALE).round().clamp(i16::MIN as f32, i16::MAX as f32) as i16
}

/// Encode a buffer as a 16-bit PCM WAV byte stream
///
/// The output is exactly `44 + 2 * buffer.len()` bytes.
///
/// # Errors
///
/// Returns `EditError::EncodeError` for an empty buffer, or when the channel
/// count, byte rate or data size do not fit their header fields.
///
/// # Example
///
/// ```
/// use pcm_editor::{encode_wav, AudioBuffer};
///
/// let buffer = AudioBuffer::new(vec![1.0, -1.0], 1, 44100)?;
/// let bytes = encode_wav(&buffer)?;
/// assert_eq!(bytes.len(), 48);
/// assert_eq!(&bytes[44..], &[0xFF, 0x7F, 0x01, 0x80]);
/// # Ok::<(), pcm_editor::EditError>(())
/// ```
pub fn encode_wav(buffer: &AudioBuffer) -> Result<Vec<u8>, EditError> {
    if buffer.is_empty() {
        return Err(EditError::EncodeError(
            "Refusing to encode an empty buffer".to_string(),
        ));
    }

    let channels = u16::try_from(buffer.channel_count()).map_err(|_| {
        EditError::EncodeError(format!(
            "{} channels exceeds the WAV channel field",
            buffer.channel_count()
        ))
    })?;

    let data_size = buffer
        .len()
        .checked_mul(BYTES_PER_SAMPLE)
        .and_then(|n| u32::try_from(n).ok())
        .filter(|&n| n <= u32::MAX - (HEADER_SIZE as u32 - 8))
        .ok_or_else(|| {
            EditError::EncodeError(format!(
                "{} samples exceeds the 4 GiB RIFF limit",
                buffer.len()
            ))
        })?;

    let block_align = channels as u32 * BYTES_PER_SAMPLE as u32;
    let byte_rate = buffer.sample_rate() as u64 * block_align as u64;
    let byte_rate = u32::try_from(byte_rate).map_err(|_| {
        EditError::EncodeError(format!(
            "Byte rate {} exceeds the WAV byte rate field",
            byte_rate
        ))
    })?;

    let file_size = HEADER_SIZE as u32 + data_size;

    let mut out = Vec::with_capacity(file_size as usize);

    // RIFF header
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(file_size - 8).to_le_bytes());
    out.extend_from_slice(b"WAVE");

    // fmt chunk
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&PCM_FORMAT.to_le_bytes());
    out.extend_from_slice(&channels.to_le_bytes());
    out.extend_from_slice(&buffer.sample_rate().to_le_bytes());
    out.extend_from_slice(&byte_rate.to_le_bytes());
    out.extend_from_slice(&(block_align as u16).to_le_bytes());
    out.extend_from_slice(&BITS_PER_SAMPLE.to_le_bytes());

    // data chunk
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_size.to_le_bytes());
    for &sample in buffer.samples() {
        out.extend_from_slice(&quantize_sample(sample).to_le_bytes());
    }

    debug_assert_eq!(out.len(), HEADER_SIZE + buffer.len() * BYTES_PER_SAMPLE);

    log::debug!(
        "Encoded {} samples ({} ch @ {} Hz) into {} WAV bytes",
        buffer.len(),
        channels,
        buffer.sample_rate(),
        out.len()
    );

    Ok(out)
}
