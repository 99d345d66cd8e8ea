//! 16-bit PCM WAV decoder
//!
//! Accepts the layout produced by [`crate::io::encoder::encode_wav`] and the
//! common variants of it found in the wild: extra chunks (`LIST`, `fact`, ...)
//! before or after `fmt `/`data`, `fmt ` chunks longer than 16 bytes, and
//! `WAVE_FORMAT_EXTENSIBLE` headers (written for most multichannel files) whose
//! sub-format is PCM. Anything other than integer PCM at 16 bits is rejected.

use crate::error::EditError;
use crate::io::encoder::{BITS_PER_SAMPLE, BYTES_PER_SAMPLE, I16_SCALE, PCM_FORMAT};
use crate::io::sample_buffer::AudioBuffer;

/// `WAVE_FORMAT_EXTENSIBLE` format tag
const EXTENSIBLE_FORMAT: u16 = 0xFFFE;

/// Minimum `cbSize` of an extensible `fmt ` chunk
const EXTENSIBLE_EXTRA_SIZE: u16 = 22;

/// Tail of the `KSDATAFORMAT_SUBTYPE_*` GUIDs, after the leading format tag
const SUBFORMAT_GUID_TAIL: [u8; 14] = [
    0x00, 0x00, 0x00, 0x00, 0x10, 0x00, 0x80, 0x00, 0x00, 0xAA, 0x00, 0x38, 0x9B, 0x71,
];

/// Parsed `fmt ` chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FormatChunk {
    audio_format: u16,
    channels: u16,
    sample_rate: u32,
    byte_rate: u32,
    block_align: u16,
    bits_per_sample: u16,
}

fn read_u16(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

fn parse_format(body: &[u8]) -> Result<FormatChunk, EditError> {
    if body.len() < 16 {
        return Err(EditError::DecodingError(format!(
            "fmt chunk is {} bytes, expected at least 16",
            body.len()
        )));
    }

    let fmt = FormatChunk {
        audio_format: read_u16(body, 0),
        channels: read_u16(body, 2),
        sample_rate: read_u32(body, 4),
        byte_rate: read_u32(body, 8),
        block_align: read_u16(body, 12),
        bits_per_sample: read_u16(body, 14),
    };

    match fmt.audio_format {
        PCM_FORMAT => {}
        EXTENSIBLE_FORMAT => check_extensible(body)?,
        other => {
            return Err(EditError::DecodingError(format!(
                "Unsupported audio format tag {} (only PCM = 1)",
                other
            )));
        }
    }

    if fmt.bits_per_sample != BITS_PER_SAMPLE {
        return Err(EditError::DecodingError(format!(
            "Unsupported bit depth {} (only 16-bit)",
            fmt.bits_per_sample
        )));
    }

    if fmt.channels == 0 {
        return Err(EditError::DecodingError("Channel count is 0".to_string()));
    }

    if fmt.sample_rate == 0 {
        return Err(EditError::DecodingError("Sample rate is 0".to_string()));
    }

    let expected_align = fmt.channels as u32 * BYTES_PER_SAMPLE as u32;
    if fmt.block_align as u32 != expected_align {
        return Err(EditError::DecodingError(format!(
            "Block align {} does not match {} channels of 16-bit audio",
            fmt.block_align, fmt.channels
        )));
    }

    if fmt.byte_rate as u64 != fmt.sample_rate as u64 * expected_align as u64 {
        return Err(EditError::DecodingError(format!(
            "Byte rate {} does not match sample rate {} and block align {}",
            fmt.byte_rate, fmt.sample_rate, fmt.block_align
        )));
    }

    Ok(fmt)
}

/// Validate the extension of a `WAVE_FORMAT_EXTENSIBLE` chunk
///
/// Offsets are relative to the chunk body: `cbSize` at 16, valid bits at 18,
/// channel mask at 20, sub-format GUID at 24..40.
fn check_extensible(body: &[u8]) -> Result<(), EditError> {
    if body.len() < 40 {
        return Err(EditError::DecodingError(format!(
            "Extensible fmt chunk is {} bytes, expected at least 40",
            body.len()
        )));
    }

    let extra_size = read_u16(body, 16);
    if extra_size < EXTENSIBLE_EXTRA_SIZE {
        return Err(EditError::DecodingError(format!(
            "Extensible fmt extension is {} bytes, expected at least {}",
            extra_size, EXTENSIBLE_EXTRA_SIZE
        )));
    }

    let sub_format = read_u16(body, 24);
    if sub_format != PCM_FORMAT || body[26..40] != SUBFORMAT_GUID_TAIL {
        return Err(EditError::DecodingError(format!(
            "Unsupported extensible sub-format {} (only PCM = 1)",
            sub_format
        )));
    }

    let valid_bits = read_u16(body, 18);
    if valid_bits != BITS_PER_SAMPLE {
        return Err(EditError::DecodingError(format!(
            "Unsupported valid bits per sample {} (only 16)",
            valid_bits
        )));
    }

    log::debug!("Extensible fmt chunk, channel mask {:#x}", read_u32(body, 20));
    Ok(())
}

/// Decode a 16-bit PCM WAV byte stream into float samples
///
/// Each sample is mapped back as `i16 / 32767`, so encoding and decoding a
/// buffer reproduces every in-range sample within `1 / 32767`.
///
/// # Errors
///
/// Returns `EditError::DecodingError` if the `RIFF`/`WAVE` magic is missing,
/// if the `fmt ` or `data` chunk is missing, truncated or out of order, or if
/// the format is not 16-bit integer PCM.
///
/// # Example
///
/// ```
/// use pcm_editor::{decode_wav, encode_wav, AudioBuffer};
///
/// let buffer = AudioBuffer::new(vec![0.5, -0.25], 2, 48000)?;
/// let decoded = decode_wav(&encode_wav(&buffer)?)?;
/// assert_eq!(decoded.channel_count(), 2);
/// assert_eq!(decoded.sample_rate(), 48000);
/// # Ok::<(), pcm_editor::EditError>(())
/// ```
pub fn decode_wav(bytes: &[u8]) -> Result<AudioBuffer, EditError> {
    if bytes.len() < 12 {
        return Err(EditError::DecodingError(format!(
            "{} bytes is too short for a RIFF header",
            bytes.len()
        )));
    }

    if &bytes[0..4] != b"RIFF" {
        return Err(EditError::DecodingError("Missing RIFF magic".to_string()));
    }

    if &bytes[8..12] != b"WAVE" {
        return Err(EditError::DecodingError("Missing WAVE magic".to_string()));
    }

    let riff_size = read_u32(bytes, 4) as usize;
    if riff_size.saturating_add(8) != bytes.len() {
        log::debug!(
            "RIFF size field {} disagrees with stream length {}",
            riff_size,
            bytes.len()
        );
    }

    let mut format: Option<FormatChunk> = None;
    let mut offset = 12;

    while offset + 8 <= bytes.len() {
        let id = &bytes[offset..offset + 4];
        let size = read_u32(bytes, offset + 4) as usize;
        let body_start = offset + 8;
        let body_end = body_start.checked_add(size).filter(|&end| end <= bytes.len());

        let Some(body_end) = body_end else {
            return Err(EditError::DecodingError(format!(
                "Chunk '{}' declares {} bytes but only {} remain",
                String::from_utf8_lossy(id),
                size,
                bytes.len() - body_start
            )));
        };
        let body = &bytes[body_start..body_end];

        match id {
            b"fmt " => {
                format = Some(parse_format(body)?);
            }
            b"data" => {
                let fmt = format.ok_or_else(|| {
                    EditError::DecodingError("data chunk appears before fmt chunk".to_string())
                })?;

                if body.len() % fmt.block_align as usize != 0 {
                    return Err(EditError::DecodingError(format!(
                        "data chunk of {} bytes is not a whole number of {}-byte frames",
                        body.len(),
                        fmt.block_align
                    )));
                }

                let samples: Vec<f32> = body
                    .chunks_exact(BYTES_PER_SAMPLE)
                    .map(|pair| i16::from_le_bytes([pair[0], pair[1]]) as f32 / I16_SCALE)
                    .collect();

                log::debug!(
                    "Decoded {} samples ({} ch @ {} Hz)",
                    samples.len(),
                    fmt.channels,
                    fmt.sample_rate
                );

                return AudioBuffer::new(samples, fmt.channels as usize, fmt.sample_rate)
                    .map_err(|e| EditError::DecodingError(e.to_string()));
            }
            other => {
                log::debug!(
                    "Skipping '{}' chunk ({} bytes)",
                    String::from_utf8_lossy(other),
                    size
                );
            }
        }

        // Chunks are word aligned
        offset = body_end + (size & 1);
    }

    match format {
        None => Err(EditError::DecodingError("Missing fmt chunk".to_string())),
        Some(_) => Err(EditError::DecodingError("Missing data chunk".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::encoder::encode_wav;

    fn encoded(samples: Vec<f32>, channels: usize, rate: u32) -> Vec<u8> {
        encode_wav(&AudioBuffer::new(samples, channels, rate).unwrap()).unwrap()
    }

    #[test]
    fn test_decode_recovers_layout_and_values() {
        let original = vec![0.0, 0.5, -0.5, 0.999, -0.123, 0.001];
        let bytes = encoded(original.clone(), 2, 22050);
        let decoded = decode_wav(&bytes).unwrap();

        assert_eq!(decoded.channel_count(), 2);
        assert_eq!(decoded.sample_rate(), 22050);
        assert_eq!(decoded.len(), original.len());
        for (a, b) in original.iter().zip(decoded.samples()) {
            assert!(
                (a - b).abs() <= 1.0 / 32767.0,
                "Sample drifted: {} vs {}",
                a,
                b
            );
        }
    }

    #[test]
    fn test_bad_riff_magic() {
        let mut bytes = encoded(vec![0.1], 1, 8000);
        bytes[0..4].copy_from_slice(b"RIFX");
        assert!(matches!(decode_wav(&bytes), Err(EditError::DecodingError(_))));
    }

    #[test]
    fn test_bad_wave_magic() {
        let mut bytes = encoded(vec![0.1], 1, 8000);
        bytes[8..12].copy_from_slice(b"AVI ");
        assert!(matches!(decode_wav(&bytes), Err(EditError::DecodingError(_))));
    }

    #[test]
    fn test_missing_fmt_chunk() {
        let mut bytes = encoded(vec![0.1], 1, 8000);
        bytes[12..16].copy_from_slice(b"junk");
        let err = decode_wav(&bytes).unwrap_err();
        assert!(
            err.to_string().contains("before fmt"),
            "Unexpected error: {}",
            err
        );
    }

    #[test]
    fn test_missing_data_chunk() {
        let mut bytes = encoded(vec![0.1], 1, 8000);
        bytes[36..40].copy_from_slice(b"junk");
        let err = decode_wav(&bytes).unwrap_err();
        assert_eq!(err, EditError::DecodingError("Missing data chunk".to_string()));
    }

    #[test]
    fn test_truncated_data() {
        let bytes = encoded(vec![0.1, 0.2, 0.3], 1, 8000);
        let result = decode_wav(&bytes[..bytes.len() - 2]);
        assert!(matches!(result, Err(EditError::DecodingError(_))));
    }

    #[test]
    fn test_too_short() {
        assert!(decode_wav(b"RIFF").is_err());
        assert!(decode_wav(&[]).is_err());
    }

    #[test]
    fn test_rejects_non_pcm_format() {
        let mut bytes = encoded(vec![0.1], 1, 8000);
        bytes[20..22].copy_from_slice(&3u16.to_le_bytes()); // IEEE float
        assert!(matches!(decode_wav(&bytes), Err(EditError::DecodingError(_))));
    }

    #[test]
    fn test_rejects_other_bit_depth() {
        let mut bytes = encoded(vec![0.1], 1, 8000);
        bytes[34..36].copy_from_slice(&24u16.to_le_bytes());
        assert!(matches!(decode_wav(&bytes), Err(EditError::DecodingError(_))));
    }

    #[test]
    fn test_rejects_inconsistent_block_align() {
        let mut bytes = encoded(vec![0.1, 0.2], 2, 8000);
        bytes[32..34].copy_from_slice(&2u16.to_le_bytes());
        assert!(matches!(decode_wav(&bytes), Err(EditError::DecodingError(_))));
    }

    #[test]
    fn test_skips_unknown_chunks() {
        let canonical = encoded(vec![0.25, -0.25], 1, 8000);

        // RIFF/WAVE + fmt, then an odd-sized LIST chunk with a pad byte, then data
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&canonical[0..36]);
        bytes.extend_from_slice(b"LIST");
        bytes.extend_from_slice(&3u32.to_le_bytes());
        bytes.extend_from_slice(&[1, 2, 3, 0]);
        bytes.extend_from_slice(&canonical[36..]);
        let riff_size = (bytes.len() - 8) as u32;
        bytes[4..8].copy_from_slice(&riff_size.to_le_bytes());

        let decoded = decode_wav(&bytes).unwrap();
        assert_eq!(decoded.len(), 2);
        assert!((decoded.samples()[0] - 0.25).abs() <= 1.0 / 32767.0);
    }

    /// Rewrite a canonical file with a 40-byte extensible fmt chunk
    fn extensible(canonical: &[u8], sub_format: u16, valid_bits: u16) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&canonical[0..16]);
        bytes.extend_from_slice(&40u32.to_le_bytes());
        bytes.extend_from_slice(&0xFFFEu16.to_le_bytes());
        bytes.extend_from_slice(&canonical[22..36]);
        bytes.extend_from_slice(&22u16.to_le_bytes());
        bytes.extend_from_slice(&valid_bits.to_le_bytes());
        bytes.extend_from_slice(&0x33u32.to_le_bytes());
        bytes.extend_from_slice(&sub_format.to_le_bytes());
        bytes.extend_from_slice(&SUBFORMAT_GUID_TAIL);
        bytes.extend_from_slice(&canonical[36..]);
        let riff_size = (bytes.len() - 8) as u32;
        bytes[4..8].copy_from_slice(&riff_size.to_le_bytes());
        bytes
    }

    #[test]
    fn test_extensible_pcm_decodes() {
        let samples = vec![0.5, -0.5, 0.25, -0.25, 0.1, 0.2, 0.3, 0.4];
        let canonical = encoded(samples.clone(), 4, 48000);
        let decoded = decode_wav(&extensible(&canonical, 1, 16)).unwrap();

        assert_eq!(decoded, decode_wav(&canonical).unwrap());
        assert_eq!(decoded.channel_count(), 4);
        assert_eq!(decoded.frame_count(), 2);
    }

    #[test]
    fn test_extensible_float_sub_format_rejected() {
        let canonical = encoded(vec![0.5, -0.5, 0.25, -0.25], 4, 48000);
        let err = decode_wav(&extensible(&canonical, 3, 16)).unwrap_err();
        assert!(err.to_string().contains("sub-format"), "Unexpected error: {}", err);
    }

    #[test]
    fn test_extensible_valid_bits_must_match() {
        let canonical = encoded(vec![0.5, -0.5, 0.25, -0.25], 4, 48000);
        let err = decode_wav(&extensible(&canonical, 1, 12)).unwrap_err();
        assert!(err.to_string().contains("valid bits"), "Unexpected error: {}", err);
    }

    #[test]
    fn test_extensible_short_chunk_rejected() {
        let canonical = encoded(vec![0.5], 1, 8000);
        let mut bytes = canonical.clone();
        bytes[20..22].copy_from_slice(&0xFFFEu16.to_le_bytes());
        assert!(matches!(decode_wav(&bytes), Err(EditError::DecodingError(_))));
    }

    #[test]
    fn test_empty_data_chunk_decodes_to_empty_buffer() {
        let mut bytes = encoded(vec![0.1], 1, 8000);
        bytes.truncate(44);
        bytes[40..44].copy_from_slice(&0u32.to_le_bytes());
        let decoded = decode_wav(&bytes).unwrap();
        assert!(decoded.is_empty());
    }
}
