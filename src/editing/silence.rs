//! Leading and trailing silence trimming
//!
//! Both scans step one frame at a time and look at a single channel per frame:
//! the first channel when scanning forward, the last channel when scanning
//! backward. Cut points therefore always fall on frame boundaries. An
//! entirely silent buffer is returned unchanged.

use crate::error::{check_non_negative, EditError};
use crate::io::sample_buffer::AudioBuffer;

/// Default silence threshold
pub const DEFAULT_SILENCE_THRESHOLD: f32 = 0.001;

/// Flat index of the first frame whose first channel exceeds `threshold`
fn first_audible(samples: &[f32], channels: usize, threshold: f32) -> Option<usize> {
    (0..samples.len())
        .step_by(channels)
        .find(|&i| samples[i].abs() > threshold)
}

/// Flat index one past the last frame whose last channel exceeds `threshold`
fn last_audible_end(samples: &[f32], channels: usize, threshold: f32) -> Option<usize> {
    (0..samples.len())
        .rev()
        .step_by(channels)
        .find(|&i| samples[i].abs() > threshold)
        .map(|i| i + 1)
}

/// Drop everything before the first audible frame
///
/// # Errors
///
/// Returns `EditError::InvalidParameter` if `threshold` is negative or not finite.
///
/// # Example
///
/// ```
/// use pcm_editor::{trim_leading_silence, AudioBuffer};
///
/// let buffer = AudioBuffer::new(vec![0.0, 0.0005, 0.2, 0.0], 1, 44100)?;
/// let trimmed = trim_leading_silence(&buffer, 0.001)?;
/// assert_eq!(trimmed.samples(), &[0.2, 0.0]);
/// # Ok::<(), pcm_editor::EditError>(())
/// ```
pub fn trim_leading_silence(buffer: &AudioBuffer, threshold: f32) -> Result<AudioBuffer, EditError> {
    check_non_negative("silence threshold", threshold)?;

    let samples = buffer.samples();
    match first_audible(samples, buffer.channel_count(), threshold) {
        Some(start) => {
            log::debug!("Trimming {} leading silent samples", start);
            Ok(buffer.with_samples(samples[start..].to_vec()))
        }
        None => {
            log::warn!("No sample above {} found, leaving buffer untouched", threshold);
            Ok(buffer.clone())
        }
    }
}

/// Drop everything after the last audible frame
///
/// # Errors
///
/// Returns `EditError::InvalidParameter` if `threshold` is negative or not finite.
pub fn trim_trailing_silence(buffer: &AudioBuffer, threshold: f32) -> Result<AudioBuffer, EditError> {
    check_non_negative("silence threshold", threshold)?;

    let samples = buffer.samples();
    match last_audible_end(samples, buffer.channel_count(), threshold) {
        Some(end) => {
            log::debug!("Trimming {} trailing silent samples", samples.len() - end);
            Ok(buffer.with_samples(samples[..end].to_vec()))
        }
        None => {
            log::warn!("No sample above {} found, leaving buffer untouched", threshold);
            Ok(buffer.clone())
        }
    }
}
