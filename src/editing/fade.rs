//! Gain and linear fade-in/fade-out
//!
//! Every sample is scaled by `volume`, then by the fade ramps it falls into.
//! Ramp lengths are `floor(seconds * sample_rate) * channel_count` flat samples,
//! so a stereo fade advances one step per sample, not per frame.
//!
//! - Fade-in multiplier at flat index `i < n_in`: `i / n_in` (silent at index 0)
//! - Fade-out multiplier at `i >= L - n_out`: `1 - (i - (L - n_out)) / n_out`
//!
//! When the two windows overlap both multipliers apply. No clipping happens
//! here; values above 1.0 are saturated by the encoder.

use serde::{Deserialize, Serialize};

use crate::error::{check_non_negative, EditError};
use crate::io::sample_buffer::AudioBuffer;

/// Fade durations in seconds
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FadeSpec {
    /// Fade-in duration in seconds (default: 0.0)
    pub fade_in_seconds: f32,
    /// Fade-out duration in seconds (default: 0.0)
    pub fade_out_seconds: f32,
}

impl FadeSpec {
    /// Fades of the given durations
    pub fn new(fade_in_seconds: f32, fade_out_seconds: f32) -> Self {
        Self {
            fade_in_seconds,
            fade_out_seconds,
        }
    }
}

/// Apply gain and fades, returning a new buffer
///
/// # Arguments
///
/// * `buffer` - Source buffer (not modified)
/// * `volume` - Linear gain, any finite non-negative value
/// * `fades` - Fade durations, each clamped to the buffer duration
///
/// # Errors
///
/// Returns `EditError::InvalidParameter` if `volume` or a fade duration is
/// negative or not finite.
///
/// # Example
///
/// ```
/// use pcm_editor::{apply_gain_and_fades, AudioBuffer, FadeSpec};
///
/// let buffer = AudioBuffer::new(vec![1.0; 4], 1, 4)?;
/// let faded = apply_gain_and_fades(&buffer, 0.5, FadeSpec::new(1.0, 0.0))?;
/// assert_eq!(faded.samples(), &[0.0, 0.125, 0.25, 0.375]);
/// # Ok::<(), pcm_editor::EditError>(())
/// ```
pub fn apply_gain_and_fades(
    buffer: &AudioBuffer,
    volume: f32,
    fades: FadeSpec,
) -> Result<AudioBuffer, EditError> {
    check_non_negative("volume", volume)?;
    check_non_negative("fade_in_seconds", fades.fade_in_seconds)?;
    check_non_negative("fade_out_seconds", fades.fade_out_seconds)?;

    let len = buffer.len();
    let fade_in_count = buffer.seconds_to_bound(fades.fade_in_seconds).min(len);
    let fade_out_count = buffer.seconds_to_bound(fades.fade_out_seconds).min(len);
    let fade_out_start = len - fade_out_count;

    log::debug!(
        "Applying gain {:.3} with fade-in {} / fade-out {} samples over {} samples",
        volume,
        fade_in_count,
        fade_out_count,
        len
    );

    let samples = buffer
        .samples()
        .iter()
        .enumerate()
        .map(|(i, &s)| {
            let mut sample = s * volume;

            if i < fade_in_count {
                sample *= i as f32 / fade_in_count as f32;
            }

            if fade_out_count > 0 && i >= fade_out_start {
                let fade_out_index = i - fade_out_start;
                sample *= 1.0 - fade_out_index as f32 / fade_out_count as f32;
            }

            sample
        })
        .collect();

    Ok(buffer.with_samples(samples))
}
