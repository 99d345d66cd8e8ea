//! Static noise gate

use crate::error::{check_non_negative, EditError};
use crate::io::sample_buffer::AudioBuffer;

/// Default gate threshold
pub const DEFAULT_NOISE_GATE_THRESHOLD: f32 = 0.01;

/// Zero every sample whose absolute value is below `threshold`
///
/// Samples at or above the threshold pass through bit-identical. This is a
/// hard per-sample gate with no attack, release or hold.
///
/// # Errors
///
/// Returns `EditError::InvalidParameter` if `threshold` is negative or not finite.
pub fn remove_noise_gate(buffer: &AudioBuffer, threshold: f32) -> Result<AudioBuffer, EditError> {
    check_non_negative("noise gate threshold", threshold)?;

    let mut gated = 0usize;
    let samples = buffer
        .samples()
        .iter()
        .map(|&s| {
            if s.abs() < threshold {
                gated += 1;
                0.0
            } else {
                s
            }
        })
        .collect();

    log::debug!(
        "Noise gate at {}: zeroed {} of {} samples",
        threshold,
        gated,
        buffer.len()
    );

    Ok(buffer.with_samples(samples))
}
