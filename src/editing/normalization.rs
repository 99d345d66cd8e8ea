//! Peak normalization
//!
//! Divides every sample by the buffer's absolute peak so the loudest sample
//! lands exactly on +/-1.0. Silent buffers are returned unchanged.
//!
//! # Example
//!
//! ```
//! use pcm_editor::{normalize, AudioBuffer};
//!
//! let buffer = AudioBuffer::new(vec![0.25, -0.5, 0.1], 1, 44100)?;
//! let normalized = normalize(&buffer);
//! assert_eq!(normalized.samples(), &[0.5, -1.0, 0.2]);
//! # Ok::<(), pcm_editor::EditError>(())
//! ```

use crate::io::sample_buffer::AudioBuffer;

/// Normalize `buffer` to a peak of 1.0
pub fn normalize(buffer: &AudioBuffer) -> AudioBuffer {
    let peak = buffer.peak();

    if peak == 0.0 {
        log::warn!("Audio is silent, cannot normalize");
        return buffer.clone();
    }

    log::debug!(
        "Peak normalization: peak={:.2} dB, gain={:.2} dB",
        20.0 * peak.log10(),
        -20.0 * peak.log10()
    );

    let samples = buffer.samples().iter().map(|&s| s / peak).collect();
    buffer.with_samples(samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Generate a test signal: sine wave at 440 Hz
    fn generate_test_signal(length: usize, amplitude: f32, sample_rate: u32) -> AudioBuffer {
        let freq = 440.0;
        let samples = (0..length)
            .map(|i| {
                let t = i as f32 / sample_rate as f32;
                amplitude * (2.0 * std::f32::consts::PI * freq * t).sin()
            })
            .collect();
        AudioBuffer::new(samples, 1, sample_rate).unwrap()
    }

    #[test]
    fn test_peak_becomes_one() {
        for amplitude in [0.01f32, 0.3, 0.5, 2.0] {
            let buffer = generate_test_signal(44100, amplitude, 44100);
            let out = normalize(&buffer);
            assert_eq!(out.peak(), 1.0, "Peak should be exactly 1.0 for amplitude {}", amplitude);
        }
    }

    #[test]
    fn test_negative_peak_becomes_minus_one() {
        let buffer = AudioBuffer::new(vec![0.1, -0.4, 0.2], 1, 8000).unwrap();
        let out = normalize(&buffer);
        assert_eq!(out.samples()[1], -1.0);
    }

    #[test]
    fn test_silent_audio_unchanged() {
        let buffer = AudioBuffer::new(vec![0.0; 1024], 2, 44100).unwrap();
        assert_eq!(normalize(&buffer), buffer);
    }

    #[test]
    fn test_empty_audio_unchanged() {
        let buffer = AudioBuffer::empty(1, 44100).unwrap();
        assert_eq!(normalize(&buffer), buffer);
    }

    #[test]
    fn test_idempotent() {
        let buffer = generate_test_signal(4096, 0.37, 48000);
        let once = normalize(&buffer);
        let twice = normalize(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_can_attenuate() {
        // Gain above unity is brought back down to full scale
        let buffer = AudioBuffer::new(vec![2.0, -1.0], 1, 8000).unwrap();
        assert_eq!(normalize(&buffer).samples(), &[1.0, -0.5]);
    }
}
