//! Reverse playback order

use serde::{Deserialize, Serialize};

use crate::io::sample_buffer::AudioBuffer;

/// Sample ordering used when reversing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReverseMode {
    /// Reverse the flat interleaved array. For multi-channel audio this also
    /// swaps channel order inside every frame (L/R become R/L).
    Interleaved,
    /// Reverse frame order, keeping channels in place
    FramePreserving,
}

impl ReverseMode {
    /// Reverse `buffer` using this mode
    pub fn apply(self, buffer: &AudioBuffer) -> AudioBuffer {
        match self {
            ReverseMode::Interleaved => reverse(buffer),
            ReverseMode::FramePreserving => reverse_frames(buffer),
        }
    }
}

/// Reverse the flat sample array exactly
///
/// ```
/// use pcm_editor::{reverse, AudioBuffer};
///
/// let stereo = AudioBuffer::new(vec![1.0, 2.0, 3.0, 4.0], 2, 44100)?;
/// assert_eq!(reverse(&stereo).samples(), &[4.0, 3.0, 2.0, 1.0]);
/// # Ok::<(), pcm_editor::EditError>(())
/// ```
pub fn reverse(buffer: &AudioBuffer) -> AudioBuffer {
    log::debug!("Reversing {} interleaved samples", buffer.len());
    let samples: Vec<f32> = buffer.samples().iter().rev().copied().collect();
    buffer.with_samples(samples)
}

/// Reverse frame order, keeping each frame's channel order
pub fn reverse_frames(buffer: &AudioBuffer) -> AudioBuffer {
    log::debug!("Reversing {} frames", buffer.frame_count());
    let samples: Vec<f32> = buffer
        .frames()
        .rev()
        .flat_map(|frame| frame.iter().copied())
        .collect();
    buffer.with_samples(samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stereo() -> AudioBuffer {
        // L = 0.1, 0.2, 0.3 / R = -0.1, -0.2, -0.3
        AudioBuffer::new(vec![0.1, -0.1, 0.2, -0.2, 0.3, -0.3], 2, 44100).unwrap()
    }

    #[test]
    fn test_interleaved_reverse_swaps_channels() {
        let out = reverse(&stereo());
        assert_eq!(out.samples(), &[-0.3, 0.3, -0.2, 0.2, -0.1, 0.1]);
        assert_eq!(out.channel_count(), 2);
    }

    #[test]
    fn test_frame_preserving_reverse() {
        let out = reverse_frames(&stereo());
        assert_eq!(out.samples(), &[0.3, -0.3, 0.2, -0.2, 0.1, -0.1]);
    }

    #[test]
    fn test_reverse_is_involution() {
        let buffer = stereo();
        assert_eq!(reverse(&reverse(&buffer)), buffer);
        assert_eq!(reverse_frames(&reverse_frames(&buffer)), buffer);
    }

    #[test]
    fn test_modes_agree_on_mono() {
        let mono = AudioBuffer::new(vec![0.5, 0.25, -1.0], 1, 8000).unwrap();
        assert_eq!(
            ReverseMode::Interleaved.apply(&mono),
            ReverseMode::FramePreserving.apply(&mono)
        );
    }

    #[test]
    fn test_reverse_empty() {
        let buffer = AudioBuffer::empty(2, 44100).unwrap();
        assert!(reverse(&buffer).is_empty());
        assert!(reverse_frames(&buffer).is_empty());
    }
}
