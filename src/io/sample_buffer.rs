//! Interleaved sample buffer

use crate::error::EditError;

/// Interleaved 32-bit float samples with their channel layout and rate
///
/// Samples are ordered frame by frame, channel within frame
/// (`f0c0, f0c1, f1c0, f1c1, ...`). The sample count is always a multiple
/// of the channel count.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    samples: Vec<f32>,
    channel_count: usize,
    sample_rate: u32,
}

impl AudioBuffer {
    /// Create a buffer, validating its shape
    ///
    /// # Errors
    ///
    /// Returns `EditError::InvalidBuffer` if `channel_count` or `sample_rate` is zero,
    /// if the sample count is not a whole number of frames, or if any sample is
    /// NaN or infinite.
    ///
    /// # Example
    ///
    /// ```
    /// use pcm_editor::AudioBuffer;
    ///
    /// let stereo = AudioBuffer::new(vec![0.1, -0.1, 0.2, -0.2], 2, 44100)?;
    /// assert_eq!(stereo.frame_count(), 2);
    /// assert!(AudioBuffer::new(vec![0.1, 0.2, 0.3], 2, 44100).is_err());
    /// # Ok::<(), pcm_editor::EditError>(())
    /// ```
    pub fn new(samples: Vec<f32>, channel_count: usize, sample_rate: u32) -> Result<Self, EditError> {
        if channel_count == 0 {
            return Err(EditError::InvalidBuffer(
                "Channel count must be >= 1".to_string(),
            ));
        }

        if sample_rate == 0 {
            return Err(EditError::InvalidBuffer(
                "Sample rate must be > 0".to_string(),
            ));
        }

        if samples.len() % channel_count != 0 {
            return Err(EditError::InvalidBuffer(format!(
                "{} samples is not a whole number of {}-channel frames",
                samples.len(),
                channel_count
            )));
        }

        if let Some(pos) = samples.iter().position(|s| !s.is_finite()) {
            return Err(EditError::InvalidBuffer(format!(
                "Non-finite sample at index {}",
                pos
            )));
        }

        Ok(Self {
            samples,
            channel_count,
            sample_rate,
        })
    }

    /// Create a zero-length buffer with the given layout
    pub fn empty(channel_count: usize, sample_rate: u32) -> Result<Self, EditError> {
        Self::new(Vec::new(), channel_count, sample_rate)
    }

    /// Build a buffer with this buffer's layout around new sample data
    ///
    /// Callers guarantee `samples.len()` is a multiple of the channel count.
    pub(crate) fn with_samples(&self, samples: Vec<f32>) -> Self {
        debug_assert_eq!(samples.len() % self.channel_count, 0);
        Self {
            samples,
            channel_count: self.channel_count,
            sample_rate: self.sample_rate,
        }
    }

    /// Build a mono buffer at this buffer's sample rate
    pub(crate) fn with_mono_samples(&self, samples: Vec<f32>) -> Self {
        Self {
            samples,
            channel_count: 1,
            sample_rate: self.sample_rate,
        }
    }

    /// Interleaved samples
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Consume the buffer, returning its interleaved samples
    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }

    /// Number of interleaved channels
    pub fn channel_count(&self) -> usize {
        self.channel_count
    }

    /// Sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Total number of samples across all channels
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when the buffer holds no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Number of frames (samples per channel)
    pub fn frame_count(&self) -> usize {
        self.samples.len() / self.channel_count
    }

    /// Duration in seconds
    pub fn duration_seconds(&self) -> f32 {
        self.frame_count() as f32 / self.sample_rate as f32
    }

    /// Iterate over frames, one slice of `channel_count` samples each
    pub fn frames(&self) -> std::slice::ChunksExact<'_, f32> {
        self.samples.chunks_exact(self.channel_count)
    }

    /// Largest absolute sample value, 0.0 for an empty buffer
    pub fn peak(&self) -> f32 {
        self.samples.iter().map(|&x| x.abs()).fold(0.0f32, f32::max)
    }

    /// Convert a time in seconds to a flat sample offset
    ///
    /// `floor(seconds * sample_rate) * channel_count`. The result is not
    /// clamped to the buffer length.
    pub fn seconds_to_offset(&self, seconds: f32) -> usize {
        let frames = (seconds as f64 * self.sample_rate as f64).floor();
        if frames <= 0.0 {
            return 0;
        }
        (frames as usize).saturating_mul(self.channel_count)
    }

    /// Like [`seconds_to_offset`](Self::seconds_to_offset), but any time at or
    /// past `duration_seconds()` reaches at least `len()`
    ///
    /// `duration_seconds()` is an f32 and can land just below the last frame
    /// boundary once multiplied back out.
    pub(crate) fn seconds_to_bound(&self, seconds: f32) -> usize {
        let offset = self.seconds_to_offset(seconds);
        if seconds >= self.duration_seconds() {
            offset.max(self.len())
        } else {
            offset
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero_channels() {
        let result = AudioBuffer::new(vec![0.0; 4], 0, 44100);
        assert!(matches!(result, Err(EditError::InvalidBuffer(_))));
    }

    #[test]
    fn test_rejects_zero_sample_rate() {
        let result = AudioBuffer::new(vec![0.0; 4], 1, 0);
        assert!(matches!(result, Err(EditError::InvalidBuffer(_))));
    }

    #[test]
    fn test_rejects_partial_frame() {
        let result = AudioBuffer::new(vec![0.0; 5], 2, 44100);
        assert!(matches!(result, Err(EditError::InvalidBuffer(_))));
    }

    #[test]
    fn test_rejects_non_finite() {
        let result = AudioBuffer::new(vec![0.0, f32::NAN], 1, 44100);
        assert!(matches!(result, Err(EditError::InvalidBuffer(_))));
    }

    #[test]
    fn test_shape_accessors() {
        let buffer = AudioBuffer::new(vec![0.0; 88200 * 2], 2, 44100).unwrap();
        assert_eq!(buffer.len(), 176400);
        assert_eq!(buffer.frame_count(), 88200);
        assert!((buffer.duration_seconds() - 2.0).abs() < 1e-6);
        assert_eq!(buffer.frames().count(), 88200);
    }

    #[test]
    fn test_empty_buffer_is_valid() {
        let buffer = AudioBuffer::empty(2, 48000).unwrap();
        assert!(buffer.is_empty());
        assert_eq!(buffer.duration_seconds(), 0.0);
        assert_eq!(buffer.peak(), 0.0);
    }

    #[test]
    fn test_seconds_to_offset_floors_and_scales() {
        let buffer = AudioBuffer::new(vec![0.0; 20], 2, 4).unwrap();
        assert_eq!(buffer.seconds_to_offset(0.0), 0);
        assert_eq!(buffer.seconds_to_offset(0.5), 4); // 2 frames * 2 channels
        assert_eq!(buffer.seconds_to_offset(0.9), 6); // floor(3.6) = 3 frames
        assert_eq!(buffer.seconds_to_offset(10.0), 80); // not clamped
    }

    #[test]
    fn test_duration_maps_back_to_length() {
        for rate in [10u32, 8000, 44100, 48000] {
            for frames in (1..3000).step_by(7) {
                let buffer = AudioBuffer::new(vec![0.0; frames * 2], 2, rate).unwrap();
                assert_eq!(
                    buffer.seconds_to_bound(buffer.duration_seconds()),
                    buffer.len(),
                    "{} frames at {} Hz",
                    frames,
                    rate
                );
            }
        }
    }

    #[test]
    fn test_seconds_to_offset_floors_long_clips() {
        let buffer = AudioBuffer::new(vec![0.0; 3_000_000], 1, 48000).unwrap();
        assert_eq!(buffer.seconds_to_offset(60.000015), 2_880_000);

        for seconds in [30.5f32, 59.99999, 60.000015, 61.25, 62.499_99] {
            let expected = (seconds as f64 * 48000.0).floor() as usize;
            assert_eq!(
                buffer.seconds_to_offset(seconds),
                expected,
                "floor rule broken at {}s",
                seconds
            );
        }

        let stereo = AudioBuffer::new(vec![0.0; 2 * 2_646_000], 2, 44100).unwrap();
        for seconds in [12.345f32, 45.678_9, 59.999_98] {
            let expected = (seconds as f64 * 44100.0).floor() as usize * 2;
            assert_eq!(stereo.seconds_to_offset(seconds), expected, "at {}s", seconds);
        }
    }

    #[test]
    fn test_seconds_to_offset_sub_frame_floors_to_zero() {
        let buffer = AudioBuffer::new(vec![0.0; 4], 1, 1).unwrap();
        assert_eq!(buffer.seconds_to_offset(0.999_999_94), 0);
        assert_eq!(buffer.seconds_to_bound(0.999_999_94), 0);
    }

    #[test]
    fn test_bound_past_duration_is_not_clamped() {
        let buffer = AudioBuffer::new(vec![0.0; 10], 1, 10).unwrap();
        assert_eq!(buffer.seconds_to_bound(1.0), 10);
        assert_eq!(buffer.seconds_to_bound(1.5), 15);
    }

    #[test]
    fn test_long_clip_duration_maps_back_to_length() {
        let buffer = AudioBuffer::new(vec![0.0; 2 * 4_321_987], 2, 48000).unwrap();
        assert_eq!(buffer.seconds_to_bound(buffer.duration_seconds()), buffer.len());
    }

    #[test]
    fn test_peak() {
        let buffer = AudioBuffer::new(vec![0.2, -0.7, 0.5], 1, 8000).unwrap();
        assert_eq!(buffer.peak(), 0.7);
    }
}
