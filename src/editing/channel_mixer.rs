//! Channel mixing utilities (multi-channel to mono)

use crate::io::sample_buffer::AudioBuffer;

/// Downmix to mono by averaging the channels of each frame
///
/// Mono input is returned unchanged. The result has one channel and the same
/// frame count and sample rate as the input.
///
/// # Example
///
/// ```
/// use pcm_editor::{downmix_to_mono, AudioBuffer};
///
/// let stereo = AudioBuffer::new(vec![0.25, 0.75, -1.0, 0.0], 2, 44100)?;
/// let mono = downmix_to_mono(&stereo);
/// assert_eq!(mono.channel_count(), 1);
/// assert_eq!(mono.samples(), &[0.5, -0.5]);
/// # Ok::<(), pcm_editor::EditError>(())
/// ```
pub fn downmix_to_mono(buffer: &AudioBuffer) -> AudioBuffer {
    let channels = buffer.channel_count();
    if channels == 1 {
        return buffer.clone();
    }

    log::debug!(
        "Downmixing {} frames from {} channels to mono",
        buffer.frame_count(),
        channels
    );

    let mono = buffer
        .frames()
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect();

    buffer.with_mono_samples(mono)
}
