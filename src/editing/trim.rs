//! Trim a buffer to a time range

use serde::{Deserialize, Serialize};

use crate::error::{check_non_negative, EditError};
use crate::io::sample_buffer::AudioBuffer;

/// What to do when a trim range ends past the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrimPolicy {
    /// Fail with `EditError::InvalidRange`
    Reject,
    /// Clamp both offsets to the buffer length
    Clamp,
}

/// Selection in seconds, `start_seconds <= end_seconds`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrimRange {
    /// Selection start in seconds
    pub start_seconds: f32,
    /// Selection end in seconds (exclusive)
    pub end_seconds: f32,
}

impl TrimRange {
    /// Range from `start_seconds` to `end_seconds`
    pub fn new(start_seconds: f32, end_seconds: f32) -> Self {
        Self {
            start_seconds,
            end_seconds,
        }
    }

    /// Flat `[start, end)` sample offsets of this range within `buffer`
    ///
    /// Offsets are `floor(seconds * sample_rate) * channel_count`, so they always
    /// land on a frame boundary. A time at or past `duration_seconds()` reaches
    /// the end of the buffer.
    pub fn to_offsets(
        &self,
        buffer: &AudioBuffer,
        policy: TrimPolicy,
    ) -> Result<(usize, usize), EditError> {
        check_non_negative("start_seconds", self.start_seconds)
            .map_err(|e| EditError::InvalidRange(e.to_string()))?;
        check_non_negative("end_seconds", self.end_seconds)
            .map_err(|e| EditError::InvalidRange(e.to_string()))?;

        if self.start_seconds > self.end_seconds {
            return Err(EditError::InvalidRange(format!(
                "Start {:.3}s is after end {:.3}s",
                self.start_seconds, self.end_seconds
            )));
        }

        let len = buffer.len();
        let start = buffer.seconds_to_bound(self.start_seconds);
        let end = buffer.seconds_to_bound(self.end_seconds);

        if end <= len {
            return Ok((start.min(end), end));
        }

        match policy {
            TrimPolicy::Reject => Err(EditError::InvalidRange(format!(
                "End {:.3}s (sample {}) is past the buffer end ({} samples, {:.3}s)",
                self.end_seconds,
                end,
                len,
                buffer.duration_seconds()
            ))),
            TrimPolicy::Clamp => {
                log::warn!(
                    "Trim end sample {} past buffer length {}, clamping",
                    end,
                    len
                );
                Ok((start.min(len), len))
            }
        }
    }
}

/// Keep only the samples inside `range`
///
/// A zero-length selection yields an empty buffer with the same layout.
///
/// # Errors
///
/// Returns `EditError::InvalidRange` if the range is inverted, negative or not
/// finite, or if it ends past the buffer under `TrimPolicy::Reject`.
///
/// # Example
///
/// ```
/// use pcm_editor::{trim, AudioBuffer, TrimPolicy, TrimRange};
///
/// let buffer = AudioBuffer::new(vec![0.0, 0.1, 0.2, 0.3], 1, 4)?;
/// let trimmed = trim(&buffer, TrimRange::new(0.25, 0.75), TrimPolicy::Reject)?;
/// assert_eq!(trimmed.samples(), &[0.1, 0.2]);
/// # Ok::<(), pcm_editor::EditError>(())
/// ```
pub fn trim(
    buffer: &AudioBuffer,
    range: TrimRange,
    policy: TrimPolicy,
) -> Result<AudioBuffer, EditError> {
    let (start, end) = range.to_offsets(buffer, policy)?;

    log::debug!(
        "Trimming {} samples to [{}, {})",
        buffer.len(),
        start,
        end
    );

    if start == end {
        log::debug!("Trim selection is empty");
    }

    Ok(buffer.with_samples(buffer.samples()[start..end].to_vec()))
}
