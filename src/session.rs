//! Editing session state
//!
//! An [`EditSession`] owns one clip for the lifetime of an edit:
//!
//! - the clip as loaded, kept for [`EditSession::revert`]
//! - the working buffer, replaced by one-shot operations
//! - pending parameters (what the user is dialing in) and applied parameters
//!   (what the preview renders with)
//!
//! Gain, fades and markers are non-destructive: they are re-rendered from the
//! working buffer every time a preview or save is produced.
//!
//! # Example
//!
//! ```
//! use pcm_editor::{AudioBuffer, EditParams, EditSession, EditorConfig, Operation};
//!
//! let clip = AudioBuffer::new(vec![0.0, 0.0, 0.25, -0.5, 0.0], 1, 5)?;
//! let mut session = EditSession::new(clip, EditorConfig::default());
//!
//! session.apply(Operation::TrimLeadingSilence)?;
//! session.apply(Operation::Normalize)?;
//!
//! let mut params = *session.pending();
//! params.volume = 0.5;
//! session.set_pending(params)?;
//!
//! let wav = session.export_wav()?;
//! assert_eq!(wav.len(), 44 + 2 * 3);
//! # Ok::<(), pcm_editor::EditError>(())
//! ```

use serde::{Deserialize, Serialize};

use crate::config::EditorConfig;
use crate::editing::fade::{apply_gain_and_fades, FadeSpec};
use crate::editing::trim::{trim, TrimPolicy, TrimRange};
use crate::editing::{apply_operation, Operation};
use crate::error::{check_non_negative, EditError};
use crate::io::encoder::encode_wav;
use crate::io::sample_buffer::AudioBuffer;

/// Volume changes smaller than this do not count as an edit
const VOLUME_EPSILON: f32 = 0.01;

/// Marker offsets smaller than this (seconds) do not count as an edit
const MARKER_EPSILON: f32 = 0.001;

/// Non-destructive edit parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EditParams {
    /// Linear gain (default: 1.0)
    pub volume: f32,
    /// Fade-in duration in seconds (default: 0.0)
    pub fade_in_seconds: f32,
    /// Fade-out duration in seconds (default: 0.0)
    pub fade_out_seconds: f32,
    /// Selection start in seconds (default: 0.0)
    pub marker_start: f32,
    /// Selection end in seconds (default: clip duration)
    pub marker_end: f32,
}

impl EditParams {
    /// Neutral parameters selecting the whole of a clip of `duration` seconds
    pub fn for_duration(duration: f32) -> Self {
        Self {
            volume: 1.0,
            fade_in_seconds: 0.0,
            fade_out_seconds: 0.0,
            marker_start: 0.0,
            marker_end: duration,
        }
    }

    /// Fade durations as a [`FadeSpec`]
    pub fn fades(&self) -> FadeSpec {
        FadeSpec::new(self.fade_in_seconds, self.fade_out_seconds)
    }

    /// Marker selection as a [`TrimRange`]
    pub fn range(&self) -> TrimRange {
        TrimRange::new(self.marker_start, self.marker_end)
    }

    fn validate(&self) -> Result<(), EditError> {
        check_non_negative("volume", self.volume)?;
        check_non_negative("fade_in_seconds", self.fade_in_seconds)?;
        check_non_negative("fade_out_seconds", self.fade_out_seconds)?;
        check_non_negative("marker_start", self.marker_start)?;
        check_non_negative("marker_end", self.marker_end)?;

        if self.marker_start > self.marker_end {
            return Err(EditError::InvalidRange(format!(
                "Marker start {:.3}s is after marker end {:.3}s",
                self.marker_start, self.marker_end
            )));
        }
        Ok(())
    }

    /// Keep fades and markers inside `[0, duration]`
    fn clamp_to(&mut self, duration: f32) {
        self.fade_in_seconds = self.fade_in_seconds.min(duration);
        self.fade_out_seconds = self.fade_out_seconds.min(duration);
        self.marker_end = self.marker_end.min(duration);
        self.marker_start = self.marker_start.min(self.marker_end);
    }
}

/// State of one editing session
#[derive(Debug, Clone)]
pub struct EditSession {
    loaded: AudioBuffer,
    working: AudioBuffer,
    pending: EditParams,
    applied: EditParams,
    processed: bool,
    config: EditorConfig,
}

impl EditSession {
    /// Start a session on a freshly loaded clip
    pub fn new(buffer: AudioBuffer, config: EditorConfig) -> Self {
        let params = EditParams::for_duration(buffer.duration_seconds());
        log::debug!(
            "Starting edit session: {} samples, {} ch @ {} Hz",
            buffer.len(),
            buffer.channel_count(),
            buffer.sample_rate()
        );
        Self {
            working: buffer.clone(),
            loaded: buffer,
            pending: params,
            applied: params,
            processed: false,
            config,
        }
    }

    /// The clip as it was loaded
    pub fn loaded(&self) -> &AudioBuffer {
        &self.loaded
    }

    /// The buffer after all one-shot operations, before gain/fades/markers
    pub fn working(&self) -> &AudioBuffer {
        &self.working
    }

    /// Parameters not yet applied to the preview
    pub fn pending(&self) -> &EditParams {
        &self.pending
    }

    /// Parameters the preview renders with
    pub fn applied(&self) -> &EditParams {
        &self.applied
    }

    /// Session configuration
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// True once any one-shot operation or marker trim has run
    pub fn is_processed(&self) -> bool {
        self.processed
    }

    /// Stage new parameters
    ///
    /// Volume is clamped to `[0, max_volume]` and fades to the working
    /// duration. Markers must be ordered; their bounds are checked when the
    /// selection is cut, under the configured [`TrimPolicy`].
    ///
    /// # Errors
    ///
    /// Returns `EditError::InvalidParameter` for negative or non-finite values
    /// and `EditError::InvalidRange` if `marker_start > marker_end`.
    pub fn set_pending(&mut self, params: EditParams) -> Result<(), EditError> {
        params.validate()?;

        let duration = self.working.duration_seconds();
        let mut params = params;
        params.volume = params.volume.min(self.config.max_volume);
        params.fade_in_seconds = params.fade_in_seconds.min(duration);
        params.fade_out_seconds = params.fade_out_seconds.min(duration);

        self.pending = params;
        Ok(())
    }

    /// Promote pending parameters to applied
    pub fn apply_pending(&mut self) {
        self.applied = self.pending;
    }

    /// Render gain and fades over the working buffer with the applied parameters
    pub fn preview(&self) -> Result<AudioBuffer, EditError> {
        apply_gain_and_fades(&self.working, self.applied.volume, self.applied.fades())
    }

    /// The marker selection of the preview, for playback
    ///
    /// Returns `None` when the selection is empty or starts past the end of
    /// the preview. A selection running past the end is cut short.
    pub fn preview_segment(&self) -> Result<Option<AudioBuffer>, EditError> {
        let preview = self.preview()?;
        let (start, end) = self.applied.range().to_offsets(&preview, TrimPolicy::Clamp)?;

        if end <= start || start >= preview.len() {
            return Ok(None);
        }

        Ok(Some(preview.with_samples(preview.samples()[start..end].to_vec())))
    }

    /// Replace the working buffer with the result of `operation`
    ///
    /// Fades and markers are pulled back inside the new duration.
    pub fn apply(&mut self, operation: Operation) -> Result<(), EditError> {
        let result = apply_operation(&self.working, operation, &self.config)?;
        self.replace_working(result);
        Ok(())
    }

    /// Cut the working buffer down to the applied marker selection
    ///
    /// Afterwards the markers select the whole (shorter) buffer.
    pub fn trim_to_markers(&mut self) -> Result<(), EditError> {
        let result = trim(&self.working, self.applied.range(), self.config.trim_policy)?;
        let duration = result.duration_seconds();
        self.replace_working(result);
        self.pending.marker_start = 0.0;
        self.pending.marker_end = duration;
        self.applied.marker_start = 0.0;
        self.applied.marker_end = duration;
        Ok(())
    }

    fn replace_working(&mut self, buffer: AudioBuffer) {
        let duration = buffer.duration_seconds();
        log::debug!(
            "Working buffer: {} -> {} samples",
            self.working.len(),
            buffer.len()
        );
        self.working = buffer;
        self.pending.clamp_to(duration);
        self.applied.clamp_to(duration);
        self.processed = true;
    }

    /// True if saving now would differ from the working clip as it stands
    pub fn has_user_changes(&self) -> bool {
        let duration = self.working.duration_seconds();
        self.processed
            || self.pending.fade_in_seconds > 0.0
            || self.pending.fade_out_seconds > 0.0
            || (self.pending.volume - 1.0).abs() > VOLUME_EPSILON
            || self.pending.marker_start > MARKER_EPSILON
            || self.pending.marker_end < duration - MARKER_EPSILON
    }

    /// Discard every edit and return to the clip as loaded
    pub fn revert(&mut self) {
        log::debug!("Reverting session to loaded clip");
        self.working = self.loaded.clone();
        let params = EditParams::for_duration(self.loaded.duration_seconds());
        self.pending = params;
        self.applied = params;
        self.processed = false;
    }

    /// Produce the buffer that would be written on save
    ///
    /// Applies pending parameters, renders gain and fades, then cuts the
    /// marker selection. An empty selection yields an empty buffer.
    pub fn render_for_save(&mut self) -> Result<AudioBuffer, EditError> {
        self.apply_pending();
        let preview = self.preview()?;
        trim(&preview, self.applied.range(), self.config.trim_policy)
    }

    /// Render for save and encode as WAV
    ///
    /// # Errors
    ///
    /// Returns `EditError::EncodeError` if the rendered selection is empty.
    pub fn export_wav(&mut self) -> Result<Vec<u8>, EditError> {
        let rendered = self.render_for_save()?;
        encode_wav(&rendered)
    }
}
