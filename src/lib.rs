//! # PCM Editor
//!
//! A small, deterministic PCM editing pipeline with a canonical 16-bit WAV
//! encoder and decoder.
//!
//! ## Features
//!
//! - **Non-destructive edits**: gain, linear fade-in/fade-out, trim to range
//! - **One-shot operations**: reverse, peak normalize, noise gate, downmix to mono,
//!   leading/trailing silence trim
//! - **WAV I/O**: byte-exact 44-byte-header 16-bit PCM output with silent
//!   saturation, and a validating decoder
//! - **Sessions**: pending vs applied parameters, revert, preview and save rendering
//!
//! ## Quick Start
//!
//! ```no_run
//! use pcm_editor::{read_wav_file, write_wav_file, normalize, trim_leading_silence};
//!
//! let clip = read_wav_file("door.wav")?;
//! let clip = trim_leading_silence(&clip, 0.001)?;
//! let clip = normalize(&clip);
//! write_wav_file("door_edited.wav", &clip)?;
//! # Ok::<(), pcm_editor::EditError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Samples → Editing (ops, gain/fades, trim) → Encoder → WAV bytes
//! ```
//!
//! Every transform is a pure function from one [`AudioBuffer`] to another; all
//! mutable state lives in an explicit [`EditSession`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod editing;
pub mod error;
pub mod io;
pub mod session;
pub mod waveform;

// Re-export main types
pub use config::EditorConfig;
pub use editing::channel_mixer::downmix_to_mono;
pub use editing::fade::{apply_gain_and_fades, FadeSpec};
pub use editing::gate::remove_noise_gate;
pub use editing::normalization::normalize;
pub use editing::reverse::{reverse, reverse_frames, ReverseMode};
pub use editing::silence::{trim_leading_silence, trim_trailing_silence};
pub use editing::trim::{trim, TrimPolicy, TrimRange};
pub use editing::{apply_operation, Operation};
pub use error::EditError;
pub use io::decoder::decode_wav;
pub use io::encoder::encode_wav;
pub use io::sample_buffer::AudioBuffer;
pub use io::{read_wav_file, write_wav_file};
pub use session::{EditParams, EditSession};

/// Render a clip with the given parameters straight to WAV bytes
///
/// Applies gain and fades, cuts the marker selection, then encodes. This is
/// the same sequence a session runs on save, without any session state.
///
/// # Arguments
///
/// * `buffer` - Source clip
/// * `params` - Gain, fades and marker selection
/// * `config` - Editor configuration (trim policy)
///
/// # Errors
///
/// Returns `EditError` if a parameter is invalid, the selection is out of
/// range under `TrimPolicy::Reject`, or the selection is empty.
///
/// # Example
///
/// ```
/// use pcm_editor::{render_wav, AudioBuffer, EditParams, EditorConfig};
///
/// let clip = AudioBuffer::new(vec![0.5; 100], 2, 100)?;
/// let mut params = EditParams::for_duration(clip.duration_seconds());
/// params.marker_start = 0.1;
/// params.marker_end = 0.3;
///
/// let wav = render_wav(&clip, &params, &EditorConfig::default())?;
/// assert_eq!(wav.len(), 44 + 2 * 40);
/// # Ok::<(), pcm_editor::EditError>(())
/// ```
pub fn render_wav(
    buffer: &AudioBuffer,
    params: &EditParams,
    config: &EditorConfig,
) -> Result<Vec<u8>, EditError> {
    log::debug!(
        "Rendering {} samples: volume={:.2}, fades={:.3}s/{:.3}s, range=[{:.3}s, {:.3}s)",
        buffer.len(),
        params.volume,
        params.fade_in_seconds,
        params.fade_out_seconds,
        params.marker_start,
        params.marker_end
    );

    let shaped = apply_gain_and_fades(buffer, params.volume, params.fades())?;
    let selected = trim(&shaped, params.range(), config.trim_policy)?;
    encode_wav(&selected)
}
