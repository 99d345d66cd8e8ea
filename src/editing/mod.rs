//! Sample editing transforms
//!
//! Every transform takes a buffer by reference and returns a new one:
//! - Gain and linear fades
//! - Trim to a time range
//! - Reverse (interleaved or frame-preserving)
//! - Peak normalization
//! - Static noise gate
//! - Downmix to mono
//! - Leading/trailing silence trimming

pub mod channel_mixer;
pub mod fade;
pub mod gate;
pub mod normalization;
pub mod reverse;
pub mod silence;
pub mod trim;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::EditorConfig;
use crate::error::EditError;
use crate::io::sample_buffer::AudioBuffer;

/// One-shot operations that replace the working buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    /// Drop silence before the first audible frame
    TrimLeadingSilence,
    /// Drop silence after the last audible frame
    TrimTrailingSilence,
    /// Reverse playback order
    Reverse,
    /// Scale to a peak of 1.0
    Normalize,
    /// Zero samples below the noise gate threshold
    RemoveNoise,
    /// Average all channels into one
    DownmixToMono,
}

impl Operation {
    /// All operations, in menu order
    pub const ALL: [Operation; 6] = [
        Operation::TrimLeadingSilence,
        Operation::TrimTrailingSilence,
        Operation::Reverse,
        Operation::Normalize,
        Operation::RemoveNoise,
        Operation::DownmixToMono,
    ];

    /// Short command-line name
    pub fn name(&self) -> &'static str {
        match self {
            Operation::TrimLeadingSilence => "trim-start",
            Operation::TrimTrailingSilence => "trim-end",
            Operation::Reverse => "reverse",
            Operation::Normalize => "normalize",
            Operation::RemoveNoise => "denoise",
            Operation::DownmixToMono => "mono",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .iter()
            .copied()
            .find(|op| op.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                let names: Vec<&str> = Operation::ALL.iter().map(|op| op.name()).collect();
                EditError::InvalidParameter(format!(
                    "Unknown operation '{}', expected one of: {}",
                    s,
                    names.join(", ")
                ))
            })
    }
}

/// Run a named operation with the thresholds and modes from `config`
pub fn apply_operation(
    buffer: &AudioBuffer,
    operation: Operation,
    config: &EditorConfig,
) -> Result<AudioBuffer, EditError> {
    log::debug!("Applying {} to {} samples", operation, buffer.len());

    match operation {
        Operation::TrimLeadingSilence => {
            silence::trim_leading_silence(buffer, config.silence_threshold)
        }
        Operation::TrimTrailingSilence => {
            silence::trim_trailing_silence(buffer, config.silence_threshold)
        }
        Operation::Reverse => Ok(config.reverse_mode.apply(buffer)),
        Operation::Normalize => Ok(normalization::normalize(buffer)),
        Operation::RemoveNoise => gate::remove_noise_gate(buffer, config.noise_gate_threshold),
        Operation::DownmixToMono => Ok(channel_mixer::downmix_to_mono(buffer)),
    }
}
