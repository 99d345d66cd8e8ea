//! Audio I/O modules
//!
//! The interleaved sample buffer, the 16-bit PCM WAV encoder/decoder, and
//! small file helpers around them.

pub mod decoder;
pub mod encoder;
pub mod sample_buffer;

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::EditError;
use decoder::decode_wav;
use encoder::encode_wav;
use sample_buffer::AudioBuffer;

/// Read and decode a WAV file
pub fn read_wav_file<P: AsRef<Path>>(path: P) -> Result<AudioBuffer, EditError> {
    let path = path.as_ref();
    log::debug!("Reading WAV file: {}", path.display());
    let bytes = fs::read(path)?;
    decode_wav(&bytes)
}

/// Encode a buffer and write it to `path`
///
/// The buffer is fully encoded before the file is opened, so an encode failure
/// never leaves a partial or empty file behind. Returns the number of bytes written.
pub fn write_wav_file<P: AsRef<Path>>(path: P, buffer: &AudioBuffer) -> Result<usize, EditError> {
    let path = path.as_ref();
    let bytes = encode_wav(buffer)?;
    fs::write(path, &bytes)?;
    log::debug!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(bytes.len())
}

/// True if `path` has a `.wav` extension (any case)
///
/// Only WAV sources can be overwritten in place; other formats must be saved
/// under a new name.
pub fn is_wav_path<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("wav"))
        .unwrap_or(false)
}

/// Default save-as target for an edited clip: `<dir>/<stem>_edited.wav`
pub fn edited_file_name<P: AsRef<Path>>(path: P) -> PathBuf {
    let path = path.as_ref();
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "clip".to_string());
    path.with_file_name(format!("{}_edited.wav", stem))
}
