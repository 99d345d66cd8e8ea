//! Waveform envelopes for preview rendering

/// Peak envelope: one absolute-maximum value per column
///
/// Columns cover `pack = max(1, len / width)` consecutive interleaved samples,
/// starting at `x * pack`. Columns past the end of the data are 0.0, so the
/// result always has exactly `width` entries.
///
/// # Example
///
/// ```
/// use pcm_editor::waveform::peak_envelope;
///
/// let peaks = peak_envelope(&[0.1, -0.8, 0.3, 0.2], 2);
/// assert_eq!(peaks, vec![0.8, 0.3]);
/// ```
pub fn peak_envelope(samples: &[f32], width: usize) -> Vec<f32> {
    if width == 0 {
        return Vec::new();
    }

    let pack = (samples.len() / width).max(1);

    (0..width)
        .map(|x| {
            let start = (x * pack).min(samples.len());
            let end = (start + pack).min(samples.len());
            samples[start..end]
                .iter()
                .map(|&s| s.abs())
                .fold(0.0f32, f32::max)
        })
        .collect()
}

/// Signed min/max envelope with up to `bins` entries
///
/// Bins are spread evenly over the whole buffer; empty input or zero bins
/// yields an empty envelope.
pub fn min_max_envelope(samples: &[f32], bins: usize) -> Vec<(f32, f32)> {
    let mut out = Vec::with_capacity(bins);
    if samples.is_empty() || bins == 0 {
        return out;
    }

    let len = samples.len();
    let step = (len as f64 / bins as f64).max(1.0);
    let mut pos = 0.0f64;

    for _ in 0..bins {
        let start = pos as usize;
        let end = ((pos + step) as usize).min(len);
        if start >= end {
            break;
        }

        let (mn, mx) = samples[start..end]
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(mn, mx), &v| (mn.min(v), mx.max(v)));
        out.push((mn, mx));

        pos += step;
    }

    out
}
