//! Performance benchmarks for the editing pipeline

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pcm_editor::{
    apply_gain_and_fades, downmix_to_mono, encode_wav, normalize, remove_noise_gate, AudioBuffer,
    FadeSpec,
};

/// 30 seconds of stereo audio at 44.1kHz
fn stereo_clip() -> AudioBuffer {
    let samples: Vec<f32> = (0..44100 * 30 * 2)
        .map(|i| (i as f32 * 440.0 * 2.0 * std::f32::consts::PI / 88200.0).sin() * 0.5)
        .collect();
    AudioBuffer::new(samples, 2, 44100).unwrap()
}

fn bench_transforms(c: &mut Criterion) {
    let clip = stereo_clip();

    c.bench_function("gain_and_fades_30s", |b| {
        b.iter(|| apply_gain_and_fades(black_box(&clip), 1.5, FadeSpec::new(2.0, 2.0)))
    });

    c.bench_function("normalize_30s", |b| b.iter(|| normalize(black_box(&clip))));

    c.bench_function("noise_gate_30s", |b| {
        b.iter(|| remove_noise_gate(black_box(&clip), 0.01))
    });

    c.bench_function("downmix_30s", |b| b.iter(|| downmix_to_mono(black_box(&clip))));
}

fn bench_encode(c: &mut Criterion) {
    let clip = stereo_clip();

    c.bench_function("encode_wav_30s", |b| b.iter(|| encode_wav(black_box(&clip))));
}

criterion_group!(benches, bench_transforms, bench_encode);
criterion_main!(benches);
