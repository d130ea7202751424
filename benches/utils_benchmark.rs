use std::f64::consts::PI;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use vocal_contour::{
    detector::{yin::YINDetector, PitchDetector},
    formant::{compute_lpc, extract_formants},
    track::{median_smooth, track_pitch, PitchTrackerConfig},
    utils::{framing::FrameConfig, window::hann},
};

pub fn utils_benchmark(c: &mut Criterion) {
    c.bench_function("hann 1024", |b| b.iter(|| hann::<f64>(black_box(1024))));

    let signal = tone(200.0, 16000, 16000.0);
    let config = PitchTrackerConfig {
        sample_rate: 16000.0,
        frame: FrameConfig::new(1024, 512).unwrap(),
        min_freq: 70.0,
        max_freq: 500.0,
        threshold: 0.1,
    };
    let frames = track_pitch(&signal, &config).unwrap();

    c.bench_function("median_smooth", |b| {
        b.iter(|| median_smooth(black_box(&frames), 5))
    });
}

pub fn pitch_detect_benchmark(c: &mut Criterion) {
    const SAMPLE_RATE: f64 = 16000.0;
    const SIZE: usize = 1024;

    let signal = tone(300.0, SIZE, SAMPLE_RATE);
    let detector = YINDetector::new(SIZE, 70.0, 500.0, 0.1);

    c.bench_function("YIN get_pitch", |b| {
        b.iter(|| detector.get_pitch(black_box(&signal), SAMPLE_RATE))
    });

    let long = tone(300.0, 16000, SAMPLE_RATE);
    let config = PitchTrackerConfig {
        sample_rate: SAMPLE_RATE,
        frame: FrameConfig::new(SIZE, SIZE / 2).unwrap(),
        min_freq: 70.0,
        max_freq: 500.0,
        threshold: 0.1,
    };

    c.bench_function("track_pitch 1s", |b| {
        b.iter(|| track_pitch(black_box(&long), &config).unwrap())
    });
}

pub fn formant_benchmark(c: &mut Criterion) {
    // Two damped resonances, close enough to a vowel for the root finder to work on.
    let frame: Vec<f64> = (0..1024)
        .map(|n| {
            let t = n as f64 / 16000.0;
            (-200.0 * t).exp()
                * ((2.0 * PI * 700.0 * t).sin() + 0.5 * (2.0 * PI * 1800.0 * t).sin())
        })
        .collect();

    c.bench_function("compute_lpc order 12", |b| {
        b.iter(|| compute_lpc(black_box(&frame), 12, 0.97))
    });

    let lpc = compute_lpc(&frame, 12, 0.97);
    c.bench_function("extract_formants order 12", |b| {
        b.iter(|| extract_formants(black_box(&lpc.coefficients), 16000.0))
    });
}

fn tone(freq: f64, size: usize, sample_rate: f64) -> Vec<f64> {
    let dt = 1.0 / sample_rate;
    (0..size)
        .map(|x| (2.0 * PI * x as f64 * dt * freq).sin())
        .collect()
}

criterion_group!(benches, pitch_detect_benchmark, formant_benchmark, utils_benchmark);
criterion_main!(benches);
