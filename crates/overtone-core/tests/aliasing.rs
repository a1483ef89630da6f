//! Spectral measurement of aliasing with and without oversampling.
//!
//! A 5 kHz sine is hard-clipped, which generates odd harmonics far above
//! Nyquist. Without oversampling they fold straight back into the band; with
//! oversampling they are removed by the decimation filters. Alias energy is
//! everything in the spectrum that is not near DC or a harmonic of the tone.

use overtone_core::{
    MonoOversampler, OversamplingFactor, OversamplingMode, OversamplingQuality, hard_clip,
};
use rustfft::{FftPlanner, num_complex::Complex};

const SAMPLE_RATE: f32 = 44100.0;
const FFT_SIZE: usize = 8192;
const SETTLE: usize = 4096;
/// Tone sits exactly on bin 930 (≈5006 Hz) so its harmonics are bin-centred.
const TONE_BIN: usize = 930;
const GUARD_BINS: usize = 8;
const CLIP: f32 = 0.3;

fn clipped_tone_input() -> Vec<f32> {
    (0..SETTLE + FFT_SIZE)
        .map(|n| {
            let phase = ((TONE_BIN * n) % FFT_SIZE) as f64 / FFT_SIZE as f64;
            0.9 * libm::sin(core::f64::consts::TAU * phase) as f32
        })
        .collect()
}

/// Fraction of spectral power outside DC and the in-band harmonics, in dB.
fn alias_level_db(signal: &[f32]) -> f64 {
    let n = signal.len();
    let mut spectrum: Vec<Complex<f64>> = signal
        .iter()
        .enumerate()
        .map(|(i, &s)| {
            let x = core::f64::consts::TAU * i as f64 / n as f64;
            let w = 0.35875 - 0.48829 * libm::cos(x) + 0.14128 * libm::cos(2.0 * x)
                - 0.01168 * libm::cos(3.0 * x);
            Complex::new(f64::from(s) * w, 0.0)
        })
        .collect();

    let mut planner = FftPlanner::<f64>::new();
    planner.plan_fft_forward(n).process(&mut spectrum);

    let power: Vec<f64> = spectrum[..n / 2].iter().map(|c| c.norm_sqr()).collect();
    let harmonics: Vec<usize> = (1..=n / 2 / TONE_BIN)
        .map(|m| m * TONE_BIN)
        .filter(|&bin| bin < n / 2)
        .collect();
    let is_signal = |bin: usize| {
        bin <= GUARD_BINS || harmonics.iter().any(|&h| bin.abs_diff(h) <= GUARD_BINS)
    };

    let total: f64 = power.iter().sum();
    let alias: f64 = power
        .iter()
        .enumerate()
        .filter(|&(bin, _)| !is_signal(bin))
        .map(|(_, p)| p)
        .sum();
    10.0 * libm::log10(alias.max(1e-30) / total)
}

fn naive_alias_db() -> f64 {
    let output: Vec<f32> = clipped_tone_input()
        .iter()
        .map(|&x| hard_clip(x, CLIP))
        .collect();
    alias_level_db(&output[SETTLE..])
}

fn oversampled_alias_db(
    factor: OversamplingFactor,
    quality: OversamplingQuality,
    mode: OversamplingMode,
) -> f64 {
    let mut os = MonoOversampler::new(factor);
    os.prepare(SAMPLE_RATE, 512, quality, mode);
    let mut buffer = clipped_tone_input();
    os.process(&mut buffer, |elevated| {
        for s in elevated.iter_mut() {
            *s = hard_clip(*s, CLIP);
        }
    });
    alias_level_db(&buffer[SETTLE..])
}

#[test]
fn naive_clipping_aliases_heavily() {
    let naive = naive_alias_db();
    assert!(naive > -25.0, "naive alias level {naive:.1} dB");
}

#[test]
fn four_times_high_quality_suppresses_aliases() {
    let naive = naive_alias_db();
    for mode in [OversamplingMode::ZeroLatency, OversamplingMode::LinearPhase] {
        let level = oversampled_alias_db(OversamplingFactor::X4, OversamplingQuality::High, mode);
        assert!(
            level < naive - 20.0,
            "4x High {mode}: {level:.1} dB vs naive {naive:.1} dB"
        );
    }
}

#[test]
fn every_configuration_improves_on_naive() {
    use OversamplingFactor::{X2, X4};
    use OversamplingMode::{LinearPhase, ZeroLatency};
    use OversamplingQuality::{Economy, High, Standard};

    let naive = naive_alias_db();
    let min_improvement = [
        (X2, Standard, LinearPhase, 8.0),
        (X2, Economy, ZeroLatency, 8.0),
        (X2, High, LinearPhase, 8.0),
        (X4, Standard, LinearPhase, 8.0),
        (X4, Economy, ZeroLatency, 15.0),
    ];
    for (factor, quality, mode, improvement) in min_improvement {
        let level = oversampled_alias_db(factor, quality, mode);
        assert!(
            level < naive - improvement,
            "{factor} {quality} {mode}: {level:.1} dB vs naive {naive:.1} dB"
        );
    }
}
