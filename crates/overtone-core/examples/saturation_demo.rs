//! Saturation demo: latency per configuration and a driven tanh stage.
//!
//! Run with: RUST_LOG=debug cargo run -p overtone-core --example saturation_demo --features tracing

use overtone_core::{
    MonoOversampler, OversamplingConfig, OversamplingFactor, OversamplingMode, OversamplingQuality,
    db_to_linear, linear_to_db, rms, soft_clip,
};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let sample_rate = 44100.0;
    let drive = db_to_linear(18.0);
    let qualities = [
        OversamplingQuality::Economy,
        OversamplingQuality::Standard,
        OversamplingQuality::High,
    ];
    let modes = [OversamplingMode::ZeroLatency, OversamplingMode::LinearPhase];

    // --- Latency table ---
    println!("=== Reported Latency (base-rate samples) ===\n");
    println!("{:<10} {:<14} {:>6} {:>6}", "Quality", "Mode", "2x", "4x");
    println!("{:-<10} {:-<14} {:->6} {:->6}", "", "", "", "");
    for quality in qualities {
        for mode in modes {
            let x2 = OversamplingConfig::new(OversamplingFactor::X2, quality, mode);
            let x4 = OversamplingConfig::new(OversamplingFactor::X4, quality, mode);
            println!(
                "{:<10} {:<14} {:>6} {:>6}",
                quality.name(),
                mode.name(),
                x2.latency(),
                x4.latency()
            );
        }
    }

    // --- Driven tanh on a 5 kHz tone ---
    println!("\n=== tanh at +18 dB drive, 5 kHz input ===\n");
    println!("{:<32} {:>10}", "Configuration", "Level dB");
    println!("{:-<32} {:->10}", "", "");

    let input: Vec<f32> = (0..8192)
        .map(|n| 0.5 * libm::sinf(core::f32::consts::TAU * 5000.0 * n as f32 / sample_rate))
        .collect();

    for factor in [OversamplingFactor::X2, OversamplingFactor::X4] {
        for quality in qualities {
            let config = OversamplingConfig::new(factor, quality, OversamplingMode::LinearPhase);
            let mut os = MonoOversampler::new(factor);
            os.prepare_config(sample_rate, 512, &config);

            let mut buffer = input.clone();
            os.process(&mut buffer, |elevated| {
                for s in elevated.iter_mut() {
                    *s = soft_clip(drive * *s);
                }
            });
            let level = linear_to_db(rms(&buffer[1024..]));
            tracing::info!(%config, latency = os.latency(), level_db = level, "processed");
            println!("{:<32} {:>10.2}", config.to_string(), level);
        }
    }
}
