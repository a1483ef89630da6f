//! Overtone Core - multirate oversampling for anti-aliased nonlinear DSP
//!
//! This crate raises a signal's sample rate by 2× or 4×, hands the elevated
//! block to caller code (saturation, distortion, bit reduction), then filters
//! and decimates back to the original rate. Everything runs without heap
//! activity on the audio path and without `std`.
//!
//! # Core Abstractions
//!
//! ## Oversampling Engine
//!
//! - [`Oversampler`] - Per-channel engine with `upsample`/`downsample` primitives
//! - [`MonoOversampler`] / [`StereoOversampler`] - Callback-driven `process()`
//! - [`Oversampled`] - Runs any [`Effect`] at the oversampled rate
//!
//! ## Configuration
//!
//! - [`OversamplingFactor`] - 2× or 4× (two composed 2× stages)
//! - [`OversamplingQuality`] - Economy, Standard, High stopband tiers
//! - [`OversamplingMode`] - ZeroLatency (recursive) or LinearPhase (FIR)
//! - [`OversamplingConfig`] - All three, with a pure [`latency()`](OversamplingConfig::latency)
//!
//! ## Filters
//!
//! - [`HalfbandStage`] - One 2× rate change, recursive or symmetric FIR
//! - [`FilterCascade`] - One stage per doubling for one direction of one channel
//! - [`AllpassSection`] / [`AllpassChain`] - Branches of the recursive halfband
//! - [`CompensationDelay`] - Integer delay aligning the 4× linear-phase path
//!
//! ## Utilities
//!
//! - Math functions: [`db_to_linear`], [`linear_to_db`], [`rms`], [`soft_clip`], etc.
//!
//! # Latency
//!
//! | Quality | ZeroLatency | LinearPhase 2× | LinearPhase 4× |
//! |---------|-------------|----------------|----------------|
//! | Economy | 0 | 0 | 0 |
//! | Standard | 0 | 15 | 30 |
//! | High | 0 | 31 | 62 |
//!
//! # no_std Support
//!
//! Disable the default `std` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! overtone-core = { version = "0.1", default-features = false }
//! ```
//!
//! Optional features: `tracing` (configuration logs), `serde` (config types).
//!
//! # Example
//!
//! ```rust
//! use overtone_core::{MonoOversampler, OversamplingFactor, OversamplingMode, OversamplingQuality};
//!
//! let mut os = MonoOversampler::new(OversamplingFactor::X2);
//! os.prepare(44100.0, 512, OversamplingQuality::Standard, OversamplingMode::LinearPhase);
//! assert_eq!(os.latency(), 15);
//!
//! let mut buffer = [0.5_f32; 64];
//! os.process(&mut buffer, |elevated| {
//!     for s in elevated.iter_mut() {
//!         *s = overtone_core::soft_clip(3.0 * *s);
//!     }
//! });
//! assert!(buffer.iter().all(|s| s.is_finite()));
//! ```
//!
//! # Design Principles
//!
//! - **Real-time safe**: allocation happens in `prepare()` only
//! - **Infallible audio path**: invalid numbers are clamped, never reported
//! - **Independent channels**: no filter memory is shared between channels

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod allpass;
pub mod cascade;
pub mod delay;
pub mod effect;
pub mod halfband;
pub mod math;
pub mod oversample;

// Re-export main types at crate root
pub use allpass::{AllpassChain, AllpassSection, MAX_BRANCH_SECTIONS};
pub use cascade::FilterCascade;
pub use delay::CompensationDelay;
pub use effect::Effect;
pub use halfband::{Direction, HalfbandDesign, HalfbandStage, MAX_FIR_TAPS};
pub use math::{db_to_linear, flush_denormal, hard_clip, linear_to_db, rms, soft_clip};
pub use oversample::{
    ConfigError, DEFAULT_SAMPLE_RATE, MAX_BLOCK_SIZE, MAX_SAMPLE_RATE, MonoOversampler,
    Oversampled, Oversampler, OversamplingConfig, OversamplingFactor, OversamplingMode,
    OversamplingQuality, StereoOversampler,
};
