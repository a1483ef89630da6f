//! Small numeric helpers shared by the filters and the oversampler.
//!
//! All functions are allocation-free and `no_std` friendly (`libm` for the
//! transcendental functions).
//!
//! # Level Conversions
//!
//! - [`db_to_linear`] / [`linear_to_db`] - Convert between dB and linear gain
//! - [`rms`] - Root-mean-square level of a block
//!
//! # Waveshaping
//!
//! - [`soft_clip`] - tanh saturation (the canonical oversampled nonlinearity)
//! - [`hard_clip`] - flat-top clipping, rich in aliasing-prone harmonics
//!
//! # Filter State Hygiene
//!
//! - [`flush_denormal`] - Keep recursive state out of the subnormal range

use libm::{expf, logf, sqrt, tanhf};

/// Convert decibels to linear gain.
///
/// # Example
/// ```rust
/// use overtone_core::db_to_linear;
///
/// assert!((db_to_linear(0.0) - 1.0).abs() < 0.001);
/// assert!((db_to_linear(-6.02) - 0.5).abs() < 0.01);
/// ```
#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    const FACTOR: f32 = core::f32::consts::LN_10 / 20.0;
    expf(db * FACTOR)
}

/// Convert linear gain to decibels.
///
/// Inputs at or below 1e-10 map to -200 dB instead of negative infinity.
///
/// # Example
/// ```rust
/// use overtone_core::linear_to_db;
///
/// assert!(linear_to_db(1.0).abs() < 0.001);
/// assert!((linear_to_db(0.5) - (-6.02)).abs() < 0.01);
/// ```
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    const FACTOR: f32 = 20.0 / core::f32::consts::LN_10;
    logf(linear.max(1e-10)) * FACTOR
}

/// Root-mean-square level of a block. Empty blocks read as silence.
///
/// Accumulates in `f64` so long measurement blocks keep their precision.
pub fn rms(block: &[f32]) -> f32 {
    if block.is_empty() {
        return 0.0;
    }
    let sum_sq: f64 = block.iter().map(|&s| f64::from(s) * f64::from(s)).sum();
    sqrt(sum_sq / block.len() as f64) as f32
}

/// Soft clip using hyperbolic tangent.
///
/// Smooth saturation that approaches ±1 asymptotically and produces odd
/// harmonics. Run it inside an oversampler callback to keep those harmonics
/// from folding back below the base Nyquist frequency.
#[inline]
pub fn soft_clip(x: f32) -> f32 {
    tanhf(x)
}

/// Hard clip to the ±`threshold` range.
#[inline]
pub fn hard_clip(x: f32, threshold: f32) -> f32 {
    x.clamp(-threshold, threshold)
}

/// Flush subnormal (denormalized) floats to zero.
///
/// Subnormal floats cause severe CPU slowdowns on most architectures. Values
/// below 1e-20 are replaced with zero, leaving margin before the IEEE 754
/// subnormal range begins. Used on every recursive state update.
#[allow(clippy::inline_always)]
#[inline(always)]
pub fn flush_denormal(x: f32) -> f32 {
    if x.abs() < 1e-20 { 0.0 } else { x }
}
