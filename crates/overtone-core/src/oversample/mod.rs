//! Multirate oversampling engine for anti-aliased nonlinear processing.
//!
//! Nonlinear processing (saturation, distortion, bit reduction) creates
//! harmonics above Nyquist that fold back into the audible band. Running the
//! nonlinearity at a multiple of the sample rate leaves room for those
//! harmonics, and a halfband filter removes them before the rate is restored.
//!
//! ```text
//! buffer ──► zero-insert + halfband (up) ──► callback at N×fs ──► halfband + decimate (down) ──► buffer
//! ```
//!
//! # Lifecycle
//!
//! An [`Oversampler`] starts inert. [`prepare()`](Oversampler::prepare)
//! allocates every buffer for the largest block the caller will pass and
//! clears all filter memory; [`reset()`](Oversampler::reset) clears memory
//! without touching the configuration. Audio-path calls never allocate.
//!
//! ```rust
//! use overtone_core::{
//!     OversamplingFactor, OversamplingMode, OversamplingQuality, StereoOversampler,
//! };
//!
//! let mut os = StereoOversampler::new(OversamplingFactor::X4);
//! os.prepare(48000.0, 256, OversamplingQuality::High, OversamplingMode::LinearPhase);
//! assert_eq!(os.latency(), 62);
//!
//! let mut left = [0.1_f32; 256];
//! let mut right = [0.2_f32; 256];
//! os.process(&mut left, &mut right, |l, r| {
//!     assert_eq!(l.len(), 1024);
//!     for s in l.iter_mut().chain(r.iter_mut()) {
//!         *s = libm::tanhf(4.0 * *s);
//!     }
//! });
//! ```
//!
//! # Invalid input
//!
//! Nothing here returns an error or panics on bad numbers. Sample rates and
//! block sizes are clamped into range, calls before `prepare()` are harmless,
//! and non-finite samples flush the filter that saw them.

mod adapter;
pub mod config;

pub use adapter::Oversampled;
pub use config::{
    ConfigError, OversamplingConfig, OversamplingFactor, OversamplingMode, OversamplingQuality,
};

#[cfg(not(feature = "std"))]
use alloc::vec;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::cascade::FilterCascade;
use crate::halfband::Direction;

/// Sample rate used when the caller passes a non-finite or non-positive rate.
pub const DEFAULT_SAMPLE_RATE: f32 = 44_100.0;

/// Highest accepted base sample rate (Hz).
pub const MAX_SAMPLE_RATE: f32 = 768_000.0;

/// Largest accepted `max_block_size`.
pub const MAX_BLOCK_SIZE: usize = 65_536;

/// Single-channel oversampler.
pub type MonoOversampler = Oversampler<1>;

/// Two-channel oversampler with independent filter memory per channel.
pub type StereoOversampler = Oversampler<2>;

/// Filter memory and elevated-rate buffer owned by one channel.
#[derive(Debug, Clone)]
struct ChannelState {
    up: FilterCascade,
    down: FilterCascade,
    /// `max_block_size × factor` samples handed to the callback.
    work: Vec<f32>,
}

impl ChannelState {
    fn new(config: OversamplingConfig, max_block_size: usize) -> Self {
        let design = config.design();
        Self {
            up: FilterCascade::new(design, config.factor, Direction::Up, max_block_size),
            down: FilterCascade::new(design, config.factor, Direction::Down, max_block_size),
            work: vec![0.0; max_block_size * config.factor.ratio()],
        }
    }

    fn reset(&mut self) {
        self.up.reset();
        self.down.reset();
        self.work.fill(0.0);
    }
}

/// Oversampling engine for `CHANNELS` channels.
///
/// Each channel owns its own up and down [`FilterCascade`]; nothing is
/// shared between channels. Use [`MonoOversampler`] or [`StereoOversampler`]
/// for the callback-driven [`process`](Oversampler::process) API, or the
/// per-channel [`upsample`](Self::upsample) / [`downsample`](Self::downsample)
/// primitives for any channel count.
#[derive(Debug, Clone)]
pub struct Oversampler<const CHANNELS: usize> {
    config: OversamplingConfig,
    sample_rate: f32,
    max_block_size: usize,
    latency: usize,
    prepared: bool,
    channels: [ChannelState; CHANNELS],
}

impl<const CHANNELS: usize> Oversampler<CHANNELS> {
    /// Creates an inert oversampler: unprepared, latency 0.
    ///
    /// Quality and mode start at their defaults (Standard, LinearPhase) and
    /// take effect on the first [`prepare()`](Self::prepare).
    pub fn new(factor: OversamplingFactor) -> Self {
        let config = OversamplingConfig {
            factor,
            ..OversamplingConfig::default()
        };
        Self {
            config,
            sample_rate: DEFAULT_SAMPLE_RATE,
            max_block_size: 0,
            latency: 0,
            prepared: false,
            channels: core::array::from_fn(|_| ChannelState::new(config, 0)),
        }
    }

    /// Configures the engine and clears all filter memory.
    ///
    /// Allocates `max_block_size × factor` samples of working memory per
    /// channel. Safe to call repeatedly, e.g. on a sample-rate change. Call
    /// it from the configuration path, not concurrently with processing.
    pub fn prepare(
        &mut self,
        sample_rate: f32,
        max_block_size: usize,
        quality: OversamplingQuality,
        mode: OversamplingMode,
    ) {
        let config = OversamplingConfig {
            quality,
            mode,
            ..self.config
        };
        self.prepare_config(sample_rate, max_block_size, &config);
    }

    /// Like [`prepare()`](Self::prepare), taking every choice (including the
    /// factor) from `config`.
    pub fn prepare_config(
        &mut self,
        sample_rate: f32,
        max_block_size: usize,
        config: &OversamplingConfig,
    ) {
        let max_block_size = clamp_block_size(max_block_size);
        self.config = *config;
        self.sample_rate = clamp_sample_rate(sample_rate);
        self.max_block_size = max_block_size;
        self.channels = core::array::from_fn(|_| ChannelState::new(*config, max_block_size));
        self.latency = config.latency();
        self.prepared = true;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "oversampler_prepare: {} channels, {config}, {} Hz, block {}, latency {}",
            CHANNELS,
            self.sample_rate,
            self.max_block_size,
            self.latency
        );
    }

    /// Clears filter memory and pending samples. Keeps buffers and configuration.
    pub fn reset(&mut self) {
        for channel in &mut self.channels {
            channel.reset();
        }

        #[cfg(feature = "tracing")]
        tracing::debug!("oversampler_reset: {} channels", CHANNELS);
    }

    /// Output delay in base-rate samples. 0 until prepared.
    pub fn latency(&self) -> usize {
        self.latency
    }

    /// The configured factor.
    pub fn factor(&self) -> OversamplingFactor {
        self.config.factor
    }

    /// The factor as a number (2 or 4).
    pub fn ratio(&self) -> usize {
        self.config.factor.ratio()
    }

    /// Quality tier.
    pub fn quality(&self) -> OversamplingQuality {
        self.config.quality
    }

    /// Latency mode as requested. Economy runs recursive filters in either mode.
    pub fn mode(&self) -> OversamplingMode {
        self.config.mode
    }

    /// Full configuration.
    pub fn config(&self) -> OversamplingConfig {
        self.config
    }

    /// True exactly when the linear-phase FIR filters are active.
    pub fn is_using_fir(&self) -> bool {
        self.prepared && self.config.is_fir()
    }

    /// True after the first [`prepare()`](Self::prepare).
    pub fn is_prepared(&self) -> bool {
        self.prepared
    }

    /// Base sample rate (Hz), after clamping.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Rate the callback runs at: `sample_rate × factor`.
    pub fn oversampled_rate(&self) -> f32 {
        self.sample_rate * self.ratio() as f32
    }

    /// Block size the engine was prepared for, after clamping. 0 until prepared.
    pub fn max_block_size(&self) -> usize {
        self.max_block_size
    }

    /// Number of channels.
    pub const fn num_channels(&self) -> usize {
        CHANNELS
    }

    /// Upsamples one channel: `input` at the base rate into `output` at
    /// `factor` times the rate.
    ///
    /// Writes `min(input.len(), output.len() / factor) × factor` samples.
    /// When unprepared or when `channel` is out of range those samples are
    /// set to silence.
    pub fn upsample(&mut self, input: &[f32], output: &mut [f32], channel: usize) {
        let ratio = self.ratio();
        let frames = input.len().min(output.len() / ratio);
        let output = &mut output[..frames * ratio];
        match self.channels.get_mut(channel) {
            Some(state) if self.prepared => {
                state.up.interpolate(&input[..frames], output);
            }
            _ => output.fill(0.0),
        }
    }

    /// Downsamples one channel: `input` at `factor` times the rate back into
    /// `output` at the base rate.
    ///
    /// Writes `min(output.len(), input.len() / factor)` samples, or silence
    /// when unprepared or when `channel` is out of range.
    pub fn downsample(&mut self, input: &[f32], output: &mut [f32], channel: usize) {
        let ratio = self.ratio();
        let frames = output.len().min(input.len() / ratio);
        let output = &mut output[..frames];
        match self.channels.get_mut(channel) {
            Some(state) if self.prepared => {
                state.down.decimate(&input[..frames * ratio], output);
            }
            _ => output.fill(0.0),
        }
    }
}

impl<const CHANNELS: usize> Default for Oversampler<CHANNELS> {
    fn default() -> Self {
        Self::new(OversamplingFactor::default())
    }
}

impl Oversampler<1> {
    /// Upsamples `buffer`, hands the elevated samples to `callback`, then
    /// filters and decimates back into `buffer`.
    ///
    /// The callback sees exactly `buffer.len() × factor` samples, in one call
    /// when the buffer fits the prepared block size and in consecutive
    /// block-sized chunks otherwise. Before `prepare()` the callback is not
    /// invoked and the buffer passes through, with non-finite samples
    /// replaced by silence.
    pub fn process<F>(&mut self, buffer: &mut [f32], mut callback: F)
    where
        F: FnMut(&mut [f32]),
    {
        if !self.prepared {
            flush_non_finite(buffer);
            return;
        }
        if buffer.is_empty() {
            return;
        }
        let ratio = self.ratio();
        let [channel] = &mut self.channels;

        for block in buffer.chunks_mut(self.max_block_size) {
            let elevated = &mut channel.work[..block.len() * ratio];
            channel.up.interpolate(block, elevated);
            callback(elevated);
            channel.down.decimate(elevated, block);
        }
    }
}

impl Oversampler<2> {
    /// Stereo form of [`Oversampler::<1>::process`]. Processes
    /// `min(left.len(), right.len())` frames; the callback receives the left
    /// and right elevated buffers together.
    pub fn process<F>(&mut self, left: &mut [f32], right: &mut [f32], mut callback: F)
    where
        F: FnMut(&mut [f32], &mut [f32]),
    {
        let frames = left.len().min(right.len());
        if !self.prepared {
            flush_non_finite(&mut left[..frames]);
            flush_non_finite(&mut right[..frames]);
            return;
        }
        if frames == 0 {
            return;
        }
        let ratio = self.ratio();
        let [l, r] = &mut self.channels;

        for (left, right) in left[..frames]
            .chunks_mut(self.max_block_size)
            .zip(right[..frames].chunks_mut(self.max_block_size))
        {
            let len = left.len() * ratio;
            let (elevated_l, elevated_r) = (&mut l.work[..len], &mut r.work[..len]);
            l.up.interpolate(left, elevated_l);
            r.up.interpolate(right, elevated_r);
            callback(elevated_l, elevated_r);
            l.down.decimate(elevated_l, left);
            r.down.decimate(elevated_r, right);
        }
    }
}

fn flush_non_finite(buffer: &mut [f32]) {
    for s in buffer.iter_mut().filter(|s| !s.is_finite()) {
        *s = 0.0;
    }
}

fn clamp_sample_rate(sample_rate: f32) -> f32 {
    if !sample_rate.is_finite() || sample_rate <= 0.0 {
        #[cfg(feature = "tracing")]
        tracing::warn!(
            "oversampler_prepare: invalid sample rate {sample_rate}, using {DEFAULT_SAMPLE_RATE}"
        );
        return DEFAULT_SAMPLE_RATE;
    }
    if sample_rate > MAX_SAMPLE_RATE {
        #[cfg(feature = "tracing")]
        tracing::warn!(
            "oversampler_prepare: sample rate {sample_rate} clamped to {MAX_SAMPLE_RATE}"
        );
        return MAX_SAMPLE_RATE;
    }
    sample_rate
}

fn clamp_block_size(max_block_size: usize) -> usize {
    let clamped = max_block_size.clamp(1, MAX_BLOCK_SIZE);
    #[cfg(feature = "tracing")]
    if clamped != max_block_size {
        tracing::warn!("oversampler_prepare: block size {max_block_size} clamped to {clamped}");
    }
    clamped
}
