//! [`Effect`] adapter that runs any effect inside a [`MonoOversampler`].

use super::{MonoOversampler, OversamplingConfig, OversamplingFactor};
use crate::Effect;

/// Block size used by [`Oversampled::new`].
const DEFAULT_BLOCK_SIZE: usize = 512;

/// Oversampling wrapper for any effect.
///
/// The inner effect runs at `factor × sample_rate`. Blocks passed to
/// [`process_block_inplace`](Effect::process_block_inplace) are upsampled,
/// processed by the inner effect in one pass, then filtered back down.
///
/// # Example
///
/// ```rust
/// use overtone_core::{Effect, Oversampled, OversamplingFactor};
///
/// struct Fuzz;
///
/// impl Effect for Fuzz {
///     fn process(&mut self, input: f32) -> f32 {
///         (8.0 * input).clamp(-1.0, 1.0)
///     }
///     fn set_sample_rate(&mut self, _: f32) {}
///     fn reset(&mut self) {}
/// }
///
/// let mut fuzz = Oversampled::new(Fuzz, OversamplingFactor::X4, 48000.0);
/// assert_eq!(fuzz.latency_samples(), 30);
///
/// let mut block = [0.1_f32; 128];
/// fuzz.process_block_inplace(&mut block);
/// ```
#[derive(Debug, Clone)]
pub struct Oversampled<E: Effect> {
    effect: E,
    oversampler: MonoOversampler,
}

impl<E: Effect> Oversampled<E> {
    /// Wraps `effect` with Standard quality, linear phase and a 512-sample
    /// block size.
    pub fn new(effect: E, factor: OversamplingFactor, sample_rate: f32) -> Self {
        let config = OversamplingConfig {
            factor,
            ..OversamplingConfig::default()
        };
        Self::with_config(effect, &config, sample_rate, DEFAULT_BLOCK_SIZE)
    }

    /// Wraps `effect` with an explicit configuration.
    pub fn with_config(
        mut effect: E,
        config: &OversamplingConfig,
        sample_rate: f32,
        max_block_size: usize,
    ) -> Self {
        let mut oversampler = MonoOversampler::new(config.factor);
        oversampler.prepare_config(sample_rate, max_block_size, config);
        effect.set_sample_rate(oversampler.oversampled_rate());
        Self {
            effect,
            oversampler,
        }
    }

    /// Get a reference to the inner effect.
    pub fn inner(&self) -> &E {
        &self.effect
    }

    /// Get a mutable reference to the inner effect.
    pub fn inner_mut(&mut self) -> &mut E {
        &mut self.effect
    }

    /// Unwrap and return the inner effect.
    pub fn into_inner(self) -> E {
        self.effect
    }

    /// The oversampler driving the inner effect.
    pub fn oversampler(&self) -> &MonoOversampler {
        &self.oversampler
    }

    /// The oversampling factor.
    pub fn factor(&self) -> OversamplingFactor {
        self.oversampler.factor()
    }
}

impl<E: Effect> Effect for Oversampled<E> {
    fn process(&mut self, input: f32) -> f32 {
        let mut frame = [input];
        self.process_block_inplace(&mut frame);
        frame[0]
    }

    fn process_block(&mut self, input: &[f32], output: &mut [f32]) {
        debug_assert_eq!(input.len(), output.len());
        let frames = input.len().min(output.len());
        output[..frames].copy_from_slice(&input[..frames]);
        self.process_block_inplace(&mut output[..frames]);
    }

    fn process_block_inplace(&mut self, buffer: &mut [f32]) {
        let effect = &mut self.effect;
        self.oversampler
            .process(buffer, |elevated| effect.process_block_inplace(elevated));
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        let config = self.oversampler.config();
        let max_block_size = self.oversampler.max_block_size();
        self.oversampler
            .prepare_config(sample_rate, max_block_size, &config);
        // Inner effect runs at oversampled rate
        self.effect.set_sample_rate(self.oversampler.oversampled_rate());
    }

    fn reset(&mut self) {
        self.oversampler.reset();
        self.effect.reset();
    }

    fn latency_samples(&self) -> usize {
        // Inner latency is counted in oversampled samples.
        let inner = self.effect.latency_samples().div_ceil(self.oversampler.ratio());
        self.oversampler.latency() + inner
    }
}
