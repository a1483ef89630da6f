//! The [`Effect`] trait: a mono, sample-rate-aware processor.
//!
//! [`Oversampled`](crate::Oversampled) accepts any `Effect` and runs it at the
//! oversampled rate, so a nonlinearity written once at the base rate can be
//! moved to 2× or 4× without changing its code. The trait is object-safe;
//! `Box<dyn Effect>` works where runtime selection is needed.

/// Mono audio processor.
///
/// Implementations must not allocate or block in the processing methods.
///
/// # Example
///
/// ```rust
/// use overtone_core::Effect;
///
/// struct Drive {
///     gain: f32,
/// }
///
/// impl Effect for Drive {
///     fn process(&mut self, input: f32) -> f32 {
///         libm::tanhf(input * self.gain)
///     }
///
///     fn set_sample_rate(&mut self, _sample_rate: f32) {
///         // Memoryless: nothing depends on the rate
///     }
///
///     fn reset(&mut self) {}
/// }
///
/// let mut drive = Drive { gain: 4.0 };
/// assert!(drive.process(1.0) < 1.0);
/// ```
pub trait Effect {
    /// Process a single sample.
    fn process(&mut self, input: f32) -> f32;

    /// Process `input` into `output` (same length).
    ///
    /// Default implementation calls [`process()`](Self::process) per sample.
    fn process_block(&mut self, input: &[f32], output: &mut [f32]) {
        debug_assert_eq!(
            input.len(),
            output.len(),
            "Input and output buffers must have same length"
        );
        for (inp, out) in input.iter().zip(output.iter_mut()) {
            *out = self.process(*inp);
        }
    }

    /// Process a buffer in place.
    ///
    /// This is the entry point [`Oversampled`](crate::Oversampled) uses for
    /// whole elevated-rate blocks.
    fn process_block_inplace(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    /// Update the sample rate.
    ///
    /// Inside an oversampler this receives the elevated rate.
    fn set_sample_rate(&mut self, sample_rate: f32);

    /// Clear internal state without changing parameters.
    fn reset(&mut self);

    /// Processing latency in samples at the rate the effect runs at.
    ///
    /// Default returns 0 (no latency).
    fn latency_samples(&self) -> usize {
        0
    }
}
