//! Fixed integer delay for latency alignment.
//!
//! The factor-4 cascade runs two halfband stages back to back. The outer stage
//! contributes its full FIR group delay at the base rate, but the inner stage
//! runs at twice the base rate and only contributes half of its tap delay.
//! [`CompensationDelay`] pads the intermediate signal so the end-to-end delay
//! equals the sum of the stage latencies that the oversampler reports.

#[cfg(not(feature = "std"))]
use alloc::vec;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Fixed-delay mono ring buffer.
///
/// Allocates once in [`new()`](Self::new); processing never allocates.
///
/// # Example
///
/// ```rust
/// use overtone_core::CompensationDelay;
///
/// let mut delay = CompensationDelay::new(2);
/// assert_eq!(delay.process(1.0), 0.0);
/// assert_eq!(delay.process(2.0), 0.0);
/// assert_eq!(delay.process(3.0), 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct CompensationDelay {
    buffer: Vec<f32>,
    write_pos: usize,
    delay_samples: usize,
}

impl CompensationDelay {
    /// Creates a delay of `delay_samples`. A zero delay is a no-op.
    pub fn new(delay_samples: usize) -> Self {
        Self {
            buffer: vec![0.0; delay_samples.max(1)],
            write_pos: 0,
            delay_samples,
        }
    }

    /// Returns the delay in samples.
    pub fn delay_samples(&self) -> usize {
        self.delay_samples
    }

    /// Pushes one sample and returns the sample written `delay_samples` ago.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        if self.delay_samples == 0 {
            return input;
        }
        let output = self.buffer[self.write_pos];
        self.buffer[self.write_pos] = input;
        self.write_pos = (self.write_pos + 1) % self.delay_samples;
        output
    }

    /// Delays an entire block in place.
    pub fn process_block_inplace(&mut self, block: &mut [f32]) {
        if self.delay_samples == 0 {
            return;
        }
        for sample in block.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    /// Zeroes the delay contents.
    pub fn clear(&mut self) {
        self.buffer.fill(0.0);
        self.write_pos = 0;
    }
}
