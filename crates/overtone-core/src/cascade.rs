//! One direction of the multirate filter path.
//!
//! A [`FilterCascade`] chains one [`HalfbandStage`] per rate doubling: one
//! stage for 2×, two for 4×. The up cascade turns `n` base-rate samples into
//! `factor · n` filtered samples; the down cascade does the reverse.
//!
//! ```text
//! up (4×):    base ──► stage 0 ──► 2× scratch ──► stage 1 ──► 4×
//! down (4×):  4× ──► stage 1 ──► 2× scratch ──► align ──► stage 0 ──► base
//! ```
//!
//! Stage 0 runs between the base rate and 2×, stage 1 between 2× and 4×.
//!
//! # Latency alignment
//!
//! A linear-phase stage delays its signal by `L` samples at the rate it runs
//! at, so the inner stage contributes only half as much base-rate delay as the
//! outer one. The down cascade pads the 2× signal by `L` samples so the
//! end-to-end delay of a 4× round trip is exactly `2·L` base-rate samples,
//! the figure reported by [`latency()`](FilterCascade::latency).

#[cfg(not(feature = "std"))]
use alloc::vec;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::delay::CompensationDelay;
use crate::halfband::{Direction, HalfbandDesign, HalfbandStage};
use crate::oversample::config::OversamplingFactor;

/// Halfband stages for one direction of one channel.
///
/// All memory (stages, scratch, alignment delay) is allocated in
/// [`new()`](Self::new). Processing never allocates.
#[derive(Debug, Clone)]
pub struct FilterCascade {
    design: HalfbandDesign,
    direction: Direction,
    /// Stage 0 first (base ↔ 2×), then stage 1 (2× ↔ 4×).
    stages: Vec<HalfbandStage>,
    /// Intermediate 2×-rate samples for two-stage cascades.
    scratch: Vec<f32>,
    /// Base-rate frames that fit in `scratch`.
    chunk_frames: usize,
    align: CompensationDelay,
}

impl FilterCascade {
    /// Builds a cascade able to move `max_block_size` base-rate frames per
    /// chunk. Longer blocks are processed in several chunks.
    pub fn new(
        design: HalfbandDesign,
        factor: OversamplingFactor,
        direction: Direction,
        max_block_size: usize,
    ) -> Self {
        let stages: Vec<HalfbandStage> = (0..factor.stages())
            .map(|_| HalfbandStage::new(design, direction))
            .collect();
        let chunk_frames = max_block_size.max(1);
        let scratch = if stages.len() > 1 {
            vec![0.0; 2 * chunk_frames]
        } else {
            Vec::new()
        };
        let align_samples = match direction {
            Direction::Down if stages.len() > 1 => design.latency(),
            _ => 0,
        };

        Self {
            design,
            direction,
            stages,
            scratch,
            chunk_frames,
            align: CompensationDelay::new(align_samples),
        }
    }

    /// The halfband design shared by every stage.
    pub fn design(&self) -> HalfbandDesign {
        self.design
    }

    /// Up or down.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Number of halfband stages (1 for 2×, 2 for 4×).
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Rate change performed by the whole cascade.
    pub fn ratio(&self) -> usize {
        1 << self.stages.len()
    }

    /// Round-trip delay contributed by this cascade's design, in base-rate
    /// samples. The sum of the per-stage latencies.
    pub fn latency(&self) -> usize {
        self.stages.iter().map(HalfbandStage::latency).sum()
    }

    /// Upsamples `input` into `output`.
    ///
    /// Processes `min(input.len(), output.len() / ratio)` frames and returns
    /// that count. Samples of `output` past `frames · ratio` are untouched.
    pub fn interpolate(&mut self, input: &[f32], output: &mut [f32]) -> usize {
        let ratio = self.ratio();
        let frames = input.len().min(output.len() / ratio);
        let input = &input[..frames];
        let output = &mut output[..frames * ratio];

        match self.stages.as_mut_slice() {
            [stage] => interpolate_stage(stage, input, output),
            [outer, inner] => {
                for (block, out) in input
                    .chunks(self.chunk_frames)
                    .zip(output.chunks_mut(self.chunk_frames * 4))
                {
                    let mid = &mut self.scratch[..block.len() * 2];
                    interpolate_stage(outer, block, mid);
                    interpolate_stage(inner, mid, out);
                }
            }
            _ => output.copy_from_slice(input),
        }
        frames
    }

    /// Downsamples `input` into `output`.
    ///
    /// Processes `min(output.len(), input.len() / ratio)` frames and returns
    /// that count.
    pub fn decimate(&mut self, input: &[f32], output: &mut [f32]) -> usize {
        let ratio = self.ratio();
        let frames = output.len().min(input.len() / ratio);
        let input = &input[..frames * ratio];
        let output = &mut output[..frames];

        match self.stages.as_mut_slice() {
            [stage] => decimate_stage(stage, input, output),
            [outer, inner] => {
                for (block, out) in input
                    .chunks(self.chunk_frames * 4)
                    .zip(output.chunks_mut(self.chunk_frames))
                {
                    let mid = &mut self.scratch[..out.len() * 2];
                    decimate_stage(inner, block, mid);
                    self.align.process_block_inplace(mid);
                    decimate_stage(outer, mid, out);
                }
            }
            _ => output.copy_from_slice(input),
        }
        frames
    }

    /// Clears every stage, the scratch buffer and the alignment delay.
    pub fn reset(&mut self) {
        for stage in &mut self.stages {
            stage.reset();
        }
        self.scratch.fill(0.0);
        self.align.clear();
    }
}

#[inline]
fn interpolate_stage(stage: &mut HalfbandStage, input: &[f32], output: &mut [f32]) {
    for (&x, pair) in input.iter().zip(output.chunks_exact_mut(2)) {
        let [even, odd] = stage.interpolate(x);
        pair[0] = even;
        pair[1] = odd;
    }
}

#[inline]
fn decimate_stage(stage: &mut HalfbandStage, input: &[f32], output: &mut [f32]) {
    for (pair, y) in input.chunks_exact(2).zip(output.iter_mut()) {
        *y = stage.decimate([pair[0], pair[1]]);
    }
}
