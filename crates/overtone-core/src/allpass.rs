//! Allpass sections for the recursive (zero-latency) halfband realization.
//!
//! The polyphase IIR halfband filter is the average of two allpass branches,
//! one of them delayed by a single sample:
//!
//! ```text
//! H(z) = ½ · [ A₀(z²) + z⁻¹ · A₁(z²) ]
//! ```
//!
//! Each branch is a cascade of two-pole sections `(a + z⁻²) / (1 + a·z⁻²)`.
//! Because every section only sees every other high-rate sample, it runs at
//! the low rate as a first-order allpass `(a + z⁻¹) / (1 + a·z⁻¹)`, which is
//! what [`AllpassSection`] implements. Its single pole sits at `-a`, so the
//! section is stable for any `|a| < 1` independent of the input signal.

use crate::math::flush_denormal;

/// Maximum number of sections in one branch (12-coefficient designs use 6).
pub const MAX_BRANCH_SECTIONS: usize = 8;

/// Largest coefficient magnitude accepted; keeps the pole inside the unit circle.
const MAX_COEFFICIENT: f32 = 0.9999;

/// First-order allpass section: `y = a·x + s`, `s = x − a·y`.
///
/// # Example
///
/// ```rust
/// use overtone_core::AllpassSection;
///
/// let mut section = AllpassSection::new(0.5);
/// let first = section.process(1.0);
/// assert!((first - 0.5).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct AllpassSection {
    a: f32,
    state: f32,
}

impl AllpassSection {
    /// Creates a section with coefficient `a`, clamped to `±0.9999`.
    pub fn new(a: f32) -> Self {
        Self {
            a: a.clamp(-MAX_COEFFICIENT, MAX_COEFFICIENT),
            state: 0.0,
        }
    }

    /// The (clamped) allpass coefficient.
    pub fn coefficient(&self) -> f32 {
        self.a
    }

    /// Current internal memory.
    pub fn state(&self) -> f32 {
        self.state
    }

    /// Processes one sample.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let output = self.a * input + self.state;
        self.state = flush_denormal(input - self.a * output);
        output
    }

    /// Clears the internal memory.
    pub fn clear(&mut self) {
        self.state = 0.0;
    }
}

/// Cascade of [`AllpassSection`]s forming one polyphase branch.
///
/// Storage is a fixed array so building a chain never allocates.
#[derive(Debug, Clone)]
pub struct AllpassChain {
    sections: [AllpassSection; MAX_BRANCH_SECTIONS],
    len: usize,
}

impl AllpassChain {
    /// Builds a chain from coefficients, in processing order.
    ///
    /// Coefficients beyond [`MAX_BRANCH_SECTIONS`] are ignored.
    pub fn new<I: IntoIterator<Item = f32>>(coefficients: I) -> Self {
        let mut sections = [AllpassSection::default(); MAX_BRANCH_SECTIONS];
        let mut len = 0;
        for a in coefficients.into_iter().take(MAX_BRANCH_SECTIONS) {
            sections[len] = AllpassSection::new(a);
            len += 1;
        }
        Self { sections, len }
    }

    /// Number of sections in the chain.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True for a chain with no sections (identity).
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Processes one sample through every section.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        self.sections[..self.len]
            .iter_mut()
            .fold(input, |x, section| section.process(x))
    }

    /// Clears every section.
    pub fn clear(&mut self) {
        for section in &mut self.sections {
            section.clear();
        }
    }
}
