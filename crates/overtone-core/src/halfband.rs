//! Halfband anti-aliasing stages for one 2× rate change.
//!
//! Every doubling in the oversampler is handled by a [`HalfbandStage`]: a
//! low-pass centred on a quarter of the (doubled) sample rate. On the way up it
//! removes the spectral image created by zero insertion; on the way down it
//! removes everything the decimator would fold back into the audible band.
//!
//! Two structurally different realizations exist:
//!
//! | Realization | Structure | Latency | Phase |
//! |-------------|-----------|---------|-------|
//! | Recursive | two parallel allpass branches (polyphase IIR) | 0 | nonlinear near the band edge |
//! | Symmetric | odd-length FIR with mirrored taps | `(taps − 1) / 2` | linear |
//!
//! Both run in polyphase form: interpolation consumes one low-rate sample and
//! emits a high-rate pair, decimation consumes a pair and emits one sample. The
//! zeros produced by zero insertion are never multiplied.
//!
//! # Coefficient Tables
//!
//! All tables are fixed constants designed offline; nothing is computed at
//! runtime.
//!
//! | Design | Size | Stopband |
//! |--------|------|----------|
//! | Recursive, Economy | 4 allpass coefficients | ≈50 dB above 0.27·fs |
//! | Recursive, Standard | 8 allpass coefficients | ≈80 dB above 0.26·fs |
//! | Recursive, High | 12 allpass coefficients | ≈100 dB above 0.255·fs |
//! | Symmetric, Standard | 31 taps | ≈48 dB above 0.32·fs |
//! | Symmetric, High | 63 taps | ≈56 dB at 0.29·fs, ≈70 dB above 0.30·fs |
//!
//! The recursive tables are elliptic polyphase designs (coefficients alternate
//! between the two branches). The symmetric tables are least-squares designs
//! constrained to be power complementary, `A(θ)² + A(π − θ)² ≈ 1`, which is
//! exactly the condition for an interpolate/decimate round trip through two
//! identical linear-phase filters to be flat. They reach −3 dB at fs/4 and keep
//! the round trip within ±0.02 dB across the whole base band.

#[cfg(not(feature = "std"))]
use alloc::vec;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::allpass::AllpassChain;
use crate::oversample::config::{OversamplingMode, OversamplingQuality};

/// Longest supported FIR table.
pub const MAX_FIR_TAPS: usize = 63;

/// Which side of the rate change a stage serves.
///
/// Up and down stages may share coefficients but never memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Interpolation (low rate → high rate).
    Up,
    /// Decimation (high rate → low rate).
    Down,
}

/// A fixed halfband filter design.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HalfbandDesign {
    /// Polyphase allpass pair, zero latency.
    Recursive {
        /// Allpass coefficients, alternating between the two branches.
        coefficients: &'static [f32],
        /// Minimum stopband attenuation of the design (dB, positive).
        stopband_db: f32,
    },
    /// Symmetric FIR, linear phase.
    Symmetric {
        /// Filter taps, mirror-symmetric about the centre tap.
        taps: &'static [f32],
        /// Minimum stopband attenuation of the design (dB, positive).
        stopband_db: f32,
    },
}

impl HalfbandDesign {
    /// Picks the design for a quality tier and latency mode.
    ///
    /// Economy has no linear-phase tier: it always resolves to the recursive
    /// design, whatever mode is requested.
    pub fn select(quality: OversamplingQuality, mode: OversamplingMode) -> Self {
        match (quality, mode) {
            (OversamplingQuality::Economy, _) => Self::Recursive {
                coefficients: &ECONOMY_ALLPASS,
                stopband_db: 50.0,
            },
            (OversamplingQuality::Standard, OversamplingMode::ZeroLatency) => Self::Recursive {
                coefficients: &STANDARD_ALLPASS,
                stopband_db: 80.0,
            },
            (OversamplingQuality::High, OversamplingMode::ZeroLatency) => Self::Recursive {
                coefficients: &HIGH_ALLPASS,
                stopband_db: 100.0,
            },
            (OversamplingQuality::Standard, OversamplingMode::LinearPhase) => Self::Symmetric {
                taps: &STANDARD_FIR_TAPS,
                stopband_db: 48.0,
            },
            (OversamplingQuality::High, OversamplingMode::LinearPhase) => Self::Symmetric {
                taps: &HIGH_FIR_TAPS,
                stopband_db: 56.0,
            },
        }
    }

    /// True for the symmetric (FIR) realization.
    pub fn is_fir(&self) -> bool {
        matches!(self, Self::Symmetric { .. })
    }

    /// Number of allpass coefficients or FIR taps.
    pub fn coefficient_count(&self) -> usize {
        match self {
            Self::Recursive { coefficients, .. } => coefficients.len(),
            Self::Symmetric { taps, .. } => taps.len(),
        }
    }

    /// Delay added by one up/down pass of this design, in low-rate samples.
    pub fn latency(&self) -> usize {
        match self {
            Self::Recursive { .. } => 0,
            Self::Symmetric { taps, .. } => taps.len().saturating_sub(1) / 2,
        }
    }

    /// Documented stopband attenuation (dB, positive).
    pub fn stopband_db(&self) -> f32 {
        match self {
            Self::Recursive { stopband_db, .. } | Self::Symmetric { stopband_db, .. } => {
                *stopband_db
            }
        }
    }
}

/// One halfband filter instance serving one direction of one rate doubling.
#[derive(Debug, Clone)]
pub enum HalfbandStage {
    /// Polyphase allpass realization.
    Recursive(RecursiveHalfband),
    /// Symmetric FIR realization.
    Symmetric(SymmetricHalfband),
}

impl HalfbandStage {
    /// Builds a stage with cleared memory.
    pub fn new(design: HalfbandDesign, direction: Direction) -> Self {
        match design {
            HalfbandDesign::Recursive { coefficients, .. } => {
                Self::Recursive(RecursiveHalfband::new(coefficients))
            }
            HalfbandDesign::Symmetric { taps, .. } => {
                Self::Symmetric(SymmetricHalfband::new(taps, direction))
            }
        }
    }

    /// Zero-inserts one low-rate sample and filters it into a high-rate pair.
    ///
    /// Includes the ×2 gain that compensates for the inserted zero.
    #[inline]
    pub fn interpolate(&mut self, input: f32) -> [f32; 2] {
        match self {
            Self::Recursive(filter) => filter.interpolate(input),
            Self::Symmetric(filter) => filter.interpolate(input),
        }
    }

    /// Filters a high-rate pair and keeps one low-rate sample.
    #[inline]
    pub fn decimate(&mut self, pair: [f32; 2]) -> f32 {
        match self {
            Self::Recursive(filter) => filter.decimate(pair),
            Self::Symmetric(filter) => filter.decimate(pair),
        }
    }

    /// Delay of one up/down pass through this design, in low-rate samples.
    pub fn latency(&self) -> usize {
        match self {
            Self::Recursive(_) => 0,
            Self::Symmetric(filter) => filter.latency(),
        }
    }

    /// Clears all filter memory.
    pub fn reset(&mut self) {
        match self {
            Self::Recursive(filter) => filter.reset(),
            Self::Symmetric(filter) => filter.reset(),
        }
    }
}

/// Polyphase IIR halfband: `H(z) = ½·[A₀(z²) + z⁻¹·A₁(z²)]`.
///
/// Interpolation feeds the input to both branches; branch 0 yields the even
/// output sample and branch 1 the odd one. Decimation feeds the even sample to
/// branch 0 and the odd sample to branch 1, and averages branch 0 with the
/// previous branch-1 output.
#[derive(Debug, Clone)]
pub struct RecursiveHalfband {
    even: AllpassChain,
    odd: AllpassChain,
    odd_delayed: f32,
}

impl RecursiveHalfband {
    /// Splits `coefficients` across the two branches (even/odd indices).
    pub fn new(coefficients: &'static [f32]) -> Self {
        Self {
            even: AllpassChain::new(coefficients.iter().copied().step_by(2)),
            odd: AllpassChain::new(coefficients.iter().copied().skip(1).step_by(2)),
            odd_delayed: 0.0,
        }
    }

    #[inline]
    fn interpolate(&mut self, input: f32) -> [f32; 2] {
        let pair = [self.even.process(input), self.odd.process(input)];
        if pair[0].is_finite() && pair[1].is_finite() {
            pair
        } else {
            self.reset();
            [0.0; 2]
        }
    }

    #[inline]
    fn decimate(&mut self, [even, odd]: [f32; 2]) -> f32 {
        let output = 0.5 * (self.even.process(even) + self.odd_delayed);
        self.odd_delayed = self.odd.process(odd);
        if output.is_finite() {
            output
        } else {
            self.reset();
            0.0
        }
    }

    fn reset(&mut self) {
        self.even.clear();
        self.odd.clear();
        self.odd_delayed = 0.0;
    }
}

/// Symmetric FIR halfband in polyphase form.
///
/// History is a doubled ring buffer so the most recent `len` samples are
/// always one contiguous slice, newest first. The up direction keeps low-rate
/// input samples (`(taps + 1) / 2` of them); the down direction keeps
/// high-rate samples (`taps` of them). The history is allocated once, in
/// [`new()`](Self::new).
#[derive(Debug, Clone)]
pub struct SymmetricHalfband {
    taps: &'static [f32],
    history: Vec<f32>,
    len: usize,
    pos: usize,
}

impl SymmetricHalfband {
    /// Builds a stage for `direction` with cleared history.
    pub fn new(taps: &'static [f32], direction: Direction) -> Self {
        let taps = &taps[..taps.len().min(MAX_FIR_TAPS)];
        let len = match direction {
            Direction::Up => taps.len().div_ceil(2),
            Direction::Down => taps.len(),
        };
        let len = len.max(1);
        Self {
            taps,
            history: vec![0.0; 2 * len],
            len,
            pos: 0,
        }
    }

    /// Group delay in high-rate samples, which is also the round-trip delay
    /// in low-rate samples.
    pub fn latency(&self) -> usize {
        self.taps.len().saturating_sub(1) / 2
    }

    #[inline]
    fn push(&mut self, sample: f32) {
        self.pos = if self.pos == 0 { self.len - 1 } else { self.pos - 1 };
        self.history[self.pos] = sample;
        self.history[self.pos + self.len] = sample;
    }

    #[inline]
    fn recent(&self) -> &[f32] {
        &self.history[self.pos..self.pos + self.len]
    }

    #[inline]
    fn interpolate(&mut self, input: f32) -> [f32; 2] {
        self.push(input);
        let recent = self.recent();
        let even: f32 = self
            .taps
            .iter()
            .step_by(2)
            .zip(recent)
            .map(|(h, x)| h * x)
            .sum();
        let odd: f32 = self
            .taps
            .iter()
            .skip(1)
            .step_by(2)
            .zip(recent)
            .map(|(h, x)| h * x)
            .sum();
        let pair = [2.0 * even, 2.0 * odd];
        if pair[0].is_finite() && pair[1].is_finite() {
            pair
        } else {
            self.reset();
            [0.0; 2]
        }
    }

    /// Output is taken at the even phase so the images of a linear-phase
    /// round trip add in phase with the signal.
    #[inline]
    fn decimate(&mut self, [even, odd]: [f32; 2]) -> f32 {
        self.push(even);
        let output: f32 = self
            .taps
            .iter()
            .zip(self.recent())
            .map(|(h, x)| h * x)
            .sum();
        self.push(odd);
        if output.is_finite() {
            output
        } else {
            self.reset();
            0.0
        }
    }

    fn reset(&mut self) {
        self.history.fill(0.0);
        self.pos = 0;
    }
}

// ============================================================================
// Coefficient tables
// ============================================================================

/// Economy: 4 coefficients, transition 0.23–0.27·fs, ≈50 dB stopband.
#[allow(clippy::excessive_precision)]
#[rustfmt::skip]
const ECONOMY_ALLPASS: [f32; 4] = [
    0.1357039813, 0.4256488803, 0.6977781305, 0.9056122988,
];

/// Standard zero-latency: 8 coefficients, transition 0.24–0.26·fs, ≈80 dB.
#[allow(clippy::excessive_precision)]
#[rustfmt::skip]
const STANDARD_ALLPASS: [f32; 8] = [
    0.0575171854, 0.2059330315, 0.3922044347, 0.5693387833,
    0.7139114284, 0.8229583565, 0.9042701537, 0.9694581539,
];

/// High zero-latency: 12 coefficients, transition 0.245–0.255·fs, ≈100 dB.
#[allow(clippy::excessive_precision)]
#[rustfmt::skip]
const HIGH_ALLPASS: [f32; 12] = [
    0.0366815022, 0.1365476246, 0.2746317594, 0.4231386174,
    0.5610986979, 0.6775400500, 0.7697418339, 0.8398896248,
    0.8922608180, 0.9315419600, 0.9620945484, 0.9878163707,
];

/// Standard linear-phase: 31 taps, delay 15, ≈48 dB above 0.32·fs.
#[allow(clippy::excessive_precision)]
#[rustfmt::skip]
const STANDARD_FIR_TAPS: [f32; 31] = [
     0.0000533547, -0.0010619487,  0.0005650728,  0.0032606315,
    -0.0028398204, -0.0069053404,  0.0084857202,  0.0118690596,
    -0.0200572873, -0.0174790055,  0.0425481410,  0.0227358262,
    -0.0920609532, -0.0264750349,  0.3134135395,  0.5278960903,
     0.3134135395, -0.0264750349, -0.0920609532,  0.0227358262,
     0.0425481410, -0.0174790055, -0.0200572873,  0.0118690596,
     0.0084857202, -0.0069053404, -0.0028398204,  0.0032606315,
     0.0005650728, -0.0010619487,  0.0000533547,
];

/// High linear-phase: 63 taps, delay 31, ≈70 dB above 0.30·fs.
#[allow(clippy::excessive_precision)]
#[rustfmt::skip]
const HIGH_FIR_TAPS: [f32; 63] = [
    -0.0000101385, -0.0001408261,  0.0000440571,  0.0003624425,
    -0.0001377124, -0.0007256895,  0.0003614779,  0.0012705712,
    -0.0007941090, -0.0020183026,  0.0015508862,  0.0029885675,
    -0.0027653717, -0.0041712244,  0.0046164744,  0.0055463998,
    -0.0073204746, -0.0070601132,  0.0111843800,  0.0086493252,
    -0.0166606473, -0.0102229941,  0.0245580616,  0.0116922955,
    -0.0365482526, -0.0129558273,  0.0569950371,  0.0139322926,
    -0.1019806616, -0.0145460331,  0.3169217469,  0.5147687246,
     0.3169217469, -0.0145460331, -0.1019806616,  0.0139322926,
     0.0569950371, -0.0129558273, -0.0365482526,  0.0116922955,
     0.0245580616, -0.0102229941, -0.0166606473,  0.0086493252,
     0.0111843800, -0.0070601132, -0.0073204746,  0.0055463998,
     0.0046164744, -0.0041712244, -0.0027653717,  0.0029885675,
     0.0015508862, -0.0020183026, -0.0007941090,  0.0012705712,
     0.0003614779, -0.0007256895, -0.0001377124,  0.0003624425,
     0.0000440571, -0.0001408261, -0.0000101385,
];

#[cfg(test)]
mod tests {
    use super::*;
    use core::f64::consts::PI;

    const ALL_ALLPASS: [&[f32]; 3] = [&ECONOMY_ALLPASS, &STANDARD_ALLPASS, &HIGH_ALLPASS];
    const ALL_FIR: [&[f32]; 2] = [&STANDARD_FIR_TAPS, &HIGH_FIR_TAPS];

    /// Zero-phase amplitude of a symmetric FIR at `theta` rad/sample.
    fn fir_amplitude(taps: &[f32], theta: f64) -> f64 {
        let centre = (taps.len() - 1) / 2;
        taps.iter()
            .enumerate()
            .map(|(i, &h)| f64::from(h) * libm::cos((i as f64 - centre as f64) * theta))
            .sum()
    }

    fn cmul(a: (f64, f64), b: (f64, f64)) -> (f64, f64) {
        (a.0 * b.0 - a.1 * b.1, a.0 * b.1 + a.1 * b.0)
    }

    fn cdiv(a: (f64, f64), b: (f64, f64)) -> (f64, f64) {
        let den = b.0 * b.0 + b.1 * b.1;
        ((a.0 * b.0 + a.1 * b.1) / den, (a.1 * b.0 - a.0 * b.1) / den)
    }

    /// |H| of the polyphase allpass pair at normalized frequency `f` (cycles/sample).
    fn recursive_magnitude(coefficients: &[f32], f: f64) -> f64 {
        let w = 2.0 * PI * f;
        let z2 = (libm::cos(2.0 * w), -libm::sin(2.0 * w));
        let mut branches = [(1.0, 0.0); 2];
        for (i, &a) in coefficients.iter().enumerate() {
            let a = f64::from(a);
            let section = cdiv((a + z2.0, z2.1), (1.0 + a * z2.0, a * z2.1));
            branches[i % 2] = cmul(branches[i % 2], section);
        }
        let odd = cmul(branches[1], (libm::cos(w), -libm::sin(w)));
        let re = 0.5 * (branches[0].0 + odd.0);
        let im = 0.5 * (branches[0].1 + odd.1);
        libm::sqrt(re * re + im * im)
    }

    fn to_db(x: f64) -> f64 {
        20.0 * libm::log10(x.abs().max(1e-12))
    }

    #[test]
    fn allpass_tables_are_stable() {
        for table in ALL_ALLPASS {
            for &a in table {
                assert!(a > 0.0 && a < 1.0, "coefficient {a} outside (0, 1)");
            }
            assert!(table.windows(2).all(|w| w[0] < w[1]), "table not ascending");
        }
    }

    #[test]
    fn fir_tables_are_symmetric_and_normalized() {
        for taps in ALL_FIR {
            assert_eq!(taps.len() % 2, 1, "FIR length must be odd");
            for i in 0..taps.len() / 2 {
                assert_eq!(taps[i], taps[taps.len() - 1 - i], "asymmetric tap {i}");
            }
            let dc: f32 = taps.iter().sum();
            assert!((dc - 1.0).abs() < 1e-4, "DC gain {dc}");
            let centre = taps[taps.len() / 2];
            assert!(taps.iter().all(|&h| h <= centre));
        }
    }

    #[test]
    fn fir_round_trip_is_power_complementary() {
        for taps in ALL_FIR {
            for i in 0..=500 {
                let theta = PI / 2.0 * f64::from(i) / 500.0;
                let a = fir_amplitude(taps, theta);
                let b = fir_amplitude(taps, PI - theta);
                let gain_db = to_db(a * a + b * b);
                assert!(
                    gain_db.abs() < 0.02,
                    "{}-tap round trip at {theta:.3} rad: {gain_db:.4} dB",
                    taps.len()
                );
            }
        }
    }

    #[test]
    fn fir_stopband_meets_design() {
        for (taps, edge, floor_db) in [
            (&STANDARD_FIR_TAPS[..], 0.32, -45.0),
            (&HIGH_FIR_TAPS[..], 0.30, -65.0),
        ] {
            for i in 0..=1000 {
                let f = edge + (0.5 - edge) * f64::from(i) / 1000.0;
                let gain_db = to_db(fir_amplitude(taps, 2.0 * PI * f));
                assert!(
                    gain_db < floor_db,
                    "{}-tap stopband at {f:.3}·fs: {gain_db:.1} dB",
                    taps.len()
                );
            }
        }
    }

    #[test]
    fn recursive_responses_meet_design() {
        for (table, pass_edge, stop_edge, floor_db) in [
            (&ECONOMY_ALLPASS[..], 0.23, 0.27, -45.0),
            (&STANDARD_ALLPASS[..], 0.24, 0.26, -75.0),
            (&HIGH_ALLPASS[..], 0.245, 0.255, -95.0),
        ] {
            for i in 0..=500 {
                let f = pass_edge * f64::from(i) / 500.0;
                let gain_db = to_db(recursive_magnitude(table, f));
                assert!(gain_db.abs() < 0.01, "passband at {f:.3}·fs: {gain_db:.4} dB");

                let f = stop_edge + (0.5 - stop_edge) * f64::from(i) / 500.0;
                let gain_db = to_db(recursive_magnitude(table, f));
                assert!(gain_db < floor_db, "stopband at {f:.3}·fs: {gain_db:.1} dB");
            }
            let quarter = recursive_magnitude(table, 0.25);
            assert!((quarter - core::f64::consts::FRAC_1_SQRT_2).abs() < 1e-3);
        }
    }

    #[test]
    fn design_matrix_follows_economy_fallback() {
        use OversamplingMode::{LinearPhase, ZeroLatency};
        use OversamplingQuality::{Economy, High, Standard};

        assert_eq!(
            HalfbandDesign::select(Economy, LinearPhase),
            HalfbandDesign::select(Economy, ZeroLatency)
        );
        assert!(!HalfbandDesign::select(Economy, LinearPhase).is_fir());
        assert!(!HalfbandDesign::select(Standard, ZeroLatency).is_fir());
        assert!(!HalfbandDesign::select(High, ZeroLatency).is_fir());
        assert!(HalfbandDesign::select(Standard, LinearPhase).is_fir());
        assert!(HalfbandDesign::select(High, LinearPhase).is_fir());

        assert_eq!(HalfbandDesign::select(Standard, LinearPhase).latency(), 15);
        assert_eq!(HalfbandDesign::select(High, LinearPhase).latency(), 31);
        assert_eq!(HalfbandDesign::select(High, ZeroLatency).latency(), 0);
        assert_eq!(
            HalfbandDesign::select(High, LinearPhase).coefficient_count(),
            63
        );
        assert_eq!(
            HalfbandDesign::select(Economy, ZeroLatency).coefficient_count(),
            4
        );

        let stopbands = [
            (Economy, ZeroLatency, 50.0),
            (Economy, LinearPhase, 50.0),
            (Standard, ZeroLatency, 80.0),
            (High, ZeroLatency, 100.0),
            (Standard, LinearPhase, 48.0),
            (High, LinearPhase, 56.0),
        ];
        for (quality, mode, db) in stopbands {
            assert_eq!(HalfbandDesign::select(quality, mode).stopband_db(), db);
        }
    }

    #[test]
    fn recursive_impulse_response_decays() {
        for table in ALL_ALLPASS {
            let design = HalfbandDesign::Recursive {
                coefficients: table,
                stopband_db: 0.0,
            };
            let mut stage = HalfbandStage::new(design, Direction::Up);
            let mut tail = stage.interpolate(1.0);
            for _ in 0..20_000 {
                tail = stage.interpolate(0.0);
                assert!(tail[0].is_finite() && tail[1].is_finite());
            }
            assert!(tail[0].abs() < 1e-6 && tail[1].abs() < 1e-6);
        }
    }

    #[test]
    fn fir_round_trip_peaks_at_latency() {
        for quality in [OversamplingQuality::Standard, OversamplingQuality::High] {
            let design = HalfbandDesign::select(quality, OversamplingMode::LinearPhase);
            let mut up = HalfbandStage::new(design, Direction::Up);
            let mut down = HalfbandStage::new(design, Direction::Down);
            let mut output = [0.0_f32; 128];
            for (n, y) in output.iter_mut().enumerate() {
                let x = if n == 0 { 1.0 } else { 0.0 };
                *y = down.decimate(up.interpolate(x));
            }
            let peak = output
                .iter()
                .enumerate()
                .max_by(|a, b| a.1.abs().total_cmp(&b.1.abs()))
                .map(|(i, _)| i);
            assert_eq!(peak, Some(design.latency()));
            assert_eq!(up.latency(), design.latency());
        }
    }

    #[test]
    fn dc_passes_at_unity_both_realizations() {
        for quality in [OversamplingQuality::Economy, OversamplingQuality::High] {
            for mode in [OversamplingMode::ZeroLatency, OversamplingMode::LinearPhase] {
                let design = HalfbandDesign::select(quality, mode);
                let mut up = HalfbandStage::new(design, Direction::Up);
                let mut down = HalfbandStage::new(design, Direction::Down);
                let mut out = 0.0;
                for _ in 0..2000 {
                    out = down.decimate(up.interpolate(1.0));
                }
                assert!((out - 1.0).abs() < 1e-3, "{quality:?}/{mode:?} DC gain {out}");
            }
        }
    }

    #[test]
    fn non_finite_input_flushes_memory() {
        for mode in [OversamplingMode::ZeroLatency, OversamplingMode::LinearPhase] {
            let design = HalfbandDesign::select(OversamplingQuality::Standard, mode);
            let mut up = HalfbandStage::new(design, Direction::Up);
            let mut down = HalfbandStage::new(design, Direction::Down);
            for &x in &[0.5, f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
                let pair = up.interpolate(x);
                assert!(pair.iter().all(|s| s.is_finite()));
                assert!(down.decimate([x, x]).is_finite());
            }
            for _ in 0..256 {
                let pair = up.interpolate(0.25);
                assert!(pair.iter().all(|s| s.is_finite()));
                assert!(down.decimate(pair).is_finite());
            }
        }
    }

    #[test]
    fn reset_clears_memory() {
        let design =
            HalfbandDesign::select(OversamplingQuality::High, OversamplingMode::LinearPhase);
        let mut stage = HalfbandStage::new(design, Direction::Down);
        for _ in 0..100 {
            stage.decimate([1.0, -1.0]);
        }
        stage.reset();
        assert_eq!(stage.decimate([0.0, 0.0]), 0.0);
    }
}
