//! Oversampling configuration: factor, quality tier and latency mode.
//!
//! The three choices fully determine the filter realization and the reported
//! latency, so both are available here as pure functions before any
//! [`Oversampler`](super::Oversampler) exists:
//!
//! | Quality | ZeroLatency | LinearPhase (2×) | LinearPhase (4×) |
//! |---------|-------------|------------------|------------------|
//! | Economy | 0 | 0 | 0 |
//! | Standard | 0 | 15 | 30 |
//! | High | 0 | 31 | 62 |
//!
//! Economy has no linear-phase tier and always uses the recursive filters.

use core::fmt;
use core::str::FromStr;

use crate::halfband::HalfbandDesign;

/// Rate multiplier. 4× is two composed 2× stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OversamplingFactor {
    /// One doubling.
    #[default]
    X2,
    /// Two doublings.
    X4,
}

impl OversamplingFactor {
    /// The multiplier as a number (2 or 4).
    pub const fn ratio(self) -> usize {
        match self {
            Self::X2 => 2,
            Self::X4 => 4,
        }
    }

    /// Number of halfband stages per direction.
    pub const fn stages(self) -> usize {
        match self {
            Self::X2 => 1,
            Self::X4 => 2,
        }
    }
}

impl TryFrom<usize> for OversamplingFactor {
    type Error = ConfigError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(Self::X2),
            4 => Ok(Self::X4),
            other => Err(ConfigError::UnsupportedFactor(other)),
        }
    }
}

impl FromStr for OversamplingFactor {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "2" || s.eq_ignore_ascii_case("2x") {
            Ok(Self::X2)
        } else if s == "4" || s.eq_ignore_ascii_case("4x") {
            Ok(Self::X4)
        } else {
            Err(ConfigError::UnknownFactor)
        }
    }
}

impl fmt::Display for OversamplingFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x", self.ratio())
    }
}

/// Stopband tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OversamplingQuality {
    /// Cheapest recursive filters, ≈50 dB stopband.
    Economy,
    /// 31-tap FIR or 8-coefficient recursive filters.
    #[default]
    Standard,
    /// 63-tap FIR or 12-coefficient recursive filters.
    High,
}

impl OversamplingQuality {
    /// True when this tier resolves to the linear-phase FIR in `mode`.
    pub const fn uses_fir(self, mode: OversamplingMode) -> bool {
        !matches!(self, Self::Economy) && matches!(mode, OversamplingMode::LinearPhase)
    }

    /// Lowercase name, as accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            Self::Economy => "economy",
            Self::Standard => "standard",
            Self::High => "high",
        }
    }
}

impl FromStr for OversamplingQuality {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        [Self::Economy, Self::Standard, Self::High]
            .into_iter()
            .find(|q| s.eq_ignore_ascii_case(q.name()))
            .ok_or(ConfigError::UnknownQuality)
    }
}

impl fmt::Display for OversamplingQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Latency/phase trade-off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OversamplingMode {
    /// Recursive allpass filters: no added delay, nonlinear phase near the band edge.
    ZeroLatency,
    /// Symmetric FIR filters: constant group delay.
    #[default]
    LinearPhase,
}

impl OversamplingMode {
    /// Name as accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            Self::ZeroLatency => "zero-latency",
            Self::LinearPhase => "linear-phase",
        }
    }
}

impl FromStr for OversamplingMode {
    type Err = ConfigError;

    /// Accepts `zero-latency`/`linear-phase` with `-`, `_` or no separator.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let same_name = |name: &str| {
            let mut a = s.bytes().filter(|b| *b != b'-' && *b != b'_');
            let mut b = name.bytes().filter(|b| *b != b'-');
            loop {
                match (a.next(), b.next()) {
                    (None, None) => return true,
                    (Some(x), Some(y)) if x.eq_ignore_ascii_case(&y) => {}
                    _ => return false,
                }
            }
        };
        [Self::ZeroLatency, Self::LinearPhase]
            .into_iter()
            .find(|m| same_name(m.name()))
            .ok_or(ConfigError::UnknownMode)
    }
}

impl fmt::Display for OversamplingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Complete oversampler configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OversamplingConfig {
    /// Rate multiplier.
    pub factor: OversamplingFactor,
    /// Stopband tier.
    pub quality: OversamplingQuality,
    /// Latency/phase trade-off.
    pub mode: OversamplingMode,
}

impl OversamplingConfig {
    /// Bundles the three choices.
    pub const fn new(
        factor: OversamplingFactor,
        quality: OversamplingQuality,
        mode: OversamplingMode,
    ) -> Self {
        Self {
            factor,
            quality,
            mode,
        }
    }

    /// Halfband design used by every stage.
    pub fn design(&self) -> HalfbandDesign {
        HalfbandDesign::select(self.quality, self.mode)
    }

    /// True when the linear-phase FIR realization is selected.
    pub const fn is_fir(&self) -> bool {
        self.quality.uses_fir(self.mode)
    }

    /// Total delay in base-rate samples: per-stage latency times stage count.
    pub fn latency(&self) -> usize {
        self.design().latency() * self.factor.stages()
    }
}

impl fmt::Display for OversamplingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.factor, self.quality, self.mode)
    }
}

/// Errors from parsing or converting configuration values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Only factors 2 and 4 exist.
    UnsupportedFactor(usize),
    /// Factor string was not one of `2`, `4`, `2x`, `4x`.
    UnknownFactor,
    /// Quality string was not `economy`, `standard` or `high`.
    UnknownQuality,
    /// Mode string was not `zero-latency` or `linear-phase`.
    UnknownMode,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedFactor(n) => {
                write!(f, "unsupported oversampling factor {n} (expected 2 or 4)")
            }
            Self::UnknownFactor => write!(f, "unknown oversampling factor (expected 2x or 4x)"),
            Self::UnknownQuality => {
                write!(f, "unknown quality (expected economy, standard or high)")
            }
            Self::UnknownMode => write!(f, "unknown mode (expected zero-latency or linear-phase)"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}
