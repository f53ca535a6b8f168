//! Alignment calculator: score-gap-to-confidence conversion.
//!
//! Converts the gap between the two systems' component scores into an
//! agreement value. Identical scores align perfectly; agreement falls off
//! linearly with the gap and bottoms out at zero.
//!
//! # Formula
//!
//! ```text
//! alignment(a, b) = max(0, 1 - |a - b|)
//! ```
//!
//! Total function over [0, 1] inputs, no side effects.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::constants::{alignment as bands, scoring};

/// Agreement between two component scores, in [0, 1].
///
/// `alignment(x, x) = 1` for any `x`; non-increasing in `|a - b|`.
#[inline]
pub fn alignment(a: f32, b: f32) -> f32 {
    (1.0 - (a - b).abs()).max(0.0)
}

/// Multiplicative factor applied to a domain's base score.
///
/// Maps alignment [0, 1] onto [0.85, 1.15]: divergent systems damp the
/// fused score, agreeing systems amplify it.
#[inline]
pub fn alignment_factor(alignment_score: f32) -> f32 {
    scoring::ALIGNMENT_FACTOR_MIN + scoring::ALIGNMENT_FACTOR_SPAN * alignment_score.clamp(0.0, 1.0)
}

/// Discrete banding of an alignment score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlignmentBand {
    /// alignment >= 0.85
    Strong,
    /// alignment in [0.60, 0.85)
    Moderate,
    /// alignment in [0.35, 0.60)
    Weak,
    /// alignment < 0.35
    Divergent,
}

impl AlignmentBand {
    /// Classify an alignment score into its band.
    pub fn classify(score: f32) -> Self {
        if score >= bands::STRONG {
            Self::Strong
        } else if score >= bands::MODERATE {
            Self::Moderate
        } else if score >= bands::WEAK {
            Self::Weak
        } else {
            Self::Divergent
        }
    }
}

impl fmt::Display for AlignmentBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Strong => "strong",
            Self::Moderate => "moderate",
            Self::Weak => "weak",
            Self::Divergent => "divergent",
        };
        write!(f, "{}", s)
    }
}
