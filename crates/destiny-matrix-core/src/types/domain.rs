//! Life domains and per-domain fusion scores.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::constants::scoring;
use crate::error::{MatrixError, MatrixResult};

/// The five fixed life domains the matrix scores.
///
/// The variant order is the fixed priority order used for tie-breaking
/// throughout the engine: career before love before money before health
/// before move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifeDomain {
    Career,
    Love,
    Money,
    Health,
    Move,
}

impl LifeDomain {
    /// All domains in priority order.
    #[inline]
    pub fn all() -> [LifeDomain; 5] {
        [
            Self::Career,
            Self::Love,
            Self::Money,
            Self::Health,
            Self::Move,
        ]
    }

    /// Priority rank, 0 highest.
    #[inline]
    pub fn priority(self) -> u8 {
        match self {
            Self::Career => 0,
            Self::Love => 1,
            Self::Money => 2,
            Self::Health => 3,
            Self::Move => 4,
        }
    }

    /// Weight of this domain in the summary total.
    ///
    /// Weights sum to 1.0 across all five domains and are renormalized
    /// over the domains that actually carry data.
    #[inline]
    pub fn summary_weight(self) -> f32 {
        match self {
            Self::Career => 0.25,
            Self::Love => 0.25,
            Self::Money => 0.20,
            Self::Health => 0.20,
            Self::Move => 0.10,
        }
    }

    /// Intent keyword for the checklist builder.
    #[inline]
    pub fn intent(self) -> &'static str {
        match self {
            Self::Career => "execution",
            Self::Love => "social",
            Self::Money => "finance",
            Self::Health => "recovery",
            Self::Move => "exploration",
        }
    }

    /// Korean label.
    #[inline]
    pub fn korean(self) -> &'static str {
        match self {
            Self::Career => "직업",
            Self::Love => "애정",
            Self::Money => "재물",
            Self::Health => "건강",
            Self::Move => "이동",
        }
    }
}

impl fmt::Display for LifeDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Career => "career",
            Self::Love => "love",
            Self::Money => "money",
            Self::Health => "health",
            Self::Move => "move",
        };
        write!(f, "{}", s)
    }
}

/// The fused score of one life domain.
///
/// Every numeric field is bounds-checked on construction via
/// [`DomainScore::validate`]. A domain with no supporting raw signal is
/// `has_data = false` and carries zeroed score fields that readers must
/// ignore; it is excluded from scoring and insight ranking rather than
/// read as "bad".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainScore {
    /// The domain this score describes.
    pub domain: LifeDomain,

    /// Whether any raw signal supported this domain.
    pub has_data: bool,

    /// Saju-side component score in [0, 1].
    pub saju_component_score: f32,

    /// Astrology-side component score in [0, 1].
    pub astro_component_score: f32,

    /// Agreement between the two component scores, in [0, 1].
    pub alignment_score: f32,

    /// Raw luck-cycle/transit convergence strength, >= 0.
    pub overlap_strength: f32,

    /// Multiplicative weight from luck-cycle/transit convergence, >= 1.
    pub time_overlap_weight: f32,

    /// Pre-adjustment fused score on the 0..=10 scale.
    pub base_final_score: f32,

    /// Final adjusted score on the 0..=10 scale.
    pub final_score_adjusted: f32,

    /// Confidence in this domain's score, in [0, 1].
    pub confidence_score: f32,

    /// Textual reasons pushing the domain up.
    pub drivers: Vec<String>,

    /// Textual reasons pulling the domain down.
    pub cautions: Vec<String>,
}

impl DomainScore {
    /// A placeholder for a domain without supporting raw signal.
    pub fn no_data(domain: LifeDomain) -> Self {
        Self {
            domain,
            has_data: false,
            saju_component_score: 0.0,
            astro_component_score: 0.0,
            alignment_score: 0.0,
            overlap_strength: 0.0,
            time_overlap_weight: 1.0,
            base_final_score: 0.0,
            final_score_adjusted: 0.0,
            confidence_score: 0.0,
            drivers: Vec::new(),
            cautions: Vec::new(),
        }
    }

    /// Validate score bounds.
    ///
    /// # Errors
    /// Returns [`MatrixError::InvalidInputShape`] when any field is
    /// non-finite or outside its documented range.
    pub fn validate(&self) -> MatrixResult<()> {
        let unit = [
            ("saju_component_score", self.saju_component_score),
            ("astro_component_score", self.astro_component_score),
            ("alignment_score", self.alignment_score),
            ("confidence_score", self.confidence_score),
        ];
        for (name, value) in unit {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(self.bounds_error(name, "must be within [0, 1]"));
            }
        }

        let scaled = [
            ("base_final_score", self.base_final_score),
            ("final_score_adjusted", self.final_score_adjusted),
        ];
        for (name, value) in scaled {
            if !value.is_finite() || !(0.0..=scoring::SCORE_MAX).contains(&value) {
                return Err(self.bounds_error(name, "must be within [0, 10]"));
            }
        }

        if !self.overlap_strength.is_finite() || self.overlap_strength < 0.0 {
            return Err(self.bounds_error("overlap_strength", "must be finite and >= 0"));
        }
        if !self.time_overlap_weight.is_finite() || self.time_overlap_weight < 0.0 {
            return Err(self.bounds_error("time_overlap_weight", "must be finite and >= 0"));
        }

        Ok(())
    }

    fn bounds_error(&self, field: &str, message: &str) -> MatrixError {
        MatrixError::InvalidInputShape {
            field: format!("domain_scores[{}].{}", self.domain, field),
            message: message.into(),
        }
    }
}
