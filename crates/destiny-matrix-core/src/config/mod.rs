//! Engine configuration.
//!
//! All knobs are injected by the caller; this core performs no environment
//! or file lookups. [`EngineConfig::default()`] reproduces the reference
//! scoring behavior and is what production callers should start from.

pub mod constants;

use serde::{Deserialize, Serialize};

use crate::error::{MatrixError, MatrixResult};

/// Output language for rendered text (prompts, checklist items).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    /// Korean, the service's primary language.
    #[default]
    Ko,
    /// English.
    En,
}

/// Which narrative backend the formatted evidence prompt targets.
///
/// Injected explicitly by the caller; this core never inspects the
/// environment to pick one. The choice only affects the output-format
/// instruction appended to the prompt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NarrativeBackend {
    /// Backend returns one prose section per anchor under its heading.
    #[default]
    Sectioned,
    /// Backend returns a JSON object mapping section names to text.
    Json,
}

/// Configuration for a single matrix calculation.
///
/// # Constraints
/// - `strength_threshold` must be greater than `caution_threshold`
/// - thresholds live on the internal 0..=10 domain score scale
/// - `max_insights` and `cell_drivers_per_side` must be non-zero
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Domains at or above this adjusted score rank as strengths.
    pub strength_threshold: f32,

    /// Domains at or below this adjusted score rank as cautions.
    pub caution_threshold: f32,

    /// Cap on emitted top-level insight entries.
    pub max_insights: usize,

    /// Maximum drivers per side considered when pairing matrix cells.
    pub cell_drivers_per_side: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            strength_threshold: constants::insight::STRENGTH_THRESHOLD,
            caution_threshold: constants::insight::CAUTION_THRESHOLD,
            max_insights: constants::insight::MAX_INSIGHTS,
            cell_drivers_per_side: constants::scoring::CELL_DRIVERS_PER_SIDE,
        }
    }
}

impl EngineConfig {
    /// Set the strength threshold.
    pub fn with_strength_threshold(mut self, threshold: f32) -> Self {
        self.strength_threshold = threshold;
        self
    }

    /// Set the caution threshold.
    pub fn with_caution_threshold(mut self, threshold: f32) -> Self {
        self.caution_threshold = threshold;
        self
    }

    /// Set the insight cap.
    pub fn with_max_insights(mut self, max: usize) -> Self {
        self.max_insights = max;
        self
    }

    /// Validate configuration values.
    ///
    /// # Errors
    /// Returns [`MatrixError::InvalidInputShape`] when thresholds are
    /// non-finite, out of the 0..=10 scale, inverted, or a cap is zero.
    pub fn validate(&self) -> MatrixResult<()> {
        let in_scale = |v: f32| v.is_finite() && (0.0..=constants::scoring::SCORE_MAX).contains(&v);
        if !in_scale(self.strength_threshold) {
            return Err(MatrixError::InvalidInputShape {
                field: "strength_threshold".into(),
                message: "must be finite and within 0..=10".into(),
            });
        }
        if !in_scale(self.caution_threshold) {
            return Err(MatrixError::InvalidInputShape {
                field: "caution_threshold".into(),
                message: "must be finite and within 0..=10".into(),
            });
        }
        if self.strength_threshold <= self.caution_threshold {
            return Err(MatrixError::InvalidInputShape {
                field: "strength_threshold".into(),
                message: "must be greater than caution_threshold".into(),
            });
        }
        if self.max_insights == 0 {
            return Err(MatrixError::InvalidInputShape {
                field: "max_insights".into(),
                message: "must be non-zero".into(),
            });
        }
        if self.cell_drivers_per_side == 0 {
            return Err(MatrixError::InvalidInputShape {
                field: "cell_drivers_per_side".into(),
                message: "must be non-zero".into(),
            });
        }
        Ok(())
    }
}
