//! Matrix cells: one saju signal paired with one astro signal.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::constants::scoring;
use crate::error::{MatrixError, MatrixResult};
use crate::types::domain::LifeDomain;

/// Quality of the interaction between a saju signal and an astro signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionLevel {
    /// Both signals reinforce the domain.
    Synergy,
    /// Signals neutralize each other or stay near neutral.
    Balance,
    /// Both signals press against the domain.
    Tension,
}

impl InteractionLevel {
    /// Display icon for the cell.
    #[inline]
    pub fn icon(self) -> &'static str {
        match self {
            Self::Synergy => "✦",
            Self::Balance => "◦",
            Self::Tension => "▲",
        }
    }

    /// Hex color used by the matrix UI.
    #[inline]
    pub fn color_code(self) -> &'static str {
        match self {
            Self::Synergy => "#2E7D32",
            Self::Balance => "#F9A825",
            Self::Tension => "#C62828",
        }
    }

    /// Korean keyword.
    #[inline]
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Synergy => "시너지",
            Self::Balance => "균형",
            Self::Tension => "긴장",
        }
    }

    /// English keyword.
    #[inline]
    pub fn keyword_en(self) -> &'static str {
        match self {
            Self::Synergy => "synergy",
            Self::Balance => "balance",
            Self::Tension => "tension",
        }
    }
}

impl fmt::Display for InteractionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword_en())
    }
}

/// The scored interaction carried by a matrix cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    /// Interaction quality.
    pub level: InteractionLevel,
    /// Intensity on the 0..=10 scale.
    pub score: f32,
    /// Display icon, derived from the level.
    pub icon: String,
    /// Hex color, derived from the level.
    pub color_code: String,
    /// Korean keyword, derived from the level.
    pub keyword: String,
    /// English keyword, derived from the level.
    pub keyword_en: String,
}

impl Interaction {
    /// Create an interaction, bounds-checking the score.
    ///
    /// # Errors
    /// Returns [`MatrixError::InvalidInputShape`] when the score is
    /// non-finite or outside 0..=10.
    pub fn new(level: InteractionLevel, score: f32) -> MatrixResult<Self> {
        if !score.is_finite() || !(0.0..=scoring::SCORE_MAX).contains(&score) {
            return Err(MatrixError::InvalidInputShape {
                field: "interaction.score".into(),
                message: format!("score {} outside 0..=10", score),
            });
        }
        Ok(Self {
            level,
            score,
            icon: level.icon().to_string(),
            color_code: level.color_code().to_string(),
            keyword: level.keyword().to_string(),
            keyword_en: level.keyword_en().to_string(),
        })
    }
}

/// One cell of the destiny matrix: a saju signal paired with an astro
/// signal inside a life domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixCell {
    /// Domain the pairing belongs to.
    pub domain: LifeDomain,
    /// Label of the saju-side signal.
    pub saju_signal: String,
    /// Label of the astro-side signal.
    pub astro_signal: String,
    /// Scored interaction of the pair.
    pub interaction: Interaction,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interaction_derives_display_fields() {
        let interaction = Interaction::new(InteractionLevel::Synergy, 8.2).unwrap();
        assert_eq!(interaction.icon, "✦");
        assert_eq!(interaction.keyword, "시너지");
        assert_eq!(interaction.keyword_en, "synergy");
        assert_eq!(interaction.color_code, "#2E7D32");
    }

    #[test]
    fn test_interaction_score_bounds() {
        assert!(Interaction::new(InteractionLevel::Balance, 0.0).is_ok());
        assert!(Interaction::new(InteractionLevel::Balance, 10.0).is_ok());
        assert!(Interaction::new(InteractionLevel::Balance, 10.1).is_err());
        assert!(Interaction::new(InteractionLevel::Balance, -0.1).is_err());
        assert!(Interaction::new(InteractionLevel::Balance, f32::NAN).is_err());
    }

    #[test]
    fn test_level_colors_distinct() {
        use std::collections::BTreeSet;
        let colors: BTreeSet<_> = [
            InteractionLevel::Synergy,
            InteractionLevel::Balance,
            InteractionLevel::Tension,
        ]
        .iter()
        .map(|l| l.color_code())
        .collect();
        assert_eq!(colors.len(), 3);
    }
}
