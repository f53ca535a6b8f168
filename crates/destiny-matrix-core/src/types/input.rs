//! The combined matrix calculation input.
//!
//! [`MatrixInput`] is validated once at the system boundary; the fusion
//! engine only ever sees the fully-typed, already-validated struct. The
//! struct is immutable after construction and consumed synchronously.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{MatrixError, MatrixResult};
use crate::types::astro::AstroInput;
use crate::types::saju::SajuInput;

/// Number of top-level input fields the engine expects a dense input to
/// populate. Used by the coverage fraction that feeds confidence scoring.
const EXPECTED_FIELDS: usize = 17;

/// Both halves of a matrix calculation request.
///
/// Created fresh per request from collaborator-supplied data, consumed
/// synchronously, and discarded. Any field may be absent; absence is
/// treated as "no signal".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatrixInput {
    /// The Saju (Four Pillars) half.
    #[serde(default)]
    pub saju: SajuInput,

    /// The Western astrology half.
    #[serde(default)]
    pub astro: AstroInput,
}

impl MatrixInput {
    /// Create an input from both halves.
    pub fn new(saju: SajuInput, astro: AstroInput) -> Self {
        Self { saju, astro }
    }

    /// Validate structural sanity of the input.
    ///
    /// House indexes are already enforced by the [`crate::types::astro::House`]
    /// newtype; this checks the constraints the type system cannot express.
    ///
    /// # Errors
    /// Returns [`MatrixError::InvalidInputShape`] when:
    /// - more than four pillar elements are supplied
    /// - an aspect orb is non-finite or outside [0, 15]
    /// - an aspect angle is non-finite or outside [0, 360)
    pub fn validate(&self) -> MatrixResult<()> {
        if self.saju.pillar_elements.len() > 4 {
            return Err(MatrixError::InvalidInputShape {
                field: "saju.pillar_elements".into(),
                message: format!(
                    "at most 4 pillar elements, got {}",
                    self.saju.pillar_elements.len()
                ),
            });
        }

        for (i, aspect) in self.astro.aspects.iter().enumerate() {
            if !aspect.orb.is_finite() || !(0.0..=15.0).contains(&aspect.orb) {
                return Err(MatrixError::InvalidInputShape {
                    field: format!("astro.aspects[{}].orb", i),
                    message: "orb must be finite and within [0, 15]".into(),
                });
            }
            if !aspect.angle.is_finite() || !(0.0..360.0).contains(&aspect.angle) {
                return Err(MatrixError::InvalidInputShape {
                    field: format!("astro.aspects[{}].angle", i),
                    message: "angle must be finite and within [0, 360)".into(),
                });
            }
        }

        Ok(())
    }

    /// Fraction of expected input fields that carry signal, in [0, 1].
    ///
    /// Sparse input never reports high confidence: this fraction multiplies
    /// into every domain's confidence score.
    pub fn field_coverage(&self) -> f32 {
        let saju = &self.saju;
        let astro = &self.astro;
        let populated = [
            saju.day_master_element.is_some(),
            !saju.pillar_elements.is_empty(),
            !saju.sibsin_distribution.is_empty(),
            !saju.twelve_stages.is_empty(),
            !saju.relations.is_empty(),
            saju.geokguk.is_some(),
            saju.yongsin.is_some(),
            saju.current_daeun_element.is_some(),
            saju.current_saeun_element.is_some(),
            !saju.shinsal_list.is_empty(),
            !astro.planet_houses.is_empty(),
            !astro.planet_signs.is_empty(),
            !astro.aspects.is_empty(),
            !astro.active_transits.is_empty(),
            astro.dominant_element.is_some(),
            !astro.asteroid_houses.is_empty(),
            !astro.extra_point_signs.is_empty(),
        ]
        .iter()
        .filter(|&&p| p)
        .count();

        populated as f32 / EXPECTED_FIELDS as f32
    }

    /// Deterministic fingerprint of the normalized input.
    ///
    /// UUIDv5 over the canonical JSON serialization. All maps are
    /// `BTreeMap`s, so serialization order is stable and identical input
    /// always hashes to the same id. External layers key their cache on
    /// this value.
    ///
    /// # Errors
    /// Returns [`MatrixError::Serialization`] if JSON serialization fails.
    pub fn fingerprint(&self) -> MatrixResult<Uuid> {
        let canonical = serde_json::to_string(self)?;
        Ok(Uuid::new_v5(&Uuid::NAMESPACE_OID, canonical.as_bytes()))
    }
}
