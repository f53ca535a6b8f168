//! GraphRAG evidence anchor types.
//!
//! An anchor is a pre-validated fact-grounding unit: one concrete Saju
//! fact, one concrete astrology fact, and a conclusion that references
//! both systems. Anchors constrain the downstream narrative generator and
//! later ground the consistency audit of its output.
//!
//! Evidence strings must never be empty or below the minimum length. A
//! failure to synthesize a substantive sentence is a construction error,
//! never a silently-empty anchor.

use serde::{Deserialize, Serialize};

use crate::config::constants::evidence as limits;
use crate::error::{MatrixError, MatrixResult};
use crate::types::domain::LifeDomain;

/// Quantified overlap between the saju and astro drivers of an anchor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossEvidenceSet {
    /// Deterministic id, derived from the parent anchor id.
    pub id: String,

    /// Domains both drivers touch.
    pub overlap_domains: Vec<LifeDomain>,

    /// Domain-tag overlap between the paired drivers, in [0, 1].
    pub overlap_score: f32,

    /// Inverse-orb fit of the cited aspect, in [0, 1]. Tighter orb scores
    /// higher; neutral 0.5 when the anchor cites no aspect.
    pub orb_fit_score: f32,
}

/// A single grounding anchor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceAnchor {
    /// Deterministic anchor id (`anchor-01` ...).
    pub id: String,

    /// Section of the reading this anchor grounds.
    pub section: String,

    /// Concrete Saju fact, more than 20 characters.
    pub saju_evidence: String,

    /// Concrete astrology fact, more than 20 characters.
    pub astrology_evidence: String,

    /// Conclusion referencing both systems, more than 20 characters.
    pub cross_conclusion: String,

    /// Quantified cross-system overlap sets.
    pub cross_evidence_sets: Vec<CrossEvidenceSet>,
}

impl EvidenceAnchor {
    /// Create an anchor, enforcing the minimum evidence lengths.
    ///
    /// # Errors
    /// Returns [`MatrixError::EvidenceConstruction`] when any of the three
    /// evidence strings is at or below [`limits::MIN_EVIDENCE_CHARS`]
    /// characters.
    pub fn new(
        id: impl Into<String>,
        section: impl Into<String>,
        saju_evidence: String,
        astrology_evidence: String,
        cross_conclusion: String,
        cross_evidence_sets: Vec<CrossEvidenceSet>,
    ) -> MatrixResult<Self> {
        let id = id.into();
        for (name, text) in [
            ("saju_evidence", &saju_evidence),
            ("astrology_evidence", &astrology_evidence),
            ("cross_conclusion", &cross_conclusion),
        ] {
            if text.chars().count() <= limits::MIN_EVIDENCE_CHARS {
                return Err(MatrixError::EvidenceConstruction {
                    anchor: id,
                    reason: format!(
                        "{} must exceed {} characters, got {}",
                        name,
                        limits::MIN_EVIDENCE_CHARS,
                        text.chars().count()
                    ),
                });
            }
        }
        Ok(Self {
            id,
            section: section.into(),
            saju_evidence,
            astrology_evidence,
            cross_conclusion,
            cross_evidence_sets,
        })
    }
}

/// The complete evidence graph handed to the prompt formatter and the
/// consistency auditor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceGraph {
    /// All anchors, in fixed section order.
    pub anchors: Vec<EvidenceAnchor>,
}

impl EvidenceGraph {
    /// Number of anchors in the graph.
    #[inline]
    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    /// Whether the graph carries no anchors.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }
}
