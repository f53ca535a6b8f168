//! Centralized scoring constants.
//!
//! Every threshold and magic number used by the matrix engine, the evidence
//! builder, the auditor, and the checklist builder lives here, so the exact
//! scoring functions are stable, documented artifacts rather than opaque
//! heuristics scattered through the code.

/// Per-domain fusion scoring constants.
pub mod scoring {
    /// Upper bound of the internal domain score scale.
    pub const SCORE_MAX: f32 = 10.0;

    /// Lower bound of the alignment factor applied to the base score.
    ///
    /// A fully divergent pair of component scores damps the base score to
    /// 85% rather than zeroing it: disagreement reduces trust, it does not
    /// erase the underlying signal.
    pub const ALIGNMENT_FACTOR_MIN: f32 = 0.85;

    /// Span of the alignment factor. Factor range is
    /// `[ALIGNMENT_FACTOR_MIN, ALIGNMENT_FACTOR_MIN + ALIGNMENT_FACTOR_SPAN]`.
    pub const ALIGNMENT_FACTOR_SPAN: f32 = 0.30;

    /// Floor applied to alignment inside the confidence product, so a
    /// fully-populated but disagreeing input still reports some confidence
    /// in the data itself.
    pub const CONFIDENCE_ALIGNMENT_FLOOR: f32 = 0.25;

    /// Neutral alignment used when only one system carries signal for a
    /// domain. No cross-system agreement claim is made either way.
    pub const NEUTRAL_ALIGNMENT: f32 = 0.5;

    /// Maximum drivers per side considered when pairing matrix cells.
    pub const CELL_DRIVERS_PER_SIDE: usize = 3;

    /// Multiplier cap for repeated sibsin/stage counts. A god appearing
    /// five times does not carry five times the weight of one appearance.
    pub const COUNT_MULTIPLIER_CAP: f32 = 3.0;
}

/// Alignment band thresholds.
pub mod alignment {
    /// Strong agreement between the two systems.
    pub const STRONG: f32 = 0.85;

    /// Moderate agreement.
    pub const MODERATE: f32 = 0.60;

    /// Weak agreement; anything below is divergent.
    pub const WEAK: f32 = 0.35;
}

/// Time-overlap (luck-cycle x transit convergence) constants.
pub mod overlap {
    /// Baseline weight when no active transit resonates with the current
    /// luck-cycle elements.
    pub const BASELINE_WEIGHT: f32 = 1.0;

    /// Increment per active transit matching the daeun element's affinity
    /// set.
    pub const DAEUN_INCREMENT: f32 = 0.15;

    /// Increment per active transit matching the saeun element's affinity
    /// set. Year cycles carry less weight than decade cycles.
    pub const SAEUN_INCREMENT: f32 = 0.10;

    /// Hard cap on the combined time-overlap weight.
    pub const WEIGHT_CAP: f32 = 1.5;

    /// Raw strength contribution of a daeun-level match.
    pub const DAEUN_STRENGTH: f32 = 1.0;

    /// Raw strength contribution of a saeun-level match.
    pub const SAEUN_STRENGTH: f32 = 0.5;

    /// Damping applied to overlap strength when a domain lacks drivers on
    /// either side. A convergence with no domain signal is weak evidence.
    pub const NO_DRIVER_DAMPING: f32 = 0.5;
}

/// Insight ranking thresholds (domain score scale 0..=10).
pub mod insight {
    /// Domains at or above this adjusted score rank as strengths.
    pub const STRENGTH_THRESHOLD: f32 = 7.5;

    /// Domains at or below this adjusted score rank as cautions.
    pub const CAUTION_THRESHOLD: f32 = 4.0;

    /// Cap on emitted top-level insight entries.
    pub const MAX_INSIGHTS: usize = 12;
}

/// Evidence anchor construction constants.
pub mod evidence {
    /// Anchor count for comprehensive mode. Fixed regardless of input
    /// richness; sparse input yields shorter sentences, never fewer anchors.
    pub const COMPREHENSIVE_ANCHOR_COUNT: usize = 10;

    /// Minimum length of every evidence string on an anchor.
    pub const MIN_EVIDENCE_CHARS: usize = 20;

    /// Orb at or beyond which an aspect's fit score bottoms out.
    pub const ORB_MAX: f32 = 8.0;

    /// Neutral orb-fit score used when an anchor cites no aspect.
    pub const NEUTRAL_ORB_FIT: f32 = 0.5;
}

/// Cross-consistency audit penalty table.
///
/// The audit starts at [`MAX_SCORE`] and subtracts a fixed penalty per
/// failed check. Each line here is independently unit-tested.
pub mod audit {
    /// Starting score before penalties.
    pub const MAX_SCORE: u8 = 100;

    /// Penalty: sibsin distribution missing from the raw input.
    pub const MISSING_SIBSIN: u8 = 12;

    /// Penalty: no aspects in the raw input.
    pub const MISSING_ASPECTS: u8 = 12;

    /// Penalty: no pillar relations in the raw input.
    pub const MISSING_RELATIONS: u8 = 8;

    /// Penalty: narrative report carries no sections at all.
    pub const EMPTY_REPORT: u8 = 20;

    /// Penalty: evidence graph carries no anchors.
    pub const EMPTY_EVIDENCE: u8 = 10;

    /// Penalty per narrative section shorter than
    /// [`SHORT_SECTION_MIN_CHARS`].
    pub const SHORT_SECTION: u8 = 10;

    /// Cap on accumulated short-section penalties.
    pub const SHORT_SECTION_CAP: u8 = 30;

    /// Penalty per section that reads as generic or placeholder text.
    pub const GENERIC_SECTION: u8 = 8;

    /// Cap on accumulated generic-section penalties.
    pub const GENERIC_SECTION_CAP: u8 = 24;

    /// Penalty per section that fails to reference both the Saju and the
    /// astrology vocabularies together.
    pub const UNCROSSED_SECTION: u8 = 6;

    /// Cap on accumulated cross-reference penalties.
    pub const UNCROSSED_SECTION_CAP: u8 = 24;

    /// Sections shorter than this many characters count as too short.
    pub const SHORT_SECTION_MIN_CHARS: usize = 80;

    /// Sections with fewer distinct words than this read as generic.
    pub const GENERIC_MIN_DISTINCT_WORDS: usize = 8;
}

/// Overall grade bands (summary total score scale 0..=10).
pub mod grade {
    /// Grade A floor.
    pub const A: f32 = 8.0;

    /// Grade B floor.
    pub const B: f32 = 6.5;

    /// Grade C floor. Anything lower grades D.
    pub const C: f32 = 5.0;
}

/// Action checklist bounds.
pub mod checklist {
    /// Minimum checklist items per day.
    pub const MIN_ITEMS: usize = 8;

    /// Maximum checklist items per day.
    pub const MAX_ITEMS: usize = 10;

    /// Default minimum score for `get_best_area_category`.
    pub const DEFAULT_MIN_AREA_SCORE: u8 = 65;

    /// Weight of the year-cycle score in the blended area base score.
    pub const SEUN_WEIGHT: f32 = 0.6;

    /// Weight of the secondary score in the blended area base score.
    pub const OTHER_WEIGHT: f32 = 0.4;
}
