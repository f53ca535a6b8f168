//! Matrix summary types: totals, grades, and ranked insight points.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::constants::grade;
use crate::types::cell::MatrixCell;
use crate::types::domain::{DomainScore, LifeDomain};

/// Discrete banding of the summary total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
}

impl Grade {
    /// Classify a total score (0..=10 scale) into a grade band.
    pub fn from_total(total: f32) -> Self {
        if total >= grade::A {
            Self::A
        } else if total >= grade::B {
            Self::B
        } else if total >= grade::C {
            Self::C
        } else {
            Self::D
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        };
        write!(f, "{}", s)
    }
}

/// One ranked insight entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightPoint {
    /// Domain the insight concerns, when domain-scoped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<LifeDomain>,
    /// Short headline.
    pub title: String,
    /// Supporting sentence.
    pub detail: String,
    /// Score that ranked this insight (0..=10 scale).
    pub score: f32,
}

/// Aggregate result of a full matrix calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixSummary {
    /// Weighted mean of adjusted domain scores over domains with data,
    /// 0..=10 scale.
    pub total_score: f32,

    /// Mean confidence across domains with data, in [0, 1].
    pub confidence_score: f32,

    /// Grade band of the total score.
    pub grade: Grade,

    /// Percentage of expected input fields populated, 0..=100.
    pub data_completeness: f32,

    /// Number of emitted top-level insight entries.
    pub insight_count: usize,

    /// Domains and cells ranking above the strength threshold.
    pub strength_points: Vec<InsightPoint>,

    /// Entries that are neither strengths nor cautions.
    pub balance_points: Vec<InsightPoint>,

    /// Domains at or below the caution threshold, plus tension cells.
    pub caution_points: Vec<InsightPoint>,

    /// Synergy cells, best first.
    pub top_synergies: Vec<MatrixCell>,

    /// Per-domain fused scores, keyed by domain for deterministic order.
    pub domain_scores: BTreeMap<LifeDomain, DomainScore>,
}

/// Full engine output: the summary plus every generated matrix cell.
///
/// The insight generator and the evidence builder both consume this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixOutcome {
    /// Aggregate summary.
    pub summary: MatrixSummary,
    /// All generated cells, in deterministic domain-then-pair order.
    pub cells: Vec<MatrixCell>,
}
