//! Response-shape assembly for the reporting collaborator.
//!
//! The API layer wraps the engine's output into a JSON response; the shape
//! lives here so the contract is typed and versioned with the engine.
//! Scores are reported on the external 0..=100 scale.

use serde::{Deserialize, Serialize};

use crate::types::domain::LifeDomain;
use crate::types::summary::{Grade, InsightPoint, MatrixOutcome};

/// Top-level score block of the JSON response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallScore {
    /// Total score on the external 0..=100 scale.
    pub total: f32,
    /// Grade band.
    pub grade: Grade,
    /// Percentage of expected input fields populated.
    pub data_completeness: f32,
    /// Number of emitted top-level insight entries.
    pub insight_count: usize,
}

/// Per-domain block of the JSON response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainAnalysis {
    /// The domain described.
    pub domain: LifeDomain,
    /// Whether any raw signal supported the domain.
    pub has_data: bool,
    /// Adjusted score on the external 0..=100 scale; 0 when `has_data` is
    /// false (readers must gate on the flag, not the number).
    pub score: f32,
    /// Confidence in [0, 1].
    pub confidence: f32,
    /// Reasons pushing the domain up.
    pub drivers: Vec<String>,
    /// Reasons pulling the domain down.
    pub cautions: Vec<String>,
}

/// The full JSON response shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixReport {
    pub overall_score: OverallScore,
    pub domain_analysis: Vec<DomainAnalysis>,
    pub top_insights: Vec<InsightPoint>,
}

/// Assemble the response shape from a calculated outcome.
pub fn assemble_report(outcome: &MatrixOutcome) -> MatrixReport {
    let summary = &outcome.summary;

    let domain_analysis = summary
        .domain_scores
        .values()
        .map(|score| DomainAnalysis {
            domain: score.domain,
            has_data: score.has_data,
            score: score.final_score_adjusted * 10.0,
            confidence: score.confidence_score,
            drivers: score.drivers.clone(),
            cautions: score.cautions.clone(),
        })
        .collect();

    // Strengths first, then cautions, mirroring the insight cap order.
    let top_insights = summary
        .strength_points
        .iter()
        .chain(summary.caution_points.iter())
        .chain(summary.balance_points.iter())
        .cloned()
        .collect();

    MatrixReport {
        overall_score: OverallScore {
            total: summary.total_score * 10.0,
            grade: summary.grade,
            data_completeness: summary.data_completeness,
            insight_count: summary.insight_count,
        },
        domain_analysis,
        top_insights,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::matrix::calculate_destiny_matrix;
    use crate::types::astro::{House, Planet};
    use crate::types::input::MatrixInput;
    use crate::types::saju::SibsinKind;

    fn outcome() -> MatrixOutcome {
        let mut input = MatrixInput::default();
        input.saju.sibsin_distribution.insert(SibsinKind::Jeonggwan, 2);
        input
            .astro
            .planet_houses
            .insert(Planet::Jupiter, House::new(10).unwrap());
        calculate_destiny_matrix(&input, &EngineConfig::default()).unwrap()
    }

    #[test]
    fn test_report_scales_to_hundred() {
        let outcome = outcome();
        let report = assemble_report(&outcome);
        assert!((report.overall_score.total - outcome.summary.total_score * 10.0).abs() < 1e-5);
        for analysis in &report.domain_analysis {
            assert!(analysis.score >= 0.0 && analysis.score <= 100.0);
        }
    }

    #[test]
    fn test_report_tags_every_domain() {
        let report = assemble_report(&outcome());
        assert_eq!(report.domain_analysis.len(), 5);
        assert!(report.domain_analysis.iter().any(|d| d.has_data));
        assert!(report.domain_analysis.iter().any(|d| !d.has_data));
    }

    #[test]
    fn test_insight_count_matches_entries() {
        let outcome = outcome();
        let report = assemble_report(&outcome);
        assert_eq!(report.top_insights.len(), report.overall_score.insight_count);
    }

    #[test]
    fn test_report_serializes_snake_case() {
        let json = serde_json::to_string(&assemble_report(&outcome())).unwrap();
        assert!(json.contains("overall_score"));
        assert!(json.contains("domain_analysis"));
        assert!(json.contains("has_data"));
    }
}
