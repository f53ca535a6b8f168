//! Insight generator: ranks domain scores and cells into strengths,
//! cautions, balances, and top synergies.
//!
//! Ranking is fully deterministic: float ordering uses total comparison
//! and every tie breaks on the fixed domain priority (career before love
//! before money before health before move) and then on labels.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::types::cell::{InteractionLevel, MatrixCell};
use crate::types::domain::{DomainScore, LifeDomain};
use crate::types::summary::InsightPoint;

/// Cap on tension cells surfaced as caution points; domain-level cautions
/// always rank ahead of cell-level ones.
const TENSION_CELL_CAP: usize = 3;

/// Cap on surfaced synergy cells.
const TOP_SYNERGY_CAP: usize = 5;

/// Ranked insight output, consumed by the summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightSet {
    /// Domains above the strength threshold.
    pub strength_points: Vec<InsightPoint>,
    /// Domains between the thresholds.
    pub balance_points: Vec<InsightPoint>,
    /// Domains at or below the caution threshold, plus tension cells.
    pub caution_points: Vec<InsightPoint>,
    /// Synergy cells, best first.
    pub top_synergies: Vec<MatrixCell>,
    /// Number of emitted top-level insight entries after capping.
    pub insight_count: usize,
}

fn domain_point(score: &DomainScore, detail_prefix: &str) -> InsightPoint {
    let detail = score
        .drivers
        .first()
        .or_else(|| score.cautions.first())
        .map(|reason| format!("{} {}", detail_prefix, reason))
        .unwrap_or_else(|| format!("{} the fused domain score", detail_prefix));
    InsightPoint {
        domain: Some(score.domain),
        title: format!("{} {:.1}/10", score.domain, score.final_score_adjusted),
        detail,
        score: score.final_score_adjusted,
    }
}

/// Rank all insights for a calculated matrix.
pub fn rank_insights(
    domain_scores: &BTreeMap<LifeDomain, DomainScore>,
    cells: &[MatrixCell],
    config: &EngineConfig,
) -> InsightSet {
    let mut strengths: Vec<InsightPoint> = Vec::new();
    let mut balances: Vec<InsightPoint> = Vec::new();
    let mut cautions: Vec<InsightPoint> = Vec::new();

    // BTreeMap iteration is already priority order; only score reorders.
    for score in domain_scores.values().filter(|s| s.has_data) {
        if score.final_score_adjusted >= config.strength_threshold {
            strengths.push(domain_point(score, "carried by"));
        } else if score.final_score_adjusted <= config.caution_threshold {
            cautions.push(domain_point(score, "pressured by"));
        } else {
            balances.push(domain_point(score, "held steady by"));
        }
    }

    strengths.sort_by(|a, b| b.score.total_cmp(&a.score));
    balances.sort_by(|a, b| b.score.total_cmp(&a.score));
    // Worst first.
    cautions.sort_by(|a, b| a.score.total_cmp(&b.score));

    let mut tension_cells: Vec<&MatrixCell> = cells
        .iter()
        .filter(|c| c.interaction.level == InteractionLevel::Tension)
        .collect();
    tension_cells.sort_by(|a, b| {
        a.interaction
            .score
            .total_cmp(&b.interaction.score)
            .then_with(|| a.domain.priority().cmp(&b.domain.priority()))
            .then_with(|| a.saju_signal.cmp(&b.saju_signal))
    });
    for cell in tension_cells.into_iter().take(TENSION_CELL_CAP) {
        cautions.push(InsightPoint {
            domain: Some(cell.domain),
            title: format!("{} tension", cell.domain),
            detail: format!("{} meets {}", cell.saju_signal, cell.astro_signal),
            score: cell.interaction.score,
        });
    }

    let mut top_synergies: Vec<MatrixCell> = cells
        .iter()
        .filter(|c| c.interaction.level == InteractionLevel::Synergy)
        .cloned()
        .collect();
    top_synergies.sort_by(|a, b| {
        b.interaction
            .score
            .total_cmp(&a.interaction.score)
            .then_with(|| a.domain.priority().cmp(&b.domain.priority()))
            .then_with(|| a.saju_signal.cmp(&b.saju_signal))
            .then_with(|| a.astro_signal.cmp(&b.astro_signal))
    });
    top_synergies.truncate(TOP_SYNERGY_CAP);

    // Cap total emitted entries: strengths first, then cautions, then
    // balances absorb whatever room is left.
    let mut remaining = config.max_insights;
    let take = |points: &mut Vec<InsightPoint>, remaining: &mut usize| {
        points.truncate(*remaining);
        *remaining -= points.len();
    };
    take(&mut strengths, &mut remaining);
    take(&mut cautions, &mut remaining);
    take(&mut balances, &mut remaining);

    let insight_count = strengths.len() + cautions.len() + balances.len();

    InsightSet {
        strength_points: strengths,
        balance_points: balances,
        caution_points: cautions,
        top_synergies,
        insight_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::cell::Interaction;

    fn score_with(domain: LifeDomain, final_score: f32) -> DomainScore {
        let mut score = DomainScore::no_data(domain);
        score.has_data = true;
        score.final_score_adjusted = final_score;
        score.drivers = vec![format!("{} driver", domain)];
        score
    }

    fn cell_with(domain: LifeDomain, level: InteractionLevel, score: f32) -> MatrixCell {
        MatrixCell {
            domain,
            saju_signal: format!("saju-{}", domain),
            astro_signal: format!("astro-{}", domain),
            interaction: Interaction::new(level, score).unwrap(),
        }
    }

    fn scores(entries: &[(LifeDomain, f32)]) -> BTreeMap<LifeDomain, DomainScore> {
        let mut map = BTreeMap::new();
        for domain in LifeDomain::all() {
            map.insert(domain, DomainScore::no_data(domain));
        }
        for &(domain, value) in entries {
            map.insert(domain, score_with(domain, value));
        }
        map
    }

    #[test]
    fn test_threshold_partition() {
        let domain_scores = scores(&[
            (LifeDomain::Career, 8.5),
            (LifeDomain::Love, 6.0),
            (LifeDomain::Health, 3.0),
        ]);
        let set = rank_insights(&domain_scores, &[], &EngineConfig::default());

        assert_eq!(set.strength_points.len(), 1);
        assert_eq!(set.strength_points[0].domain, Some(LifeDomain::Career));
        assert_eq!(set.balance_points.len(), 1);
        assert_eq!(set.balance_points[0].domain, Some(LifeDomain::Love));
        assert_eq!(set.caution_points.len(), 1);
        assert_eq!(set.caution_points[0].domain, Some(LifeDomain::Health));
        assert_eq!(set.insight_count, 3);
    }

    #[test]
    fn test_no_data_domains_excluded_from_ranking() {
        let domain_scores = scores(&[]);
        let set = rank_insights(&domain_scores, &[], &EngineConfig::default());
        assert_eq!(set.insight_count, 0);
        assert!(set.strength_points.is_empty());
        assert!(set.caution_points.is_empty());
    }

    #[test]
    fn test_tension_cells_become_cautions() {
        let domain_scores = scores(&[(LifeDomain::Career, 6.0)]);
        let cells = vec![cell_with(LifeDomain::Career, InteractionLevel::Tension, 2.5)];
        let set = rank_insights(&domain_scores, &cells, &EngineConfig::default());
        assert_eq!(set.caution_points.len(), 1);
        assert!(set.caution_points[0].title.contains("tension"));
    }

    #[test]
    fn test_top_synergies_sorted_with_priority_tiebreak() {
        let domain_scores = scores(&[(LifeDomain::Career, 6.0)]);
        let cells = vec![
            cell_with(LifeDomain::Move, InteractionLevel::Synergy, 8.0),
            cell_with(LifeDomain::Career, InteractionLevel::Synergy, 8.0),
            cell_with(LifeDomain::Love, InteractionLevel::Synergy, 9.0),
            cell_with(LifeDomain::Money, InteractionLevel::Balance, 9.5),
        ];
        let set = rank_insights(&domain_scores, &cells, &EngineConfig::default());

        assert_eq!(set.top_synergies.len(), 3, "balance cells are not synergies");
        assert_eq!(set.top_synergies[0].domain, LifeDomain::Love);
        // Equal scores: career outranks move by fixed priority.
        assert_eq!(set.top_synergies[1].domain, LifeDomain::Career);
        assert_eq!(set.top_synergies[2].domain, LifeDomain::Move);
    }

    #[test]
    fn test_insight_count_capped() {
        let domain_scores = scores(&[
            (LifeDomain::Career, 9.0),
            (LifeDomain::Love, 8.8),
            (LifeDomain::Money, 8.6),
            (LifeDomain::Health, 3.0),
            (LifeDomain::Move, 6.0),
        ]);
        let config = EngineConfig::default().with_max_insights(3);
        let set = rank_insights(&domain_scores, &[], &config);
        assert_eq!(set.insight_count, 3);
        // Strengths fill the cap before cautions and balances.
        assert_eq!(set.strength_points.len(), 3);
        assert!(set.caution_points.is_empty());
        assert!(set.balance_points.is_empty());
    }
}
