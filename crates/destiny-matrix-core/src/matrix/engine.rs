//! The destiny matrix engine: per-domain fusion scoring and summary.
//!
//! For each life domain the engine derives component scores from the two
//! systems' driver signals, converts their gap into an alignment score,
//! applies the luck-cycle/transit convergence weight, and reports a fused
//! adjusted score with explicit confidence. Domains without any supporting
//! raw signal are marked `has_data = false` and excluded from aggregation
//! rather than scored as zero.

use std::collections::BTreeMap;

use tracing::debug;

use crate::alignment::{alignment, alignment_factor};
use crate::config::constants::scoring;
use crate::config::EngineConfig;
use crate::error::MatrixResult;
use crate::insight::rank_insights;
use crate::matrix::signals::{
    collect_astro_signals, collect_saju_signals, signals_for_domain, DriverSignal,
};
use crate::overlap::compute_time_overlap;
use crate::types::cell::{Interaction, InteractionLevel, MatrixCell};
use crate::types::domain::{DomainScore, LifeDomain};
use crate::types::input::MatrixInput;
use crate::types::summary::{Grade, MatrixOutcome, MatrixSummary};

/// Normalize a driver list into a component score in [0, 1].
///
/// Centered at 0.5: all-positive signal saturates toward 1, all-negative
/// toward 0. Returns `None` for an empty list - absence of signal is not a
/// score.
fn component_score(signals: &[DriverSignal]) -> Option<f32> {
    if signals.is_empty() {
        return None;
    }
    let total: f32 = signals.iter().map(|s| s.weight).sum();
    if total <= f32::EPSILON {
        return None;
    }
    let net: f32 = signals.iter().map(|s| s.weight * s.polarity).sum();
    Some((0.5 + net / (2.0 * total)).clamp(0.0, 1.0))
}

/// Pair top drivers from both sides into matrix cells.
fn build_cells(
    domain: LifeDomain,
    saju: &[DriverSignal],
    astro: &[DriverSignal],
    per_side: usize,
) -> MatrixResult<Vec<MatrixCell>> {
    let mut cells = Vec::new();
    for s in saju.iter().take(per_side) {
        for a in astro.iter().take(per_side) {
            let mean_polarity = (s.polarity + a.polarity) / 2.0;
            let level = if mean_polarity > 0.25 {
                InteractionLevel::Synergy
            } else if mean_polarity < -0.25 {
                InteractionLevel::Tension
            } else {
                InteractionLevel::Balance
            };
            let strength = ((s.weight.min(1.0) + a.weight.min(1.0)) / 2.0).min(1.0);
            let score = (5.0 + 5.0 * mean_polarity * strength).clamp(0.0, scoring::SCORE_MAX);
            cells.push(MatrixCell {
                domain,
                saju_signal: s.label.clone(),
                astro_signal: a.label.clone(),
                interaction: Interaction::new(level, score)?,
            });
        }
    }
    Ok(cells)
}

/// Driver/caution labels from a ranked signal list.
fn reasons(signals: &[DriverSignal]) -> (Vec<String>, Vec<String>) {
    let mut drivers = Vec::new();
    let mut cautions = Vec::new();
    for signal in signals {
        if signal.polarity > 0.15 {
            if !drivers.contains(&signal.label) {
                drivers.push(signal.label.clone());
            }
        } else if signal.polarity < -0.15 && !cautions.contains(&signal.label) {
            cautions.push(signal.label.clone());
        }
    }
    drivers.truncate(4);
    cautions.truncate(4);
    (drivers, cautions)
}

/// Run the full matrix calculation.
///
/// # Errors
/// Returns [`crate::error::MatrixError::InvalidInputShape`] when the input
/// or the configuration fails boundary validation. Sparse input is not an
/// error: unsupported domains degrade to `has_data = false`.
pub fn calculate_destiny_matrix(
    input: &MatrixInput,
    config: &EngineConfig,
) -> MatrixResult<MatrixOutcome> {
    input.validate()?;
    config.validate()?;

    let saju_signals = collect_saju_signals(&input.saju);
    let astro_signals = collect_astro_signals(&input.astro);
    let coverage = input.field_coverage();

    let mut domain_scores: BTreeMap<LifeDomain, DomainScore> = BTreeMap::new();
    let mut cells: Vec<MatrixCell> = Vec::new();

    for domain in LifeDomain::all() {
        let saju_ranked = signals_for_domain(&saju_signals, domain);
        let astro_ranked = signals_for_domain(&astro_signals, domain);

        let saju_component = component_score(&saju_ranked);
        let astro_component = component_score(&astro_ranked);

        // Agreement only means something when both systems testify; a
        // single-sided domain scores on the available side alone.
        let (base_component, alignment_score) = match (saju_component, astro_component) {
            (Some(a), Some(b)) => ((a + b) / 2.0, alignment(a, b)),
            (Some(a), None) => (a, scoring::NEUTRAL_ALIGNMENT),
            (None, Some(b)) => (b, scoring::NEUTRAL_ALIGNMENT),
            (None, None) => {
                debug!(%domain, "no raw signal on either side, skipping domain");
                domain_scores.insert(domain, DomainScore::no_data(domain));
                continue;
            }
        };

        let overlap = compute_time_overlap(
            input.saju.current_daeun_element,
            input.saju.current_saeun_element,
            &input.astro.active_transits,
            saju_ranked.len(),
            astro_ranked.len(),
        );

        let base_final_score = scoring::SCORE_MAX * base_component;

        let final_score_adjusted = (base_final_score
            * alignment_factor(alignment_score)
            * overlap.time_overlap_weight)
            .clamp(0.0, scoring::SCORE_MAX);

        let confidence_score = (coverage
            * (scoring::CONFIDENCE_ALIGNMENT_FLOOR
                + (1.0 - scoring::CONFIDENCE_ALIGNMENT_FLOOR) * alignment_score))
            .clamp(0.0, 1.0);

        let (drivers, cautions) = {
            let mut merged: Vec<DriverSignal> = saju_ranked.clone();
            merged.extend(astro_ranked.iter().cloned());
            merged.sort_by(|a, b| {
                b.weight
                    .total_cmp(&a.weight)
                    .then_with(|| a.label.cmp(&b.label))
            });
            reasons(&merged)
        };

        let score = DomainScore {
            domain,
            has_data: true,
            saju_component_score: saju_component.unwrap_or(0.0),
            astro_component_score: astro_component.unwrap_or(0.0),
            alignment_score,
            overlap_strength: overlap.overlap_strength,
            time_overlap_weight: overlap.time_overlap_weight,
            base_final_score,
            final_score_adjusted,
            confidence_score,
            drivers,
            cautions,
        };
        score.validate()?;

        debug!(
            %domain,
            final_score = final_score_adjusted,
            alignment = alignment_score,
            confidence = confidence_score,
            "domain scored"
        );

        cells.extend(build_cells(
            domain,
            &saju_ranked,
            &astro_ranked,
            config.cell_drivers_per_side,
        )?);
        domain_scores.insert(domain, score);
    }

    let summary = summarize(&domain_scores, &cells, coverage, config);
    Ok(MatrixOutcome { summary, cells })
}

/// Aggregate domain scores into the summary, renormalizing weights over
/// domains that carry data.
fn summarize(
    domain_scores: &BTreeMap<LifeDomain, DomainScore>,
    cells: &[MatrixCell],
    coverage: f32,
    config: &EngineConfig,
) -> MatrixSummary {
    let mut weighted = 0.0;
    let mut weight_sum = 0.0;
    let mut confidence_sum = 0.0;
    let mut with_data = 0usize;

    for score in domain_scores.values().filter(|s| s.has_data) {
        let weight = score.domain.summary_weight();
        weighted += weight * score.final_score_adjusted;
        weight_sum += weight;
        confidence_sum += score.confidence_score;
        with_data += 1;
    }

    let total_score = if weight_sum > 0.0 {
        weighted / weight_sum
    } else {
        0.0
    };
    let confidence_score = if with_data > 0 {
        confidence_sum / with_data as f32
    } else {
        0.0
    };

    let insights = rank_insights(domain_scores, cells, config);

    MatrixSummary {
        total_score,
        confidence_score,
        grade: Grade::from_total(total_score),
        data_completeness: coverage * 100.0,
        insight_count: insights.insight_count,
        strength_points: insights.strength_points,
        balance_points: insights.balance_points,
        caution_points: insights.caution_points,
        top_synergies: insights.top_synergies,
        domain_scores: domain_scores.clone(),
    }
}
