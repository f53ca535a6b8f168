//! Deterministic construction of grounding anchors.
//!
//! Every anchor cites one concrete Saju fact and one concrete astrology
//! fact and draws a conclusion naming both systems. Sparse input yields
//! shorter, more generic sentences, never fewer anchors and never an
//! evidence string below the minimum length: each synthesis path ends in a
//! substantive fallback sentence, and anchor construction re-checks the
//! lengths.

use tracing::debug;

use crate::alignment::AlignmentBand;
use crate::config::constants::evidence as limits;
use crate::error::MatrixResult;
use crate::matrix::signals::{
    aspect_touches_domain, collect_astro_signals, collect_saju_signals, signals_for_domain,
    DriverSignal,
};
use crate::types::astro::Aspect;
use crate::types::domain::LifeDomain;
use crate::types::evidence::{CrossEvidenceSet, EvidenceAnchor, EvidenceGraph};
use crate::types::input::MatrixInput;
use crate::types::summary::MatrixOutcome;

use super::EvidenceOptions;

/// Fixed section layout of a comprehensive reading, in render order.
const SECTIONS: [(&str, Option<LifeDomain>); 10] = [
    ("overview", None),
    ("career", Some(LifeDomain::Career)),
    ("love", Some(LifeDomain::Love)),
    ("money", Some(LifeDomain::Money)),
    ("health", Some(LifeDomain::Health)),
    ("move", Some(LifeDomain::Move)),
    ("timing", None),
    ("personality", None),
    ("relations", None),
    ("synthesis", None),
];

/// Build the evidence graph for a calculated matrix.
///
/// The anchor count is fixed by `options.mode` and independent of input
/// richness.
///
/// # Errors
/// Returns [`crate::error::MatrixError::EvidenceConstruction`] if any
/// synthesized evidence string fails the minimum-length gate.
pub fn build_graphrag_evidence(
    input: &MatrixInput,
    outcome: &MatrixOutcome,
    options: &EvidenceOptions,
) -> MatrixResult<EvidenceGraph> {
    let saju_signals = collect_saju_signals(&input.saju);
    let astro_signals = collect_astro_signals(&input.astro);
    let count = options.mode.anchor_count();

    let mut anchors = Vec::with_capacity(count);
    for index in 0..count {
        let (section, domain) = SECTIONS[index % SECTIONS.len()];
        let id = format!("anchor-{:02}", index + 1);

        let saju_evidence = saju_fact(input, section, domain, &saju_signals);
        let astrology_evidence = astro_fact(input, section, domain, &astro_signals);
        let cross_conclusion = cross_conclusion(outcome, section, domain);
        let cross_sets = cross_evidence_sets(&id, input, domain, &saju_signals, &astro_signals);

        anchors.push(EvidenceAnchor::new(
            id,
            section,
            saju_evidence,
            astrology_evidence,
            cross_conclusion,
            cross_sets,
        )?);
    }

    debug!(anchors = anchors.len(), "evidence graph built");
    Ok(EvidenceGraph { anchors })
}

/// Dominant entry of a count map, ties broken by key order.
fn dominant<K: Copy + Ord>(map: &std::collections::BTreeMap<K, u8>) -> Option<(K, u8)> {
    let mut best: Option<(K, u8)> = None;
    for (&key, &count) in map {
        if count > 0 && best.map_or(true, |(_, c)| count > c) {
            best = Some((key, count));
        }
    }
    best
}

/// Tightest aspect relevant to a domain (or overall when `domain` is None).
fn tightest_aspect(input: &MatrixInput, domain: Option<LifeDomain>) -> Option<&Aspect> {
    input
        .astro
        .aspects
        .iter()
        .filter(|a| domain.map_or(true, |d| aspect_touches_domain(a, d)))
        .min_by(|a, b| {
            a.orb
                .total_cmp(&b.orb)
                .then_with(|| a.planet1.cmp(&b.planet1))
                .then_with(|| a.planet2.cmp(&b.planet2))
        })
}

fn saju_fact(
    input: &MatrixInput,
    section: &str,
    domain: Option<LifeDomain>,
    signals: &[DriverSignal],
) -> String {
    let saju = &input.saju;

    if let Some(domain) = domain {
        let ranked = signals_for_domain(signals, domain);
        if let Some(top) = ranked.first() {
            return format!(
                "The chart's {} axis is driven by {}, its strongest saju marker on this axis.",
                domain, top.label
            );
        }
    }

    match section {
        "timing" => {
            if let Some(element) = saju.current_daeun_element {
                let saeun = saju
                    .current_saeun_element
                    .map(|e| format!(" and a {} year cycle", e))
                    .unwrap_or_default();
                return format!(
                    "The current decade luck cycle runs on the {} element{}.",
                    element, saeun
                );
            }
        }
        "personality" => {
            if let Some((kind, count)) = dominant(&saju.sibsin_distribution) {
                return format!(
                    "The sibsin distribution leans on {} ({}) with {} appearances in the chart.",
                    kind,
                    kind.korean(),
                    count
                );
            }
            if let Some(geokguk) = &saju.geokguk {
                return format!(
                    "The chart carries the {} structure as its governing pattern.",
                    geokguk
                );
            }
        }
        "relations" => {
            if let Some(relation) = saju.relations.first() {
                return format!(
                    "The pillars form a {} relation, coloring how the chart negotiates change.",
                    relation.kind
                );
            }
        }
        "synthesis" => {
            if let (Some(geokguk), Some(yongsin)) = (&saju.geokguk, saju.yongsin) {
                return format!(
                    "The {} structure with a {} yongsin frames the whole saju reading.",
                    geokguk, yongsin
                );
            }
        }
        _ => {}
    }

    if let Some(element) = saju.day_master_element {
        return format!(
            "The day master is the {} element ({}), anchoring the chart's temperament.",
            element,
            element.korean()
        );
    }
    if let Some((stage, _)) = dominant(&saju.twelve_stages) {
        return format!(
            "The {} life stage dominates the pillars of this chart.",
            stage
        );
    }
    if let Some(shinsal) = saju.shinsal_list.first() {
        return format!(
            "The chart carries the {} shinsal among its named stars.",
            shinsal
        );
    }

    // Substantive even for empty input.
    "The saju chart supplies no dominant marker here, leaving the day master reading unmodified."
        .to_string()
}

fn astro_fact(
    input: &MatrixInput,
    section: &str,
    domain: Option<LifeDomain>,
    signals: &[DriverSignal],
) -> String {
    let astro = &input.astro;

    if let Some(domain) = domain {
        let ranked = signals_for_domain(signals, domain);
        if let Some(top) = ranked.first() {
            return format!(
                "On the natal side, {} concentrates the testimony on {} matters.",
                top.label, domain
            );
        }
    }

    match section {
        "timing" => {
            if let Some(transit) = astro.active_transits.first() {
                return format!(
                    "An active {} transit conditions the current timing window.",
                    transit
                );
            }
        }
        "relations" => {
            if let Some(aspect) = tightest_aspect(input, None) {
                return format!(
                    "{} forms a {} to {} within a {:.1} degree orb.",
                    aspect.planet1, aspect.aspect_type, aspect.planet2, aspect.orb
                );
            }
        }
        "personality" => {
            if let Some(sign) = astro.planet_signs.get(&crate::types::astro::Planet::Sun) {
                return format!(
                    "The sun stands in {}, giving the chart its daylight register.",
                    sign
                );
            }
        }
        "synthesis" => {
            if !astro.planet_houses.is_empty() {
                return format!(
                    "{} planet placements spread the natal testimony across the houses.",
                    astro.planet_houses.len()
                );
            }
        }
        _ => {}
    }

    if let Some(element) = astro.dominant_element {
        return format!(
            "The chart's dominant element is {}, setting its overall register.",
            element
        );
    }
    if let Some((planet, house)) = astro.planet_houses.iter().next() {
        return format!(
            "{} occupies {}, the chart's leading placement by convention.",
            planet, house
        );
    }
    if let Some(aspect) = tightest_aspect(input, None) {
        return format!(
            "{} forms a {} to {} within a {:.1} degree orb.",
            aspect.planet1, aspect.aspect_type, aspect.planet2, aspect.orb
        );
    }

    "The natal chart offers no pointed testimony here, so the houses speak in their default order."
        .to_string()
}

fn cross_conclusion(outcome: &MatrixOutcome, section: &str, domain: Option<LifeDomain>) -> String {
    let summary = &outcome.summary;

    if let Some(domain) = domain {
        if let Some(score) = summary.domain_scores.get(&domain) {
            if score.has_data {
                return format!(
                    "Saju and astrology together rate the {} axis {:.1} out of 10 with {} cross-system alignment.",
                    domain,
                    score.final_score_adjusted,
                    AlignmentBand::classify(score.alignment_score)
                );
            }
        }
        return format!(
            "Neither the saju chart nor the natal chart carries enough signal to score the {} axis, so both systems stay silent on it.",
            domain
        );
    }

    match section {
        "timing" => {
            let weight = summary
                .domain_scores
                .values()
                .filter(|s| s.has_data)
                .map(|s| s.time_overlap_weight)
                .fold(1.0_f32, f32::max);
            format!(
                "The saju luck cycle and the active transits overlap at weight {:.2}, sharpening the timing guidance both systems give.",
                weight
            )
        }
        "personality" => {
            "The dominant sibsin pattern and the planetary placements describe one temperament from two directions."
                .to_string()
        }
        "relations" => {
            "Pillar relations on the saju side echo the aspect geometry on the astrology side of this chart."
                .to_string()
        }
        "synthesis" => {
            let with_data = summary
                .domain_scores
                .values()
                .filter(|s| s.has_data)
                .count();
            format!(
                "Across both the saju and astrology systems the reading lands at grade {}, with {} of five life domains carrying data.",
                summary.grade, with_data
            )
        }
        _ => format!(
            "Read jointly, the saju chart and the natal chart give this profile a {} grade at {:.1} points overall.",
            summary.grade, summary.total_score
        ),
    }
}

fn cross_evidence_sets(
    anchor_id: &str,
    input: &MatrixInput,
    domain: Option<LifeDomain>,
    saju_signals: &[DriverSignal],
    astro_signals: &[DriverSignal],
) -> Vec<CrossEvidenceSet> {
    let top_for = |signals: &[DriverSignal]| -> Option<DriverSignal> {
        match domain {
            Some(d) => signals_for_domain(signals, d).into_iter().next(),
            None => {
                let mut all = signals.to_vec();
                all.sort_by(|a, b| {
                    b.weight
                        .total_cmp(&a.weight)
                        .then_with(|| a.label.cmp(&b.label))
                });
                all.into_iter().next()
            }
        }
    };

    let saju_top = top_for(saju_signals);
    let astro_top = top_for(astro_signals);

    let (overlap_domains, overlap_score) = match (&saju_top, &astro_top) {
        (Some(s), Some(a)) => {
            let mut intersection: Vec<LifeDomain> = s
                .domain_tags
                .iter()
                .filter(|d| a.domain_tags.contains(d))
                .copied()
                .collect();
            intersection.sort_unstable();
            intersection.dedup();

            let mut union: Vec<LifeDomain> = s
                .domain_tags
                .iter()
                .chain(a.domain_tags.iter())
                .copied()
                .collect();
            union.sort_unstable();
            union.dedup();

            let score = if union.is_empty() {
                0.0
            } else {
                intersection.len() as f32 / union.len() as f32
            };
            (intersection, score)
        }
        _ => (domain.into_iter().collect(), 0.0),
    };

    let orb_fit_score = tightest_aspect(input, domain)
        .map(|aspect| (1.0 - aspect.orb / limits::ORB_MAX).clamp(0.0, 1.0))
        .unwrap_or(limits::NEUTRAL_ORB_FIT);

    vec![CrossEvidenceSet {
        id: format!("{}-x1", anchor_id),
        overlap_domains,
        overlap_score,
        orb_fit_score,
    }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::evidence::EvidenceMode;
    use crate::matrix::calculate_destiny_matrix;
    use crate::types::astro::{Aspect, AspectType, House, Planet, TransitTag, ZodiacSign};
    use crate::types::saju::{FiveElement, Relation, RelationKind, SibsinKind};

    fn dense_input() -> MatrixInput {
        let mut input = MatrixInput::default();
        input.saju.day_master_element = Some(FiveElement::Wood);
        input.saju.sibsin_distribution.insert(SibsinKind::Jeonggwan, 2);
        input.saju.sibsin_distribution.insert(SibsinKind::Jeongjae, 1);
        input.saju.geokguk = Some("jeonggwan-gyeok".into());
        input.saju.yongsin = Some(FiveElement::Fire);
        input.saju.current_daeun_element = Some(FiveElement::Fire);
        input
            .saju
            .relations
            .push(Relation::new(RelationKind::Hap, vec![]));
        input
            .astro
            .planet_houses
            .insert(Planet::Sun, House::new(10).unwrap());
        input
            .astro
            .planet_houses
            .insert(Planet::Venus, House::new(7).unwrap());
        input
            .astro
            .planet_signs
            .insert(Planet::Sun, ZodiacSign::Leo);
        input.astro.aspects.push(Aspect::new(
            Planet::Venus,
            Planet::Jupiter,
            AspectType::Trine,
            1.2,
            121.2,
        ));
        input.astro.active_transits.push(TransitTag::JupiterReturn);
        input
    }

    fn outcome_for(input: &MatrixInput) -> MatrixOutcome {
        calculate_destiny_matrix(input, &EngineConfig::default()).unwrap()
    }

    #[test]
    fn test_comprehensive_always_ten_anchors() {
        for input in [MatrixInput::default(), dense_input()] {
            let outcome = outcome_for(&input);
            let graph =
                build_graphrag_evidence(&input, &outcome, &EvidenceOptions::default()).unwrap();
            assert_eq!(graph.len(), 10, "comprehensive mode is pinned to 10 anchors");
        }
    }

    #[test]
    fn test_every_evidence_string_exceeds_minimum() {
        let input = MatrixInput::default();
        let outcome = outcome_for(&input);
        let graph = build_graphrag_evidence(&input, &outcome, &EvidenceOptions::default()).unwrap();
        for anchor in &graph.anchors {
            assert!(anchor.saju_evidence.chars().count() > 20, "{}", anchor.id);
            assert!(anchor.astrology_evidence.chars().count() > 20, "{}", anchor.id);
            assert!(anchor.cross_conclusion.chars().count() > 20, "{}", anchor.id);
        }
    }

    #[test]
    fn test_anchor_ids_stable() {
        let input = dense_input();
        let outcome = outcome_for(&input);
        let graph = build_graphrag_evidence(&input, &outcome, &EvidenceOptions::default()).unwrap();
        let ids: Vec<&str> = graph.anchors.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids[0], "anchor-01");
        assert_eq!(ids[9], "anchor-10");
    }

    #[test]
    fn test_fixed_mode_count_is_explicit() {
        let input = dense_input();
        let outcome = outcome_for(&input);
        let mut options = EvidenceOptions::default();
        options.mode = EvidenceMode::Fixed(3);
        let graph = build_graphrag_evidence(&input, &outcome, &options).unwrap();
        assert_eq!(graph.len(), 3);

        options.mode = EvidenceMode::Fixed(0);
        let graph = build_graphrag_evidence(&input, &outcome, &options).unwrap();
        assert!(graph.is_empty());
    }

    #[test]
    fn test_cross_conclusion_names_both_systems() {
        let input = dense_input();
        let outcome = outcome_for(&input);
        let graph = build_graphrag_evidence(&input, &outcome, &EvidenceOptions::default()).unwrap();
        for anchor in &graph.anchors {
            let text = anchor.cross_conclusion.to_lowercase();
            let cites_saju = text.contains("saju") || text.contains("luck cycle") || text.contains("pillar") || text.contains("sibsin");
            let cites_astro = text.contains("astrology") || text.contains("transit") || text.contains("natal") || text.contains("planet") || text.contains("aspect");
            assert!(
                cites_saju && cites_astro,
                "anchor {} conclusion must reference both systems: {}",
                anchor.id,
                anchor.cross_conclusion
            );
        }
    }

    #[test]
    fn test_domain_anchor_cites_specific_facts() {
        let input = dense_input();
        let outcome = outcome_for(&input);
        let graph = build_graphrag_evidence(&input, &outcome, &EvidenceOptions::default()).unwrap();
        let career = graph
            .anchors
            .iter()
            .find(|a| a.section == "career")
            .unwrap();
        assert!(
            career.saju_evidence.contains("jeonggwan"),
            "career saju evidence should cite the officer star: {}",
            career.saju_evidence
        );
        assert!(
            career.astrology_evidence.contains("sun") || career.astrology_evidence.contains("house"),
            "career astro evidence should cite a placement: {}",
            career.astrology_evidence
        );
    }

    #[test]
    fn test_orb_fit_tighter_is_higher() {
        let mut tight = dense_input();
        tight.astro.aspects[0].orb = 0.5;
        let mut wide = dense_input();
        wide.astro.aspects[0].orb = 6.0;

        let tight_graph =
            build_graphrag_evidence(&tight, &outcome_for(&tight), &EvidenceOptions::default())
                .unwrap();
        let wide_graph =
            build_graphrag_evidence(&wide, &outcome_for(&wide), &EvidenceOptions::default())
                .unwrap();

        // The love anchor routes through venus, which the fixture aspects.
        let fit = |graph: &EvidenceGraph| {
            graph
                .anchors
                .iter()
                .find(|a| a.section == "love")
                .unwrap()
                .cross_evidence_sets[0]
                .orb_fit_score
        };
        assert!(fit(&tight_graph) > fit(&wide_graph));
    }

    #[test]
    fn test_empty_input_uses_neutral_orb_fit() {
        let input = MatrixInput::default();
        let outcome = outcome_for(&input);
        let graph = build_graphrag_evidence(&input, &outcome, &EvidenceOptions::default()).unwrap();
        for anchor in &graph.anchors {
            assert_eq!(anchor.cross_evidence_sets[0].orb_fit_score, 0.5);
            assert_eq!(anchor.cross_evidence_sets[0].overlap_score, 0.0);
        }
    }

    #[test]
    fn test_determinism() {
        let input = dense_input();
        let outcome = outcome_for(&input);
        let a = build_graphrag_evidence(&input, &outcome, &EvidenceOptions::default()).unwrap();
        let b = build_graphrag_evidence(&input, &outcome, &EvidenceOptions::default()).unwrap();
        assert_eq!(a, b);
    }
}
