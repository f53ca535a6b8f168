//! Cross-consistency auditor: heuristic grading of generated narrative.
//!
//! A pure grader over the raw input, the evidence graph, and the narrative
//! sections the external generator returned. It starts from 100 and
//! subtracts the fixed penalties enumerated in
//! [`crate::config::constants::audit`], accumulating a description of every
//! failed check into `blockers`.
//!
//! The auditor never fails and never panics: its entire purpose is to
//! produce a quality signal even for maximally deficient input.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::constants::audit as penalties;
use crate::evidence::EvidenceMode;
use crate::types::evidence::EvidenceGraph;
use crate::types::input::MatrixInput;
use crate::types::report::NarrativeReport;

/// Vocabulary that marks a sentence as referencing the Saju system.
const SAJU_VOCAB: &[&str] = &[
    "saju",
    "사주",
    "day master",
    "일간",
    "sibsin",
    "십신",
    "daeun",
    "대운",
    "saeun",
    "세운",
    "yongsin",
    "용신",
    "geokguk",
    "격국",
    "pillar",
    "오행",
    "luck cycle",
    "shinsal",
];

/// Vocabulary that marks a sentence as referencing the astrology system.
const ASTRO_VOCAB: &[&str] = &[
    "astrology",
    "점성",
    "house",
    "하우스",
    "planet",
    "행성",
    "aspect",
    "transit",
    "트랜짓",
    "retrograde",
    "역행",
    "natal",
    "orb",
    "zodiac",
];

/// Tokens that mark a section as placeholder output.
const PLACEHOLDER_TOKENS: &[&str] = &["todo", "placeholder", "lorem", "tbd", "xxx"];

/// Outcome of a consistency audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditResult {
    /// Quality score, 0..=100.
    pub score: u8,
    /// Description of every failed check.
    pub blockers: Vec<String>,
}

/// Everything the auditor grades against.
#[derive(Debug, Clone, Copy)]
pub struct AuditContext<'a> {
    /// Anchor-count policy the evidence was built under.
    pub mode: EvidenceMode,
    /// The raw calculation input.
    pub matrix_input: &'a MatrixInput,
    /// Narrative sections returned by the generator.
    pub report: &'a NarrativeReport,
    /// The evidence graph the narrative was grounded on.
    pub evidence: &'a EvidenceGraph,
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

fn distinct_word_count(text: &str) -> usize {
    let mut words: Vec<&str> = text
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|w| !w.is_empty())
        .collect();
    words.sort_unstable();
    words.dedup();
    words.len()
}

/// Grade a generated narrative against the evidence it was meant to be
/// grounded on. Total function: every input shape yields a result.
pub fn audit_cross_consistency(ctx: &AuditContext<'_>) -> AuditResult {
    let mut total: u32 = 0;
    let mut blockers: Vec<String> = Vec::new();

    // Raw-input categories the narrative depends on.
    if ctx.matrix_input.saju.sibsin_distribution.is_empty() {
        total += penalties::MISSING_SIBSIN as u32;
        blockers.push("sibsin distribution is empty in the raw input".to_string());
    }
    if ctx.matrix_input.astro.aspects.is_empty() {
        total += penalties::MISSING_ASPECTS as u32;
        blockers.push("no aspects in the raw input".to_string());
    }
    if ctx.matrix_input.saju.relations.is_empty() {
        total += penalties::MISSING_RELATIONS as u32;
        blockers.push("no pillar relations in the raw input".to_string());
    }

    // Evidence graph shape.
    if ctx.evidence.is_empty() && ctx.mode.anchor_count() > 0 {
        total += penalties::EMPTY_EVIDENCE as u32;
        blockers.push("evidence graph carries no anchors".to_string());
    }

    // Narrative section checks, each category capped.
    if ctx.report.is_empty() {
        total += penalties::EMPTY_REPORT as u32;
        blockers.push("narrative report has no sections".to_string());
    } else {
        let mut short_total: u32 = 0;
        let mut generic_total: u32 = 0;
        let mut uncrossed_total: u32 = 0;

        for (name, text) in &ctx.report.sections {
            let lowered = text.to_lowercase();

            if text.chars().count() < penalties::SHORT_SECTION_MIN_CHARS {
                short_total += penalties::SHORT_SECTION as u32;
                blockers.push(format!("section '{}' is too short", name));
            }

            let is_placeholder = contains_any(&lowered, PLACEHOLDER_TOKENS);
            if is_placeholder || distinct_word_count(text) < penalties::GENERIC_MIN_DISTINCT_WORDS {
                generic_total += penalties::GENERIC_SECTION as u32;
                blockers.push(format!("section '{}' reads as generic or placeholder text", name));
            }

            let cites_saju = contains_any(&lowered, SAJU_VOCAB);
            let cites_astro = contains_any(&lowered, ASTRO_VOCAB);
            if !(cites_saju && cites_astro) {
                uncrossed_total += penalties::UNCROSSED_SECTION as u32;
                blockers.push(format!(
                    "section '{}' does not reference both the saju and astrology vocabularies",
                    name
                ));
            }
        }

        total += short_total.min(penalties::SHORT_SECTION_CAP as u32);
        total += generic_total.min(penalties::GENERIC_SECTION_CAP as u32);
        total += uncrossed_total.min(penalties::UNCROSSED_SECTION_CAP as u32);
    }

    let score = (penalties::MAX_SCORE as u32).saturating_sub(total) as u8;
    debug!(score, blockers = blockers.len(), "cross-consistency audit complete");

    AuditResult { score, blockers }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::evidence::{build_graphrag_evidence, EvidenceOptions};
    use crate::matrix::calculate_destiny_matrix;
    use crate::types::astro::{Aspect, AspectType, House, Planet, TransitTag, ZodiacSign};
    use crate::types::saju::{FiveElement, Relation, RelationKind, SibsinKind, TwelveStage};

    fn dense_input() -> MatrixInput {
        let mut input = MatrixInput::default();
        input.saju.day_master_element = Some(FiveElement::Wood);
        input.saju.sibsin_distribution.insert(SibsinKind::Jeonggwan, 2);
        input.saju.sibsin_distribution.insert(SibsinKind::Siksin, 1);
        input.saju.twelve_stages.insert(TwelveStage::Jewang, 1);
        input
            .saju
            .relations
            .push(Relation::new(RelationKind::Samhap, vec![]));
        input.saju.geokguk = Some("jeonggwan-gyeok".into());
        input.saju.yongsin = Some(FiveElement::Fire);
        input.saju.current_daeun_element = Some(FiveElement::Fire);
        input
            .astro
            .planet_houses
            .insert(Planet::Sun, House::new(10).unwrap());
        input
            .astro
            .planet_signs
            .insert(Planet::Sun, ZodiacSign::Leo);
        input.astro.aspects.push(Aspect::new(
            Planet::Sun,
            Planet::Jupiter,
            AspectType::Trine,
            2.0,
            122.0,
        ));
        input.astro.active_transits.push(TransitTag::JupiterReturn);
        input
    }

    fn evidence_for(input: &MatrixInput) -> EvidenceGraph {
        let outcome = calculate_destiny_matrix(input, &EngineConfig::default()).unwrap();
        build_graphrag_evidence(input, &outcome, &EvidenceOptions::default()).unwrap()
    }

    fn well_crossed_section(topic: &str) -> String {
        format!(
            "The {topic} reading draws on the saju day master and the daeun luck cycle, \
             and checks them against the natal chart where the relevant planet sits in \
             its house with a tight aspect. Both systems point in the same direction for \
             this part of the year, so the guidance below follows their shared emphasis."
        )
    }

    fn dense_report() -> NarrativeReport {
        NarrativeReport::from_sections([
            ("overview", well_crossed_section("overview")),
            ("career", well_crossed_section("career")),
            ("love", well_crossed_section("love")),
            ("timing", well_crossed_section("timing")),
        ])
    }

    #[test]
    fn test_dense_input_well_crossed_report_passes() {
        let input = dense_input();
        let evidence = evidence_for(&input);
        let report = dense_report();
        let result = audit_cross_consistency(&AuditContext {
            mode: EvidenceOptions::default().mode,
            matrix_input: &input,
            report: &report,
            evidence: &evidence,
        });
        assert!(
            result.score >= 85,
            "dense, well-crossed audit must pass: {} ({:?})",
            result.score,
            result.blockers
        );
        assert!(result.blockers.is_empty());
    }

    #[test]
    fn test_sparse_input_thin_report_fails() {
        let input = MatrixInput::default();
        let evidence = evidence_for(&input);
        let report = NarrativeReport::from_sections([("overview", "Good luck this year.")]);
        let result = audit_cross_consistency(&AuditContext {
            mode: EvidenceOptions::default().mode,
            matrix_input: &input,
            report: &report,
            evidence: &evidence,
        });
        assert!(
            result.score < 60,
            "sparse, thin audit must fail: {}",
            result.score
        );
        assert!(!result.blockers.is_empty());
    }

    #[test]
    fn test_missing_sibsin_penalty_line() {
        let mut input = dense_input();
        input.saju.sibsin_distribution.clear();
        let evidence = evidence_for(&input);
        let report = dense_report();
        let result = audit_cross_consistency(&AuditContext {
            mode: EvidenceOptions::default().mode,
            matrix_input: &input,
            report: &report,
            evidence: &evidence,
        });
        assert_eq!(result.score, 100 - penalties::MISSING_SIBSIN);
        assert_eq!(result.blockers.len(), 1);
        assert!(result.blockers[0].contains("sibsin"));
    }

    #[test]
    fn test_missing_aspects_penalty_line() {
        let mut input = dense_input();
        input.astro.aspects.clear();
        let evidence = evidence_for(&input);
        let report = dense_report();
        let result = audit_cross_consistency(&AuditContext {
            mode: EvidenceOptions::default().mode,
            matrix_input: &input,
            report: &report,
            evidence: &evidence,
        });
        assert_eq!(result.score, 100 - penalties::MISSING_ASPECTS);
    }

    #[test]
    fn test_short_section_penalty_line() {
        let input = dense_input();
        let evidence = evidence_for(&input);
        let mut report = dense_report();
        report.sections.insert(
            "extra".into(),
            "Short but crossed: saju pillar meets natal aspect.".into(),
        );
        let result = audit_cross_consistency(&AuditContext {
            mode: EvidenceOptions::default().mode,
            matrix_input: &input,
            report: &report,
            evidence: &evidence,
        });
        assert_eq!(result.score, 100 - penalties::SHORT_SECTION);
        assert!(result.blockers.iter().any(|b| b.contains("too short")));
    }

    #[test]
    fn test_placeholder_section_flagged_generic() {
        let input = dense_input();
        let evidence = evidence_for(&input);
        let mut report = dense_report();
        report.sections.insert(
            "extra".into(),
            format!("{} TODO fill in the rest of this section later on.", well_crossed_section("extra")),
        );
        let result = audit_cross_consistency(&AuditContext {
            mode: EvidenceOptions::default().mode,
            matrix_input: &input,
            report: &report,
            evidence: &evidence,
        });
        assert_eq!(result.score, 100 - penalties::GENERIC_SECTION);
        assert!(result
            .blockers
            .iter()
            .any(|b| b.contains("generic or placeholder")));
    }

    #[test]
    fn test_uncrossed_section_penalty_line() {
        let input = dense_input();
        let evidence = evidence_for(&input);
        let mut report = dense_report();
        report.sections.insert(
            "extra".into(),
            "This section talks at respectable length about nothing in particular, with \
             plenty of distinct words to avoid the generic gate, yet it cites neither \
             divination system by name anywhere in its text."
                .into(),
        );
        let result = audit_cross_consistency(&AuditContext {
            mode: EvidenceOptions::default().mode,
            matrix_input: &input,
            report: &report,
            evidence: &evidence,
        });
        assert_eq!(result.score, 100 - penalties::UNCROSSED_SECTION);
        assert!(result
            .blockers
            .iter()
            .any(|b| b.contains("both the saju and astrology")));
    }

    #[test]
    fn test_short_section_penalties_capped() {
        let input = dense_input();
        let evidence = evidence_for(&input);
        // Ten short sections would be 100 points uncapped.
        let report = NarrativeReport::from_sections(
            (0..10).map(|i| (format!("s{}", i), "saju meets natal aspect here.".to_string())),
        );
        let result = audit_cross_consistency(&AuditContext {
            mode: EvidenceOptions::default().mode,
            matrix_input: &input,
            report: &report,
            evidence: &evidence,
        });
        // Every section is short and generic but still cross-referenced,
        // so only those two capped categories apply: 100 - 30 - 24.
        let expected = 100 - penalties::SHORT_SECTION_CAP - penalties::GENERIC_SECTION_CAP;
        assert_eq!(result.score, expected);
    }

    #[test]
    fn test_empty_report_penalty() {
        let input = dense_input();
        let evidence = evidence_for(&input);
        let report = NarrativeReport::default();
        let result = audit_cross_consistency(&AuditContext {
            mode: EvidenceOptions::default().mode,
            matrix_input: &input,
            report: &report,
            evidence: &evidence,
        });
        assert_eq!(result.score, 100 - penalties::EMPTY_REPORT);
    }

    #[test]
    fn test_fixed_zero_mode_tolerates_empty_evidence() {
        let input = dense_input();
        let report = dense_report();
        let empty = EvidenceGraph { anchors: vec![] };

        let expecting_anchors = audit_cross_consistency(&AuditContext {
            mode: EvidenceMode::Comprehensive,
            matrix_input: &input,
            report: &report,
            evidence: &empty,
        });
        assert_eq!(expecting_anchors.score, 100 - penalties::EMPTY_EVIDENCE);

        let explicit_zero = audit_cross_consistency(&AuditContext {
            mode: EvidenceMode::Fixed(0),
            matrix_input: &input,
            report: &report,
            evidence: &empty,
        });
        assert_eq!(explicit_zero.score, 100);
    }

    #[test]
    fn test_score_never_underflows() {
        // Worst case: everything missing and many bad sections.
        let input = MatrixInput::default();
        let empty = EvidenceGraph { anchors: vec![] };
        let report = NarrativeReport::from_sections(
            (0..20).map(|i| (format!("s{}", i), "todo".to_string())),
        );
        let result = audit_cross_consistency(&AuditContext {
            mode: EvidenceMode::Comprehensive,
            matrix_input: &input,
            report: &report,
            evidence: &empty,
        });
        // Saturates at zero rather than wrapping.
        assert!(result.score <= 100);
        assert!(!result.blockers.is_empty());
    }
}
