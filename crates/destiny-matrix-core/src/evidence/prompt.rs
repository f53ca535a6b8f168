//! Rendering the evidence graph into a generator prompt.
//!
//! The rendered block is the only thing the external narrative generator
//! sees from this core. It carries the grounding instruction, every anchor
//! with its three evidence lines, and the output-format instruction for
//! the configured backend. The renderer emits no placeholder tokens; tests
//! machine-check their absence.

use std::fmt::Write as _;

use crate::config::{Locale, NarrativeBackend};
use crate::types::evidence::EvidenceGraph;

use super::EvidenceOptions;

/// Render the evidence graph into an instruction-bearing prompt block.
pub fn format_graphrag_evidence_for_prompt(
    evidence: &EvidenceGraph,
    options: &EvidenceOptions,
) -> String {
    let mut out = String::new();

    match options.locale {
        Locale::En => {
            out.push_str(
                "You are writing a destiny reading that fuses a Saju (Four Pillars) chart \
                 with a Western natal chart.\n",
            );
            out.push_str(
                "Ground every statement in the evidence anchors below. Never invent chart \
                 facts, and name both systems when you draw a joint conclusion.\n\n",
            );
        }
        Locale::Ko => {
            out.push_str("사주(四柱)와 서양 점성술 차트를 융합한 운세 리딩을 작성합니다.\n");
            out.push_str(
                "모든 문장은 아래 근거 앵커에 기반해야 하며, 차트에 없는 사실을 만들어내지 \
                 마세요. 결론에는 두 체계를 함께 언급하세요.\n\n",
            );
        }
    }

    for anchor in &evidence.anchors {
        // Section heading carries the anchor id so the generator can cite it.
        let _ = writeln!(out, "## {} [{}]", anchor.section, anchor.id);
        let _ = writeln!(out, "- saju: {}", anchor.saju_evidence);
        let _ = writeln!(out, "- astrology: {}", anchor.astrology_evidence);
        let _ = writeln!(out, "- cross: {}", anchor.cross_conclusion);
        for set in &anchor.cross_evidence_sets {
            let domains = set
                .overlap_domains
                .iter()
                .map(|d| d.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            let domains = if domains.is_empty() {
                "none".to_string()
            } else {
                domains
            };
            let _ = writeln!(
                out,
                "- overlap[{}]: domains={} score={:.2} orb_fit={:.2}",
                set.id, domains, set.overlap_score, set.orb_fit_score
            );
        }
        out.push('\n');
    }

    match (options.backend, options.locale) {
        (NarrativeBackend::Sectioned, Locale::En) => out.push_str(
            "Write one section of flowing prose per anchor, titled by its section name.\n",
        ),
        (NarrativeBackend::Sectioned, Locale::Ko) => {
            out.push_str("앵커마다 해당 섹션 제목을 붙인 산문 단락을 하나씩 작성하세요.\n")
        }
        (NarrativeBackend::Json, Locale::En) => out.push_str(
            "Return a JSON object mapping each section name to its generated text.\n",
        ),
        (NarrativeBackend::Json, Locale::Ko) => {
            out.push_str("각 섹션 이름을 키로 하는 JSON 객체로 생성 결과를 반환하세요.\n")
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::evidence::build_graphrag_evidence;
    use crate::matrix::calculate_destiny_matrix;
    use crate::types::input::MatrixInput;
    use crate::types::saju::{FiveElement, SibsinKind};

    /// Tokens that must never leak into a generator prompt.
    const FORBIDDEN: &[&str] = &["TODO", "PLACEHOLDER", "Lorem", "lorem", "<section>", "FIXME"];

    fn graph_for(input: &MatrixInput) -> EvidenceGraph {
        let outcome = calculate_destiny_matrix(input, &EngineConfig::default()).unwrap();
        build_graphrag_evidence(input, &outcome, &EvidenceOptions::default()).unwrap()
    }

    #[test]
    fn test_prompt_contains_every_anchor() {
        let mut input = MatrixInput::default();
        input.saju.day_master_element = Some(FiveElement::Water);
        input.saju.sibsin_distribution.insert(SibsinKind::Siksin, 1);
        let graph = graph_for(&input);
        let prompt = format_graphrag_evidence_for_prompt(&graph, &EvidenceOptions::default());

        for anchor in &graph.anchors {
            assert!(prompt.contains(&anchor.id), "prompt must cite {}", anchor.id);
            assert!(prompt.contains(&anchor.saju_evidence));
            assert!(prompt.contains(&anchor.astrology_evidence));
        }
    }

    #[test]
    fn test_prompt_never_contains_placeholder_tokens() {
        // Even a fully empty input must render a clean prompt.
        let graph = graph_for(&MatrixInput::default());
        let mut options = EvidenceOptions::default();
        for locale in [Locale::Ko, Locale::En] {
            for backend in [NarrativeBackend::Sectioned, NarrativeBackend::Json] {
                options.locale = locale;
                options.backend = backend;
                let prompt = format_graphrag_evidence_for_prompt(&graph, &options);
                for token in FORBIDDEN {
                    assert!(
                        !prompt.contains(token),
                        "prompt must not contain {:?} ({:?}/{:?})",
                        token,
                        locale,
                        backend
                    );
                }
            }
        }
    }

    #[test]
    fn test_backend_changes_format_instruction() {
        let graph = graph_for(&MatrixInput::default());
        let mut options = EvidenceOptions::default();
        options.locale = Locale::En;

        options.backend = NarrativeBackend::Sectioned;
        let sectioned = format_graphrag_evidence_for_prompt(&graph, &options);
        options.backend = NarrativeBackend::Json;
        let json = format_graphrag_evidence_for_prompt(&graph, &options);

        assert_ne!(sectioned, json);
        assert!(json.contains("JSON object"));
        assert!(!sectioned.contains("JSON object"));
    }

    #[test]
    fn test_locale_switches_instruction_language() {
        let graph = graph_for(&MatrixInput::default());
        let mut options = EvidenceOptions::default();
        options.locale = Locale::Ko;
        let korean = format_graphrag_evidence_for_prompt(&graph, &options);
        options.locale = Locale::En;
        let english = format_graphrag_evidence_for_prompt(&graph, &options);

        assert!(korean.contains("사주"));
        assert!(english.contains("Four Pillars"));
    }

    #[test]
    fn test_prompt_deterministic() {
        let graph = graph_for(&MatrixInput::default());
        let a = format_graphrag_evidence_for_prompt(&graph, &EvidenceOptions::default());
        let b = format_graphrag_evidence_for_prompt(&graph, &EvidenceOptions::default());
        assert_eq!(a, b);
    }
}
