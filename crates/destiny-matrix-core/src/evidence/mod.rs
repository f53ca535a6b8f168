//! GraphRAG evidence construction and prompt rendering.
//!
//! The builder turns a calculated matrix plus its raw input into a fixed
//! set of pre-validated grounding anchors; the formatter renders those
//! anchors into the instruction-bearing text block consumed by the
//! external narrative generator.

mod builder;
mod prompt;

use serde::{Deserialize, Serialize};

use crate::config::constants::evidence as limits;
use crate::config::{Locale, NarrativeBackend};

pub use builder::build_graphrag_evidence;
pub use prompt::format_graphrag_evidence_for_prompt;

/// How many anchors to build.
///
/// Only the comprehensive mode has a reference-evidenced count (always
/// exactly ten). Every other count is an explicit caller decision rather
/// than an implicit default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceMode {
    /// Exactly ten anchors across the fixed section set, independent of
    /// input richness.
    Comprehensive,
    /// An explicit anchor count chosen by the caller.
    Fixed(usize),
}

impl EvidenceMode {
    /// Number of anchors this mode produces.
    #[inline]
    pub fn anchor_count(self) -> usize {
        match self {
            Self::Comprehensive => limits::COMPREHENSIVE_ANCHOR_COUNT,
            Self::Fixed(count) => count,
        }
    }
}

impl Default for EvidenceMode {
    fn default() -> Self {
        Self::Comprehensive
    }
}

/// Caller-injected options for evidence construction and rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EvidenceOptions {
    /// Anchor-count policy.
    pub mode: EvidenceMode,
    /// Language of rendered text.
    pub locale: Locale,
    /// Narrative backend the prompt targets.
    pub backend: NarrativeBackend,
}
