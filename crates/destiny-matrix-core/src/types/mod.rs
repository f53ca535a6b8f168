//! Core domain types for the destiny matrix engine.
//!
//! Everything here is a plain immutable data structure: created fresh per
//! request, consumed synchronously, and discarded. Maps are `BTreeMap`s
//! keyed by fixed enums so the domain set is exhaustively checked at
//! compile time and iteration order is deterministic.

pub mod astro;
pub mod cell;
pub mod domain;
pub mod evidence;
pub mod input;
pub mod report;
pub mod saju;
pub mod summary;

pub use astro::{
    Aspect, AspectType, Asteroid, AstroInput, ExtraPoint, House, Planet, TransitTag,
    WesternElement, ZodiacSign,
};
pub use cell::{Interaction, InteractionLevel, MatrixCell};
pub use domain::{DomainScore, LifeDomain};
pub use evidence::{CrossEvidenceSet, EvidenceAnchor, EvidenceGraph};
pub use input::MatrixInput;
pub use report::NarrativeReport;
pub use saju::{
    EarthlyBranch, FiveElement, Ganzhi, HeavenlyStem, Relation, RelationKind, SajuInput,
    SibsinKind, TwelveStage,
};
pub use summary::{Grade, InsightPoint, MatrixOutcome, MatrixSummary};
