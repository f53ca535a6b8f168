//! Saju (Four Pillars) input primitives.
//!
//! Typed counterparts of the symbolic signals produced by the upstream
//! pillar calculator: the five-element cycle, heavenly stems and earthly
//! branches, the ten gods (sibsin), the twelve life stages, and pillar
//! relations. Every field of [`SajuInput`] is optional or possibly empty;
//! absence means "no signal", never a zero or negative signal.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the five elements (오행) of the East Asian cycle.
///
/// # Example
/// ```rust
/// use destiny_matrix_core::types::saju::FiveElement;
///
/// assert_eq!(FiveElement::Wood.generates(), FiveElement::Fire);
/// assert_eq!(FiveElement::Wood.controls(), FiveElement::Earth);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FiveElement {
    Wood,
    Fire,
    Earth,
    Metal,
    Water,
}

impl FiveElement {
    /// All five elements in cycle order.
    #[inline]
    pub fn all() -> [FiveElement; 5] {
        [
            Self::Wood,
            Self::Fire,
            Self::Earth,
            Self::Metal,
            Self::Water,
        ]
    }

    /// The element this one generates (상생 cycle).
    #[inline]
    pub fn generates(self) -> FiveElement {
        match self {
            Self::Wood => Self::Fire,
            Self::Fire => Self::Earth,
            Self::Earth => Self::Metal,
            Self::Metal => Self::Water,
            Self::Water => Self::Wood,
        }
    }

    /// The element this one controls (상극 cycle).
    #[inline]
    pub fn controls(self) -> FiveElement {
        match self {
            Self::Wood => Self::Earth,
            Self::Earth => Self::Water,
            Self::Water => Self::Fire,
            Self::Fire => Self::Metal,
            Self::Metal => Self::Wood,
        }
    }

    /// Korean single-character label.
    #[inline]
    pub fn korean(self) -> &'static str {
        match self {
            Self::Wood => "목",
            Self::Fire => "화",
            Self::Earth => "토",
            Self::Metal => "금",
            Self::Water => "수",
        }
    }
}

impl fmt::Display for FiveElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Wood => "wood",
            Self::Fire => "fire",
            Self::Earth => "earth",
            Self::Metal => "metal",
            Self::Water => "water",
        };
        write!(f, "{}", s)
    }
}

/// One of the ten heavenly stems (천간).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeavenlyStem {
    Gap,
    Eul,
    Byeong,
    Jeong,
    Mu,
    Gi,
    Gyeong,
    Sin,
    Im,
    Gye,
}

impl HeavenlyStem {
    /// The element this stem belongs to.
    #[inline]
    pub fn element(self) -> FiveElement {
        match self {
            Self::Gap | Self::Eul => FiveElement::Wood,
            Self::Byeong | Self::Jeong => FiveElement::Fire,
            Self::Mu | Self::Gi => FiveElement::Earth,
            Self::Gyeong | Self::Sin => FiveElement::Metal,
            Self::Im | Self::Gye => FiveElement::Water,
        }
    }

    /// Whether this stem is yang (the odd positions of the cycle).
    #[inline]
    pub fn is_yang(self) -> bool {
        matches!(
            self,
            Self::Gap | Self::Byeong | Self::Mu | Self::Gyeong | Self::Im
        )
    }
}

/// One of the twelve earthly branches (지지).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EarthlyBranch {
    Ja,
    Chuk,
    In,
    Myo,
    Jin,
    Sa,
    O,
    Mi,
    Sin,
    Yu,
    Sul,
    Hae,
}

impl EarthlyBranch {
    /// The element this branch belongs to.
    #[inline]
    pub fn element(self) -> FiveElement {
        match self {
            Self::In | Self::Myo => FiveElement::Wood,
            Self::Sa | Self::O => FiveElement::Fire,
            Self::Chuk | Self::Jin | Self::Mi | Self::Sul => FiveElement::Earth,
            Self::Sin | Self::Yu => FiveElement::Metal,
            Self::Ja | Self::Hae => FiveElement::Water,
        }
    }
}

/// A stem/branch pair (간지), e.g. the day pillar of a calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ganzhi {
    /// Heavenly stem of the pair.
    pub stem: HeavenlyStem,
    /// Earthly branch of the pair.
    pub branch: EarthlyBranch,
}

impl Ganzhi {
    /// Create a new pair.
    #[inline]
    pub fn new(stem: HeavenlyStem, branch: EarthlyBranch) -> Self {
        Self { stem, branch }
    }
}

/// The ten gods (십신): relational classification of stems against the
/// day master.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SibsinKind {
    /// 비견 - peer of the same polarity.
    Bigyeon,
    /// 겁재 - peer of the opposite polarity.
    Geopjae,
    /// 식신 - output star, nourishment and talent.
    Siksin,
    /// 상관 - hurting officer, unconventional expression.
    Sanggwan,
    /// 편재 - irregular wealth.
    Pyeonjae,
    /// 정재 - proper wealth.
    Jeongjae,
    /// 편관 - irregular officer, pressure and drive.
    Pyeongwan,
    /// 정관 - proper officer, order and position.
    Jeonggwan,
    /// 편인 - irregular seal, unconventional learning.
    Pyeonin,
    /// 정인 - proper seal, support and protection.
    Jeongin,
}

impl SibsinKind {
    /// All ten gods in canonical order.
    pub fn all() -> [SibsinKind; 10] {
        [
            Self::Bigyeon,
            Self::Geopjae,
            Self::Siksin,
            Self::Sanggwan,
            Self::Pyeonjae,
            Self::Jeongjae,
            Self::Pyeongwan,
            Self::Jeonggwan,
            Self::Pyeonin,
            Self::Jeongin,
        ]
    }

    /// Korean label.
    pub fn korean(self) -> &'static str {
        match self {
            Self::Bigyeon => "비견",
            Self::Geopjae => "겁재",
            Self::Siksin => "식신",
            Self::Sanggwan => "상관",
            Self::Pyeonjae => "편재",
            Self::Jeongjae => "정재",
            Self::Pyeongwan => "편관",
            Self::Jeonggwan => "정관",
            Self::Pyeonin => "편인",
            Self::Jeongin => "정인",
        }
    }
}

impl fmt::Display for SibsinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Bigyeon => "bigyeon",
            Self::Geopjae => "geopjae",
            Self::Siksin => "siksin",
            Self::Sanggwan => "sanggwan",
            Self::Pyeonjae => "pyeonjae",
            Self::Jeongjae => "jeongjae",
            Self::Pyeongwan => "pyeongwan",
            Self::Jeonggwan => "jeonggwan",
            Self::Pyeonin => "pyeonin",
            Self::Jeongin => "jeongin",
        };
        write!(f, "{}", s)
    }
}

/// The twelve life stages (십이운성) applied to each branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TwelveStage {
    Jangsaeng,
    Mokyok,
    Gwandae,
    Geonrok,
    Jewang,
    Soe,
    Byeong,
    Sa,
    Myo,
    Jeol,
    Tae,
    Yang,
}

impl TwelveStage {
    /// All twelve stages in cycle order.
    pub fn all() -> [TwelveStage; 12] {
        [
            Self::Jangsaeng,
            Self::Mokyok,
            Self::Gwandae,
            Self::Geonrok,
            Self::Jewang,
            Self::Soe,
            Self::Byeong,
            Self::Sa,
            Self::Myo,
            Self::Jeol,
            Self::Tae,
            Self::Yang,
        ]
    }
}

impl fmt::Display for TwelveStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Jangsaeng => "jangsaeng",
            Self::Mokyok => "mokyok",
            Self::Gwandae => "gwandae",
            Self::Geonrok => "geonrok",
            Self::Jewang => "jewang",
            Self::Soe => "soe",
            Self::Byeong => "byeong",
            Self::Sa => "sa",
            Self::Myo => "myo",
            Self::Jeol => "jeol",
            Self::Tae => "tae",
            Self::Yang => "yang",
        };
        write!(f, "{}", s)
    }
}

/// Kind of relation between pillars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    /// 합 - harmonious combination.
    Hap,
    /// 충 - clash.
    Chung,
    /// 형 - punishment.
    Hyeong,
    /// 파 - break.
    Pa,
    /// 해 - harm.
    Hae,
    /// 삼합 - three-branch combination.
    Samhap,
    /// 육합 - six-pair combination.
    Yukhap,
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Hap => "hap",
            Self::Chung => "chung",
            Self::Hyeong => "hyeong",
            Self::Pa => "pa",
            Self::Hae => "hae",
            Self::Samhap => "samhap",
            Self::Yukhap => "yukhap",
        };
        write!(f, "{}", s)
    }
}

/// A relation detected between pillars of the chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    /// Kind of relation.
    pub kind: RelationKind,
    /// Branches participating in the relation. May be empty when the
    /// upstream calculator reports only the kind.
    #[serde(default)]
    pub branches: Vec<EarthlyBranch>,
    /// Optional upstream annotation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Relation {
    /// Create a relation with participating branches.
    pub fn new(kind: RelationKind, branches: Vec<EarthlyBranch>) -> Self {
        Self {
            kind,
            branches,
            note: None,
        }
    }
}

/// The Saju half of the matrix calculation input.
///
/// All fields are optional or possibly empty; the engine treats absence as
/// "no signal".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SajuInput {
    /// Element of the day master (day stem).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_master_element: Option<FiveElement>,

    /// Elements of the four pillars, at most four entries.
    #[serde(default)]
    pub pillar_elements: Vec<FiveElement>,

    /// Count of each of the ten gods appearing in the chart.
    #[serde(default)]
    pub sibsin_distribution: BTreeMap<SibsinKind, u8>,

    /// Count of each twelve-stage occurrence across the pillars.
    #[serde(default)]
    pub twelve_stages: BTreeMap<TwelveStage, u8>,

    /// Relations detected between pillars.
    #[serde(default)]
    pub relations: Vec<Relation>,

    /// Structural pattern classification of the chart.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geokguk: Option<String>,

    /// Element judged most beneficial to the chart.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yongsin: Option<FiveElement>,

    /// Element of the decade luck cycle currently active.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_daeun_element: Option<FiveElement>,

    /// Element of the year luck cycle currently active.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_saeun_element: Option<FiveElement>,

    /// Named shinsal (神煞) present in the chart, as reported upstream.
    #[serde(default)]
    pub shinsal_list: Vec<String>,
}

impl SajuInput {
    /// Whether no field carries any signal.
    pub fn is_empty(&self) -> bool {
        self.day_master_element.is_none()
            && self.pillar_elements.is_empty()
            && self.sibsin_distribution.is_empty()
            && self.twelve_stages.is_empty()
            && self.relations.is_empty()
            && self.geokguk.is_none()
            && self.yongsin.is_none()
            && self.current_daeun_element.is_none()
            && self.current_saeun_element.is_none()
            && self.shinsal_list.is_empty()
    }
}
