//! Action checklist builder: transit-driven daily guidance.
//!
//! Turns a calculated summary plus the day's active transits into a
//! bounded checklist (8 to 10 items, each with a completion condition),
//! a primary risk read from a fixed transit table, and a primary intent
//! read from the strongest scored domain.
//!
//! Also hosts the small utility pair the calendar layer uses to score the
//! five area categories for a given day pillar.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::constants::checklist as consts;
use crate::config::Locale;
use crate::types::astro::TransitTag;
use crate::types::domain::LifeDomain;
use crate::types::saju::{FiveElement, Ganzhi};
use crate::types::summary::MatrixSummary;

/// Severity of the day's primary risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Mid,
    High,
}

/// One checklist entry with its completion condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistItem {
    /// What to do.
    pub text: String,
    /// When the item counts as done.
    pub done_when: String,
    /// Domain the item serves, when domain-scoped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<LifeDomain>,
}

/// Guidance for one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    /// The day this plan covers.
    pub date: NaiveDate,
    /// 8 to 10 checklist items.
    pub items: Vec<ChecklistItem>,
    /// Primary risk keyword from the transit table.
    pub risk_primary: String,
    /// Severity of the primary risk.
    pub risk_level: RiskLevel,
    /// Things to avoid under the day's transits.
    pub avoid: Vec<String>,
    /// Intent keyword from the strongest scored domain.
    pub intent_primary: String,
}

/// Input to the checklist builder.
#[derive(Debug, Clone)]
pub struct ChecklistRequest<'a> {
    /// The calculated matrix summary.
    pub summary: &'a MatrixSummary,
    /// Output language.
    pub locale: Locale,
    /// Today's date.
    pub today: NaiveDate,
    /// Transits active today.
    pub today_transits: Vec<TransitTag>,
    /// Tomorrow's date, when a two-day plan is requested.
    pub tomorrow: Option<NaiveDate>,
    /// Transits active tomorrow.
    pub tomorrow_transits: Option<Vec<TransitTag>>,
}

/// The built checklist: today always, tomorrow when requested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionChecklist {
    pub today: DayPlan,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tomorrow: Option<DayPlan>,
}

/// Fixed transit-to-risk table, consulted in order: the first active
/// transit present wins, so mercury retrograde always forces the speech
/// risk when it is active.
const RISK_TABLE: &[(TransitTag, &str, RiskLevel)] = &[
    (TransitTag::MercuryRetrograde, "speech", RiskLevel::Mid),
    (TransitTag::SaturnReturn, "structure", RiskLevel::High),
    (TransitTag::MarsRetrograde, "conflict", RiskLevel::Mid),
    (TransitTag::VenusRetrograde, "relationship", RiskLevel::Mid),
    (TransitTag::SolarEclipse, "timing", RiskLevel::Mid),
    (TransitTag::LunarEclipse, "timing", RiskLevel::Mid),
];

fn localized(locale: Locale, en: &str, ko: &str) -> String {
    match locale {
        Locale::En => en.to_string(),
        Locale::Ko => ko.to_string(),
    }
}

fn avoid_guidance(locale: Locale, risk_primary: &str) -> Vec<String> {
    match risk_primary {
        "speech" => vec![
            localized(
                locale,
                "Avoid finalizing contracts or commitments today",
                "오늘은 계약이나 약속을 확정하지 마세요",
            ),
            localized(
                locale,
                "Re-read every message before sending it",
                "메시지를 보내기 전에 다시 읽어보세요",
            ),
        ],
        "structure" => vec![localized(
            locale,
            "Avoid taking on new long-term obligations on impulse",
            "충동적으로 새로운 장기 책임을 떠안지 마세요",
        )],
        "conflict" => vec![localized(
            locale,
            "Avoid forcing confrontations that can wait",
            "미룰 수 있는 대립은 오늘 강행하지 마세요",
        )],
        "relationship" => vec![localized(
            locale,
            "Avoid reopening settled relationship questions on impulse",
            "정리된 관계 문제를 충동적으로 다시 꺼내지 마세요",
        )],
        "timing" => vec![localized(
            locale,
            "Avoid launching major plans inside the eclipse window",
            "일식/월식 구간에는 큰 계획의 시작을 피하세요",
        )],
        _ => Vec::new(),
    }
}

/// Primary intent: the strongest scored domain's keyword.
fn intent_primary(summary: &MatrixSummary) -> String {
    let mut best: Option<(&LifeDomain, f32)> = None;
    for (domain, score) in summary.domain_scores.iter().filter(|(_, s)| s.has_data) {
        // Strictly greater keeps the earlier (higher-priority) domain on ties.
        if best.map_or(true, |(_, s)| score.final_score_adjusted > s) {
            best = Some((domain, score.final_score_adjusted));
        }
    }
    best.map(|(domain, _)| domain.intent().to_string())
        .unwrap_or_else(|| "balance".to_string())
}

fn base_items(locale: Locale) -> Vec<ChecklistItem> {
    vec![
        ChecklistItem {
            text: localized(
                locale,
                "Write down the single priority that defines today",
                "오늘을 결정짓는 단 하나의 우선순위를 적어보세요",
            ),
            done_when: localized(locale, "One priority is written down", "우선순위 1개 기록 완료"),
            domain: None,
        },
        ChecklistItem {
            text: localized(
                locale,
                "Review yesterday's unfinished item and close or drop it",
                "어제 끝내지 못한 일을 확인하고 마무리하거나 정리하세요",
            ),
            done_when: localized(locale, "The item is closed or consciously dropped", "미결 항목 정리 완료"),
            domain: None,
        },
        ChecklistItem {
            text: localized(
                locale,
                "Take a ten minute walk away from screens",
                "화면에서 벗어나 10분간 산책하세요",
            ),
            done_when: localized(locale, "Ten minutes walked", "10분 산책 완료"),
            domain: Some(LifeDomain::Health),
        },
        ChecklistItem {
            text: localized(
                locale,
                "Send one message you have been postponing",
                "미뤄온 연락 하나를 오늘 보내세요",
            ),
            done_when: localized(locale, "The message is sent", "연락 1건 발송 완료"),
            domain: Some(LifeDomain::Love),
        },
    ]
}

fn pad_items(locale: Locale) -> Vec<ChecklistItem> {
    vec![
        ChecklistItem {
            text: localized(
                locale,
                "Note one small win before going to bed",
                "잠들기 전에 오늘의 작은 성취 하나를 기록하세요",
            ),
            done_when: localized(locale, "One win is noted", "성취 1개 기록 완료"),
            domain: None,
        },
        ChecklistItem {
            text: localized(
                locale,
                "Clear one surface of your workspace",
                "작업 공간의 한 구역을 정리하세요",
            ),
            done_when: localized(locale, "The surface is clear", "정리 완료"),
            domain: Some(LifeDomain::Career),
        },
        ChecklistItem {
            text: localized(
                locale,
                "Check your spending from the last three days",
                "최근 3일간의 지출을 확인하세요",
            ),
            done_when: localized(locale, "Spending is reviewed", "지출 확인 완료"),
            domain: Some(LifeDomain::Money),
        },
        ChecklistItem {
            text: localized(
                locale,
                "Set a hard stop time for tonight and keep it",
                "오늘 밤 마감 시각을 정하고 지키세요",
            ),
            done_when: localized(locale, "Work stops at the set time", "정한 시각에 마무리 완료"),
            domain: Some(LifeDomain::Health),
        },
    ]
}

fn domain_item(locale: Locale, domain: LifeDomain) -> ChecklistItem {
    let (en_text, ko_text) = match domain {
        LifeDomain::Career => (
            "Spend one focused hour on the task that moves your work forward",
            "일을 진전시키는 과제에 집중한 1시간을 쓰세요",
        ),
        LifeDomain::Love => (
            "Plan a small gesture for someone close to you",
            "가까운 사람을 위한 작은 표현을 준비하세요",
        ),
        LifeDomain::Money => (
            "Move a fixed amount into savings before anything else",
            "다른 지출보다 먼저 일정 금액을 저축하세요",
        ),
        LifeDomain::Health => (
            "Eat one meal slowly and away from your desk",
            "한 끼는 책상에서 벗어나 천천히 드세요",
        ),
        LifeDomain::Move => (
            "Research one concrete step toward the change you are weighing",
            "고민 중인 변화를 위한 구체적인 한 걸음을 조사하세요",
        ),
    };
    ChecklistItem {
        text: localized(locale, en_text, ko_text),
        done_when: localized(locale, "The hour or step is completed", "해당 항목 수행 완료"),
        domain: Some(domain),
    }
}

fn transit_item(locale: Locale, tag: TransitTag) -> Option<ChecklistItem> {
    let (en_text, ko_text, domain) = match tag {
        TransitTag::MercuryRetrograde => (
            "Back up your files and double-check appointments",
            "파일을 백업하고 일정을 다시 확인하세요",
            None,
        ),
        TransitTag::JupiterReturn => (
            "Write down the opportunity you want this cycle to open",
            "이번 주기에 열리길 바라는 기회를 적어보세요",
            Some(LifeDomain::Move),
        ),
        TransitTag::SaturnReturn => (
            "List the one structure in your life that needs rebuilding",
            "재정비가 필요한 삶의 구조 하나를 정리하세요",
            Some(LifeDomain::Career),
        ),
        TransitTag::FullMoon => (
            "Close out one lingering task before the day ends",
            "오늘이 가기 전에 미뤄둔 일 하나를 끝내세요",
            None,
        ),
        _ => return None,
    };
    Some(ChecklistItem {
        text: localized(locale, en_text, ko_text),
        done_when: localized(locale, "The step is done once today", "오늘 1회 수행 완료"),
        domain,
    })
}

fn build_day_plan(
    summary: &MatrixSummary,
    locale: Locale,
    date: NaiveDate,
    transits: &[TransitTag],
) -> DayPlan {
    let (risk_primary, risk_level) = RISK_TABLE
        .iter()
        .find(|(tag, _, _)| transits.contains(tag))
        .map(|&(_, risk, level)| (risk.to_string(), level))
        .unwrap_or_else(|| ("none".to_string(), RiskLevel::Low));
    let avoid = avoid_guidance(locale, &risk_primary);
    let intent = intent_primary(summary);

    let mut items = base_items(locale);

    // Strongest domains first, fixed priority on ties via BTreeMap order.
    let mut ranked: Vec<(&LifeDomain, f32)> = summary
        .domain_scores
        .iter()
        .filter(|(_, s)| s.has_data)
        .map(|(d, s)| (d, s.final_score_adjusted))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    for (domain, _) in ranked.into_iter().take(3) {
        items.push(domain_item(locale, *domain));
    }

    for &tag in transits {
        if items.len() >= consts::MAX_ITEMS {
            break;
        }
        if let Some(item) = transit_item(locale, tag) {
            if !items.contains(&item) {
                items.push(item);
            }
        }
    }

    for pad in pad_items(locale) {
        if items.len() >= consts::MIN_ITEMS {
            break;
        }
        if !items.contains(&pad) {
            items.push(pad);
        }
    }
    items.truncate(consts::MAX_ITEMS);

    debug!(%date, items = items.len(), risk = %risk_primary, "day plan built");

    DayPlan {
        date,
        items,
        risk_primary,
        risk_level,
        avoid,
        intent_primary: intent,
    }
}

/// Build the premium action checklist for one or two days.
pub fn build_premium_action_checklist(request: &ChecklistRequest<'_>) -> ActionChecklist {
    let today = build_day_plan(
        request.summary,
        request.locale,
        request.today,
        &request.today_transits,
    );
    let tomorrow = request.tomorrow.map(|date| {
        let transits = request.tomorrow_transits.as_deref().unwrap_or(&[]);
        build_day_plan(request.summary, request.locale, date, transits)
    });
    ActionChecklist { today, tomorrow }
}

// ---------------------------------------------------------------------------
// Calendar-layer area utilities
// ---------------------------------------------------------------------------

/// The five area categories the calendar layer scores per day.
///
/// Variant order is the fixed tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AreaCategory {
    Career,
    Wealth,
    Love,
    Health,
    Move,
}

impl AreaCategory {
    /// All categories in tie-break order.
    #[inline]
    pub fn all() -> [AreaCategory; 5] {
        [
            Self::Career,
            Self::Wealth,
            Self::Love,
            Self::Health,
            Self::Move,
        ]
    }
}

impl fmt::Display for AreaCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Career => "career",
            Self::Wealth => "wealth",
            Self::Love => "love",
            Self::Health => "health",
            Self::Move => "move",
        };
        write!(f, "{}", s)
    }
}

/// Areas each element favors, with the bonus it grants.
fn element_area_bonus(element: FiveElement) -> [(AreaCategory, i16); 2] {
    match element {
        FiveElement::Wood => [(AreaCategory::Career, 6), (AreaCategory::Health, 2)],
        FiveElement::Fire => [(AreaCategory::Love, 6), (AreaCategory::Career, 2)],
        FiveElement::Earth => [(AreaCategory::Health, 6), (AreaCategory::Wealth, 2)],
        FiveElement::Metal => [(AreaCategory::Wealth, 6), (AreaCategory::Career, 2)],
        FiveElement::Water => [(AreaCategory::Move, 6), (AreaCategory::Love, 2)],
    }
}

fn sanitize(score: f32) -> f32 {
    if score.is_finite() {
        score.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// Blend the day's cycle scores into per-area scores, colored by the day
/// pillar's elements. Output values are always within 0..=100 regardless
/// of extreme intermediate inputs.
pub fn calculate_area_scores_for_categories(
    ganzhi: &Ganzhi,
    seun_score: f32,
    other_score: f32,
) -> BTreeMap<AreaCategory, u8> {
    let base = consts::SEUN_WEIGHT * sanitize(seun_score) + consts::OTHER_WEIGHT * sanitize(other_score);

    let mut scores: BTreeMap<AreaCategory, i16> = AreaCategory::all()
        .into_iter()
        .map(|area| (area, base.round() as i16))
        .collect();

    // Stem bonus in full, branch bonus halved.
    for (area, bonus) in element_area_bonus(ganzhi.stem.element()) {
        *scores.entry(area).or_insert(0) += bonus;
    }
    for (area, bonus) in element_area_bonus(ganzhi.branch.element()) {
        *scores.entry(area).or_insert(0) += bonus / 2;
    }

    scores
        .into_iter()
        .map(|(area, value)| (area, value.clamp(0, 100) as u8))
        .collect()
}

/// Best area at or above `min_score`, or `None` when nothing clears it.
///
/// Ties break in the fixed order career > wealth > love > health > move.
pub fn get_best_area_category(
    scores: &BTreeMap<AreaCategory, u8>,
    min_score: u8,
) -> Option<AreaCategory> {
    let mut best: Option<(AreaCategory, u8)> = None;
    for area in AreaCategory::all() {
        if let Some(&score) = scores.get(&area) {
            // Strictly greater keeps the earlier area on ties.
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((area, score));
            }
        }
    }
    best.filter(|&(_, score)| score >= min_score)
        .map(|(area, _)| area)
}
