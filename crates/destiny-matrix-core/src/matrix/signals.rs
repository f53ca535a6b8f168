//! Domain-affinity tables and driver-signal extraction.
//!
//! Each raw symbolic entry (a sibsin count, a twelve-stage occurrence, a
//! pillar relation, a planet placement, an aspect) maps through a fixed
//! affinity table into zero or more weighted [`DriverSignal`]s per life
//! domain. The tables are static: the same input always yields the same
//! signals in the same order.

use crate::config::constants::{evidence, scoring};
use crate::types::astro::{Aspect, Asteroid, AstroInput, ExtraPoint, Planet};
use crate::types::domain::LifeDomain;
use crate::types::saju::{RelationKind, SajuInput, SibsinKind, TwelveStage};

/// One weighted signal scoring into a single domain.
#[derive(Debug, Clone, PartialEq)]
pub struct DriverSignal {
    /// Human-readable label citing the source fact.
    pub label: String,
    /// Domain this signal scores into.
    pub domain: LifeDomain,
    /// Positive signal weight.
    pub weight: f32,
    /// Polarity in [-1, 1]: positive pushes the domain up.
    pub polarity: f32,
    /// Every domain the source fact touches (for cross-evidence overlap).
    pub domain_tags: Vec<LifeDomain>,
}

type Affinity = (LifeDomain, f32, f32);

/// Domains each of the ten gods speaks to.
fn sibsin_affinities(kind: SibsinKind) -> &'static [Affinity] {
    use LifeDomain::*;
    match kind {
        // Peers: independence and rivalry. Movement up, shared wealth down.
        SibsinKind::Bigyeon => &[(Move, 0.5, 1.0), (Money, 0.4, -0.8)],
        SibsinKind::Geopjae => &[(Money, 0.6, -1.0), (Career, 0.3, 0.6)],
        // Output stars: talent and nourishment.
        SibsinKind::Siksin => &[(Health, 0.5, 1.0), (Career, 0.4, 0.8)],
        SibsinKind::Sanggwan => &[(Career, 0.5, -0.8), (Love, 0.4, -0.7)],
        // Wealth stars.
        SibsinKind::Pyeonjae => &[(Money, 0.7, 1.0), (Move, 0.3, 0.7)],
        SibsinKind::Jeongjae => &[(Money, 0.7, 1.0), (Love, 0.3, 0.8)],
        // Officer stars: position and pressure.
        SibsinKind::Pyeongwan => &[(Career, 0.6, -0.6), (Health, 0.4, -0.7)],
        SibsinKind::Jeonggwan => &[(Career, 0.8, 1.0), (Love, 0.3, 0.7)],
        // Seal stars: learning and protection.
        SibsinKind::Pyeonin => &[(Health, 0.5, -0.5), (Career, 0.3, 0.6)],
        SibsinKind::Jeongin => &[(Health, 0.6, 1.0), (Career, 0.4, 0.7)],
    }
}

/// Domains each twelve-stage occurrence speaks to.
fn stage_affinities(stage: TwelveStage) -> &'static [Affinity] {
    use LifeDomain::*;
    match stage {
        TwelveStage::Jangsaeng => &[(Health, 0.6, 1.0), (Career, 0.3, 0.7)],
        TwelveStage::Mokyok => &[(Love, 0.4, 0.8), (Health, 0.2, -0.5)],
        TwelveStage::Gwandae => &[(Career, 0.5, 1.0)],
        TwelveStage::Geonrok => &[(Career, 0.6, 1.0), (Money, 0.4, 0.9)],
        TwelveStage::Jewang => &[(Career, 0.7, 1.0), (Health, 0.3, 0.8)],
        TwelveStage::Soe => &[(Health, 0.4, -0.7)],
        TwelveStage::Byeong => &[(Health, 0.6, -0.9)],
        TwelveStage::Sa => &[(Health, 0.7, -1.0), (Move, 0.2, -0.5)],
        TwelveStage::Myo => &[(Money, 0.3, 0.6), (Health, 0.3, -0.6)],
        TwelveStage::Jeol => &[(Move, 0.5, 0.8), (Love, 0.3, -0.6)],
        TwelveStage::Tae => &[(Move, 0.4, 0.7), (Health, 0.2, 0.5)],
        TwelveStage::Yang => &[(Health, 0.4, 0.8)],
    }
}

/// Domains each relation kind speaks to.
fn relation_affinities(kind: RelationKind) -> &'static [Affinity] {
    use LifeDomain::*;
    match kind {
        RelationKind::Hap => &[(Love, 0.6, 1.0)],
        RelationKind::Yukhap => &[(Love, 0.5, 0.9)],
        RelationKind::Samhap => &[(Career, 0.4, 0.8), (Love, 0.4, 0.8)],
        RelationKind::Chung => &[(Move, 0.6, 0.8), (Love, 0.4, -0.8)],
        RelationKind::Hyeong => &[(Health, 0.5, -0.9), (Career, 0.3, -0.6)],
        RelationKind::Pa => &[(Money, 0.4, -0.7)],
        RelationKind::Hae => &[(Love, 0.4, -0.7), (Health, 0.3, -0.5)],
    }
}

/// Domains each house emphasizes, with house weight.
fn house_affinities(index: u8) -> &'static [(LifeDomain, f32)] {
    use LifeDomain::*;
    match index {
        1 => &[(Health, 0.4), (Career, 0.2)],
        2 => &[(Money, 0.7)],
        3 => &[(Move, 0.4)],
        4 => &[(Move, 0.5)],
        5 => &[(Love, 0.5)],
        6 => &[(Health, 0.7), (Career, 0.3)],
        7 => &[(Love, 0.7)],
        8 => &[(Money, 0.5)],
        9 => &[(Move, 0.6)],
        10 => &[(Career, 0.8)],
        11 => &[(Career, 0.4), (Love, 0.3)],
        12 => &[(Health, 0.4)],
        _ => &[],
    }
}

/// Benefic/malefic lean of each planet, in [-1, 1].
fn planet_nature(planet: Planet) -> f32 {
    match planet {
        Planet::Sun => 0.5,
        Planet::Moon => 0.3,
        Planet::Mercury => 0.2,
        Planet::Venus => 0.8,
        Planet::Mars => -0.5,
        Planet::Jupiter => 0.9,
        Planet::Saturn => -0.7,
        Planet::Uranus => -0.2,
        Planet::Neptune => -0.1,
        Planet::Pluto => -0.4,
    }
}

/// Relative weight of each planet's testimony.
fn planet_weight(planet: Planet) -> f32 {
    match planet {
        Planet::Sun | Planet::Jupiter | Planet::Saturn => 1.0,
        Planet::Moon | Planet::Venus | Planet::Mars => 0.9,
        Planet::Mercury | Planet::Pluto => 0.8,
        Planet::Uranus | Planet::Neptune => 0.7,
    }
}

/// Domains each planet naturally rules over, used for aspect routing.
fn planet_domains(planet: Planet) -> &'static [LifeDomain] {
    use LifeDomain::*;
    match planet {
        Planet::Sun => &[Career],
        Planet::Moon => &[Love, Health],
        Planet::Mercury => &[Career, Move],
        Planet::Venus => &[Love, Money],
        Planet::Mars => &[Career, Health],
        Planet::Jupiter => &[Money, Move],
        Planet::Saturn => &[Career],
        Planet::Uranus => &[Move],
        Planet::Neptune => &[Love],
        Planet::Pluto => &[Money, Health],
    }
}

/// Flavor of each asteroid placement.
fn asteroid_affinity(asteroid: Asteroid) -> (f32, f32) {
    match asteroid {
        Asteroid::Ceres => (0.25, 0.5),
        Asteroid::Pallas => (0.2, 0.4),
        Asteroid::Juno => (0.25, 0.4),
        Asteroid::Vesta => (0.2, 0.3),
        Asteroid::Chiron => (0.25, -0.5),
    }
}

/// Fixed affinity of each extra chart point.
fn extra_point_affinity(point: ExtraPoint) -> Affinity {
    use LifeDomain::*;
    match point {
        ExtraPoint::Ascendant => (Health, 0.35, 0.4),
        ExtraPoint::Midheaven => (Career, 0.5, 0.6),
        ExtraPoint::NorthNode => (Move, 0.4, 0.5),
        ExtraPoint::SouthNode => (Move, 0.25, -0.3),
        ExtraPoint::Lilith => (Love, 0.3, -0.4),
        ExtraPoint::PartOfFortune => (Money, 0.45, 0.7),
    }
}

/// Weight multiplier for repeated sibsin/stage counts, capped.
fn count_multiplier(count: u8) -> f32 {
    (count as f32).min(scoring::COUNT_MULTIPLIER_CAP)
}

fn tags_of(affinities: &[Affinity]) -> Vec<LifeDomain> {
    affinities.iter().map(|(domain, _, _)| *domain).collect()
}

/// Extract every Saju-side driver signal, in deterministic order.
pub fn collect_saju_signals(saju: &SajuInput) -> Vec<DriverSignal> {
    let mut signals = Vec::new();

    for (&kind, &count) in &saju.sibsin_distribution {
        if count == 0 {
            continue;
        }
        let affinities = sibsin_affinities(kind);
        let tags = tags_of(affinities);
        for &(domain, weight, polarity) in affinities {
            signals.push(DriverSignal {
                label: format!("sibsin {} x{}", kind, count),
                domain,
                weight: weight * count_multiplier(count),
                polarity,
                domain_tags: tags.clone(),
            });
        }
    }

    for (&stage, &count) in &saju.twelve_stages {
        if count == 0 {
            continue;
        }
        let affinities = stage_affinities(stage);
        let tags = tags_of(affinities);
        for &(domain, weight, polarity) in affinities {
            signals.push(DriverSignal {
                label: format!("stage {} x{}", stage, count),
                domain,
                weight: weight * count_multiplier(count),
                polarity,
                domain_tags: tags.clone(),
            });
        }
    }

    for relation in &saju.relations {
        let affinities = relation_affinities(relation.kind);
        let tags = tags_of(affinities);
        let branches = relation
            .branches
            .iter()
            .map(|b| format!("{:?}", b).to_lowercase())
            .collect::<Vec<_>>()
            .join("-");
        let label = if branches.is_empty() {
            format!("relation {}", relation.kind)
        } else {
            format!("relation {} ({})", relation.kind, branches)
        };
        for &(domain, weight, polarity) in affinities {
            signals.push(DriverSignal {
                label: label.clone(),
                domain,
                weight,
                polarity,
                domain_tags: tags.clone(),
            });
        }
    }

    signals
}

/// Extract every astrology-side driver signal, in deterministic order.
pub fn collect_astro_signals(astro: &AstroInput) -> Vec<DriverSignal> {
    let mut signals = Vec::new();

    for (&planet, &house) in &astro.planet_houses {
        let affinities = house_affinities(house.index());
        let tags: Vec<LifeDomain> = affinities.iter().map(|(d, _)| *d).collect();
        for &(domain, house_weight) in affinities {
            signals.push(DriverSignal {
                label: format!("{} in {}", planet, house),
                domain,
                weight: house_weight * planet_weight(planet),
                polarity: planet_nature(planet),
                domain_tags: tags.clone(),
            });
        }
    }

    for (&planet, &sign) in &astro.planet_signs {
        let domains = planet_domains(planet);
        for &domain in domains {
            signals.push(DriverSignal {
                label: format!("{} in {}", planet, sign),
                domain,
                weight: 0.3 * planet_weight(planet),
                polarity: planet_nature(planet) * 0.8,
                domain_tags: domains.to_vec(),
            });
        }
    }

    for aspect in &astro.aspects {
        signals.extend(aspect_signals(aspect));
    }

    for (&asteroid, &house) in &astro.asteroid_houses {
        let (weight, polarity) = asteroid_affinity(asteroid);
        let affinities = house_affinities(house.index());
        let tags: Vec<LifeDomain> = affinities.iter().map(|(d, _)| *d).collect();
        for &(domain, house_weight) in affinities {
            signals.push(DriverSignal {
                label: format!("{} in {}", asteroid, house),
                domain,
                weight: weight * house_weight,
                polarity,
                domain_tags: tags.clone(),
            });
        }
    }

    for (&point, &sign) in &astro.extra_point_signs {
        let (domain, weight, polarity) = extra_point_affinity(point);
        signals.push(DriverSignal {
            label: format!("{} in {}", point, sign),
            domain,
            weight,
            polarity,
            domain_tags: vec![domain],
        });
    }

    signals
}

/// Signals contributed by one aspect: routed to both planets' domains,
/// weighted by orb tightness.
fn aspect_signals(aspect: &Aspect) -> Vec<DriverSignal> {
    let orb_fit = (1.0 - aspect.orb / evidence::ORB_MAX).clamp(0.15, 1.0);
    let polarity = aspect.aspect_type.polarity();

    let mut domains: Vec<LifeDomain> = planet_domains(aspect.planet1)
        .iter()
        .chain(planet_domains(aspect.planet2))
        .copied()
        .collect();
    domains.sort_unstable();
    domains.dedup();

    let label = format!(
        "{} {} {} (orb {:.1})",
        aspect.planet1, aspect.aspect_type, aspect.planet2, aspect.orb
    );

    domains
        .iter()
        .map(|&domain| DriverSignal {
            label: label.clone(),
            domain,
            weight: 0.6 * orb_fit,
            polarity,
            domain_tags: domains.clone(),
        })
        .collect()
}

/// Whether an aspect's planet pair routes any testimony into a domain.
pub fn aspect_touches_domain(aspect: &Aspect, domain: LifeDomain) -> bool {
    planet_domains(aspect.planet1).contains(&domain)
        || planet_domains(aspect.planet2).contains(&domain)
}

/// Filter and rank signals for one domain: heaviest first, ties broken by
/// label for determinism.
pub fn signals_for_domain(signals: &[DriverSignal], domain: LifeDomain) -> Vec<DriverSignal> {
    let mut filtered: Vec<DriverSignal> = signals
        .iter()
        .filter(|s| s.domain == domain)
        .cloned()
        .collect();
    filtered.sort_by(|a, b| {
        b.weight
            .total_cmp(&a.weight)
            .then_with(|| a.label.cmp(&b.label))
    });
    filtered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::astro::{AspectType, House, TransitTag, ZodiacSign};
    use crate::types::saju::{EarthlyBranch, Relation};

    #[test]
    fn test_empty_input_yields_no_signals() {
        assert!(collect_saju_signals(&SajuInput::default()).is_empty());
        assert!(collect_astro_signals(&AstroInput::default()).is_empty());
    }

    #[test]
    fn test_jeonggwan_drives_career() {
        let mut saju = SajuInput::default();
        saju.sibsin_distribution.insert(SibsinKind::Jeonggwan, 2);
        let signals = collect_saju_signals(&saju);
        let career = signals_for_domain(&signals, LifeDomain::Career);
        assert!(!career.is_empty());
        assert!(career[0].polarity > 0.0);
        assert!(career[0].label.contains("jeonggwan"));
    }

    #[test]
    fn test_count_scales_weight_but_caps() {
        let weight_at = |count: u8| {
            let mut saju = SajuInput::default();
            saju.sibsin_distribution.insert(SibsinKind::Jeongjae, count);
            let signals = collect_saju_signals(&saju);
            signals_for_domain(&signals, LifeDomain::Money)[0].weight
        };
        assert!(weight_at(2) > weight_at(1));
        assert!(weight_at(3) > weight_at(2));
        assert_eq!(weight_at(4), weight_at(3), "count multiplier must cap at 3");
    }

    #[test]
    fn test_chung_relation_signals_movement_and_love_caution() {
        let mut saju = SajuInput::default();
        saju.relations.push(Relation::new(
            RelationKind::Chung,
            vec![EarthlyBranch::Ja, EarthlyBranch::O],
        ));
        let signals = collect_saju_signals(&saju);

        let move_signals = signals_for_domain(&signals, LifeDomain::Move);
        assert!(move_signals.iter().any(|s| s.polarity > 0.0));

        let love_signals = signals_for_domain(&signals, LifeDomain::Love);
        assert!(love_signals.iter().any(|s| s.polarity < 0.0));
    }

    #[test]
    fn test_saturn_in_tenth_drives_career_with_pressure() {
        let mut astro = AstroInput::default();
        astro
            .planet_houses
            .insert(Planet::Saturn, House::new(10).unwrap());
        let signals = collect_astro_signals(&astro);
        let career = signals_for_domain(&signals, LifeDomain::Career);
        assert_eq!(career.len(), 1);
        assert!(career[0].polarity < 0.0, "saturn testimony leans malefic");
        assert!(career[0].weight > 0.5);
    }

    #[test]
    fn test_tight_aspect_outweighs_wide_aspect() {
        let tight = aspect_signals(&Aspect::new(
            Planet::Venus,
            Planet::Jupiter,
            AspectType::Trine,
            1.0,
            121.0,
        ));
        let wide = aspect_signals(&Aspect::new(
            Planet::Venus,
            Planet::Jupiter,
            AspectType::Trine,
            7.5,
            127.5,
        ));
        assert!(tight[0].weight > wide[0].weight);
    }

    #[test]
    fn test_aspect_routes_to_both_planet_domains() {
        // Venus: love/money, Saturn: career.
        let signals = aspect_signals(&Aspect::new(
            Planet::Venus,
            Planet::Saturn,
            AspectType::Square,
            3.0,
            93.0,
        ));
        let domains: Vec<LifeDomain> = signals.iter().map(|s| s.domain).collect();
        assert!(domains.contains(&LifeDomain::Love));
        assert!(domains.contains(&LifeDomain::Money));
        assert!(domains.contains(&LifeDomain::Career));
        // Square presses down everywhere it lands.
        assert!(signals.iter().all(|s| s.polarity < 0.0));
    }

    #[test]
    fn test_midheaven_signals_career() {
        let mut astro = AstroInput::default();
        astro
            .extra_point_signs
            .insert(ExtraPoint::Midheaven, ZodiacSign::Capricorn);
        let signals = collect_astro_signals(&astro);
        let career = signals_for_domain(&signals, LifeDomain::Career);
        assert_eq!(career.len(), 1);
        assert!(career[0].label.contains("midheaven"));
    }

    #[test]
    fn test_transits_do_not_feed_component_signals() {
        // Transits weight the time-overlap factor, not the component score.
        let mut astro = AstroInput::default();
        astro.active_transits.push(TransitTag::SaturnReturn);
        assert!(collect_astro_signals(&astro).is_empty());
    }

    #[test]
    fn test_signal_order_deterministic() {
        let mut saju = SajuInput::default();
        saju.sibsin_distribution.insert(SibsinKind::Jeonggwan, 1);
        saju.sibsin_distribution.insert(SibsinKind::Siksin, 1);
        saju.twelve_stages.insert(TwelveStage::Jewang, 1);

        let a = collect_saju_signals(&saju);
        let b = collect_saju_signals(&saju);
        assert_eq!(a, b);
    }
}
