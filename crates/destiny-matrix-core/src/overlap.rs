//! Time-overlap calculator: luck-cycle/transit convergence weighting.
//!
//! Models whether the currently active Saju luck-cycle elements (daeun and
//! saeun) resonate with the currently active astrological transits. Each
//! of the five elements reinforces a fixed set of transit tags; matches
//! raise the multiplicative weight applied to a domain's fused score.
//!
//! # Algorithm
//!
//! Start from a baseline weight of 1.0. For each distinct active transit
//! in the daeun element's affinity set add 0.15; for each in the saeun
//! element's set add 0.10; cap the total at 1.5. The raw match count
//! (daeun 1.0, saeun 0.5 per match) is reported as `overlap_strength`,
//! halved when either side of the domain has no drivers.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::config::constants::overlap as consts;
use crate::types::astro::TransitTag;
use crate::types::saju::FiveElement;

/// Transit tags reinforced by each element.
///
/// Fire resonates with the expansive and luminous transits, water with the
/// hidden and dissolving ones, and so on. The table is symmetric input to
/// both luck-cycle levels.
pub fn element_transit_affinity(element: FiveElement) -> &'static [TransitTag] {
    match element {
        FiveElement::Wood => &[
            TransitTag::JupiterReturn,
            TransitTag::NewMoon,
            TransitTag::UranusOpposition,
        ],
        FiveElement::Fire => &[
            TransitTag::JupiterReturn,
            TransitTag::SolarEclipse,
            TransitTag::MarsRetrograde,
            TransitTag::FullMoon,
        ],
        FiveElement::Earth => &[
            TransitTag::SaturnReturn,
            TransitTag::VenusRetrograde,
            TransitTag::NewMoon,
        ],
        FiveElement::Metal => &[
            TransitTag::SaturnReturn,
            TransitTag::MercuryRetrograde,
            TransitTag::UranusOpposition,
        ],
        FiveElement::Water => &[
            TransitTag::LunarEclipse,
            TransitTag::NeptuneSquare,
            TransitTag::PlutoTransit,
            TransitTag::FullMoon,
        ],
    }
}

/// Result of the time-overlap computation for one domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeOverlap {
    /// Raw convergence strength, >= 0.
    pub overlap_strength: f32,
    /// Multiplicative weight in [1.0, 1.5].
    pub time_overlap_weight: f32,
}

impl Default for TimeOverlap {
    fn default() -> Self {
        Self {
            overlap_strength: 0.0,
            time_overlap_weight: consts::BASELINE_WEIGHT,
        }
    }
}

/// Count distinct active transits matching an element's affinity set.
fn affinity_matches(element: Option<FiveElement>, active: &[TransitTag]) -> usize {
    let Some(element) = element else { return 0 };
    let affinities = element_transit_affinity(element);
    affinities.iter().filter(|tag| active.contains(tag)).count()
}

/// Compute luck-cycle/transit convergence for one domain.
///
/// `saju_driver_count` / `astro_driver_count` are the sizes of the
/// domain's driver lists; a convergence with no domain signal on either
/// side reports damped strength. The weight itself depends only on the
/// luck-cycle elements and the transit list, so holding transits fixed and
/// changing the daeun element changes the weight, and an element with more
/// affinity matches always weighs strictly higher than one with fewer.
pub fn compute_time_overlap(
    daeun: Option<FiveElement>,
    saeun: Option<FiveElement>,
    active_transits: &[TransitTag],
    saju_driver_count: usize,
    astro_driver_count: usize,
) -> TimeOverlap {
    // Distinct transits only; upstream may repeat tags.
    let mut active: Vec<TransitTag> = active_transits.to_vec();
    active.sort_unstable();
    active.dedup();

    let daeun_matches = affinity_matches(daeun, &active);
    let saeun_matches = affinity_matches(saeun, &active);

    let weight = (consts::BASELINE_WEIGHT
        + consts::DAEUN_INCREMENT * daeun_matches as f32
        + consts::SAEUN_INCREMENT * saeun_matches as f32)
        .min(consts::WEIGHT_CAP);

    let mut strength = consts::DAEUN_STRENGTH * daeun_matches as f32
        + consts::SAEUN_STRENGTH * saeun_matches as f32;
    if saju_driver_count == 0 || astro_driver_count == 0 {
        strength *= consts::NO_DRIVER_DAMPING;
    }

    trace!(
        daeun_matches,
        saeun_matches,
        weight,
        strength,
        "time overlap computed"
    );

    TimeOverlap {
        overlap_strength: strength,
        time_overlap_weight: weight,
    }
}
