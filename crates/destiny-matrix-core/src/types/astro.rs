//! Western astrology input primitives.
//!
//! Typed counterparts of the signals produced by the upstream ephemeris and
//! chart calculator: planets, signs, houses, aspects, transits, and the
//! minor points. As with the Saju side, every field of [`AstroInput`] is
//! optional or possibly empty and absence means "no signal".

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{MatrixError, MatrixResult};
use crate::types::saju::FiveElement;

/// The ten classical-plus-modern planets used by the chart calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Planet {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

impl Planet {
    /// All planets in conventional order.
    pub fn all() -> [Planet; 10] {
        [
            Self::Sun,
            Self::Moon,
            Self::Mercury,
            Self::Venus,
            Self::Mars,
            Self::Jupiter,
            Self::Saturn,
            Self::Uranus,
            Self::Neptune,
            Self::Pluto,
        ]
    }
}

impl fmt::Display for Planet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Sun => "sun",
            Self::Moon => "moon",
            Self::Mercury => "mercury",
            Self::Venus => "venus",
            Self::Mars => "mars",
            Self::Jupiter => "jupiter",
            Self::Saturn => "saturn",
            Self::Uranus => "uranus",
            Self::Neptune => "neptune",
            Self::Pluto => "pluto",
        };
        write!(f, "{}", s)
    }
}

/// The twelve zodiac signs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl ZodiacSign {
    /// The western element of this sign.
    #[inline]
    pub fn element(self) -> WesternElement {
        match self {
            Self::Aries | Self::Leo | Self::Sagittarius => WesternElement::Fire,
            Self::Taurus | Self::Virgo | Self::Capricorn => WesternElement::Earth,
            Self::Gemini | Self::Libra | Self::Aquarius => WesternElement::Air,
            Self::Cancer | Self::Scorpio | Self::Pisces => WesternElement::Water,
        }
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Aries => "aries",
            Self::Taurus => "taurus",
            Self::Gemini => "gemini",
            Self::Cancer => "cancer",
            Self::Leo => "leo",
            Self::Virgo => "virgo",
            Self::Libra => "libra",
            Self::Scorpio => "scorpio",
            Self::Sagittarius => "sagittarius",
            Self::Capricorn => "capricorn",
            Self::Aquarius => "aquarius",
            Self::Pisces => "pisces",
        };
        write!(f, "{}", s)
    }
}

/// The four western elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WesternElement {
    Fire,
    Earth,
    Air,
    Water,
}

impl WesternElement {
    /// Conventional mapping onto the five-element cycle.
    ///
    /// Fire, Earth, and Water map directly; Air maps to Metal (both carry
    /// the separating/clarifying quality). Wood has no western counterpart.
    #[inline]
    pub fn to_five_element(self) -> FiveElement {
        match self {
            Self::Fire => FiveElement::Fire,
            Self::Earth => FiveElement::Earth,
            Self::Air => FiveElement::Metal,
            Self::Water => FiveElement::Water,
        }
    }
}

impl fmt::Display for WesternElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Fire => "fire",
            Self::Earth => "earth",
            Self::Air => "air",
            Self::Water => "water",
        };
        write!(f, "{}", s)
    }
}

/// A validated house index (1..=12).
///
/// Construction outside the valid range fails, both through [`House::new`]
/// and through deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct House(u8);

impl House {
    /// Create a house index.
    ///
    /// # Errors
    /// Returns [`MatrixError::InvalidInputShape`] when `index` is outside
    /// 1..=12.
    pub fn new(index: u8) -> MatrixResult<Self> {
        if (1..=12).contains(&index) {
            Ok(Self(index))
        } else {
            Err(MatrixError::InvalidInputShape {
                field: "house".into(),
                message: format!("house index {} out of range 1..=12", index),
            })
        }
    }

    /// The 1-based house index.
    #[inline]
    pub fn index(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for House {
    type Error = MatrixError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        House::new(value)
    }
}

impl From<House> for u8 {
    fn from(house: House) -> u8 {
        house.0
    }
}

impl fmt::Display for House {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "house {}", self.0)
    }
}

/// Angular aspect categories with their ideal angles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AspectType {
    Conjunction,
    Sextile,
    Square,
    Trine,
    Opposition,
    Quincunx,
}

impl AspectType {
    /// Ideal angle in degrees.
    #[inline]
    pub fn ideal_angle(self) -> f32 {
        match self {
            Self::Conjunction => 0.0,
            Self::Sextile => 60.0,
            Self::Square => 90.0,
            Self::Trine => 120.0,
            Self::Opposition => 180.0,
            Self::Quincunx => 150.0,
        }
    }

    /// Harmonic polarity of the aspect, in [-1, 1].
    ///
    /// Trines and sextiles flow, squares and oppositions grind,
    /// conjunctions intensify whatever they touch.
    #[inline]
    pub fn polarity(self) -> f32 {
        match self {
            Self::Trine => 1.0,
            Self::Sextile => 0.8,
            Self::Conjunction => 0.3,
            Self::Quincunx => -0.5,
            Self::Opposition => -0.7,
            Self::Square => -0.9,
        }
    }
}

impl fmt::Display for AspectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Conjunction => "conjunction",
            Self::Sextile => "sextile",
            Self::Square => "square",
            Self::Trine => "trine",
            Self::Opposition => "opposition",
            Self::Quincunx => "quincunx",
        };
        write!(f, "{}", s)
    }
}

/// An angular relationship between two planets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aspect {
    /// First planet of the pair.
    pub planet1: Planet,
    /// Second planet of the pair.
    pub planet2: Planet,
    /// Aspect category.
    pub aspect_type: AspectType,
    /// Deviation from the ideal angle, in degrees. Tighter is stronger.
    pub orb: f32,
    /// Measured angle between the planets, in degrees.
    pub angle: f32,
}

impl Aspect {
    /// Create an aspect.
    pub fn new(planet1: Planet, planet2: Planet, aspect_type: AspectType, orb: f32, angle: f32) -> Self {
        Self {
            planet1,
            planet2,
            aspect_type,
            orb,
            angle,
        }
    }
}

/// Named current planetary conditions relative to the natal chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitTag {
    JupiterReturn,
    SaturnReturn,
    MercuryRetrograde,
    VenusRetrograde,
    MarsRetrograde,
    SolarEclipse,
    LunarEclipse,
    UranusOpposition,
    NeptuneSquare,
    PlutoTransit,
    NewMoon,
    FullMoon,
}

impl TransitTag {
    /// All transit tags in canonical order.
    pub fn all() -> [TransitTag; 12] {
        [
            Self::JupiterReturn,
            Self::SaturnReturn,
            Self::MercuryRetrograde,
            Self::VenusRetrograde,
            Self::MarsRetrograde,
            Self::SolarEclipse,
            Self::LunarEclipse,
            Self::UranusOpposition,
            Self::NeptuneSquare,
            Self::PlutoTransit,
            Self::NewMoon,
            Self::FullMoon,
        ]
    }
}

impl fmt::Display for TransitTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::JupiterReturn => "jupiter_return",
            Self::SaturnReturn => "saturn_return",
            Self::MercuryRetrograde => "mercury_retrograde",
            Self::VenusRetrograde => "venus_retrograde",
            Self::MarsRetrograde => "mars_retrograde",
            Self::SolarEclipse => "solar_eclipse",
            Self::LunarEclipse => "lunar_eclipse",
            Self::UranusOpposition => "uranus_opposition",
            Self::NeptuneSquare => "neptune_square",
            Self::PlutoTransit => "pluto_transit",
            Self::NewMoon => "new_moon",
            Self::FullMoon => "full_moon",
        };
        write!(f, "{}", s)
    }
}

/// The four major asteroids plus Chiron.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Asteroid {
    Ceres,
    Pallas,
    Juno,
    Vesta,
    Chiron,
}

impl fmt::Display for Asteroid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Ceres => "ceres",
            Self::Pallas => "pallas",
            Self::Juno => "juno",
            Self::Vesta => "vesta",
            Self::Chiron => "chiron",
        };
        write!(f, "{}", s)
    }
}

/// Calculated chart points beyond planets and asteroids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtraPoint {
    Ascendant,
    Midheaven,
    NorthNode,
    SouthNode,
    Lilith,
    PartOfFortune,
}

impl fmt::Display for ExtraPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Ascendant => "ascendant",
            Self::Midheaven => "midheaven",
            Self::NorthNode => "north_node",
            Self::SouthNode => "south_node",
            Self::Lilith => "lilith",
            Self::PartOfFortune => "part_of_fortune",
        };
        write!(f, "{}", s)
    }
}

/// The astrology half of the matrix calculation input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AstroInput {
    /// House placement per planet.
    #[serde(default)]
    pub planet_houses: BTreeMap<Planet, House>,

    /// Sign placement per planet.
    #[serde(default)]
    pub planet_signs: BTreeMap<Planet, ZodiacSign>,

    /// Aspects between natal planets.
    #[serde(default)]
    pub aspects: Vec<Aspect>,

    /// Transits currently active against the natal chart.
    #[serde(default)]
    pub active_transits: Vec<TransitTag>,

    /// Dominant element of the chart, when the calculator reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dominant_element: Option<WesternElement>,

    /// House placement per asteroid.
    #[serde(default)]
    pub asteroid_houses: BTreeMap<Asteroid, House>,

    /// Sign placement of the extra chart points.
    #[serde(default)]
    pub extra_point_signs: BTreeMap<ExtraPoint, ZodiacSign>,
}

impl AstroInput {
    /// Whether no field carries any signal.
    pub fn is_empty(&self) -> bool {
        self.planet_houses.is_empty()
            && self.planet_signs.is_empty()
            && self.aspects.is_empty()
            && self.active_transits.is_empty()
            && self.dominant_element.is_none()
            && self.asteroid_houses.is_empty()
            && self.extra_point_signs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_house_valid_range() {
        for index in 1..=12u8 {
            assert!(House::new(index).is_ok());
        }
        assert!(House::new(0).is_err());
        assert!(House::new(13).is_err());
    }

    #[test]
    fn test_house_serde_rejects_out_of_range() {
        let ok: Result<House, _> = serde_json::from_str("7");
        assert_eq!(ok.unwrap().index(), 7);

        let bad: Result<House, _> = serde_json::from_str("13");
        assert!(bad.is_err(), "house 13 must fail deserialization");
    }

    #[test]
    fn test_sign_elements_partition_evenly() {
        let mut counts = std::collections::BTreeMap::new();
        for sign in [
            ZodiacSign::Aries,
            ZodiacSign::Taurus,
            ZodiacSign::Gemini,
            ZodiacSign::Cancer,
            ZodiacSign::Leo,
            ZodiacSign::Virgo,
            ZodiacSign::Libra,
            ZodiacSign::Scorpio,
            ZodiacSign::Sagittarius,
            ZodiacSign::Capricorn,
            ZodiacSign::Aquarius,
            ZodiacSign::Pisces,
        ] {
            *counts.entry(sign.element()).or_insert(0u8) += 1;
        }
        assert!(counts.values().all(|&c| c == 3), "3 signs per element");
    }

    #[test]
    fn test_aspect_polarity_orders_harmony() {
        assert!(AspectType::Trine.polarity() > AspectType::Sextile.polarity());
        assert!(AspectType::Sextile.polarity() > AspectType::Conjunction.polarity());
        assert!(AspectType::Conjunction.polarity() > 0.0);
        assert!(AspectType::Square.polarity() < AspectType::Opposition.polarity());
        assert!(AspectType::Square.polarity() < 0.0);
    }

    #[test]
    fn test_western_to_five_element_mapping() {
        assert_eq!(WesternElement::Fire.to_five_element(), FiveElement::Fire);
        assert_eq!(WesternElement::Air.to_five_element(), FiveElement::Metal);
        assert_eq!(WesternElement::Water.to_five_element(), FiveElement::Water);
    }

    #[test]
    fn test_transit_serde_snake_case() {
        let json = serde_json::to_string(&TransitTag::MercuryRetrograde).unwrap();
        assert_eq!(json, r#""mercury_retrograde""#);
    }

    #[test]
    fn test_astro_input_roundtrip() {
        let mut input = AstroInput::default();
        input
            .planet_houses
            .insert(Planet::Saturn, House::new(10).unwrap());
        input.aspects.push(Aspect::new(
            Planet::Sun,
            Planet::Moon,
            AspectType::Trine,
            2.1,
            121.9,
        ));
        input.active_transits.push(TransitTag::JupiterReturn);

        let json = serde_json::to_string(&input).unwrap();
        let restored: AstroInput = serde_json::from_str(&json).unwrap();
        assert_eq!(input, restored);
        assert!(!restored.is_empty());
    }

    #[test]
    fn test_astro_input_default_is_empty() {
        assert!(AstroInput::default().is_empty());
    }
}
