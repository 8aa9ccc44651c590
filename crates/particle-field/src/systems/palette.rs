//! Color schemes: named policies mapping to a distribution of concrete colors.
//! Sampled at particle creation and on scheme changes only.

use serde::{Deserialize, Serialize};

use super::rng::Rng;
use crate::renderer::color::Color;

const NEON: [u32; 5] = [0xff00ff, 0x00ffff, 0xffff00, 0xff0080, 0x8000ff];
const GALAXY: [u32; 5] = [0x9d4edd, 0xc77dff, 0xe0aaff, 0x7b2cbf, 0x5a189a];
const AURORA_HUES: [f32; 5] = [120.0, 150.0, 180.0, 210.0, 240.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum ColorScheme {
    #[default]
    Rainbow,
    Fire,
    Ocean,
    Neon,
    Aurora,
    Galaxy,
}

impl ColorScheme {
    pub const ALL: [ColorScheme; 6] = [
        Self::Rainbow, Self::Fire, Self::Ocean,
        Self::Neon, Self::Aurora, Self::Galaxy,
    ];

    /// Resolve a scheme by name. Unknown names fall back to rainbow.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "fire" => Self::Fire,
            "ocean" => Self::Ocean,
            "neon" => Self::Neon,
            "aurora" => Self::Aurora,
            "galaxy" => Self::Galaxy,
            _ => Self::Rainbow,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Rainbow => "rainbow",
            Self::Fire => "fire",
            Self::Ocean => "ocean",
            Self::Neon => "neon",
            Self::Aurora => "aurora",
            Self::Galaxy => "galaxy",
        }
    }

    /// Draw one concrete color from this scheme's distribution.
    pub fn sample(&self, rng: &mut Rng) -> Color {
        match self {
            Self::Rainbow => Color::hsl(rng.range(0.0, 360.0), 80.0, 60.0),
            Self::Fire => Color::hsl(rng.range(15.0, 45.0), 100.0, rng.range(50.0, 80.0)),
            Self::Ocean => Color::hsl(rng.range(180.0, 240.0), 80.0, rng.range(40.0, 70.0)),
            Self::Neon => Color::hex(*rng.pick(&NEON)),
            Self::Aurora => {
                let hue = *rng.pick(&AURORA_HUES);
                Color::hsl(hue + rng.range(0.0, 30.0), 90.0, rng.range(60.0, 80.0))
            }
            Self::Galaxy => Color::hex(*rng.pick(&GALAXY)),
        }
    }
}

impl From<String> for ColorScheme {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<&str> for ColorScheme {
    fn from(name: &str) -> Self {
        Self::from_name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hue_of(c: Color) -> f32 {
        c.to_hsl().0
    }

    #[test]
    fn unknown_name_falls_back_to_rainbow() {
        assert_eq!(ColorScheme::from_name("plaid"), ColorScheme::Rainbow);
        assert_eq!(ColorScheme::from_name(" Fire "), ColorScheme::Fire);
    }

    #[test]
    fn names_round_trip() {
        for scheme in ColorScheme::ALL {
            assert_eq!(ColorScheme::from_name(scheme.name()), scheme);
        }
    }

    #[test]
    fn fire_is_warm() {
        let mut rng = Rng::new(42);
        for _ in 0..200 {
            let h = hue_of(ColorScheme::Fire.sample(&mut rng));
            assert!(h >= 14.0 && h <= 46.0, "fire hue {}", h);
        }
    }

    #[test]
    fn ocean_is_cool() {
        let mut rng = Rng::new(42);
        for _ in 0..200 {
            let h = hue_of(ColorScheme::Ocean.sample(&mut rng));
            assert!(h >= 179.0 && h <= 241.0, "ocean hue {}", h);
        }
    }

    #[test]
    fn neon_and_galaxy_come_from_their_palettes() {
        let mut rng = Rng::new(5);
        let neon: Vec<Color> = NEON.iter().map(|&h| Color::hex(h)).collect();
        let galaxy: Vec<Color> = GALAXY.iter().map(|&h| Color::hex(h)).collect();
        for _ in 0..100 {
            assert!(neon.contains(&ColorScheme::Neon.sample(&mut rng)));
            assert!(galaxy.contains(&ColorScheme::Galaxy.sample(&mut rng)));
        }
    }

    #[test]
    fn aurora_stays_in_green_to_violet_band() {
        let mut rng = Rng::new(8);
        for _ in 0..200 {
            let h = hue_of(ColorScheme::Aurora.sample(&mut rng));
            assert!(h >= 119.0 && h <= 271.0, "aurora hue {}", h);
        }
    }

    #[test]
    fn deserializes_unknown_as_rainbow() {
        let s: ColorScheme = serde_json::from_str("\"ocean\"").unwrap();
        assert_eq!(s, ColorScheme::Ocean);
        let s: ColorScheme = serde_json::from_str("\"sepia\"").unwrap();
        assert_eq!(s, ColorScheme::Rainbow);
        assert_eq!(serde_json::to_string(&ColorScheme::Galaxy).unwrap(), "\"galaxy\"");
    }
}
