//! Species and the templates shared by every animal of a kind.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::Color;
use crate::error::ZooError;

/// Animal kinds the park knows how to build and describe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    Lion,
    Elephant,
    Giraffe,
    Zebra,
    Monkey,
}

impl Species {
    pub const ALL: [Species; 5] = [
        Species::Lion,
        Species::Elephant,
        Species::Giraffe,
        Species::Zebra,
        Species::Monkey,
    ];

    /// Lowercase tag used in config files
    pub fn tag(&self) -> &'static str {
        match self {
            Species::Lion => "lion",
            Species::Elephant => "elephant",
            Species::Giraffe => "giraffe",
            Species::Zebra => "zebra",
            Species::Monkey => "monkey",
        }
    }
}

impl FromStr for Species {
    type Err = ZooError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Species::ALL
            .iter()
            .copied()
            .find(|species| species.tag().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ZooError::UnknownSpecies(s.to_string()))
    }
}

impl std::fmt::Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Immutable per-species settings, shared by all instances
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesTemplate {
    pub species: Species,
    /// Emoji shown next to the name in the info panel
    pub glyph: String,
    /// Fallback colour when no dedicated model exists
    pub color: Color,
    /// Nominal size in metres
    pub size: f32,
    /// Distance travelled per frame
    pub speed: f32,
}

impl SpeciesTemplate {
    pub fn new(species: Species, glyph: impl Into<String>, color: Color, size: f32, speed: f32) -> Self {
        Self {
            species,
            glyph: glyph.into(),
            color,
            size,
            speed,
        }
    }

    /// Built-in template for a species
    pub fn standard(species: Species) -> Self {
        match species {
            Species::Lion => Self::new(species, "🦁", Color(0xFFA500), 2.0, 0.02),
            Species::Elephant => Self::new(species, "🐘", Color(0x808080), 3.0, 0.01),
            Species::Giraffe => Self::new(species, "🦒", Color(0xF4A460), 2.5, 0.015),
            Species::Zebra => Self::new(species, "🦓", Color(0xFFFFFF), 1.5, 0.025),
            Species::Monkey => Self::new(species, "🐒", Color(0x8B4513), 1.0, 0.03),
        }
    }
}

/// Built-in templates in park order (lion first, monkey last)
pub fn standard_templates() -> Vec<SpeciesTemplate> {
    Species::ALL.iter().map(|&s| SpeciesTemplate::standard(s)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_species_from_tag() {
        assert_eq!("lion".parse::<Species>().unwrap(), Species::Lion);
        assert_eq!(" Zebra ".parse::<Species>().unwrap(), Species::Zebra);

        match "penguin".parse::<Species>() {
            Err(ZooError::UnknownSpecies(tag)) => assert_eq!(tag, "penguin"),
            other => panic!("expected UnknownSpecies, got {:?}", other),
        }
    }

    #[test]
    fn test_tag_round_trip() {
        for species in Species::ALL {
            assert_eq!(species.tag().parse::<Species>().unwrap(), species);
        }
    }

    #[test]
    fn test_standard_templates() {
        let templates = standard_templates();
        assert_eq!(templates.len(), 5);
        assert_eq!(templates[0].species, Species::Lion);
        assert_eq!(templates[1].speed, 0.01);
        assert_eq!(templates[4].color, Color(0x8B4513));
    }
}
