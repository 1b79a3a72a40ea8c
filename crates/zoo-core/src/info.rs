//! Species descriptions for the inspector panel

use crate::components::{Creature, Species};

/// Shown while nothing is selected
pub const DESELECTED_PROMPT: &str = "Click on an animal to learn more!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeciesInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub habitat: &'static str,
    pub diet: &'static str,
}

static LION: SpeciesInfo = SpeciesInfo {
    name: "African Lion",
    description: "The king of the jungle, lions are social big cats that live in prides.",
    habitat: "Savanna grasslands",
    diet: "Carnivore (antelope, zebra, buffalo)",
};

static ELEPHANT: SpeciesInfo = SpeciesInfo {
    name: "African Elephant",
    description: "The largest land animal on Earth, known for their intelligence and memory.",
    habitat: "Savanna and forest",
    diet: "Herbivore (grass, leaves, bark)",
};

static GIRAFFE: SpeciesInfo = SpeciesInfo {
    name: "Giraffe",
    description: "The tallest animal on Earth, with long necks to reach tree leaves.",
    habitat: "Savanna",
    diet: "Herbivore (leaves, twigs, fruits)",
};

static ZEBRA: SpeciesInfo = SpeciesInfo {
    name: "Zebra",
    description: "Known for their distinctive black and white striped coat.",
    habitat: "Savanna grasslands",
    diet: "Herbivore (grass, leaves)",
};

static MONKEY: SpeciesInfo = SpeciesInfo {
    name: "Monkey",
    description: "Intelligent primates that are excellent climbers and social animals.",
    habitat: "Forest and jungle",
    diet: "Omnivore (fruits, insects, small animals)",
};

pub fn species_info(species: Species) -> &'static SpeciesInfo {
    match species {
        Species::Lion => &LION,
        Species::Elephant => &ELEPHANT,
        Species::Giraffe => &GIRAFFE,
        Species::Zebra => &ZEBRA,
        Species::Monkey => &MONKEY,
    }
}

/// Panel text for a selected creature
pub fn selection_text(creature: &Creature) -> String {
    let info = species_info(creature.species);
    format!(
        "{} {}\n{}\nHabitat: {}\nDiet: {}",
        creature.glyph, info.name, info.description, info.habitat, info.diet
    )
}

/// Panel text for the current selection, or the prompt
pub fn panel_text(selected: Option<&Creature>) -> String {
    match selected {
        Some(creature) => selection_text(creature),
        None => DESELECTED_PROMPT.to_string(),
    }
}
