//! Zoo configuration - species roster, population layout, scenery and motion.
//!
//! Every field has a default, so a config file only needs the values it
//! changes. Species are named by tag in the file and resolved to
//! [`SpeciesTemplate`]s when the engine is built; an unrecognised tag is a
//! [`ZooError::UnknownSpecies`] rather than a silent substitution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::components::{standard_templates, Color, Species, SpeciesTemplate};
use crate::error::ZooError;
use crate::generation::{PopulationConfig, SceneryConfig};

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ZooConfig {
    /// Fixed RNG seed; `None` draws one from the OS
    pub seed: Option<u64>,
    pub species: Vec<TemplateConfig>,
    pub population: PopulationConfig,
    pub scenery: SceneryConfig,
    pub motion: MotionConfig,
}

impl Default for ZooConfig {
    fn default() -> Self {
        Self {
            seed: None,
            species: standard_templates().iter().map(TemplateConfig::from).collect(),
            population: PopulationConfig::default(),
            scenery: SceneryConfig::default(),
            motion: MotionConfig::default(),
        }
    }
}

impl ZooConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ZooError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ZooError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Resolve species tags into templates, in roster order
    pub fn templates(&self) -> Result<Vec<SpeciesTemplate>, ZooError> {
        self.species.iter().map(TemplateConfig::resolve).collect()
    }

    pub fn validate(&self) -> Result<(), ZooError> {
        if self.motion.bound.is_nan() || self.motion.bound <= 0.0 {
            return Err(ZooError::InvalidConfig(format!(
                "motion.bound must be positive, got {}",
                self.motion.bound
            )));
        }
        if self.motion.heading_interval_ms < 0.0 {
            return Err(ZooError::InvalidConfig(
                "motion.heading_interval_ms must not be negative".to_string(),
            ));
        }
        if self.population.spread < 0.0 {
            return Err(ZooError::InvalidConfig(
                "population.spread must not be negative".to_string(),
            ));
        }
        for entry in &self.species {
            if entry.speed < 0.0 || entry.size <= 0.0 {
                return Err(ZooError::InvalidConfig(format!(
                    "species '{}' needs a positive size and non-negative speed",
                    entry.tag
                )));
            }
        }
        Ok(())
    }
}

/// A species entry as written in a config file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateConfig {
    pub tag: String,
    #[serde(default)]
    pub glyph: String,
    pub color: Color,
    pub size: f32,
    pub speed: f32,
}

impl TemplateConfig {
    pub fn resolve(&self) -> Result<SpeciesTemplate, ZooError> {
        let species: Species = self.tag.parse()?;
        Ok(SpeciesTemplate::new(species, self.glyph.clone(), self.color, self.size, self.speed))
    }
}

impl From<&SpeciesTemplate> for TemplateConfig {
    fn from(template: &SpeciesTemplate) -> Self {
        Self {
            tag: template.species.tag().to_string(),
            glyph: template.glyph.clone(),
            color: template.color,
            size: template.size,
            speed: template.speed,
        }
    }
}

/// Wandering parameters
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Half-extent of the square animals wander in
    pub bound: f32,
    /// Minimum time between heading changes
    pub heading_interval_ms: f64,
    /// Bobbing phase rate, radians per millisecond
    pub bob_frequency: f64,
    pub bob_amplitude: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            bound: 80.0,
            heading_interval_ms: 3000.0,
            bob_frequency: 0.003,
            bob_amplitude: 0.2,
        }
    }
}
