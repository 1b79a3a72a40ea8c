//! Animal population - scatters creatures of each species over the park

use hecs::{Entity, World};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::components::{Creature, SpeciesTemplate, Vec3};
use crate::models::ModelRegistry;

/// Configuration for placing animals
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationConfig {
    pub per_species_count: u32,
    /// Edge length of the random placement square
    pub spread: f32,
    /// X offset added per species, so kinds cluster loosely
    pub species_spacing: f32,
    /// X offset added per instance within a species
    pub instance_spacing: f32,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            per_species_count: 3,
            spread: 80.0,
            species_spacing: 20.0,
            instance_spacing: 10.0,
        }
    }
}

/// Random unit heading in the ground plane
pub fn random_heading(rng: &mut impl Rng) -> Vec3 {
    loop {
        let heading = Vec3::new(rng.gen::<f32>() - 0.5, 0.0, rng.gen::<f32>() - 0.5);
        // A zero draw has no direction; try again
        if heading.length_squared() > 1e-12 {
            return heading.normalize();
        }
    }
}

/// Create `per_species_count` creatures per template with the default layout
pub fn populate(
    templates: &[SpeciesTemplate],
    per_species_count: u32,
    bound: f32,
    rng: &mut impl Rng,
) -> Vec<Creature> {
    let config = PopulationConfig {
        per_species_count,
        ..Default::default()
    };
    populate_with(templates, &config, bound, &ModelRegistry::default(), rng)
}

/// Create creatures for every template, placed per `config` and clamped to `bound`
pub fn populate_with(
    templates: &[SpeciesTemplate],
    config: &PopulationConfig,
    bound: f32,
    registry: &ModelRegistry,
    rng: &mut impl Rng,
) -> Vec<Creature> {
    let mut creatures = Vec::with_capacity(templates.len() * config.per_species_count as usize);

    for (species_idx, template) in templates.iter().enumerate() {
        let model = registry.build(template);

        for i in 0..config.per_species_count {
            let offset = species_idx as f32 * config.species_spacing + i as f32 * config.instance_spacing;
            let x = (rng.gen::<f32>() - 0.5) * config.spread + offset;
            let z = (rng.gen::<f32>() - 0.5) * config.spread;

            let position = Vec3::new(x.clamp(-bound, bound), 0.0, z.clamp(-bound, bound));
            let heading = random_heading(rng);

            creatures.push(Creature::new(template, model.clone(), position, heading));
        }
    }

    log::info!(
        "Populated {} creatures across {} species",
        creatures.len(),
        templates.len()
    );
    creatures
}

/// Spawn creatures into the world, one entity each
pub fn spawn_creatures(world: &mut World, creatures: Vec<Creature>) -> Vec<Entity> {
    creatures.into_iter().map(|c| world.spawn((c,))).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{standard_templates, Species};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_populate_counts() {
        let mut rng = StdRng::seed_from_u64(11);
        let creatures = populate(&standard_templates(), 3, 80.0, &mut rng);

        assert_eq!(creatures.len(), 15);
        for species in Species::ALL {
            assert_eq!(creatures.iter().filter(|c| c.species == species).count(), 3);
        }
    }

    #[test]
    fn test_populate_starts_inside_bounds() {
        let mut rng = StdRng::seed_from_u64(12);
        let creatures = populate(&standard_templates(), 10, 80.0, &mut rng);

        for c in &creatures {
            assert!(c.position.x.abs() <= 80.0, "{:?}", c.position);
            assert!(c.position.z.abs() <= 80.0, "{:?}", c.position);
            assert_eq!(c.position.y, 0.0);
            assert_eq!(c.last_heading_change_ms, 0.0);
            assert!((c.heading.length() - 1.0).abs() < 1e-5);
            assert_eq!(c.heading.y, 0.0);
        }
    }

    #[test]
    fn test_species_offset_shifts_clusters() {
        // With no random spread every creature lands exactly on its offset
        let config = PopulationConfig {
            per_species_count: 2,
            spread: 0.0,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(13);
        let creatures = populate_with(
            &standard_templates(),
            &config,
            80.0,
            &ModelRegistry::default(),
            &mut rng,
        );

        let xs: Vec<f32> = creatures.iter().map(|c| c.position.x).collect();
        assert_eq!(xs, vec![0.0, 10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 80.0]);
    }

    #[test]
    fn test_creatures_carry_template_data() {
        let mut rng = StdRng::seed_from_u64(14);
        let creatures = populate(&standard_templates(), 1, 80.0, &mut rng);

        let elephant = creatures.iter().find(|c| c.species == Species::Elephant).unwrap();
        assert_eq!(elephant.glyph, "🐘");
        assert_eq!(elephant.speed, 0.01);
        assert_eq!(elephant.model.name, "elephant");
        assert!(elephant.bounds.radius > 0.0);
    }

    #[test]
    fn test_spawn_into_world() {
        let mut world = World::new();
        let mut rng = StdRng::seed_from_u64(15);
        let entities = spawn_creatures(&mut world, populate(&standard_templates(), 2, 80.0, &mut rng));

        assert_eq!(entities.len(), 10);
        assert_eq!(world.query::<&Creature>().iter().count(), 10);
    }

    #[test]
    fn test_random_heading_is_unit() {
        let mut rng = StdRng::seed_from_u64(16);
        for _ in 0..1000 {
            let h = random_heading(&mut rng);
            assert!((h.length() - 1.0).abs() < 1e-5);
            assert_eq!(h.y, 0.0);
        }
    }
}
