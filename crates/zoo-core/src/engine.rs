//! Zoo engine - the application context that owns a running park

use hecs::{Entity, World};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::components::*;
use crate::config::ZooConfig;
use crate::environment::{DayPhase, Lighting};
use crate::error::ZooError;
use crate::generation::{build_scenery, populate_with, spawn_creatures, Scenery};
use crate::info::panel_text;
use crate::models::ModelRegistry;
use crate::picking::{pick_entity, Camera, Viewport};
use crate::systems::motion_system;

/// Main zoo engine
pub struct ZooEngine {
    /// ECS world holding one entity per creature
    pub world: World,
    /// Static props, built once
    pub scenery: Scenery,
    pub config: ZooConfig,
    /// Milliseconds since the park opened
    clock_ms: f64,
    animations_enabled: bool,
    day_phase: DayPhase,
    selected: Option<Entity>,
    visitor_count: u32,
    rng: StdRng,
}

impl ZooEngine {
    /// Build a park with the standard model builders
    pub fn new(config: ZooConfig) -> Result<Self, ZooError> {
        Self::with_registry(config, &ModelRegistry::default())
    }

    /// Build a park using a custom species → model registry
    pub fn with_registry(config: ZooConfig, registry: &ModelRegistry) -> Result<Self, ZooError> {
        config.validate()?;
        let templates = config.templates().map_err(|e| {
            log::error!("Cannot build zoo: {}", e);
            e
        })?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let scenery = build_scenery(&config.scenery, &mut rng);
        let creatures = populate_with(
            &templates,
            &config.population,
            config.motion.bound,
            registry,
            &mut rng,
        );

        let mut world = World::new();
        spawn_creatures(&mut world, creatures);

        let visitor_count = roll_visitors(&mut rng);

        log::info!(
            "Zoo opened with {} animals, {} props, {} visitors",
            world.len(),
            scenery.props.len(),
            visitor_count
        );

        Ok(Self {
            world,
            scenery,
            config,
            clock_ms: 0.0,
            animations_enabled: true,
            day_phase: DayPhase::Day,
            selected: None,
            visitor_count,
            rng,
        })
    }

    /// Advance the park clock by delta_seconds and move the animals
    pub fn update(&mut self, delta_seconds: f32) {
        self.clock_ms += delta_seconds.max(0.0) as f64 * 1000.0;

        motion_system(
            &mut self.world,
            self.clock_ms,
            self.animations_enabled,
            &self.config.motion,
            &mut self.rng,
        );
    }

    pub fn clock_ms(&self) -> f64 {
        self.clock_ms
    }

    pub fn animations_enabled(&self) -> bool {
        self.animations_enabled
    }

    pub fn set_animations_enabled(&mut self, enabled: bool) {
        self.animations_enabled = enabled;
    }

    /// Flip the animation flag, returning the new value
    pub fn toggle_animations(&mut self) -> bool {
        self.animations_enabled = !self.animations_enabled;
        log::info!("Animations {}", if self.animations_enabled { "resumed" } else { "paused" });
        self.animations_enabled
    }

    /// Label for the animation toggle button
    pub fn animation_label(&self) -> &'static str {
        if self.animations_enabled {
            "Toggle Animations"
        } else {
            "Resume Animations"
        }
    }

    pub fn day_phase(&self) -> DayPhase {
        self.day_phase
    }

    /// Switch between day and night, returning the new phase
    pub fn toggle_day_night(&mut self) -> DayPhase {
        self.day_phase = self.day_phase.toggled();
        log::info!("Switched to {:?}", self.day_phase);
        self.day_phase
    }

    pub fn lighting(&self) -> Lighting {
        Lighting::for_phase(self.day_phase)
    }

    /// Select whatever creature lies under a click; clears the selection on a miss
    pub fn click(&mut self, screen_x: f32, screen_y: f32, viewport: Viewport, camera: &Camera) -> Option<Entity> {
        let ray = camera.screen_ray(screen_x, screen_y, viewport);
        self.selected = pick_entity(&self.world, camera, &ray);
        self.selected
    }

    /// Select a creature entity directly; returns false if it is not a creature
    pub fn select(&mut self, entity: Entity) -> bool {
        if self.world.get::<&Creature>(entity).is_ok() {
            self.selected = Some(entity);
            true
        } else {
            false
        }
    }

    pub fn deselect(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<Entity> {
        self.selected
    }

    pub fn selected_creature(&self) -> Option<hecs::Ref<'_, Creature>> {
        self.selected.and_then(|e| self.world.get::<&Creature>(e).ok())
    }

    /// Info panel contents for the current selection
    pub fn selection_text(&self) -> String {
        panel_text(self.selected_creature().as_deref())
    }

    /// Borrow every creature in the park; walk it with `.iter()`
    pub fn creatures(&self) -> hecs::QueryBorrow<'_, &Creature> {
        self.world.query::<&Creature>()
    }

    pub fn animal_count(&self) -> usize {
        self.creatures().iter().count()
    }

    /// Count animals of one species
    pub fn species_count(&self, species: Species) -> usize {
        self.creatures()
            .iter()
            .filter(|(_, c)| c.species == species)
            .count()
    }

    pub fn visitor_count(&self) -> u32 {
        self.visitor_count
    }

    /// Re-roll the visitor headcount shown in the stats panel
    pub fn refresh_visitors(&mut self) -> u32 {
        self.visitor_count = roll_visitors(&mut self.rng);
        self.visitor_count
    }

    /// Camera back at its starting pose
    pub fn reset_camera(&self, aspect: f32) -> Camera {
        Camera::home(aspect)
    }
}

/// Random visitor headcount, 10..=59
fn roll_visitors(rng: &mut impl Rng) -> u32 {
    rng.gen_range(10..60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> ZooEngine {
        ZooEngine::new(ZooConfig::default().with_seed(42)).unwrap()
    }

    #[test]
    fn test_engine_creation() {
        let engine = seeded();
        assert_eq!(engine.animal_count(), 15);
        assert_eq!(engine.species_count(Species::Monkey), 3);
        assert_eq!(engine.clock_ms(), 0.0);
        assert!(engine.animations_enabled());
        assert_eq!(engine.day_phase(), DayPhase::Day);
        assert!((10..60).contains(&engine.visitor_count()));
    }

    #[test]
    fn test_engine_update_advances_clock() {
        let mut engine = seeded();
        for _ in 0..60 {
            engine.update(1.0 / 60.0);
        }
        assert!((engine.clock_ms() - 1000.0).abs() < 0.01);
    }

    #[test]
    fn test_paused_engine_keeps_positions() {
        let mut engine = seeded();
        engine.toggle_animations();
        assert_eq!(engine.animation_label(), "Resume Animations");

        let before: Vec<Creature> = engine.creatures().iter().map(|(_, c)| c.clone()).collect();
        engine.update(5.0);
        let after: Vec<Creature> = engine.creatures().iter().map(|(_, c)| c.clone()).collect();

        assert_eq!(before, after);
    }

    #[test]
    fn test_day_night_toggle() {
        let mut engine = seeded();
        assert!(engine.lighting().sun.visible);

        assert_eq!(engine.toggle_day_night(), DayPhase::Night);
        assert!(engine.lighting().moon.visible);
        assert!(!engine.lighting().sun.visible);
    }

    #[test]
    fn test_select_and_deselect() {
        let mut engine = seeded();
        assert_eq!(engine.selection_text(), crate::info::DESELECTED_PROMPT);

        let (entity, species) = {
            let mut query = engine.world.query::<&Creature>();
            let (e, c) = query.iter().next().unwrap();
            (e, c.species)
        };
        assert!(engine.select(entity));
        assert_eq!(engine.selected_creature().unwrap().species, species);
        assert!(engine.selection_text().contains(crate::info::species_info(species).name));

        engine.deselect();
        assert!(engine.selected().is_none());
    }

    #[test]
    fn test_unknown_species_fails_construction() {
        let mut config = ZooConfig::default();
        config.species[0].tag = "dragon".to_string();

        match ZooEngine::new(config) {
            Err(ZooError::UnknownSpecies(tag)) => assert_eq!(tag, "dragon"),
            Err(e) => panic!("wrong error: {}", e),
            Ok(_) => panic!("expected an error"),
        }
    }

    #[test]
    fn test_seed_makes_layout_repeatable() {
        let positions = |engine: &ZooEngine| -> Vec<Vec3> {
            let mut v: Vec<(u32, Vec3)> = engine
                .world
                .query::<&Creature>()
                .iter()
                .map(|(e, c)| (e.id(), c.position))
                .collect();
            v.sort_by_key(|(id, _)| *id);
            v.into_iter().map(|(_, p)| p).collect()
        };

        assert_eq!(positions(&seeded()), positions(&seeded()));
    }
}
