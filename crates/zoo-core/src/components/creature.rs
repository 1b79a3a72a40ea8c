//! The animal record mutated by the motion system.

use serde::{Deserialize, Serialize};

use super::{BoundingSphere, Species, SpeciesTemplate, Vec3};
use crate::models::Model;

/// A wandering animal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Creature {
    pub species: Species,
    pub glyph: String,
    /// Distance moved per tick
    pub speed: f32,
    /// Resting height the bobbing oscillates around
    pub base_height: f32,
    pub position: Vec3,
    /// Unit vector in the ground plane
    pub heading: Vec3,
    /// Rotation about +Y, radians
    pub yaw: f32,
    pub last_heading_change_ms: f64,
    pub model: Model,
    /// Model-space bounds, cached from `model`
    pub bounds: BoundingSphere,
}

impl Creature {
    pub fn new(template: &SpeciesTemplate, model: Model, position: Vec3, heading: Vec3) -> Self {
        let bounds = model.bounding_sphere();
        let mut creature = Self {
            species: template.species,
            glyph: template.glyph.clone(),
            speed: template.speed,
            base_height: 0.0,
            position,
            heading,
            yaw: 0.0,
            last_heading_change_ms: 0.0,
            model,
            bounds,
        };
        creature.face_heading();
        creature
    }

    /// Turn so the model's forward axis (+X) points along the heading
    pub fn face_heading(&mut self) {
        if self.heading.x != 0.0 || self.heading.z != 0.0 {
            self.yaw = (-self.heading.z).atan2(self.heading.x);
        }
    }

    /// Bounding sphere in world space
    pub fn world_bounds(&self) -> BoundingSphere {
        BoundingSphere::new(
            self.position + self.bounds.center.rotate_y(self.yaw),
            self.bounds.radius,
        )
    }

    /// Direction the head points in world space
    pub fn forward(&self) -> Vec3 {
        Vec3::new(1.0, 0.0, 0.0).rotate_y(self.yaw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ModelRegistry;

    fn lion_at(position: Vec3, heading: Vec3) -> Creature {
        let template = SpeciesTemplate::standard(Species::Lion);
        let model = ModelRegistry::default().build(&template);
        Creature::new(&template, model, position, heading)
    }

    #[test]
    fn test_forward_follows_heading() {
        for heading in [
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(-0.6, 0.0, 0.8),
        ] {
            let creature = lion_at(Vec3::ZERO, heading);
            let forward = creature.forward();
            assert!(forward.distance(&heading) < 1e-5, "{:?} vs {:?}", forward, heading);
        }
    }

    #[test]
    fn test_world_bounds_follow_position() {
        let creature = lion_at(Vec3::new(10.0, 0.0, -5.0), Vec3::new(1.0, 0.0, 0.0));
        let bounds = creature.world_bounds();

        assert!(bounds.contains(&Vec3::new(10.0, 1.5, -5.0)));
        assert!(!bounds.contains(&Vec3::ZERO));
    }
}
