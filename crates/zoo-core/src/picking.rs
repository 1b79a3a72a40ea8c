//! Click picking - screen point to world ray, ray against creature bounds

use hecs::{Entity, World};
use serde::{Deserialize, Serialize};

use crate::components::{BoundingSphere, Creature, Vec3};

/// Half-line from `origin` along unit `direction`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Distance along the ray to the first point on the sphere, if any.
    /// An origin inside the sphere reports the exit point.
    pub fn intersect_sphere(&self, sphere: &BoundingSphere) -> Option<f32> {
        let oc = self.origin - sphere.center;
        let b = oc.dot(&self.direction);
        let c = oc.length_squared() - sphere.radius * sphere.radius;
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }

        let root = discriminant.sqrt();
        let near = -b - root;
        let far = -b + root;
        if far < 0.0 {
            None
        } else if near >= 0.0 {
            Some(near)
        } else {
            Some(far)
        }
    }
}

/// Size of the drawing surface in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }

    /// Pixel (origin top-left) to normalised device coordinates (-1..1, y up)
    pub fn to_ndc(&self, screen_x: f32, screen_y: f32) -> (f32, f32) {
        (
            (screen_x / self.width) * 2.0 - 1.0,
            -(screen_y / self.height) * 2.0 + 1.0,
        )
    }
}

/// Perspective camera description used for picking
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees
    pub fov_y_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub const HOME_POSITION: Vec3 = Vec3 { x: 40.0, y: 30.0, z: 40.0 };

    pub fn new(position: Vec3, target: Vec3, fov_y_degrees: f32, aspect: f32) -> Self {
        Self {
            position,
            target,
            up: Vec3::Y,
            fov_y_degrees,
            aspect,
            near: 0.1,
            far: 1000.0,
        }
    }

    /// Starting view over the park, looking at the origin
    pub fn home(aspect: f32) -> Self {
        Self::new(Self::HOME_POSITION, Vec3::ZERO, 75.0, aspect)
    }

    pub fn with_clip(mut self, near: f32, far: f32) -> Self {
        self.near = near;
        self.far = far;
        self
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize()
    }

    /// Camera right and up axes, orthonormal to `forward`
    fn basis(&self) -> (Vec3, Vec3, Vec3) {
        let forward = self.forward();
        let mut right = forward.cross(&self.up).normalize();
        if right == Vec3::ZERO {
            // Looking straight along `up`
            right = Vec3::new(1.0, 0.0, 0.0);
        }
        let up = right.cross(&forward);
        (forward, right, up)
    }

    /// Ray through a point given in normalised device coordinates
    pub fn ray_from_ndc(&self, ndc_x: f32, ndc_y: f32) -> Ray {
        let (forward, right, up) = self.basis();
        let half_height = (self.fov_y_degrees.to_radians() * 0.5).tan();
        let half_width = half_height * self.aspect;

        let direction = forward + right * (ndc_x * half_width) + up * (ndc_y * half_height);
        Ray::new(self.position, direction)
    }

    /// Ray through a pixel of the viewport
    pub fn screen_ray(&self, screen_x: f32, screen_y: f32, viewport: Viewport) -> Ray {
        let (x, y) = viewport.to_ndc(screen_x, screen_y);
        self.ray_from_ndc(x, y)
    }
}

/// Index of the creature whose bounds the ray enters first within `near..=far`
pub fn nearest_hit(ray: &Ray, near: f32, far: f32, creatures: &[Creature]) -> Option<usize> {
    creatures
        .iter()
        .enumerate()
        .filter_map(|(idx, c)| {
            ray.intersect_sphere(&c.world_bounds())
                .filter(|t| (near..=far).contains(t))
                .map(|t| (idx, t))
        })
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(idx, _)| idx)
}

/// Pick the creature under a screen point
pub fn pick(
    screen_x: f32,
    screen_y: f32,
    viewport: Viewport,
    camera: &Camera,
    creatures: &[Creature],
) -> Option<usize> {
    let ray = camera.screen_ray(screen_x, screen_y, viewport);
    nearest_hit(&ray, camera.near, camera.far, creatures)
}

/// Pick among the creature entities of a world
pub fn pick_entity(world: &World, camera: &Camera, ray: &Ray) -> Option<Entity> {
    let mut closest: Option<(Entity, f32)> = None;

    for (entity, creature) in world.query::<&Creature>().iter() {
        let Some(t) = ray.intersect_sphere(&creature.world_bounds()) else {
            continue;
        };
        if t < camera.near || t > camera.far {
            continue;
        }
        if closest.map_or(true, |(_, best)| t < best) {
            closest = Some((entity, t));
        }
    }

    closest.map(|(e, _)| e)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Species, SpeciesTemplate};
    use crate::models::ModelRegistry;

    fn creature(species: Species, position: Vec3) -> Creature {
        let template = SpeciesTemplate::standard(species);
        let model = ModelRegistry::default().build(&template);
        Creature::new(&template, model, position, Vec3::new(1.0, 0.0, 0.0))
    }

    #[test]
    fn test_ray_sphere() {
        let sphere = BoundingSphere::new(Vec3::new(0.0, 0.0, -10.0), 2.0);

        let hit = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        assert!((hit.intersect_sphere(&sphere).unwrap() - 8.0).abs() < 1e-5);

        let miss = Ray::new(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0));
        assert!(miss.intersect_sphere(&sphere).is_none());

        let behind = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0));
        assert!(behind.intersect_sphere(&sphere).is_none());

        let inside = Ray::new(Vec3::new(0.0, 0.0, -10.0), Vec3::new(0.0, 0.0, 1.0));
        assert!((inside.intersect_sphere(&sphere).unwrap() - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_viewport_ndc() {
        let viewport = Viewport::new(800.0, 600.0);
        assert_eq!(viewport.to_ndc(400.0, 300.0), (0.0, 0.0));
        assert_eq!(viewport.to_ndc(0.0, 0.0), (-1.0, 1.0));
        assert_eq!(viewport.to_ndc(800.0, 600.0), (1.0, -1.0));
    }

    #[test]
    fn test_center_ray_looks_at_target() {
        let camera = Camera::home(16.0 / 9.0);
        let ray = camera.ray_from_ndc(0.0, 0.0);
        assert!(ray.direction.distance(&camera.forward()) < 1e-5);
        assert_eq!(ray.origin, Camera::HOME_POSITION);
    }

    #[test]
    fn test_corner_ray_matches_fov() {
        let camera = Camera::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), 90.0, 2.0);
        let ray = camera.ray_from_ndc(1.0, 1.0);
        // tan(45°) = 1, so the top-right corner sits at (2, 1, -1)
        let expected = Vec3::new(2.0, 1.0, -1.0).normalize();
        assert!(ray.direction.distance(&expected) < 1e-5);
    }

    #[test]
    fn test_pick_center_hits_creature_at_target() {
        let viewport = Viewport::new(1280.0, 720.0);
        let camera = Camera::home(viewport.aspect());
        let creatures = vec![
            creature(Species::Monkey, Vec3::new(-60.0, 0.0, 60.0)),
            creature(Species::Lion, Vec3::ZERO),
        ];

        let picked = pick(640.0, 360.0, viewport, &camera, &creatures);
        assert_eq!(picked, Some(1));
        assert_eq!(creatures[picked.unwrap()].species, Species::Lion);
    }

    #[test]
    fn test_pick_empty_sky_returns_none() {
        let viewport = Viewport::new(1280.0, 720.0);
        let camera = Camera::home(viewport.aspect());
        let creatures = vec![creature(Species::Lion, Vec3::ZERO)];

        // Top edge of the screen points well above the ground
        assert_eq!(pick(640.0, 0.0, viewport, &camera, &creatures), None);
        assert_eq!(pick(640.0, 360.0, viewport, &camera, &[]), None);
    }

    #[test]
    fn test_pick_nearest_of_overlapping() {
        let camera = Camera::new(Vec3::new(0.0, 2.0, 50.0), Vec3::new(0.0, 2.0, 0.0), 60.0, 1.0);
        let creatures = vec![
            creature(Species::Elephant, Vec3::new(0.0, 0.0, -10.0)),
            creature(Species::Zebra, Vec3::new(0.0, 0.0, 20.0)),
        ];

        let ray = camera.ray_from_ndc(0.0, 0.0);
        assert_eq!(nearest_hit(&ray, camera.near, camera.far, &creatures), Some(1));
    }

    #[test]
    fn test_far_plane_limits_pick() {
        let camera = Camera::new(Vec3::new(0.0, 2.0, 50.0), Vec3::new(0.0, 2.0, 0.0), 60.0, 1.0)
            .with_clip(0.1, 10.0);
        let creatures = vec![creature(Species::Zebra, Vec3::ZERO)];
        let ray = camera.ray_from_ndc(0.0, 0.0);
        assert_eq!(nearest_hit(&ray, camera.near, camera.far, &creatures), None);
    }

    #[test]
    fn test_pick_entity_in_world() {
        let mut world = World::new();
        let _far = world.spawn((creature(Species::Giraffe, Vec3::new(-20.0, 0.0, -20.0)),));
        let near = world.spawn((creature(Species::Zebra, Vec3::new(10.0, 0.0, 10.0)),));

        let camera = Camera::home(1.0);
        let ray = Ray::new(camera.position, Vec3::new(10.0, 1.5, 10.0) - camera.position);
        assert_eq!(pick_entity(&world, &camera, &ray), Some(near));

        let up = Ray::new(camera.position, Vec3::Y);
        assert_eq!(pick_entity(&world, &camera, &up), None);
    }
}
