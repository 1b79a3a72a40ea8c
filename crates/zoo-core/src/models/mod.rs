//! Procedural models - animals and props assembled from primitive solids.
//!
//! A [`Model`] is a flat group of [`Part`]s, each a primitive [`Shape`] with
//! its own transform relative to the model origin. Renderers turn every part
//! into one mesh parented under the model.
//!
//! Animal models come from a [`ModelRegistry`] that maps each [`Species`]
//! to a builder function. New species register a builder instead of
//! extending a central match.

mod animals;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::components::{BoundingSphere, Color, Species, SpeciesTemplate, Vec3};

pub use animals::*;

/// Primitive solids, all centred on their local origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Cylinder of `length` capped by hemispheres, along +Y
    Capsule { radius: f32, length: f32 },
    Sphere { radius: f32 },
    /// Possibly tapered cylinder along +Y
    Cylinder {
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
    },
    Cuboid { width: f32, height: f32, depth: f32 },
    Dodecahedron { radius: f32 },
    /// Flat quad in the XZ plane
    Plane { width: f32, depth: f32 },
}

impl Shape {
    /// Radius of a sphere around the local origin that encloses the shape
    pub fn bounding_radius(&self) -> f32 {
        match *self {
            Shape::Capsule { radius, length } => radius + length * 0.5,
            Shape::Sphere { radius } => radius,
            Shape::Cylinder {
                radius_top,
                radius_bottom,
                height,
            } => {
                let r = radius_top.max(radius_bottom);
                (r * r + height * height * 0.25).sqrt()
            }
            Shape::Cuboid {
                width,
                height,
                depth,
            } => 0.5 * (width * width + height * height + depth * depth).sqrt(),
            Shape::Dodecahedron { radius } => radius,
            Shape::Plane { width, depth } => 0.5 * (width * width + depth * depth).sqrt(),
        }
    }
}

/// One primitive placed inside a model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub name: String,
    pub shape: Shape,
    pub color: Color,
    /// 1.0 is fully opaque
    pub opacity: f32,
    pub offset: Vec3,
    /// XYZ Euler angles in radians
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Part {
    pub fn new(name: impl Into<String>, shape: Shape, color: Color) -> Self {
        Self {
            name: name.into(),
            shape,
            color,
            opacity: 1.0,
            offset: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }

    pub fn with_offset(mut self, x: f32, y: f32, z: f32) -> Self {
        self.offset = Vec3::new(x, y, z);
        self
    }

    pub fn with_rotation(mut self, x: f32, y: f32, z: f32) -> Self {
        self.rotation = Vec3::new(x, y, z);
        self
    }

    pub fn with_scale(mut self, x: f32, y: f32, z: f32) -> Self {
        self.scale = Vec3::new(x, y, z);
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn is_transparent(&self) -> bool {
        self.opacity < 1.0
    }

    /// Model-space sphere enclosing this part
    pub fn bounding_sphere(&self) -> BoundingSphere {
        BoundingSphere::new(self.offset, self.shape.bounding_radius() * self.scale.max_element())
    }
}

/// A named group of parts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub name: String,
    pub parts: Vec<Part>,
}

impl Model {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parts: Vec::new(),
        }
    }

    pub fn with_part(mut self, part: Part) -> Self {
        self.parts.push(part);
        self
    }

    pub fn push(&mut self, part: Part) {
        self.parts.push(part);
    }

    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    pub fn parts_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Part> + 'a {
        self.parts.iter().filter(move |p| p.name == name)
    }

    /// Sphere enclosing every part, in model space
    pub fn bounding_sphere(&self) -> BoundingSphere {
        let mut spheres = self.parts.iter().map(Part::bounding_sphere);
        match spheres.next() {
            Some(first) => spheres.fold(first, |acc, s| acc.merge(&s)),
            None => BoundingSphere::default(),
        }
    }
}

/// Builds the model for one species from its template
pub type ModelBuilder = fn(&SpeciesTemplate) -> Model;

/// Species → model builder lookup
#[derive(Clone)]
pub struct ModelRegistry {
    builders: HashMap<Species, ModelBuilder>,
}

impl ModelRegistry {
    /// Registry with no builders; everything renders as the basic shape
    pub fn empty() -> Self {
        Self {
            builders: HashMap::new(),
        }
    }

    /// Register (or replace) the builder for a species
    pub fn register(&mut self, species: Species, builder: ModelBuilder) -> Option<ModelBuilder> {
        self.builders.insert(species, builder)
    }

    pub fn contains(&self, species: Species) -> bool {
        self.builders.contains_key(&species)
    }

    pub fn len(&self) -> usize {
        self.builders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.builders.is_empty()
    }

    /// Build the model for a template, falling back to the basic shape
    pub fn build(&self, template: &SpeciesTemplate) -> Model {
        match self.builders.get(&template.species) {
            Some(builder) => builder(template),
            None => {
                log::warn!(
                    "No model builder registered for species '{}', using basic shape",
                    template.species
                );
                build_basic(template)
            }
        }
    }
}

impl Default for ModelRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(Species::Lion, build_lion);
        registry.register(Species::Elephant, build_elephant);
        registry.register(Species::Giraffe, build_giraffe);
        registry.register(Species::Zebra, build_zebra);
        registry.register(Species::Monkey, build_monkey);
        registry
    }
}

impl std::fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut species: Vec<_> = self.builders.keys().map(|s| s.tag()).collect();
        species.sort_unstable();
        f.debug_struct("ModelRegistry").field("species", &species).finish()
    }
}
