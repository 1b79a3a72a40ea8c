//! Scenery generation - ground, trees, rocks, ponds and hills

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::components::{Color, Vec3};
use crate::models::{Model, Part, Shape};

/// Configuration for scenery generation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneryConfig {
    /// Edge length of the square ground plane
    pub ground_size: f32,
    pub tree_count: u32,
    /// Trees are scattered over a square of this edge length
    pub tree_spread: f32,
    pub rock_count: u32,
    pub rock_spread: f32,
    /// Pond centres as (x, z)
    pub ponds: Vec<(f32, f32)>,
    pub hill_count: u32,
    pub hill_spread: f32,
}

impl Default for SceneryConfig {
    fn default() -> Self {
        Self {
            ground_size: 200.0,
            tree_count: 40,
            tree_spread: 160.0,
            rock_count: 20,
            rock_spread: 120.0,
            ponds: vec![(30.0, -40.0), (-30.0, 40.0), (60.0, 20.0)],
            hill_count: 5,
            hill_spread: 120.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropKind {
    Ground,
    Tree,
    Rock,
    Pond,
    Hill,
}

/// A static piece of scenery placed in the world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prop {
    pub kind: PropKind,
    pub position: Vec3,
    pub model: Model,
}

/// All static scenery of a park
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scenery {
    pub props: Vec<Prop>,
}

impl Scenery {
    pub fn count(&self, kind: PropKind) -> usize {
        self.props.iter().filter(|p| p.kind == kind).count()
    }

    pub fn iter_kind(&self, kind: PropKind) -> impl Iterator<Item = &Prop> + '_ {
        self.props.iter().filter(move |p| p.kind == kind)
    }
}

/// Random point in a square of edge `spread` centred on the origin
fn scatter(rng: &mut impl Rng, spread: f32) -> (f32, f32) {
    (
        (rng.gen::<f32>() - 0.5) * spread,
        (rng.gen::<f32>() - 0.5) * spread,
    )
}

/// Generate the park's scenery
pub fn build_scenery(config: &SceneryConfig, rng: &mut impl Rng) -> Scenery {
    let mut props = Vec::new();

    props.push(ground(config.ground_size));

    for _ in 0..config.tree_count {
        let (x, z) = scatter(rng, config.tree_spread);
        props.push(tree(x, z));
    }

    for _ in 0..config.rock_count {
        let (x, z) = scatter(rng, config.rock_spread);
        props.push(rock(x, z, rng));
    }

    for &(x, z) in &config.ponds {
        props.push(pond(x, z));
    }

    for _ in 0..config.hill_count {
        let (x, z) = scatter(rng, config.hill_spread);
        props.push(hill(x, z, rng));
    }

    Scenery { props }
}

fn ground(size: f32) -> Prop {
    let plane = Shape::Plane {
        width: size,
        depth: size,
    };
    Prop {
        kind: PropKind::Ground,
        position: Vec3::ZERO,
        model: Model::new("ground").with_part(Part::new("grass", plane, Color(0x90EE90))),
    }
}

fn tree(x: f32, z: f32) -> Prop {
    let trunk = Shape::Cylinder {
        radius_top: 0.5,
        radius_bottom: 0.8,
        height: 4.0,
    };
    Prop {
        kind: PropKind::Tree,
        position: Vec3::new(x, 0.0, z),
        model: Model::new("tree")
            .with_part(Part::new("trunk", trunk, Color(0x8B4513)).with_offset(0.0, 2.0, 0.0))
            .with_part(
                Part::new("leaves", Shape::Sphere { radius: 3.0 }, Color(0x228B22))
                    .with_offset(0.0, 6.0, 0.0),
            ),
    }
}

fn rock(x: f32, z: f32, rng: &mut impl Rng) -> Prop {
    let radius = 1.0 + rng.gen::<f32>() * 2.0;
    let pi = std::f32::consts::PI;
    let (rx, ry, rz) = (rng.gen::<f32>() * pi, rng.gen::<f32>() * pi, rng.gen::<f32>() * pi);
    Prop {
        kind: PropKind::Rock,
        position: Vec3::new(x, 0.0, z),
        model: Model::new("rock").with_part(
            Part::new("stone", Shape::Dodecahedron { radius }, Color(0x696969))
                .with_offset(0.0, 1.0, 0.0)
                .with_rotation(rx, ry, rz),
        ),
    }
}

fn pond(x: f32, z: f32) -> Prop {
    let water = Shape::Cylinder {
        radius_top: 8.0,
        radius_bottom: 8.0,
        height: 0.5,
    };
    Prop {
        kind: PropKind::Pond,
        position: Vec3::new(x, 0.0, z),
        model: Model::new("pond").with_part(
            Part::new("water", water, Color(0x4169E1))
                .with_offset(0.0, 0.25, 0.0)
                .with_opacity(0.7),
        ),
    }
}

fn hill(x: f32, z: f32, rng: &mut impl Rng) -> Prop {
    let radius = 15.0 + rng.gen::<f32>() * 10.0;
    let y = 5.0 + rng.gen::<f32>() * 5.0;
    Prop {
        kind: PropKind::Hill,
        position: Vec3::new(x, y, z),
        model: Model::new("hill").with_part(
            Part::new("mound", Shape::Sphere { radius }, Color(0x8FBC8F))
                .with_scale(1.0, 0.5, 1.0)
                .with_opacity(0.8),
        ),
    }
}
