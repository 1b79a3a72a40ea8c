//! Per-species model builders
//!
//! Every animal faces +X (head forward) with its feet near y = 0.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, FRAC_PI_6, PI};

use super::{Model, Part, Shape};
use crate::components::{Color, SpeciesTemplate};

const BROWN: Color = Color(0x8B4513);

fn cylinder(radius_top: f32, radius_bottom: f32, height: f32) -> Shape {
    Shape::Cylinder {
        radius_top,
        radius_bottom,
        height,
    }
}

fn sphere(radius: f32) -> Shape {
    Shape::Sphere { radius }
}

fn capsule(radius: f32, length: f32) -> Shape {
    Shape::Capsule { radius, length }
}

/// Four legs spread on a circle of `spread` around the body
fn add_legs(model: &mut Model, shape: Shape, color: Color, spread: f32, y: f32) {
    for i in 0..4 {
        let angle = i as f32 * FRAC_PI_2;
        model.push(
            Part::new("leg", shape, color).with_offset(angle.cos() * spread, y, angle.sin() * spread),
        );
    }
}

pub fn build_lion(_template: &SpeciesTemplate) -> Model {
    let coat = Color(0xFFA500);
    let mut model = Model::new("lion")
        .with_part(Part::new("body", capsule(1.5, 3.0), coat).with_offset(0.0, 1.5, 0.0))
        .with_part(Part::new("head", sphere(1.2), coat).with_offset(2.0, 2.5, 0.0))
        .with_part(
            Part::new("mane", sphere(1.4), BROWN)
                .with_offset(2.0, 2.5, 0.0)
                .with_scale(1.1, 1.1, 1.1),
        );

    add_legs(&mut model, cylinder(0.3, 0.3, 2.0), coat, 1.5, 0.5);

    model.push(
        Part::new("tail", cylinder(0.2, 0.1, 2.0), coat)
            .with_offset(-2.5, 1.5, 0.0)
            .with_rotation(0.0, 0.0, FRAC_PI_4),
    );
    model
}

pub fn build_elephant(_template: &SpeciesTemplate) -> Model {
    let hide = Color(0x808080);
    let mut model = Model::new("elephant")
        .with_part(Part::new("body", capsule(2.0, 4.0), hide).with_offset(0.0, 2.0, 0.0))
        .with_part(Part::new("head", sphere(1.8), hide).with_offset(3.0, 2.5, 0.0))
        .with_part(
            Part::new("trunk", cylinder(0.3, 0.1, 2.0), hide)
                .with_offset(4.5, 2.0, 0.0)
                .with_rotation(0.0, 0.0, -FRAC_PI_6),
        );

    add_legs(&mut model, cylinder(0.6, 0.6, 3.0), hide, 2.0, 0.5);

    for side in [-0.5, 0.5] {
        model.push(
            Part::new("ear", sphere(0.8), hide)
                .with_offset(3.0, 3.5, side * 1.5)
                .with_scale(1.0, 0.3, 1.0),
        );
    }
    model
}

pub fn build_giraffe(_template: &SpeciesTemplate) -> Model {
    let coat = Color(0xF4A460);
    let mut model = Model::new("giraffe")
        .with_part(Part::new("body", capsule(1.0, 3.0), coat).with_offset(0.0, 3.0, 0.0))
        .with_part(
            Part::new("neck", cylinder(0.4, 0.6, 4.0), coat)
                .with_offset(1.0, 5.0, 0.0)
                .with_rotation(0.0, 0.0, FRAC_PI_6),
        )
        .with_part(Part::new("head", sphere(0.8), coat).with_offset(2.5, 7.0, 0.0));

    for side in [-0.5, 0.5] {
        model.push(
            Part::new("horn", cylinder(0.1, 0.1, 0.5), BROWN).with_offset(2.5, 7.5, side * 0.3),
        );
    }

    add_legs(&mut model, cylinder(0.3, 0.3, 5.0), coat, 1.5, 1.5);
    model
}

pub fn build_zebra(_template: &SpeciesTemplate) -> Model {
    let coat = Color::WHITE;
    let mut model = Model::new("zebra")
        .with_part(Part::new("body", capsule(1.0, 3.0), coat).with_offset(0.0, 1.5, 0.0));

    for i in 0..8 {
        let stripe = Shape::Cuboid {
            width: 0.1,
            height: 2.0,
            depth: 0.1,
        };
        model.push(
            Part::new("stripe", stripe, Color::BLACK).with_offset((i as f32 - 4.0) * 0.4, 1.5, 0.0),
        );
    }

    model.push(Part::new("head", sphere(0.8), coat).with_offset(2.0, 2.0, 0.0));
    add_legs(&mut model, cylinder(0.2, 0.2, 2.5), coat, 1.5, 0.5);
    model.push(
        Part::new("tail", cylinder(0.1, 0.05, 1.5), Color::BLACK)
            .with_offset(-2.5, 1.5, 0.0)
            .with_rotation(0.0, 0.0, FRAC_PI_4),
    );
    model
}

pub fn build_monkey(_template: &SpeciesTemplate) -> Model {
    let fur = BROWN;
    let mut model = Model::new("monkey")
        .with_part(Part::new("body", sphere(0.8), fur).with_offset(0.0, 1.0, 0.0))
        .with_part(Part::new("head", sphere(0.6), fur).with_offset(0.0, 1.8, 0.0));

    for side in [-0.5, 0.5] {
        model.push(
            Part::new("arm", cylinder(0.2, 0.2, 1.5), fur)
                .with_offset(side * 1.2, 1.2, 0.0)
                .with_rotation(0.0, 0.0, side * PI / 3.0),
        );
    }
    for side in [-0.5, 0.5] {
        model.push(Part::new("leg", cylinder(0.25, 0.25, 1.2), fur).with_offset(side * 0.8, 0.2, 0.0));
    }

    model.push(
        Part::new("tail", cylinder(0.1, 0.05, 2.0), fur)
            .with_offset(0.0, 0.5, -1.0)
            .with_rotation(FRAC_PI_4, 0.0, 0.0),
    );
    model
}

/// Single sphere in the template colour, resting on the ground
pub fn build_basic(template: &SpeciesTemplate) -> Model {
    Model::new("basic").with_part(
        Part::new("body", sphere(template.size), template.color).with_offset(0.0, template.size, 0.0),
    )
}
