//! Motion system - wandering, bounds reflection, bobbing and facing

use hecs::World;
use rand::Rng;

use crate::components::Creature;
use crate::config::MotionConfig;
use crate::generation::random_heading;

/// Advance every creature one frame.
///
/// `now_ms` is the wall clock in milliseconds. With `animations_enabled`
/// false nothing is touched.
pub fn tick(
    creatures: &mut [Creature],
    now_ms: f64,
    animations_enabled: bool,
    motion: &MotionConfig,
    rng: &mut impl Rng,
) {
    if !animations_enabled {
        return;
    }

    for creature in creatures.iter_mut() {
        advance_creature(creature, now_ms, motion, rng);
    }
}

/// Same as [`tick`], over every `Creature` in the world
pub fn motion_system(
    world: &mut World,
    now_ms: f64,
    animations_enabled: bool,
    motion: &MotionConfig,
    rng: &mut impl Rng,
) {
    if !animations_enabled {
        return;
    }

    for (_, creature) in world.query_mut::<&mut Creature>() {
        advance_creature(creature, now_ms, motion, rng);
    }
}

/// One frame of wandering for a single creature
pub fn advance_creature(creature: &mut Creature, now_ms: f64, motion: &MotionConfig, rng: &mut impl Rng) {
    if now_ms - creature.last_heading_change_ms > motion.heading_interval_ms {
        creature.heading = random_heading(rng);
        creature.last_heading_change_ms = now_ms;
        // A fresh heading must not point further out of bounds
        steer_inward(creature, motion.bound);
    }

    creature.position += creature.heading * creature.speed;
    steer_inward(creature, motion.bound);

    let bob = (now_ms * motion.bob_frequency).sin() as f32;
    creature.position.y = creature.base_height + bob * motion.bob_amplitude;

    creature.face_heading();
}

/// Point the heading back toward the centre on every axis that left the bounds
fn steer_inward(creature: &mut Creature, bound: f32) {
    let pos = creature.position;
    if pos.x.abs() > bound {
        creature.heading.x = -pos.x.signum() * creature.heading.x.abs();
    }
    if pos.z.abs() > bound {
        creature.heading.z = -pos.z.signum() * creature.heading.z.abs();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Species, SpeciesTemplate, Vec3};
    use crate::models::build_basic;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn creature_at(position: Vec3, heading: Vec3, speed: f32) -> Creature {
        let mut template = SpeciesTemplate::standard(Species::Zebra);
        template.speed = speed;
        Creature::new(&template, build_basic(&template), position, heading)
    }

    #[test]
    fn test_disabled_is_noop() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut creatures = vec![
            creature_at(Vec3::new(1.0, 0.0, 2.0), Vec3::new(1.0, 0.0, 0.0), 0.5),
            creature_at(Vec3::new(90.0, 0.0, -90.0), Vec3::new(0.6, 0.0, -0.8), 0.5),
        ];
        let before = creatures.clone();

        tick(&mut creatures, 10_000.0, false, &MotionConfig::default(), &mut rng);

        assert_eq!(creatures, before);
    }

    #[test]
    fn test_moves_along_heading() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut creatures = vec![creature_at(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0), 0.5)];

        tick(&mut creatures, 0.0, true, &MotionConfig::default(), &mut rng);

        assert_eq!(creatures[0].position.x, 0.0);
        assert!((creatures[0].position.z - 0.5).abs() < 1e-6);
        assert_eq!(creatures[0].heading, Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_heading_waits_for_interval() {
        let mut rng = StdRng::seed_from_u64(3);
        let motion = MotionConfig::default();
        let heading = Vec3::new(1.0, 0.0, 0.0);
        let mut creature = creature_at(Vec3::ZERO, heading, 0.01);

        advance_creature(&mut creature, 3000.0, &motion, &mut rng);
        assert_eq!(creature.heading, heading);
        assert_eq!(creature.last_heading_change_ms, 0.0);

        advance_creature(&mut creature, 3000.5, &motion, &mut rng);
        assert_eq!(creature.last_heading_change_ms, 3000.5);

        let changed = creature.heading;
        advance_creature(&mut creature, 6000.0, &motion, &mut rng);
        assert_eq!(creature.heading, changed);
        assert_eq!(creature.last_heading_change_ms, 3000.5);
    }

    #[test]
    fn test_reflects_at_bound() {
        let mut rng = StdRng::seed_from_u64(4);
        let motion = MotionConfig::default();
        let mut creature = creature_at(Vec3::new(79.5, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0), 1.0);

        advance_creature(&mut creature, 0.0, &motion, &mut rng);
        assert!((creature.position.x - 80.5).abs() < 1e-4);
        assert_eq!(creature.heading.x, -1.0);

        advance_creature(&mut creature, 16.0, &motion, &mut rng);
        assert!((creature.position.x - 79.5).abs() < 1e-4);
        assert_eq!(creature.heading.x, -1.0);
    }

    #[test]
    fn test_heading_already_inward_is_kept() {
        let mut rng = StdRng::seed_from_u64(5);
        let motion = MotionConfig::default();
        let mut creature = creature_at(Vec3::new(-85.0, 0.0, 0.0), Vec3::new(0.6, 0.0, 0.8), 0.1);

        advance_creature(&mut creature, 0.0, &motion, &mut rng);
        assert_eq!(creature.heading.x, 0.6);
        assert!(creature.position.x > -85.0);
    }

    #[test]
    fn test_bobbing_shares_phase() {
        let mut rng = StdRng::seed_from_u64(6);
        let motion = MotionConfig::default();
        let now = 500.0;
        let mut creatures = vec![
            creature_at(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), 0.02),
            creature_at(Vec3::new(20.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0), 0.03),
        ];

        tick(&mut creatures, now, true, &motion, &mut rng);

        let expected = ((now * 0.003).sin() * 0.2) as f32;
        for c in &creatures {
            assert!((c.position.y - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn test_faces_heading_after_tick() {
        let mut rng = StdRng::seed_from_u64(7);
        let motion = MotionConfig::default();
        let mut creatures = vec![creature_at(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), 0.02)];

        for frame in 0..600 {
            tick(&mut creatures, frame as f64 * 16.0, true, &motion, &mut rng);
            let c = &creatures[0];
            assert!(c.forward().distance(&c.heading) < 1e-4);
        }
    }

    #[test]
    fn test_invariants_over_long_run() {
        let mut rng = StdRng::seed_from_u64(8);
        let motion = MotionConfig {
            bound: 5.0,
            heading_interval_ms: 100.0,
            ..Default::default()
        };
        let speed = 0.4;
        let mut creatures: Vec<Creature> = (0..8)
            .map(|i| creature_at(Vec3::new(i as f32 - 4.0, 0.0, 0.0), random_heading(&mut rng), speed))
            .collect();

        for frame in 0..20_000 {
            let now = frame as f64 * 16.0;
            tick(&mut creatures, now, true, &motion, &mut rng);

            for c in &creatures {
                assert!((c.heading.length() - 1.0).abs() < 1e-4);
                assert_eq!(c.heading.y, 0.0);
                assert!(c.position.x.abs() <= motion.bound + speed + 1e-4, "{:?}", c.position);
                assert!(c.position.z.abs() <= motion.bound + speed + 1e-4, "{:?}", c.position);
                assert!(now - c.last_heading_change_ms <= motion.heading_interval_ms + 16.0);
            }
        }
    }

    #[test]
    fn test_motion_system_updates_world() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut world = World::new();
        let entity = world.spawn((creature_at(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), 0.5),));

        motion_system(&mut world, 0.0, true, &MotionConfig::default(), &mut rng);
        assert!((world.get::<&Creature>(entity).unwrap().position.x - 0.5).abs() < 1e-6);

        motion_system(&mut world, 10.0, false, &MotionConfig::default(), &mut rng);
        assert!((world.get::<&Creature>(entity).unwrap().position.x - 0.5).abs() < 1e-6);
    }
}
