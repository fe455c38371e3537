//! Scenario tests for the Verlet disc solver.
//!
//! Discs are dropped, piled, and poked, then checked against containment,
//! separation, and timing guarantees over multi-frame runs.
//!
//! Run with: cargo test -p sim2d --test verlet_tests

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sim2d::VerletSimulation;

/// Containment slack: between the constraint pass and the end of a frame
/// one substep of integration can overshoot the boundary slightly.
const BOUNDARY_SLACK: f32 = 5.0;

#[test]
fn dropped_disc_never_escapes_containment() {
    let mut sim = VerletSimulation::new();
    sim.add_object(Vec2::new(0.0, -200.0), 10.0);

    let limit = sim.constraint_radius - 10.0 + BOUNDARY_SLACK;
    for frame in 0..500 {
        sim.step(1.0 / 60.0);
        let dist = (sim.objects[0].position - sim.constraint_center).length();
        assert!(dist <= limit,
            "disc left the containment circle on frame {}: dist {}", frame, dist);
        assert!(sim.objects[0].position.is_finite(), "position went non-finite on frame {}", frame);
    }
}

#[test]
fn dropped_disc_comes_to_rest_on_the_boundary() {
    let mut sim = VerletSimulation::new();
    sim.add_object(Vec2::new(0.0, 0.0), 10.0);

    for _ in 0..600 {
        sim.step(1.0 / 60.0);
    }
    let object = &sim.objects[0];
    let dist = (object.position - sim.constraint_center).length();
    assert!((dist - 290.0).abs() < 2.0,
        "disc should settle on the containment boundary, got dist {}", dist);
    assert!(object.velocity(1.0 / 165.0).length() < 50.0,
        "settled disc should be slow, got {:?}", object.velocity(1.0 / 165.0));
}

#[test]
fn grid_drop_settles_without_deep_overlap() {
    let mut sim = VerletSimulation::new();
    sim.spawn_grid(10, 10, 10, 3.0);

    let limit = sim.constraint_radius - 3.0 + BOUNDARY_SLACK;
    for frame in 0..400 {
        sim.step(1.0 / 60.0);
        for (i, object) in sim.objects.iter().enumerate() {
            assert!(object.position.is_finite(),
                "disc {} went non-finite on frame {}", i, frame);
            let dist = (object.position - sim.constraint_center).length();
            assert!(dist <= limit, "disc {} escaped on frame {}: dist {}", i, frame, dist);
        }
    }

    let count = sim.objects.len();
    for i in 0..count {
        for k in i + 1..count {
            let gap = (sim.objects[i].position - sim.objects[k].position).length();
            let min_dist = sim.objects[i].radius + sim.objects[k].radius;
            assert!(gap > min_dist - 1.5,
                "settled discs {} and {} interpenetrate: gap {} vs {}", i, k, gap, min_dist);
        }
    }
}

#[test]
fn mixed_radius_pile_stays_contained() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut sim = VerletSimulation::new();
    for i in 0..80 {
        let position = Vec2::new(
            (i % 10 * 14) as f32 - 70.0,
            (i / 10 * 14) as f32 - 120.0,
        );
        sim.add_object(position, rng.gen_range(2.0..6.0));
    }

    for frame in 0..300 {
        sim.step(1.0 / 60.0);
        for (i, object) in sim.objects.iter().enumerate() {
            assert!(object.position.is_finite(),
                "disc {} went non-finite on frame {}", i, frame);
            let dist = (object.position - sim.constraint_center).length();
            assert!(dist <= sim.constraint_radius - object.radius + BOUNDARY_SLACK,
                "disc {} escaped on frame {}: dist {}", i, frame, dist);
        }
    }

    // Large discs push small ones; none should end up swallowed.
    let count = sim.objects.len();
    for i in 0..count {
        for k in i + 1..count {
            let gap = (sim.objects[i].position - sim.objects[k].position).length();
            let min_dist = sim.objects[i].radius + sim.objects[k].radius;
            assert!(gap > min_dist - 1.5,
                "settled discs {} and {} interpenetrate: gap {} vs {}", i, k, gap, min_dist);
        }
    }
}

#[test]
fn pointer_impulse_drags_a_disc() {
    let mut sim = VerletSimulation::new();
    sim.add_object(Vec2::ZERO, 10.0);

    for _ in 0..30 {
        sim.apply_pointer_impulse(Vec2::new(50.0, 0.0));
        sim.step(1.0 / 60.0);
    }
    assert!(sim.objects[0].position.x > 2.0,
        "repeated impulses should drag the disc toward the pointer, got x = {}",
        sim.objects[0].position.x);
}

#[test]
fn pointer_impulse_ignores_distant_discs() {
    let mut sim = VerletSimulation::new();
    sim.add_object(Vec2::new(-200.0, 0.0), 10.0);

    let before = sim.objects[0];
    sim.apply_pointer_impulse(Vec2::new(200.0, 0.0));
    assert_eq!(sim.objects[0].last_position, before.last_position,
        "impulse reach is 100 units; a disc 400 away must be untouched");
}

#[test]
fn time_advances_by_fixed_frames_only() {
    let mut sim = VerletSimulation::new();
    sim.add_object(Vec2::ZERO, 10.0);

    for dt in [0.5f32, 0.001, 7.0, 1.0 / 60.0] {
        for _ in 0..25 {
            sim.step(dt);
        }
    }
    let expected = 100.0 / 165.0;
    assert!((sim.time - expected).abs() < 1e-3,
        "100 frames should accumulate 100/165 s, got {}", sim.time);
}
