//! Headless SPH demo: the default particle block collapses under gravity,
//! gets grabbed by a simulated pointer, then settles again.
//!
//! Run with: cargo run -p sim2d --example splash --release

use std::time::Instant;

use glam::Vec2;
use sim2d::SphSimulation;

const DT: f32 = 1.0 / 60.0;
const SETTLE_FRAMES: usize = 120;
const GRAB_FRAMES: usize = 60;
const RELEASE_FRAMES: usize = 120;

fn main() {
    env_logger::init();

    let mut sim = SphSimulation::new();
    println!("=== Splash ===");
    println!(
        "{} particles, smoothing radius {}, target density {}\n",
        sim.particles.len(),
        sim.params.smoothing_radius,
        sim.params.target_density
    );

    let pointer = Vec2::new(0.0, 200.0);
    let start = Instant::now();

    for frame in 0..SETTLE_FRAMES {
        sim.step(pointer, false, false, DT);
        report(&sim, "settle", frame);
    }
    for frame in 0..GRAB_FRAMES {
        sim.step(pointer, true, false, DT);
        report(&sim, "grab", frame);
    }
    for frame in 0..RELEASE_FRAMES {
        sim.step(pointer, false, false, DT);
        report(&sim, "release", frame);
    }
    let elapsed = start.elapsed();

    let frames = SETTLE_FRAMES + GRAB_FRAMES + RELEASE_FRAMES;
    println!("\n=== Results ===");
    println!(
        "{} frames in {:.2?} ({:.1} frames/s)",
        frames,
        elapsed,
        frames as f64 / elapsed.as_secs_f64()
    );
}

fn report(sim: &SphSimulation, phase: &str, frame: usize) {
    if (frame + 1) % 30 != 0 {
        return;
    }
    let n = sim.particles.len() as f32;
    let mean_density = sim.densities.iter().sum::<f32>() / n;
    let mean_y = sim.particles.iter().map(|p| p.position.y).sum::<f32>() / n;
    let max_speed = sim
        .particles
        .iter()
        .map(|p| p.velocity.length())
        .fold(0.0f32, f32::max);
    println!(
        "{:>7} frame {:>3}: mean density {:.4}, mean y {:>8.2}, max speed {:>8.2}",
        phase,
        frame + 1,
        mean_density,
        mean_y,
        max_speed
    );
}
