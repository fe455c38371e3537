//! Headless disc demo: a block of discs falls into the circular
//! containment boundary and piles up.
//!
//! Run with: cargo run -p sim2d --example disc_drop --release

use std::time::Instant;

use sim2d::VerletSimulation;

const COLS: i32 = 40;
const ROWS: i32 = 40;
const SPACING: i32 = 10;
const RADIUS: f32 = 3.0;
const FRAMES: usize = 360;

fn main() {
    env_logger::init();

    let mut sim = VerletSimulation::new();
    sim.spawn_grid(COLS, ROWS, SPACING, RADIUS);
    println!("=== Disc Drop ===");
    println!(
        "{} discs of radius {}, containment radius {}, {} substeps\n",
        sim.objects.len(),
        RADIUS,
        sim.constraint_radius,
        sim.substeps
    );

    let start = Instant::now();
    for frame in 0..FRAMES {
        sim.step(1.0 / 60.0);

        if (frame + 1) % 60 == 0 {
            let max_dist = sim
                .objects
                .iter()
                .map(|o| (o.position - sim.constraint_center).length())
                .fold(0.0f32, f32::max);
            let mean_speed = sim
                .objects
                .iter()
                .map(|o| o.velocity(1.0 / 165.0).length())
                .sum::<f32>()
                / sim.objects.len() as f32;
            println!(
                "frame {:>3}: max center distance {:>7.2}, mean speed {:>8.2}",
                frame + 1,
                max_dist,
                mean_speed
            );
        }
    }
    let elapsed = start.elapsed();

    println!("\n=== Results ===");
    println!(
        "{} frames ({:.2} s simulated) in {:.2?} ({:.1} frames/s)",
        FRAMES,
        sim.time,
        elapsed,
        FRAMES as f64 / elapsed.as_secs_f64()
    );
}
