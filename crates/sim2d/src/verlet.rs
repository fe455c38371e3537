//! Position-Verlet rigid-disc solver.
//!
//! Discs store current and previous positions; velocity is always derived
//! from their difference, never stored. Collisions apply positional
//! correction only, and every disc stays inside a circular containment
//! boundary. The frame always advances by a fixed internal delta split
//! into equal substeps, regardless of the caller's timing.

use glam::Vec2;

use crate::color::speed_color;

/// Fixed frame delta (s); `step` ignores the caller's dt entirely.
const FRAME_DT: f32 = 1.0 / 165.0;
/// Fraction of the remaining overlap corrected per collision pass.
const RESPONSE_COEF: f32 = 0.75;
/// Center distances below this leave a colliding pair uncorrected, since
/// coincident centers have no usable normal.
const MIN_SEPARATION: f32 = 1e-4;
/// Squared reach of a pointer impulse.
const POINTER_REACH_SQ: f32 = 10_000.0;
/// Divisor turning a pointer offset into an added velocity.
const POINTER_PULL_DIVISOR: f32 = 5.0;
/// Normalizing speed for the display color gradient.
const COLOR_MAX_SPEED: f32 = 50.0;

/// A rigid disc under position-Verlet integration.
#[derive(Clone, Copy, Debug)]
pub struct VerletObject {
    pub position: Vec2,
    pub last_position: Vec2,
    pub acceleration: Vec2,
    pub radius: f32,
    pub color: [f32; 4],
}

impl VerletObject {
    /// Disc at rest: the previous position equals the current one.
    pub fn new(position: Vec2, radius: f32) -> Self {
        Self {
            position,
            last_position: position,
            acceleration: Vec2::ZERO,
            radius,
            color: [1.0; 4],
        }
    }

    /// Position-Verlet update: advance by the previous displacement plus
    /// the accumulated acceleration, then clear the acceleration.
    pub fn update(&mut self, dt: f32) {
        let displacement = self.position - self.last_position;
        self.last_position = self.position;
        self.position += displacement + self.acceleration * (dt * dt);
        self.acceleration = Vec2::ZERO;
    }

    pub fn accelerate(&mut self, a: Vec2) {
        self.acceleration += a;
    }

    /// Overwrite the derived velocity by moving the previous position.
    pub fn set_velocity(&mut self, v: Vec2, dt: f32) {
        self.last_position = self.position - v * dt;
    }

    /// Add to the derived velocity by moving the previous position.
    pub fn add_velocity(&mut self, v: Vec2, dt: f32) {
        self.last_position -= v * dt;
    }

    /// Velocity implied by the stored position pair over `dt`.
    pub fn velocity(&self, dt: f32) -> Vec2 {
        (self.position - self.last_position) / dt
    }
}

/// Disc simulation inside a circular containment boundary.
pub struct VerletSimulation {
    pub objects: Vec<VerletObject>,
    pub gravity: Vec2,
    pub substeps: u32,
    pub constraint_center: Vec2,
    pub constraint_radius: f32,
    /// Simulated time accumulated by `step`.
    pub time: f32,
}

impl VerletSimulation {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            gravity: Vec2::new(0.0, 1000.0),
            substeps: 8,
            constraint_center: Vec2::ZERO,
            constraint_radius: 300.0,
            time: 0.0,
        }
    }

    /// Append a disc at rest and hand back a reference for further
    /// configuration. The disc must fit inside the containment circle.
    pub fn add_object(&mut self, position: Vec2, radius: f32) -> &mut VerletObject {
        assert!(radius < self.constraint_radius,
            "disc radius {} does not fit inside containment radius {}",
            radius, self.constraint_radius);
        self.objects.push(VerletObject::new(position, radius));
        let last = self.objects.len() - 1;
        &mut self.objects[last]
    }

    /// Seed a centered block of equal-radius discs on an integer lattice.
    pub fn spawn_grid(&mut self, cols: i32, rows: i32, spacing: i32, radius: f32) {
        for x in 0..cols {
            for y in 0..rows {
                let position = Vec2::new(
                    (x * spacing - cols * spacing / 2) as f32,
                    (y * spacing - rows * spacing / 2) as f32,
                );
                self.add_object(position, radius);
            }
        }
        log::debug!("seeded {}x{} disc grid, radius {}", cols, rows, radius);
    }

    /// Advance one display frame. The caller's `_dt` is deliberately
    /// unused: the solver always advances by its fixed internal frame,
    /// split into `substeps` equal sub-deltas.
    pub fn step(&mut self, _dt: f32) {
        self.time += FRAME_DT;

        let step_dt = FRAME_DT / self.substeps as f32;
        for _ in 0..self.substeps {
            self.apply_gravity();
            self.resolve_collisions();
            self.apply_constraint();
            self.integrate(step_dt);
        }

        for object in &mut self.objects {
            object.color = speed_color(object.velocity(FRAME_DT), COLOR_MAX_SPEED);
        }
    }

    /// Pull every disc within reach of `point` toward it. Driven by the
    /// input layer while a pointer button is held.
    pub fn apply_pointer_impulse(&mut self, point: Vec2) {
        for object in &mut self.objects {
            let diff = point - object.position;
            if diff.length_squared() < POINTER_REACH_SQ {
                object.add_velocity(diff / POINTER_PULL_DIVISOR, FRAME_DT);
            }
        }
    }

    fn apply_gravity(&mut self) {
        for object in &mut self.objects {
            object.accelerate(self.gravity);
        }
    }

    /// One positional-correction pass over all unordered pairs. Each disc
    /// of an overlapping pair moves along the pair normal by the *other*
    /// disc's share of the combined radius, scaled by the response
    /// coefficient; velocities change only through the Verlet history.
    pub fn resolve_collisions(&mut self) {
        let count = self.objects.len();
        for i in 0..count {
            for k in i + 1..count {
                let v = self.objects[i].position - self.objects[k].position;
                let dist2 = v.length_squared();
                let min_dist = self.objects[i].radius + self.objects[k].radius;
                if dist2 < min_dist * min_dist && dist2 > MIN_SEPARATION * MIN_SEPARATION {
                    let dist = dist2.sqrt();
                    let n = v / dist;
                    let mass_ratio_i = self.objects[i].radius / min_dist;
                    let mass_ratio_k = self.objects[k].radius / min_dist;
                    // dist < min_dist here, so delta is negative and the
                    // pushes below separate the pair.
                    let delta = 0.5 * RESPONSE_COEF * (dist - min_dist);
                    self.objects[i].position -= n * (mass_ratio_k * delta);
                    self.objects[k].position += n * (mass_ratio_i * delta);
                }
            }
        }
    }

    /// Project every escaping disc back onto the containment boundary
    /// along the radial direction. An inward clamp, not energy-conserving.
    fn apply_constraint(&mut self) {
        for object in &mut self.objects {
            let v = self.constraint_center - object.position;
            let dist = v.length();
            if dist > self.constraint_radius - object.radius {
                let n = v / dist;
                object.position =
                    self.constraint_center - n * (self.constraint_radius - object.radius);
            }
        }
    }

    fn integrate(&mut self, dt: f32) {
        for object in &mut self.objects {
            object.update(dt);
        }
    }
}

impl Default for VerletSimulation {
    fn default() -> Self {
        Self::new()
    }
}
