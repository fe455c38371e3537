//! Lagrangian SPH fluid solver.
//!
//! Particles carry position and velocity; density and pressure are
//! re-derived every step from predicted positions through the smoothing
//! kernels, with neighbors found via [`spatial::SpatialLookup`]. The force
//! model (shared-pressure symmetrization, density-error pressure) follows
//! Muller et al., "Particle-Based Fluid Simulation for Interactive
//! Applications", SCA 2003.
//!
//! Forces always integrate at a fixed 1/120 s internal step; the caller's
//! frame delta, doubled, only scales the final position advance. The
//! tuning defaults in [`SphParams`] are calibrated against that split.

pub mod kernels;
pub mod spatial;

use glam::Vec2;

use crate::color::speed_color;
use kernels::{density_kernel, density_kernel_slope, viscosity_kernel};
use spatial::SpatialLookup;

/// Per-particle mass. Densities and forces are per unit mass.
const MASS: f32 = 1.0;
/// Fixed force-integration timestep (s).
const FIXED_DT: f32 = 1.0 / 120.0;
/// World rectangle dimensions; particles bounce off the half-extents.
const BOUNDS_WIDTH: f32 = 1920.0;
const BOUNDS_HEIGHT: f32 = 1080.0;
/// Normalizing speed for the display color gradient.
const COLOR_MAX_SPEED: f32 = 100.0;
/// Pressure push direction for exactly coincident particles.
const COINCIDENT_DIR: Vec2 = Vec2::new(
    std::f32::consts::FRAC_1_SQRT_2,
    std::f32::consts::FRAC_1_SQRT_2,
);

/// One fluid particle. `color` is a display value derived from speed at
/// the end of every step, never an input to the dynamics.
#[derive(Clone, Copy, Debug)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub color: [f32; 4],
}

/// Tunable solver parameters.
#[derive(Clone, Copy, Debug)]
pub struct SphParams {
    /// Kernel support radius; doubles as the spatial-hash cell size.
    pub smoothing_radius: f32,
    /// Rest density the pressure term relaxes toward.
    pub target_density: f32,
    /// Scale from density error to pressure.
    pub pressure_multiplier: f32,
    /// Vertical gravity acceleration; negative pulls down (y-up world).
    pub gravity: f32,
    /// Velocity retention on wall bounce, in (0, 1].
    pub collision_damping: f32,
    /// Call-site scale on the viscosity force exchange.
    pub viscosity_strength: f32,
    /// Pointer pull strength; negated while the right button is held.
    pub interaction_strength: f32,
    /// Pointer influence radius in world units.
    pub interaction_radius: f32,
}

impl Default for SphParams {
    fn default() -> Self {
        Self {
            smoothing_radius: 11.0,
            target_density: 20.0,
            pressure_multiplier: 200.0,
            gravity: -100.0,
            collision_damping: 0.9,
            viscosity_strength: 1.0,
            interaction_strength: 300.0,
            interaction_radius: 300.0,
        }
    }
}

/// SPH fluid simulation over a fixed world rectangle.
pub struct SphSimulation {
    pub params: SphParams,
    pub particles: Vec<Particle>,
    /// Positions one fixed step ahead, used for all neighbor math.
    /// Rebuilt at the start of every step.
    pub predicted: Vec<Vec2>,
    /// Per-particle density at the predicted positions.
    pub densities: Vec<f32>,
    lookup: SpatialLookup,
}

impl SphSimulation {
    /// Simulation seeded with the default centered particle block.
    pub fn new() -> Self {
        let mut sim = Self::empty();
        sim.spawn_grid(80, 80, 10.0);
        sim
    }

    /// Simulation with no particles. `step` requires at least one, so
    /// callers spawn before driving it.
    pub fn empty() -> Self {
        Self {
            params: SphParams::default(),
            particles: Vec::new(),
            predicted: Vec::new(),
            densities: Vec::new(),
            lookup: SpatialLookup::new(),
        }
    }

    pub fn spawn_particle(&mut self, position: Vec2, velocity: Vec2) {
        self.particles.push(Particle {
            position,
            velocity,
            color: [1.0; 4],
        });
    }

    /// Seed a `cols` x `rows` block of resting particles centered on the
    /// origin.
    pub fn spawn_grid(&mut self, cols: usize, rows: usize, spacing: f32) {
        let offset = Vec2::new(
            cols as f32 * spacing - spacing,
            rows as f32 * spacing - spacing,
        ) / 2.0;
        for i in 0..cols {
            for j in 0..rows {
                let position = Vec2::new(i as f32 * spacing, j as f32 * spacing) - offset;
                self.spawn_particle(position, Vec2::ZERO);
            }
        }
        log::debug!("seeded {}x{} particle grid, spacing {}", cols, rows, spacing);
    }

    /// Advance one frame.
    ///
    /// `pointer` is the pointer's world position; the left button attracts
    /// particles within the interaction radius, the right button repels
    /// them. Force integration runs on the fixed internal step; positions
    /// advance on the doubled frame delta.
    pub fn step(&mut self, pointer: Vec2, left_down: bool, right_down: bool, dt: f32) {
        assert!(!self.particles.is_empty(), "step requires at least one particle");

        let frame_dt = dt * 2.0;
        let strength = if left_down {
            self.params.interaction_strength
        } else if right_down {
            -self.params.interaction_strength
        } else {
            0.0
        };

        // External forces, then predict where each particle will be one
        // fixed step from now.
        let count = self.particles.len();
        self.predicted.resize(count, Vec2::ZERO);
        for i in 0..count {
            let accel = self.external_force(i, pointer, strength);
            let particle = &mut self.particles[i];
            particle.velocity += accel * FIXED_DT;
            self.predicted[i] = particle.position + particle.velocity * FIXED_DT;
        }

        self.lookup.rebuild(&self.predicted, self.params.smoothing_radius);

        // Densities at predicted positions, then the viscosity exchange.
        // Velocities update in place, so later particles see the already
        // relaxed velocities of earlier ones.
        self.densities.resize(count, 0.0);
        for i in 0..count {
            let density = self.density_at(self.predicted[i]);
            self.densities[i] = density;
            let force = self.viscosity_force(i) * self.params.viscosity_strength;
            self.particles[i].velocity += force * FIXED_DT;
        }

        for i in 0..count {
            let accel = -self.pressure_force(i) / self.densities[i];
            self.particles[i].velocity += accel * FIXED_DT;
        }

        // Position advance on the doubled frame delta, wall bounces, and
        // the display color refresh.
        let half_w = BOUNDS_WIDTH / 2.0;
        let half_h = BOUNDS_HEIGHT / 2.0;
        for particle in &mut self.particles {
            particle.position += particle.velocity * frame_dt;
            if particle.position.x.abs() > half_w {
                particle.position.x = half_w * particle.position.x.signum();
                particle.velocity.x *= -self.params.collision_damping;
            }
            if particle.position.y.abs() > half_h {
                particle.position.y = half_h * particle.position.y.signum();
                particle.velocity.y *= -self.params.collision_damping;
            }
            particle.color = speed_color(particle.velocity, COLOR_MAX_SPEED);
        }
    }

    /// SPH density at a world point, summed over hashed neighbors within
    /// the smoothing radius. Valid after a step has rebuilt the lookup.
    pub fn density_at(&self, point: Vec2) -> f32 {
        let h = self.params.smoothing_radius;
        let sqr_radius = h * h;
        let mut density = 0.0;
        for j in self.lookup.neighbors(point) {
            let sqr_dst = (self.predicted[j] - point).length_squared();
            if sqr_dst <= sqr_radius {
                density += MASS * density_kernel(h, sqr_dst.sqrt());
            }
        }
        density
    }

    /// Shared-pressure force on particle `index`, from the densities and
    /// predicted positions prepared by the current step.
    pub fn pressure_force(&self, index: usize) -> Vec2 {
        let h = self.params.smoothing_radius;
        let sqr_radius = h * h;
        let origin = self.predicted[index];
        let mut force = Vec2::ZERO;
        for j in self.lookup.neighbors(origin) {
            let offset = self.predicted[j] - origin;
            let sqr_dst = offset.length_squared();
            if sqr_dst > sqr_radius || j == index {
                continue;
            }
            let dst = sqr_dst.sqrt();
            // Coincident particles have no direction; push along a fixed
            // diagonal instead of dividing by zero.
            let dir = if dst == 0.0 { COINCIDENT_DIR } else { offset / dst };
            let slope = density_kernel_slope(h, dst);
            let shared = self.shared_pressure(self.densities[j], self.densities[index]);
            force += shared * dir * slope * MASS / self.densities[j];
        }
        force
    }

    fn viscosity_force(&self, index: usize) -> Vec2 {
        let h = self.params.smoothing_radius;
        let sqr_radius = h * h;
        let origin = self.predicted[index];
        let velocity = self.particles[index].velocity;
        let mut force = Vec2::ZERO;
        for j in self.lookup.neighbors(origin) {
            let sqr_dst = (self.predicted[j] - origin).length_squared();
            if sqr_dst <= sqr_radius {
                force += (self.particles[j].velocity - velocity)
                    * viscosity_kernel(h, sqr_dst.sqrt());
            }
        }
        force
    }

    /// Gravity plus the optional pointer interaction, as an acceleration.
    fn external_force(&self, index: usize, pointer: Vec2, strength: f32) -> Vec2 {
        let particle = &self.particles[index];
        let gravity = Vec2::new(0.0, self.params.gravity);

        if strength != 0.0 {
            let offset = pointer - particle.position;
            let sqr_dst = offset.length_squared();
            let radius = self.params.interaction_radius;
            // A pointer exactly on the particle has no direction; the
            // interaction is skipped rather than dividing by zero.
            if sqr_dst < radius * radius && sqr_dst > 0.0 {
                let dst = sqr_dst.sqrt();
                let edge_t = dst / radius;
                let centre_t = 1.0 - edge_t;
                let dir_to_pointer = offset / dst;

                let gravity_weight = 1.0 - centre_t * (strength / 10.0).clamp(0.0, 1.0);
                return gravity * gravity_weight + dir_to_pointer * centre_t * strength
                    - particle.velocity * centre_t;
            }
        }

        gravity
    }

    fn pressure_from_density(&self, density: f32) -> f32 {
        (density - self.params.target_density) * self.params.pressure_multiplier
    }

    fn shared_pressure(&self, density_a: f32, density_b: f32) -> f32 {
        (self.pressure_from_density(density_a) + self.pressure_from_density(density_b)) / 2.0
    }
}

impl Default for SphSimulation {
    fn default() -> Self {
        Self::new()
    }
}
