//! Speed-to-color mapping shared by the particle solvers.
//!
//! Renderers color particles by how fast they move; both the SPH and disc
//! solvers refresh their display colors through [`speed_color`] at the end
//! of every step.

use glam::{Vec2, Vec3};

/// Gradient stops from slowest to fastest.
const STOPS: [Vec3; 6] = [
    Vec3::new(0.0, 0.0, 1.0), // blue
    Vec3::new(0.0, 1.0, 1.0), // cyan
    Vec3::new(0.0, 0.5, 1.0), // azure
    Vec3::new(1.0, 1.0, 0.0), // yellow
    Vec3::new(1.0, 0.5, 0.0), // orange
    Vec3::new(1.0, 0.0, 0.0), // red
];

/// Map a velocity to an RGBA color on the speed gradient.
///
/// Speed is normalized by `max_speed` and split into five equal bands;
/// within a band the two surrounding stops mix linearly. The mix is not
/// clamped above `max_speed`, so speeds past the gradient's end
/// extrapolate beyond the last stop.
pub fn speed_color(velocity: Vec2, max_speed: f32) -> [f32; 4] {
    let t = velocity.length() / max_speed;

    let rgb = if t < 0.2 {
        STOPS[0].lerp(STOPS[1], t * 5.0)
    } else if t < 0.4 {
        STOPS[1].lerp(STOPS[2], (t - 0.2) * 5.0)
    } else if t < 0.6 {
        STOPS[2].lerp(STOPS[3], (t - 0.4) * 5.0)
    } else if t < 0.8 {
        STOPS[3].lerp(STOPS[4], (t - 0.6) * 5.0)
    } else {
        STOPS[4].lerp(STOPS[5], (t - 0.8) * 5.0)
    };

    [rgb.x, rgb.y, rgb.z, 1.0]
}
