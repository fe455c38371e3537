//! Smoothing kernels for the SPH solver.
//!
//! All kernels take the smoothing radius `h` and a center distance `d` and
//! vanish at or beyond `h`. Normalization terms are the closed-form 2-D
//! disc integrals, so each kernel integrates to one over its support.

use std::f32::consts::PI;

/// Density kernel: quadratic spike `(h - d)^2`, normalized by `pi*h^4/6`.
#[inline]
pub fn density_kernel(h: f32, d: f32) -> f32 {
    if d >= h {
        return 0.0;
    }
    let volume = PI * h.powi(4) / 6.0;
    (h - d) * (h - d) / volume
}

/// Slope of [`density_kernel`] with respect to distance. Negative inside
/// the support, zero at and beyond it.
#[inline]
pub fn density_kernel_slope(h: f32, d: f32) -> f32 {
    if d >= h {
        return 0.0;
    }
    let scale = 12.0 / (h.powi(4) * PI);
    (d - h) * scale
}

/// Viscosity kernel: smooth bump `(h^2 - d^2)^3`, normalized by `pi*h^8/4`.
/// The clamped square term is already zero past the support, so no
/// explicit distance guard is needed.
#[inline]
pub fn viscosity_kernel(h: f32, d: f32) -> f32 {
    let volume = PI * h.powi(8) / 4.0;
    let value = (h * h - d * d).max(0.0);
    value * value * value / volume
}
