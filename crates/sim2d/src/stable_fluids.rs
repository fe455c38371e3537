//! Eulerian grid fluid solver.
//!
//! Semi-Lagrangian "stable fluids" scheme on a dense W x H grid: velocity
//! diffusion, pressure projection, advection, then density diffusion and
//! transport. After Stam, "Real-Time Fluid Dynamics for Games", GDC 2003.
//!
//! The field routines are free functions taking explicit field references,
//! so each stage's inputs and outputs stay visible at the call site and
//! nothing aliases through hidden state.

/// Boundary treatment applied by [`set_bound`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Boundary {
    /// Mirror edge values without negation (density, pressure, divergence).
    Scalar,
    /// Negate across the left/right walls (horizontal velocity).
    VelocityX,
    /// Negate across the top/bottom walls (vertical velocity).
    VelocityY,
}

/// Dense scalar field over a W x H cell grid.
///
/// Indexing clamps both coordinates to the grid, so out-of-range reads hit
/// the nearest edge cell and out-of-range writes pile onto it. Stamps and
/// advection rely on that instead of bounds checks.
#[derive(Clone, Debug)]
pub struct Field {
    width: i32,
    height: i32,
    data: Vec<f32>,
}

impl Field {
    /// Zero-filled field. Dimensions below 3 leave no interior cells, so
    /// they are rejected outright.
    pub fn new(width: i32, height: i32) -> Self {
        assert!(width >= 3 && height >= 3,
            "field needs a non-empty interior, got {}x{}", width, height);
        Self {
            width,
            height,
            data: vec![0.0; (width * height) as usize],
        }
    }

    #[inline]
    fn idx(&self, x: i32, y: i32) -> usize {
        let x = x.clamp(0, self.width - 1);
        let y = y.clamp(0, self.height - 1);
        (x + y * self.width) as usize
    }

    #[inline]
    pub fn get(&self, x: i32, y: i32) -> f32 {
        self.data[self.idx(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: i32, y: i32, value: f32) {
        let i = self.idx(x, y);
        self.data[i] = value;
    }

    #[inline]
    pub fn add(&mut self, x: i32, y: i32, value: f32) {
        let i = self.idx(x, y);
        self.data[i] += value;
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Raw row-major cell values, for renderers and diagnostics.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }
}

/// Grid fluid simulation holding the six parallel fields.
///
/// The `*_prev` fields are both history and solver scratch: every stage
/// writes into one of them, and `step` swaps roles between the pairs
/// rather than allocating.
pub struct StableFluidsSimulation {
    pub density: Field,
    pub density_prev: Field,
    pub vel_x: Field,
    pub vel_y: Field,
    pub vel_x_prev: Field,
    pub vel_y_prev: Field,
    /// Cell edge length in world units, for display placement.
    pub scale: i32,
    /// Density diffusion rate.
    pub diffusion: f32,
    /// Velocity diffusion rate.
    pub viscosity: f32,
    /// Gauss-Seidel passes per linear solve.
    pub iterations: usize,
}

impl StableFluidsSimulation {
    pub fn new(
        width: i32,
        height: i32,
        scale: i32,
        diffusion: f32,
        viscosity: f32,
        iterations: usize,
    ) -> Self {
        log::debug!("allocating {}x{} fluid grid", width, height);
        Self {
            density: Field::new(width, height),
            density_prev: Field::new(width, height),
            vel_x: Field::new(width, height),
            vel_y: Field::new(width, height),
            vel_x_prev: Field::new(width, height),
            vel_y_prev: Field::new(width, height),
            scale,
            diffusion,
            viscosity,
            iterations,
        }
    }

    pub fn width(&self) -> i32 {
        self.density.width()
    }

    pub fn height(&self) -> i32 {
        self.density.height()
    }

    /// Reallocate all six fields at the new dimensions, zero-filled.
    /// Prior contents are discarded wholesale; no partial state survives.
    pub fn resize(&mut self, width: i32, height: i32) {
        log::debug!("resizing fluid grid to {}x{}", width, height);
        self.density = Field::new(width, height);
        self.density_prev = Field::new(width, height);
        self.vel_x = Field::new(width, height);
        self.vel_y = Field::new(width, height);
        self.vel_x_prev = Field::new(width, height);
        self.vel_y_prev = Field::new(width, height);
    }

    /// Additively stamp a disc of dye into the density field. Cells whose
    /// squared distance from (x, y) exceeds radius^2 are untouched;
    /// off-grid cells clamp onto the nearest edge cell.
    pub fn add_density(&mut self, x: i32, y: i32, radius: i32, amount: f32) {
        let r2 = radius * radius;
        for i in (x - radius)..=(x + radius) {
            for j in (y - radius)..=(y + radius) {
                if (i - x) * (i - x) + (j - y) * (j - y) <= r2 {
                    self.density.add(i, j, amount);
                }
            }
        }
    }

    /// Additively stamp a disc of velocity into both velocity fields.
    pub fn add_velocity(&mut self, x: i32, y: i32, radius: i32, amount_x: f32, amount_y: f32) {
        let r2 = radius * radius;
        for i in (x - radius)..=(x + radius) {
            for j in (y - radius)..=(y + radius) {
                if (i - x) * (i - x) + (j - y) * (j - y) <= r2 {
                    self.vel_x.add(i, j, amount_x);
                    self.vel_y.add(i, j, amount_y);
                }
            }
        }
    }

    /// Advance the whole field one frame. The stage order is fixed; each
    /// stage consumes the previous one's output:
    ///
    /// 1. diffuse velocity into the previous-velocity pair
    /// 2. project the diffused pair (current pair is solver scratch)
    /// 3. advect velocity along the projected field
    /// 4. project again to clear the divergence advection introduced
    /// 5. diffuse density into previous density
    /// 6. advect density along the current velocity
    pub fn step(&mut self, dt: f32) {
        diffuse(Boundary::VelocityX, &mut self.vel_x_prev, &self.vel_x,
            self.viscosity, dt, self.iterations);
        diffuse(Boundary::VelocityY, &mut self.vel_y_prev, &self.vel_y,
            self.viscosity, dt, self.iterations);

        project(&mut self.vel_x_prev, &mut self.vel_y_prev,
            &mut self.vel_x, &mut self.vel_y, self.iterations);

        advect(Boundary::VelocityX, &mut self.vel_x, &self.vel_x_prev,
            &self.vel_x_prev, &self.vel_y_prev, dt);
        advect(Boundary::VelocityY, &mut self.vel_y, &self.vel_y_prev,
            &self.vel_x_prev, &self.vel_y_prev, dt);

        project(&mut self.vel_x, &mut self.vel_y,
            &mut self.vel_x_prev, &mut self.vel_y_prev, self.iterations);

        diffuse(Boundary::Scalar, &mut self.density_prev, &self.density,
            self.diffusion, dt, self.iterations);
        advect(Boundary::Scalar, &mut self.density, &self.density_prev,
            &self.vel_x, &self.vel_y, dt);
    }

    /// Display color for a cell: the mean absolute velocity tints the red
    /// and green channels over a fixed blue base.
    pub fn cell_color(&self, x: i32, y: i32) -> [f32; 4] {
        let avg = (self.vel_x.get(x, y).abs() + self.vel_y.get(x, y).abs()) / 2.0;
        [avg / 3.0 + 0.2, avg / 2.0 + 0.3, 0.8, 1.0]
    }

    /// World-space center of a cell's display quad, on a grid centered at
    /// the origin with `scale` units per cell.
    pub fn cell_center(&self, x: i32, y: i32) -> (f32, f32) {
        (
            (x - self.width() / 2) as f32 * self.scale as f32,
            (y - self.height() / 2) as f32 * self.scale as f32,
        )
    }
}

/// Diffuse `src` into `dst` at the given rate. The coefficient scales by
/// `(W-2) * (2H)`; the height term is doubled while the width term is
/// not, and the downstream rate constants assume exactly this scaling.
pub fn diffuse(bound: Boundary, dst: &mut Field, src: &Field, rate: f32, dt: f32, iterations: usize) {
    let a = dt * rate * (dst.width() - 2) as f32 * (dst.height() * 2) as f32;
    lin_solve(bound, dst, src, a, 1.0 + 6.0 * a, iterations);
}

/// Gauss-Seidel relaxation toward `x0` with neighbor weight `a` and
/// central coefficient `c`, re-imposing boundary conditions after every
/// pass. `x` keeps its previous contents as the initial guess.
pub fn lin_solve(bound: Boundary, x: &mut Field, x0: &Field, a: f32, c: f32, iterations: usize) {
    let c_recip = 1.0 / c;
    for _ in 0..iterations {
        for j in 1..x.height() - 1 {
            for i in 1..x.width() - 1 {
                let value = (x0.get(i, j)
                    + a * (x.get(i + 1, j) + x.get(i - 1, j) + x.get(i, j + 1) + x.get(i, j - 1)))
                    * c_recip;
                x.set(i, j, value);
            }
        }
        set_bound(bound, x);
    }
}

/// Impose edge conditions: velocity components flip sign across their
/// no-slip walls, scalars mirror. Each corner becomes the average of its
/// two adjacent edge cells.
pub fn set_bound(bound: Boundary, x: &mut Field) {
    let w = x.width();
    let h = x.height();

    let sy = if bound == Boundary::VelocityY { -1.0 } else { 1.0 };
    for i in 1..w - 1 {
        x.set(i, 0, sy * x.get(i, 1));
        x.set(i, h - 1, sy * x.get(i, h - 2));
    }
    let sx = if bound == Boundary::VelocityX { -1.0 } else { 1.0 };
    for j in 1..h - 1 {
        x.set(0, j, sx * x.get(1, j));
        x.set(w - 1, j, sx * x.get(w - 2, j));
    }

    x.set(0, 0, 0.5 * (x.get(1, 0) + x.get(0, 1)));
    x.set(0, h - 1, 0.5 * (x.get(1, h - 1) + x.get(0, h - 2)));
    x.set(w - 1, 0, 0.5 * (x.get(w - 2, 0) + x.get(w - 1, 1)));
    x.set(w - 1, h - 1, 0.5 * (x.get(w - 2, h - 1) + x.get(w - 1, h - 2)));
}

/// Make the velocity pair divergence-free: measure cell divergence, solve
/// the pressure Poisson system, then subtract the pressure gradient.
/// `p` and `div` are scratch; their prior contents are overwritten.
pub fn project(vel_x: &mut Field, vel_y: &mut Field, p: &mut Field, div: &mut Field, iterations: usize) {
    let w = vel_x.width();
    let h = vel_x.height();
    let norm = (w + h) as f32 / 2.0;

    for j in 1..h - 1 {
        for i in 1..w - 1 {
            let d = -0.5
                * (vel_x.get(i + 1, j) - vel_x.get(i - 1, j)
                    + vel_y.get(i, j + 1) - vel_y.get(i, j - 1))
                / norm;
            div.set(i, j, d);
            p.set(i, j, 0.0);
        }
    }
    set_bound(Boundary::Scalar, div);
    set_bound(Boundary::Scalar, p);
    lin_solve(Boundary::Scalar, p, div, 1.0, 6.0, iterations);

    for j in 1..h - 1 {
        for i in 1..w - 1 {
            let gx = 0.5 * (p.get(i + 1, j) - p.get(i - 1, j)) * w as f32;
            let gy = 0.5 * (p.get(i, j + 1) - p.get(i, j - 1)) * h as f32;
            vel_x.set(i, j, vel_x.get(i, j) - gx);
            vel_y.set(i, j, vel_y.get(i, j) - gy);
        }
    }
    set_bound(Boundary::VelocityX, vel_x);
    set_bound(Boundary::VelocityY, vel_y);
}

/// Semi-Lagrangian transport: trace each interior cell backward along the
/// velocity field and bilinearly sample `d0` there. Sample coordinates
/// clamp to `[0.5, dim + 0.5]`; the clamped field indexing absorbs the
/// half-cell overshoot past the last row and column.
pub fn advect(bound: Boundary, d: &mut Field, d0: &Field, vel_x: &Field, vel_y: &Field, dt: f32) {
    let w = d.width();
    let h = d.height();
    let dtx = dt * (w - 2) as f32;
    let dty = dt * (h - 2) as f32;

    for j in 1..h - 1 {
        for i in 1..w - 1 {
            let x = (i as f32 - dtx * vel_x.get(i, j)).clamp(0.5, w as f32 + 0.5);
            let y = (j as f32 - dty * vel_y.get(i, j)).clamp(0.5, h as f32 + 0.5);

            let i0 = x.floor();
            let j0 = y.floor();
            let s1 = x - i0;
            let s0 = 1.0 - s1;
            let t1 = y - j0;
            let t0 = 1.0 - t1;

            let (i0, i1) = (i0 as i32, i0 as i32 + 1);
            let (j0, j1) = (j0 as i32, j0 as i32 + 1);
            let value = s0 * (t0 * d0.get(i0, j0) + t1 * d0.get(i0, j1))
                + s1 * (t0 * d0.get(i1, j0) + t1 * d0.get(i1, j1));
            d.set(i, j, value);
        }
    }
    set_bound(bound, d);
}
