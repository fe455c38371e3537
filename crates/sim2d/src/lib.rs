//! sim2d - interchangeable 2-D fluid and physics solvers
//!
//! Three self-contained simulators, each owning its full state:
//! - [`StableFluidsSimulation`]: dye and velocity fields on a dense
//!   Eulerian grid (semi-Lagrangian advection, Gauss-Seidel projection)
//! - [`SphSimulation`]: smoothed-particle hydrodynamics with a sorted
//!   spatial hash for neighbor queries
//! - [`VerletSimulation`]: position-Verlet rigid discs inside a circular
//!   containment boundary
//!
//! This crate is framework-agnostic - it handles simulation only. A host
//! application drives one solver per frame (forward the frame delta and
//! pointer stimuli in, read particle/cell state back out for drawing) and
//! can swap the active solver at any time, since no state is shared
//! between them.

pub mod color;
pub mod sph;
pub mod stable_fluids;
pub mod verlet;

pub use color::speed_color;
pub use sph::{Particle, SphParams, SphSimulation};
pub use stable_fluids::{Boundary, Field, StableFluidsSimulation};
pub use verlet::{VerletObject, VerletSimulation};
