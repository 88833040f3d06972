//! Coherent-noise primitives and the fractal evaluator used for planet surfaces.
//!
//! Every noise field in the workspace is built on the `noise` crate's
//! [`noise::NoiseFn`] trait, so primitives are pluggable: terrain uses Perlin
//! gradient noise, ice-coverage variation uses the cheaper [`HashNoise`]
//! lattice noise. The two primitives are not interchangeable: callers choose
//! one explicitly and must not assume their outputs agree.

mod fractal;
mod hash;

pub use fractal::{FractalNoise, NoiseSettings, TERRAIN_NOISE_SEED};
pub use hash::HashNoise;
