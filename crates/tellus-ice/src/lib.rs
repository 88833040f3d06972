//! Polar ice caps: a pure coverage field over latitude, elevation, and
//! climate, plus a multiplicative noise-variation field.
//!
//! Both fields are stateless functions of a world position and
//! [`IceCapSettings`]; elevation is an external input, supplied by the shape
//! generator's output for the same point. Neither field touches the mesh.

mod coverage;
mod settings;

pub use coverage::{coverage, noise_modulation};
pub use settings::{IceCapConfig, IceCapSettings};
