//! DWI fields of an NRRD metadata dictionary.

pub mod axes;
pub mod config;
pub mod format;
pub mod keys;
mod validator;

pub use axes::{Centering, Interleaving, Space, KIND_AXES, SPATIAL_AXES};
pub use config::{StaleCleanup, TableOrder, ValidatorConfig};
pub use keys::{gradient_key, indexed_key, DwiField};
pub use validator::DwiValidator;

/// Diffusion gradient direction of one volume.
pub type GradientVector = [f64; 3];

/// Gradient directions in volume order.
pub type GradientTable = Vec<GradientVector>;

/// Measurement frame as rows.
pub type MeasurementFrame = Vec<Vec<f64>>;
