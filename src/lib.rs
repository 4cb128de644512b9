//! # dwimeta
//!
//! Diffusion-weighted imaging (DWI) metadata for NRRD headers.
//!
//! NRRD readers and writers exchange header fields through a flat, string-keyed
//! metadata dictionary (`DWMRI_gradient_0000`, `DWMRI_b-value`,
//! `NRRD_kinds[3]`, ...). This crate turns that dictionary into typed DWI
//! quantities and back again, and checks that the result is internally
//! consistent enough to write a valid DWI header:
//!
//! - gradient direction table with stale-entry cleanup
//! - b-value and repeated-acquisition (`DWMRI_NEX`) count
//! - measurement frame
//! - per-axis centerings, kinds, labels and thicknesses
//! - interleaving classification of the gradient axis
//!
//! ## Quick Start
//!
//! ```
//! use dwimeta::{DwiValidator, Interleaving, MetaDataDictionary};
//!
//! let mut dwi = DwiValidator::new(MetaDataDictionary::new());
//! dwi.set_gradient_table(&[[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
//! dwi.set_b_value(1000);
//! dwi.set_interleaving(Interleaving::Volume);
//!
//! assert_eq!(dwi.gradient_count().unwrap(), 3);
//! assert_eq!(dwi.kinds_string().unwrap(), "volume_interleaved");
//! ```

#![warn(missing_docs)]

pub mod dictionary;
pub mod dwi;
pub mod error;

#[cfg(feature = "python")]
pub mod python;

pub use dictionary::{MetaDataDictionary, MetaDataStore, MetaDataValue};
pub use dwi::{
    Centering, DwiField, DwiValidator, GradientTable, GradientVector, Interleaving,
    MeasurementFrame, Space, StaleCleanup, TableOrder, ValidatorConfig,
};
pub use error::{Error, Result};
