//! Canonical key names for DWI fields.
//!
//! Every key this crate reads or writes is built here. Gradient directions live
//! under `DWMRI_gradient_NNNN` and per-axis NRRD fields under
//! `NRRD_<field>[<axis>]`; both must match byte for byte what NRRD readers and
//! writers produce.

use crate::error::{Error, Result};

/// Prefix of every gradient direction key.
pub const GRADIENT_PREFIX: &str = "DWMRI_gradient_";

/// Repeated-acquisition count.
pub const NEX_KEY: &str = "DWMRI_NEX";

/// Diffusion weighting strength.
pub const B_VALUE_KEY: &str = "DWMRI_b-value";

/// Measurement frame (the embedded space is part of the NRRD field name).
pub const MEASUREMENT_FRAME_KEY: &str = "NRRD_measurement frame";

/// Anatomical space.
pub const SPACE_KEY: &str = "NRRD_space";

/// Namespace of NRRD header fields in the dictionary.
pub const NRRD_PREFIX: &str = "NRRD_";

const CENTERINGS: &str = "centerings";
const KINDS: &str = "kinds";
const LABELS: &str = "labels";
const THICKNESSES: &str = "thicknesses";

/// Gradient key for a zero-based volume index, e.g. `DWMRI_gradient_0007`.
pub fn gradient_key(index: usize) -> String {
    format!("{}{:04}", GRADIENT_PREFIX, index)
}

/// Per-axis NRRD key, e.g. `NRRD_kinds[3]`.
pub fn indexed_key(field: &str, index: usize) -> String {
    format!("{}{}[{}]", NRRD_PREFIX, field, index)
}

/// Whether `key` names a gradient entry.
///
/// This is a substring test; use [`parse_gradient_index`] to check the layout.
pub fn is_gradient_key(key: &str) -> bool {
    key.contains(GRADIENT_PREFIX)
}

/// Recover the volume index from a gradient key.
///
/// The key must be exactly what [`gradient_key`] would produce for the parsed
/// index, so `DWMRI_gradient_7`, `DWMRI_gradient_00007` and
/// `old_DWMRI_gradient_0007` are all rejected.
pub fn parse_gradient_index(key: &str) -> Result<usize> {
    let digits = key
        .strip_prefix(GRADIENT_PREFIX)
        .ok_or_else(|| Error::malformed(key, "gradient key does not start with the gradient prefix"))?;

    if digits.len() < 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::malformed(
            key,
            format!("expected a zero-padded 4-digit index, got '{}'", digits),
        ));
    }

    let index: usize = digits
        .parse()
        .map_err(|e| Error::malformed(key, format!("gradient index out of range: {}", e)))?;

    if gradient_key(index) != key {
        return Err(Error::malformed(
            key,
            format!("non-canonical gradient index padding '{}'", digits),
        ));
    }
    Ok(index)
}

/// A DWI field and, for indexed fields, its position.
///
/// The closed set of dictionary entries the validator understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DwiField {
    /// Gradient direction of one volume.
    Gradient(usize),
    /// `DWMRI_NEX`.
    RepeatCount,
    /// `DWMRI_b-value`.
    BValue,
    /// `NRRD_measurement frame`.
    MeasurementFrame,
    /// `NRRD_space`.
    Space,
    /// Centering of one axis.
    Centering(usize),
    /// Kind of one axis.
    Kind(usize),
    /// Label of one axis.
    Label(usize),
    /// Slice thickness of one axis.
    Thickness(usize),
}

impl DwiField {
    /// Dictionary key for this field.
    pub fn key(self) -> String {
        match self {
            Self::Gradient(i) => gradient_key(i),
            Self::RepeatCount => NEX_KEY.to_string(),
            Self::BValue => B_VALUE_KEY.to_string(),
            Self::MeasurementFrame => MEASUREMENT_FRAME_KEY.to_string(),
            Self::Space => SPACE_KEY.to_string(),
            Self::Centering(i) => indexed_key(CENTERINGS, i),
            Self::Kind(i) => indexed_key(KINDS, i),
            Self::Label(i) => indexed_key(LABELS, i),
            Self::Thickness(i) => indexed_key(THICKNESSES, i),
        }
    }

    /// Identify a canonical key, or `None` for keys outside the DWI schema.
    pub fn parse(key: &str) -> Option<Self> {
        match key {
            NEX_KEY => return Some(Self::RepeatCount),
            B_VALUE_KEY => return Some(Self::BValue),
            MEASUREMENT_FRAME_KEY => return Some(Self::MeasurementFrame),
            SPACE_KEY => return Some(Self::Space),
            _ => {}
        }

        if key.starts_with(GRADIENT_PREFIX) {
            return parse_gradient_index(key).ok().map(Self::Gradient);
        }

        let rest = key.strip_prefix(NRRD_PREFIX)?;
        let (field, tail) = rest.split_once('[')?;
        let digits = tail.strip_suffix(']')?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let index: usize = digits.parse().ok()?;
        let parsed = match field {
            CENTERINGS => Self::Centering(index),
            KINDS => Self::Kind(index),
            LABELS => Self::Label(index),
            THICKNESSES => Self::Thickness(index),
            _ => return None,
        };
        // Reject leading zeros such as `NRRD_kinds[03]`.
        (parsed.key() == key).then_some(parsed)
    }
}

impl std::fmt::Display for DwiField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}
