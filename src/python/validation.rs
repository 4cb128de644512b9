//! Validation helpers for Python boundary.
//!
//! Maps crate errors onto Python exception types and checks array shapes
//! before they reach the Rust API.

use numpy::ndarray::ArrayView2;
use pyo3::exceptions::{PyKeyError, PyNotImplementedError, PyValueError};

use crate::dwi::GradientVector;
use crate::error::Error as DwiError;

/// Convert a dwimeta Error to the appropriate Python exception.
pub fn to_py_err(e: DwiError, context: &str) -> pyo3::PyErr {
    match &e {
        DwiError::NotFound(key) => PyKeyError::new_err(format!("{}: {}", context, key)),
        DwiError::Unsupported(msg) => {
            PyNotImplementedError::new_err(format!("{}: {}", context, msg))
        }
        DwiError::MalformedValue { .. }
        | DwiError::InvalidValue(_)
        | DwiError::UnclassifiedPattern(_) => PyValueError::new_err(format!("{}: {}", context, e)),
    }
}

/// Validate an `N x 3` gradient array and copy it into a table.
pub fn parse_gradient_rows(table: ArrayView2<'_, f64>) -> pyo3::PyResult<Vec<GradientVector>> {
    if table.ncols() != 3 {
        return Err(PyValueError::new_err(format!(
            "gradient table must have 3 columns (got {})",
            table.ncols()
        )));
    }
    Ok(table
        .outer_iter()
        .map(|row| [row[0], row[1], row[2]])
        .collect())
}
