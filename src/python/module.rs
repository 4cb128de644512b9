//! Python module definition.

use pyo3::prelude::*;

use super::validator;

#[pymodule]
fn _dwimeta(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<validator::PyDwiValidator>()?;

    // Key codec
    m.add_function(wrap_pyfunction!(validator::gradient_key, m)?)?;
    m.add_function(wrap_pyfunction!(validator::indexed_key, m)?)?;

    Ok(())
}
