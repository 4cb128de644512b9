//! PyDwiValidator class for Python bindings.

use numpy::{IntoPyArray, PyArray2, PyReadonlyArray2};
use pyo3::prelude::*;

use super::validation::{parse_gradient_rows, to_py_err};
use crate::dictionary::{MetaDataDictionary, MetaDataStore, MetaDataValue};
use crate::dwi::{
    self, DwiValidator, Interleaving, Space, StaleCleanup, TableOrder, ValidatorConfig,
};

/// DWI metadata dictionary with typed accessors.
///
/// Example:
///     >>> dwi = dwimeta.DwiValidator()
///     >>> dwi.set_gradient_table(np.eye(3))
///     >>> dwi.set_b_value(1000)
///     >>> dwi.set_interleaving("volume_interleaved")
///     >>> dwi.kinds_string()
///     'volume_interleaved'
#[pyclass(name = "DwiValidator")]
pub struct PyDwiValidator {
    inner: DwiValidator<MetaDataDictionary>,
}

fn parse_interleaving(name: &str) -> PyResult<Interleaving> {
    Interleaving::ALL
        .into_iter()
        .find(|scheme| scheme.as_str() == name)
        .ok_or_else(|| {
            pyo3::exceptions::PyValueError::new_err(format!("unknown interleaving '{}'", name))
        })
}

#[pymethods]
impl PyDwiValidator {
    /// Create an empty validator.
    ///
    /// Args:
    ///     reversed_order: store gradient tables last-to-first
    ///     contiguous_cleanup: stop stale-key cleanup at the first gap
    #[new]
    #[pyo3(signature = (reversed_order=false, contiguous_cleanup=false))]
    fn new(reversed_order: bool, contiguous_cleanup: bool) -> Self {
        let mut config = ValidatorConfig::new();
        if reversed_order {
            config = config.table_order(TableOrder::Reversed);
        }
        if contiguous_cleanup {
            config = config.stale_cleanup(StaleCleanup::Contiguous);
        }
        Self {
            inner: DwiValidator::with_config(MetaDataDictionary::new(), config),
        }
    }

    /// Store a raw text entry.
    fn set(&mut self, key: &str, value: &str) {
        self.inner
            .store_mut()
            .set(key, MetaDataValue::Text(value.to_string()));
    }

    /// Raw entry as text, or None.
    fn get(&self, key: &str) -> Option<String> {
        self.inner.store().get(key).map(ToString::to_string)
    }

    /// All keys in dictionary order.
    fn keys(&self) -> Vec<String> {
        self.inner.store().keys()
    }

    fn __len__(&self) -> usize {
        self.inner.store().len()
    }

    fn __contains__(&self, key: &str) -> bool {
        self.inner.store().has(key)
    }

    /// Gradient direction of one volume.
    fn gradient(&self, index: usize) -> PyResult<[f64; 3]> {
        self.inner
            .gradient(index)
            .map_err(|e| to_py_err(e, "gradient"))
    }

    /// Set the gradient direction of one volume.
    fn set_gradient(&mut self, index: usize, gradient: [f64; 3]) {
        self.inner.set_gradient(index, gradient);
    }

    /// Number of acquisitions including DWMRI_NEX repeats.
    fn gradient_count(&self) -> PyResult<usize> {
        self.inner
            .gradient_count()
            .map_err(|e| to_py_err(e, "gradient_count"))
    }

    /// Gradient table as an (N, 3) float64 array.
    fn gradient_table<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyArray2<f64>>> {
        let table = self
            .inner
            .gradient_table_array()
            .map_err(|e| to_py_err(e, "gradient_table"))?;
        Ok(table.into_pyarray(py))
    }

    /// Replace the gradient table from an (N, 3) array.
    fn set_gradient_table(&mut self, table: PyReadonlyArray2<'_, f64>) -> PyResult<()> {
        let rows = parse_gradient_rows(table.as_array())?;
        self.inner.set_gradient_table(&rows);
        Ok(())
    }

    /// Remove all gradient keys; returns how many were removed.
    fn delete_gradient_table(&mut self) -> usize {
        self.inner.delete_gradient_table()
    }

    /// DWMRI_NEX, or None.
    fn repeat_count(&self) -> PyResult<Option<usize>> {
        self.inner
            .repeat_count()
            .map_err(|e| to_py_err(e, "repeat_count"))
    }

    /// Set DWMRI_NEX.
    fn set_repeat_count(&mut self, count: usize) {
        self.inner.set_repeat_count(count);
    }

    /// Diffusion weighting strength.
    fn b_value(&self) -> PyResult<f64> {
        self.inner.b_value().map_err(|e| to_py_err(e, "b_value"))
    }

    /// Set the diffusion weighting strength.
    fn set_b_value(&mut self, b_value: f64) {
        self.inner.set_b_value(b_value);
    }

    /// Measurement frame as a float64 array.
    fn measurement_frame<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyArray2<f64>>> {
        let frame = self
            .inner
            .measurement_frame_array()
            .map_err(|e| to_py_err(e, "measurement_frame"))?;
        Ok(frame.into_pyarray(py))
    }

    /// Store the measurement frame rows as given.
    ///
    /// Shape is not checked here; validate() reports non-square frames.
    fn set_measurement_frame(&mut self, frame: Vec<Vec<f64>>) {
        self.inner.set_measurement_frame(frame);
    }

    /// Centering tags of the three spatial axes (None where unset).
    fn centerings(&self) -> Vec<Option<String>> {
        self.inner.centerings().to_vec()
    }

    /// Set the centering ("cell" or "node") of one spatial axis.
    fn set_centering(&mut self, axis: usize, centering: &str) -> PyResult<()> {
        self.inner
            .set_centering(axis, centering)
            .map_err(|e| to_py_err(e, "set_centering"))
    }

    /// Set all three spatial centerings.
    fn set_centerings(&mut self, centerings: [String; 3]) -> PyResult<()> {
        self.inner
            .set_centerings(&centerings)
            .map_err(|e| to_py_err(e, "set_centerings"))
    }

    /// Kind tag of one axis.
    fn kind(&self, axis: usize) -> PyResult<String> {
        self.inner.kind(axis).map_err(|e| to_py_err(e, "kind"))
    }

    /// Kind tags of all four axes.
    fn kinds(&self) -> PyResult<Vec<String>> {
        self.inner
            .kinds()
            .map(|kinds| kinds.to_vec())
            .map_err(|e| to_py_err(e, "kinds"))
    }

    /// Set the kind tag of one axis.
    fn set_kind(&mut self, axis: usize, kind: &str) -> PyResult<()> {
        self.inner
            .set_kind(axis, kind)
            .map_err(|e| to_py_err(e, "set_kind"))
    }

    /// Interleaving name, e.g. "volume_interleaved".
    fn kinds_string(&self) -> PyResult<&'static str> {
        self.inner
            .kinds_string()
            .map_err(|e| to_py_err(e, "kinds_string"))
    }

    /// Write the kind pattern for an interleaving name.
    fn set_interleaving(&mut self, interleaving: &str) -> PyResult<()> {
        let scheme = parse_interleaving(interleaving)?;
        self.inner.set_interleaving(scheme);
        Ok(())
    }

    /// Label of one axis, or None.
    fn label(&self, axis: usize) -> Option<String> {
        self.inner.label(axis)
    }

    /// Set the label of one axis.
    fn set_label(&mut self, axis: usize, label: &str) -> PyResult<()> {
        self.inner
            .set_label(axis, label)
            .map_err(|e| to_py_err(e, "set_label"))
    }

    /// Slice thickness of one axis.
    fn thickness(&self, axis: usize) -> PyResult<f64> {
        self.inner
            .thickness(axis)
            .map_err(|e| to_py_err(e, "thickness"))
    }

    /// Set the slice thickness of one spatial axis.
    fn set_thickness(&mut self, axis: usize, thickness: f64) -> PyResult<()> {
        self.inner
            .set_thickness(axis, thickness)
            .map_err(|e| to_py_err(e, "set_thickness"))
    }

    /// Anatomical space name.
    fn space(&self) -> PyResult<&'static str> {
        self.inner
            .space()
            .map(Space::as_str)
            .map_err(|e| to_py_err(e, "space"))
    }

    /// Set the anatomical space ("RAS", "left-posterior-superior", ...).
    fn set_space(&mut self, space: &str) -> PyResult<()> {
        let space: Space = space.parse().map_err(|e| to_py_err(e, "set_space"))?;
        self.inner.set_space(space);
        Ok(())
    }

    /// Always raises NotImplementedError.
    fn number_of_dimensions(&self) -> PyResult<usize> {
        self.inner
            .number_of_dimensions()
            .map_err(|e| to_py_err(e, "number_of_dimensions"))
    }

    /// Raise the first problem preventing a valid DWI header.
    fn validate(&self) -> PyResult<()> {
        self.inner.validate().map_err(|e| to_py_err(e, "validate"))
    }

    /// Whether the dictionary forms a valid DWI header.
    fn is_valid_dwi_header(&self) -> bool {
        self.inner.is_valid_dwi_header()
    }

    fn __repr__(&self) -> String {
        format!("DwiValidator(entries={})", self.inner.store().len())
    }
}

/// Canonical gradient key for a volume index.
#[pyfunction]
pub fn gradient_key(index: usize) -> String {
    dwi::gradient_key(index)
}

/// Canonical NRRD per-axis key, e.g. "NRRD_kinds[3]".
#[pyfunction]
pub fn indexed_key(field: &str, index: usize) -> String {
    dwi::indexed_key(field, index)
}
