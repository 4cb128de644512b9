//! DWI view over a metadata dictionary.
//!
//! [`DwiValidator`] owns one [`MetaDataStore`] and reads or rewrites the
//! DWI-specific entries in it. Everything is a synchronous in-place mutation;
//! callers sharing a store between threads must serialise access themselves.

use ndarray::Array2;
use tracing::{debug, trace, warn};

use super::config::{StaleCleanup, TableOrder, ValidatorConfig};
use super::format::{
    format_fixed, format_vector, parse_count, parse_f64, parse_vector, parse_vector_list,
};
use super::keys::{
    gradient_key, is_gradient_key, parse_gradient_index, B_VALUE_KEY, MEASUREMENT_FRAME_KEY,
    NEX_KEY,
};
use super::{GradientTable, GradientVector, MeasurementFrame};
use crate::dictionary::{MetaDataDictionary, MetaDataStore, MetaDataValue};
use crate::error::{Error, Result};

const NO_DIMENSION_SLOT: &str =
    "NRRD metadata dictionaries do not store the number of dimensions";

/// Reads, writes and checks DWI header fields in a metadata dictionary.
///
/// ```
/// use dwimeta::{DwiValidator, MetaDataDictionary};
///
/// let mut dwi = DwiValidator::new(MetaDataDictionary::new());
/// dwi.set_gradient(0, [0.0, 0.0, 1.0]);
/// dwi.set_b_value(1000.0);
///
/// assert_eq!(dwi.gradient(0).unwrap(), [0.0, 0.0, 1.0]);
/// assert_eq!(dwi.b_value().unwrap(), 1000.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DwiValidator<S = MetaDataDictionary> {
    store: S,
    config: ValidatorConfig,
}

impl<S: MetaDataStore> DwiValidator<S> {
    /// Wrap `store` with the default configuration.
    pub fn new(store: S) -> Self {
        Self::with_config(store, ValidatorConfig::default())
    }

    /// Wrap `store` with an explicit configuration.
    pub fn with_config(store: S, config: ValidatorConfig) -> Self {
        Self { store, config }
    }

    /// Active configuration.
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// The wrapped dictionary.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access to the wrapped dictionary.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Replace the wrapped dictionary wholesale.
    pub fn set_store(&mut self, store: S) {
        self.store = store;
    }

    /// Unwrap the dictionary.
    pub fn into_store(self) -> S {
        self.store
    }

    pub(crate) fn value(&self, key: &str) -> Result<&MetaDataValue> {
        self.store
            .get(key)
            .ok_or_else(|| Error::NotFound(key.to_string()))
    }

    pub(crate) fn text(&self, key: &str) -> Result<&str> {
        let value = self.value(key)?;
        value.as_text().ok_or_else(|| {
            Error::malformed(key, format!("expected text, found {}", value.type_name()))
        })
    }

    /// Numeric field stored either as text or as a number.
    pub(crate) fn number(&self, key: &str) -> Result<f64> {
        match self.value(key)? {
            MetaDataValue::Text(text) => parse_f64(key, text),
            MetaDataValue::Double(v) => Ok(*v),
            MetaDataValue::Integer(v) => Ok(*v as f64),
            other => Err(Error::malformed(
                key,
                format!("expected a number, found {}", other.type_name()),
            )),
        }
    }

    /// Gradient direction of volume `index`.
    pub fn gradient(&self, index: usize) -> Result<GradientVector> {
        let key = gradient_key(index);
        let text = self.text(&key)?;
        parse_vector(&key, text)
    }

    /// Store the gradient direction of volume `index`, replacing any previous one.
    pub fn set_gradient(&mut self, index: usize, gradient: GradientVector) {
        let key = gradient_key(index);
        trace!(key = %key, "setting gradient");
        self.store
            .set(&key, MetaDataValue::Text(format_vector(&gradient)));
    }

    /// Repeated-acquisition count, if `DWMRI_NEX` is present.
    pub fn repeat_count(&self) -> Result<Option<usize>> {
        let Some(value) = self.store.get(NEX_KEY) else {
            return Ok(None);
        };
        let count = match value {
            MetaDataValue::Text(text) => parse_count(NEX_KEY, text)?,
            MetaDataValue::Integer(v) => usize::try_from(*v)
                .map_err(|_| Error::malformed(NEX_KEY, format!("negative repeat count {}", v)))?,
            other => {
                return Err(Error::malformed(
                    NEX_KEY,
                    format!("expected an integer, found {}", other.type_name()),
                ))
            }
        };
        Ok(Some(count))
    }

    /// Store `DWMRI_NEX` as integer text.
    pub fn set_repeat_count(&mut self, count: usize) {
        self.store
            .set(NEX_KEY, MetaDataValue::Text(count.to_string()));
    }

    /// Number of acquisitions: gradient keys plus `DWMRI_NEX` when present.
    ///
    /// The repeat count is added, not multiplied. Gradient keys are recognised
    /// by substring, so non-canonical keys are counted too.
    pub fn gradient_count(&self) -> Result<usize> {
        let listed = self
            .store
            .keys()
            .iter()
            .filter(|key| is_gradient_key(key))
            .count();
        let repeats = self.repeat_count()?.unwrap_or(0);
        listed.checked_add(repeats).ok_or_else(|| {
            Error::malformed(NEX_KEY, "repeat count overflows the gradient count")
        })
    }

    /// All gradient directions, ordered by volume index.
    ///
    /// Every key containing the gradient prefix must be canonical; anything
    /// else is reported as [`Error::MalformedValue`] rather than misindexed.
    pub fn gradient_table(&self) -> Result<GradientTable> {
        let mut indexed = Vec::new();
        for key in self.store.keys() {
            if !is_gradient_key(&key) {
                continue;
            }
            let index = parse_gradient_index(&key)?;
            indexed.push((index, self.gradient(index)?));
        }
        indexed.sort_by_key(|(index, _)| *index);
        Ok(indexed.into_iter().map(|(_, gradient)| gradient).collect())
    }

    /// Gradient table as an `N x 3` array.
    pub fn gradient_table_array(&self) -> Result<Array2<f64>> {
        let table = self.gradient_table()?;
        Ok(Array2::from_shape_fn((table.len(), 3), |(i, j)| table[i][j]))
    }

    /// Replace the gradient table.
    ///
    /// Indices are assigned per [`ValidatorConfig::table_order`], then stale
    /// entries beyond the new length are erased per
    /// [`ValidatorConfig::stale_cleanup`].
    pub fn set_gradient_table(&mut self, table: &[GradientVector]) {
        match self.config.table_order {
            TableOrder::Forward => {
                for (index, gradient) in table.iter().enumerate() {
                    self.set_gradient(index, *gradient);
                }
            }
            TableOrder::Reversed => {
                for (index, gradient) in table.iter().rev().enumerate() {
                    self.set_gradient(index, *gradient);
                }
            }
        }

        let removed = match self.config.stale_cleanup {
            StaleCleanup::Contiguous => self.erase_contiguous_tail(table.len()),
            StaleCleanup::FullRescan => self.erase_stale_gradients(table.len()),
        };
        debug!(
            written = table.len(),
            removed,
            order = ?self.config.table_order,
            "gradient table replaced"
        );
    }

    fn erase_contiguous_tail(&mut self, len: usize) -> usize {
        let mut index = len;
        loop {
            let key = gradient_key(index);
            if self.store.erase(&key).is_none() {
                return index - len;
            }
            index += 1;
        }
    }

    fn erase_stale_gradients(&mut self, len: usize) -> usize {
        let mut removed = 0;
        for key in self.store.keys() {
            if !is_gradient_key(&key) {
                continue;
            }
            let stale = match parse_gradient_index(&key) {
                Ok(index) => index >= len,
                Err(err) => {
                    warn!(key = %key, error = %err, "erasing non-canonical gradient key");
                    true
                }
            };
            if stale {
                self.store.erase(&key);
                removed += 1;
            }
        }
        removed
    }

    /// Remove every gradient key, leaving all other entries untouched.
    ///
    /// Returns the number of keys removed.
    pub fn delete_gradient_table(&mut self) -> usize {
        let mut removed = 0;
        for key in self.store.keys() {
            if is_gradient_key(&key) {
                self.store.erase(&key);
                removed += 1;
            }
        }
        debug!(removed, "gradient table deleted");
        removed
    }

    /// Diffusion weighting strength.
    pub fn b_value(&self) -> Result<f64> {
        self.number(B_VALUE_KEY)
    }

    /// Store the b-value as fixed-point text.
    ///
    /// Accepts `f64`, `f32` and integers up to 32 bits, which widen to `f64`
    /// exactly. Use [`DwiValidator::set_b_value_int`] for `i64` values.
    pub fn set_b_value<V: Into<f64>>(&mut self, b_value: V) {
        self.store.set(
            B_VALUE_KEY,
            MetaDataValue::Text(format_fixed(b_value.into())),
        );
    }

    /// Store an integer b-value, widened to `f64`.
    pub fn set_b_value_int(&mut self, b_value: i64) {
        self.set_b_value(b_value as f64);
    }

    /// Measurement frame rows.
    ///
    /// A frame with zero rows counts as absent. NRRD vector-list text
    /// (`(1,0,0) (0,1,0) (0,0,1)`) is accepted as well as a stored matrix.
    pub fn measurement_frame(&self) -> Result<MeasurementFrame> {
        let rows = match self.value(MEASUREMENT_FRAME_KEY)? {
            MetaDataValue::Matrix(rows) => rows.clone(),
            MetaDataValue::Text(text) => parse_vector_list(MEASUREMENT_FRAME_KEY, text)?,
            other => {
                return Err(Error::malformed(
                    MEASUREMENT_FRAME_KEY,
                    format!("expected a matrix, found {}", other.type_name()),
                ))
            }
        };
        if rows.is_empty() {
            return Err(Error::NotFound(MEASUREMENT_FRAME_KEY.to_string()));
        }
        Ok(rows)
    }

    /// Store the measurement frame verbatim. No shape checks are made.
    pub fn set_measurement_frame(&mut self, frame: MeasurementFrame) {
        self.store
            .set(MEASUREMENT_FRAME_KEY, MetaDataValue::Matrix(frame));
    }

    /// Measurement frame as a 2-D array. Ragged rows are malformed.
    pub fn measurement_frame_array(&self) -> Result<Array2<f64>> {
        let frame = self.measurement_frame()?;
        let ncols = frame[0].len();
        if let Some(row) = frame.iter().position(|row| row.len() != ncols) {
            return Err(Error::malformed(
                MEASUREMENT_FRAME_KEY,
                format!(
                    "row {} has {} entries, expected {}",
                    row,
                    frame[row].len(),
                    ncols
                ),
            ));
        }
        let nrows = frame.len();
        let flat: Vec<f64> = frame.into_iter().flatten().collect();
        Array2::from_shape_vec((nrows, ncols), flat)
            .map_err(|e| Error::malformed(MEASUREMENT_FRAME_KEY, e.to_string()))
    }

    /// Store a measurement frame from a 2-D array.
    pub fn set_measurement_frame_array(&mut self, frame: &Array2<f64>) {
        let rows = frame.outer_iter().map(|row| row.to_vec()).collect();
        self.set_measurement_frame(rows);
    }

    /// Always fails: the dictionary has no slot for the dimension count.
    pub fn number_of_dimensions(&self) -> Result<usize> {
        Err(Error::Unsupported(NO_DIMENSION_SLOT.to_string()))
    }

    /// Always fails: the dictionary has no slot for the dimension count.
    pub fn set_number_of_dimensions(&mut self, _dimensions: usize) -> Result<()> {
        Err(Error::Unsupported(NO_DIMENSION_SLOT.to_string()))
    }

    /// Always fails: the dictionary has no slot for the dimension count.
    pub fn set_number_of_dimensions_from_sizes(&mut self, _sizes: &[usize]) -> Result<()> {
        Err(Error::Unsupported(NO_DIMENSION_SLOT.to_string()))
    }

    /// Check that the dictionary holds everything a DWI NRRD writer needs.
    ///
    /// Requires a non-empty gradient table, a b-value, a square measurement
    /// frame, classifiable kinds and cell/node centering on all spatial axes.
    /// The first problem found is returned.
    pub fn validate(&self) -> Result<()> {
        let table = self.gradient_table()?;
        if table.is_empty() {
            return Err(Error::NotFound(gradient_key(0)));
        }

        self.b_value()?;

        let frame = self.measurement_frame()?;
        if frame.iter().any(|row| row.len() != frame.len()) {
            return Err(Error::InvalidValue(format!(
                "measurement frame must be square, got {} rows of lengths {:?}",
                frame.len(),
                frame.iter().map(Vec::len).collect::<Vec<_>>()
            )));
        }

        self.interleaving()?;
        self.require_spatial_centerings()?;
        Ok(())
    }

    /// Whether [`DwiValidator::validate`] succeeds.
    pub fn is_valid_dwi_header(&self) -> bool {
        match self.validate() {
            Ok(()) => true,
            Err(err) => {
                debug!(error = %err, "dictionary is not a valid DWI header");
                false
            }
        }
    }
}
