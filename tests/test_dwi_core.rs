//! End-to-end tests for DWI metadata handling.
//!
//! Builds dictionaries the way an NRRD reader would populate them and drives
//! the public API against them, covering the error paths as well as the
//! happy path.

use dwimeta::{
    DwiValidator, Error, GradientVector, Interleaving, MetaDataDictionary, MetaDataStore,
    MetaDataValue, StaleCleanup, TableOrder, ValidatorConfig,
};
use proptest::prelude::*;

/// Dictionary as produced by reading a volume-interleaved DWI NRRD header.
fn nrrd_reader_dictionary() -> MetaDataDictionary {
    let mut dict: MetaDataDictionary = [
        ("modality", "DWMRI"),
        ("DWMRI_b-value", "1000"),
        ("DWMRI_gradient_0000", "0 0 0"),
        ("DWMRI_gradient_0001", "1 0 0"),
        ("DWMRI_gradient_0002", "0 1 0"),
        ("DWMRI_gradient_0003", "0 0 1"),
        ("NRRD_centerings[0]", "cell"),
        ("NRRD_centerings[1]", "cell"),
        ("NRRD_centerings[2]", "cell"),
        ("NRRD_kinds[0]", "space"),
        ("NRRD_kinds[1]", "space"),
        ("NRRD_kinds[2]", "space"),
        ("NRRD_kinds[3]", "list"),
        ("NRRD_space", "left-posterior-superior"),
    ]
    .into_iter()
    .collect();
    dict.set(
        "NRRD_measurement frame",
        MetaDataValue::Matrix(vec![
            vec![0.0, -1.0, 0.0],
            vec![1.0, 0.0, 0.0],
            vec![0.0, 0.0, 1.0],
        ]),
    );
    dict.set("NRRD_thicknesses[2]", MetaDataValue::Double(0.5));
    dict
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

fn gradient_keys(dict: &MetaDataDictionary) -> Vec<String> {
    dict.keys()
        .into_iter()
        .filter(|k| k.starts_with("DWMRI_gradient_"))
        .collect()
}

#[test]
fn test_reader_dictionary_is_valid_header() {
    let dwi = DwiValidator::new(nrrd_reader_dictionary());
    dwi.validate().unwrap();

    assert_eq!(dwi.gradient_count().unwrap(), 4);
    assert_eq!(dwi.gradient(1).unwrap(), [1.0, 0.0, 0.0]);
    assert_eq!(dwi.b_value().unwrap(), 1000.0);
    assert_eq!(dwi.measurement_frame().unwrap()[0], vec![0.0, -1.0, 0.0]);
    assert_eq!(dwi.interleaving().unwrap(), Interleaving::Volume);
    assert_eq!(dwi.thickness(2).unwrap(), 0.5);
}

#[test]
fn test_empty_store_missing_keys() {
    let dwi = DwiValidator::new(MetaDataDictionary::new());
    assert!(matches!(dwi.b_value(), Err(Error::NotFound(_))));
    assert!(matches!(dwi.measurement_frame(), Err(Error::NotFound(_))));
    assert!(matches!(dwi.gradient(0), Err(Error::NotFound(_))));
    assert!(dwi.gradient_table().unwrap().is_empty());
    assert_eq!(dwi.gradient_count().unwrap(), 0);
    assert!(!dwi.is_valid_dwi_header());
}

#[test]
fn test_rewrite_header_with_fewer_gradients() {
    init_tracing();
    let mut dwi = DwiValidator::new(nrrd_reader_dictionary());
    dwi.set_gradient_table(&[[0.0, 0.0, 0.0], [0.0, 0.0, 1.0]]);

    let dict = dwi.store();
    assert_eq!(
        gradient_keys(dict),
        vec!["DWMRI_gradient_0000", "DWMRI_gradient_0001"]
    );
    assert_eq!(
        dict.get("DWMRI_gradient_0001").and_then(|v| v.as_text()),
        Some("0.000000 0.000000 1.000000")
    );
    assert!(dict.has("modality"));
    assert!(dwi.validate().is_ok());
}

#[test]
fn test_shrink_from_five_to_two() {
    init_tracing();
    let table: Vec<GradientVector> = (0..5).map(|i| [i as f64, 0.0, 1.0]).collect();
    let mut dwi = DwiValidator::new(MetaDataDictionary::new());
    dwi.set_gradient_table(&table);
    dwi.set_gradient_table(&table[..2]);

    assert_eq!(dwi.gradient_table().unwrap(), table[..2].to_vec());
    for index in 2..5 {
        assert!(!dwi.store().has(&dwimeta::dwi::gradient_key(index)));
    }
}

#[test]
fn test_legacy_configuration() {
    let mut dwi = DwiValidator::with_config(MetaDataDictionary::new(), ValidatorConfig::legacy());
    assert_eq!(dwi.config().table_order, TableOrder::Reversed);
    assert_eq!(dwi.config().stale_cleanup, StaleCleanup::Contiguous);

    dwi.set_gradient_table(&[[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
    assert_eq!(
        dwi.gradient_table().unwrap(),
        vec![[0.0, 0.0, 1.0], [0.0, 1.0, 0.0], [1.0, 0.0, 0.0]]
    );
}

#[test]
fn test_repeats_extend_count_only() {
    let mut dict = nrrd_reader_dictionary();
    dict.set("DWMRI_NEX", "3".into());
    let dwi = DwiValidator::new(dict);
    assert_eq!(dwi.gradient_count().unwrap(), 7);
    assert_eq!(dwi.gradient_table().unwrap().len(), 4);
}

#[test]
fn test_delete_gradients_keeps_rest() {
    let mut dwi = DwiValidator::new(nrrd_reader_dictionary());
    let before = dwi.store().len();
    assert_eq!(dwi.delete_gradient_table(), 4);
    assert_eq!(dwi.store().len(), before - 4);
    assert!(gradient_keys(dwi.store()).is_empty());
    assert_eq!(dwi.b_value().unwrap(), 1000.0);
}

#[test]
fn test_interleaving_names() {
    let mut dwi = DwiValidator::new(MetaDataDictionary::new());
    for (kinds, name) in [
        (["space", "space", "space", "list"], "volume_interleaved"),
        (["space", "space", "list", "space"], "slice_interleaved"),
        (["list", "space", "space", "space"], "pixel_interleaved"),
    ] {
        dwi.set_kinds(&kinds).unwrap();
        assert_eq!(dwi.kinds_string().unwrap(), name);
    }

    dwi.set_kinds(&["space", "list", "space", "space"]).unwrap();
    let err = dwi.kinds_string().unwrap_err();
    assert!(matches!(err, Error::UnclassifiedPattern(_)));
    assert!(err.to_string().contains("unknown interleaving"));
}

#[test]
fn test_centering_rejection_leaves_state() {
    let mut dwi = DwiValidator::new(nrrd_reader_dictionary());
    for tag in ["none", "bogus"] {
        assert!(matches!(
            dwi.set_centering(0, tag),
            Err(Error::InvalidValue(_))
        ));
    }
    assert_eq!(dwi.centerings()[0].as_deref(), Some("cell"));
}

#[test]
fn test_dimension_queries_unsupported() {
    let mut dwi = DwiValidator::new(nrrd_reader_dictionary());
    let before = dwi.store().clone();
    assert!(matches!(dwi.number_of_dimensions(), Err(Error::Unsupported(_))));
    assert!(matches!(dwi.set_number_of_dimensions(4), Err(Error::Unsupported(_))));
    assert!(matches!(
        dwi.set_number_of_dimensions_from_sizes(&[16, 16, 16, 8]),
        Err(Error::Unsupported(_))
    ));
    assert_eq!(dwi.store(), &before);
}

#[test]
fn test_caller_owned_store() {
    let mut dict = nrrd_reader_dictionary();
    {
        let mut dwi = DwiValidator::new(&mut dict);
        dwi.set_b_value(3000);
    }
    assert_eq!(
        dict.get("DWMRI_b-value").and_then(|v| v.as_text()),
        Some("3000.000000")
    );
}

fn component() -> impl Strategy<Value = f64> {
    -1.0e4f64..1.0e4
}

proptest! {
    /// A stored gradient reads back within fixed-point precision.
    #[test]
    fn gradient_roundtrip(
        index in 0usize..20000,
        x in component(),
        y in component(),
        z in component(),
    ) {
        let mut dwi = DwiValidator::new(MetaDataDictionary::new());
        dwi.set_gradient(index, [x, y, z]);
        let read = dwi.gradient(index).unwrap();
        for (a, b) in read.iter().zip([x, y, z]) {
            prop_assert!((a - b).abs() <= 1e-6);
        }
    }

    /// After any table write, the count equals the table length and no key
    /// lies beyond it.
    #[test]
    fn table_write_leaves_no_stale_keys(
        first in prop::collection::vec(prop::array::uniform3(-1.0f64..1.0), 0..40),
        second in prop::collection::vec(prop::array::uniform3(-1.0f64..1.0), 0..40),
    ) {
        let mut dwi = DwiValidator::new(MetaDataDictionary::new());
        dwi.set_gradient_table(&first);
        dwi.set_gradient_table(&second);

        prop_assert_eq!(dwi.gradient_count().unwrap(), second.len());
        prop_assert_eq!(dwi.gradient_table().unwrap().len(), second.len());
        prop_assert!(!dwi.store().has(&dwimeta::dwi::gradient_key(second.len())));
    }
}
