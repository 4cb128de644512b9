//! Per-axis descriptors: centering, kind, label, thickness and space.
//!
//! A DWI volume has three spatial axes plus one list axis holding the
//! gradient volumes. Where that list axis sits decides the interleaving.

use std::str::FromStr;

use tracing::trace;

use super::keys::{DwiField, SPACE_KEY};
use super::validator::DwiValidator;
use crate::dictionary::{MetaDataStore, MetaDataValue};
use crate::error::{Error, Result};

/// Number of spatial axes.
pub const SPATIAL_AXES: usize = 3;

/// Number of axes carrying a kind (spatial plus the gradient list axis).
pub const KIND_AXES: usize = 4;

const SPACE_KIND: &str = "space";
const LIST_KIND: &str = "list";

/// Sample centering of a spatial axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Centering {
    /// Samples at cell centers.
    Cell,
    /// Samples at grid nodes.
    Node,
}

impl Centering {
    /// NRRD spelling.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cell => "cell",
            Self::Node => "node",
        }
    }
}

impl std::fmt::Display for Centering {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Centering {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "cell" => Ok(Self::Cell),
            "node" => Ok(Self::Node),
            "none" | "???" => Err(Error::InvalidValue(
                "cannot remove the centering of a spatial axis".to_string(),
            )),
            other => Err(Error::InvalidValue(format!(
                "unknown centering '{}' (expected cell or node)",
                other
            ))),
        }
    }
}

/// Position of the gradient list axis relative to the spatial axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interleaving {
    /// `space space space list`: one whole volume per gradient.
    Volume,
    /// `space space list space`: gradients interleaved per slice.
    Slice,
    /// `list space space space`: gradients interleaved per voxel.
    Pixel,
}

impl Interleaving {
    /// Every scheme, in classification order.
    pub const ALL: [Self; 3] = [Self::Volume, Self::Slice, Self::Pixel];

    /// Scheme name, e.g. `volume_interleaved`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Volume => "volume_interleaved",
            Self::Slice => "slice_interleaved",
            Self::Pixel => "pixel_interleaved",
        }
    }

    /// Kind pattern that identifies this scheme.
    pub const fn kinds(self) -> [&'static str; KIND_AXES] {
        match self {
            Self::Volume => [SPACE_KIND, SPACE_KIND, SPACE_KIND, LIST_KIND],
            Self::Slice => [SPACE_KIND, SPACE_KIND, LIST_KIND, SPACE_KIND],
            Self::Pixel => [LIST_KIND, SPACE_KIND, SPACE_KIND, SPACE_KIND],
        }
    }

    /// Classify four axis kinds by exact match.
    pub fn classify<T: AsRef<str>>(kinds: &[T; KIND_AXES]) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|scheme| {
                scheme
                    .kinds()
                    .iter()
                    .zip(kinds)
                    .all(|(expected, actual)| *expected == actual.as_ref())
            })
            .ok_or_else(|| {
                Error::UnclassifiedPattern(kinds.iter().map(|k| k.as_ref().to_string()).collect())
            })
    }
}

impl std::fmt::Display for Interleaving {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// NRRD anatomical space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Space {
    /// RAS.
    RightAnteriorSuperior,
    /// LAS.
    LeftAnteriorSuperior,
    /// LPS.
    LeftPosteriorSuperior,
    /// Scanner coordinates.
    ScannerXyz,
    /// Generic right-handed frame.
    RightHanded3D,
    /// Generic left-handed frame.
    LeftHanded3D,
}

impl Space {
    /// NRRD spelling.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RightAnteriorSuperior => "right-anterior-superior",
            Self::LeftAnteriorSuperior => "left-anterior-superior",
            Self::LeftPosteriorSuperior => "left-posterior-superior",
            Self::ScannerXyz => "scanner-xyz",
            Self::RightHanded3D => "3D-right-handed",
            Self::LeftHanded3D => "3D-left-handed",
        }
    }
}

impl std::fmt::Display for Space {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Space {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "right-anterior-superior" | "ras" => Ok(Self::RightAnteriorSuperior),
            "left-anterior-superior" | "las" => Ok(Self::LeftAnteriorSuperior),
            "left-posterior-superior" | "lps" => Ok(Self::LeftPosteriorSuperior),
            "scanner-xyz" => Ok(Self::ScannerXyz),
            "3d-right-handed" => Ok(Self::RightHanded3D),
            "3d-left-handed" => Ok(Self::LeftHanded3D),
            _ => Err(Error::InvalidValue(format!("unknown space '{}'", s))),
        }
    }
}

fn check_axis(axis: usize, count: usize, what: &str) -> Result<()> {
    if axis >= count {
        return Err(Error::InvalidValue(format!(
            "{} axis {} out of range (0..{})",
            what, axis, count
        )));
    }
    Ok(())
}

impl<S: MetaDataStore> DwiValidator<S> {
    /// Centering tags of the three spatial axes; absent axes are `None`.
    pub fn centerings(&self) -> [Option<String>; SPATIAL_AXES] {
        std::array::from_fn(|axis| {
            self.store()
                .get(&DwiField::Centering(axis).key())
                .and_then(MetaDataValue::as_text)
                .map(str::to_string)
        })
    }

    /// Set the centering of spatial axis `axis` to `cell` or `node`.
    ///
    /// `none` and `???` are rejected: a spatial axis cannot lose its centering.
    pub fn set_centering(&mut self, axis: usize, tag: &str) -> Result<()> {
        check_axis(axis, SPATIAL_AXES, "spatial")?;
        let centering: Centering = tag.parse()?;
        let key = DwiField::Centering(axis).key();
        trace!(key = %key, centering = %centering, "setting centering");
        self.store_mut()
            .set(&key, MetaDataValue::Text(centering.as_str().to_string()));
        Ok(())
    }

    /// Set all three spatial centerings in order.
    ///
    /// Stops at the first invalid tag; earlier axes keep their new value.
    pub fn set_centerings<T: AsRef<str>>(&mut self, tags: &[T; SPATIAL_AXES]) -> Result<()> {
        for (axis, tag) in tags.iter().enumerate() {
            self.set_centering(axis, tag.as_ref())?;
        }
        Ok(())
    }

    pub(crate) fn require_spatial_centerings(&self) -> Result<()> {
        for axis in 0..SPATIAL_AXES {
            let key = DwiField::Centering(axis).key();
            self.text(&key)?.parse::<Centering>()?;
        }
        Ok(())
    }

    /// Kind tag of `axis`, unvalidated.
    pub fn kind(&self, axis: usize) -> Result<String> {
        let key = DwiField::Kind(axis).key();
        self.text(&key).map(str::to_string)
    }

    /// Kind tags of all four axes. Every one must be present.
    pub fn kinds(&self) -> Result<[String; KIND_AXES]> {
        let mut kinds: [String; KIND_AXES] = Default::default();
        for (axis, slot) in kinds.iter_mut().enumerate() {
            *slot = self.kind(axis)?;
        }
        Ok(kinds)
    }

    /// Interleaving scheme implied by the four axis kinds.
    pub fn interleaving(&self) -> Result<Interleaving> {
        Interleaving::classify(&self.kinds()?)
    }

    /// Name of the interleaving scheme, e.g. `volume_interleaved`.
    pub fn kinds_string(&self) -> Result<&'static str> {
        self.interleaving().map(Interleaving::as_str)
    }

    /// Set the kind tag of one axis.
    pub fn set_kind(&mut self, axis: usize, kind: &str) -> Result<()> {
        check_axis(axis, KIND_AXES, "kind")?;
        if kind.trim().is_empty() {
            return Err(Error::InvalidValue(format!("empty kind for axis {}", axis)));
        }
        self.store_mut()
            .set(&DwiField::Kind(axis).key(), MetaDataValue::Text(kind.to_string()));
        Ok(())
    }

    /// Set all four kind tags in order, stopping at the first invalid one.
    pub fn set_kinds<T: AsRef<str>>(&mut self, kinds: &[T; KIND_AXES]) -> Result<()> {
        for (axis, kind) in kinds.iter().enumerate() {
            self.set_kind(axis, kind.as_ref())?;
        }
        Ok(())
    }

    /// Write the kind pattern of `scheme`.
    pub fn set_interleaving(&mut self, scheme: Interleaving) {
        for (axis, kind) in scheme.kinds().into_iter().enumerate() {
            self.store_mut()
                .set(&DwiField::Kind(axis).key(), MetaDataValue::Text(kind.to_string()));
        }
    }

    /// Label of `axis`, if any.
    pub fn label(&self, axis: usize) -> Option<String> {
        self.store()
            .get(&DwiField::Label(axis).key())
            .and_then(MetaDataValue::as_text)
            .map(str::to_string)
    }

    /// Set the label of `axis`.
    pub fn set_label(&mut self, axis: usize, label: &str) -> Result<()> {
        check_axis(axis, KIND_AXES, "label")?;
        self.store_mut()
            .set(&DwiField::Label(axis).key(), MetaDataValue::Text(label.to_string()));
        Ok(())
    }

    /// Slice thickness of `axis`.
    pub fn thickness(&self, axis: usize) -> Result<f64> {
        self.number(&DwiField::Thickness(axis).key())
    }

    /// Set the slice thickness of spatial axis `axis`. Must be finite and non-negative.
    pub fn set_thickness(&mut self, axis: usize, thickness: f64) -> Result<()> {
        check_axis(axis, SPATIAL_AXES, "spatial")?;
        if !thickness.is_finite() || thickness < 0.0 {
            return Err(Error::InvalidValue(format!(
                "thickness must be finite and non-negative (got {})",
                thickness
            )));
        }
        self.store_mut()
            .set(&DwiField::Thickness(axis).key(), MetaDataValue::Double(thickness));
        Ok(())
    }

    /// Anatomical space.
    pub fn space(&self) -> Result<Space> {
        self.text(SPACE_KEY)?.parse()
    }

    /// Set the anatomical space.
    pub fn set_space(&mut self, space: Space) {
        self.store_mut()
            .set(SPACE_KEY, MetaDataValue::Text(space.as_str().to_string()));
    }
}
