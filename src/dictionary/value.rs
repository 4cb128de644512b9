//! Typed values held by the metadata dictionary.

/// A single dictionary value.
///
/// NRRD readers store most fields as text. Axis thicknesses arrive as doubles
/// and the measurement frame as a nested row list.
#[derive(Debug, Clone, PartialEq)]
pub enum MetaDataValue {
    /// UTF-8 text.
    Text(String),
    /// Double-precision number.
    Double(f64),
    /// Signed integer.
    Integer(i64),
    /// Row-major matrix of doubles.
    Matrix(Vec<Vec<f64>>),
}

impl MetaDataValue {
    /// Text payload, if this is [`MetaDataValue::Text`].
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Numeric payload of a double or integer value.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Double(v) => Some(*v),
            Self::Integer(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// Matrix payload, if this is [`MetaDataValue::Matrix`].
    pub fn as_matrix(&self) -> Option<&[Vec<f64>]> {
        match self {
            Self::Matrix(rows) => Some(rows.as_slice()),
            _ => None,
        }
    }

    /// Short name of the variant, used in error messages.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Double(_) => "double",
            Self::Integer(_) => "integer",
            Self::Matrix(_) => "matrix",
        }
    }
}

impl From<&str> for MetaDataValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for MetaDataValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for MetaDataValue {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<i64> for MetaDataValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<Vec<Vec<f64>>> for MetaDataValue {
    fn from(value: Vec<Vec<f64>>) -> Self {
        Self::Matrix(value)
    }
}

impl std::fmt::Display for MetaDataValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{}", s),
            Self::Double(v) => write!(f, "{}", v),
            Self::Integer(v) => write!(f, "{}", v),
            Self::Matrix(rows) => {
                for (i, row) in rows.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "(")?;
                    for (j, v) in row.iter().enumerate() {
                        if j > 0 {
                            write!(f, ",")?;
                        }
                        write!(f, "{}", v)?;
                    }
                    write!(f, ")")?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        assert_eq!(MetaDataValue::from("cell").as_text(), Some("cell"));
        assert_eq!(MetaDataValue::from(2.5).as_f64(), Some(2.5));
        assert_eq!(MetaDataValue::from(4i64).as_f64(), Some(4.0));
        assert_eq!(MetaDataValue::from("4").as_f64(), None);
        assert!(MetaDataValue::from(1.0).as_matrix().is_none());
    }

    #[test]
    fn test_matrix_display() {
        let value = MetaDataValue::from(vec![vec![1.0, 0.0], vec![0.0, -1.0]]);
        assert_eq!(value.to_string(), "(1,0) (0,-1)");
        assert_eq!(value.type_name(), "matrix");
    }
}
