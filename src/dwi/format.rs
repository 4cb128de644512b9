//! Text codecs for numeric DWI fields.
//!
//! Values are written fixed-point with six decimals (`1.000000`), never in
//! exponent form, so NRRD writers can copy them into the header verbatim.

use super::GradientVector;
use crate::error::{Error, Result};

/// Fixed-point text for one number.
pub fn format_fixed(value: f64) -> String {
    format!("{:.6}", value)
}

/// Three space-separated fixed-point numbers.
pub fn format_vector(vector: &GradientVector) -> String {
    format!(
        "{} {} {}",
        format_fixed(vector[0]),
        format_fixed(vector[1]),
        format_fixed(vector[2])
    )
}

/// Parse one floating-point number, ignoring surrounding whitespace.
pub fn parse_f64(key: &str, text: &str) -> Result<f64> {
    let trimmed = text.trim();
    trimmed
        .parse()
        .map_err(|_| Error::malformed(key, format!("'{}' is not a number", trimmed)))
}

/// Parse a non-negative integer count.
pub fn parse_count(key: &str, text: &str) -> Result<usize> {
    let trimmed = text.trim();
    trimmed.parse().map_err(|_| {
        Error::malformed(key, format!("'{}' is not a non-negative integer", trimmed))
    })
}

/// Parse the first three whitespace-separated numbers of `text`.
///
/// Trailing tokens are ignored.
pub fn parse_vector(key: &str, text: &str) -> Result<GradientVector> {
    let mut out = [0.0; 3];
    let mut tokens = text.split_whitespace();
    for (i, slot) in out.iter_mut().enumerate() {
        let token = tokens.next().ok_or_else(|| {
            Error::malformed(key, format!("expected 3 numbers, got {} in '{}'", i, text))
        })?;
        *slot = token.parse().map_err(|_| {
            Error::malformed(key, format!("component {} '{}' is not a number", i, token))
        })?;
    }
    Ok(out)
}

/// Parse an NRRD vector list such as `(1,0,0) (0,1,0) (0,0,1)`.
///
/// Returns one row per parenthesised group. Empty input yields no rows.
pub fn parse_vector_list(key: &str, text: &str) -> Result<Vec<Vec<f64>>> {
    let mut rows = Vec::new();
    let mut rest = text.trim();
    while !rest.is_empty() {
        let body = rest
            .strip_prefix('(')
            .ok_or_else(|| Error::malformed(key, format!("expected '(' at '{}'", rest)))?;
        let close = body
            .find(')')
            .ok_or_else(|| Error::malformed(key, "unterminated vector"))?;

        let row = body[..close]
            .split(',')
            .map(|component| parse_f64(key, component))
            .collect::<Result<Vec<f64>>>()?;
        rows.push(row);

        rest = body[close + 1..].trim_start();
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_fixed_point() {
        assert_eq!(format_fixed(1000.0), "1000.000000");
        assert_eq!(format_fixed(0.5), "0.500000");
        assert_eq!(format_fixed(1e-9), "0.000000");
        assert_eq!(format_fixed(1.5e7), "15000000.000000");
    }

    #[test]
    fn test_format_vector() {
        assert_eq!(format_vector(&[1.0, 0.0, 0.0]), "1.000000 0.000000 0.000000");
        assert_eq!(
            format_vector(&[-0.5, 0.25, 0.707107]),
            "-0.500000 0.250000 0.707107"
        );
    }

    #[test]
    fn test_parse_vector() {
        assert_eq!(parse_vector("k", "1 0 0").unwrap(), [1.0, 0.0, 0.0]);
        assert_eq!(
            parse_vector("k", "  0.5\t-0.25  1e-3 ").unwrap(),
            [0.5, -0.25, 0.001]
        );
        assert_eq!(parse_vector("k", "1 2 3 4").unwrap(), [1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_parse_vector_too_short() {
        let err = parse_vector("DWMRI_gradient_0000", "1.0 2.0").unwrap_err();
        assert!(err.to_string().contains("expected 3 numbers, got 2"));
        assert!(parse_vector("k", "").is_err());
    }

    #[test]
    fn test_parse_vector_not_numeric() {
        let err = parse_vector("k", "1.0 abc 3.0").unwrap_err();
        assert!(matches!(err, Error::MalformedValue { .. }));
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("DWMRI_NEX", " 3 ").unwrap(), 3);
        assert!(parse_count("DWMRI_NEX", "-1").is_err());
        assert!(parse_count("DWMRI_NEX", "2.5").is_err());
    }

    #[test]
    fn test_parse_vector_list() {
        let rows = parse_vector_list("k", "(0,-1,0) (1, 0, 0)  (0,0,1)").unwrap();
        assert_eq!(
            rows,
            vec![
                vec![0.0, -1.0, 0.0],
                vec![1.0, 0.0, 0.0],
                vec![0.0, 0.0, 1.0]
            ]
        );
        assert!(parse_vector_list("k", "").unwrap().is_empty());
    }

    #[test]
    fn test_parse_vector_list_errors() {
        assert!(parse_vector_list("k", "1,0,0").is_err());
        assert!(parse_vector_list("k", "(1,0,0").is_err());
        assert!(parse_vector_list("k", "(none)").is_err());
    }
}
