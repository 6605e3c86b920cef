//! Coefficient lists for linear dynamic elements.
//!
//! Hosts author numerator/denominator polynomials as comma-separated text
//! (e.g. `"1, 0.5, -2"`). Parsing happens once, at configuration time, and
//! malformed text is a typed [`CoefficientError`] — the engine never sees
//! raw text and NaN can never enter a tick through this path.

use crate::error::CoefficientError;
use serde::{Deserialize, Serialize};

/// A parsed, validated coefficient list.
///
/// Stored most-significant-first, matching the authored order: index 0 is
/// b₀ (or a₀) of the difference equation.
///
/// # Examples
///
/// ```
/// use weft_core::Coefficients;
///
/// let c = Coefficients::parse("1, 0.5, -2").unwrap();
/// assert_eq!(c.as_slice(), &[1.0, 0.5, -2.0]);
/// assert!(Coefficients::parse("1,,2").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Coefficients(Vec<f64>);

impl Coefficients {
    /// Parse a comma-separated coefficient list.
    ///
    /// # Errors
    ///
    /// [`CoefficientError::Empty`] when the text contains no tokens,
    /// [`CoefficientError::Invalid`] when a token does not parse as a
    /// float, and [`CoefficientError::NonFinite`] when a token parses to
    /// an infinity or NaN.
    pub fn parse(text: &str) -> Result<Self, CoefficientError> {
        if text.trim().is_empty() {
            return Err(CoefficientError::Empty);
        }
        let mut values = Vec::new();
        for (index, token) in text.split(',').enumerate() {
            let token = token.trim();
            let value: f64 = token.parse().map_err(|_| CoefficientError::Invalid {
                index,
                token: token.to_string(),
            })?;
            if !value.is_finite() {
                return Err(CoefficientError::NonFinite { index });
            }
            values.push(value);
        }
        Ok(Self(values))
    }

    /// Construct from already-validated values.
    ///
    /// # Errors
    ///
    /// [`CoefficientError::Empty`] for an empty slice,
    /// [`CoefficientError::NonFinite`] when any value is not finite.
    pub fn from_values(values: &[f64]) -> Result<Self, CoefficientError> {
        if values.is_empty() {
            return Err(CoefficientError::Empty);
        }
        if let Some(index) = values.iter().position(|v| !v.is_finite()) {
            return Err(CoefficientError::NonFinite { index });
        }
        Ok(Self(values.to_vec()))
    }

    /// The coefficients as a slice, most-significant-first.
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Number of coefficients.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the list is empty. Parsed lists never are; this exists for
    /// deserialized values, which are re-checked at normalization.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Divide every coefficient by `a0`, the leading denominator
    /// coefficient.
    ///
    /// # Errors
    ///
    /// [`CoefficientError::ZeroLeading`] when `a0` is zero (within f64
    /// exactness) — the difference equation would be undefined.
    pub fn normalized_by(&self, a0: f64) -> Result<Vec<f64>, CoefficientError> {
        if a0 == 0.0 {
            return Err(CoefficientError::ZeroLeading);
        }
        Ok(self.0.iter().map(|c| c / a0).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_list() {
        let c = Coefficients::parse("1,2,3").unwrap();
        assert_eq!(c.as_slice(), &[1.0, 2.0, 3.0]);
        assert_eq!(c.len(), 3);
    }

    #[test]
    fn parses_with_whitespace_and_signs() {
        let c = Coefficients::parse(" 1.5 , -0.25,+3 ").unwrap();
        assert_eq!(c.as_slice(), &[1.5, -0.25, 3.0]);
    }

    #[test]
    fn single_coefficient() {
        let c = Coefficients::parse("4").unwrap();
        assert_eq!(c.as_slice(), &[4.0]);
    }

    #[test]
    fn empty_text_is_error() {
        assert_eq!(Coefficients::parse(""), Err(CoefficientError::Empty));
        assert_eq!(Coefficients::parse("   "), Err(CoefficientError::Empty));
    }

    #[test]
    fn bad_token_reports_index_and_text() {
        let err = Coefficients::parse("1,abc,3").unwrap_err();
        assert_eq!(
            err,
            CoefficientError::Invalid {
                index: 1,
                token: "abc".to_string()
            }
        );
    }

    #[test]
    fn blank_token_is_invalid_not_zero() {
        // "1,,2" must not silently become [1, 0, 2].
        assert!(matches!(
            Coefficients::parse("1,,2"),
            Err(CoefficientError::Invalid { index: 1, .. })
        ));
    }

    #[test]
    fn non_finite_rejected() {
        assert_eq!(
            Coefficients::parse("1,inf"),
            Err(CoefficientError::NonFinite { index: 1 })
        );
        assert_eq!(
            Coefficients::from_values(&[1.0, f64::NAN]),
            Err(CoefficientError::NonFinite { index: 1 })
        );
    }

    #[test]
    fn normalization_divides_through() {
        let c = Coefficients::parse("2,4,6").unwrap();
        assert_eq!(c.normalized_by(2.0).unwrap(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn zero_leading_rejected() {
        let c = Coefficients::parse("1,1").unwrap();
        assert_eq!(c.normalized_by(0.0), Err(CoefficientError::ZeroLeading));
    }
}
