use crate::error::{KnnError, Result};

/// Returns the Euclidean distance between two feature vectors.
///
/// Fails with [`KnnError::DimensionMismatch`] if the vectors differ in length;
/// the shorter one is never silently zero-padded or truncated.
pub fn euclidean_distance(a: &[f64], b: &[f64]) -> Result<f64> {
    if a.len() != b.len() {
        return Err(KnnError::DimensionMismatch {
            expected: a.len(),
            found: b.len(),
        });
    }
    Ok(euclidean_distance_sq(a, b).sqrt())
}

/// Squared Euclidean distance. Callers must have checked lengths.
fn euclidean_distance_sq(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| (x - y) * (x - y))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_known_distance() {
        let d = euclidean_distance(&[0.0, 0.0], &[3.0, 4.0]).unwrap();
        assert_relative_eq!(d, 5.0);
    }

    #[test]
    fn test_identical_is_zero() {
        let a = [-0.0166, 0.0001, 0.0191];
        assert_eq!(euclidean_distance(&a, &a).unwrap(), 0.0);
    }

    #[test]
    fn test_dimension_mismatch() {
        let err = euclidean_distance(&[1.0, 2.0, 3.0], &[1.0, 2.0]).unwrap_err();
        assert!(matches!(
            err,
            KnnError::DimensionMismatch {
                expected: 3,
                found: 2
            }
        ));
    }

    proptest! {
        #[test]
        fn prop_symmetric_and_non_negative(
            pairs in prop::collection::vec((-1e3f64..1e3, -1e3f64..1e3), 1..16)
        ) {
            let (a, b): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();
            let ab = euclidean_distance(&a, &b).unwrap();
            let ba = euclidean_distance(&b, &a).unwrap();
            prop_assert!(ab >= 0.0);
            prop_assert!((ab - ba).abs() <= 1e-9 * ab.max(1.0));
            prop_assert_eq!(euclidean_distance(&a, &a).unwrap(), 0.0);
        }
    }
}
