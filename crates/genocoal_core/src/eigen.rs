//! Eigen decomposition of a substitution rate generator.
//!
//! Likelihood engines that compose transition matrices directly from
//! eigenstructure use `transition_matrix`; models with a closed form must agree
//! with it.

use crate::error::ModelError;
use nalgebra::{DMatrix, DVector};
use serde::Serialize;

/// Largest deviation from the identity accepted for `V⁻¹·V`.
const INVERSE_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone)]
pub struct EigenDecomposition {
    eigenvalues: DVector<f64>,
    eigenvectors: DMatrix<f64>,
    inverse_eigenvectors: DMatrix<f64>,
}

/// Plain row-major copy of a decomposition for hosts outside Rust.
#[derive(Debug, Clone, Serialize)]
pub struct EigenSnapshot {
    pub state_count: usize,
    pub eigenvalues: Vec<f64>,
    pub eigenvectors: Vec<f64>,
    pub inverse_eigenvectors: Vec<f64>,
}

impl EigenDecomposition {
    /// Builds a decomposition from row-major tables, checking that the inverse
    /// really inverts the eigenvectors.
    pub fn new(
        eigenvectors: &[f64],
        inverse_eigenvectors: &[f64],
        eigenvalues: &[f64],
    ) -> Result<Self, ModelError> {
        let n = eigenvalues.len();
        if n == 0 {
            return Err(ModelError::EigenDimensionMismatch(
                "no eigenvalues supplied".to_string(),
            ));
        }
        if eigenvectors.len() != n * n || inverse_eigenvectors.len() != n * n {
            return Err(ModelError::EigenDimensionMismatch(format!(
                "expected {} matrix entries for {} eigenvalues, got {} and {}",
                n * n,
                n,
                eigenvectors.len(),
                inverse_eigenvectors.len()
            )));
        }

        let decomposition = Self::from_row_tables(eigenvectors, inverse_eigenvectors, eigenvalues);
        let deviation = decomposition.inverse_deviation();
        if deviation.is_nan() || deviation > INVERSE_TOLERANCE {
            return Err(ModelError::InconsistentEigenDecomposition { deviation });
        }
        Ok(decomposition)
    }

    /// Builds a decomposition from tables already known to be consistent.
    pub(crate) fn from_row_tables(
        eigenvectors: &[f64],
        inverse_eigenvectors: &[f64],
        eigenvalues: &[f64],
    ) -> Self {
        let n = eigenvalues.len();
        Self {
            eigenvalues: DVector::from_column_slice(eigenvalues),
            eigenvectors: DMatrix::from_row_slice(n, n, eigenvectors),
            inverse_eigenvectors: DMatrix::from_row_slice(n, n, inverse_eigenvectors),
        }
    }

    pub fn state_count(&self) -> usize {
        self.eigenvalues.len()
    }

    pub fn eigenvalues(&self) -> &DVector<f64> {
        &self.eigenvalues
    }

    pub fn eigenvectors(&self) -> &DMatrix<f64> {
        &self.eigenvectors
    }

    pub fn inverse_eigenvectors(&self) -> &DMatrix<f64> {
        &self.inverse_eigenvectors
    }

    /// Max absolute entry of `V⁻¹·V − I`.
    pub fn inverse_deviation(&self) -> f64 {
        let n = self.state_count();
        let product = &self.inverse_eigenvectors * &self.eigenvectors;
        (product - DMatrix::<f64>::identity(n, n)).amax()
    }

    /// Reconstructs the generator `V·diag(λ)·V⁻¹`.
    pub fn rate_matrix(&self) -> DMatrix<f64> {
        self.compose(|lambda| lambda)
    }

    /// `exp(Q·distance)` through the eigenstructure, where `distance` is the
    /// branch length already multiplied by the rate.
    pub fn transition_matrix(&self, distance: f64) -> DMatrix<f64> {
        self.compose(|lambda| (lambda * distance).exp())
    }

    fn compose(&self, f: impl Fn(f64) -> f64) -> DMatrix<f64> {
        let diag = DMatrix::from_diagonal(&self.eigenvalues.map(f));
        &self.eigenvectors * diag * &self.inverse_eigenvectors
    }

    pub fn snapshot(&self) -> EigenSnapshot {
        // nalgebra stores column-major; the transpose's storage is row-major.
        EigenSnapshot {
            state_count: self.state_count(),
            eigenvalues: self.eigenvalues.iter().copied().collect(),
            eigenvectors: self.eigenvectors.transpose().as_slice().to_vec(),
            inverse_eigenvectors: self.inverse_eigenvectors.transpose().as_slice().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::EigenDecomposition;
    use crate::error::ModelError;

    // Two-state symmetric chain with unit off-diagonal rate.
    const VECTORS: [f64; 4] = [1.0, 1.0, 1.0, -1.0];
    const INVERSE: [f64; 4] = [0.5, 0.5, 0.5, -0.5];
    const VALUES: [f64; 2] = [0.0, -2.0];

    #[test]
    fn new_accepts_consistent_tables() {
        let eigen = EigenDecomposition::new(&VECTORS, &INVERSE, &VALUES).expect("valid");
        assert_eq!(eigen.state_count(), 2);
        assert!(eigen.inverse_deviation() < 1e-15);

        let q = eigen.rate_matrix();
        assert!((q[(0, 0)] + 1.0).abs() < 1e-15);
        assert!((q[(0, 1)] - 1.0).abs() < 1e-15);
    }

    #[test]
    fn new_rejects_mismatched_dimensions() {
        let err = EigenDecomposition::new(&VECTORS[..3], &INVERSE, &VALUES).expect_err("bad len");
        assert!(matches!(err, ModelError::EigenDimensionMismatch(_)));
        let err = EigenDecomposition::new(&[], &[], &[]).expect_err("empty");
        assert!(matches!(err, ModelError::EigenDimensionMismatch(_)));
    }

    #[test]
    fn new_rejects_wrong_inverse() {
        let wrong = [1.0, 0.0, 0.0, 1.0];
        let err = EigenDecomposition::new(&VECTORS, &wrong, &VALUES).expect_err("inconsistent");
        assert!(matches!(
            err,
            ModelError::InconsistentEigenDecomposition { deviation } if deviation > 0.5
        ));
    }

    #[test]
    fn transition_matrix_matches_two_state_closed_form() {
        let eigen = EigenDecomposition::new(&VECTORS, &INVERSE, &VALUES).expect("valid");
        let p = eigen.transition_matrix(0.3);
        let decay = (-0.6f64).exp();
        assert!((p[(0, 0)] - 0.5 * (1.0 + decay)).abs() < 1e-15);
        assert!((p[(1, 0)] - 0.5 * (1.0 - decay)).abs() < 1e-15);
    }

    #[test]
    fn snapshot_is_row_major() {
        let vectors = [1.0, 2.0, 3.0, 4.0];
        let eigen = EigenDecomposition::from_row_tables(&vectors, &INVERSE, &VALUES);
        let snapshot = eigen.snapshot();
        assert_eq!(snapshot.state_count, 2);
        assert_eq!(snapshot.eigenvectors, vectors.to_vec());
        assert_eq!(snapshot.inverse_eigenvectors, INVERSE.to_vec());
        assert_eq!(snapshot.eigenvalues, VALUES.to_vec());
    }
}
