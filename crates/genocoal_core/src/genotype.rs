//! Jukes-Cantor process over the 16 unphased diploid genotypes.
//!
//! All 16 states exchange at the same rate, so the generator has a single
//! zero eigenvalue (the uniform stationary vector) and fifteen eigenvalues
//! equal to -16/15. The eigenvectors are solved analytically and stored as
//! tables instead of being recomputed at runtime.

use crate::eigen::EigenDecomposition;
use crate::error::ModelError;
use crate::traits::{DataType, SubstitutionModel};
use log::{debug, warn};

pub const STATE_COUNT: usize = 16;

const STATIONARY_FREQUENCY: f64 = 1.0 / STATE_COUNT as f64;

/// Shared value of the fifteen non-zero eigenvalues, normalised so the mean
/// substitution rate at stationarity is one.
const DECAY_EIGENVALUE: f64 = -16.0 / 15.0;

#[rustfmt::skip]
const EIGENVALUES: [f64; STATE_COUNT] = [
    0.0,              DECAY_EIGENVALUE, DECAY_EIGENVALUE, DECAY_EIGENVALUE,
    DECAY_EIGENVALUE, DECAY_EIGENVALUE, DECAY_EIGENVALUE, DECAY_EIGENVALUE,
    DECAY_EIGENVALUE, DECAY_EIGENVALUE, DECAY_EIGENVALUE, DECAY_EIGENVALUE,
    DECAY_EIGENVALUE, DECAY_EIGENVALUE, DECAY_EIGENVALUE, DECAY_EIGENVALUE,
];

#[rustfmt::skip]
const EIGENVECTORS: [f64; STATE_COUNT * STATE_COUNT] = [
     1.0,  2.0,  0.5,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,
     1.0, -2.0,  0.0,  0.5,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,
     1.0,  2.0, -0.5,  0.0,  0.5,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,
     1.0, -2.0,  0.0, -0.5,  0.0,  0.5,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,
     1.0,  2.0,  0.0,  0.0, -0.5,  0.0,  0.5,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,
     1.0, -2.0,  0.0,  0.0,  0.0, -0.5,  0.0,  0.5,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,
     1.0,  2.0,  0.0,  0.0,  0.0,  0.0, -0.5,  0.0,  0.5,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,
     1.0, -2.0,  0.0,  0.0,  0.0,  0.0,  0.0, -0.5,  0.0,  0.5,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,
     1.0,  2.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0, -0.5,  0.0,  0.5,  0.0,  0.0,  0.0,  0.0,  0.0,
     1.0, -2.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0, -0.5,  0.0,  0.5,  0.0,  0.0,  0.0,  0.0,
     1.0,  2.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0, -0.5,  0.0,  0.5,  0.0,  0.0,  0.0,
     1.0, -2.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0, -0.5,  0.0,  0.5,  0.0,  0.0,
     1.0,  2.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0, -0.5,  0.0,  0.5,  0.0,
     1.0, -2.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0, -0.5,  0.0,  0.5,
     1.0,  2.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0, -0.5,  0.0,
     1.0, -2.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0, -0.5,
];

#[rustfmt::skip]
const INVERSE_EIGENVECTORS: [f64; STATE_COUNT * STATE_COUNT] = [
      0.0625,   0.0625,   0.0625,   0.0625,   0.0625,   0.0625,   0.0625,   0.0625,   0.0625,   0.0625,   0.0625,   0.0625,   0.0625,   0.0625,   0.0625,   0.0625,
     0.03125, -0.03125,  0.03125, -0.03125,  0.03125, -0.03125,  0.03125, -0.03125,  0.03125, -0.03125,  0.03125, -0.03125,  0.03125, -0.03125,  0.03125, -0.03125,
        1.75,      0.0,    -0.25,      0.0,    -0.25,      0.0,    -0.25,      0.0,    -0.25,      0.0,    -0.25,      0.0,    -0.25,      0.0,    -0.25,      0.0,
         0.0,     1.75,      0.0,    -0.25,      0.0,    -0.25,      0.0,    -0.25,      0.0,    -0.25,      0.0,    -0.25,      0.0,    -0.25,      0.0,    -0.25,
         1.5,      0.0,      1.5,      0.0,     -0.5,      0.0,     -0.5,      0.0,     -0.5,      0.0,     -0.5,      0.0,     -0.5,      0.0,     -0.5,      0.0,
         0.0,      1.5,      0.0,      1.5,      0.0,     -0.5,      0.0,     -0.5,      0.0,     -0.5,      0.0,     -0.5,      0.0,     -0.5,      0.0,     -0.5,
        1.25,      0.0,     1.25,      0.0,     1.25,      0.0,    -0.75,      0.0,    -0.75,      0.0,    -0.75,      0.0,    -0.75,      0.0,    -0.75,      0.0,
         0.0,     1.25,      0.0,     1.25,      0.0,     1.25,      0.0,    -0.75,      0.0,    -0.75,      0.0,    -0.75,      0.0,    -0.75,      0.0,    -0.75,
         1.0,      0.0,      1.0,      0.0,      1.0,      0.0,      1.0,      0.0,     -1.0,      0.0,     -1.0,      0.0,     -1.0,      0.0,     -1.0,      0.0,
         0.0,      1.0,      0.0,      1.0,      0.0,      1.0,      0.0,      1.0,      0.0,     -1.0,      0.0,     -1.0,      0.0,     -1.0,      0.0,     -1.0,
        0.75,      0.0,     0.75,      0.0,     0.75,      0.0,     0.75,      0.0,     0.75,      0.0,    -1.25,      0.0,    -1.25,      0.0,    -1.25,      0.0,
         0.0,     0.75,      0.0,     0.75,      0.0,     0.75,      0.0,     0.75,      0.0,     0.75,      0.0,    -1.25,      0.0,    -1.25,      0.0,    -1.25,
         0.5,      0.0,      0.5,      0.0,      0.5,      0.0,      0.5,      0.0,      0.5,      0.0,      0.5,      0.0,     -1.5,      0.0,     -1.5,      0.0,
         0.0,      0.5,      0.0,      0.5,      0.0,      0.5,      0.0,      0.5,      0.0,      0.5,      0.0,      0.5,      0.0,     -1.5,      0.0,     -1.5,
        0.25,      0.0,     0.25,      0.0,     0.25,      0.0,     0.25,      0.0,     0.25,      0.0,     0.25,      0.0,     0.25,      0.0,    -1.75,      0.0,
         0.0,     0.25,      0.0,     0.25,      0.0,     0.25,      0.0,     0.25,      0.0,     0.25,      0.0,     0.25,      0.0,     0.25,      0.0,    -1.75,
];

#[derive(Debug, Clone)]
pub struct JukesCantorGenotypes {
    frequencies: [f64; STATE_COUNT],
    eigen_decomposition: EigenDecomposition,
}

impl Default for JukesCantorGenotypes {
    fn default() -> Self {
        Self::new()
    }
}

impl JukesCantorGenotypes {
    pub fn new() -> Self {
        debug!("Building Jukes-Cantor genotype model with {STATE_COUNT} states");
        Self {
            frequencies: [STATIONARY_FREQUENCY; STATE_COUNT],
            eigen_decomposition: EigenDecomposition::from_row_tables(
                &EIGENVECTORS,
                &INVERSE_EIGENVECTORS,
                &EIGENVALUES,
            ),
        }
    }

    /// Builds the model from caller-supplied frequencies. Only the uniform
    /// vector is accepted since frequencies are not free in this model.
    pub fn with_frequencies(frequencies: &[f64]) -> Result<Self, ModelError> {
        let uniform = frequencies.len() == STATE_COUNT
            && frequencies
                .iter()
                .all(|f| (f - STATIONARY_FREQUENCY).abs() <= 1e-12);
        if !uniform {
            return Err(ModelError::FixedFrequencies {
                model: "Jukes-Cantor genotype",
                expected: STATIONARY_FREQUENCY,
            });
        }
        warn!("Explicit frequencies are redundant for the Jukes-Cantor genotype model");
        Ok(Self::new())
    }
}

impl SubstitutionModel for JukesCantorGenotypes {
    fn state_count(&self) -> usize {
        STATE_COUNT
    }

    fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    fn transition_probabilities(
        &self,
        start_time: f64,
        end_time: f64,
        rate: f64,
        matrix: &mut [f64],
    ) -> Result<(), ModelError> {
        if matrix.len() != STATE_COUNT * STATE_COUNT {
            return Err(ModelError::TransitionBufferSize {
                expected: STATE_COUNT * STATE_COUNT,
                actual: matrix.len(),
            });
        }

        let delta = 16.0 / 15.0 * (start_time - end_time);
        let decay = (-delta * rate).exp();
        let p_stay = (1.0 + 15.0 * decay) / 16.0;
        let p_move = (1.0 - decay) / 16.0;

        matrix.fill(p_move);
        for i in 0..STATE_COUNT {
            matrix[i * (STATE_COUNT + 1)] = p_stay;
        }
        Ok(())
    }

    fn eigen_decomposition(&self) -> &EigenDecomposition {
        &self.eigen_decomposition
    }

    fn can_handle(&self, data_type: DataType) -> bool {
        matches!(
            data_type,
            DataType::Nucleotide | DataType::NucleotideGenotype
        )
    }
}
