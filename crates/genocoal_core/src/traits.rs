use crate::eigen::EigenDecomposition;
use crate::error::ModelError;
use crate::solvers::integrate;

/// Represents a first-order ODE system driven by the host time axis.
pub trait DynamicalSystem {
    /// Returns the dimension of the state space.
    fn dimension(&self) -> usize;

    /// Evaluates the vector field.
    /// t: current time
    /// x: current state
    /// out: buffer to write dx/dt
    fn apply(&self, t: f64, x: &[f64], out: &mut [f64]);
}

/// Kinds of alignment data a substitution model may be asked to handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Nucleotide,
    /// Unphased diploid genotypes built from nucleotide calls.
    NucleotideGenotype,
    AminoAcid,
    Binary,
    Standard,
}

impl DataType {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "nucleotide" => Some(DataType::Nucleotide),
            "nucleotidegenotype" | "nucleotide_genotype" => Some(DataType::NucleotideGenotype),
            "aminoacid" | "amino_acid" => Some(DataType::AminoAcid),
            "binary" => Some(DataType::Binary),
            "standard" => Some(DataType::Standard),
            _ => None,
        }
    }
}

/// A continuous-time Markov substitution process.
pub trait SubstitutionModel {
    fn state_count(&self) -> usize;

    /// Stationary frequencies, one per state.
    fn frequencies(&self) -> &[f64];

    /// Writes the row-major transition matrix for a branch running from
    /// `start_time` down to `end_time` into `matrix`.
    fn transition_probabilities(
        &self,
        start_time: f64,
        end_time: f64,
        rate: f64,
        matrix: &mut [f64],
    ) -> Result<(), ModelError>;

    fn eigen_decomposition(&self) -> &EigenDecomposition;

    fn can_handle(&self, data_type: DataType) -> bool;
}

/// Demographic function N(t) consumed by coalescent likelihoods.
///
/// Time runs backwards from the present (t = 0).
pub trait PopulationFunction {
    /// Identifiers of the parameters this function reads.
    fn parameter_ids(&self) -> Vec<String>;

    fn population_size(&self, t: f64) -> f64;

    fn intensity(&self, t: f64) -> f64;

    fn inverse_intensity(&self, x: f64) -> f64;

    /// Integral of the coalescent rate between `start` and `finish`.
    fn integral(&self, start: f64, finish: f64) -> f64 {
        self.intensity(finish) - self.intensity(start)
    }

    /// Integrates 1/N(t) over `[start, finish]` with `steps` RK4 steps.
    fn numerical_integral(&self, start: f64, finish: f64, steps: usize) -> f64 {
        let system = ReciprocalPopulation { function: self };
        let mut state = [0.0];
        integrate(&system, &mut state, start, finish, steps.max(1));
        state[0]
    }
}

struct ReciprocalPopulation<'a, P: PopulationFunction + ?Sized> {
    function: &'a P,
}

impl<P: PopulationFunction + ?Sized> DynamicalSystem for ReciprocalPopulation<'_, P> {
    fn dimension(&self) -> usize {
        1
    }

    fn apply(&self, t: f64, _x: &[f64], out: &mut [f64]) {
        out[0] = 1.0 / self.function.population_size(t);
    }
}

#[cfg(test)]
mod tests {
    use super::{DataType, PopulationFunction};

    struct ConstantPopulation {
        size: f64,
    }

    impl PopulationFunction for ConstantPopulation {
        fn parameter_ids(&self) -> Vec<String> {
            vec!["popSize".to_string()]
        }

        fn population_size(&self, _t: f64) -> f64 {
            self.size
        }

        fn intensity(&self, t: f64) -> f64 {
            t / self.size
        }

        fn inverse_intensity(&self, x: f64) -> f64 {
            x * self.size
        }
    }

    #[test]
    fn default_integral_is_intensity_difference() {
        let constant = ConstantPopulation { size: 4.0 };
        assert!((constant.integral(1.0, 3.0) - 0.5).abs() < 1e-15);
    }

    #[test]
    fn numerical_integral_matches_constant_closed_form() {
        let constant = ConstantPopulation { size: 4.0 };
        let value = constant.numerical_integral(1.0, 3.0, 10);
        assert!((value - 0.5).abs() < 1e-12);
        assert!((constant.numerical_integral(1.0, 3.0, 0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn data_type_names_parse_case_insensitively() {
        assert_eq!(DataType::from_name("Nucleotide"), Some(DataType::Nucleotide));
        assert_eq!(
            DataType::from_name("nucleotide_genotype"),
            Some(DataType::NucleotideGenotype)
        );
        assert_eq!(DataType::from_name("AMINOACID"), Some(DataType::AminoAcid));
        assert_eq!(DataType::from_name("codon"), None);
    }
}
