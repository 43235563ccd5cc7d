pub mod config;
pub mod eigen;
pub mod error;
pub mod genotype;
pub mod limit_birth_death;
pub mod parameter;
pub mod registry;
pub mod solvers;
/// The `genocoal_core` crate provides the analytical kernels consumed by a
/// phylogenetic/coalescent inference engine.
/// Both kernels are closed forms: every query is O(1) and pure apart from
/// re-reading externally owned parameters.
///
/// Key components:
/// - **Traits**: `SubstitutionModel`, `PopulationFunction`, `DynamicalSystem`.
/// - **Genotype model**: Jukes-Cantor process over 16 unphased diploid genotypes,
///   with a fixed eigen decomposition.
/// - **Limit birth-death**: population size, intensity, integral and inverse
///   intensity of the limit birth-death coalescent approximation.
/// - **Solvers**: RK4 integration used to cross-check the closed forms.
pub mod traits;

pub use error::ModelError;
