use thiserror::Error;

/// Errors raised while building or querying the kernels.
///
/// Numeric degeneracies (division by a vanishing intensity, logarithms of
/// non-positive arguments) are not represented here: they propagate as
/// infinite or NaN values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("Frequencies for the {model} model must be uniform at {expected}; omit them or pass the uniform vector.")]
    FixedFrequencies { model: &'static str, expected: f64 },

    #[error("Transition matrix buffer has length {actual}, expected {expected}.")]
    TransitionBufferSize { expected: usize, actual: usize },

    #[error("Eigen decomposition dimension mismatch: {0}.")]
    EigenDimensionMismatch(String),

    #[error("Inverse eigenvectors do not invert the eigenvectors (max deviation from identity {deviation:e}).")]
    InconsistentEigenDecomposition { deviation: f64 },

    #[error("Parameter `{id}` has invalid bounds [{lower}, {upper}].")]
    InvalidBounds { id: String, lower: f64, upper: f64 },
}
