//! WASM bindings for the genotype substitution and limit birth-death kernels.

mod genotype;
mod population;

pub use genotype::WasmGenotypeModel;
pub use population::WasmLimitBirthDeath;
