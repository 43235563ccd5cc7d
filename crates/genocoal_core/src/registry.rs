//! Capability-based lookup of substitution models by data type.

use crate::traits::{DataType, SubstitutionModel};

type SharedModel = Box<dyn SubstitutionModel + Send + Sync>;

/// Ordered list of named models; earlier registrations win.
#[derive(Default)]
pub struct ModelRegistry {
    entries: Vec<(String, SharedModel)>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: impl Into<String>, model: SharedModel) {
        self.entries.push((name.into(), model));
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn select(&self, data_type: DataType) -> Option<(&str, &dyn SubstitutionModel)> {
        self.entries
            .iter()
            .find(|(_, model)| model.can_handle(data_type))
            .map(|(name, model)| (name.as_str(), &**model as &dyn SubstitutionModel))
    }
}

#[cfg(test)]
mod tests {
    use super::ModelRegistry;
    use crate::genotype::JukesCantorGenotypes;
    use crate::traits::DataType;

    #[test]
    fn select_returns_first_capable_model() {
        let mut registry = ModelRegistry::new();
        registry.register("jc-genotypes", Box::new(JukesCantorGenotypes::new()));
        registry.register("jc-genotypes-copy", Box::new(JukesCantorGenotypes::new()));

        assert_eq!(registry.names(), vec!["jc-genotypes", "jc-genotypes-copy"]);

        let (name, model) = registry
            .select(DataType::NucleotideGenotype)
            .expect("genotype data should be handled");
        assert_eq!(name, "jc-genotypes");
        assert_eq!(model.state_count(), 16);
    }

    #[test]
    fn select_returns_none_without_capable_model() {
        let mut registry = ModelRegistry::new();
        assert!(registry.select(DataType::Nucleotide).is_none());
        registry.register("jc-genotypes", Box::new(JukesCantorGenotypes::new()));
        assert!(registry.select(DataType::AminoAcid).is_none());
    }
}
