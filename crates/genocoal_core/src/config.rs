//! Serializable settings used by hosts to build the kernels.

use crate::genotype::JukesCantorGenotypes;
use crate::limit_birth_death::{LimitBirthDeath, DEFAULT_SHAPE};
use crate::parameter::RealParameter;
use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParameterSettings {
    pub id: String,
    pub value: f64,
}

impl ParameterSettings {
    pub fn new(id: &str, value: f64) -> Self {
        Self {
            id: id.to_string(),
            value,
        }
    }

    fn build(&self) -> Result<Arc<RealParameter>> {
        ensure!(!self.id.is_empty(), "Parameter id must not be empty.");
        ensure!(
            self.value.is_finite(),
            "Parameter `{}` must be finite, got {}.",
            self.id,
            self.value
        );
        Ok(Arc::new(RealParameter::new(self.id.clone(), self.value)))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LimitBirthDeathSettings {
    pub scaled_growth_rate: ParameterSettings,
    pub time_origin: ParameterSettings,
    pub pop_size: ParameterSettings,
    pub k: f64,
}

impl Default for LimitBirthDeathSettings {
    fn default() -> Self {
        Self {
            scaled_growth_rate: ParameterSettings::new("scaledGrowthRate", 1.0),
            time_origin: ParameterSettings::new("timeOrigin", 10.0),
            pop_size: ParameterSettings::new("popSize", 1.0),
            k: DEFAULT_SHAPE,
        }
    }
}

impl LimitBirthDeathSettings {
    pub fn build(&self) -> Result<LimitBirthDeath> {
        ensure!(self.k.is_finite(), "K must be finite, got {}.", self.k);
        ensure!(
            self.pop_size.value > 0.0,
            "Population size `{}` must be positive, got {}.",
            self.pop_size.id,
            self.pop_size.value
        );
        let gamma = self
            .scaled_growth_rate
            .build()
            .context("Invalid scaled growth rate.")?;
        let origin = self.time_origin.build().context("Invalid time of origin.")?;
        let theta = self.pop_size.build().context("Invalid population size.")?;
        Ok(LimitBirthDeath::new(gamma, origin, theta, self.k))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GenotypeModelSettings {
    pub frequencies: Option<Vec<f64>>,
}

impl GenotypeModelSettings {
    pub fn build(&self) -> Result<JukesCantorGenotypes> {
        match &self.frequencies {
            Some(frequencies) => JukesCantorGenotypes::with_frequencies(frequencies)
                .context("Invalid Jukes-Cantor genotype settings."),
            None => Ok(JukesCantorGenotypes::new()),
        }
    }
}
