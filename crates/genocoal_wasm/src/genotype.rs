//! Genotype substitution model bindings.

use genocoal_core::config::GenotypeModelSettings;
use genocoal_core::genotype::JukesCantorGenotypes;
use genocoal_core::traits::{DataType, SubstitutionModel};
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct WasmGenotypeModel {
    model: JukesCantorGenotypes,
}

#[wasm_bindgen]
impl WasmGenotypeModel {
    /// `settings_val` may be `undefined` or `{ frequencies?: number[] }`.
    #[wasm_bindgen(constructor)]
    pub fn new(settings_val: JsValue) -> Result<WasmGenotypeModel, JsValue> {
        console_error_panic_hook::set_once();

        let settings: GenotypeModelSettings = if settings_val.is_undefined()
            || settings_val.is_null()
        {
            GenotypeModelSettings::default()
        } else {
            from_value(settings_val)
                .map_err(|e| JsValue::from_str(&format!("Invalid genotype settings: {}", e)))?
        };
        let model = settings
            .build()
            .map_err(|e| JsValue::from_str(&format!("{:#}", e)))?;

        Ok(WasmGenotypeModel { model })
    }

    pub fn state_count(&self) -> usize {
        self.model.state_count()
    }

    pub fn frequencies(&self) -> Vec<f64> {
        self.model.frequencies().to_vec()
    }

    /// Returns a fresh row-major 16x16 matrix.
    pub fn transition_probabilities(
        &self,
        start_time: f64,
        end_time: f64,
        rate: f64,
    ) -> Result<Vec<f64>, JsValue> {
        let n = self.model.state_count();
        let mut matrix = vec![0.0; n * n];
        self.fill_transition_probabilities(start_time, end_time, rate, &mut matrix)?;
        Ok(matrix)
    }

    /// Writes into a caller-owned `Float64Array` of length 256.
    pub fn fill_transition_probabilities(
        &self,
        start_time: f64,
        end_time: f64,
        rate: f64,
        out: &mut [f64],
    ) -> Result<(), JsValue> {
        self.model
            .transition_probabilities(start_time, end_time, rate, out)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn eigen_decomposition(&self) -> Result<JsValue, JsValue> {
        to_value(&self.model.eigen_decomposition().snapshot())
            .map_err(|e| {
                JsValue::from_str(&format!("Failed to serialize eigen decomposition: {}", e))
            })
    }

    pub fn can_handle(&self, data_type: &str) -> bool {
        DataType::from_name(data_type)
            .map(|kind| self.model.can_handle(kind))
            .unwrap_or(false)
    }
}
