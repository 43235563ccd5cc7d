//! Limit birth-death population function bindings.

use genocoal_core::config::LimitBirthDeathSettings;
use genocoal_core::limit_birth_death::LimitBirthDeath;
use genocoal_core::traits::PopulationFunction;
use serde_wasm_bindgen::from_value;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct WasmLimitBirthDeath {
    function: LimitBirthDeath,
}

#[wasm_bindgen]
impl WasmLimitBirthDeath {
    #[wasm_bindgen(constructor)]
    pub fn new(settings_val: JsValue) -> Result<WasmLimitBirthDeath, JsValue> {
        console_error_panic_hook::set_once();

        let settings: LimitBirthDeathSettings = from_value(settings_val).map_err(|e| {
            JsValue::from_str(&format!("Invalid limit birth-death settings: {}", e))
        })?;
        let function = settings
            .build()
            .map_err(|e| JsValue::from_str(&format!("{:#}", e)))?;

        Ok(WasmLimitBirthDeath { function })
    }

    pub fn population_size(&self, t: f64) -> f64 {
        self.function.population_size(t)
    }

    pub fn integral(&self, start: f64, finish: f64) -> f64 {
        self.function.integral(start, finish)
    }

    pub fn intensity(&self, t: f64) -> f64 {
        self.function.intensity(t)
    }

    pub fn inverse_intensity(&self, x: f64) -> f64 {
        self.function.inverse_intensity(x)
    }

    pub fn parameter_ids(&self) -> Vec<String> {
        self.function.parameter_ids()
    }

    pub fn set_scaled_growth_rate(&self, value: f64) {
        self.function.set_scaled_growth_rate(value);
    }

    pub fn set_time_origin(&self, value: f64) {
        self.function.set_time_origin(value);
    }

    pub fn set_theta(&self, value: f64) {
        self.function.set_theta(value);
    }
}
