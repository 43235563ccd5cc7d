//! Limit birth-death approximation to the coalescent.
//!
//! The population trajectory comes from a birth-death process whose present-day
//! size tends to infinity, leaving it parameterised by a scaled growth rate
//! `gamma`, a time of origin `T` and the shape constant `K` of the M_K
//! approximation (Crespo, Posada & Wiuf 2021).
//!
//! Write `e = exp(-gamma * T)` and `w = 1 - e`. Then
//!
//! - `intensity(t) = 2 g w² / (1 - e g)² / (1 + (K/gamma) w (g - 1) / (1 - e g))`
//!   with `g = exp(gamma * t)`,
//! - `integral(_, t) = (2/K) ln((a g + b) / (1 - g e))` with
//!   `a = (K/gamma) w - e` and `b = 1 - (K/gamma) w`,
//! - `inverse_intensity(x) = (1/gamma) ln((k - b) / (k e + a))` with
//!   `k = exp(K x / 2)`.
//!
//! `intensity` is the derivative of `integral(0, t)` and `inverse_intensity`
//! inverts `integral(0, t)`. Negative growth rates are outside the model and
//! every transform returns `+inf` for them.

use crate::parameter::RealParameter;
use crate::traits::PopulationFunction;
use log::{debug, trace, warn};
use std::sync::Arc;

pub const DEFAULT_SHAPE: f64 = 0.8;

/// Upper bound placed on the time of origin at construction.
pub const MAX_TIME_ORIGIN: f64 = 1000.0;

#[derive(Debug, Clone)]
pub struct LimitBirthDeath {
    scaled_growth_rate: Arc<RealParameter>,
    time_origin: Arc<RealParameter>,
    theta: Arc<RealParameter>,
    shape: f64,
}

impl LimitBirthDeath {
    pub fn new(
        scaled_growth_rate: Arc<RealParameter>,
        time_origin: Arc<RealParameter>,
        theta: Arc<RealParameter>,
        shape: f64,
    ) -> Self {
        // Constant, ordered, non-NaN bounds: `set_bounds` cannot reject them.
        let _ = time_origin.set_bounds(0.0, MAX_TIME_ORIGIN);
        if !time_origin.is_within_bounds() {
            warn!(
                "Time of origin `{}` = {} lies outside [0, {}]",
                time_origin.id(),
                time_origin.value(),
                MAX_TIME_ORIGIN
            );
        }
        debug!(
            "Building limit birth-death population function: {} = {}, {} = {}, {} = {}, K = {}",
            scaled_growth_rate.id(),
            scaled_growth_rate.value(),
            time_origin.id(),
            time_origin.value(),
            theta.id(),
            theta.value(),
            shape
        );
        Self {
            scaled_growth_rate,
            time_origin,
            theta,
            shape,
        }
    }

    pub fn with_default_shape(
        scaled_growth_rate: Arc<RealParameter>,
        time_origin: Arc<RealParameter>,
        theta: Arc<RealParameter>,
    ) -> Self {
        Self::new(scaled_growth_rate, time_origin, theta, DEFAULT_SHAPE)
    }

    pub fn scaled_growth_rate(&self) -> f64 {
        self.scaled_growth_rate.value()
    }

    pub fn set_scaled_growth_rate(&self, value: f64) {
        self.scaled_growth_rate.set_value(value);
    }

    pub fn time_origin(&self) -> f64 {
        self.time_origin.value()
    }

    pub fn set_time_origin(&self, value: f64) {
        self.time_origin.set_value(value);
    }

    /// Population size at the present.
    pub fn theta(&self) -> f64 {
        self.theta.value()
    }

    pub fn set_theta(&self, value: f64) {
        self.theta.set_value(value);
    }

    pub fn shape(&self) -> f64 {
        self.shape
    }

    /// Reads `gamma` once per call, `None` when the growth rate is negative.
    fn growth_rate(&self) -> Option<f64> {
        let gamma = self.scaled_growth_rate();
        if gamma >= 0.0 {
            Some(gamma)
        } else {
            trace!("Negative scaled growth rate {gamma}; returning +inf");
            None
        }
    }

    /// `(e, w)` for the current growth rate and time of origin.
    fn origin_terms(&self, gamma: f64) -> (f64, f64) {
        let exp_minus_gamma_t = (-gamma * self.time_origin()).exp();
        (exp_minus_gamma_t, 1.0 - exp_minus_gamma_t)
    }

    /// `(a, b)` shared by the integral and its inverse.
    fn log_coefficients(&self, gamma: f64, exp_minus_gamma_t: f64, w: f64) -> (f64, f64) {
        let k_over_gamma = self.shape / gamma;
        (
            k_over_gamma * w - exp_minus_gamma_t,
            1.0 - k_over_gamma * w,
        )
    }
}

impl PopulationFunction for LimitBirthDeath {
    fn parameter_ids(&self) -> Vec<String> {
        vec![
            self.scaled_growth_rate.id().to_string(),
            self.time_origin.id().to_string(),
            self.theta.id().to_string(),
        ]
    }

    fn population_size(&self, t: f64) -> f64 {
        if t == 0.0 {
            self.theta()
        } else {
            self.theta() * (2.0 / self.intensity(t))
        }
    }

    /// Depends on `finish` only; `start` is accepted for the trait signature.
    fn integral(&self, _start: f64, finish: f64) -> f64 {
        let Some(gamma) = self.growth_rate() else {
            return f64::INFINITY;
        };
        let (exp_minus_gamma_t, w) = self.origin_terms(gamma);
        let exp_gamma_finish = (gamma * finish).exp();
        let (a, b) = self.log_coefficients(gamma, exp_minus_gamma_t, w);

        (2.0 / self.shape)
            * ((a * exp_gamma_finish + b) / (1.0 - exp_gamma_finish * exp_minus_gamma_t)).ln()
    }

    fn intensity(&self, t: f64) -> f64 {
        let Some(gamma) = self.growth_rate() else {
            return f64::INFINITY;
        };
        let (exp_minus_gamma_t, w) = self.origin_terms(gamma);
        let exp_gamma_t = (gamma * t).exp();
        let remaining = 1.0 - exp_minus_gamma_t * exp_gamma_t;

        let raw = 2.0 * exp_gamma_t * w.powi(2) / remaining.powi(2);
        raw / (1.0 + (self.shape / gamma) * w * (exp_gamma_t - 1.0) / remaining)
    }

    fn inverse_intensity(&self, x: f64) -> f64 {
        let Some(gamma) = self.growth_rate() else {
            return f64::INFINITY;
        };
        let (exp_minus_gamma_t, w) = self.origin_terms(gamma);
        let (a, b) = self.log_coefficients(gamma, exp_minus_gamma_t, w);
        let exp_k_x = (self.shape * x / 2.0).exp();

        (1.0 / gamma) * ((exp_k_x - b) / (exp_k_x * exp_minus_gamma_t + a)).ln()
    }
}
