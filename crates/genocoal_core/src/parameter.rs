//! Externally owned real-valued model parameters.
//!
//! A host engine creates the parameters, hands `Arc` clones to the models and
//! keeps mutating them between likelihood evaluations. Models never cache a
//! value; every query re-reads the parameter.

use crate::error::ModelError;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug)]
pub struct RealParameter {
    id: String,
    value: AtomicU64,
    lower: AtomicU64,
    upper: AtomicU64,
}

impl RealParameter {
    pub fn new(id: impl Into<String>, value: f64) -> Self {
        Self {
            id: id.into(),
            value: AtomicU64::new(value.to_bits()),
            lower: AtomicU64::new(f64::NEG_INFINITY.to_bits()),
            upper: AtomicU64::new(f64::INFINITY.to_bits()),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn value(&self) -> f64 {
        f64::from_bits(self.value.load(Ordering::Acquire))
    }

    pub fn set_value(&self, value: f64) {
        self.value.store(value.to_bits(), Ordering::Release);
    }

    /// Returns `(lower, upper)`.
    pub fn bounds(&self) -> (f64, f64) {
        (
            f64::from_bits(self.lower.load(Ordering::Acquire)),
            f64::from_bits(self.upper.load(Ordering::Acquire)),
        )
    }

    /// Bounds restrict what proposal machinery may write; they do not clamp
    /// the current value.
    pub fn set_bounds(&self, lower: f64, upper: f64) -> Result<(), ModelError> {
        if lower.is_nan() || upper.is_nan() || lower > upper {
            return Err(ModelError::InvalidBounds {
                id: self.id.clone(),
                lower,
                upper,
            });
        }
        self.lower.store(lower.to_bits(), Ordering::Release);
        self.upper.store(upper.to_bits(), Ordering::Release);
        Ok(())
    }

    pub fn is_within_bounds(&self) -> bool {
        let (lower, upper) = self.bounds();
        let value = self.value();
        value >= lower && value <= upper
    }
}

#[cfg(test)]
mod tests {
    use super::RealParameter;
    use crate::error::ModelError;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn new_parameter_is_unbounded() {
        let param = RealParameter::new("theta", 3.5);
        assert_eq!(param.id(), "theta");
        assert_eq!(param.value(), 3.5);
        assert_eq!(param.bounds(), (f64::NEG_INFINITY, f64::INFINITY));
        assert!(param.is_within_bounds());
    }

    #[test]
    fn set_bounds_rejects_inverted_and_nan_ranges() {
        let param = RealParameter::new("origin", 1.0);
        let err = param.set_bounds(2.0, 1.0).expect_err("inverted bounds");
        assert_eq!(
            err,
            ModelError::InvalidBounds {
                id: "origin".to_string(),
                lower: 2.0,
                upper: 1.0,
            }
        );
        assert!(param.set_bounds(f64::NAN, 1.0).is_err());
        assert_eq!(param.bounds(), (f64::NEG_INFINITY, f64::INFINITY));
    }

    #[test]
    fn bounds_do_not_clamp_value() {
        let param = RealParameter::new("origin", 1500.0);
        param.set_bounds(0.0, 1000.0).expect("bounds should be valid");
        assert_eq!(param.value(), 1500.0);
        assert!(!param.is_within_bounds());
        param.set_value(999.0);
        assert!(param.is_within_bounds());
    }

    #[test]
    fn shared_parameter_updates_are_visible_across_threads() {
        let param = Arc::new(RealParameter::new("gamma", 0.0));
        let writer = Arc::clone(&param);
        thread::spawn(move || writer.set_value(0.25))
            .join()
            .expect("writer thread should finish");
        assert_eq!(param.value(), 0.25);
    }
}
