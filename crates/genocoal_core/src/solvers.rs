use crate::traits::DynamicalSystem;

/// Fixed-step fourth-order Runge-Kutta stepper with reusable stage buffers.
pub struct Rk4 {
    k1: Vec<f64>,
    k2: Vec<f64>,
    k3: Vec<f64>,
    k4: Vec<f64>,
    tmp: Vec<f64>,
}

impl Rk4 {
    pub fn new(dim: usize) -> Self {
        Self {
            k1: vec![0.0; dim],
            k2: vec![0.0; dim],
            k3: vec![0.0; dim],
            k4: vec![0.0; dim],
            tmp: vec![0.0; dim],
        }
    }

    /// Advances `t` and `state` in place by one step of size `dt`.
    pub fn step(&mut self, system: &impl DynamicalSystem, t: &mut f64, state: &mut [f64], dt: f64) {
        let t0 = *t;
        let half = 0.5 * dt;

        system.apply(t0, state, &mut self.k1);
        offset(&mut self.tmp, state, half, &self.k1);
        system.apply(t0 + half, &self.tmp, &mut self.k2);
        offset(&mut self.tmp, state, half, &self.k2);
        system.apply(t0 + half, &self.tmp, &mut self.k3);
        offset(&mut self.tmp, state, dt, &self.k3);
        system.apply(t0 + dt, &self.tmp, &mut self.k4);

        let weight = dt / 6.0;
        for (i, y) in state.iter_mut().enumerate() {
            *y += weight * (self.k1[i] + 2.0 * (self.k2[i] + self.k3[i]) + self.k4[i]);
        }

        *t = t0 + dt;
    }
}

/// `out = base + h * slope`, elementwise.
fn offset(out: &mut [f64], base: &[f64], h: f64, slope: &[f64]) {
    for ((o, &b), &s) in out.iter_mut().zip(base).zip(slope) {
        *o = b + h * s;
    }
}

/// Integrates `system` from `start` to `finish` in `steps` equal steps.
/// A `finish` before `start` integrates backwards.
pub fn integrate(
    system: &impl DynamicalSystem,
    state: &mut [f64],
    start: f64,
    finish: f64,
    steps: usize,
) {
    if steps == 0 || start == finish {
        return;
    }
    let dt = (finish - start) / steps as f64;
    let mut stepper = Rk4::new(system.dimension());
    let mut t = start;
    for _ in 0..steps {
        stepper.step(system, &mut t, state, dt);
    }
}
