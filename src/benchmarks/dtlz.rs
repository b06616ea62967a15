//! DTLZ scalable test problems.
//!
//! Variables `x_0..x_{m-2}` position a point on the front; the remaining
//! `k = n - m + 1` variables control its distance `g` from the front.

use crate::problem::{uniform_real_solutions, Problem, Solution, Solutions};
use rand::Rng;
use std::f64::consts::FRAC_PI_2;

/// Default number of decision variables for the DTLZ problems.
pub const DTLZ_DEFAULT_VARIABLES: usize = 12;

/// Default number of objectives for the DTLZ problems.
pub const DTLZ_DEFAULT_OBJECTIVES: usize = 3;

/// Bias exponent of DTLZ4.
const DTLZ4_ALPHA: f64 = 100.0;

/// `g = sum((x_i - 0.5)^2)` over the distance variables.
fn distance_g(x: &[f64], n_objs: usize) -> f64 {
    x[n_objs - 1..].iter().map(|v| (v - 0.5) * (v - 0.5)).sum()
}

/// Spherical front mapping: `f_i = (1 + g) * prod cos(theta_j) * sin(theta_{m-1-i})`.
fn spherical(theta: &[f64], g: f64, objectives: &mut [f64]) {
    let m = objectives.len();
    for (i, f) in objectives.iter_mut().enumerate() {
        let mut value = 1.0 + g;
        for t in &theta[..m - 1 - i] {
            value *= t.cos();
        }
        if i > 0 {
            value *= theta[m - 1 - i].sin();
        }
        *f = value;
    }
}

fn check_shape(name: &str, n_vars: usize, n_objs: usize) {
    assert!(n_objs >= 2, "{name} needs at least two objectives");
    assert!(
        n_vars >= n_objs,
        "{name} needs at least as many variables ({n_vars}) as objectives ({n_objs})"
    );
}

/// DTLZ4: spherical front with a strongly biased density (`alpha = 100`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dtlz4 {
    n_vars: usize,
    n_objs: usize,
}

impl Dtlz4 {
    /// Three objectives.
    ///
    /// # Panics
    /// Panics if `n_variables < 3`.
    pub fn new(n_variables: usize) -> Self {
        Self::with_objectives(n_variables, DTLZ_DEFAULT_OBJECTIVES)
    }

    /// # Panics
    /// Panics if `n_objectives < 2` or `n_variables < n_objectives`.
    pub fn with_objectives(n_variables: usize, n_objectives: usize) -> Self {
        check_shape("DTLZ4", n_variables, n_objectives);
        Self {
            n_vars: n_variables,
            n_objs: n_objectives,
        }
    }
}

impl Default for Dtlz4 {
    fn default() -> Self {
        Self::new(DTLZ_DEFAULT_VARIABLES)
    }
}

impl Problem for Dtlz4 {
    type Value = f64;

    fn number_of_variables(&self) -> usize {
        self.n_vars
    }

    fn number_of_objectives(&self) -> usize {
        self.n_objs
    }

    fn lower_bound(&self, _index: usize) -> f64 {
        0.0
    }

    fn upper_bound(&self, _index: usize) -> f64 {
        1.0
    }

    fn new_random_solutions<R: Rng>(&self, n: usize, rng: &mut R) -> Solutions<f64> {
        uniform_real_solutions(self, n, rng)
    }

    fn evaluate(&self, solution: &mut Solution<f64>) {
        let x = solution.values();
        let g = distance_g(&x, self.n_objs);
        let theta: Vec<f64> = x[..self.n_objs - 1]
            .iter()
            .map(|v| v.powf(DTLZ4_ALPHA) * FRAC_PI_2)
            .collect();
        spherical(&theta, g, &mut solution.objectives);
    }
}

/// DTLZ5: degenerate (curve-shaped) front embedded in the unit sphere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dtlz5 {
    n_vars: usize,
    n_objs: usize,
}

impl Dtlz5 {
    /// Three objectives.
    ///
    /// # Panics
    /// Panics if `n_variables < 3`.
    pub fn new(n_variables: usize) -> Self {
        Self::with_objectives(n_variables, DTLZ_DEFAULT_OBJECTIVES)
    }

    /// # Panics
    /// Panics if `n_objectives < 2` or `n_variables < n_objectives`.
    pub fn with_objectives(n_variables: usize, n_objectives: usize) -> Self {
        check_shape("DTLZ5", n_variables, n_objectives);
        Self {
            n_vars: n_variables,
            n_objs: n_objectives,
        }
    }
}

impl Default for Dtlz5 {
    fn default() -> Self {
        Self::new(DTLZ_DEFAULT_VARIABLES)
    }
}

impl Problem for Dtlz5 {
    type Value = f64;

    fn number_of_variables(&self) -> usize {
        self.n_vars
    }

    fn number_of_objectives(&self) -> usize {
        self.n_objs
    }

    fn lower_bound(&self, _index: usize) -> f64 {
        0.0
    }

    fn upper_bound(&self, _index: usize) -> f64 {
        1.0
    }

    fn new_random_solutions<R: Rng>(&self, n: usize, rng: &mut R) -> Solutions<f64> {
        uniform_real_solutions(self, n, rng)
    }

    fn evaluate(&self, solution: &mut Solution<f64>) {
        let x = solution.values();
        let g = distance_g(&x, self.n_objs);
        let t = std::f64::consts::PI / (4.0 * (1.0 + g));

        let mut theta = Vec::with_capacity(self.n_objs - 1);
        theta.push(x[0] * FRAC_PI_2);
        for &v in &x[1..self.n_objs - 1] {
            theta.push(t * (1.0 + 2.0 * g * v));
        }
        spherical(&theta, g, &mut solution.objectives);
    }
}
