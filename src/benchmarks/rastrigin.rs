//! Rastrigin single-objective test function.

use crate::problem::{uniform_real_solutions, Problem, Solution, Solutions};
use rand::Rng;
use std::f64::consts::PI;

/// Search-space half width of the Rastrigin function.
pub const RASTRIGIN_BOUND: f64 = 5.12;

/// Rastrigin: `10 n + sum(x_i^2 - 10 cos(2 pi x_i))` on `[-5.12, 5.12]^n`.
///
/// Highly multimodal; global minimum `0` at the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rastrigin {
    n: usize,
}

impl Rastrigin {
    /// # Panics
    /// Panics if `n_variables` is zero.
    pub fn new(n_variables: usize) -> Self {
        assert!(n_variables > 0, "Rastrigin needs at least one variable");
        Self { n: n_variables }
    }
}

impl Problem for Rastrigin {
    type Value = f64;

    fn number_of_variables(&self) -> usize {
        self.n
    }

    fn number_of_objectives(&self) -> usize {
        1
    }

    fn lower_bound(&self, _index: usize) -> f64 {
        -RASTRIGIN_BOUND
    }

    fn upper_bound(&self, _index: usize) -> f64 {
        RASTRIGIN_BOUND
    }

    fn new_random_solutions<R: Rng>(&self, n: usize, rng: &mut R) -> Solutions<f64> {
        uniform_real_solutions(self, n, rng)
    }

    fn evaluate(&self, solution: &mut Solution<f64>) {
        let sum: f64 = solution
            .variables
            .iter()
            .map(|v| {
                let x = v.get();
                x * x - 10.0 * (2.0 * PI * x).cos()
            })
            .sum();
        solution.set_objective(0, 10.0 * self.n as f64 + sum);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cost(values: Vec<f64>) -> f64 {
        let problem = Rastrigin::new(values.len());
        let mut s = Solution::from_values(values, 1);
        problem.evaluate(&mut s);
        s.objective(0)
    }

    #[test]
    fn test_global_minimum() {
        assert!(cost(vec![0.0; 5]).abs() < 1e-12);
    }

    #[test]
    fn test_integer_lattice() {
        // cos(2 pi k) = 1, so each coordinate contributes k^2
        assert!((cost(vec![1.0, -2.0]) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_bounds() {
        let p = Rastrigin::new(3);
        assert_eq!(p.lower_bound(2), -5.12);
        assert_eq!(p.upper_bound(0), 5.12);
        assert_eq!(p.number_of_objectives(), 1);
    }
}
