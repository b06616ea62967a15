//! ZDT bi-objective test problems.

use crate::problem::{uniform_real_solutions, Problem, Solution, Solutions};
use rand::Rng;

/// Default number of decision variables for the ZDT problems.
pub const ZDT_DEFAULT_VARIABLES: usize = 30;

/// `g = 1 + 9 * sum(x_1..x_{n-1}) / (n - 1)`; `1` for a single variable.
fn zdt_g(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 1.0;
    }
    let tail: f64 = values[1..].iter().sum();
    1.0 + 9.0 * tail / (values.len() - 1) as f64
}

/// Samples the optimal front: `x_0` evenly spaced in `[0, 1]`, the other
/// variables at zero.
fn sample_front<P: Problem<Value = f64>>(problem: &P, points: usize) -> Solutions<f64> {
    let n_vars = problem.number_of_variables();
    let mut front: Solutions<f64> = (0..points)
        .map(|i| {
            let x0 = if points > 1 {
                i as f64 / (points - 1) as f64
            } else {
                0.0
            };
            let values = std::iter::once(x0).chain(std::iter::repeat(0.0).take(n_vars - 1));
            let mut s = Solution::from_values(values, 2);
            problem.evaluate(&mut s);
            s
        })
        .collect();
    front.reduce_to_non_dominated();
    front
}

/// ZDT1: convex Pareto front `f2 = 1 - sqrt(f1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Zdt1 {
    n: usize,
}

impl Zdt1 {
    /// # Panics
    /// Panics if `n_variables` is zero.
    pub fn new(n_variables: usize) -> Self {
        assert!(n_variables > 0, "ZDT1 needs at least one variable");
        Self { n: n_variables }
    }

    /// `points` evenly spaced solutions on the optimal front.
    pub fn pareto_optimal_front(&self, points: usize) -> Solutions<f64> {
        sample_front(self, points)
    }
}

impl Default for Zdt1 {
    fn default() -> Self {
        Self::new(ZDT_DEFAULT_VARIABLES)
    }
}

impl Problem for Zdt1 {
    type Value = f64;

    fn number_of_variables(&self) -> usize {
        self.n
    }

    fn number_of_objectives(&self) -> usize {
        2
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
        let f1 = x[0];
        let g = zdt_g(&x);
        let h = 1.0 - (f1 / g).sqrt();
        solution.set_objective(0, f1);
        solution.set_objective(1, g * h);
    }
}

/// ZDT2: non-convex Pareto front `f2 = 1 - f1^2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Zdt2 {
    n: usize,
}

impl Zdt2 {
    /// # Panics
    /// Panics if `n_variables` is zero.
    pub fn new(n_variables: usize) -> Self {
        assert!(n_variables > 0, "ZDT2 needs at least one variable");
        Self { n: n_variables }
    }

    /// `points` evenly spaced solutions on the optimal front.
    pub fn pareto_optimal_front(&self, points: usize) -> Solutions<f64> {
        sample_front(self, points)
    }
}

impl Default for Zdt2 {
    fn default() -> Self {
        Self::new(ZDT_DEFAULT_VARIABLES)
    }
}

impl Problem for Zdt2 {
    type Value = f64;

    fn number_of_variables(&self) -> usize {
        self.n
    }

    fn number_of_objectives(&self) -> usize {
        2
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
        let f1 = x[0];
        let g = zdt_g(&x);
        let h = 1.0 - (f1 / g).powi(2);
        solution.set_objective(0, f1);
        solution.set_objective(1, g * h);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pareto::dominates;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn evaluated<P: Problem<Value = f64>>(problem: &P, values: Vec<f64>) -> Solution<f64> {
        let mut s = Solution::from_values(values, 2);
        problem.evaluate(&mut s);
        s
    }

    #[test]
    fn test_zdt1_on_front() {
        let s = evaluated(&Zdt1::new(4), vec![0.25, 0.0, 0.0, 0.0]);
        assert!((s.objective(0) - 0.25).abs() < 1e-12);
        assert!((s.objective(1) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_zdt1_off_front() {
        // g = 1 + 9 * 1.5 / 3 = 5.5
        let s = evaluated(&Zdt1::new(4), vec![0.0, 0.5, 0.5, 0.5]);
        assert!((s.objective(1) - 5.5).abs() < 1e-12);
    }

    #[test]
    fn test_zdt2_on_front() {
        let s = evaluated(&Zdt2::new(3), vec![0.5, 0.0, 0.0]);
        assert!((s.objective(0) - 0.5).abs() < 1e-12);
        assert!((s.objective(1) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_single_variable() {
        let s = evaluated(&Zdt1::new(1), vec![0.64]);
        assert!((s.objective(1) - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_defaults() {
        assert_eq!(Zdt1::default().number_of_variables(), 30);
        assert_eq!(Zdt2::default().number_of_objectives(), 2);
    }

    #[test]
    fn test_pareto_optimal_front() {
        let front = Zdt1::new(5).pareto_optimal_front(11);
        assert_eq!(front.len(), 11);
        for s in &front {
            let expected = 1.0 - s.objective(0).sqrt();
            assert!((s.objective(1) - expected).abs() < 1e-12);
        }

        let front = Zdt2::new(5).pareto_optimal_front(11);
        assert_eq!(front.len(), 11);
        assert!((front[10].objective(1)).abs() < 1e-12);
    }

    #[test]
    fn test_front_not_dominated_by_random() {
        let problem = Zdt2::new(6);
        let front = problem.pareto_optimal_front(50);
        let mut rng = StdRng::seed_from_u64(3);
        let mut pop = problem.new_random_solutions(200, &mut rng);
        problem.evaluate_all(&mut pop);

        for p in &front {
            for q in &pop {
                assert!(!dominates(&q.objectives, &p.objectives));
            }
        }
    }
}
