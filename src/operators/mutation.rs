//! Mutation operators.
//!
//! Each operator perturbs a solution in place, consulting the problem for
//! variable bounds where the domain is ordered.
//!
//! # Operators
//!
//! - [`UniformMutation`]: bounded uniform perturbation of real variables
//! - [`NonUniformMutation`]: perturbation shrinking as the run progresses
//! - [`PolynomialMutation`]: Deb's bounded polynomial mutation
//! - [`BooleanMutation`]: bit flip
//! - [`IntegerFlipMutation`]: uniform resampling of an integer variable
//!
//! # References
//!
//! - Michalewicz (1992), *Genetic Algorithms + Data Structures = Evolution Programs*
//! - Deb & Goyal (1996), "A Combined Genetic Adaptive Search (GeneAS)"
//! - Sierra & Coello Coello (2005), OMOPSO turbulence operators

use crate::problem::{Problem, Solution};
use rand::Rng;

/// Default perturbation index used by OMOPSO's mutation operators.
pub const DEFAULT_PERTURBATION: f64 = 0.5;

/// Default distribution index of [`PolynomialMutation`].
pub const DEFAULT_DISTRIBUTION_INDEX: f64 = 20.0;

/// An in-place mutation of one solution.
pub trait MutationOperator<T> {
    /// Mutates `solution`, reading bounds from `problem` where needed.
    fn mutate<P, R>(&self, problem: &P, solution: &mut Solution<T>, rng: &mut R)
    where
        P: Problem<Value = T>,
        R: Rng;
}

/// Per-variable probability `1 / n`, the customary default.
fn one_over_n<P: Problem>(problem: &P) -> f64 {
    1.0 / problem.number_of_variables().max(1) as f64
}

/// Uniform mutation for real variables.
///
/// With probability `probability`, each variable moves by
/// `(u - 0.5) * perturbation` with `u ~ U[0, 1)`, then is clamped to its
/// bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformMutation {
    pub probability: f64,
    pub perturbation: f64,
}

impl UniformMutation {
    pub fn new(probability: f64, perturbation: f64) -> Self {
        Self {
            probability,
            perturbation,
        }
    }

    /// Probability `1 / n` and the default perturbation.
    pub fn for_problem<P: Problem>(problem: &P) -> Self {
        Self::new(one_over_n(problem), DEFAULT_PERTURBATION)
    }
}

impl MutationOperator<f64> for UniformMutation {
    fn mutate<P, R>(&self, problem: &P, solution: &mut Solution<f64>, rng: &mut R)
    where
        P: Problem<Value = f64>,
        R: Rng,
    {
        for (j, variable) in solution.variables.iter_mut().enumerate() {
            if rng.random::<f64>() < self.probability {
                let step = (rng.random::<f64>() - 0.5) * self.perturbation;
                let value = (variable.get() + step)
                    .clamp(problem.lower_bound(j), problem.upper_bound(j));
                variable.set_value(value);
            }
        }
    }
}

/// Non-uniform mutation for real variables.
///
/// The step towards a bound is `y * (1 - u^((1 - t/T)^b))` where `y` is the
/// distance to that bound, `t` the current iteration, `T` the iteration
/// budget and `b` the perturbation index. Steps vanish as `t → T`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NonUniformMutation {
    pub probability: f64,
    pub perturbation: f64,
    pub max_iterations: usize,
    current_iteration: usize,
}

impl NonUniformMutation {
    pub fn new(probability: f64, perturbation: f64, max_iterations: usize) -> Self {
        Self {
            probability,
            perturbation,
            max_iterations,
            current_iteration: 0,
        }
    }

    /// Probability `1 / n` and the default perturbation.
    pub fn for_problem<P: Problem>(problem: &P, max_iterations: usize) -> Self {
        Self::new(one_over_n(problem), DEFAULT_PERTURBATION, max_iterations)
    }

    pub fn current_iteration(&self) -> usize {
        self.current_iteration
    }

    pub fn set_current_iteration(&mut self, iteration: usize) {
        self.current_iteration = iteration;
    }

    fn delta<R: Rng>(&self, y: f64, rng: &mut R) -> f64 {
        let progress = if self.max_iterations == 0 {
            1.0
        } else {
            (self.current_iteration as f64 / self.max_iterations as f64).min(1.0)
        };
        let u: f64 = rng.random();
        y * (1.0 - u.powf((1.0 - progress).powf(self.perturbation)))
    }
}

impl MutationOperator<f64> for NonUniformMutation {
    fn mutate<P, R>(&self, problem: &P, solution: &mut Solution<f64>, rng: &mut R)
    where
        P: Problem<Value = f64>,
        R: Rng,
    {
        for (j, variable) in solution.variables.iter_mut().enumerate() {
            if rng.random::<f64>() < self.probability {
                let lo = problem.lower_bound(j);
                let hi = problem.upper_bound(j);
                let x = variable.get();
                let step = if rng.random::<f64>() <= 0.5 {
                    self.delta(hi - x, rng)
                } else {
                    self.delta(lo - x, rng)
                };
                variable.set_value((x + step).clamp(lo, hi));
            }
        }
    }
}

/// Polynomial mutation (Deb & Goyal, 1996) for real variables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolynomialMutation {
    pub distribution_index: f64,
    pub probability: f64,
}

impl PolynomialMutation {
    pub fn new(distribution_index: f64, probability: f64) -> Self {
        Self {
            distribution_index,
            probability,
        }
    }

    /// Distribution index 20 and probability `1 / n`.
    pub fn for_problem<P: Problem>(problem: &P) -> Self {
        Self::new(DEFAULT_DISTRIBUTION_INDEX, one_over_n(problem))
    }
}

impl MutationOperator<f64> for PolynomialMutation {
    fn mutate<P, R>(&self, problem: &P, solution: &mut Solution<f64>, rng: &mut R)
    where
        P: Problem<Value = f64>,
        R: Rng,
    {
        let eta = self.distribution_index;
        let mut_pow = 1.0 / (eta + 1.0);

        for (j, variable) in solution.variables.iter_mut().enumerate() {
            if rng.random::<f64>() > self.probability {
                continue;
            }
            let yl = problem.lower_bound(j);
            let yu = problem.upper_bound(j);
            let span = yu - yl;
            if span <= 0.0 {
                continue;
            }

            let y = variable.get();
            let delta1 = (y - yl) / span;
            let delta2 = (yu - y) / span;
            let rnd: f64 = rng.random();

            let deltaq = if rnd <= 0.5 {
                let xy = 1.0 - delta1;
                let val = 2.0 * rnd + (1.0 - 2.0 * rnd) * xy.powf(eta + 1.0);
                val.powf(mut_pow) - 1.0
            } else {
                let xy = 1.0 - delta2;
                let val = 2.0 * (1.0 - rnd) + 2.0 * (rnd - 0.5) * xy.powf(eta + 1.0);
                1.0 - val.powf(mut_pow)
            };

            variable.set_value((y + deltaq * span).clamp(yl, yu));
        }
    }
}

/// Flips boolean variables independently with the given probability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BooleanMutation {
    pub probability: f64,
}

impl BooleanMutation {
    pub fn new(probability: f64) -> Self {
        Self { probability }
    }
}

impl MutationOperator<bool> for BooleanMutation {
    fn mutate<P, R>(&self, _problem: &P, solution: &mut Solution<bool>, rng: &mut R)
    where
        P: Problem<Value = bool>,
        R: Rng,
    {
        for variable in solution.variables.iter_mut() {
            if rng.random::<f64>() < self.probability {
                variable.set_value(!variable.get());
            }
        }
    }
}

/// Resamples integer variables uniformly within their rounded bounds
/// (both ends inclusive).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntegerFlipMutation {
    pub probability: f64,
}

impl IntegerFlipMutation {
    pub fn new(probability: f64) -> Self {
        Self { probability }
    }
}

impl MutationOperator<i64> for IntegerFlipMutation {
    fn mutate<P, R>(&self, problem: &P, solution: &mut Solution<i64>, rng: &mut R)
    where
        P: Problem<Value = i64>,
        R: Rng,
    {
        for (j, variable) in solution.variables.iter_mut().enumerate() {
            if rng.random::<f64>() < self.probability {
                let lo = problem.lower_bound(j).round() as i64;
                let hi = problem.upper_bound(j).round() as i64;
                if lo <= hi {
                    variable.set_value(rng.random_range(lo..=hi));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::Solutions;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Generic box-bounded problem over any value type; objectives unused.
    struct BoxProblem<T> {
        lo: f64,
        hi: f64,
        n: usize,
        _marker: std::marker::PhantomData<T>,
    }

    impl<T> BoxProblem<T> {
        fn new(lo: f64, hi: f64, n: usize) -> Self {
            Self {
                lo,
                hi,
                n,
                _marker: std::marker::PhantomData,
            }
        }
    }

    impl<T: Clone> Problem for BoxProblem<T> {
        type Value = T;

        fn number_of_variables(&self) -> usize {
            self.n
        }

        fn number_of_objectives(&self) -> usize {
            1
        }

        fn lower_bound(&self, _index: usize) -> f64 {
            self.lo
        }

        fn upper_bound(&self, _index: usize) -> f64 {
            self.hi
        }

        fn new_random_solutions<R: Rng>(&self, _n: usize, _rng: &mut R) -> Solutions<T> {
            Solutions::new()
        }

        fn evaluate(&self, _solution: &mut Solution<T>) {}
    }

    fn within(s: &Solution<f64>, lo: f64, hi: f64) -> bool {
        s.values().iter().all(|&v| v >= lo && v <= hi)
    }

    #[test]
    fn test_uniform_probability_zero_is_identity() {
        let problem = BoxProblem::<f64>::new(0.0, 1.0, 5);
        let mut rng = StdRng::seed_from_u64(42);
        let mut s = Solution::from_values(vec![0.5; 5], 1);
        UniformMutation::new(0.0, 0.5).mutate(&problem, &mut s, &mut rng);
        assert!(s.values().iter().all(|&v| (v - 0.5).abs() < 1e-15));
    }

    #[test]
    fn test_uniform_stays_within_bounds_and_step() {
        let problem = BoxProblem::<f64>::new(0.0, 1.0, 10);
        let mut rng = StdRng::seed_from_u64(42);
        let op = UniformMutation::new(1.0, 0.5);
        for _ in 0..100 {
            let mut s = Solution::from_values(vec![0.5; 10], 1);
            op.mutate(&problem, &mut s, &mut rng);
            assert!(within(&s, 0.25, 0.75));
        }

        let mut edge = Solution::from_values(vec![0.0; 10], 1);
        for _ in 0..50 {
            op.mutate(&problem, &mut edge, &mut rng);
            assert!(within(&edge, 0.0, 1.0));
        }
    }

    #[test]
    fn test_uniform_for_problem_defaults() {
        let problem = BoxProblem::<f64>::new(0.0, 1.0, 4);
        let op = UniformMutation::for_problem(&problem);
        assert!((op.probability - 0.25).abs() < 1e-15);
        assert!((op.perturbation - DEFAULT_PERTURBATION).abs() < 1e-15);
    }

    #[test]
    fn test_non_uniform_vanishes_at_budget_end() {
        let problem = BoxProblem::<f64>::new(0.0, 1.0, 6);
        let mut rng = StdRng::seed_from_u64(3);
        let mut op = NonUniformMutation::new(1.0, 0.5, 100);
        op.set_current_iteration(100);

        let mut s = Solution::from_values(vec![0.3; 6], 1);
        op.mutate(&problem, &mut s, &mut rng);
        assert!(s.values().iter().all(|&v| (v - 0.3).abs() < 1e-12));
    }

    #[test]
    fn test_non_uniform_early_moves_within_bounds() {
        let problem = BoxProblem::<f64>::new(-2.0, 2.0, 8);
        let mut rng = StdRng::seed_from_u64(11);
        let mut op = NonUniformMutation::new(1.0, 0.5, 100);
        op.set_current_iteration(1);
        assert_eq!(op.current_iteration(), 1);

        let mut moved = false;
        for _ in 0..20 {
            let mut s = Solution::from_values(vec![0.0; 8], 1);
            op.mutate(&problem, &mut s, &mut rng);
            assert!(within(&s, -2.0, 2.0));
            moved |= s.values().iter().any(|&v| v.abs() > 1e-9);
        }
        assert!(moved, "early non-uniform mutation should move variables");
    }

    #[test]
    fn test_polynomial_within_bounds() {
        let problem = BoxProblem::<f64>::new(-1.0, 3.0, 5);
        let mut rng = StdRng::seed_from_u64(5);
        let op = PolynomialMutation::new(DEFAULT_DISTRIBUTION_INDEX, 1.0);
        for start in [-1.0, 0.0, 1.0, 3.0] {
            for _ in 0..50 {
                let mut s = Solution::from_values(vec![start; 5], 1);
                op.mutate(&problem, &mut s, &mut rng);
                assert!(within(&s, -1.0, 3.0));
            }
        }
    }

    #[test]
    fn test_polynomial_for_problem_defaults() {
        let problem = BoxProblem::<f64>::new(0.0, 1.0, 10);
        let op = PolynomialMutation::for_problem(&problem);
        assert!((op.probability - 0.1).abs() < 1e-15);
        assert!((op.distribution_index - 20.0).abs() < 1e-15);
    }

    #[test]
    fn test_boolean_flip_all() {
        let problem = BoxProblem::<bool>::new(0.0, 1.0, 4);
        let mut rng = StdRng::seed_from_u64(1);
        let mut s = Solution::from_values(vec![true, false, true, false], 1);
        BooleanMutation::new(1.0).mutate(&problem, &mut s, &mut rng);
        assert_eq!(s.values(), vec![false, true, false, true]);
    }

    #[test]
    fn test_integer_flip_within_rounded_bounds() {
        let problem = BoxProblem::<i64>::new(0.4, 4.6, 6);
        let mut rng = StdRng::seed_from_u64(9);
        let op = IntegerFlipMutation::new(1.0);
        let mut seen_hi = false;
        for _ in 0..200 {
            let mut s = Solution::from_values(vec![2i64; 6], 1);
            op.mutate(&problem, &mut s, &mut rng);
            for v in s.values() {
                assert!((0..=5).contains(&v));
                seen_hi |= v == 5;
            }
        }
        assert!(seen_hi, "upper bound must be reachable");
    }
}
