//! The problem contract consumed by every algorithm.

use super::solution::{Solution, Solutions};
use crate::error::OptimError;
use rand::Rng;

/// Defines an optimization problem.
///
/// The user supplies the search-space shape (variable and objective
/// counts, per-variable bounds), a generator of random valid solutions and
/// the objective function. All objectives are **minimized**.
///
/// # Evaluation failures
///
/// Evaluation has no error channel. If the objective function can fail
/// (an external script, a simulator crash), map the failure to a sentinel
/// such as `f64::INFINITY` so the algorithm simply treats the solution as
/// very poor.
///
/// # Examples
///
/// ```
/// use rand::Rng;
/// use u_moopt::problem::{uniform_real_solutions, Problem, Solution, Solutions};
///
/// struct Schaffer;
///
/// impl Problem for Schaffer {
///     type Value = f64;
///
///     fn number_of_variables(&self) -> usize { 1 }
///     fn number_of_objectives(&self) -> usize { 2 }
///     fn lower_bound(&self, _index: usize) -> f64 { -10.0 }
///     fn upper_bound(&self, _index: usize) -> f64 { 10.0 }
///
///     fn new_random_solutions<R: Rng>(&self, n: usize, rng: &mut R) -> Solutions<f64> {
///         uniform_real_solutions(self, n, rng)
///     }
///
///     fn evaluate(&self, solution: &mut Solution<f64>) {
///         let x = solution.variable(0).get();
///         solution.set_objective(0, x * x);
///         solution.set_objective(1, (x - 2.0) * (x - 2.0));
///     }
/// }
/// ```
pub trait Problem {
    /// The decision-variable value type.
    type Value: Clone;

    fn number_of_variables(&self) -> usize;

    fn number_of_objectives(&self) -> usize;

    /// Lower bound of variable `index`.
    fn lower_bound(&self, index: usize) -> f64;

    /// Upper bound of variable `index`.
    fn upper_bound(&self, index: usize) -> f64;

    /// Creates `n` random valid (unevaluated) solutions.
    fn new_random_solutions<R: Rng>(&self, n: usize, rng: &mut R) -> Solutions<Self::Value>;

    /// Fills in the objective values of one solution.
    fn evaluate(&self, solution: &mut Solution<Self::Value>);

    /// Evaluates every member of a population, in order.
    fn evaluate_all(&self, solutions: &mut Solutions<Self::Value>) {
        for solution in solutions.iter_mut() {
            self.evaluate(solution);
        }
    }
}

/// Draws `n` solutions with each variable uniform in its bounds.
///
/// Convenience for real-valued problems implementing
/// [`Problem::new_random_solutions`].
pub fn uniform_real_solutions<P, R>(problem: &P, n: usize, rng: &mut R) -> Solutions<f64>
where
    P: Problem<Value = f64> + ?Sized,
    R: Rng,
{
    let n_vars = problem.number_of_variables();
    let n_objs = problem.number_of_objectives();

    (0..n)
        .map(|_| {
            let values: Vec<f64> = (0..n_vars)
                .map(|j| {
                    let lo = problem.lower_bound(j);
                    let hi = problem.upper_bound(j);
                    rng.random_range(lo..=hi)
                })
                .collect();
            Solution::from_values(values, n_objs)
        })
        .collect()
}

/// Checks the shape of a problem definition.
///
/// Rejects zero variables, zero objectives, and bounds that are
/// non-finite or inverted.
pub fn validate_problem<P: Problem + ?Sized>(problem: &P) -> Result<(), OptimError> {
    let n_vars = problem.number_of_variables();
    if n_vars == 0 {
        return Err(OptimError::InvalidProblem(
            "number_of_variables must be at least 1".into(),
        ));
    }
    if problem.number_of_objectives() == 0 {
        return Err(OptimError::InvalidProblem(
            "number_of_objectives must be at least 1".into(),
        ));
    }
    for j in 0..n_vars {
        let lo = problem.lower_bound(j);
        let hi = problem.upper_bound(j);
        if !lo.is_finite() || !hi.is_finite() {
            return Err(OptimError::InvalidProblem(format!(
                "bounds of variable {j} must be finite, got [{lo}, {hi}]"
            )));
        }
        if lo > hi {
            return Err(OptimError::InvalidProblem(format!(
                "lower bound of variable {j} exceeds upper bound: {lo} > {hi}"
            )));
        }
    }
    Ok(())
}

/// Checks that a population matches the problem's shape.
///
/// `expected_len` additionally pins the population size.
pub fn validate_population<P: Problem + ?Sized>(
    problem: &P,
    solutions: &Solutions<P::Value>,
    expected_len: Option<usize>,
) -> Result<(), OptimError> {
    if let Some(len) = expected_len {
        if solutions.len() != len {
            return Err(OptimError::InvalidSeed(format!(
                "expected {len} solutions, got {}",
                solutions.len()
            )));
        }
    }
    if solutions.is_empty() {
        return Err(OptimError::InvalidSeed("population is empty".into()));
    }

    let n_vars = problem.number_of_variables();
    let n_objs = problem.number_of_objectives();
    for (i, s) in solutions.iter().enumerate() {
        if s.number_of_variables() != n_vars {
            return Err(OptimError::InvalidSeed(format!(
                "solution {i} has {} variables, problem declares {n_vars}",
                s.number_of_variables()
            )));
        }
        if s.number_of_objectives() != n_objs {
            return Err(OptimError::InvalidSeed(format!(
                "solution {i} has {} objectives, problem declares {n_objs}",
                s.number_of_objectives()
            )));
        }
    }
    Ok(())
}
