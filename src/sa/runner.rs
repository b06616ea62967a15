//! SA search loop.

use super::config::SaConfig;
use crate::algorithm::{Algorithm, Lifecycle, LifecycleState};
use crate::error::OptimError;
use crate::pareto::{compare_solutions, Dominance};
use crate::problem::{validate_population, validate_problem, Problem, Solution, Solutions};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Debug, Clone)]
struct Trajectory<T> {
    current: Solution<T>,
    best: Solution<T>,
    initial_cost: f64,
    current_min_cost: f64,
}

/// Single-objective Simulated Annealing with a self-adapting temperature.
///
/// The neighbour of the current solution is a copy with one randomly
/// chosen variable replaced by the same variable of a fresh random
/// solution, so any [`Problem`] works regardless of its value type.
///
/// # Examples
///
/// ```
/// use u_moopt::algorithm::Algorithm;
/// use u_moopt::benchmarks::Rastrigin;
/// use u_moopt::sa::{SaConfig, SimulatedAnnealing};
///
/// let config = SaConfig::default().with_max_iterations(2_000).with_seed(42);
/// let mut sa = SimulatedAnnealing::new(Rastrigin::new(3), config).unwrap();
/// sa.initialize(None).unwrap();
/// let best = sa.execute().unwrap();
///
/// assert_eq!(best.len(), 1);
/// ```
pub struct SimulatedAnnealing<P: Problem, R = StdRng> {
    problem: P,
    config: SaConfig,
    rng: R,
    trajectory: Option<Trajectory<P::Value>>,
    accepted_moves: usize,
    improving_moves: usize,
    lifecycle: Lifecycle,
}

impl<P: Problem> SimulatedAnnealing<P, StdRng> {
    /// Creates an annealer seeded from `config.seed`, or from entropy when
    /// no seed is set.
    pub fn new(problem: P, config: SaConfig) -> Result<Self, OptimError> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };
        Self::with_rng(problem, config, rng)
    }
}

impl<P: Problem, R: Rng> SimulatedAnnealing<P, R> {
    /// Creates an annealer drawing from `rng`; `config.seed` is ignored.
    pub fn with_rng(problem: P, config: SaConfig, rng: R) -> Result<Self, OptimError> {
        config.validate().map_err(OptimError::InvalidConfig)?;
        Ok(Self {
            lifecycle: Lifecycle::new("sa", config.max_iterations),
            problem,
            config,
            rng,
            trajectory: None,
            accepted_moves: 0,
            improving_moves: 0,
        })
    }

    /// Installs an external cancellation flag, checked at the top of every step.
    pub fn with_cancel(mut self, flag: Arc<AtomicBool>) -> Self {
        self.lifecycle.set_cancel(flag);
        self
    }

    pub fn problem(&self) -> &P {
        &self.problem
    }

    pub fn config(&self) -> &SaConfig {
        &self.config
    }

    /// The solution the walk currently sits on.
    pub fn current(&self) -> Option<&Solution<P::Value>> {
        self.trajectory.as_ref().map(|t| &t.current)
    }

    /// Best solution found so far.
    pub fn best(&self) -> Option<&Solution<P::Value>> {
        self.trajectory.as_ref().map(|t| &t.best)
    }

    /// Objective value of the best solution, if initialized.
    pub fn best_cost(&self) -> Option<f64> {
        self.best().map(|s| s.objective(0))
    }

    /// Number of accepted moves (including improvements).
    pub fn accepted_moves(&self) -> usize {
        self.accepted_moves
    }

    /// Number of moves to a strictly better solution.
    pub fn improving_moves(&self) -> usize {
        self.improving_moves
    }

    pub fn is_cancelled(&self) -> bool {
        self.lifecycle.is_cancelled()
    }

    fn random_solution(&mut self) -> Result<Solution<P::Value>, OptimError> {
        self.problem
            .new_random_solutions(1, &mut self.rng)
            .into_inner()
            .into_iter()
            .next()
            .ok_or_else(|| {
                OptimError::InvalidProblem("new_random_solutions returned no solution".into())
            })
    }
}

impl<P: Problem, R: Rng> Algorithm for SimulatedAnnealing<P, R> {
    type Value = P::Value;

    fn initialize(&mut self, seed: Option<Solutions<P::Value>>) -> Result<(), OptimError> {
        self.lifecycle.check_uninitialized()?;
        validate_problem(&self.problem)?;
        let n_objs = self.problem.number_of_objectives();
        if n_objs != 1 {
            return Err(OptimError::InvalidProblem(format!(
                "simulated annealing needs exactly 1 objective, problem declares {n_objs}"
            )));
        }

        let mut current = match seed {
            Some(seed) => {
                validate_population(&self.problem, &seed, None)?;
                seed.into_inner()
                    .into_iter()
                    .next()
                    .ok_or_else(|| OptimError::InvalidSeed("population is empty".into()))?
            }
            None => self.random_solution()?,
        };
        self.problem.evaluate(&mut current);

        let initial_cost = current.objective(0);
        log::debug!("sa: initial cost {initial_cost}");
        self.trajectory = Some(Trajectory {
            best: current.clone(),
            current,
            initial_cost,
            current_min_cost: initial_cost,
        });

        self.lifecycle.mark_initialized();
        Ok(())
    }

    fn step(&mut self) -> Result<(), OptimError> {
        if !self.lifecycle.begin_step()? {
            return Ok(());
        }
        let iteration = self.lifecycle.iteration();

        let fresh = self.random_solution()?;
        let trajectory = self.trajectory.as_mut().ok_or(OptimError::NotInitialized)?;
        trajectory.current_min_cost = trajectory.current.objective(0);

        let mut neighbour = trajectory.current.clone();
        let n_vars = neighbour.number_of_variables();
        if n_vars > 0 {
            let j = self.rng.random_range(0..n_vars);
            *neighbour.variable_mut(j) = fresh.variable(j).clone();
        }
        self.problem.evaluate(&mut neighbour);

        if compare_solutions(&neighbour, &trajectory.best) == Dominance::Left {
            trajectory.best = neighbour.clone();
        }

        let improves = compare_solutions(&neighbour, &trajectory.current) == Dominance::Left;
        let accept = improves || {
            let temperature = natural_temperature(
                self.config.k,
                trajectory.current_min_cost,
                trajectory.initial_cost,
                iteration,
            );
            let diff = neighbour.objective(0) - trajectory.current.objective(0);
            metropolis_accept(diff, temperature, &mut self.rng)
        };
        if accept {
            trajectory.current = neighbour;
            self.accepted_moves += 1;
            if improves {
                self.improving_moves += 1;
            }
        }

        let best_cost = trajectory.best.objective(0);
        if let Some(percent) = self.lifecycle.end_step() {
            log::info!("sa: {percent}% performed -- best fitness: {best_cost}");
        }
        if best_cost <= self.config.target_objective
            && self.lifecycle.state() != LifecycleState::Terminated
        {
            log::info!("sa: target reached in {iteration} iterations");
            self.lifecycle.terminate();
        }
        Ok(())
    }

    fn state(&self) -> LifecycleState {
        self.lifecycle.state()
    }

    fn iteration(&self) -> usize {
        self.lifecycle.iteration()
    }

    fn result(&self) -> Solutions<P::Value> {
        self.best().cloned().into_iter().collect()
    }
}

/// Temperature `k * |(current_min_cost - initial_cost) / iteration|`.
///
/// Zero until the walk has moved away from its starting cost.
pub fn natural_temperature(k: f64, current_min_cost: f64, initial_cost: f64, iteration: usize) -> f64 {
    if iteration == 0 {
        return 0.0;
    }
    k * ((current_min_cost - initial_cost) / iteration as f64).abs()
}

/// Metropolis criterion: accept with probability `exp(-diff / temperature)`.
///
/// At zero (or non-finite) temperature only non-worsening moves pass.
pub fn metropolis_accept<R: Rng>(diff: f64, temperature: f64, rng: &mut R) -> bool {
    if !(temperature > 0.0 && temperature.is_finite()) {
        return diff <= 0.0;
    }
    let probability = (-diff / temperature).exp();
    rng.random::<f64>() <= probability
}
