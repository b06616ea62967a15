//! OMOPSO search loop.

use super::config::OmopsoConfig;
use crate::algorithm::{Algorithm, Lifecycle, LifecycleState};
use crate::error::OptimError;
use crate::operators::{MutationOperator, NonUniformMutation, UniformMutation};
use crate::pareto::{compare_solutions, Dominance, LeaderArchive};
use crate::problem::{validate_population, validate_problem, Problem, Solution, Solutions};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// One member of the swarm.
///
/// Position, personal best and velocity are kept together so they can
/// never drift out of step.
#[derive(Debug, Clone)]
pub struct Particle {
    /// Current (evaluated) position.
    pub position: Solution<f64>,
    /// Best position this particle has visited.
    pub personal_best: Solution<f64>,
    /// One velocity component per decision variable.
    pub velocity: Vec<f64>,
}

/// Multi-objective particle swarm optimizer with crowding-based leader
/// selection and mutation turbulence.
///
/// The random source is injectable (`R`) so runs can be replayed exactly.
///
/// # Examples
///
/// ```
/// use u_moopt::algorithm::Algorithm;
/// use u_moopt::benchmarks::Zdt1;
/// use u_moopt::omopso::{Omopso, OmopsoConfig};
///
/// let config = OmopsoConfig::default()
///     .with_swarm_size(20)
///     .with_max_iterations(10)
///     .with_seed(42);
/// let mut omopso = Omopso::new(Zdt1::new(5), config).unwrap();
/// omopso.initialize(None).unwrap();
/// let front = omopso.execute().unwrap();
///
/// assert!(!front.is_empty() && front.len() <= 20);
/// ```
pub struct Omopso<P, R = StdRng> {
    problem: P,
    config: OmopsoConfig,
    rng: R,
    particles: Vec<Particle>,
    leaders: LeaderArchive<f64>,
    uniform: UniformMutation,
    non_uniform: NonUniformMutation,
    lifecycle: Lifecycle,
}

impl<P: Problem<Value = f64>> Omopso<P, StdRng> {
    /// Creates an optimizer seeded from `config.seed`, or from entropy when
    /// no seed is set.
    pub fn new(problem: P, config: OmopsoConfig) -> Result<Self, OptimError> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };
        Self::with_rng(problem, config, rng)
    }
}

impl<P: Problem<Value = f64>, R: Rng> Omopso<P, R> {
    /// Creates an optimizer drawing from `rng`; `config.seed` is ignored.
    pub fn with_rng(problem: P, config: OmopsoConfig, rng: R) -> Result<Self, OptimError> {
        config.validate().map_err(OptimError::InvalidConfig)?;

        let probability = config
            .mutation_probability
            .unwrap_or_else(|| 1.0 / problem.number_of_variables().max(1) as f64);
        let uniform = UniformMutation::new(probability, config.perturbation);
        let non_uniform =
            NonUniformMutation::new(probability, config.perturbation, config.max_iterations);

        Ok(Self {
            leaders: LeaderArchive::new(config.swarm_size),
            particles: Vec::with_capacity(config.swarm_size),
            lifecycle: Lifecycle::new("omopso", config.max_iterations),
            problem,
            config,
            rng,
            uniform,
            non_uniform,
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

    pub fn config(&self) -> &OmopsoConfig {
        &self.config
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn leaders(&self) -> &LeaderArchive<f64> {
        &self.leaders
    }

    /// Whether the last step observed the cancellation flag.
    pub fn is_cancelled(&self) -> bool {
        self.lifecycle.is_cancelled()
    }

    fn compute_speeds(&mut self) {
        let dynamic = self.config.dynamic_velocity;

        for particle in self.particles.iter_mut() {
            let leader = select_leader(self.leaders.members(), &mut self.rng)
                .and_then(|idx| self.leaders.get(idx))
                .unwrap_or(&particle.personal_best);

            let r1: f64 = self.rng.random();
            let r2: f64 = self.rng.random();
            let c1 = self.rng.random_range(1.5..2.0);
            let c2 = self.rng.random_range(1.5..2.0);
            let w = self.rng.random_range(0.1..0.5);

            for j in 0..particle.velocity.len() {
                let x = particle.position.variable(j).get();
                let pbest = particle.personal_best.variable(j).get();
                let gbest = leader.variable(j).get();

                let v = w * particle.velocity[j]
                    + c1 * r1 * (pbest - x)
                    + c2 * r2 * (gbest - x);

                particle.velocity[j] = if dynamic {
                    constrain_velocity(
                        v,
                        self.problem.lower_bound(j),
                        self.problem.upper_bound(j),
                    )
                } else {
                    v
                };
            }
        }
    }

    fn update_positions(&mut self) {
        for particle in self.particles.iter_mut() {
            for j in 0..particle.velocity.len() {
                let (x, v) = move_within_bounds(
                    particle.position.variable(j).get(),
                    particle.velocity[j],
                    self.problem.lower_bound(j),
                    self.problem.upper_bound(j),
                );
                particle.position.variable_mut(j).set_value(x);
                particle.velocity[j] = v;
            }
        }
    }

    /// Index `i mod 3`: 0 non-uniform, 1 uniform, 2 untouched.
    fn mutate_swarm(&mut self) {
        for (i, particle) in self.particles.iter_mut().enumerate() {
            match i % 3 {
                0 => self
                    .non_uniform
                    .mutate(&self.problem, &mut particle.position, &mut self.rng),
                1 => self
                    .uniform
                    .mutate(&self.problem, &mut particle.position, &mut self.rng),
                _ => {}
            }
        }
    }

    fn evaluate_swarm(&mut self) {
        for particle in self.particles.iter_mut() {
            self.problem.evaluate(&mut particle.position);
        }
    }

    fn update_personal_bests(&mut self) {
        for particle in self.particles.iter_mut() {
            if compare_solutions(&particle.position, &particle.personal_best) != Dominance::Right {
                particle.personal_best = particle.position.clone();
            }
        }
    }

    fn update_leaders(&mut self) {
        self.leaders
            .insert_all(self.particles.iter().map(|p| &p.position));
        self.leaders.reduce();
    }
}

impl<P: Problem<Value = f64>, R: Rng> Algorithm for Omopso<P, R> {
    type Value = f64;

    fn initialize(&mut self, seed: Option<Solutions<f64>>) -> Result<(), OptimError> {
        self.lifecycle.check_uninitialized()?;
        validate_problem(&self.problem)?;

        let mut swarm = match seed {
            Some(seed) => {
                validate_population(&self.problem, &seed, Some(self.config.swarm_size))?;
                seed
            }
            None => self
                .problem
                .new_random_solutions(self.config.swarm_size, &mut self.rng),
        };
        self.problem.evaluate_all(&mut swarm);

        let n_vars = self.problem.number_of_variables();
        self.particles = swarm
            .into_iter()
            .map(|position| Particle {
                personal_best: position.clone(),
                velocity: vec![0.0; n_vars],
                position,
            })
            .collect();

        self.update_leaders();
        log::debug!(
            "omopso: initialized {} particles, {} leaders",
            self.particles.len(),
            self.leaders.len()
        );

        self.lifecycle.mark_initialized();
        Ok(())
    }

    fn step(&mut self) -> Result<(), OptimError> {
        if !self.lifecycle.begin_step()? {
            return Ok(());
        }

        self.leaders.assign_crowding_distance();
        self.compute_speeds();
        self.update_positions();

        self.non_uniform
            .set_current_iteration(self.lifecycle.iteration());
        self.mutate_swarm();

        self.evaluate_swarm();
        self.update_personal_bests();
        self.update_leaders();

        if let Some(percent) = self.lifecycle.end_step() {
            log::info!(
                "omopso: {percent}% performed ({} leaders)",
                self.leaders.len()
            );
        }
        Ok(())
    }

    fn state(&self) -> LifecycleState {
        self.lifecycle.state()
    }

    fn iteration(&self) -> usize {
        self.lifecycle.iteration()
    }

    fn result(&self) -> Solutions<f64> {
        self.leaders.members().clone()
    }
}

/// Binary tournament on crowding distance.
///
/// Draws two leaders uniformly; the second wins only with a strictly
/// larger crowding distance. `None` for an empty archive.
pub fn select_leader<R: Rng>(leaders: &[Solution<f64>], rng: &mut R) -> Option<usize> {
    if leaders.is_empty() {
        return None;
    }
    let one = rng.random_range(0..leaders.len());
    let two = rng.random_range(0..leaders.len());
    if leaders[two].crowding_distance() > leaders[one].crowding_distance() {
        Some(two)
    } else {
        Some(one)
    }
}

/// Clamps a velocity component to `±(upper - lower) / 2`.
pub fn constrain_velocity(v: f64, lower: f64, upper: f64) -> f64 {
    let delta = (upper - lower) / 2.0;
    if v > delta {
        delta
    } else if v <= -delta {
        -delta
    } else {
        v
    }
}

/// Applies `x + v` and reflects off a violated bound.
///
/// Returns the new `(position, velocity)`; on a violation the position
/// sits on the bound and the velocity is negated.
pub fn move_within_bounds(x: f64, v: f64, lower: f64, upper: f64) -> (f64, f64) {
    let next = x + v;
    if next < lower {
        (lower, -v)
    } else if next > upper {
        (upper, -v)
    } else {
        (next, v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::benchmarks::Zdt1;
    use crate::pareto::dominates;
    use std::sync::atomic::Ordering;

    fn small_config(seed: u64) -> OmopsoConfig {
        OmopsoConfig::default()
            .with_swarm_size(12)
            .with_max_iterations(20)
            .with_seed(seed)
    }

    fn mean_front_gap(front: &Solutions<f64>) -> f64 {
        let total: f64 = front
            .iter()
            .map(|s| s.objective(1) - (1.0 - s.objective(0).sqrt()))
            .sum();
        total / front.len() as f64
    }

    // ---- Bounds and velocity ----

    #[test]
    fn test_reflection_upper() {
        let (x, v) = move_within_bounds(0.9, 0.4, 0.0, 1.0);
        assert!((x - 1.0).abs() < 1e-15);
        assert!((v + 0.4).abs() < 1e-15);
    }

    #[test]
    fn test_reflection_lower() {
        let (x, v) = move_within_bounds(0.1, -0.3, 0.0, 1.0);
        assert!(x.abs() < 1e-15);
        assert!((v - 0.3).abs() < 1e-15);
    }

    #[test]
    fn test_move_inside_bounds() {
        let (x, v) = move_within_bounds(0.2, 0.5, 0.0, 1.0);
        assert!((x - 0.7).abs() < 1e-15);
        assert!((v - 0.5).abs() < 1e-15);
    }

    #[test]
    fn test_constrain_velocity() {
        assert!((constrain_velocity(3.0, 0.0, 2.0) - 1.0).abs() < 1e-15);
        assert!((constrain_velocity(-3.0, 0.0, 2.0) + 1.0).abs() < 1e-15);
        assert!((constrain_velocity(-1.0, 0.0, 2.0) + 1.0).abs() < 1e-15);
        assert!((constrain_velocity(0.4, 0.0, 2.0) - 0.4).abs() < 1e-15);
    }

    // ---- Leader selection ----

    #[test]
    fn test_select_leader_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(select_leader(&[], &mut rng), None);
    }

    #[test]
    fn test_select_leader_prefers_sparse() {
        let mut crowded = Solution::new(2);
        crowded.scratch.crowding_distance = Some(1.0);
        let mut sparse = Solution::new(2);
        sparse.scratch.crowding_distance = Some(3.0);
        let leaders = vec![crowded, sparse];

        let mut rng = StdRng::seed_from_u64(42);
        let n = 10_000;
        let hits = (0..n)
            .filter(|_| select_leader(&leaders, &mut rng) == Some(1))
            .count();
        // loses only when both draws hit the crowded leader
        let ratio = hits as f64 / n as f64;
        assert!((0.7..0.8).contains(&ratio), "ratio = {ratio}");
    }

    #[test]
    fn test_select_leader_tie_keeps_first_draw() {
        let leaders = vec![Solution::new(2), Solution::new(2), Solution::new(2)];
        let mut a = StdRng::seed_from_u64(9);
        let mut b = StdRng::seed_from_u64(9);
        for _ in 0..50 {
            let expected = b.random_range(0..3);
            let _ = b.random_range(0..3usize);
            assert_eq!(select_leader(&leaders, &mut a), Some(expected));
        }
    }

    // ---- Life-cycle ----

    #[test]
    fn test_invalid_config() {
        let result = Omopso::new(Zdt1::new(3), OmopsoConfig::default().with_swarm_size(0));
        assert!(matches!(result, Err(OptimError::InvalidConfig(_))));
    }

    #[test]
    fn test_step_before_initialize() {
        let mut omopso = Omopso::new(Zdt1::new(3), small_config(1)).unwrap();
        assert_eq!(omopso.state(), LifecycleState::Uninitialized);
        assert_eq!(omopso.step(), Err(OptimError::NotInitialized));
        assert_eq!(omopso.execute().unwrap_err(), OptimError::NotInitialized);
    }

    #[test]
    fn test_double_initialize() {
        let mut omopso = Omopso::new(Zdt1::new(3), small_config(1)).unwrap();
        omopso.initialize(None).unwrap();
        assert_eq!(omopso.initialize(None), Err(OptimError::AlreadyInitialized));
    }

    #[test]
    fn test_initialize_state() {
        let mut omopso = Omopso::new(Zdt1::new(4), small_config(3)).unwrap();
        omopso.initialize(None).unwrap();

        assert_eq!(omopso.state(), LifecycleState::Initialized);
        assert_eq!(omopso.iteration(), 0);
        assert_eq!(omopso.particles().len(), 12);
        for p in omopso.particles() {
            assert!(p.velocity.iter().all(|&v| v == 0.0));
            assert_eq!(p.position.values(), p.personal_best.values());
            assert!(p.position.objective(1) > 0.0);
        }
        assert!(!omopso.leaders().is_empty());
        assert!(omopso.leaders().len() <= 12);
    }

    #[test]
    fn test_execute_runs_budget() {
        let mut omopso = Omopso::new(Zdt1::new(4), small_config(5)).unwrap();
        omopso.initialize(None).unwrap();
        let front = omopso.execute().unwrap();

        assert_eq!(omopso.iteration(), 20);
        assert_eq!(omopso.state(), LifecycleState::Terminated);
        assert_eq!(omopso.step(), Err(OptimError::Terminated));
        assert_eq!(front.len(), omopso.leaders().len());

        let again = omopso.execute().unwrap();
        assert_eq!(again.objective_matrix(), front.objective_matrix());
    }

    #[test]
    fn test_zero_budget() {
        let config = small_config(5).with_max_iterations(0);
        let mut omopso = Omopso::new(Zdt1::new(4), config).unwrap();
        omopso.initialize(None).unwrap();
        assert_eq!(omopso.state(), LifecycleState::Terminated);
        let front = omopso.execute().unwrap();
        assert!(!front.is_empty());
        assert_eq!(omopso.iteration(), 0);
    }

    #[test]
    fn test_seed_population() {
        let problem = Zdt1::new(3);
        let mut rng = StdRng::seed_from_u64(8);
        let seed = problem.new_random_solutions(12, &mut rng);
        let seed_values: Vec<Vec<f64>> = seed.iter().map(|s| s.values()).collect();

        let mut omopso = Omopso::new(problem, small_config(2)).unwrap();
        omopso.initialize(Some(seed)).unwrap();
        let positions: Vec<Vec<f64>> = omopso
            .particles()
            .iter()
            .map(|p| p.position.values())
            .collect();
        assert_eq!(positions, seed_values);
    }

    #[test]
    fn test_seed_wrong_size() {
        let problem = Zdt1::new(3);
        let mut rng = StdRng::seed_from_u64(8);
        let seed = problem.new_random_solutions(5, &mut rng);

        let mut omopso = Omopso::new(problem, small_config(2)).unwrap();
        assert!(matches!(
            omopso.initialize(Some(seed)),
            Err(OptimError::InvalidSeed(_))
        ));
        assert_eq!(omopso.state(), LifecycleState::Uninitialized);
    }

    #[test]
    fn test_cancellation() {
        let flag = Arc::new(AtomicBool::new(false));
        let mut omopso = Omopso::new(Zdt1::new(3), small_config(4))
            .unwrap()
            .with_cancel(flag.clone());
        omopso.initialize(None).unwrap();
        omopso.step().unwrap();

        flag.store(true, Ordering::Relaxed);
        let front = omopso.execute().unwrap();

        assert!(omopso.is_cancelled());
        assert_eq!(omopso.iteration(), 1);
        assert_eq!(omopso.state(), LifecycleState::Terminated);
        assert!(!front.is_empty());
    }

    // ---- Step semantics ----

    #[test]
    fn test_mutation_roles_by_index() {
        let config = small_config(6).with_mutation_probability(1.0);
        let mut omopso = Omopso::new(Zdt1::new(4), config).unwrap();
        omopso.initialize(None).unwrap();

        for p in omopso.particles.iter_mut() {
            for j in 0..4 {
                p.position.variable_mut(j).set_value(0.5);
            }
        }
        omopso.non_uniform.set_current_iteration(1);
        omopso.mutate_swarm();

        for (i, p) in omopso.particles().iter().enumerate() {
            let unchanged = p.position.values().iter().all(|&v| v == 0.5);
            if i % 3 == 2 {
                assert!(unchanged, "particle {i} must not be mutated");
            } else {
                assert!(!unchanged, "particle {i} must be mutated");
            }
        }
    }

    #[test]
    fn test_positions_stay_in_bounds() {
        let mut omopso = Omopso::new(Zdt1::new(5), small_config(11)).unwrap();
        omopso.initialize(None).unwrap();
        for _ in 0..10 {
            omopso.step().unwrap();
            for p in omopso.particles() {
                assert!(p.position.values().iter().all(|&x| (0.0..=1.0).contains(&x)));
            }
        }
    }

    #[test]
    fn test_dynamic_velocity_bounded() {
        let config = small_config(12).with_dynamic_velocity(true);
        let mut omopso = Omopso::new(Zdt1::new(5), config).unwrap();
        omopso.initialize(None).unwrap();
        for _ in 0..10 {
            omopso.step().unwrap();
            for p in omopso.particles() {
                assert!(p.velocity.iter().all(|&v| v.abs() <= 0.5 + 1e-12));
            }
        }
    }

    #[test]
    fn test_personal_best_monotonic() {
        let mut omopso = Omopso::new(Zdt1::new(5), small_config(13)).unwrap();
        omopso.initialize(None).unwrap();
        for _ in 0..15 {
            let before: Vec<Solution<f64>> = omopso
                .particles()
                .iter()
                .map(|p| p.personal_best.clone())
                .collect();
            omopso.step().unwrap();
            for (old, p) in before.iter().zip(omopso.particles()) {
                assert!(!dominates(&old.objectives, &p.personal_best.objectives));
            }
        }
    }

    #[test]
    fn test_archive_invariants_after_steps() {
        let mut omopso = Omopso::new(Zdt1::new(5), small_config(14)).unwrap();
        omopso.initialize(None).unwrap();
        for _ in 0..10 {
            omopso.step().unwrap();
            let leaders = omopso.leaders().members();
            assert!(leaders.len() <= 12);
            assert!(!leaders.is_empty());
            for a in leaders.iter() {
                for b in leaders.iter() {
                    assert!(!dominates(&a.objectives, &b.objectives));
                }
            }
        }
    }

    #[test]
    fn test_same_seed_same_front() {
        let run = |seed| {
            let mut omopso = Omopso::new(Zdt1::new(4), small_config(seed)).unwrap();
            omopso.initialize(None).unwrap();
            omopso.execute().unwrap().objective_matrix()
        };
        assert_eq!(run(21), run(21));
    }

    #[test]
    fn test_injected_rng_matches_seeded() {
        let mut seeded = Omopso::new(Zdt1::new(4), small_config(77)).unwrap();
        let mut injected = Omopso::with_rng(
            Zdt1::new(4),
            OmopsoConfig::default()
                .with_swarm_size(12)
                .with_max_iterations(20),
            StdRng::seed_from_u64(77),
        )
        .unwrap();
        seeded.initialize(None).unwrap();
        injected.initialize(None).unwrap();
        assert_eq!(
            seeded.execute().unwrap().objective_matrix(),
            injected.execute().unwrap().objective_matrix()
        );
    }

    #[test]
    fn test_zdt1_converges() {
        let config = OmopsoConfig::default()
            .with_swarm_size(50)
            .with_max_iterations(150)
            .with_seed(42);
        let mut omopso = Omopso::new(Zdt1::new(10), config).unwrap();
        omopso.initialize(None).unwrap();
        let initial_gap = mean_front_gap(omopso.leaders().members());

        let front = omopso.execute().unwrap();
        let final_gap = mean_front_gap(&front);

        assert!(front.len() > 10, "front too small: {}", front.len());
        assert!(
            final_gap < initial_gap,
            "no progress: {initial_gap} -> {final_gap}"
        );
        assert!(final_gap < 0.5, "front gap too large: {final_gap}");
    }
}
