//! Tournament selection over solutions.
//!
//! # References
//!
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use super::comparator::compare_dominance;
use crate::problem::Solution;
use rand::Rng;
use std::cmp::Ordering;

/// Default number of contestants.
pub const DEFAULT_TOURNAMENT_SIZE: usize = 2;

/// Tournament selection: draw `size` members uniformly (with
/// replacement) and return the best according to a comparator.
///
/// Among contestants that compare `Equal`, the earliest drawn wins.
///
/// # Examples
///
/// ```
/// use rand::{rngs::StdRng, SeedableRng};
/// use u_moopt::operators::{compare_rank_crowding, TournamentSelect};
/// use u_moopt::pareto::{assign_crowding_distance, assign_ranks};
/// use u_moopt::problem::Solution;
///
/// let mut pop: Vec<Solution<f64>> = [[1.0, 5.0], [3.0, 3.0], [4.0, 4.0]]
///     .iter()
///     .map(|o| {
///         let mut s = Solution::new(2);
///         s.objectives = o.to_vec();
///         s
///     })
///     .collect();
/// assign_ranks(&mut pop);
/// assign_crowding_distance(&mut pop);
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let idx = TournamentSelect::new(3).select_by(&pop, compare_rank_crowding, &mut rng);
/// assert!(idx < pop.len());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TournamentSelect {
    pub size: usize,
}

impl Default for TournamentSelect {
    fn default() -> Self {
        Self {
            size: DEFAULT_TOURNAMENT_SIZE,
        }
    }
}

impl TournamentSelect {
    pub fn new(size: usize) -> Self {
        Self { size }
    }

    /// Selects by Pareto dominance.
    ///
    /// # Panics
    /// Panics if `solutions` is empty.
    pub fn select<T, R: Rng>(&self, solutions: &[Solution<T>], rng: &mut R) -> usize {
        self.select_by(solutions, compare_dominance, rng)
    }

    /// Selects with a caller-supplied comparator (better = `Less`).
    ///
    /// # Panics
    /// Panics if `solutions` is empty.
    pub fn select_by<T, F, R>(&self, solutions: &[Solution<T>], compare: F, rng: &mut R) -> usize
    where
        F: Fn(&Solution<T>, &Solution<T>) -> Ordering,
        R: Rng,
    {
        assert!(!solutions.is_empty(), "cannot select from empty population");

        let n = solutions.len();
        let mut best = rng.random_range(0..n);
        for _ in 1..self.size.max(1) {
            let idx = rng.random_range(0..n);
            if compare(&solutions[idx], &solutions[best]) == Ordering::Less {
                best = idx;
            }
        }
        best
    }
}
