//! Pareto dominance and non-dominated sorting.
//!
//! All objectives are **minimized**: lower values are better.
//!
//! # References
//!
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II"
//! - IEEE Transactions on Evolutionary Computation, 6(2), 182-197

use crate::problem::Solution;

/// Dominance comparison result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dominance {
    /// Left dominates right.
    Left,
    /// Right dominates left.
    Right,
    /// Neither dominates the other (incomparable or identical).
    Neither,
}

/// Compares two objective vectors for Pareto dominance (minimization).
///
/// `a` dominates `b` iff `a` is no worse in every objective and strictly
/// better in at least one. Identical vectors yield [`Dominance::Neither`].
///
/// # Example
///
/// ```
/// use u_moopt::pareto::{dominance_cmp, Dominance};
///
/// assert_eq!(dominance_cmp(&[1.0, 2.0], &[2.0, 2.0]), Dominance::Left);
/// assert_eq!(dominance_cmp(&[1.0, 3.0], &[2.0, 2.0]), Dominance::Neither);
/// assert_eq!(dominance_cmp(&[1.0, 1.0], &[1.0, 1.0]), Dominance::Neither);
/// ```
pub fn dominance_cmp(a: &[f64], b: &[f64]) -> Dominance {
    debug_assert_eq!(a.len(), b.len(), "objective vectors must have equal length");

    let mut a_better_in_some = false;
    let mut b_better_in_some = false;

    for (&va, &vb) in a.iter().zip(b.iter()) {
        if va < vb {
            a_better_in_some = true;
        } else if vb < va {
            b_better_in_some = true;
        }
    }

    match (a_better_in_some, b_better_in_some) {
        (true, false) => Dominance::Left,
        (false, true) => Dominance::Right,
        _ => Dominance::Neither,
    }
}

/// Dominance comparison of two solutions by their objective vectors.
pub fn compare_solutions<T>(a: &Solution<T>, b: &Solution<T>) -> Dominance {
    dominance_cmp(&a.objectives, &b.objectives)
}

/// Returns `true` if `a` dominates `b`.
pub fn dominates(a: &[f64], b: &[f64]) -> bool {
    dominance_cmp(a, b) == Dominance::Left
}

/// Result of non-dominated sorting.
///
/// Each element of `ranks` corresponds to the Pareto rank of the solution
/// at the same index. Rank 0 is the Pareto front (non-dominated solutions).
#[derive(Debug, Clone)]
pub struct NondominatedSortResult {
    /// Pareto rank for each solution (0 = front).
    pub ranks: Vec<usize>,

    /// Indices grouped by front: `fronts[0]` contains rank-0 indices, etc.
    pub fronts: Vec<Vec<usize>>,
}

/// Fast non-dominated sorting.
///
/// # Algorithm (Deb et al., 2002)
///
/// 1. For each pair of solutions, determine dominance
/// 2. Solutions dominated by no other belong to front 0 (rank 0)
/// 3. Remove front 0, repeat to find subsequent fronts
///
/// # Complexity
///
/// O(m * n²) where m = number of objectives, n = number of solutions
///
/// An empty input yields no ranks and no fronts.
///
/// # Example
///
/// ```
/// use u_moopt::pareto::non_dominated_sort;
///
/// let objectives = vec![
///     vec![1.0, 5.0],
///     vec![3.0, 3.0],
///     vec![5.0, 1.0],
///     vec![4.0, 4.0], // dominated by (3, 3)
/// ];
///
/// let result = non_dominated_sort(&objectives);
/// assert_eq!(result.ranks, vec![0, 0, 0, 1]);
/// ```
pub fn non_dominated_sort(objectives: &[Vec<f64>]) -> NondominatedSortResult {
    let n = objectives.len();
    if n == 0 {
        return NondominatedSortResult {
            ranks: Vec::new(),
            fronts: Vec::new(),
        };
    }

    let mut domination_count = vec![0usize; n];
    let mut dominated_by: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut ranks = vec![0usize; n];

    for i in 0..n {
        for j in (i + 1)..n {
            match dominance_cmp(&objectives[i], &objectives[j]) {
                Dominance::Left => {
                    dominated_by[i].push(j);
                    domination_count[j] += 1;
                }
                Dominance::Right => {
                    dominated_by[j].push(i);
                    domination_count[i] += 1;
                }
                Dominance::Neither => {}
            }
        }
    }

    let front_0: Vec<usize> = (0..n).filter(|&i| domination_count[i] == 0).collect();

    let mut fronts = vec![front_0];
    loop {
        let mut next_front = Vec::new();
        if let Some(current) = fronts.last() {
            for &i in current {
                for &j in &dominated_by[i] {
                    domination_count[j] -= 1;
                    if domination_count[j] == 0 {
                        ranks[j] = fronts.len();
                        next_front.push(j);
                    }
                }
            }
        }

        if next_front.is_empty() {
            break;
        }
        fronts.push(next_front);
    }

    NondominatedSortResult { ranks, fronts }
}

/// Sorts a population into fronts and stores each member's rank in
/// [`Scratch::rank`](crate::problem::Scratch::rank).
pub fn assign_ranks<T>(solutions: &mut [Solution<T>]) -> Vec<Vec<usize>> {
    let objectives: Vec<Vec<f64>> = solutions.iter().map(|s| s.objectives.clone()).collect();
    let result = non_dominated_sort(&objectives);
    for (solution, &rank) in solutions.iter_mut().zip(result.ranks.iter()) {
        solution.scratch.rank = Some(rank);
    }
    result.fronts
}
