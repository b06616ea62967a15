//! Orderings over solutions.
//!
//! All comparators order "better" first (`Ordering::Less`), so they can be
//! handed straight to `sort_by` or [`TournamentSelect`](super::TournamentSelect).

use crate::pareto::{compare_solutions, Dominance};
use crate::problem::Solution;
use std::cmp::Ordering;

/// Orders a dominating solution before the one it dominates.
///
/// Incomparable and identical solutions compare `Equal`; this is not a
/// total order.
pub fn compare_dominance<T>(a: &Solution<T>, b: &Solution<T>) -> Ordering {
    match compare_solutions(a, b) {
        Dominance::Left => Ordering::Less,
        Dominance::Right => Ordering::Greater,
        Dominance::Neither => Ordering::Equal,
    }
}

/// Orders by ascending crowding distance (most crowded first).
///
/// Unassigned distances count as `0.0`.
pub fn compare_crowding_distance<T>(a: &Solution<T>, b: &Solution<T>) -> Ordering {
    a.crowding_distance().total_cmp(&b.crowding_distance())
}

/// NSGA-II crowded comparison: lower rank first, then larger crowding
/// distance first.
///
/// Unassigned ranks sort last.
pub fn compare_rank_crowding<T>(a: &Solution<T>, b: &Solution<T>) -> Ordering {
    let rank_a = a.scratch.rank.unwrap_or(usize::MAX);
    let rank_b = b.scratch.rank.unwrap_or(usize::MAX);
    rank_a
        .cmp(&rank_b)
        .then_with(|| b.crowding_distance().total_cmp(&a.crowding_distance()))
}
