//! Multi-objective utilities: dominance, fronts, crowding and archives.
//!
//! # Algorithms
//!
//! - [`dominance_cmp`]: Pareto dominance between two objective vectors
//! - [`non_dominated_sort`]: Fast non-dominated sorting (Deb et al., 2002)
//! - [`crowding_distance`]: Crowding distance assignment for diversity preservation
//! - [`LeaderArchive`]: Bounded non-dominated archive pruned by crowding distance
//!
//! # References
//!
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II"
//! - Sierra & Coello Coello (2005), "Improving PSO-Based Multi-objective
//!   Optimization Using Crowding, Mutation and ε-Dominance"

mod archive;
mod crowding;
mod dominance;

pub use archive::LeaderArchive;
pub use crowding::{assign_crowding_distance, crowding_distance};
pub use dominance::{
    assign_ranks, compare_solutions, dominance_cmp, dominates, non_dominated_sort, Dominance,
    NondominatedSortResult,
};
