//! Variation and selection operators.
//!
//! # Submodules
//!
//! - mutation: [`UniformMutation`], [`NonUniformMutation`],
//!   [`PolynomialMutation`], [`BooleanMutation`], [`IntegerFlipMutation`]
//! - comparators: [`compare_dominance`], [`compare_crowding_distance`],
//!   [`compare_rank_crowding`]
//! - selection: [`TournamentSelect`]

mod comparator;
mod mutation;
mod selection;

pub use comparator::{compare_crowding_distance, compare_dominance, compare_rank_crowding};
pub use mutation::{
    BooleanMutation, IntegerFlipMutation, MutationOperator, NonUniformMutation,
    PolynomialMutation, UniformMutation, DEFAULT_DISTRIBUTION_INDEX, DEFAULT_PERTURBATION,
};
pub use selection::{TournamentSelect, DEFAULT_TOURNAMENT_SIZE};
