//! OMOPSO: multi-objective particle swarm optimization.
//!
//! Each particle is pulled towards its own best position and towards a
//! leader drawn from a bounded archive of non-dominated solutions. Leaders
//! are chosen by a binary tournament on crowding distance, which steers
//! the swarm towards sparse regions of the front. A third of the swarm
//! receives non-uniform mutation, a third uniform mutation.
//!
//! # References
//!
//! - Sierra & Coello Coello (2005), "Improving PSO-Based Multi-objective
//!   Optimization Using Crowding, Mutation and ε-Dominance"
//! - Kennedy & Eberhart (1995), "Particle Swarm Optimization"

mod config;
mod runner;

pub use config::OmopsoConfig;
pub use runner::{constrain_velocity, move_within_bounds, select_leader, Omopso, Particle};
