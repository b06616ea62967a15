//! Simulated Annealing (SA) with a self-adapting temperature.
//!
//! A single-solution trajectory method for single-objective problems.
//! Rather than following a cooling schedule, the temperature at iteration
//! `t` is `k * |(c_t - c_0) / t|`, where `c_0` is the starting cost and
//! `c_t` the cost of the current solution: the more progress the walk has
//! made per iteration, the more uphill moves it tolerates.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - de Vicente, Lanchares & Hermida (2000), "Annealing Placement by Thermodynamic
//!   Combinatorial Optimization" (natural optimization)

mod config;
mod runner;

pub use config::SaConfig;
pub use runner::{metropolis_accept, natural_temperature, SimulatedAnnealing};
