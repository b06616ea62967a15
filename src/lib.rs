//! Multi-objective optimization engine.
//!
//! Provides the Pareto machinery shared by multi-objective metaheuristics
//! and the algorithms built on it:
//!
//! - **Problem model**: [`problem::Solution`] / [`problem::Solutions`] with
//!   typed scratch annotations, and the [`problem::Problem`] contract the
//!   user implements.
//! - **Pareto utilities**: dominance comparison, non-dominated sorting,
//!   crowding distance and a bounded leader archive pruned by crowding.
//! - **Operators**: uniform, non-uniform, polynomial, bit-flip and
//!   integer mutations; dominance and crowded comparators; tournament
//!   selection.
//! - **OMOPSO**: multi-objective particle swarm with crowding-based leader
//!   selection and mutation turbulence.
//! - **Simulated Annealing (SA)**: single-objective trajectory search with
//!   a self-adapting temperature.
//! - **Benchmarks**: ZDT1, ZDT2, DTLZ4, DTLZ5 and Rastrigin.
//!
//! Every algorithm follows the same `initialize → step → execute`
//! life-cycle ([`algorithm::Algorithm`]), takes an injectable random
//! source and honours an external cancellation flag.
//!
//! All objectives are minimized. Logging goes through the `log` facade;
//! install any logger to see progress reports.

pub mod algorithm;
pub mod benchmarks;
pub mod error;
pub mod omopso;
pub mod operators;
pub mod pareto;
pub mod problem;
pub mod sa;

pub use error::OptimError;
