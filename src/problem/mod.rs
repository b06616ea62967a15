//! Solution model and problem contract.
//!
//! - [`Variable`]: one decision-variable value
//! - [`Solution`]: variables, objective values and [`Scratch`] annotations
//! - [`Solutions`]: an ordered population with bulk operations
//! - [`Problem`]: the user-supplied search space and objective function

mod solution;
mod types;
mod variable;

pub use solution::{Scratch, Solution, Solutions};
pub use types::{uniform_real_solutions, validate_population, validate_problem, Problem};
pub use variable::Variable;
