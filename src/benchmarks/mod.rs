//! Standard test problems.
//!
//! - [`Zdt1`], [`Zdt2`]: bi-objective, with sampled optimal fronts
//! - [`Dtlz4`], [`Dtlz5`]: scalable many-objective (three by default)
//! - [`Rastrigin`]: multimodal single objective
//!
//! # References
//!
//! - Zitzler, Deb & Thiele (2000), "Comparison of Multiobjective
//!   Evolutionary Algorithms: Empirical Results"
//! - Deb, Thiele, Laumanns & Zitzler (2002), "Scalable Multi-Objective
//!   Optimization Test Problems"
//! - Rastrigin (1974), *Systems of Extremal Control*

mod dtlz;
mod rastrigin;
mod zdt;

pub use dtlz::{Dtlz4, Dtlz5, DTLZ_DEFAULT_OBJECTIVES, DTLZ_DEFAULT_VARIABLES};
pub use rastrigin::{Rastrigin, RASTRIGIN_BOUND};
pub use zdt::{Zdt1, Zdt2, ZDT_DEFAULT_VARIABLES};
