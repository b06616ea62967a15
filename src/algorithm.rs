//! Shared algorithm life-cycle.
//!
//! Every algorithm moves through the same states:
//!
//! ```text
//! Uninitialized --initialize--> Initialized --step--> Stepping --budget/cancel/target--> Terminated
//! ```
//!
//! [`Algorithm`] exposes the three operations; [`Lifecycle`] holds the
//! bookkeeping (iteration counter, budget, cancellation flag, progress
//! reporting) so concrete algorithms only implement the search itself.

use crate::error::OptimError;
use crate::problem::Solutions;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Life-cycle state of an algorithm instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// Constructed; `initialize` has not run.
    Uninitialized,
    /// Starting population evaluated; no step taken yet.
    Initialized,
    /// At least one step taken; budget not exhausted.
    Stepping,
    /// Budget exhausted, target reached or cancelled.
    Terminated,
}

/// A search algorithm driven by `initialize → step* → execute`.
///
/// # Usage
///
/// ```
/// use u_moopt::algorithm::Algorithm;
/// use u_moopt::benchmarks::Zdt1;
/// use u_moopt::omopso::{Omopso, OmopsoConfig};
///
/// # fn main() -> Result<(), u_moopt::OptimError> {
/// let config = OmopsoConfig::default().with_max_iterations(5).with_seed(42);
/// let mut algorithm = Omopso::new(Zdt1::default(), config)?;
/// algorithm.initialize(None)?;
/// let front = algorithm.execute()?;
/// assert!(!front.is_empty());
/// # Ok(())
/// # }
/// ```
pub trait Algorithm {
    /// Decision-variable value type of the solutions produced.
    type Value;

    /// Builds and evaluates the starting population.
    ///
    /// `seed` replaces the random starting population. Must be called
    /// exactly once.
    fn initialize(&mut self, seed: Option<Solutions<Self::Value>>) -> Result<(), OptimError>;

    /// Advances the search by one iteration.
    fn step(&mut self) -> Result<(), OptimError>;

    fn state(&self) -> LifecycleState;

    /// Number of completed steps.
    fn iteration(&self) -> usize;

    /// The current result set (a copy).
    fn result(&self) -> Solutions<Self::Value>;

    /// Steps until termination and returns the result set.
    ///
    /// On an already-terminated algorithm this returns the result again.
    fn execute(&mut self) -> Result<Solutions<Self::Value>, OptimError> {
        if self.state() == LifecycleState::Uninitialized {
            return Err(OptimError::NotInitialized);
        }
        while self.state() != LifecycleState::Terminated {
            self.step()?;
        }
        Ok(self.result())
    }
}

/// Iteration bookkeeping shared by all algorithms.
#[derive(Debug, Clone)]
pub struct Lifecycle {
    name: &'static str,
    state: LifecycleState,
    iteration: usize,
    max_iterations: usize,
    next_report: usize,
    cancel: Option<Arc<AtomicBool>>,
    cancelled: bool,
}

impl Lifecycle {
    /// Progress is reported every this many percent of the budget.
    pub const REPORT_STEP: usize = 10;

    pub fn new(name: &'static str, max_iterations: usize) -> Self {
        Self {
            name,
            state: LifecycleState::Uninitialized,
            iteration: 0,
            max_iterations,
            next_report: Self::REPORT_STEP,
            cancel: None,
            cancelled: false,
        }
    }

    /// Installs an external cancellation flag, checked at the top of every step.
    pub fn set_cancel(&mut self, flag: Arc<AtomicBool>) {
        self.cancel = Some(flag);
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn iteration(&self) -> usize {
        self.iteration
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Fails unless the algorithm is still uninitialized.
    pub fn check_uninitialized(&self) -> Result<(), OptimError> {
        match self.state {
            LifecycleState::Uninitialized => Ok(()),
            _ => Err(OptimError::AlreadyInitialized),
        }
    }

    /// Marks initialization complete. A zero budget terminates at once.
    pub fn mark_initialized(&mut self) {
        self.iteration = 0;
        self.next_report = Self::REPORT_STEP;
        self.state = if self.max_iterations == 0 {
            LifecycleState::Terminated
        } else {
            LifecycleState::Initialized
        };
    }

    /// Opens a step.
    ///
    /// Returns `Ok(false)` when the cancellation flag is set; the state
    /// is then `Terminated` and the caller must not advance the search.
    pub fn begin_step(&mut self) -> Result<bool, OptimError> {
        match self.state {
            LifecycleState::Uninitialized => return Err(OptimError::NotInitialized),
            LifecycleState::Terminated => return Err(OptimError::Terminated),
            LifecycleState::Initialized | LifecycleState::Stepping => {}
        }

        if let Some(ref flag) = self.cancel {
            if flag.load(Ordering::Relaxed) {
                log::info!("{}: cancelled after {} iterations", self.name, self.iteration);
                self.cancelled = true;
                self.state = LifecycleState::Terminated;
                return Ok(false);
            }
        }

        self.iteration += 1;
        self.state = LifecycleState::Stepping;
        Ok(true)
    }

    /// Closes a step: returns the progress percentage if a reporting
    /// threshold was crossed, and terminates when the budget is spent.
    pub fn end_step(&mut self) -> Option<usize> {
        let percentage = self.iteration * 100 / self.max_iterations.max(1);
        let mut crossed = None;
        while percentage >= self.next_report && self.next_report <= 100 {
            crossed = Some(self.next_report);
            self.next_report += Self::REPORT_STEP;
        }

        if self.iteration >= self.max_iterations {
            self.state = LifecycleState::Terminated;
        }
        crossed
    }

    /// Terminates early (e.g. a target objective was reached).
    pub fn terminate(&mut self) {
        self.state = LifecycleState::Terminated;
    }
}
