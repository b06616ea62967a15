//! SA configuration.

/// Configuration for self-adapting Simulated Annealing.
///
/// There is no temperature schedule to tune: the temperature is derived
/// from the cost improvement observed so far, scaled by `k`.
///
/// # Examples
///
/// ```
/// use u_moopt::sa::SaConfig;
///
/// let config = SaConfig::default()
///     .with_max_iterations(50_000)
///     .with_k(0.5)
///     .with_target_objective(1e-6)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaConfig {
    /// Number of neighbour evaluations `execute` runs at most.
    pub max_iterations: usize,

    /// Weight of the temperature. Higher values accept more uphill moves.
    pub k: f64,

    /// Stop as soon as the best objective is `<=` this value.
    pub target_objective: f64,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            max_iterations: 10_000,
            k: 1.0,
            target_objective: f64::NEG_INFINITY,
            seed: None,
        }
    }
}

impl SaConfig {
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_k(mut self, k: f64) -> Self {
        self.k = k;
        self
    }

    pub fn with_target_objective(mut self, target: f64) -> Self {
        self.target_objective = target;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !self.k.is_finite() || self.k < 0.0 {
            return Err(format!("k must be finite and non-negative, got {}", self.k));
        }
        if self.target_objective.is_nan() {
            return Err("target_objective must not be NaN".into());
        }
        Ok(())
    }
}
