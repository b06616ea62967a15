//! OMOPSO configuration.

use crate::operators::DEFAULT_PERTURBATION;

/// Configuration for OMOPSO.
///
/// # Examples
///
/// ```
/// use u_moopt::omopso::OmopsoConfig;
///
/// let config = OmopsoConfig::default()
///     .with_swarm_size(50)
///     .with_max_iterations(100)
///     .with_dynamic_velocity(true)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OmopsoConfig {
    /// Number of particles. Also the leader archive capacity.
    pub swarm_size: usize,

    /// Number of steps `execute` runs.
    pub max_iterations: usize,

    /// Clamp velocities to half the variable range.
    pub dynamic_velocity: bool,

    /// Per-variable mutation probability. `None` means `1 / n`.
    pub mutation_probability: Option<f64>,

    /// Perturbation index shared by the uniform and non-uniform mutations.
    pub perturbation: f64,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for OmopsoConfig {
    fn default() -> Self {
        Self {
            swarm_size: 100,
            max_iterations: 250,
            dynamic_velocity: false,
            mutation_probability: None,
            perturbation: DEFAULT_PERTURBATION,
            seed: None,
        }
    }
}

impl OmopsoConfig {
    pub fn with_swarm_size(mut self, n: usize) -> Self {
        self.swarm_size = n;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_dynamic_velocity(mut self, enabled: bool) -> Self {
        self.dynamic_velocity = enabled;
        self
    }

    pub fn with_mutation_probability(mut self, p: f64) -> Self {
        self.mutation_probability = Some(p);
        self
    }

    pub fn with_perturbation(mut self, perturbation: f64) -> Self {
        self.perturbation = perturbation;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.swarm_size == 0 {
            return Err("swarm_size must be at least 1".into());
        }
        if let Some(p) = self.mutation_probability {
            if !(0.0..=1.0).contains(&p) {
                return Err(format!("mutation_probability must be in [0, 1], got {p}"));
            }
        }
        if !self.perturbation.is_finite() || self.perturbation < 0.0 {
            return Err(format!(
                "perturbation must be finite and non-negative, got {}",
                self.perturbation
            ));
        }
        Ok(())
    }
}
