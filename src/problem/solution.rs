//! Solutions and populations.

use super::variable::Variable;
use crate::pareto::{dominance_cmp, Dominance};
use std::ops::{Deref, DerefMut};

/// Algorithm-local annotations attached to a solution.
///
/// Operators write these freely; they are not part of a solution's
/// identity and are overwritten every time they are recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scratch {
    /// Pareto front index (0 = non-dominated).
    pub rank: Option<usize>,

    /// Crowding distance within the last set it was computed over.
    pub crowding_distance: Option<f64>,
}

/// A candidate solution: decision variables plus objective values.
///
/// All objectives are minimized. Objectives are `0.0` until the owning
/// problem evaluates the solution.
///
/// `Clone` is a deep copy, so a particle, its personal best and an
/// archive leader never share variable storage.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution<T> {
    pub variables: Vec<Variable<T>>,
    pub objectives: Vec<f64>,
    pub scratch: Scratch,
}

impl<T> Solution<T> {
    /// Creates a solution with no variables and `n_objectives` zeroed objectives.
    pub fn new(n_objectives: usize) -> Self {
        Self {
            variables: Vec::new(),
            objectives: vec![0.0; n_objectives],
            scratch: Scratch::default(),
        }
    }

    /// Creates a solution from raw variable values.
    pub fn from_values<I>(values: I, n_objectives: usize) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Self {
            variables: values.into_iter().map(Variable::new).collect(),
            objectives: vec![0.0; n_objectives],
            scratch: Scratch::default(),
        }
    }

    pub fn number_of_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn number_of_objectives(&self) -> usize {
        self.objectives.len()
    }

    pub fn variable(&self, index: usize) -> &Variable<T> {
        &self.variables[index]
    }

    pub fn variable_mut(&mut self, index: usize) -> &mut Variable<T> {
        &mut self.variables[index]
    }

    pub fn objective(&self, index: usize) -> f64 {
        self.objectives[index]
    }

    pub fn set_objective(&mut self, index: usize, value: f64) {
        self.objectives[index] = value;
    }

    /// Crowding distance, or `0.0` if it has never been assigned.
    pub fn crowding_distance(&self) -> f64 {
        self.scratch.crowding_distance.unwrap_or(0.0)
    }
}

impl<T: Copy> Solution<T> {
    /// Copies the variable values out.
    pub fn values(&self) -> Vec<T> {
        self.variables.iter().map(Variable::get).collect()
    }
}

/// An insertion-ordered population of solutions.
///
/// Order carries no meaning unless an operator sorts the population
/// explicitly (e.g. by crowding distance before truncation).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solutions<T>(Vec<Solution<T>>);

impl<T> Default for Solutions<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T> Solutions<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    pub fn into_inner(self) -> Vec<Solution<T>> {
        self.0
    }

    /// Objective vectors in population order.
    pub fn objective_matrix(&self) -> Vec<Vec<f64>> {
        self.0.iter().map(|s| s.objectives.clone()).collect()
    }

    /// Removes every member dominated by at least one other member.
    ///
    /// Survivors keep their relative order. Members with identical
    /// objective vectors do not dominate each other, so duplicates are
    /// all kept.
    pub fn reduce_to_non_dominated(&mut self) {
        let n = self.0.len();
        if n < 2 {
            return;
        }

        let mut dominated = vec![false; n];
        for i in 0..n {
            for j in (i + 1)..n {
                match dominance_cmp(&self.0[i].objectives, &self.0[j].objectives) {
                    Dominance::Left => dominated[j] = true,
                    Dominance::Right => dominated[i] = true,
                    Dominance::Neither => {}
                }
            }
        }

        let mut flags = dominated.into_iter();
        self.0.retain(|_| !flags.next().unwrap_or(false));
    }
}

impl<T> Deref for Solutions<T> {
    type Target = Vec<Solution<T>>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> DerefMut for Solutions<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<T> From<Vec<Solution<T>>> for Solutions<T> {
    fn from(solutions: Vec<Solution<T>>) -> Self {
        Self(solutions)
    }
}

impl<T> FromIterator<Solution<T>> for Solutions<T> {
    fn from_iter<I: IntoIterator<Item = Solution<T>>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<T> IntoIterator for Solutions<T> {
    type Item = Solution<T>;
    type IntoIter = std::vec::IntoIter<Solution<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Solutions<T> {
    type Item = &'a Solution<T>;
    type IntoIter = std::slice::Iter<'a, Solution<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Solutions<T> {
    type Item = &'a mut Solution<T>;
    type IntoIter = std::slice::IterMut<'a, Solution<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter_mut()
    }
}
