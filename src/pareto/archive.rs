//! Bounded Pareto archive of leaders.

use super::crowding::assign_crowding_distance;
use crate::problem::{Solution, Solutions};

/// A bounded store of mutually non-dominated solutions.
///
/// Insertion is unconditional and may leave dominated members behind;
/// [`reduce`](Self::reduce) restores the invariants:
///
/// - every member is non-dominated by every other member
/// - `len() <= capacity()`
///
/// When the front alone exceeds the capacity, members in the most
/// crowded regions are dropped first, which keeps extreme points.
///
/// # Example
///
/// ```
/// use u_moopt::pareto::LeaderArchive;
/// use u_moopt::problem::Solution;
///
/// let mut archive: LeaderArchive<f64> = LeaderArchive::new(2);
/// for objs in [[0.0, 3.0], [1.0, 2.0], [2.0, 2.5], [3.0, 0.0]] {
///     let mut s = Solution::new(2);
///     s.objectives = objs.to_vec();
///     archive.insert(&s);
/// }
///
/// archive.reduce();
///
/// assert_eq!(archive.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct LeaderArchive<T> {
    members: Solutions<T>,
    capacity: usize,
}

impl<T: Clone> LeaderArchive<T> {
    /// Creates an empty archive holding at most `capacity` leaders after
    /// every [`reduce`](Self::reduce).
    pub fn new(capacity: usize) -> Self {
        Self {
            members: Solutions::with_capacity(capacity * 2),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Solution<T>> {
        self.members.get(index)
    }

    /// Current members, in archive order.
    pub fn members(&self) -> &Solutions<T> {
        &self.members
    }

    /// Mutable access to the members, e.g. to refresh scratch annotations.
    pub fn members_mut(&mut self) -> &mut Solutions<T> {
        &mut self.members
    }

    /// Appends a deep copy of `solution`.
    pub fn insert(&mut self, solution: &Solution<T>) {
        self.members.push(solution.clone());
    }

    /// Appends deep copies of every solution yielded by `solutions`.
    pub fn insert_all<'a, I>(&mut self, solutions: I)
    where
        I: IntoIterator<Item = &'a Solution<T>>,
        T: 'a,
    {
        for solution in solutions {
            self.insert(solution);
        }
    }

    /// Recomputes crowding distance over the current members.
    pub fn assign_crowding_distance(&mut self) {
        assign_crowding_distance(&mut self.members);
    }

    /// Reduces to the non-dominated front, then truncates by crowding.
    pub fn reduce(&mut self) {
        self.members.reduce_to_non_dominated();
        self.truncate_by_crowding();
    }

    /// Drops the most crowded members until the capacity is met.
    ///
    /// Crowding distance is computed once for the whole pass; distances of
    /// the remaining neighbours are not refreshed between removals.
    /// At or under capacity this is a no-op.
    pub fn truncate_by_crowding(&mut self) {
        if self.members.len() <= self.capacity {
            return;
        }

        self.assign_crowding_distance();
        self.members
            .sort_by(|a, b| a.crowding_distance().total_cmp(&b.crowding_distance()));

        let excess = self.members.len() - self.capacity;
        self.members.drain(..excess);
        log::debug!(
            "leader archive pruned {excess} crowded members (capacity {})",
            self.capacity
        );
    }

    /// Consumes the archive, returning its members.
    pub fn into_solutions(self) -> Solutions<T> {
        self.members
    }
}
