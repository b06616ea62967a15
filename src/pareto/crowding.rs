//! Crowding distance assignment for diversity preservation.

use crate::problem::Solution;

/// Computes the crowding distance of every solution.
///
/// Measures how isolated each solution is in objective space: larger
/// distance means a sparser neighbourhood. Boundary solutions (min/max for
/// any objective) receive `f64::INFINITY`.
///
/// # Algorithm (Deb et al., 2002)
///
/// For each objective:
/// 1. Sort solutions by objective value
/// 2. Assign infinity to boundary solutions
/// 3. For interior solutions, add `(next - prev) / (max - min)`
///
/// An objective with zero spread (`max == min`) contributes nothing to
/// interior points, so the result is never NaN.
///
/// # Complexity
///
/// O(m * n * log n) where m = number of objectives, n = number of solutions
///
/// # Example
///
/// ```
/// use u_moopt::pareto::crowding_distance;
///
/// let objectives = vec![
///     vec![1.0, 5.0],
///     vec![3.0, 3.0],
///     vec![5.0, 1.0],
/// ];
///
/// let distances = crowding_distance(&objectives);
///
/// assert!(distances[0].is_infinite());
/// assert!(distances[2].is_infinite());
/// assert!((distances[1] - 2.0).abs() < 1e-12);
/// ```
pub fn crowding_distance(objectives: &[Vec<f64>]) -> Vec<f64> {
    let n = objectives.len();
    if n <= 2 {
        return vec![f64::INFINITY; n];
    }

    let m = objectives[0].len();
    let mut distances = vec![0.0f64; n];

    #[allow(clippy::needless_range_loop)] // obj_idx is a column index into 2D data
    for obj_idx in 0..m {
        let mut indices: Vec<usize> = (0..n).collect();
        indices.sort_by(|&a, &b| objectives[a][obj_idx].total_cmp(&objectives[b][obj_idx]));

        distances[indices[0]] = f64::INFINITY;
        distances[indices[n - 1]] = f64::INFINITY;

        let min_val = objectives[indices[0]][obj_idx];
        let max_val = objectives[indices[n - 1]][obj_idx];
        let range = max_val - min_val;

        if range > 0.0 {
            for i in 1..(n - 1) {
                let prev = objectives[indices[i - 1]][obj_idx];
                let next = objectives[indices[i + 1]][obj_idx];
                distances[indices[i]] += (next - prev) / range;
            }
        }
    }

    distances
}

/// Computes crowding distances over `solutions` and stores them in
/// [`Scratch::crowding_distance`](crate::problem::Scratch::crowding_distance).
///
/// Always recomputes from scratch: distances depend on the whole set.
pub fn assign_crowding_distance<T>(solutions: &mut [Solution<T>]) {
    let objectives: Vec<Vec<f64>> = solutions.iter().map(|s| s.objectives.clone()).collect();
    let distances = crowding_distance(&objectives);
    for (solution, distance) in solutions.iter_mut().zip(distances) {
        solution.scratch.crowding_distance = Some(distance);
    }
}
