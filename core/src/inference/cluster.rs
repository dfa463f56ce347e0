//! Coincidence clustering.
//!
//! Groups points into equivalence classes under the transitive closure of
//! axis-wise coincidence. The pairwise relation is O(n²), which is fine for
//! the point count of a hand-drawn sketch.

use super::tolerance::Tolerance;
use super::types::{EquivalenceClass, Point};

/// Connected components of the coincidence graph, as indices into `points`.
///
/// Every index appears in exactly one component. Components are ordered by
/// their first member, and members are sorted by input order.
pub fn partition(points: &[Point], tolerance: &Tolerance) -> Vec<Vec<usize>> {
    let n = points.len();

    // Adjacency lists, built from each unordered pair exactly once
    let mut neighbours: Vec<Vec<usize>> = vec![Vec::new(); n];
    for i in 0..n {
        for j in (i + 1)..n {
            if tolerance.are_coincident(points[i].position, points[j].position) {
                neighbours[i].push(j);
                neighbours[j].push(i);
            }
        }
    }

    let mut visited = vec![false; n];
    let mut components = Vec::new();
    let mut stack = Vec::new();

    for seed in 0..n {
        if visited[seed] {
            continue;
        }
        visited[seed] = true;
        stack.push(seed);

        let mut component = Vec::new();
        while let Some(current) = stack.pop() {
            component.push(current);
            for &next in &neighbours[current] {
                if !visited[next] {
                    visited[next] = true;
                    stack.push(next);
                }
            }
        }

        component.sort_unstable();
        components.push(component);
    }

    components
}

/// Equivalence classes of size ≥ 2, in discovery order.
/// Singletons need no constraint and are dropped.
pub fn cluster(points: &[Point], tolerance: &Tolerance) -> Vec<EquivalenceClass> {
    partition(points, tolerance)
        .into_iter()
        .filter(|component| component.len() >= 2)
        .map(|component| EquivalenceClass {
            points: component.into_iter().map(|i| points[i].reference).collect(),
        })
        .collect()
}
