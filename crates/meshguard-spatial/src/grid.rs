//! Uniform hash grid over points.

use hashbrown::HashMap;
use meshguard_types::Point3;

/// A uniform bucket grid for near-neighbor queries over points.
///
/// Cell size equals the query radius, so all neighbors of a point live in
/// its own cell or one of the 26 adjacent cells. This keeps duplicate
/// grouping and thin-sample clustering linear instead of O(n²).
///
/// # Example
///
/// ```
/// use meshguard_spatial::PointGrid;
/// use meshguard_types::Point3;
///
/// let points = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(0.0005, 0.0, 0.0),
///     Point3::new(5.0, 5.0, 5.0),
/// ];
/// let clusters = PointGrid::cluster(&points, 0.001);
/// assert_eq!(clusters.len(), 2);
/// ```
#[derive(Debug)]
pub struct PointGrid {
    cell_size: f64,
    cells: HashMap<(i64, i64, i64), Vec<usize>>,
}

impl PointGrid {
    /// Create a grid whose cells are `cell_size` wide.
    ///
    /// `cell_size` is clamped to a tiny positive value so a zero radius
    /// cannot produce a division by zero.
    #[must_use]
    pub fn new(cell_size: f64) -> Self {
        Self {
            cell_size: cell_size.max(f64::MIN_POSITIVE),
            cells: HashMap::new(),
        }
    }

    /// Build a grid containing every point of `points`, indexed by position.
    #[must_use]
    pub fn from_points(points: &[Point3<f64>], cell_size: f64) -> Self {
        let mut grid = Self::new(cell_size);
        for (index, p) in points.iter().enumerate() {
            grid.insert(index, p);
        }
        grid
    }

    /// Insert a caller-assigned index at a position.
    pub fn insert(&mut self, index: usize, p: &Point3<f64>) {
        self.cells.entry(self.cell_of(p)).or_default().push(index);
    }

    /// Indices whose positions lie within `radius` of `p`.
    ///
    /// `points` must be the slice the stored indices refer to. Matches are
    /// appended to `out`, including `p`'s own index if it was inserted.
    pub fn neighbors_within(
        &self,
        p: &Point3<f64>,
        radius: f64,
        points: &[Point3<f64>],
        out: &mut Vec<usize>,
    ) {
        let (cx, cy, cz) = self.cell_of(p);
        let radius_sq = radius * radius;
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let Some(bucket) = self.cells.get(&(cx + dx, cy + dy, cz + dz)) else {
                        continue;
                    };
                    for &idx in bucket {
                        if (points[idx] - p).norm_squared() <= radius_sq {
                            out.push(idx);
                        }
                    }
                }
            }
        }
    }

    /// Partition `points` into clusters of transitively radius-connected points.
    ///
    /// Every point lands in exactly one cluster; isolated points form
    /// singleton clusters. Cluster and member order is deterministic
    /// (ascending by first-discovered index).
    #[must_use]
    pub fn cluster(points: &[Point3<f64>], radius: f64) -> Vec<Vec<usize>> {
        let grid = Self::from_points(points, radius);
        let mut visited = vec![false; points.len()];
        let mut clusters = Vec::new();
        let mut stack = Vec::new();
        let mut neighbors = Vec::new();

        for start in 0..points.len() {
            if visited[start] {
                continue;
            }
            visited[start] = true;
            let mut members = vec![start];
            stack.push(start);

            while let Some(current) = stack.pop() {
                neighbors.clear();
                grid.neighbors_within(&points[current], radius, points, &mut neighbors);
                for &n in &neighbors {
                    if !visited[n] {
                        visited[n] = true;
                        members.push(n);
                        stack.push(n);
                    }
                }
            }

            members.sort_unstable();
            clusters.push(members);
        }

        clusters
    }

    #[allow(clippy::cast_possible_truncation)]
    fn cell_of(&self, p: &Point3<f64>) -> (i64, i64, i64) {
        (
            (p.x / self.cell_size).floor() as i64,
            (p.y / self.cell_size).floor() as i64,
            (p.z / self.cell_size).floor() as i64,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbors_across_cell_boundary() {
        // Two points straddling a cell boundary are still neighbors.
        let points = vec![Point3::new(0.999, 0.0, 0.0), Point3::new(1.001, 0.0, 0.0)];
        let grid = PointGrid::from_points(&points, 1.0);

        let mut out = Vec::new();
        grid.neighbors_within(&points[0], 0.01, &points, &mut out);
        out.sort_unstable();
        assert_eq!(out, vec![0, 1]);
    }

    #[test]
    fn cluster_separates_distant_points() {
        let points = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.1, 0.0, 0.0),
            Point3::new(10.0, 0.0, 0.0),
        ];
        let clusters = PointGrid::cluster(&points, 0.5);
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0], vec![0, 1]);
        assert_eq!(clusters[1], vec![2]);
    }

    #[test]
    fn cluster_is_transitive() {
        // a-b and b-c within radius, a-c not: still one cluster.
        let points = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.9, 0.0, 0.0),
            Point3::new(1.8, 0.0, 0.0),
        ];
        let clusters = PointGrid::cluster(&points, 1.0);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0], vec![0, 1, 2]);
    }

    #[test]
    fn empty_input_has_no_clusters() {
        let clusters = PointGrid::cluster(&[], 1.0);
        assert!(clusters.is_empty());
    }

    #[test]
    fn zero_radius_is_safe() {
        let points = vec![Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 0.0, 0.0)];
        let clusters = PointGrid::cluster(&points, 0.0);
        // Coincident points are within a zero radius of each other.
        assert_eq!(clusters.len(), 1);
    }
}
