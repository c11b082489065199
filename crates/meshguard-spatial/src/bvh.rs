//! Bounding-volume hierarchy over triangles.

use meshguard_types::{Aabb, Point3, Triangle, Vector3};

use crate::raycast::{direction_inverse, ray_aabb, ray_triangle, RayHit};

/// A binary BVH over a triangle list.
///
/// Built once per validation run and shared read-only by the
/// self-intersection and wall-thickness analyzers. Nodes split at the
/// median centroid along the longest axis of the current set, giving
/// O(n log n) construction and O(log n) average queries.
///
/// # Example
///
/// ```
/// use meshguard_types::unit_cube;
/// use meshguard_spatial::Bvh;
///
/// let cube = unit_cube();
/// let triangles: Vec<_> = cube.triangles().collect();
/// let bvh = Bvh::build(&triangles, 1e-9).unwrap();
///
/// let mut candidates = Vec::new();
/// bvh.overlap_candidates(&triangles[0].bounds(), &mut candidates);
/// assert!(candidates.contains(&0));
/// ```
#[derive(Debug)]
pub struct Bvh {
    root: Node,
}

#[derive(Debug)]
enum Node {
    Leaf {
        aabb: Aabb,
        triangle: usize,
    },
    Internal {
        aabb: Aabb,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    const fn aabb(&self) -> &Aabb {
        match self {
            Self::Leaf { aabb, .. } | Self::Internal { aabb, .. } => aabb,
        }
    }
}

impl Bvh {
    /// Build a BVH over `triangles`, inflating every box by `margin`.
    ///
    /// Returns `None` for an empty triangle list.
    #[must_use]
    pub fn build(triangles: &[Triangle], margin: f64) -> Option<Self> {
        if triangles.is_empty() {
            return None;
        }
        let mut indices: Vec<usize> = (0..triangles.len()).collect();
        let root = build_node(triangles, &mut indices, margin);
        Some(Self { root })
    }

    /// Collect indices of triangles whose (inflated) bounds overlap `target`.
    ///
    /// Results are appended to `out`; the caller clears between queries to
    /// reuse the allocation.
    pub fn overlap_candidates(&self, target: &Aabb, out: &mut Vec<usize>) {
        collect_overlaps(&self.root, target, out);
    }

    /// Nearest hit of a ray against the indexed triangles.
    ///
    /// `skip` suppresses individual triangles (e.g. the face a thickness
    /// sample originated from). Children are visited front to back so the
    /// far subtree is pruned by the best hit found so far.
    #[must_use]
    pub fn cast_ray<F>(
        &self,
        origin: &Point3<f64>,
        direction: &Vector3<f64>,
        triangles: &[Triangle],
        max_distance: f64,
        epsilon: f64,
        skip: &F,
    ) -> Option<RayHit>
    where
        F: Fn(usize) -> bool,
    {
        let dir_inv = direction_inverse(direction, epsilon);
        cast_node(
            &self.root,
            origin,
            direction,
            &dir_inv,
            triangles,
            max_distance,
            epsilon,
            skip,
        )
    }
}

fn triangle_aabb(tri: &Triangle, margin: f64) -> Aabb {
    tri.bounds().inflate(margin)
}

fn build_node(triangles: &[Triangle], indices: &mut [usize], margin: f64) -> Node {
    if indices.len() == 1 {
        let triangle = indices[0];
        return Node::Leaf {
            aabb: triangle_aabb(&triangles[triangle], margin),
            triangle,
        };
    }

    let mut aabb = Aabb::empty();
    for &idx in indices.iter() {
        aabb = aabb.union(&triangle_aabb(&triangles[idx], margin));
    }

    let axis = aabb.longest_axis();
    indices.sort_by(|&a, &b| {
        let ca = triangles[a].centroid();
        let cb = triangles[b].centroid();
        let (va, vb) = match axis {
            0 => (ca.x, cb.x),
            1 => (ca.y, cb.y),
            _ => (ca.z, cb.z),
        };
        va.partial_cmp(&vb).unwrap_or(std::cmp::Ordering::Equal)
    });

    let mid = indices.len() / 2;
    let (left_indices, right_indices) = indices.split_at_mut(mid);
    let left = build_node(triangles, left_indices, margin);
    let right = build_node(triangles, right_indices, margin);

    Node::Internal {
        aabb,
        left: Box::new(left),
        right: Box::new(right),
    }
}

fn collect_overlaps(node: &Node, target: &Aabb, out: &mut Vec<usize>) {
    if !node.aabb().overlaps(target) {
        return;
    }
    match node {
        Node::Leaf { triangle, .. } => out.push(*triangle),
        Node::Internal { left, right, .. } => {
            collect_overlaps(left, target, out);
            collect_overlaps(right, target, out);
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn cast_node<F>(
    node: &Node,
    origin: &Point3<f64>,
    direction: &Vector3<f64>,
    dir_inv: &Vector3<f64>,
    triangles: &[Triangle],
    max_distance: f64,
    epsilon: f64,
    skip: &F,
) -> Option<RayHit>
where
    F: Fn(usize) -> bool,
{
    let (t_near, _) = ray_aabb(node.aabb(), origin, dir_inv)?;
    if t_near > max_distance {
        return None;
    }

    match node {
        Node::Leaf { triangle, .. } => {
            if skip(*triangle) {
                return None;
            }
            ray_triangle(origin, direction, &triangles[*triangle], epsilon)
                .filter(|&t| t <= max_distance)
                .map(|t| RayHit {
                    distance: t,
                    triangle: *triangle,
                })
        }
        Node::Internal { left, right, .. } => {
            let hit_left = cast_node(
                left,
                origin,
                direction,
                dir_inv,
                triangles,
                max_distance,
                epsilon,
                skip,
            );
            let limit = hit_left.map_or(max_distance, |h| h.distance);
            let hit_right = cast_node(
                right, origin, direction, dir_inv, triangles, limit, epsilon, skip,
            );

            match (hit_left, hit_right) {
                (Some(l), Some(r)) => Some(if l.distance <= r.distance { l } else { r }),
                (Some(h), None) | (None, Some(h)) => Some(h),
                (None, None) => None,
            }
        }
    }
}
