//! Weighted vertex-adjacency graph of a triangle mesh.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use tracing::debug;

use crate::error::Result;
use crate::mesh::{Mesh, check_faces, check_vertices};
use crate::{F, dist};

/// Undirected graph over vertex indices `0..N`, weighted by Euclidean edge length.
///
/// Two vertices are connected iff they share a face. Vertices that appear in no
/// face are kept as isolated nodes.
#[derive(Debug, Clone)]
pub struct AdjacencyGraph {
    /// For each vertex, (neighbor, weight) in insertion order.
    adj: Vec<Vec<(usize, F)>>,
    /// Canonical `[min, max]` edge key to weight.
    weights: HashMap<[usize; 2], F>,
}

/// Canonical key for an undirected edge.
#[inline]
fn edge_key(a: usize, b: usize) -> [usize; 2] {
    if a <= b { [a, b] } else { [b, a] }
}

impl AdjacencyGraph {
    /// Build the graph from a validated mesh.
    pub fn from_mesh(mesh: &Mesh) -> Self {
        Self::build(mesh.vertices(), mesh.faces())
    }

    /// Build the graph from raw slices, checking positions and face indices first.
    pub fn from_triangles(vs: &[[F; 3]], fs: &[[usize; 3]]) -> Result<Self> {
        check_vertices(vs)?;
        check_faces(vs.len(), fs)?;
        Ok(Self::build(vs, fs))
    }

    fn build(vs: &[[F; 3]], fs: &[[usize; 3]]) -> Self {
        let mut adj: Vec<Vec<(usize, F)>> = vec![vec![]; vs.len()];
        let mut weights: HashMap<[usize; 2], F> = HashMap::with_capacity(fs.len() * 3 / 2);

        for &[a, b, c] in fs {
            for (u, v) in [(a, b), (b, c), (a, c)] {
                // repeated corner in a degenerate face
                if u == v {
                    continue;
                }
                if let Entry::Vacant(e) = weights.entry(edge_key(u, v)) {
                    let w = dist(vs[u], vs[v]);
                    e.insert(w);
                    adj[u].push((v, w));
                    adj[v].push((u, w));
                }
            }
        }

        debug!(
            vertices = vs.len(),
            faces = fs.len(),
            edges = weights.len(),
            "built adjacency graph"
        );

        Self { adj, weights }
    }

    /// Number of nodes, always equal to the mesh vertex count.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.adj.len()
    }

    /// Number of distinct undirected edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.weights.len()
    }

    /// Neighbors of `v` with their edge weights. Empty for out-of-range `v`.
    #[inline]
    pub fn neighbors(&self, v: usize) -> &[(usize, F)] {
        self.adj.get(v).map_or(&[][..], Vec::as_slice)
    }

    #[inline]
    pub fn degree(&self, v: usize) -> usize {
        self.neighbors(v).len()
    }

    /// Weight of edge (u, v), in either orientation.
    pub fn edge_weight(&self, u: usize, v: usize) -> Option<F> {
        self.weights.get(&edge_key(u, v)).copied()
    }

    /// Every undirected edge once, as `(min, max, weight)`.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, F)> + '_ {
        self.weights.iter().map(|(&[u, v], &w)| (u, v, w))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FieldError;
    use approx::assert_relative_eq;

    #[test]
    fn test_triangle_edges() {
        let vs = [[0., 0., 0.], [3., 0., 0.], [0., 4., 0.]];
        let g = AdjacencyGraph::from_triangles(&vs, &[[0, 1, 2]]).unwrap();

        assert_eq!(g.vertex_count(), 3);
        assert_eq!(g.edge_count(), 3);
        assert_relative_eq!(g.edge_weight(0, 1).unwrap(), 3.0);
        assert_relative_eq!(g.edge_weight(2, 0).unwrap(), 4.0);
        assert_relative_eq!(g.edge_weight(1, 2).unwrap(), 5.0);
    }

    #[test]
    fn test_shared_edge_deduplicated() {
        let vs = [[0., 0., 0.], [1., 0., 0.], [1., 1., 0.], [0., 1., 0.]];
        let g = AdjacencyGraph::from_triangles(&vs, &[[0, 1, 2], [0, 2, 3]]).unwrap();

        assert_eq!(g.edge_count(), 5);
        assert_eq!(g.degree(0), 3);
        assert_eq!(g.degree(1), 2);
        assert_eq!(g.edges().count(), 5);
    }

    #[test]
    fn test_isolated_vertex_kept() {
        let vs = [[0., 0., 0.], [1., 0., 0.], [0., 1., 0.], [5., 5., 5.]];
        let g = AdjacencyGraph::from_triangles(&vs, &[[0, 1, 2]]).unwrap();

        assert_eq!(g.vertex_count(), 4);
        assert!(g.neighbors(3).is_empty());
        assert!(g.neighbors(42).is_empty());
    }

    #[test]
    fn test_degenerate_face_skips_self_loop() {
        let vs = [[0., 0., 0.], [1., 0., 0.]];
        let g = AdjacencyGraph::from_triangles(&vs, &[[0, 0, 1]]).unwrap();

        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.edge_weight(0, 0), None);
    }

    #[test]
    fn test_nan_position_rejected() {
        let vs = [[0., 0., 0.], [1., 0., 0.], [F::NAN, 0., 0.]];
        let err = AdjacencyGraph::from_triangles(&vs, &[[0, 1, 2]]).unwrap_err();
        assert!(matches!(err, FieldError::NonFiniteVertex { vertex: 2, .. }));
    }

    #[test]
    fn test_huge_coordinates_stay_finite() {
        let vs = [[0., 0., 0.], [1e200, 0., 0.], [0., 1e200, 0.]];
        let g = AdjacencyGraph::from_triangles(&vs, &[[0, 1, 2]]).unwrap();

        assert_relative_eq!(g.edge_weight(0, 1).unwrap(), 1e200);
        assert_relative_eq!(
            g.edge_weight(1, 2).unwrap(),
            2.0_f64.sqrt() * 1e200,
            max_relative = 1e-12
        );
        assert!(g.edges().all(|(_, _, w)| w.is_finite() && w >= 0.));
    }

    #[test]
    fn test_out_of_bounds_face() {
        let vs = [[0., 0., 0.], [1., 0., 0.], [0., 1., 0.]];
        let err = AdjacencyGraph::from_triangles(&vs, &[[0, 1, 3]]).unwrap_err();
        assert!(matches!(err, FieldError::InvalidMesh { face: 0, vertex: 3, .. }));
    }
}
