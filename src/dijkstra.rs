//! Single-source shortest paths over an [`AdjacencyGraph`].

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::debug;

use crate::F;
use crate::error::{FieldError, Result};
use crate::graph::AdjacencyGraph;

/// Shortest-path distances from one source vertex to every vertex of a graph.
///
/// Vertices with no path from the source have no distance; [`DistanceMap::distance`]
/// returns `None` for them.
#[derive(Debug, Clone)]
pub struct DistanceMap {
    source: usize,
    /// `F::INFINITY` marks an unreachable vertex.
    dists: Vec<F>,
    /// Previous vertex on a shortest path, `None` for the source and unreachable vertices.
    preds: Vec<Option<usize>>,
}

impl DistanceMap {
    #[inline]
    pub fn source(&self) -> usize {
        self.source
    }

    /// Number of vertices covered, reachable or not.
    #[inline]
    pub fn len(&self) -> usize {
        self.dists.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dists.is_empty()
    }

    /// Distance from the source to `v`, or `None` if there is no path
    /// (or `v` is not a vertex of the graph).
    #[inline]
    pub fn distance(&self, v: usize) -> Option<F> {
        self.dists.get(v).copied().filter(|d| d.is_finite())
    }

    #[inline]
    pub fn is_reachable(&self, v: usize) -> bool {
        self.distance(v).is_some()
    }

    pub fn reachable_count(&self) -> usize {
        self.dists.iter().filter(|d| d.is_finite()).count()
    }

    /// Unreachable vertex indices in ascending order.
    pub fn unreachable(&self) -> impl Iterator<Item = usize> + '_ {
        self.dists
            .iter()
            .enumerate()
            .filter(|(_, d)| !d.is_finite())
            .map(|(i, _)| i)
    }

    /// All vertices in index order with their optional distance.
    pub fn iter(&self) -> impl Iterator<Item = (usize, Option<F>)> + '_ {
        (0..self.dists.len()).map(|i| (i, self.distance(i)))
    }

    /// Reachable vertex with the greatest distance. Lowest index wins ties.
    pub fn farthest(&self) -> Option<(usize, F)> {
        self.iter()
            .filter_map(|(i, d)| d.map(|d| (i, d)))
            .fold(None, |best, (i, d)| match best {
                Some((_, bd)) if bd >= d => best,
                _ => Some((i, d)),
            })
    }

    /// Vertices along a shortest path from the source to `target`, inclusive.
    ///
    /// Returns `None` if `target` is unreachable.
    pub fn path_to(&self, target: usize) -> Option<Vec<usize>> {
        self.distance(target)?;

        let mut path = vec![target];
        let mut curr = target;
        while let Some(prev) = self.preds[curr] {
            path.push(prev);
            curr = prev;
        }
        path.reverse();
        Some(path)
    }
}

/// Priority queue entry, ordered so the smallest distance pops first.
#[derive(Debug, Clone, Copy)]
struct State {
    vertex: usize,
    dist: F,
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for State {}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // reversed: BinaryHeap is a max-heap
        other.dist.total_cmp(&self.dist)
    }
}

/// Dijkstra's algorithm from `source` over non-negative edge weights.
///
/// Among equal-length paths the first one found is kept; relaxation only
/// replaces a distance on strict improvement.
pub fn shortest_paths(graph: &AdjacencyGraph, source: usize) -> Result<DistanceMap> {
    let n = graph.vertex_count();
    if source >= n {
        return Err(FieldError::InvalidSource {
            index: source,
            vertex_count: n,
        });
    }

    let start = std::time::Instant::now();

    let mut dists = vec![F::INFINITY; n];
    let mut preds: Vec<Option<usize>> = vec![None; n];
    let mut heap = BinaryHeap::with_capacity(n);

    dists[source] = 0.;
    heap.push(State {
        vertex: source,
        dist: 0.,
    });

    let mut pops = 0usize;
    while let Some(State { vertex, dist }) = heap.pop() {
        // stale entry
        if dist > dists[vertex] {
            continue;
        }
        pops += 1;

        for &(nbr, w) in graph.neighbors(vertex) {
            let nd = dist + w;
            if nd < dists[nbr] {
                dists[nbr] = nd;
                preds[nbr] = Some(vertex);
                heap.push(State {
                    vertex: nbr,
                    dist: nd,
                });
            }
        }
    }

    let map = DistanceMap {
        source,
        dists,
        preds,
    };
    debug!(
        source,
        settled = pops,
        reachable = map.reachable_count(),
        elapsed = ?start.elapsed(),
        "computed shortest paths"
    );
    Ok(map)
}
