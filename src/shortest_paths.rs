//! Shortest Paths
//!
//! Dijkstra's algorithm on a `petgraph` graph, the canonical decrease-key client:
//! every relaxation that finds a shorter distance calls
//! [`MinPQ::add_or_change_priority`] on an [`IndexedMinHeap`] of vertices.
//!

use crate::indexed_heap::IndexedMinHeap;
use crate::min_pq::*;
use crate::petgraph::graph::{Graph, NodeIndex};
use crate::petgraph::visit::EdgeRef;
use crate::petgraph::EdgeType;
use crate::util::*;

#[derive(Debug, Clone)]
pub struct ShortestPaths {
    pub source: NodeIndex,
    /// indexed by `NodeIndex::index()`, infinite when unreachable
    pub dist_to: Vec<Priority>,
    /// the vertex preceding each vertex on its shortest path
    pub edge_to: Vec<Option<NodeIndex>>,
}

impl ShortestPaths {
    pub fn distance(&self, goal: NodeIndex) -> Priority {
        self.dist_to.get(goal.index()).copied().unwrap_or(Priority::INFINITY)
    }

    pub fn is_reachable(&self, goal: NodeIndex) -> bool {
        self.distance(goal) < Priority::INFINITY
    }

    /// vertices from the source to `goal` inclusive, empty if `goal` is unreachable
    pub fn path(&self, goal: NodeIndex) -> Vec<NodeIndex> {
        if !self.is_reachable(goal) {
            return vec![];
        }
        let mut path = vec![goal];
        let mut current = goal;
        while let Some(previous) = self.edge_to[current.index()] {
            path.push(previous);
            current = previous;
        }
        path.reverse();
        path
    }
}

/// single-source shortest paths; edge weights must be non-negative and not NaN
pub fn dijkstra<N, Ty: EdgeType>(graph: &Graph<N, f64, Ty>, source: NodeIndex) -> Result<ShortestPaths, String> {
    if source.index() >= graph.node_count() {
        return Err(format!("source vertex {} is not in the graph", source.index()));
    }
    if let Some(edge) = graph.edge_references().find(|edge| !(*edge.weight() >= 0.)) {
        return Err(format!(
            "edge {} -> {} has weight {}, dijkstra requires non-negative weights",
            edge.source().index(),
            edge.target().index(),
            edge.weight()
        ));
    }
    let mut dist_to = vec![Priority::INFINITY; graph.node_count()];
    let mut edge_to = vec![None; graph.node_count()];
    let mut settled = vec![false; graph.node_count()];
    dist_to[source.index()] = 0.;
    let mut heap = IndexedMinHeap::new();
    heap.add(source, 0.).map_err(|error| error.to_string())?;
    while let Ok(node) = heap.remove_min() {
        settled[node.index()] = true;
        for edge in graph.edges(node) {
            // undirected graphs report incident edges in their stored direction
            let next = if edge.source() == node { edge.target() } else { edge.source() };
            if settled[next.index()] {
                continue;
            }
            let distance = dist_to[node.index()] + edge.weight();
            if distance < dist_to[next.index()] {
                dist_to[next.index()] = distance;
                edge_to[next.index()] = Some(node);
                heap.add_or_change_priority(next, distance).map_err(|error| error.to_string())?;
            }
        }
    }
    debug_assert!(heap.is_empty());
    Ok(ShortestPaths { source, dist_to, edge_to })
}
