//! Shortest-path algorithms
//!
//! All algorithms measure paths in hops. Nodes are always scanned in id
//! order and ties keep the candidate found according to that order, so the
//! same graph always yields the same paths.

use crate::graph::{Graph, Node, Path};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, trace};

/// Shortest paths from one source, keyed by destination
pub type PathMap = BTreeMap<Node, Path>;

/// Shortest paths between every pair of nodes, keyed by source then destination
pub type AllPairsPaths = BTreeMap<Node, PathMap>;

/// Shortest paths from `src` to every reachable node, using Dijkstra
///
/// Returns an empty map if `src` is not part of the graph.
pub fn dijkstra(graph: &Graph, src: &Node) -> PathMap {
    debug!(source = %src, nodes = graph.node_count(), "dijkstra");

    let mut paths = PathMap::new();
    let Some(src) = graph.node(src.id()) else {
        return paths;
    };
    paths.insert(src.clone(), Path::new(src.clone()));

    let mut visited: BTreeSet<&Node> = BTreeSet::new();
    let mut current = Some(src);

    while let Some(u) = current {
        visited.insert(u);

        for edge in graph.edges_from(u) {
            let v = edge.dst();
            if visited.contains(v) {
                continue;
            }
            let Some(path_u) = paths.get(u) else {
                break;
            };
            let no_worse = paths
                .get(v)
                .map_or(true, |path_v| path_v.len() >= path_u.len() + 1);
            if no_worse {
                let path_v = path_u.extended(edge);
                paths.insert(v.clone(), path_v);
            }
        }

        let mut nearest: Option<(&Node, usize)> = None;
        for v in graph.nodes() {
            if visited.contains(v) {
                continue;
            }
            if let Some(path_v) = paths.get(v) {
                if nearest.map_or(true, |(_, dist)| path_v.len() < dist) {
                    nearest = Some((v, path_v.len()));
                }
            }
        }
        trace!(node = %u, nearest = ?nearest.map(|(n, _)| n.id()), "dijkstra step");
        current = nearest.map(|(node, _)| node);
    }

    paths
}

/// Dijkstra over an adjacency matrix
///
/// Returns the predecessor of every node on its shortest path from `source`:
/// `source` is its own predecessor and unreachable nodes have none. Use
/// [`SimpleGraph::paths`](crate::routing::SimpleGraph::paths) to turn the
/// result into paths.
///
/// # Panics
///
/// Panics if `source` is not a valid index of `adjacent`.
pub fn dijkstra_dense(adjacent: &[Vec<bool>], source: usize) -> Vec<Option<usize>> {
    let n = adjacent.len();
    assert!(source < n, "source index {} out of range ({} nodes)", source, n);
    debug!(source, nodes = n, "dijkstra over adjacency matrix");

    let mut dist: Vec<Option<usize>> = vec![None; n];
    let mut pred: Vec<Option<usize>> = vec![None; n];
    let mut visited = vec![false; n];
    dist[source] = Some(0);
    pred[source] = Some(source);

    let mut current = Some(source);
    while let Some(u) = current {
        visited[u] = true;
        let Some(dist_u) = dist[u] else {
            break;
        };

        let mut nearest: Option<(usize, usize)> = None;
        for v in 0..n {
            if visited[v] {
                continue;
            }
            if adjacent[u].get(v).copied().unwrap_or(false)
                && dist[v].map_or(true, |dist_v| dist_v > dist_u)
            {
                dist[v] = Some(dist_u + 1);
                pred[v] = Some(u);
            }
            if let Some(dist_v) = dist[v] {
                if nearest.map_or(true, |(_, min)| dist_v < min) {
                    nearest = Some((v, dist_v));
                }
            }
        }
        current = nearest.map(|(v, _)| v);
    }

    pred
}

/// Shortest paths between all pairs of nodes, using Floyd-Warshall
pub fn floyd_warshall(graph: &Graph) -> AllPairsPaths {
    debug!(nodes = graph.node_count(), "floyd-warshall");

    let mut table = initial_paths(graph);
    let nodes: Vec<&Node> = graph.nodes().collect();

    for &k in &nodes {
        for &i in &nodes {
            let Some(sp_ik) = table.get(i).and_then(|sp_i| sp_i.get(k)).cloned() else {
                continue;
            };
            for &j in &nodes {
                let candidate = {
                    let Some(sp_kj) = table.get(k).and_then(|sp_k| sp_k.get(j)) else {
                        continue;
                    };
                    let shorter = table
                        .get(i)
                        .and_then(|sp_i| sp_i.get(j))
                        .map_or(true, |sp_ij| sp_ij.len() > sp_ik.len() + sp_kj.len());
                    if !shorter {
                        continue;
                    }
                    sp_ik.joined(sp_kj)
                };
                table
                    .entry(i.clone())
                    .or_default()
                    .insert(j.clone(), candidate);
            }
        }
    }

    table
}

/// Shortest paths between all pairs of nodes, using Bellman-Ford
///
/// Runs as rounds of distance-vector exchange: in each round every node
/// looks at the tables of the neighbours that changed in the previous round
/// and adopts any path through them that is new or strictly shorter. Stops
/// after a round in which nothing changed.
pub fn bellman_ford(graph: &Graph) -> AllPairsPaths {
    debug!(nodes = graph.node_count(), "bellman-ford");

    let mut table = initial_paths(graph);
    let nodes: Vec<&Node> = graph.nodes().collect();
    let mut changed: BTreeSet<&Node> = nodes.iter().copied().collect();
    let mut rounds = 0usize;

    while !changed.is_empty() {
        rounds += 1;
        let mut next_changed = BTreeSet::new();

        for &i in &nodes {
            let Some(mut sp_i) = table.remove(i) else {
                continue;
            };
            let mut changed_i = false;

            for e_ik in graph.edges_from(i) {
                let k = e_ik.dst();
                if k == i || !changed.contains(k) {
                    continue;
                }
                let Some(sp_k) = table.get(k) else {
                    continue;
                };
                for (j, sp_kj) in sp_k {
                    let better = sp_i
                        .get(j)
                        .map_or(true, |sp_ij| sp_ij.len() > sp_kj.len() + 1);
                    if better {
                        let mut sp_ij = Path::from_edge(e_ik.clone());
                        sp_ij.append(sp_kj);
                        trace!(path = %sp_ij, "bellman-ford new path");
                        sp_i.insert(j.clone(), sp_ij);
                        changed_i = true;
                    }
                }
            }

            table.insert(i.clone(), sp_i);
            if changed_i {
                next_changed.insert(i);
            }
        }

        changed = next_changed;
    }

    debug!(rounds, "bellman-ford converged");
    table
}

/// Zero-length paths to self and one-hop paths to direct neighbours
fn initial_paths(graph: &Graph) -> AllPairsPaths {
    let mut table = AllPairsPaths::new();
    for i in graph.nodes() {
        let mut sp_i = PathMap::new();
        sp_i.insert(i.clone(), Path::new(i.clone()));
        for edge in graph.edges_from(i) {
            sp_i.entry(edge.dst().clone())
                .or_insert_with(|| Path::from_edge(edge.clone()));
        }
        table.insert(i.clone(), sp_i);
    }
    table
}
