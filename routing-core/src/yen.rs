//! Yen's K-shortest-loopless-paths enumerator, built on top of the
//! single-path backward search (`spec.md` §4.5).

use crate::dijkstra::{shortest_path, PathResult, SearchScope};
use crate::graph::{ChannelDesc, DirectedGraph, GraphEdge};
use crate::params::RouteParams;
use crate::policy::fee_for;
use crate::types::{Amount, ChannelId, NodeId};
use crate::weight::{relax, RichWeight, WeightContext};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

/// One path out of `k_shortest_paths`, in source-to-target edge order.
#[derive(Clone, Debug)]
pub struct WeightedPath {
    pub edges: Vec<GraphEdge>,
    pub weight: f64,
}

/// A candidate sitting in Yen's `B` heap, ordered by weight then by the
/// full channel-id sequence for a deterministic tiebreak (`spec.md` §4.5).
struct Candidate {
    path: PathResult,
}

impl Candidate {
    fn channel_sequence(&self) -> Vec<ChannelId> {
        self.path.edges.iter().map(|e| e.desc.channel_id).collect()
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.path.weight_at_source.weight == other.path.weight_at_source.weight
            && self.channel_sequence() == other.channel_sequence()
    }
}
impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .path
            .weight_at_source
            .weight
            .partial_cmp(&self.path.weight_at_source.weight)
            .expect("route weight must never be NaN")
            .then_with(|| other.channel_sequence().cmp(&self.channel_sequence()))
    }
}

/// The amount that must leave each vertex of `path` to deliver `amount` to
/// the target, replaying `spec.md` §4.3's fee accrual forward along an
/// already-discovered path. `amounts[i]` is the outgoing amount at
/// `path.edges[i].desc.from`; `amounts[path.edges.len()]` is `amount` itself.
fn outgoing_amounts(
    path: &PathResult,
    source: NodeId,
    amount: Amount,
) -> Option<Vec<Amount>> {
    let n = path.edges.len();
    let mut amounts = vec![Amount::ZERO; n + 1];
    amounts[n] = amount;
    for idx in (0..n).rev() {
        let edge = &path.edges[idx];
        let downstream = amounts[idx + 1];
        let fee = if edge.desc.from == source {
            Amount::ZERO
        } else {
            fee_for(&edge.update, downstream)?
        };
        amounts[idx] = downstream.checked_add(fee)?;
    }
    Some(amounts)
}

/// Recomputes the `RichWeight` a backward search would have produced at
/// `source` for an already-assembled `edges` sequence, by replaying
/// `relax` from target to source. Used to score a joined root+spur path
/// exactly rather than approximately, since the spur search's own
/// `weight_at_source` only covers the spur.
fn recompute_weight(
    edges: &[GraphEdge],
    source: NodeId,
    amount: Amount,
    params: &RouteParams,
) -> Option<RichWeight> {
    let ctx = WeightContext {
        ratios: params.ratios.as_ref(),
        current_block_height: params.current_block_height,
    };
    let mut acc = RichWeight::at_target(amount);
    for edge in edges.iter().rev() {
        let u_is_source = edge.desc.from == source;
        acc = relax(
            &acc,
            &edge.update,
            u_is_source,
            &ctx,
            edge.desc.channel_id.block_height(),
        )?;
    }
    Some(acc)
}

/// Enumerates up to `paths_to_find` loopless paths from `source` to
/// `target` in non-decreasing weight order (`spec.md` §4.5, property P6).
/// Returns fewer than `paths_to_find` if fewer exist; returns an empty
/// vector if even the first path is infeasible.
#[allow(clippy::too_many_arguments)]
pub fn k_shortest_paths(
    graph: &DirectedGraph,
    source: NodeId,
    target: NodeId,
    amount: Amount,
    paths_to_find: u32,
    params: &RouteParams,
    scope: &SearchScope,
) -> Vec<WeightedPath> {
    if paths_to_find == 0 || source == target {
        return Vec::new();
    }

    let Ok(first) = shortest_path(graph, source, source, target, amount, params, scope) else {
        return Vec::new();
    };

    let mut found: Vec<PathResult> = vec![first];
    let mut heap: BinaryHeap<Candidate> = BinaryHeap::new();
    let mut seen: HashSet<Vec<ChannelId>> = HashSet::new();
    seen.insert(
        found[0]
            .edges
            .iter()
            .map(|e| e.desc.channel_id)
            .collect(),
    );

    while (found.len() as u32) < paths_to_find {
        let prev = found.last().expect("found is seeded with one path");
        let Some(amounts) = outgoing_amounts(prev, source, amount) else {
            break;
        };

        for i in 0..prev.edges.len() {
            let root_edges = &prev.edges[..i];
            let spur_node = if i == 0 {
                source
            } else {
                root_edges[i - 1].desc.to
            };

            let mut ignored_edges = scope.ignored_edges.clone();
            for p in &found {
                if p.edges.len() > i && p.edges[..i] == *root_edges {
                    ignored_edges.insert(p.edges[i].desc);
                }
            }
            let mut ignored_vertices = scope.ignored_vertices.clone();
            for e in root_edges {
                if e.desc.from != spur_node {
                    ignored_vertices.insert(e.desc.from);
                }
            }

            let spur_scope = SearchScope {
                ignored_edges: &ignored_edges,
                ignored_vertices: &ignored_vertices,
                ignored_channels: scope.ignored_channels,
                extra_edges: scope.extra_edges,
                boundary_predicate: scope.boundary_predicate,
                cancel: scope.cancel,
            };

            let spur_amount = amounts[i];
            let Ok(spur) = shortest_path(
                graph,
                spur_node,
                source,
                target,
                spur_amount,
                params,
                &spur_scope,
            ) else {
                continue;
            };

            let mut edges = root_edges.to_vec();
            edges.extend(spur.edges);
            let key: Vec<ChannelId> = edges.iter().map(|e| e.desc.channel_id).collect();
            if seen.contains(&key) {
                continue;
            }
            seen.insert(key);

            let Some(weight_at_source) = recompute_weight(&edges, source, amount, params) else {
                continue;
            };

            heap.push(Candidate {
                path: PathResult {
                    edges,
                    weight_at_source,
                },
            });
        }

        match heap.pop() {
            Some(candidate) => found.push(candidate.path),
            None => break,
        }
    }

    found
        .into_iter()
        .map(|p| WeightedPath {
            weight: p.weight_at_source.weight,
            edges: p.edges,
        })
        .collect()
}
