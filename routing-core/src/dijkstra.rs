//! Backward single-path Dijkstra search (`spec.md` §4.4).

use crate::error::RouteError;
use crate::graph::{ChannelDesc, DirectedGraph, GraphEdge};
use crate::params::RouteParams;
use crate::types::{Amount, ChannelId, NodeId};
use crate::weight::{relax, RichWeight, WeightContext};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

/// The mutable per-query filters threaded through a search. Kept distinct
/// from `RouteParams` because Yen's spur searches (§4.5) vary these
/// per-iteration while reusing the same `RouteParams`.
pub struct SearchScope<'a> {
    pub ignored_edges: &'a HashSet<ChannelDesc>,
    pub ignored_vertices: &'a HashSet<NodeId>,
    pub ignored_channels: &'a HashSet<ChannelId>,
    pub extra_edges: &'a [GraphEdge],
    pub boundary_predicate: &'a dyn Fn(&RichWeight) -> bool,
    pub cancel: &'a dyn Fn() -> bool,
}

/// The result of a single successful search: the edges in source-to-target
/// order and the accumulator observed at the source (total fee-inclusive
/// cost, summed cltv, hop count).
#[derive(Clone, Debug)]
pub struct PathResult {
    pub edges: Vec<GraphEdge>,
    pub weight_at_source: RichWeight,
}

/// Priority-queue entry. `Ord` is reversed against `RichWeight`'s natural
/// order so that `BinaryHeap`, a max-heap, pops the lexicographically
/// smallest `(weight, length, tie_break)` — mirroring
/// `mikethetike-rust-lightning`'s `RouteGraphNode: Ord` reverse-heap trick.
struct QueueEntry {
    node: NodeId,
    acc: RichWeight,
    /// The channel id of the edge that produced this entry; `None` only for
    /// the initial entry seeded at the target. Used as the final
    /// deterministic tiebreaker (`spec.md` §4.4).
    tie_break: Option<ChannelId>,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.acc.weight == other.acc.weight
            && self.acc.length == other.acc.length
            && self.tie_break == other.tie_break
    }
}
impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .acc
            .weight
            .partial_cmp(&self.acc.weight)
            .expect("route weight must never be NaN")
            .then_with(|| other.acc.length.cmp(&self.acc.length))
            .then_with(|| other.tie_break.cmp(&self.tie_break))
    }
}

/// Candidate predecessor edges for `v`: the graph's `incoming(v)` with any
/// same-keyed `extra_edges` overriding, plus extra edges under a fresh
/// `ChannelDesc` (`spec.md` §4.4, §4.6).
fn candidate_edges(graph: &DirectedGraph, extra_edges: &[GraphEdge], v: NodeId) -> Vec<GraphEdge> {
    let mut by_desc: HashMap<ChannelDesc, GraphEdge> = HashMap::new();
    for edge in graph.incoming(&v) {
        by_desc.insert(edge.desc, *edge);
    }
    for edge in extra_edges.iter().filter(|e| e.desc.to == v) {
        by_desc.insert(edge.desc, *edge);
    }
    by_desc.into_values().collect()
}

/// Runs the backward Dijkstra search described in `spec.md` §4.4 from
/// `target` toward `search_root`, returning the path in
/// `search_root`-to-`target` order.
///
/// `search_root` and `fee_exempt_source` coincide for a top-level query;
/// Yen's spur searches (§4.5) pass `search_root = spur node` while keeping
/// `fee_exempt_source` pinned to the original query source, so the "direct
/// channel pays no fee" rule never misfires on an intermediate forwarding
/// node. The `source == target` precondition (§7 `CannotRouteToSelf`) is a
/// property of the whole query, not of an individual spur search, so callers
/// check it once up front rather than here.
pub fn shortest_path(
    graph: &DirectedGraph,
    search_root: NodeId,
    fee_exempt_source: NodeId,
    target: NodeId,
    amount: Amount,
    params: &RouteParams,
    scope: &SearchScope,
) -> Result<PathResult, RouteError> {
    let ctx = WeightContext {
        ratios: params.ratios.as_ref(),
        current_block_height: params.current_block_height,
    };
    let max_length = params.effective_max_length();

    let mut best: HashMap<NodeId, RichWeight> = HashMap::new();
    let mut pred: HashMap<NodeId, GraphEdge> = HashMap::new();
    let mut heap: BinaryHeap<QueueEntry> = BinaryHeap::new();

    let initial = RichWeight::at_target(amount);
    best.insert(target, initial);
    heap.push(QueueEntry {
        node: target,
        acc: initial,
        tie_break: None,
    });

    while let Some(entry) = heap.pop() {
        if (scope.cancel)() {
            return Err(RouteError::Cancelled);
        }
        let v = entry.node;
        // Stale entry: a better accumulator was already found for v.
        if best.get(&v).copied() != Some(entry.acc) {
            continue;
        }
        if v == search_root {
            let mut edges = Vec::with_capacity(entry.acc.length as usize);
            let mut current = search_root;
            while current != target {
                let edge = *pred
                    .get(&current)
                    .expect("every non-target vertex on the winning path has a predecessor");
                current = edge.desc.to;
                edges.push(edge);
            }
            return Ok(PathResult {
                edges,
                weight_at_source: entry.acc,
            });
        }

        for edge in candidate_edges(graph, scope.extra_edges, v) {
            let u = edge.desc.from;
            if u == v
                || scope.ignored_edges.contains(&edge.desc)
                || scope.ignored_channels.contains(&edge.desc.channel_id)
                || scope.ignored_vertices.contains(&u)
            {
                continue;
            }
            if !crate::policy::edge_feasible(&edge.update, entry.acc.cost) {
                continue;
            }
            let u_is_source = u == fee_exempt_source;
            let Some(candidate) = relax(
                &entry.acc,
                &edge.update,
                u_is_source,
                &ctx,
                edge.desc.channel_id.block_height(),
            ) else {
                continue;
            };
            if candidate.length > max_length || candidate.cltv > params.route_max_cltv {
                continue;
            }
            if !(scope.boundary_predicate)(&candidate) {
                continue;
            }
            let improves = match best.get(&u) {
                Some(existing) => candidate.weight < existing.weight,
                None => true,
            };
            if improves {
                best.insert(u, candidate);
                pred.insert(u, edge);
                heap.push(QueueEntry {
                    node: u,
                    acc: candidate,
                    tie_break: Some(edge.desc.channel_id),
                });
            }
        }
    }

    Err(RouteError::RouteNotFound)
}
