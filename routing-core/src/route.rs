//! The top-level query surface: route assembly, blacklist/hint helpers, and
//! `find_route` itself (`spec.md` §4.6, §4.7, §6).

use crate::dijkstra::{shortest_path, SearchScope};
use crate::error::RouteError;
use crate::graph::{ChannelDesc, DirectedGraph, GraphEdge, PublicChannel};
use crate::params::RouteParams;
use crate::policy::{fee_for, ChannelUpdate};
use crate::types::{Amount, ChannelId, NodeId};
use crate::weight::RichWeight;
use crate::yen::k_shortest_paths;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::{HashMap, HashSet};

/// One hop of a resolved route: pay out `update`'s policy on the channel
/// from `from` to `to`.
#[derive(Clone, Copy, Debug)]
pub struct Hop {
    pub from: NodeId,
    pub to: NodeId,
    pub update: ChannelUpdate,
}

/// A channel the target has revealed out-of-band (e.g. a BOLT11 routing
/// hint) that the core should treat as routable even though it never saw
/// the gossip for it (`spec.md` §4.6).
#[derive(Clone, Copy, Debug)]
pub struct RouteHint {
    pub channel_id: ChannelId,
    pub from: NodeId,
    pub to: NodeId,
    pub update: ChannelUpdate,
}

/// A hint resolved into a graph-shaped edge, keyed by channel id for easy
/// lookup alongside the ignore-sets.
#[derive(Clone, Copy, Debug)]
pub struct AssistedChannel {
    pub desc: ChannelDesc,
    pub update: ChannelUpdate,
}

/// Keeps only the hints that actually terminate at `target` — a hint for
/// some other destination is meaningless to this query (`spec.md` §4.6).
pub fn assisted_channels_from_hints(
    hints: &[RouteHint],
    target: NodeId,
) -> HashMap<ChannelId, AssistedChannel> {
    hints
        .iter()
        .filter(|hint| hint.to == target)
        .map(|hint| {
            let desc = ChannelDesc {
                channel_id: hint.channel_id,
                from: hint.from,
                to: hint.to,
            };
            (hint.channel_id, AssistedChannel { desc, update: hint.update })
        })
        .collect()
}

/// Flattens resolved assisted channels into the `extra_edges` a search scope
/// expects.
pub fn assisted_channels_as_extra_edges(
    assisted: &HashMap<ChannelId, AssistedChannel>,
) -> Vec<GraphEdge> {
    assisted
        .values()
        .map(|a| GraphEdge { desc: a.desc, update: a.update })
        .collect()
}

/// Expands a node blacklist into the full set of directed channel
/// descriptors touching any blacklisted node, in both directions
/// (`spec.md` §4.7). Mirrors the lexicographic disambiguation
/// `DirectedGraph::from_public_channels` uses.
pub fn get_ignored_channel_descs(
    channels: &[PublicChannel],
    ignore_nodes: &HashSet<NodeId>,
) -> HashSet<ChannelDesc> {
    let mut out = HashSet::new();
    for channel in channels {
        if !ignore_nodes.contains(&channel.node_1) && !ignore_nodes.contains(&channel.node_2) {
            continue;
        }
        let (lesser, greater) = if channel.node_1 <= channel.node_2 {
            (channel.node_1, channel.node_2)
        } else {
            (channel.node_2, channel.node_1)
        };
        out.insert(ChannelDesc {
            channel_id: channel.channel_id,
            from: lesser,
            to: greater,
        });
        out.insert(ChannelDesc {
            channel_id: channel.channel_id,
            from: greater,
            to: lesser,
        });
    }
    out
}

/// Everything a single routing query needs beyond the graph and the shared
/// `RouteParams`. A bundled struct rather than `spec.md` §6's ten positional
/// arguments — idiomatic for a call site this wide (see `DESIGN.md`).
pub struct RouteQuery<'a> {
    pub source: NodeId,
    pub target: NodeId,
    pub amount: Amount,
    /// Candidate pool size for randomized selection; ignored when
    /// `params.randomize` is false, in which case the single cheapest path
    /// is always returned.
    pub num_routes: u32,
    pub ignored_edges: &'a HashSet<ChannelDesc>,
    pub ignored_vertices: &'a HashSet<NodeId>,
    pub ignored_channels: &'a HashSet<ChannelId>,
    pub extra_edges: &'a [GraphEdge],
    pub boundary_predicate: &'a dyn Fn(&RichWeight) -> bool,
    pub cancel: &'a dyn Fn() -> bool,
}

/// Resolves a query into a route (`spec.md` §6 `find_route`).
///
/// When `params.randomize` is set, the core draws uniformly from up to
/// `query.num_routes` of the cheapest loopless candidates using a caller-
/// seeded RNG, rather than always returning the single cheapest path —
/// callers that want deterministic routing leave `randomize` false.
pub fn find_route(
    graph: &DirectedGraph,
    query: &RouteQuery,
    params: &RouteParams,
) -> Result<Vec<Hop>, RouteError> {
    if query.source == query.target {
        return Err(RouteError::CannotRouteToSelf);
    }

    let scope = SearchScope {
        ignored_edges: query.ignored_edges,
        ignored_vertices: query.ignored_vertices,
        ignored_channels: query.ignored_channels,
        extra_edges: query.extra_edges,
        boundary_predicate: query.boundary_predicate,
        cancel: query.cancel,
    };

    let edges = if params.randomize {
        let k = query.num_routes.max(1);
        let candidates = k_shortest_paths(
            graph,
            query.source,
            query.target,
            query.amount,
            k,
            params,
            &scope,
        );
        if candidates.is_empty() {
            return Err(RouteError::RouteNotFound);
        }
        let mut rng = match params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let idx = rng.gen_range(0..candidates.len());
        candidates
            .into_iter()
            .nth(idx)
            .expect("idx drawn from 0..candidates.len()")
            .edges
    } else {
        shortest_path(
            graph,
            query.source,
            query.source,
            query.target,
            query.amount,
            params,
            &scope,
        )?
        .edges
    };

    Ok(edges
        .into_iter()
        .map(|edge| Hop {
            from: edge.desc.from,
            to: edge.desc.to,
            update: edge.update,
        })
        .collect())
}

/// Recomputes the total fee a resolved route charges on top of `amount`, by
/// replaying fee accrual forward from the target (`spec.md` §4.4 — "the
/// core exposes both the route and the fee for policy checking"). Returns
/// `None` only on overflow; an empty route costs nothing.
pub fn route_total_fee(hops: &[Hop], amount: Amount) -> Option<Amount> {
    let Some(first) = hops.first() else {
        return Some(Amount::ZERO);
    };
    let source = first.from;
    let mut outgoing = amount;
    for hop in hops.iter().rev() {
        let fee = if hop.from == source {
            Amount::ZERO
        } else {
            fee_for(&hop.update, outgoing)?
        };
        outgoing = outgoing.checked_add(fee)?;
    }
    outgoing.checked_sub(amount)
}
