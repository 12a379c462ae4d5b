//! The directed channel multigraph (`spec.md` §3, §4.1).

use crate::policy::{ChannelUpdate, Direction};
use crate::types::{ChannelId, NodeId};
use log::{debug, trace};
use std::collections::{HashMap, HashSet};

/// A directed edge key: `(channel_id, from, to)`. The same channel id may
/// appear at most twice in a graph, once per direction.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ChannelDesc {
    pub channel_id: ChannelId,
    pub from: NodeId,
    pub to: NodeId,
}

/// `(ChannelDesc, ChannelUpdate)` — one directed, policy-annotated edge.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct GraphEdge {
    pub desc: ChannelDesc,
    pub update: ChannelUpdate,
}

/// A single gossiped channel, carrying 0, 1, or 2 directional updates
/// (`spec.md` §4.1 — "each channel contributes 0, 1, or 2 directed edges
/// depending on which directional updates are present").
pub struct PublicChannel {
    pub channel_id: ChannelId,
    pub node_1: NodeId,
    pub node_2: NodeId,
    pub update_1: Option<ChannelUpdate>,
    pub update_2: Option<ChannelUpdate>,
}

/// A directed multigraph over channel-keyed edges.
///
/// Invariants (`spec.md` §3):
/// - (I1) every edge's endpoints are in `nodes`.
/// - (I2) `ChannelDesc` is unique; re-adding an existing desc replaces it.
/// - (I3) `out` and `in` stay consistent with each other.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DirectedGraph {
    nodes: HashSet<NodeId>,
    out: HashMap<NodeId, Vec<GraphEdge>>,
    incoming: HashMap<NodeId, Vec<GraphEdge>>,
}

impl DirectedGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_vertex(&mut self, node: NodeId) {
        if self.nodes.insert(node) {
            self.out.entry(node).or_default();
            self.incoming.entry(node).or_default();
        }
    }

    /// Removes a vertex. Per `spec.md` §4.1 this is only valid at degree 0;
    /// callers that want to exclude a node mid-search use an ignore-set
    /// instead (§4.7).
    pub fn remove_vertex(&mut self, node: NodeId) -> bool {
        let degree = self.out.get(&node).map_or(0, Vec::len) + self.incoming.get(&node).map_or(0, Vec::len);
        if degree != 0 {
            return false;
        }
        self.nodes.remove(&node);
        self.out.remove(&node);
        self.incoming.remove(&node);
        true
    }

    pub fn add_edge(&mut self, desc: ChannelDesc, update: ChannelUpdate) {
        self.add_vertex(desc.from);
        self.add_vertex(desc.to);
        let edge = GraphEdge { desc, update };

        let out_edges = self.out.entry(desc.from).or_default();
        match out_edges.iter_mut().find(|e| e.desc == desc) {
            Some(existing) => *existing = edge,
            None => out_edges.push(edge),
        }

        let in_edges = self.incoming.entry(desc.to).or_default();
        match in_edges.iter_mut().find(|e| e.desc == desc) {
            Some(existing) => *existing = edge,
            None => in_edges.push(edge),
        }
        trace!("added edge {:?}", desc);
    }

    pub fn remove_edge(&mut self, desc: &ChannelDesc) -> bool {
        let removed_out = self
            .out
            .get_mut(&desc.from)
            .map(|edges| {
                let before = edges.len();
                edges.retain(|e| e.desc != *desc);
                before != edges.len()
            })
            .unwrap_or(false);
        if let Some(edges) = self.incoming.get_mut(&desc.to) {
            edges.retain(|e| e.desc != *desc);
        }
        if removed_out {
            trace!("removed edge {:?}", desc);
        }
        removed_out
    }

    pub fn contains_vertex(&self, node: &NodeId) -> bool {
        self.nodes.contains(node)
    }

    pub fn contains_edge(&self, desc: &ChannelDesc) -> bool {
        self.out
            .get(&desc.from)
            .is_some_and(|edges| edges.iter().any(|e| e.desc == *desc))
    }

    pub fn outgoing(&self, node: &NodeId) -> impl Iterator<Item = &GraphEdge> {
        self.out.get(node).into_iter().flatten()
    }

    pub fn incoming(&self, node: &NodeId) -> impl Iterator<Item = &GraphEdge> {
        self.incoming.get(node).into_iter().flatten()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.out.values().map(Vec::len).sum()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &NodeId> {
        self.nodes.iter()
    }

    /// Builds a graph from a flat list of gossiped channels, disambiguating
    /// direction by lexicographic node-id order as `spec.md` §3/§4.1 require.
    pub fn from_public_channels(channels: &[PublicChannel]) -> Self {
        let mut graph = Self::new();
        for channel in channels {
            let (lesser, greater) = if channel.node_1 <= channel.node_2 {
                (channel.node_1, channel.node_2)
            } else {
                (channel.node_2, channel.node_1)
            };
            graph.add_vertex(lesser);
            graph.add_vertex(greater);

            if let Some(update) = channel.update_1 {
                debug_assert_eq!(update.direction, Direction::NodeOneToTwo);
                graph.add_edge(
                    ChannelDesc {
                        channel_id: channel.channel_id,
                        from: lesser,
                        to: greater,
                    },
                    update,
                );
            }
            if let Some(update) = channel.update_2 {
                debug_assert_eq!(update.direction, Direction::NodeTwoToOne);
                graph.add_edge(
                    ChannelDesc {
                        channel_id: channel.channel_id,
                        from: greater,
                        to: lesser,
                    },
                    update,
                );
            }
        }
        debug!(
            "built graph with {} nodes, {} edges from {} public channels",
            graph.node_count(),
            graph.edge_count(),
            channels.len()
        );
        graph
    }
}
