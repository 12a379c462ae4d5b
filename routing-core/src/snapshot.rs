//! Adapts a `network-parser` gossip snapshot into a `DirectedGraph`
//! (`spec.md` §4.8, supplemental — the distilled spec takes a graph as
//! given, but a routing core needs a way to build one from real gossip).

use crate::error::SnapshotError;
use crate::graph::{ChannelDesc, DirectedGraph};
use crate::policy::{ChannelUpdate, Direction};
use crate::types::{Amount, ChannelId, CltvDelta, NodeId};
use log::warn;
use network_parser::{Edge as RawEdge, Graph as RawGraph};

/// Parses a node id as used by `network-parser`: a hex-encoded compressed
/// pubkey.
pub fn parse_node_id(id: &str) -> Result<NodeId, SnapshotError> {
    NodeId::from_hex(id).map_err(|e| SnapshotError::InvalidNodeId {
        id: id.to_string(),
        source: e.to_string(),
    })
}

/// Parses a BOLT7 short channel id in `network-parser`'s
/// `"{block}x{tx}x{output}/{extra}"` form. The `/{extra}` suffix (an
/// lnresearch-specific sub-index) is accepted but not packed into the id.
pub fn parse_channel_id(scid: &str) -> Result<ChannelId, SnapshotError> {
    let malformed = || SnapshotError::InvalidChannelId {
        channel_id: scid.to_string(),
    };
    let mut parts = scid.splitn(3, 'x');
    let (Some(block), Some(tx), Some(output)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(malformed());
    };
    let output = output.split('/').next().ok_or_else(malformed)?;
    let block: u32 = block.parse().map_err(|_| malformed())?;
    let tx: u32 = tx.parse().map_err(|_| malformed())?;
    let output: u16 = output.parse().map_err(|_| malformed())?;
    Ok(ChannelId::from_parts(block, tx, output))
}

fn edge_from_raw(edge: &RawEdge) -> Result<(ChannelDesc, ChannelUpdate), SnapshotError> {
    let channel_id = parse_channel_id(&edge.channel_id)?;
    let from = parse_node_id(&edge.source)?;
    let to = parse_node_id(&edge.destination)?;
    let direction = if from <= to {
        Direction::NodeOneToTwo
    } else {
        Direction::NodeTwoToOne
    };
    // network-parser represents "no max" as 0 rather than an Option.
    let htlc_maximum = if edge.htlc_maximum_msat == 0 {
        None
    } else {
        Some(Amount(edge.htlc_maximum_msat as u64))
    };
    let update = ChannelUpdate {
        fee_base: Amount(edge.fee_base_msat as u64),
        fee_proportional_millionths: edge.fee_proportional_millionths as u32,
        cltv_delta: CltvDelta(edge.cltv_expiry_delta as u32),
        htlc_minimum: Amount(edge.htlc_minimim_msat as u64),
        htlc_maximum,
        timestamp: 0,
        direction,
        capacity: Amount(edge.capacity as u64),
    };
    Ok((ChannelDesc { channel_id, from, to }, update))
}

impl DirectedGraph {
    /// Builds a graph from an already-parsed gossip snapshot. Malformed
    /// node ids or channel ids are skipped with a warning rather than
    /// failing the whole ingestion, matching `network-parser`'s own
    /// precedent of discarding nodes/edges it cannot place — ingestion is
    /// malformed-gossip-tolerant by design, so this always returns `Ok`.
    /// The `Result` in the signature is kept for callers that may want to
    /// tighten that policy without an API break.
    pub fn from_snapshot(raw: &RawGraph) -> Result<DirectedGraph, SnapshotError> {
        let mut graph = DirectedGraph::new();
        for node in &raw.nodes {
            match parse_node_id(&node.id) {
                Ok(id) => graph.add_vertex(id),
                Err(err) => warn!("skipping node {}: {err}", node.id),
            }
        }
        for edges in raw.edges.values() {
            for edge in edges {
                match edge_from_raw(edge) {
                    Ok((desc, update)) => graph.add_edge(desc, update),
                    Err(err) => warn!("skipping edge {}: {err}", edge.channel_id),
                }
            }
        }
        Ok(graph)
    }
}
