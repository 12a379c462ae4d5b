use log::error;
use serde::{Deserialize, Deserializer};
use serde_aux::prelude::*;
use std::hash::{Hash, Hasher};
use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    str::FromStr,
};

use crate::*;

#[derive(Deserialize, Debug, Default)]
pub struct RawLnresearchGraph {
    pub(crate) nodes: Vec<RawLnresearchNode>,
    #[serde(alias = "adjacency")]
    pub(crate) edges: Vec<Vec<LnresearchRawEdge>>,
}
#[derive(Deserialize, Debug, Default)]
pub struct RawLndGraph {
    pub(crate) nodes: Vec<RawLndNode>,
    #[serde(alias = "adjacency")]
    pub(crate) edges: Vec<LndRawEdge>,
}

serde_aux::StringOrVecToVecParser!(parse_between_commas, |c| { c == ',' }, true);

#[derive(Deserialize, Debug, Clone, Default, Eq, PartialEq)]
pub struct RawLnresearchNode {
    #[serde(alias = "pub_key")]
    pub(crate) id: Option<String>,
    pub(crate) alias: Option<String>,
    #[serde(deserialize_with = "addr_lnr_deserialize")]
    #[serde(default)]
    pub(crate) addresses: Option<Vec<String>>,
}

#[derive(Deserialize, Debug, Clone, Default, Eq, PartialEq)]
pub struct RawLndNode {
    #[serde(alias = "pub_key")]
    pub(crate) id: Option<String>,
    pub(crate) alias: Option<String>,
    pub(crate) addresses: Option<Vec<Address>>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct LnresearchRawEdge {
    #[serde(rename = "scid")]
    pub channel_id: Option<String>,
    pub source: Option<String>,
    pub destination: Option<String>,
    pub fee_base_msat: Option<u64>,
    pub fee_proportional_millionths: Option<u64>,
    pub htlc_minimim_msat: Option<u64>,
    pub htlc_maximum_msat: Option<u64>,
    pub cltv_expiry_delta: Option<u64>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct LndRawEdge {
    pub channel_id: Option<String>,
    #[serde(alias = "node1_pub")]
    pub source: Option<String>,
    #[serde(alias = "node2_pub")]
    pub destination: Option<String>,
    #[serde(deserialize_with = "deserialize_option_number_from_string")]
    /// Denominated in sat
    pub capacity: Option<u64>,
    pub node1_policy: Option<NodePolicy>,
    pub node2_policy: Option<NodePolicy>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct NodePolicy {
    /// Denominated in msat
    #[serde(deserialize_with = "deserialize_option_number_from_string")]
    pub fee_base_msat: Option<u64>,
    /// Denominated in ppm msat
    #[serde(alias = "fee_rate_milli_msat")]
    #[serde(deserialize_with = "deserialize_option_number_from_string")]
    pub fee_proportional_millionths: Option<u64>,
    /// Denominated in msat
    #[serde(alias = "min_htlc")]
    #[serde(deserialize_with = "deserialize_option_number_from_string")]
    pub htlc_minimim_msat: Option<u64>,
    #[serde(alias = "max_htlc_msat")]
    #[serde(deserialize_with = "deserialize_option_number_from_string")]
    pub htlc_maximum_msat: Option<u64>,
    #[serde(alias = "time_lock_delta")]
    pub cltv_expiry_delta: Option<u64>,
}

impl Node {
    pub(crate) fn from_raw_lnresearch(raw_node: RawLnresearchNode) -> Node {
        let mut addresses = vec![];
        if let Some(raw_addresses) = raw_node.addresses {
            for raw_addr in raw_addresses {
                let mut addr = Address::default();
                for (i, part) in raw_addr.split("://").enumerate() {
                    if i == 0 {
                        // the network part which always seems to be tcp
                        match part {
                            "ipv4" | "ipv6" | "torv2" | "torv3" => {
                                "tcp".clone_into(&mut addr.network)
                            }
                            _ => {
                                break;
                            }
                        }
                    } else if i == 1 {
                        // the addr part
                        addr.addr = parse_net_address(part);
                    }
                }
                addresses.push(addr);
            }
        }
        Node {
            id: raw_node.id.expect("Error in node ID"),
            alias: raw_node.alias.unwrap_or_default(),
            addresses,
        }
    }
    pub(crate) fn from_raw_lnd(raw_node: RawLndNode) -> Node {
        let mut addresses = vec![];
        if let Some(raw_addresses) = raw_node.addresses {
            for raw_addr in raw_addresses {
                addresses.push(Address {
                    network: raw_addr.network,
                    addr: parse_net_address(&raw_addr.addr),
                });
            }
        }
        Node {
            id: raw_node.id.expect("Error in node ID"),
            alias: raw_node.alias.unwrap_or_default(),
            addresses,
        }
    }
}

impl Edge {
    /// We remove "orphaned" edges - edges where the source node is not in the list of nodes
    pub(crate) fn from_lnresearch_raw(raw_edge: &LnresearchRawEdge) -> Option<Edge> {
        if raw_edge.fee_base_msat.is_none()
            || raw_edge.fee_proportional_millionths.is_none()
            || raw_edge.htlc_maximum_msat.is_none()
        {
            None
        } else {
            Some(Edge {
                channel_id: raw_edge.channel_id.clone().expect("scid not found"),
                source: raw_edge.source.clone().unwrap_or_default(),
                destination: raw_edge.destination.clone().unwrap_or_default(),
                fee_base_msat: raw_edge
                    .fee_base_msat
                    .expect("Error in fee_base_msat field")
                    .try_into()
                    .expect("Error in fee_base_msat field"),
                fee_proportional_millionths: raw_edge
                    .fee_proportional_millionths
                    .expect("Error in fee_proportional_millionths field")
                    .try_into()
                    .expect("Error in fee_proportional_millionths field"),
                htlc_minimim_msat: raw_edge
                    .htlc_minimim_msat
                    .unwrap_or_default()
                    .try_into()
                    .unwrap_or(usize::default()),
                htlc_maximum_msat: raw_edge
                    .htlc_maximum_msat
                    .unwrap_or_default()
                    .try_into()
                    .unwrap_or(usize::default()),
                cltv_expiry_delta: raw_edge
                    .cltv_expiry_delta
                    .unwrap_or_default()
                    .try_into()
                    .unwrap_or(usize::default()),
                balance: 0,
                liquidity: 0,
                capacity: 0,
            })
        }
    }
    /// We remove "orphaned" edges - edges where the source node is not in the list of nodes
    pub(crate) fn from_lnd_raw(raw_edge: &LndRawEdge) -> Option<(Edge, Edge)> {
        if raw_edge.node1_policy.is_none()
            || raw_edge.node2_policy.is_none()
            || raw_edge
                .node1_policy
                .as_ref()
                .unwrap()
                .fee_base_msat
                .is_none()
            || raw_edge
                .node1_policy
                .as_ref()
                .unwrap()
                .fee_proportional_millionths
                .is_none()
            || raw_edge
                .node1_policy
                .as_ref()
                .unwrap()
                .htlc_maximum_msat
                .is_none()
            || raw_edge
                .node2_policy
                .as_ref()
                .unwrap()
                .fee_base_msat
                .is_none()
            || raw_edge
                .node2_policy
                .as_ref()
                .unwrap()
                .fee_proportional_millionths
                .is_none()
            || raw_edge
                .node2_policy
                .as_ref()
                .unwrap()
                .htlc_maximum_msat
                .is_none()
        {
            None
        } else {
            let node1_policy = raw_edge.node1_policy.clone().unwrap(); // safe because of the earlier check
            let node2_policy = raw_edge.node2_policy.clone().unwrap();
            Some((
                Edge {
                    channel_id: raw_edge.channel_id.clone().expect("scid not found"),
                    source: raw_edge.source.clone().unwrap_or_default(),
                    destination: raw_edge.destination.clone().unwrap_or_default(),
                    fee_base_msat: node1_policy
                        .fee_base_msat
                        .expect("Error in fee_base_msat field")
                        .try_into()
                        .expect("Error in fee_base_msat field"),
                    fee_proportional_millionths: node1_policy
                        .fee_proportional_millionths
                        .expect("Error in fee_proportional_millionths field")
                        .try_into()
                        .expect("Error in fee_proportional_millionths field"),
                    htlc_minimim_msat: node1_policy
                        .htlc_minimim_msat
                        .unwrap_or_default()
                        .try_into()
                        .unwrap_or(usize::default()),
                    htlc_maximum_msat: node1_policy
                        .htlc_maximum_msat
                        .unwrap_or_default()
                        .try_into()
                        .unwrap_or(usize::default()),
                    cltv_expiry_delta: node1_policy
                        .cltv_expiry_delta
                        .unwrap_or_default()
                        .try_into()
                        .unwrap_or(usize::default()),
                    balance: 0,
                    liquidity: 0,
                    capacity: raw_edge
                        .capacity
                        .unwrap_or_default()
                        .try_into()
                        .unwrap_or(usize::default())
                        * 1000,
                },
                Edge {
                    channel_id: raw_edge.channel_id.clone().expect("scid not found"),
                    destination: raw_edge.source.clone().unwrap_or_default(),
                    source: raw_edge.destination.clone().unwrap_or_default(),
                    fee_base_msat: node2_policy
                        .fee_base_msat
                        .expect("Error in fee_base_msat field")
                        .try_into()
                        .expect("Error in fee_base_msat field"),
                    fee_proportional_millionths: node2_policy
                        .fee_proportional_millionths
                        .expect("Error in fee_proportional_millionths field")
                        .try_into()
                        .expect("Error in fee_proportional_millionths field"),
                    htlc_minimim_msat: node2_policy
                        .htlc_minimim_msat
                        .unwrap_or_default()
                        .try_into()
                        .unwrap_or(usize::default()),
                    htlc_maximum_msat: node2_policy
                        .htlc_maximum_msat
                        .unwrap_or_default()
                        .try_into()
                        .unwrap_or(usize::default()),
                    cltv_expiry_delta: node2_policy
                        .cltv_expiry_delta
                        .unwrap_or_default()
                        .try_into()
                        .unwrap_or(usize::default()),
                    balance: 0,
                    liquidity: 0,
                    capacity: raw_edge
                        .capacity
                        .unwrap_or_default()
                        .try_into()
                        .unwrap_or(usize::default())
                        * 1000,
                },
            ))
        }
    }
}

impl Hash for LnresearchRawEdge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.channel_id.hash(state);
    }
}
impl Eq for LnresearchRawEdge {}
impl PartialEq for LnresearchRawEdge {
    fn eq(&self, other: &Self) -> bool {
        self.channel_id == other.channel_id
    }
}
impl Hash for LndRawEdge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.channel_id.hash(state);
    }
}
impl Eq for LndRawEdge {}
impl PartialEq for LndRawEdge {
    fn eq(&self, other: &Self) -> bool {
        self.channel_id == other.channel_id && self.source == other.source
    }
}

fn addr_lnr_deserialize<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let str_sequence = String::deserialize(deserializer)?;
    if str_sequence.is_empty() {
        Ok(None)
    } else {
        Ok(Some(
            str_sequence
                .split(',')
                .map(|item| item.to_owned())
                .collect(),
        ))
    }
}

fn parse_net_address(addr: &str) -> String {
    if !addr.contains("onion") {
        let sock_addr: SocketAddr = addr.parse().unwrap_or_else(|_| {
            error!("Failed to parse {:#?} as IpAddr", addr);
            SocketAddr::new(IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)), 0)
        });
        sock_addr.ip().to_string()
    } else {
        addr.split(':').next().unwrap_or_default().to_string()
    }
}
