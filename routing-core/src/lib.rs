pub mod dijkstra;
pub mod error;
pub mod graph;
pub mod params;
pub mod policy;
pub mod route;
pub mod snapshot;
pub mod types;
pub mod weight;
pub mod yen;

pub use dijkstra::{shortest_path, PathResult, SearchScope};
pub use error::{RouteError, SnapshotError};
pub use graph::{ChannelDesc, DirectedGraph, GraphEdge, PublicChannel};
pub use params::{RouteParams, MAX_ROUTE_LENGTH_CAP};
pub use policy::{edge_feasible, fee_for, ChannelUpdate, Direction};
pub use route::{
    assisted_channels_as_extra_edges, assisted_channels_from_hints, find_route,
    get_ignored_channel_descs, route_total_fee, AssistedChannel, Hop, RouteHint, RouteQuery,
};
pub use types::{Amount, BlockHeight, ChannelId, CltvDelta, NodeId};
pub use weight::{RichWeight, WeightContext, WeightRatios};
pub use yen::{k_shortest_paths, WeightedPath};
