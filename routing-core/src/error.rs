//! Typed failures. Hand-rolled `Display`/`Error` impls, matching the idiom
//! used across the wider Lightning corpus rather than a derive-macro crate.

use std::fmt;

/// A query-level routing failure (`spec.md` §7).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RouteError {
    /// `source == target`.
    CannotRouteToSelf,
    /// No feasible path under the given constraints and blacklists. Also
    /// covers the spec's `AmountInfeasible` case, folded in here for API
    /// compatibility as `spec.md` §7 directs.
    RouteNotFound,
    /// The caller's cancel signal fired between priority-queue pops.
    Cancelled,
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteError::CannotRouteToSelf => write!(f, "source and target are the same node"),
            RouteError::RouteNotFound => {
                write!(f, "no route satisfies the given amount and constraints")
            }
            RouteError::Cancelled => write!(f, "route search was cancelled"),
        }
    }
}

impl std::error::Error for RouteError {}

/// A snapshot-ingestion failure (`spec.md` §4.8, supplemental). Never
/// surfaces from `find_route` — only from `DirectedGraph::from_snapshot`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum SnapshotError {
    InvalidNodeId { id: String, source: String },
    InvalidChannelId { channel_id: String },
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::InvalidNodeId { id, source } => {
                write!(f, "invalid node id '{id}': {source}")
            }
            SnapshotError::InvalidChannelId { channel_id } => {
                write!(f, "invalid short channel id '{channel_id}'")
            }
        }
    }
}

impl std::error::Error for SnapshotError {}
