//! Per-query configuration (`spec.md` §3 `RouteParams`).

use crate::types::{Amount, BlockHeight, CltvDelta};
use crate::weight::WeightRatios;

/// Hard cap on hop count, independent of whatever a caller requests
/// (`spec.md` §3, §8 P2).
pub const MAX_ROUTE_LENGTH_CAP: u32 = 20;

#[derive(Clone, Debug)]
pub struct RouteParams {
    pub randomize: bool,
    /// Seed for the caller-owned `rand::rngs::StdRng` consumed by
    /// randomized selection; unused when `randomize` is false. The core
    /// never reads a process-global RNG (`spec.md` §9 Design Notes).
    pub seed: Option<u64>,
    pub max_fee_base: Amount,
    pub max_fee_pct: f64,
    pub route_max_cltv: CltvDelta,
    pub route_max_length: u32,
    pub ratios: Option<WeightRatios>,
    /// Explicit chain tip fed to the age heuristic; never read from a
    /// hidden global (`spec.md` §9 Design Notes).
    pub current_block_height: BlockHeight,
}

impl RouteParams {
    /// The effective length cap after folding in the hard 20-hop ceiling.
    pub fn effective_max_length(&self) -> u32 {
        self.route_max_length.min(MAX_ROUTE_LENGTH_CAP)
    }

    /// `spec.md` §4.4 fee ceiling: acceptable if within the base allowance
    /// OR within the percentage allowance.
    pub fn fee_acceptable(&self, fee: Amount, amount: Amount) -> bool {
        if fee <= self.max_fee_base {
            return true;
        }
        let pct = fee.as_u64() as f64 / amount.as_u64().max(1) as f64;
        pct <= self.max_fee_pct
    }
}

impl Default for RouteParams {
    fn default() -> Self {
        RouteParams {
            randomize: false,
            seed: None,
            max_fee_base: Amount(u64::MAX),
            max_fee_pct: 1.0,
            route_max_cltv: CltvDelta(u32::MAX),
            route_max_length: MAX_ROUTE_LENGTH_CAP,
            ratios: None,
            current_block_height: BlockHeight(0),
        }
    }
}
