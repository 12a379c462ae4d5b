//! The edge-relaxation / cost model (`spec.md` §4.3).

use crate::policy::{fee_for, ChannelUpdate};
use crate::types::{Amount, BlockHeight, CltvDelta};

/// Reference constants from `spec.md` §9 Open Questions — "adjust only with
/// regression tests."
pub const CLTV_MAX: u32 = 2016;
/// Roughly two years of blocks at 10 minutes/block.
pub const BLOCK_MAX: u32 = 105_120;
pub const CAPACITY_MAX: u64 = 8_000_000_000;

/// The minimum positive weight increment substituted whenever a relaxation
/// would otherwise be non-positive, to preserve monotonicity invariant M1.
const MIN_WEIGHT_INCREMENT: f64 = 1e-9;

/// The three non-negative factors of the optional multi-factor heuristic.
/// Callers are expected to keep them summing to at most 1, though the core
/// does not enforce this.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WeightRatios {
    pub age_factor: f64,
    pub cltv_delta_factor: f64,
    pub capacity_factor: f64,
}

/// The path accumulator carried by the backward Dijkstra search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RichWeight {
    /// The amount that must enter this vertex to deliver the payment to the
    /// target along the partial path discovered so far.
    pub cost: Amount,
    pub cltv: CltvDelta,
    /// Hop count from this vertex to the target.
    pub length: u32,
    /// The Dijkstra priority key.
    pub weight: f64,
}

impl RichWeight {
    /// The initial accumulator seeded at the target (`spec.md` §4.4).
    pub fn at_target(amount: Amount) -> Self {
        RichWeight {
            cost: amount,
            cltv: CltvDelta(0),
            length: 0,
            weight: 0.0,
        }
    }
}

/// Context needed to score a single relaxation step; threaded through
/// instead of read from a global so the age heuristic never has a hidden
/// dependency on wall-clock chain state (`spec.md` §9 Design Notes).
#[derive(Clone, Copy, Debug)]
pub struct WeightContext<'a> {
    pub ratios: Option<&'a WeightRatios>,
    pub current_block_height: BlockHeight,
}

fn age_score(ctx: &WeightContext, channel_block_height: BlockHeight) -> f64 {
    let block_age = ctx
        .current_block_height
        .0
        .saturating_sub(channel_block_height.0);
    1.0 - (block_age as f64 / BLOCK_MAX as f64).min(1.0)
}

fn cltv_score(update: &ChannelUpdate) -> f64 {
    (update.cltv_delta.0 as f64 / CLTV_MAX as f64).min(1.0)
}

fn capacity_score(capacity: Amount) -> f64 {
    1.0 - (capacity.as_u64() as f64 / CAPACITY_MAX as f64).min(1.0)
}

/// Relaxes the edge `u -> v` (`update` describes that edge) given the
/// accumulator already known at `v`, producing the tentative accumulator at
/// `u`. `u_is_source` is true exactly when `u` is the query's source — the
/// source's own outgoing edge is never charged a fee (`spec.md` §4.3/§4.4,
/// the "direct channel pays no fee" rule, property P9).
///
/// `channel_block_height` feeds the age heuristic and is ignored when
/// `ctx.ratios` is `None`; `update.capacity` feeds the capacity heuristic
/// the same way.
pub fn relax(
    acc_v: &RichWeight,
    update: &ChannelUpdate,
    u_is_source: bool,
    ctx: &WeightContext,
    channel_block_height: BlockHeight,
) -> Option<RichWeight> {
    let fee = if u_is_source {
        Amount::ZERO
    } else {
        fee_for(update, acc_v.cost)?
    };
    let cost = acc_v.cost.checked_add(fee)?;
    let cltv = if u_is_source {
        acc_v.cltv
    } else {
        acc_v.cltv + update.cltv_delta
    };
    let length = acc_v.length + 1;

    let weight = match ctx.ratios {
        None => cost.as_u64() as f64,
        Some(ratios) => {
            if u_is_source {
                acc_v.weight + MIN_WEIGHT_INCREMENT
            } else {
                let hop_weight = 1.0
                    + age_score(ctx, channel_block_height) * ratios.age_factor
                    + cltv_score(update) * ratios.cltv_delta_factor
                    + capacity_score(update.capacity) * ratios.capacity_factor;
                let increment = hop_weight * fee.as_u64() as f64;
                acc_v.weight + increment.max(MIN_WEIGHT_INCREMENT)
            }
        }
    };
    // M1: every relaxation must strictly increase the weight.
    let weight = if weight > acc_v.weight {
        weight
    } else {
        acc_v.weight + MIN_WEIGHT_INCREMENT
    };

    Some(RichWeight {
        cost,
        cltv,
        length,
        weight,
    })
}
