//! Numeric and identifier primitives shared by every other module.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A node's compressed secp256k1 public key. Opaque outside of (de)serialization
/// and comparison — the core never inspects the key material itself.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub [u8; 33]);

impl NodeId {
    pub fn from_bytes(bytes: [u8; 33]) -> Self {
        NodeId(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 33] {
        &self.0
    }

    /// Parses a 66-character lowercase/uppercase hex string into a node id.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let mut bytes = [0u8; 33];
        hex::decode_to_slice(s, &mut bytes)?;
        Ok(NodeId(bytes))
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.to_hex())
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// A channel's short channel id, BOLT7-encoded as
/// `block_height << 40 | tx_index << 16 | output_index`.
///
/// The packing is only ever unpacked by the age heuristic in the weight
/// model (`weight::age_score`); everywhere else a `ChannelId` is an opaque,
/// totally-ordered key.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ChannelId(pub u64);

impl ChannelId {
    pub fn from_parts(block_height: u32, tx_index: u32, output_index: u16) -> Self {
        let packed = ((block_height as u64) << 40)
            | ((tx_index as u64 & 0xff_ffff) << 16)
            | (output_index as u64);
        ChannelId(packed)
    }

    pub fn block_height(&self) -> BlockHeight {
        BlockHeight((self.0 >> 40) as u32)
    }

    pub fn tx_index(&self) -> u32 {
        ((self.0 >> 16) & 0xff_ffff) as u32
    }

    pub fn output_index(&self) -> u16 {
        (self.0 & 0xffff) as u16
    }
}

impl fmt::Debug for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ChannelId({}x{}x{})",
            self.block_height().0,
            self.tx_index(),
            self.output_index()
        )
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A block height, used only by the age heuristic (§4.3) and by callers to
/// supply the current tip explicitly (Design Notes §9 — "forbid hidden
/// globals").
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct BlockHeight(pub u32);

/// Sum of per-hop CLTV deltas along (a prefix of) a route.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default, Serialize, Deserialize)]
pub struct CltvDelta(pub u32);

impl std::ops::Add for CltvDelta {
    type Output = CltvDelta;
    fn add(self, rhs: CltvDelta) -> CltvDelta {
        CltvDelta(self.0.saturating_add(rhs.0))
    }
}

/// An amount denominated in millionths of a base unit (msat-equivalent).
/// All arithmetic is checked/saturating: overflow is a precondition
/// violation (`spec.md` §7), never a panic or silent wraparound.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Amount(pub u64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    pub fn checked_add(self, rhs: Amount) -> Option<Amount> {
        self.0.checked_add(rhs.0).map(Amount)
    }

    pub fn checked_sub(self, rhs: Amount) -> Option<Amount> {
        self.0.checked_sub(rhs.0).map(Amount)
    }

    pub fn saturating_sub(self, rhs: Amount) -> Amount {
        Amount(self.0.saturating_sub(rhs.0))
    }

    /// Integer-truncated proportional fee: `floor(self * ppm / 1_000_000)`.
    pub fn proportional_ppm(self, ppm: u32) -> Option<Amount> {
        (self.0 as u128)
            .checked_mul(ppm as u128)
            .map(|p| p / 1_000_000)
            .and_then(|v| u64::try_from(v).ok())
            .map(Amount)
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} msat", self.0)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Amount {
    fn from(v: u64) -> Self {
        Amount(v)
    }
}
