use serde::{Deserialize, Serialize};

/// The fixed set of hidden icons a player has to find.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Target {
    Parakeet,
    Knight,
    King,
}

impl Target {
    /// Declared order; a fresh session hunts in this order.
    pub const ALL: [Target; 3] = [Target::Parakeet, Target::Knight, Target::King];

    pub fn glyph(&self) -> &'static str {
        match self {
            Target::Parakeet => "<')",
            Target::Knight => "♞",
            Target::King => "♚",
        }
    }

    /// Zero-based position in [`Target::ALL`], used for number-key selection.
    pub fn from_index(idx: usize) -> Option<Target> {
        Target::ALL.get(idx).copied()
    }
}
