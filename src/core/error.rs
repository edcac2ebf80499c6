//! Errors returned by roster, party and inventory entry points.
//!
//! Every fallible entry point leaves state untouched when it returns `Err`.
//! Callers can tell an unknown id apart from a refused operation with
//! [`GameError::is_not_found`], which is how the presentation layer decides
//! between "something is out of sync" and a user-facing reason like
//! "cannot fuse: equipped".

use crate::character::MemberError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GameError {
    // ── Not found ───────────────────────────────────────────────
    #[error("party {0} not found")]
    PartyNotFound(u32),

    #[error("member {0} not found")]
    MemberNotFound(String),

    #[error("item {0} not found")]
    ItemNotFound(String),

    #[error("no item definition for id {0}")]
    UnknownItem(u32),

    #[error("no archetype named {0:?}")]
    UnknownArchetype(String),

    #[error("no summon pool for rank {0}")]
    UnknownSummonRank(u8),

    // ── Business rule refusals ──────────────────────────────────
    #[error("cannot remove the last member of a party")]
    LastMember,

    #[error("member {0} has equipment")]
    Equipped(String),

    #[error("a party must keep at least {min} members after fusion")]
    PartyTooSmallToFuse { min: usize },

    #[error("a member cannot be fused with itself")]
    SelfFusion,

    #[error("party limit of {0} reached")]
    PartyLimitReached(usize),

    #[error("not enough gold: need {needed}, have {available}")]
    InsufficientGold { needed: u64, available: u64 },

    #[error("item {0} cannot be equipped")]
    NotEquippable(u32),

    #[error("item {0} is equipped")]
    ItemEquipped(String),

    #[error("item {0} is not equipped")]
    ItemNotEquipped(String),

    #[error("item {0} has no use effect")]
    NotUsable(u32),

    #[error("item {0} needs a target member")]
    TargetRequired(u32),

    #[error(transparent)]
    Member(#[from] MemberError),
}

impl GameError {
    /// Returns true when the error means an id did not resolve, as opposed to
    /// a rule refusing an otherwise valid request.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            GameError::PartyNotFound(_)
                | GameError::MemberNotFound(_)
                | GameError::ItemNotFound(_)
                | GameError::UnknownItem(_)
                | GameError::UnknownArchetype(_)
                | GameError::UnknownSummonRank(_)
        )
    }
}
