//! Fusing two members into one.
//!
//! Only the outcome is computed here. Refusals that depend on the owning party
//! (equipment, party size) are checked by `Party::fuse_members`.

use super::attributes::AttributeKind;
use super::member::Member;
use crate::core::constants::{
    FUSION_BONUS, FUSION_HIGH_BONUS, FUSION_HIGH_SACRIFICE_LEVEL, FUSION_MIN_SACRIFICE_LEVEL,
    FUSION_SIMILARITY_BONUS, FUSION_SIMILARITY_THRESHOLD,
};

/// Attribute bonus granted by a sacrifice at `level`, before the similarity bonus.
/// Zero below the minimum sacrifice level.
pub fn fusion_bonus(level: u64) -> f64 {
    if level >= FUSION_HIGH_SACRIFICE_LEVEL {
        FUSION_HIGH_BONUS
    } else if level >= FUSION_MIN_SACRIFICE_LEVEL {
        FUSION_BONUS
    } else {
        0.0
    }
}

/// Builds the member that replaces `base` after absorbing `sacrifice`.
///
/// A sacrifice below level 500 hands over its experience. From level 500 on,
/// experience is kept and each of the base's attribute multipliers is scaled
/// by `1 + sacrifice_attribute × bonus`.
pub fn calculate_fusion_result(base: &Member, sacrifice: &Member) -> Member {
    let mut result = base.clone();

    if sacrifice.level() < FUSION_MIN_SACRIFICE_LEVEL {
        result.grant_experience(sacrifice.experience());
        return result;
    }

    let mut bonus = fusion_bonus(sacrifice.level());
    let similarity = base.attributes().similarity(&sacrifice.attributes());
    if similarity >= FUSION_SIMILARITY_THRESHOLD {
        bonus += FUSION_SIMILARITY_BONUS;
    }

    let sacrificed = sacrifice.attributes();
    let factors = AttributeKind::all().map(|kind| 1.0 + sacrificed.get(kind) * bonus);
    result.scale_attributes(factors);
    result
}
