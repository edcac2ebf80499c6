//! Members: stat formulas, archetypes, the member lifecycle and fusion.

pub mod archetypes;
pub mod attributes;
pub mod derived_stats;
pub mod fusion;
pub mod member;
pub mod progression;

pub use archetypes::{get_all_archetypes, get_archetype, roll_summon, starter_archetype, Archetype};
pub use attributes::{AttributeKind, AttributeMultipliers, MemberClass, StatModifiers};
pub use derived_stats::{DerivedStats, PowerDistribution};
pub use fusion::calculate_fusion_result;
pub use member::{Member, MemberError};
