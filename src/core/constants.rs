// Tick and timing
pub const SECONDS_PER_HOUR: u64 = 3600;

// Stamina
pub const MAX_STAMINA: u8 = 100;
pub const STAMINA_REGEN_PER_TICK: i32 = 1;
pub const STAMINA_LOW_BAND_MAX: u8 = 25;
pub const STAMINA_MID_BAND_MAX: u8 = 50;
pub const STAMINA_LOW_MODIFIER: f64 = 0.25;
pub const STAMINA_MID_MODIFIER: f64 = 0.5;

// Party strength vs area difficulty
pub const STRENGTH_MULTIPLIER_MIN: f64 = 0.5;
pub const STRENGTH_MULTIPLIER_MAX: f64 = 5.0;

// Combat effectiveness weights (strength, speed, magic)
pub const EFFECTIVENESS_WEIGHTS: (f64, f64, f64) = (1.0, 0.8, 0.6);

// Offline progression
pub const OFFLINE_MIN_MINUTES: i64 = 5;
pub const OFFLINE_CAP_MINUTES: i64 = 60;
pub const OFFLINE_TREASURE_MULTIPLIER: f64 = 2.0;

// Fusion
pub const FUSION_MIN_SACRIFICE_LEVEL: u64 = 500;
pub const FUSION_HIGH_SACRIFICE_LEVEL: u64 = 1000;
pub const FUSION_BONUS: f64 = 0.05;
pub const FUSION_HIGH_BONUS: f64 = 0.10;
pub const FUSION_SIMILARITY_BONUS: f64 = 0.05;
pub const FUSION_SIMILARITY_THRESHOLD: f64 = 0.8;
pub const FUSION_MIN_PARTY_SIZE: usize = 2;

// Member dismissal value: floor(exp^EXPONENT) * weighted attributes
pub const DISMISS_EXP_EXPONENT: f64 = 0.7;
pub const DISMISS_ATTRIBUTE_WEIGHTS: (f64, f64, f64) = (1.0, 0.8, 1.2);

// Member class detection
pub const CLASS_SECONDARY_THRESHOLD: f64 = 0.7;
pub const CLASS_BATTLE_MAGE_MIN_STRENGTH_WEIGHT: f64 = 5.0;

// Parties
pub const MAX_PARTIES: usize = 3;
pub const STARTING_AREA_ID: u32 = 16;
pub const STARTER_ARCHETYPE: &str = "megami";

// Summoning costs by rank (0 = common .. 3 = legendary)
pub const SUMMON_RANK_COSTS: [u64; 4] = [20, 1000, 200_000, 10_000_000];

// Items
pub const TREASURE_ITEM_ID: u32 = 30;

// Save file format: "MEGAMI" + format version
pub const SAVE_VERSION_MAGIC: u64 = 0x4D45_4741_4D49_0002;
