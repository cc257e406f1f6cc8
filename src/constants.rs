//! Cross-cutting, shared constants.
//!
//! Game-facing numbers live here so the selector, ranker, snapshot view and gateway
//! agree on them. Secondary values (e.g. the score reported for a correct guess) are
//! derived from primary ones.

/// Raw similarity threshold below which candidates are dropped (oracle scale, `[-1, 1]`).
pub const DEFAULT_MIN_SIMILARITY: f64 = -0.5;

/// Maximum number of records kept in a daily snapshot (`0` disables truncation).
pub const DEFAULT_TOP_K: usize = 10_000;

/// Size of the rank-annotated head of the sorted similarity list.
pub const RANKED_WINDOW: usize = 1_000;

/// Rank reported for a guess that hits the daily word itself.
pub const TARGET_RANK: u32 = RANKED_WINDOW as u32;

/// Similarity reported for a guess that hits the daily word itself.
pub const TARGET_SIMILARITY: f64 = SIMILARITY_SCALE;

/// Oracle similarities are multiplied by this before rounding.
pub const SIMILARITY_SCALE: f64 = 100.0;

/// Decimal places kept on stored similarities.
pub const SIMILARITY_DECIMALS: i32 = 2;

/// Below this many unused words the no-repeat constraint is relaxed.
pub const LOW_INVENTORY_THRESHOLD: usize = 10;

/// Storage format for history keys and snapshot dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Dimension of vectors produced by the stub oracle.
pub const DEFAULT_STUB_DIM: usize = 300;

/// Default number of records returned by the top-words view.
pub const DEFAULT_TOP_WORDS: usize = 100;
