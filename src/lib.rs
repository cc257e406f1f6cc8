//! Semantle daily library crate (used by the binary and integration tests).
//!
//! # Public API Surface
//!
//! ## Generation
//! - [`DailyPipeline`], [`PipelineConfig`], [`Generation`] - select → record → rank → write
//! - [`DailyWordSelector`], [`Selection`], [`SelectionOrigin`] - date-seeded word choice
//! - [`SimilarityRanker`], [`RankerConfig`], [`SimilarityRecord`] - similarity ranking
//!
//! ## Persistence
//! - [`History`], [`HistoryStore`] - date → word record with seed bootstrap
//! - [`DailySnapshot`], [`write_snapshot`], [`read_snapshot`] - the served artifact
//! - [`Wordlist`] - candidate words
//!
//! ## Semantic model
//! - [`VectorOracle`], [`WordVector`] - the oracle capability
//! - [`StaticVectorOracle`], [`StubOracle`] - providers
//!
//! ## Serving
//! - [`gateway::create_router`] - Axum HTTP surface
//! - [`Config`], [`ConfigError`] - environment-backed configuration
//!
//! ## Test/Mock Support
//! `MockOracle` is available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod config;
pub mod constants;
pub mod gateway;
pub mod hashing;
pub mod history;
pub mod oracle;
pub mod pipeline;
pub mod ranking;
pub mod selector;
pub mod snapshot;
pub mod storage;
pub mod wordlist;

pub use config::{Config, ConfigError};
pub use hashing::{date_seed, fingerprint, hash_to_u64};
pub use history::{History, HistoryError, HistoryStore, date_key};
#[cfg(any(test, feature = "mock"))]
pub use oracle::MockOracle;
pub use oracle::{
    OracleError, StaticVectorOracle, StubOracle, VectorOracle, WordVector, build_oracle,
    cosine_similarity,
};
pub use pipeline::{DailyPipeline, Generation, PipelineConfig, PipelineError, PipelineResult};
pub use ranking::{
    RankerConfig, Ranking, RankingError, RankingStats, SimilarityRanker, SimilarityRecord,
    assign_ranks, normalize_scores, round_similarity,
};
pub use selector::{DailyWordSelector, Selection, SelectionError, SelectionOrigin};
pub use snapshot::{
    DailySnapshot, GuessOutcome, SnapshotError, TopWord, read_snapshot, write_snapshot,
};
pub use storage::{StorageError, atomic_write};
pub use wordlist::{Wordlist, WordlistError};
