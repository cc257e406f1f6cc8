use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RankingError {
    /// The daily word itself has no vector, so nothing can be compared to it.
    #[error("target word '{word}' has no vector in the {oracle} oracle")]
    MissingTargetVector { word: String, oracle: &'static str },

    #[error("invalid ranking configuration: {reason}")]
    InvalidConfig { reason: String },
}
