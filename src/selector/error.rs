use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("cannot select a daily word for {date}: wordlist is empty")]
    EmptyWordlist { date: String },
}
