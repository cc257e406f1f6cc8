use chrono::NaiveDate;

/// Where the selected word came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOrigin {
    /// The date was already in the history; nothing new was drawn.
    Existing,
    /// Drawn from words never used before.
    Unused {
        /// Unused words available at draw time (including the pick).
        available: usize,
    },
    /// Drawn from the full wordlist because too few unused words remained.
    Recycled {
        /// Unused words left when the constraint was relaxed.
        unused_left: usize,
    },
}

impl SelectionOrigin {
    /// Returns `true` if the word was freshly drawn and must be recorded.
    pub fn is_fresh(&self) -> bool {
        !matches!(self, SelectionOrigin::Existing)
    }

    /// Returns a short debug string.
    pub fn debug_status(&self) -> &'static str {
        match self {
            SelectionOrigin::Existing => "EXISTING",
            SelectionOrigin::Unused { .. } => "UNUSED",
            SelectionOrigin::Recycled { .. } => "RECYCLED",
        }
    }
}

/// The daily word for one date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub date: NaiveDate,
    pub word: String,
    pub origin: SelectionOrigin,
}

impl Selection {
    pub fn is_fresh(&self) -> bool {
        self.origin.is_fresh()
    }
}
