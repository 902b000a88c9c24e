pub mod config;
pub mod detail;
pub mod error;
pub mod route;
pub mod search;
pub mod session;
pub mod watchlist;

#[cfg(test)]
pub(crate) mod testing;

/// Outcome of handing a provider response back to a state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The response was still wanted and was applied.
    Applied,
    /// The request was superseded before its response arrived; it was dropped.
    Stale,
}

impl Completion {
    pub fn is_applied(self) -> bool {
        self == Self::Applied
    }
}
