/// Pagination state definitions for one query's traversal
///
/// A query starts in `Scanning { page: 1 }`, alternates between scanning and
/// advancing, and ends in exactly one `Done` state.
use std::fmt;

/// Why a query's traversal ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DoneReason {
    /// Enough deals were accepted for this query
    TargetMet,

    /// The per-query page cap was reached
    PageCapReached,

    /// No enabled "next page" control on the last page
    NoNextPage,

    /// The next page did not finish loading in time
    ResultsTimeout,

    /// The next page failed to load for another reason
    AdvanceFailed,
}

impl DoneReason {
    /// Short kebab-case label used in logs and the run summary
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TargetMet => "target-met",
            Self::PageCapReached => "page-cap-reached",
            Self::NoNextPage => "no-next-page",
            Self::ResultsTimeout => "results-timeout",
            Self::AdvanceFailed => "advance-failed",
        }
    }

    /// Returns true if the traversal ended because of a navigation problem
    /// rather than a normal stopping condition
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::ResultsTimeout | Self::AdvanceFailed)
    }
}

impl fmt::Display for DoneReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Position of the pagination controller in its cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaginationState {
    /// Waiting for and extracting the listings of `page`
    Scanning { page: u32 },

    /// Moving from page `from` to the next one
    Advancing { from: u32 },

    /// Terminal: no further work for this query
    Done(DoneReason),
}

impl PaginationState {
    /// The state every traversal starts in
    pub fn start() -> Self {
        Self::Scanning { page: 1 }
    }
}

impl fmt::Display for PaginationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scanning { page } => write!(f, "scanning(page={})", page),
            Self::Advancing { from } => write!(f, "advancing(from={})", from),
            Self::Done(reason) => write!(f, "done({})", reason),
        }
    }
}
