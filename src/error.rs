use thiserror::Error;

/// Errors surfaced by the table detection and reconstruction engine.
///
/// Degenerate input (too few dividers, a grid that simplifies below 3x3) is
/// *not* an error: `detect_tables` simply reports that no table was found.
/// These variants cover the cases spec.md §7 calls out as genuine failures.
#[derive(Error, Debug)]
pub enum ReconError {
    /// A scratch allocation (projection list, cell grid, `sent` matrix)
    /// could not be made. The page is left unmodified.
    #[error("allocation failed: {0}")]
    Allocation(String),

    /// A structural invariant the engine relies on did not hold on entry:
    /// sibling indices not strictly increasing, a bounding rectangle
    /// inconsistent with its children, or similar tree malformation.
    #[error("page tree invariant violated: {0}")]
    InvariantViolation(String),

    /// Internal logic error: a code path the algorithm's invariants should
    /// make unreachable was reached anyway.
    #[error("internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, ReconError>;
