use thiserror::Error;

/// Errors surfaced by the fallible entry points of the library.
///
/// Contract violations on hot paths (e.g. asking for the parent of a cell
/// above its own level) are documented preconditions checked with
/// `debug_assert!` rather than reported through this type.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum S2Error {
    /// The 64-bit value is not a well-formed cell identifier: it is zero,
    /// its face bits exceed 5, or the level sentinel bit is missing.
    #[error("{0:#018x} is not a valid cell identifier")]
    InvalidCellId(u64),

    /// A latitude-longitude pair was outside the valid range for an
    /// operation whose contract requires validity.
    #[error("latitude/longitude ({0}, {1}) radians is outside the valid range")]
    InvalidCoordinate(f64, f64),

    /// A subdivision level outside [0, 30], or inconsistent with the
    /// operation it was passed to.
    #[error("level {0} is outside the valid range [0, 30]")]
    InvalidLevel(i32),

    /// A token that does not decode to a cell identifier.
    #[error("token {0:?} does not encode a cell identifier")]
    InvalidToken(String),
}
