//! The error type of the API crate.
//!
//! Only the host bridge can actually fail on this side of the project, so
//! the variants below are mostly wrappers that let bridge failures travel
//! through the engine with the `?` operator. The engine defines its own,
//! richer error enum and embeds [`APIError`] in it via `#[from]`.

use std::io;
use thiserror::Error;

/// Error type used in the API crate.
///
/// The `#[error]` tag derives the `Display` implementation per variant; the
/// `#[from]` tag generates the `From` conversions that make `?` work on
/// `io::Result` values inside the bridge.
#[derive(Error, Debug)]
pub enum APIError {
    /// IO failure while reading or writing a host file
    #[error("issue using IO in the host bridge")]
    BridgeIO(#[from] io::Error),

    /// Escape hatch for errors outside the fixed variants above.
    /// Handy for quickly drafting client code; avoid matching on it.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Generic alias for a `Result` with the error type `APIError`.
pub type Result<T> = std::result::Result<T, APIError>;
