use thiserror::Error;

/// Result type returned by every codec operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure of a single encode or decode call.
///
/// Both encoding and decoding stop at the first problem they find, so a call
/// yields at most one `Error` and never a partially built frame or buffer.
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Error {
    /// The input ended before a required field could be read, or the payload
    /// is shorter than the minimum frame length allows.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,

    /// A VLAN tag carries a priority above 7 or the reserved id 4095.
    #[error("invalid VLAN tag")]
    InvalidVlan,
}
