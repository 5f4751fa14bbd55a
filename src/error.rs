use std::collections::TryReserveError;
use std::fmt;

use crate::server::MAX_NAME_LEN;

/// Error type for ring operations.
///
/// Every variant is a local, recoverable condition: the operation that
/// produced it left the ring unchanged.
#[derive(Debug)]
pub enum Error {
    /// Server name exceeds [`MAX_NAME_LEN`] bytes. Carries the offending
    /// length.
    NameTooLong(usize),
    /// Backing storage could not grow. The operation was a no-op.
    Allocation(TryReserveError),
    /// The server handle was not issued by this ring, or the server has
    /// already been removed.
    ServerNotFound,
    /// Lookup attempted on a ring with no servers.
    EmptyRing,
}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::NameTooLong(l1), Self::NameTooLong(l2)) => l1 == l2,
            (Self::Allocation(_), Self::Allocation(_)) => true,
            (Self::ServerNotFound, Self::ServerNotFound) => true,
            (Self::EmptyRing, Self::EmptyRing) => true,
            _ => false,
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Allocation(ref e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::NameTooLong(len) => {
                write!(f, "name too long: {} bytes (max {})", len, MAX_NAME_LEN)
            }
            Self::Allocation(e) => write!(f, "allocation: {}", e),
            Self::ServerNotFound => write!(f, "server not found in this ring"),
            Self::EmptyRing => write!(f, "ring has no servers"),
        }
    }
}

impl From<TryReserveError> for Error {
    fn from(e: TryReserveError) -> Self {
        Error::Allocation(e)
    }
}
