//! Server identity records and handles.

use crate::error::Error;

/// Maximum server name length in bytes.
pub const MAX_NAME_LEN: usize = 256;

/// Stable handle identifying a server within one ring instance.
///
/// Handles are allocated from a per-ring monotonic counter and never
/// reused, so a stale handle after removal fails with
/// [`Error::ServerNotFound`](crate::Error::ServerNotFound) rather than
/// aliasing a newer server. A handle is only meaningful to the ring that
/// returned it. For [`JumpHash`](crate::JumpHash) the handle value is the
/// server's bucket index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ServerId(pub(crate) u64);

/// A named server held by a ring.
///
/// Servers are owned by the ring that created them and dropped when
/// removed from it, or when the ring itself is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Server {
    name: String,
    shard_id: Option<u64>,
}

impl Server {
    pub(crate) fn new(name: &str) -> Result<Server, Error> {
        if name.len() > MAX_NAME_LEN {
            return Err(Error::NameTooLong(name.len()));
        }

        Ok(Server {
            name: name.to_string(),
            shard_id: None,
        })
    }

    pub(crate) fn with_shard_id(name: &str, shard_id: u64) -> Result<Server, Error> {
        let mut server = Server::new(name)?;
        server.shard_id = Some(shard_id);
        Ok(server)
    }

    /// The name the server was added under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The server's bucket index. Assigned only by
    /// [`JumpHash`](crate::JumpHash); `None` for the ring types.
    pub fn shard_id(&self) -> Option<u64> {
        self.shard_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_at_bound_is_accepted() {
        let name = "a".repeat(MAX_NAME_LEN);
        let server = Server::new(&name).expect("name at the bound should be accepted");
        assert_eq!(server.name().len(), MAX_NAME_LEN);
        assert_eq!(server.shard_id(), None);
    }

    #[test]
    fn test_name_over_bound_is_rejected() {
        let name = "a".repeat(MAX_NAME_LEN + 1);
        let result = Server::new(&name);
        assert_eq!(result.unwrap_err(), Error::NameTooLong(MAX_NAME_LEN + 1));
    }

    #[test]
    fn test_shard_id_round_trip() {
        let server = Server::with_shard_id("10.0.0.1:11211", 7).unwrap();
        assert_eq!(server.shard_id(), Some(7));
        assert_eq!(server.name(), "10.0.0.1:11211");
    }
}
