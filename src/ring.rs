//! A consistent hash ring with one continuum point per server.
//!
//! Each server contributes a single point on the continuum, derived from
//! the digest of its name. A key is mapped to the server owning the
//! nearest point at or after the key's hash, wrapping around to the
//! lowest point. Adding or removing a server therefore remaps only the
//! keys falling on the arc it owned, ~1/N of the keyspace for N servers.

use fxhash::FxHashMap;
use tracing::debug;

use crate::continuum::{Continuum, Point};
use crate::digest::{digest_to_u32, DigestProvider, Md5};
use crate::error::Error;
use crate::server::{Server, ServerId};

struct Node {
    server: Server,
    point_hash: u32,
}

/// Classic consistent hash ring: one continuum point per server.
///
/// With a single point per server the arcs between points are uneven, so
/// per-server load can vary substantially; [`KetamaRing`](crate::KetamaRing)
/// trades larger insert/remove cost for a smoother distribution.
pub struct RingHash<D = Md5> {
    digest: D,
    continuum: Continuum,
    nodes: FxHashMap<ServerId, Node>,
    next_id: u64,
}

impl RingHash<Md5> {
    /// Creates an empty ring with the default MD5 digest provider.
    pub fn new() -> Result<RingHash, Error> {
        RingHash::with_digest(Md5)
    }
}

impl<D: DigestProvider> RingHash<D> {
    /// Creates an empty ring deriving hash points through `digest`.
    pub fn with_digest(digest: D) -> Result<RingHash<D>, Error> {
        Ok(RingHash {
            digest,
            continuum: Continuum::new()?,
            nodes: FxHashMap::default(),
            next_id: 0,
        })
    }

    /// Adds a server and returns its handle.
    ///
    /// Fails with [`Error::NameTooLong`] if `name` exceeds
    /// [`MAX_NAME_LEN`](crate::MAX_NAME_LEN) bytes, or with
    /// [`Error::Allocation`] if the continuum could not grow; either way
    /// the ring is unchanged.
    pub fn add_server(&mut self, name: &str) -> Result<ServerId, Error> {
        let server = Server::new(name)?;
        let hash = digest_to_u32(&self.digest.digest(name.as_bytes()));

        let id = ServerId(self.next_id);
        self.continuum.insert(Point { hash, owner: id })?;
        self.nodes.insert(id, Node { server, point_hash: hash });
        self.next_id += 1;

        debug!("added server {} to ring (point {:#010x})", name, hash);
        Ok(id)
    }

    /// Removes a server, dropping it and its continuum point.
    ///
    /// Fails with [`Error::ServerNotFound`] if the handle was not issued
    /// by this ring or the server was already removed.
    pub fn del_server(&mut self, id: ServerId) -> Result<(), Error> {
        let node = self.nodes.remove(&id).ok_or(Error::ServerNotFound)?;
        self.continuum.remove(node.point_hash, id);

        debug!("removed server {} from ring", node.server.name());
        Ok(())
    }

    /// Maps a key to the server owning the first continuum point at or
    /// after the key's hash.
    ///
    /// Pure read path. Fails with [`Error::EmptyRing`] if no servers are
    /// present.
    pub fn get_server<K: AsRef<[u8]>>(&self, key: K) -> Result<&Server, Error> {
        let hash = digest_to_u32(&self.digest.digest(key.as_ref()));
        let point = self.continuum.successor(hash).ok_or(Error::EmptyRing)?;
        match self.nodes.get(&point.owner) {
            Some(node) => Ok(&node.server),
            None => panic!(
                "continuum point owner {:?} missing from node registry",
                point.owner
            ),
        }
    }

    /// Looks up a server by handle.
    pub fn server(&self, id: ServerId) -> Option<&Server> {
        self.nodes.get(&id).map(|node| &node.server)
    }

    /// Number of servers in the ring.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the ring holds no servers.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Total number of continuum points; equals [`len`](RingHash::len)
    /// for this ring type.
    pub fn point_count(&self) -> usize {
        self.continuum.len()
    }
}
