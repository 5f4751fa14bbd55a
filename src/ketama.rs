//! A ketama-style ring with many virtual points per server.
//!
//! Each server contributes [`POINTS_PER_SERVER`] points to the continuum,
//! one per virtual replica, each derived from the digest of a
//! `"<name>-<replica>"` label. The larger point count evens out the arc
//! lengths between servers, so per-server key share concentrates around
//! 1/N instead of varying with the luck of a single placement.

use fxhash::FxHashMap;
use tracing::debug;

use crate::continuum::{Continuum, Point};
use crate::digest::{digest_to_u32, DigestProvider, Md5};
use crate::error::Error;
use crate::server::{Server, ServerId};

/// Number of continuum points contributed by each server.
pub const POINTS_PER_SERVER: usize = 160;

struct Node {
    server: Server,
    point_hashes: Vec<u32>,
}

/// Consistent hash ring with [`POINTS_PER_SERVER`] virtual points per
/// server.
///
/// Lookup is identical to [`RingHash`](crate::RingHash), just over a
/// larger continuum; insert and remove touch 160 points per server.
pub struct KetamaRing<D = Md5> {
    digest: D,
    continuum: Continuum,
    nodes: FxHashMap<ServerId, Node>,
    next_id: u64,
}

impl KetamaRing<Md5> {
    /// Creates an empty ring with the default MD5 digest provider.
    pub fn new() -> Result<KetamaRing, Error> {
        KetamaRing::with_digest(Md5)
    }
}

impl<D: DigestProvider> KetamaRing<D> {
    /// Creates an empty ring deriving hash points through `digest`.
    pub fn with_digest(digest: D) -> Result<KetamaRing<D>, Error> {
        Ok(KetamaRing {
            digest,
            continuum: Continuum::new()?,
            nodes: FxHashMap::default(),
            next_id: 0,
        })
    }

    /// Adds a server, inserting all of its virtual points, and returns
    /// its handle.
    ///
    /// Fails with [`Error::NameTooLong`] if `name` exceeds
    /// [`MAX_NAME_LEN`](crate::MAX_NAME_LEN) bytes, or with
    /// [`Error::Allocation`] if the continuum could not grow. Capacity
    /// for every point is reserved before the first insert, so a failure
    /// leaves the ring unchanged.
    pub fn add_server(&mut self, name: &str) -> Result<ServerId, Error> {
        let server = Server::new(name)?;
        self.continuum.reserve(POINTS_PER_SERVER)?;

        let id = ServerId(self.next_id);
        let mut point_hashes = Vec::with_capacity(POINTS_PER_SERVER);
        for replica in 0..POINTS_PER_SERVER {
            let label = format!("{}-{}", name, replica);
            let hash = digest_to_u32(&self.digest.digest(label.as_bytes()));
            self.continuum.insert(Point { hash, owner: id })?;
            point_hashes.push(hash);
        }

        self.nodes.insert(id, Node { server, point_hashes });
        self.next_id += 1;

        debug!(
            "added server {} to ketama ring ({} points)",
            name, POINTS_PER_SERVER
        );
        Ok(id)
    }

    /// Removes a server, dropping it and all of its virtual points.
    ///
    /// Points are removed in replica order; removal cannot fail once the
    /// node is found, so deletion is all-or-nothing. Fails with
    /// [`Error::ServerNotFound`] if the handle was not issued by this
    /// ring or the server was already removed.
    pub fn del_server(&mut self, id: ServerId) -> Result<(), Error> {
        let node = self.nodes.remove(&id).ok_or(Error::ServerNotFound)?;
        for hash in node.point_hashes {
            self.continuum.remove(hash, id);
        }

        debug!("removed server {} from ketama ring", node.server.name());
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

    /// Total number of continuum points; equals
    /// [`len`](KetamaRing::len) × [`POINTS_PER_SERVER`].
    pub fn point_count(&self) -> usize {
        self.continuum.len()
    }
}
