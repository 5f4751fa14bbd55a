//! Consistent hashing rings for sharding keys across named servers.
//!
//! Three interchangeable strategies map arbitrary byte-string keys onto a
//! dynamic set of servers so that adding or removing a server remaps only
//! a small fraction of keys:
//!
//! - [`RingHash`]: a sorted continuum of hash points over the space
//!   `0x00000000..=0xFFFFFFFF`, one point per server. A key is routed to
//!   the server owning the nearest point at or after the key's hash,
//!   wrapping to the lowest point.
//! - [`KetamaRing`]: the same continuum with [`POINTS_PER_SERVER`]
//!   virtual points per server, which smooths out per-server load at the
//!   cost of larger insert/remove work.
//! - [`JumpHash`]: a stateless bucket function over a dense, add-only
//!   table; no continuum at all.
//!
//! Hash points and key hashes are derived from an injected 16-byte
//! digest ([`DigestProvider`], MD5 by default) reduced to an integer
//! with a fixed byte order, so the provider can be swapped without
//! silently changing placements.
//!
//! ```
//! use consistent_ring::RingHash;
//!
//! let mut ring = RingHash::new()?;
//! let id = ring.add_server("1.1.1.1:1111")?;
//!
//! let server = ring.get_server("test_key")?;
//! assert_eq!(server.name(), "1.1.1.1:1111");
//!
//! ring.del_server(id)?;
//! # Ok::<(), consistent_ring::Error>(())
//! ```
//!
//! Rings are single-owner structures: mutation takes `&mut self`,
//! lookups take `&self`, and no internal synchronization is provided.
#![deny(warnings, missing_docs)]

mod continuum;
mod digest;
mod error;
mod jump;
mod ketama;
mod ring;
mod server;

pub use self::digest::{DigestProvider, Md5};
pub use self::error::Error;
pub use self::jump::JumpHash;
pub use self::ketama::{KetamaRing, POINTS_PER_SERVER};
pub use self::ring::RingHash;
pub use self::server::{Server, ServerId, MAX_NAME_LEN};
