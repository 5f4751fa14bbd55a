//! Shared sorted-point engine backing the ring strategies.
//!
//! The continuum is a growable array of `(hash, owner)` points kept
//! sorted ascending by hash. Lookup finds the first point at or after a
//! key's hash, wrapping to the lowest point when the key hashes past the
//! highest one, which is what makes the array behave as a ring.

use crate::error::Error;
use crate::server::ServerId;

const INITIAL_CAPACITY: usize = 16;

/// One position on the ring: a hash value and the server that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Point {
    pub hash: u32,
    pub owner: ServerId,
}

/// Sorted array of points with explicit, fallible doubling growth.
///
/// Equal hashes are permitted and not deduplicated; removal
/// disambiguates them by owner. Capacity never shrinks.
#[derive(Debug)]
pub(crate) struct Continuum {
    points: Vec<Point>,
}

impl Continuum {
    pub fn new() -> Result<Continuum, Error> {
        let mut points = Vec::new();
        points.try_reserve_exact(INITIAL_CAPACITY)?;
        Ok(Continuum { points })
    }

    /// Grows capacity by doubling until `additional` more points fit.
    ///
    /// A failed growth leaves the array exactly as it was.
    pub fn reserve(&mut self, additional: usize) -> Result<(), Error> {
        let needed = self.points.len() + additional;
        if self.points.capacity() >= needed {
            return Ok(());
        }

        let mut target = self.points.capacity().max(INITIAL_CAPACITY);
        while target < needed {
            target *= 2;
        }
        self.points.try_reserve_exact(target - self.points.len())?;
        Ok(())
    }

    /// Inserts a point at its sorted position, shifting successors right.
    pub fn insert(&mut self, point: Point) -> Result<(), Error> {
        self.reserve(1)?;
        let at = self.lower_bound(point.hash);
        self.points.insert(at, point);
        Ok(())
    }

    /// Removes the point with this hash owned by `owner`, shifting
    /// successors left.
    ///
    /// Panics if no such point exists: removal is always driven by a
    /// point recorded at insertion, so a miss means the continuum and
    /// the node registry have desynchronized.
    pub fn remove(&mut self, hash: u32, owner: ServerId) {
        let mut at = self.lower_bound(hash);
        loop {
            match self.points.get(at) {
                Some(point) if point.hash == hash => {
                    if point.owner == owner {
                        break;
                    }
                    at += 1;
                }
                _ => panic!(
                    "continuum desynchronized: no point {:#010x} owned by {:?}",
                    hash, owner
                ),
            }
        }
        self.points.remove(at);
    }

    /// Returns the first point with `point.hash >= hash`, wrapping to the
    /// lowest-hash point when the query exceeds every stored hash.
    ///
    /// `None` only when the continuum is empty.
    pub fn successor(&self, hash: u32) -> Option<&Point> {
        let at = self.lower_bound(hash);
        if at == self.points.len() {
            self.points.first()
        } else {
            self.points.get(at)
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Index of the first point with `point.hash >= hash`.
    fn lower_bound(&self, hash: u32) -> usize {
        self.points.partition_point(|point| point.hash < hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(hash: u32, owner: u64) -> Point {
        Point {
            hash,
            owner: ServerId(owner),
        }
    }

    fn hashes(continuum: &Continuum) -> Vec<u32> {
        continuum.points.iter().map(|p| p.hash).collect()
    }

    #[test]
    fn test_insert_keeps_points_sorted() {
        let mut continuum = Continuum::new().unwrap();
        for (i, hash) in [50u32, 10, 30, 20, 40].iter().enumerate() {
            continuum.insert(point(*hash, i as u64)).unwrap();
        }

        assert_eq!(hashes(&continuum), vec![10, 20, 30, 40, 50]);
    }

    #[test]
    fn test_successor_returns_first_point_at_or_after() {
        let mut continuum = Continuum::new().unwrap();
        continuum.insert(point(10, 0)).unwrap();
        continuum.insert(point(20, 1)).unwrap();

        assert_eq!(continuum.successor(5).unwrap().hash, 10);
        assert_eq!(continuum.successor(10).unwrap().hash, 10);
        assert_eq!(continuum.successor(15).unwrap().hash, 20);
        assert_eq!(continuum.successor(20).unwrap().hash, 20);
    }

    #[test]
    fn test_successor_wraps_past_highest_point() {
        let mut continuum = Continuum::new().unwrap();
        continuum.insert(point(10, 0)).unwrap();
        continuum.insert(point(20, 1)).unwrap();

        let wrapped = continuum.successor(25).unwrap();
        assert_eq!(wrapped.hash, 10);
        assert_eq!(wrapped.owner, ServerId(0));

        let max = continuum.successor(u32::MAX).unwrap();
        assert_eq!(max.hash, 10);
    }

    #[test]
    fn test_successor_on_empty_continuum() {
        let continuum = Continuum::new().unwrap();
        assert!(continuum.successor(0).is_none());
    }

    #[test]
    fn test_remove_shifts_successors_left() {
        let mut continuum = Continuum::new().unwrap();
        continuum.insert(point(10, 0)).unwrap();
        continuum.insert(point(20, 1)).unwrap();
        continuum.insert(point(30, 2)).unwrap();

        continuum.remove(20, ServerId(1));
        assert_eq!(hashes(&continuum), vec![10, 30]);
    }

    #[test]
    fn test_remove_disambiguates_colliding_hashes_by_owner() {
        let mut continuum = Continuum::new().unwrap();
        continuum.insert(point(10, 0)).unwrap();
        continuum.insert(point(10, 1)).unwrap();
        continuum.insert(point(10, 2)).unwrap();

        continuum.remove(10, ServerId(1));

        assert_eq!(continuum.len(), 2);
        let owners: Vec<ServerId> = continuum.points.iter().map(|p| p.owner).collect();
        assert!(owners.contains(&ServerId(0)));
        assert!(owners.contains(&ServerId(2)));
        assert!(!owners.contains(&ServerId(1)));
    }

    #[test]
    #[should_panic(expected = "continuum desynchronized")]
    fn test_remove_of_absent_point_panics() {
        let mut continuum = Continuum::new().unwrap();
        continuum.insert(point(10, 0)).unwrap();
        continuum.remove(20, ServerId(0));
    }

    #[test]
    fn test_growth_past_initial_capacity() {
        let mut continuum = Continuum::new().unwrap();
        for hash in 0..100u32 {
            continuum.insert(point(hash, hash as u64)).unwrap();
        }

        assert_eq!(continuum.len(), 100);
        assert_eq!(hashes(&continuum), (0..100).collect::<Vec<u32>>());
    }

    #[test]
    fn test_reserve_for_bulk_insert() {
        let mut continuum = Continuum::new().unwrap();
        continuum.reserve(160).unwrap();
        for hash in 0..160u32 {
            continuum.insert(point(hash, 0)).unwrap();
        }
        assert_eq!(continuum.len(), 160);
    }
}
