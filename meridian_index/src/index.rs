// Copyright 2025 the Meridian Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public index API and generic implementation over a pluggable backend.

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::backend::Backend;
use crate::backends::flatvec::FlatVec;
use crate::backends::rtree::RTreeF64;
use crate::error::IndexError;
use crate::types::{Aabb2D, FragmentId};

#[derive(Clone, Debug)]
pub(crate) struct Entry<T, P> {
    pub(crate) aabb: Aabb2D<T>,
    pub(crate) payload: P,
}

/// An immutable AABB index parameterized by a spatial backend.
///
/// Entries are fixed at construction; there is no insert or remove. Queries
/// hand back `(payload, aabb)` pairs.
#[derive(Debug)]
pub struct IndexGeneric<T: Copy + PartialOrd + Debug, P: Copy + Debug, B: Backend<T>> {
    entries: Vec<Entry<T, P>>,
    backend: B,
}

impl<T, P, B> IndexGeneric<T, P, B>
where
    T: Copy + PartialOrd + Debug,
    P: Copy + Debug,
    B: Backend<T>,
{
    /// Build an index in bulk from `(aabb, payload)` entries.
    pub fn bulk(entries: &[(Aabb2D<T>, P)]) -> Self {
        let mut stored = Vec::with_capacity(entries.len());
        let mut pairs: Vec<(usize, Aabb2D<T>)> = Vec::with_capacity(entries.len());
        for (i, (aabb, payload)) in entries.iter().copied().enumerate() {
            stored.push(Entry { aabb, payload });
            pairs.push((i, aabb));
        }
        Self {
            backend: B::build(&pairs),
            entries: stored,
        }
    }

    /// Assemble an index from pre-built parts. Slots in `backend` refer to `entries`.
    pub(crate) fn from_parts(entries: Vec<Entry<T, P>>, backend: B) -> Self {
        Self { entries, backend }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate all entries in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (P, Aabb2D<T>)> + '_ {
        self.entries.iter().map(|e| (e.payload, e.aabb))
    }

    /// Access the spatial backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Query for entries whose AABB intersects the given rectangle.
    ///
    /// Touching boundaries count as intersecting and degenerate rectangles
    /// (zero width or height) are allowed. A rectangle with `min > max` on
    /// either axis, or with NaN coordinates, is rejected.
    pub fn query_rect(
        &self,
        rect: Aabb2D<T>,
    ) -> Result<impl Iterator<Item = (P, Aabb2D<T>)> + '_, IndexError> {
        rect.validate()?;
        let slots = self.backend.query_rect(rect);
        Ok(slots.filter_map(|i| self.entries.get(i).map(|e| (e.payload, e.aabb))))
    }
}

/// Linear-scan index; the brute-force reference.
pub type Index<T, P> = IndexGeneric<T, P, FlatVec<T>>;

/// R-tree index over geographic fragment boxes, as loaded from snapshots.
pub type SpatialIndex = IndexGeneric<f64, FragmentId, RTreeF64>;

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn bulk_then_query() {
        let idx: Index<f64, u32> = Index::bulk(&[
            (Aabb2D::new(0.0, 0.0, 10.0, 10.0), 1),
            (Aabb2D::new(5.0, 5.0, 15.0, 15.0), 2),
        ]);
        assert_eq!(idx.len(), 2);
        let hits: Vec<_> = idx
            .query_rect(Aabb2D::new(12.0, 12.0, 20.0, 20.0))
            .unwrap()
            .collect();
        assert_eq!(hits, vec![(2, Aabb2D::new(5.0, 5.0, 15.0, 15.0))]);
    }

    #[test]
    fn inverted_query_is_rejected() {
        let idx: SpatialIndex =
            SpatialIndex::bulk(&[(Aabb2D::new(-5.0, -5.0, 5.0, 5.0), FragmentId(0))]);
        let err = idx
            .query_rect(Aabb2D::new(1.0, 0.0, -1.0, 1.0))
            .err()
            .unwrap();
        assert!(matches!(err, IndexError::InvalidBoundingBox { .. }));
    }

    #[test]
    fn degenerate_query_hits_containing_box() {
        let idx = SpatialIndex::bulk(&[
            (Aabb2D::new(-5.0, -5.0, 5.0, 5.0), FragmentId(7)),
            (Aabb2D::new(20.0, 20.0, 30.0, 30.0), FragmentId(8)),
        ]);
        let hits: Vec<_> = idx
            .query_rect(Aabb2D::new(0.0, 0.0, 0.0, 0.0))
            .unwrap()
            .map(|(id, _)| id)
            .collect();
        assert_eq!(hits, vec![FragmentId(7)]);
    }

    #[test]
    fn rtree_and_flat_agree_on_payloads() {
        let entries: Vec<_> = (0..200_u32)
            .map(|i| {
                let x = f64::from(i % 20) * 18.0 - 180.0;
                let y = f64::from(i / 20) * 18.0 - 90.0;
                (Aabb2D::new(x, y, x + 12.0, y + 12.0), FragmentId(i))
            })
            .collect();
        let tree = SpatialIndex::bulk(&entries);
        let flat: Index<f64, FragmentId> = Index::bulk(&entries);
        let q = Aabb2D::new(-40.0, -30.0, 25.0, 44.0);
        let mut a: Vec<_> = tree.query_rect(q).unwrap().map(|(id, _)| id).collect();
        let mut b: Vec<_> = flat.query_rect(q).unwrap().map(|(id, _)| id).collect();
        a.sort_unstable();
        b.sort_unstable();
        assert!(!a.is_empty());
        assert_eq!(a, b);
    }
}
