// Copyright 2025 the Meridian Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=meridian_index --heading-base-level=0

//! Meridian Index: an immutable 2D AABB index for map fragments.
//!
//! Map layers (areas, lines) are split into fragments, each with a geographic
//! bounding box and an id into an external geometry table. This crate indexes
//! those boxes and answers "which fragments touch this box?".
//!
//! - Build an index in bulk from `(aabb, payload)` pairs with [`IndexGeneric::bulk`].
//! - Adopt a precomputed rbush-style snapshot with [`SpatialIndex::from_snapshot`].
//! - Query by rectangle with [`IndexGeneric::query_rect`]; touching edges count.
//!
//! Indexes never change after construction, so they can be shared freely
//! between readers.
//!
//! # Example
//!
//! ```rust
//! use meridian_index::{Aabb2D, FragmentId, SpatialIndex};
//!
//! let idx = SpatialIndex::bulk(&[
//!     (Aabb2D::new(-5.0, -5.0, 5.0, 5.0), FragmentId(0)),
//!     (Aabb2D::new(100.0, 10.0, 120.0, 30.0), FragmentId(1)),
//! ]);
//!
//! let hits: Vec<_> = idx
//!     .query_rect(Aabb2D::new(-1.0, -1.0, 1.0, 1.0))
//!     .unwrap()
//!     .map(|(id, _)| id)
//!     .collect();
//! assert_eq!(hits, [FragmentId(0)]);
//! ```
//!
//! ## Choosing a backend
//!
//! - `FlatVec`: linear scans. Handy as a reference and for a handful of boxes.
//! - `RTreeF32`/`RTreeF64`: packed R-tree built with Sort-Tile-Recursive (or
//!   adopted from a snapshot). [`SpatialIndex`] uses `RTreeF64`.
//!
//! ### Float semantics
//!
//! Stored boxes are assumed free of NaN. Query rectangles are validated and an
//! inverted or NaN rectangle is rejected with [`IndexError::InvalidBoundingBox`].

#![no_std]

extern crate alloc;

pub mod backend;
pub mod backends;
pub mod error;
pub mod index;
pub mod snapshot;
pub mod types;

pub use backend::Backend;
pub use backends::flatvec::FlatVec;
pub use backends::rtree::{DEFAULT_MAX_CHILDREN, RTree, RTreeF32, RTreeF64};
pub use error::{Axis, IndexError, SnapshotDefect};
pub use index::{Index, IndexGeneric, SpatialIndex};
pub use snapshot::{SnapshotId, SnapshotNode, SnapshotOptions};
pub use types::{Aabb2D, BoundingBox, FragmentId, Scalar};

#[cfg(test)]
mod tests {
    use super::*;
    #[allow(unused_imports, reason = "some serde_json versions expand json! arrays to a bare vec!")]
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn bulk_and_snapshot_agree() {
        let snapshot: SnapshotNode = serde_json::from_value(serde_json::json!({
            "children": [
                { "minX": -5.0, "minY": -5.0, "maxX": 5.0, "maxY": 5.0, "id": 0 },
                { "minX": 100.0, "minY": 10.0, "maxX": 120.0, "maxY": 30.0, "id": 1 }
            ],
            "height": 1, "leaf": true,
            "minX": -5.0, "minY": -5.0, "maxX": 120.0, "maxY": 30.0
        }))
        .unwrap();
        let loaded = SpatialIndex::from_snapshot(&snapshot, &SnapshotOptions::default()).unwrap();
        let built = SpatialIndex::bulk(&[
            (Aabb2D::new(-5.0, -5.0, 5.0, 5.0), FragmentId(0)),
            (Aabb2D::new(100.0, 10.0, 120.0, 30.0), FragmentId(1)),
        ]);

        let q = Aabb2D::new(0.0, 0.0, 110.0, 12.0);
        let mut a: Vec<_> = loaded.query_rect(q).unwrap().collect();
        let mut b: Vec<_> = built.query_rect(q).unwrap().collect();
        a.sort_by_key(|(id, _)| *id);
        b.sort_by_key(|(id, _)| *id);
        assert_eq!(a.len(), 2);
        assert_eq!(a, b);
    }
}
