// Copyright 2025 the Meridian Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The indexed map layers and what a query over them returns.

use meridian_index::{
    BoundingBox, FragmentId, IndexError, SnapshotNode, SnapshotOptions, SpatialIndex,
};

/// Spatial indexes for the two fragment layers of the map.
///
/// Built once and shared (usually behind an `Arc`) by every resolver and the
/// renderer; never mutated.
#[derive(Debug)]
pub struct MapLayers {
    /// Filled land areas.
    pub areas: SpatialIndex,
    /// Boundary lines (state and province borders).
    pub lines: SpatialIndex,
}

impl MapLayers {
    /// Pair two prebuilt indexes.
    pub fn new(areas: SpatialIndex, lines: SpatialIndex) -> Self {
        Self { areas, lines }
    }

    /// Load both layers from their snapshots.
    pub fn from_snapshots(
        areas: &SnapshotNode,
        lines: &SnapshotNode,
        options: &SnapshotOptions,
    ) -> Result<Self, IndexError> {
        Ok(Self {
            areas: SpatialIndex::from_snapshot(areas, options)?,
            lines: SpatialIndex::from_snapshot(lines, options)?,
        })
    }

    /// Fragments of both layers whose boxes intersect `bbox`.
    pub fn query(&self, bbox: BoundingBox) -> Result<VisibilityResult, IndexError> {
        Ok(VisibilityResult {
            areas: self.areas.query_rect(bbox)?.map(|(id, _)| id).collect(),
            lines: self.lines.query_rect(bbox)?.map(|(id, _)| id).collect(),
        })
    }
}

/// Fragment ids to draw, per layer.
///
/// Ids come in index traversal order, which is the same for the same index
/// and box.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VisibilityResult {
    /// Visible area fragments.
    pub areas: Vec<FragmentId>,
    /// Visible line fragments.
    pub lines: Vec<FragmentId>,
}

impl VisibilityResult {
    /// Whether nothing is visible.
    pub fn is_empty(&self) -> bool {
        self.areas.is_empty() && self.lines.is_empty()
    }

    /// Total number of visible fragments.
    pub fn len(&self) -> usize {
        self.areas.len() + self.lines.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meridian_index::Aabb2D;

    #[test]
    fn both_layers_are_queried_with_the_same_box() {
        let layers = MapLayers::new(
            SpatialIndex::bulk(&[
                (Aabb2D::new(-5.0, -5.0, 5.0, 5.0), FragmentId(0)),
                (Aabb2D::new(50.0, 0.0, 60.0, 10.0), FragmentId(1)),
            ]),
            SpatialIndex::bulk(&[(Aabb2D::new(4.0, -1.0, 4.0, 1.0), FragmentId(9))]),
        );
        let r = layers.query(Aabb2D::new(0.0, 0.0, 10.0, 10.0)).unwrap();
        assert_eq!(r.areas, [FragmentId(0)]);
        assert_eq!(r.lines, [FragmentId(9)]);
        assert_eq!(r.len(), 2);

        let empty = layers.query(Aabb2D::new(100.0, 0.0, 110.0, 1.0)).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn inverted_box_fails_the_query() {
        let layers = MapLayers::new(SpatialIndex::bulk(&[]), SpatialIndex::bulk(&[]));
        assert!(matches!(
            layers.query(Aabb2D::new(1.0, 0.0, 0.0, 1.0)),
            Err(IndexError::InvalidBoundingBox { .. })
        ));
    }
}
