// Copyright 2025 the Meridian Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for index construction and queries.

use thiserror::Error;

/// Axis of a bounding box.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Horizontal axis (longitude).
    X,
    /// Vertical axis (latitude).
    Y,
}

impl core::fmt::Display for Axis {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::X => "x",
            Self::Y => "y",
        })
    }
}

/// Structural problem found while loading a snapshot.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum SnapshotDefect {
    /// A node or item lacks one of `minX`, `minY`, `maxX`, `maxY`.
    #[error("missing bounding box field")]
    MissingBounds,
    /// Bounding box coordinates are NaN or inverted.
    #[error("bounding box is inverted or NaN on the {0} axis")]
    InvalidBounds(Axis),
    /// A node lacks its `leaf` flag.
    #[error("node has no leaf flag")]
    MissingLeafFlag,
    /// A node lacks its `children` array.
    #[error("node has no children array")]
    MissingChildren,
    /// A non-root node has no children.
    #[error("non-root node is empty")]
    EmptyNode,
    /// A node holds more children than the configured maximum arity.
    #[error("node has {count} children, more than the maximum of {max}")]
    Overfull {
        /// Number of children found.
        count: usize,
        /// Maximum allowed children per node.
        max: usize,
    },
    /// A leaf node contains a nested node instead of an item.
    #[error("leaf node contains a nested node")]
    NodeInLeaf,
    /// An internal node contains an item instead of a nested node.
    #[error("internal node contains an item")]
    ItemInInternalNode,
    /// An item has no `id`.
    #[error("item has no id")]
    MissingId,
    /// An item id is not a non-negative integer that fits in 32 bits.
    #[error("item id is not a valid fragment index")]
    InvalidId,
    /// The recorded `height` disagrees with the subtree below the node.
    #[error("recorded height {recorded} but subtree height is {actual}")]
    HeightMismatch {
        /// Height stored in the snapshot.
        recorded: u32,
        /// Height of the subtree as found.
        actual: u32,
    },
    /// Siblings under one internal node have different heights.
    #[error("children of one node have different heights")]
    UnbalancedChildren,
    /// A child box reaches outside of its parent's box.
    #[error("child bounding box is not contained in its parent")]
    ChildOutsideParent,
    /// Nesting exceeds the configured maximum depth.
    #[error("tree is deeper than {0} levels")]
    TooDeep(usize),
}

/// Errors produced by [`IndexGeneric`](crate::IndexGeneric) construction and queries.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum IndexError {
    /// The snapshot is structurally invalid; the index cannot be built.
    #[error("corrupt index snapshot at depth {depth}: {defect}")]
    CorruptSnapshot {
        /// What is wrong with the snapshot.
        defect: SnapshotDefect,
        /// Depth of the offending node (root = 0).
        depth: usize,
    },
    /// A query box has `min > max` (or NaN) on some axis.
    #[error("invalid bounding box: min exceeds max on the {axis} axis")]
    InvalidBoundingBox {
        /// The offending axis.
        axis: Axis,
    },
}
