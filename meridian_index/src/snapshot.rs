// Copyright 2025 the Meridian Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Loading precomputed R-tree snapshots.
//!
//! Snapshots use the layout rbush writes from `toJSON()`: every node carries
//! `children`, `height`, `leaf` and its bounds (`minX`, `minY`, `maxX`,
//! `maxY`); the children of a leaf are items with bounds and an `id`.
//!
//! ```json
//! {
//!   "children": [
//!     { "minX": -5, "minY": -5, "maxX": 5, "maxY": 5, "id": "0" },
//!     { "minX": 10, "minY": 0, "maxX": 20, "maxY": 8, "id": 1 }
//!   ],
//!   "height": 1, "leaf": true,
//!   "minX": -5, "minY": -5, "maxX": 20, "maxY": 8
//! }
//! ```
//!
//! The tree is adopted node for node, so the packing chosen when the snapshot
//! was produced is kept. Every structural property the query relies on is
//! checked while loading; anything off is reported as
//! [`IndexError::CorruptSnapshot`].

use alloc::string::String;
use alloc::vec::Vec;

use serde::Deserialize;

use crate::backends::rtree::{DEFAULT_MAX_CHILDREN, NodeIdx, RChild, RNode, RTree};
use crate::error::{IndexError, SnapshotDefect};
use crate::index::{Entry, SpatialIndex};
use crate::types::{Aabb2D, BoundingBox, FragmentId};

/// One node (or leaf item) of a serialized R-tree.
///
/// Nodes and items share a shape in the serialized form: nodes have
/// `children` and a `leaf` flag, items have an `id` instead.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotNode {
    /// Child nodes, or items when this node is a leaf. Absent on items.
    #[serde(default)]
    pub children: Option<Vec<SnapshotNode>>,
    /// Whether the children are items.
    #[serde(default)]
    pub leaf: Option<bool>,
    /// Height of the subtree rooted here (leaves are 1).
    #[serde(default)]
    pub height: Option<u32>,
    /// West edge.
    #[serde(default)]
    pub min_x: Option<f64>,
    /// South edge.
    #[serde(default)]
    pub min_y: Option<f64>,
    /// East edge.
    #[serde(default)]
    pub max_x: Option<f64>,
    /// North edge.
    #[serde(default)]
    pub max_y: Option<f64>,
    /// Fragment id of an item.
    #[serde(default)]
    pub id: Option<SnapshotId>,
}

/// Item id as written in a snapshot: either a number or a decimal string.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SnapshotId {
    /// Integer id.
    Int(i64),
    /// Floating-point id; must be integral.
    Float(f64),
    /// Decimal string id, as produced when ids are table keys.
    Text(String),
}

impl SnapshotId {
    /// Interpret the id as a fragment table index.
    pub fn to_fragment_id(&self) -> Option<FragmentId> {
        match self {
            Self::Int(v) => u32::try_from(*v).ok().map(FragmentId),
            Self::Float(v) => {
                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "the cast saturates; the round-trip check below rejects anything lossy."
                )]
                let id = *v as u32;
                (f64::from(id) == *v).then_some(FragmentId(id))
            }
            Self::Text(s) => s.trim().parse::<u32>().ok().map(FragmentId),
        }
    }
}

/// Limits applied while loading a snapshot.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SnapshotOptions {
    /// Maximum children per node. rbush defaults to 9.
    pub max_entries: usize,
    /// Maximum nesting depth accepted.
    pub max_depth: usize,
}

impl Default for SnapshotOptions {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_CHILDREN,
            max_depth: 64,
        }
    }
}

impl SpatialIndex {
    /// Build a query-ready index from a deserialized snapshot.
    ///
    /// An empty rbush tree (a leaf root without children, whose bounds were
    /// written as `null`) produces an empty index.
    pub fn from_snapshot(
        root: &SnapshotNode,
        options: &SnapshotOptions,
    ) -> Result<Self, IndexError> {
        let mut loader = Loader {
            options,
            arena: Vec::new(),
            entries: Vec::new(),
        };
        let root_idx = match &root.children {
            Some(children) if children.is_empty() => {
                if root.leaf.is_none() {
                    return Err(corrupt(SnapshotDefect::MissingLeafFlag, 0));
                }
                None
            }
            _ => Some(loader.load_node(root, 0)?.0),
        };
        let Loader { arena, entries, .. } = loader;
        let tree = RTree::from_arena(root_idx, arena, entries.len(), options.max_entries);
        tracing::debug!(
            items = entries.len(),
            height = tree.height(),
            "loaded index snapshot"
        );
        Ok(Self::from_parts(entries, tree))
    }
}

struct Loader<'a> {
    options: &'a SnapshotOptions,
    arena: Vec<RNode<f64>>,
    entries: Vec<Entry<f64, FragmentId>>,
}

impl Loader<'_> {
    /// Load `node` and its subtree, returning its arena index and height.
    fn load_node(
        &mut self,
        node: &SnapshotNode,
        depth: usize,
    ) -> Result<(NodeIdx, u32), IndexError> {
        if depth >= self.options.max_depth {
            return Err(corrupt(
                SnapshotDefect::TooDeep(self.options.max_depth),
                depth,
            ));
        }
        let children = node
            .children
            .as_ref()
            .ok_or(corrupt(SnapshotDefect::MissingChildren, depth))?;
        let leaf = node
            .leaf
            .ok_or(corrupt(SnapshotDefect::MissingLeafFlag, depth))?;
        if children.is_empty() {
            return Err(corrupt(SnapshotDefect::EmptyNode, depth));
        }
        if children.len() > self.options.max_entries {
            return Err(corrupt(
                SnapshotDefect::Overfull {
                    count: children.len(),
                    max: self.options.max_entries,
                },
                depth,
            ));
        }
        let bbox = bounds_of(node, depth)?;

        let mut out = Vec::with_capacity(children.len());
        let height = if leaf {
            for child in children {
                if child.children.is_some() {
                    return Err(corrupt(SnapshotDefect::NodeInLeaf, depth + 1));
                }
                let child_box = bounds_of(child, depth + 1)?;
                let id = child
                    .id
                    .as_ref()
                    .ok_or(corrupt(SnapshotDefect::MissingId, depth + 1))?
                    .to_fragment_id()
                    .ok_or(corrupt(SnapshotDefect::InvalidId, depth + 1))?;
                if !bbox.contains_aabb(&child_box) {
                    return Err(corrupt(SnapshotDefect::ChildOutsideParent, depth + 1));
                }
                let slot = self.entries.len();
                self.entries.push(Entry {
                    aabb: child_box,
                    payload: id,
                });
                out.push(RChild::Item {
                    slot,
                    bbox: child_box,
                });
            }
            1
        } else {
            let mut child_height = None;
            for child in children {
                if child.children.is_none() {
                    return Err(corrupt(SnapshotDefect::ItemInInternalNode, depth + 1));
                }
                let (idx, h) = self.load_node(child, depth + 1)?;
                if !bbox.contains_aabb(&self.arena[idx.get()].bbox) {
                    return Err(corrupt(SnapshotDefect::ChildOutsideParent, depth + 1));
                }
                match child_height {
                    Some(prev) if prev != h => {
                        return Err(corrupt(SnapshotDefect::UnbalancedChildren, depth));
                    }
                    _ => child_height = Some(h),
                }
                out.push(RChild::Node(idx));
            }
            child_height.unwrap_or(0) + 1
        };

        if let Some(recorded) = node.height
            && recorded != height
        {
            return Err(corrupt(
                SnapshotDefect::HeightMismatch {
                    recorded,
                    actual: height,
                },
                depth,
            ));
        }

        let idx = NodeIdx::new(self.arena.len());
        self.arena.push(RNode {
            bbox,
            leaf,
            children: out,
        });
        Ok((idx, height))
    }
}

fn bounds_of(node: &SnapshotNode, depth: usize) -> Result<BoundingBox, IndexError> {
    let (Some(min_x), Some(min_y), Some(max_x), Some(max_y)) =
        (node.min_x, node.min_y, node.max_x, node.max_y)
    else {
        return Err(corrupt(SnapshotDefect::MissingBounds, depth));
    };
    let bbox = Aabb2D::new(min_x, min_y, max_x, max_y);
    match bbox.validate() {
        Ok(()) => Ok(bbox),
        Err(IndexError::InvalidBoundingBox { axis }) => {
            Err(corrupt(SnapshotDefect::InvalidBounds(axis), depth))
        }
        Err(other) => Err(other),
    }
}

const fn corrupt(defect: SnapshotDefect, depth: usize) -> IndexError {
    IndexError::CorruptSnapshot { defect, depth }
}
