// Copyright 2025 the Meridian Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Packed, read-only R-tree backend generic over scalar `T: Scalar`.

use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;

use crate::backend::Backend;
use crate::types::{Aabb2D, Scalar, union_aabb};

/// Default maximum number of children per node, matching rbush.
pub const DEFAULT_MAX_CHILDREN: usize = 9;

/// R-tree backend over an arena of nodes.
///
/// The tree never changes after it is built. It is either packed with an
/// STR-like bulk pass ([`Backend::build`]) or adopted node-for-node from a
/// snapshot ([`crate::snapshot`]).
pub struct RTree<T: Scalar> {
    max_children: usize,
    root: Option<NodeIdx>,
    arena: Vec<RNode<T>>,
    items: usize,
}

#[derive(Clone, Debug)]
pub(crate) struct RNode<T: Scalar> {
    pub(crate) bbox: Aabb2D<T>,
    pub(crate) leaf: bool,
    pub(crate) children: Vec<RChild<T>>,
}

#[derive(Clone, Debug)]
pub(crate) enum RChild<T: Scalar> {
    Node(NodeIdx),
    Item { slot: usize, bbox: Aabb2D<T> },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeIdx(usize);

impl NodeIdx {
    pub(crate) const fn new(i: usize) -> Self {
        Self(i)
    }

    pub(crate) const fn get(self) -> usize {
        self.0
    }
}

impl<T: Scalar> Default for RTree<T> {
    fn default() -> Self {
        Self {
            max_children: DEFAULT_MAX_CHILDREN,
            root: None,
            arena: Vec::new(),
            items: 0,
        }
    }
}

impl<T: Scalar> RTree<T> {
    /// Adopt an arena that was assembled elsewhere (snapshot loading).
    pub(crate) fn from_arena(
        root: Option<NodeIdx>,
        arena: Vec<RNode<T>>,
        items: usize,
        max_children: usize,
    ) -> Self {
        Self {
            max_children,
            root,
            arena,
            items,
        }
    }

    /// Number of items stored in the tree.
    pub fn len(&self) -> usize {
        self.items
    }

    /// Whether the tree holds no items.
    pub fn is_empty(&self) -> bool {
        self.items == 0
    }

    /// Number of levels from the root down to the leaves (0 for an empty tree).
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut cursor = self.root;
        while let Some(idx) = cursor {
            height += 1;
            let node = &self.arena[idx.get()];
            cursor = if node.leaf {
                None
            } else {
                node.children.iter().find_map(|c| match c {
                    RChild::Node(i) => Some(*i),
                    RChild::Item { .. } => None,
                })
            };
        }
        height
    }

    /// Bounding box of everything in the tree, if non-empty.
    pub fn bounds(&self) -> Option<Aabb2D<T>> {
        self.root.map(|r| self.arena[r.get()].bbox)
    }

    #[inline]
    fn ceil_div(a: usize, b: usize) -> usize {
        a.div_ceil(b)
    }

    fn centroid_x_of_aabb(a: &Aabb2D<T>) -> T {
        Scalar::mid(a.min_x, a.max_x)
    }

    fn centroid_y_of_aabb(a: &Aabb2D<T>) -> T {
        Scalar::mid(a.min_y, a.max_y)
    }

    /// Smallest `g` with `g * g >= n`: the number of vertical STR slices.
    fn slice_count(n: usize) -> usize {
        let mut gx = 1_usize;
        while gx * gx < n {
            gx += 1;
        }
        gx
    }

    /// STR-like bulk builder: creates a packed tree from items in one pass into `arena`.
    fn bulk_build_nodes(
        arena: &mut Vec<RNode<T>>,
        items: &mut [(usize, Aabb2D<T>)],
        max_children: usize,
    ) -> Option<NodeIdx> {
        if items.is_empty() {
            return None;
        }

        // Build leaf level (as node indices in the arena)
        let n = items.len();
        let gx = Self::slice_count(Self::ceil_div(n, max_children));
        items.sort_by(|a, b| {
            Self::centroid_x_of_aabb(&a.1)
                .partial_cmp(&Self::centroid_x_of_aabb(&b.1))
                .unwrap_or(core::cmp::Ordering::Equal)
        });
        let slice_size = Self::ceil_div(n, gx);
        let mut leaves: Vec<usize> = Vec::new();
        for slice in items.chunks_mut(slice_size) {
            slice.sort_by(|a, b| {
                Self::centroid_y_of_aabb(&a.1)
                    .partial_cmp(&Self::centroid_y_of_aabb(&b.1))
                    .unwrap_or(core::cmp::Ordering::Equal)
            });
            for chunk in slice.chunks(max_children) {
                let children: Vec<RChild<T>> = chunk
                    .iter()
                    .map(|&(slot, bbox)| RChild::Item { slot, bbox })
                    .collect();
                let bbox = Self::node_bbox(arena, &children);
                leaves.push(arena.len());
                arena.push(RNode {
                    bbox,
                    leaf: true,
                    children,
                });
            }
        }

        // Promote until a single root remains
        let mut level: Vec<usize> = leaves;
        while level.len() > max_children {
            let n_nodes = level.len();
            let gx = Self::slice_count(Self::ceil_div(n_nodes, max_children));
            level.sort_by(|&a, &b| {
                Self::centroid_x_of_aabb(&arena[a].bbox)
                    .partial_cmp(&Self::centroid_x_of_aabb(&arena[b].bbox))
                    .unwrap_or(core::cmp::Ordering::Equal)
            });
            let slice_size = Self::ceil_div(n_nodes, gx);
            let mut next: Vec<usize> = Vec::new();
            for slice in level.chunks_mut(slice_size) {
                slice.sort_by(|&a, &b| {
                    Self::centroid_y_of_aabb(&arena[a].bbox)
                        .partial_cmp(&Self::centroid_y_of_aabb(&arena[b].bbox))
                        .unwrap_or(core::cmp::Ordering::Equal)
                });
                for chunk in slice.chunks(max_children) {
                    let children: Vec<RChild<T>> = chunk
                        .iter()
                        .map(|&idx| RChild::Node(NodeIdx::new(idx)))
                        .collect();
                    let bbox = Self::node_bbox(arena, &children);
                    next.push(arena.len());
                    arena.push(RNode {
                        bbox,
                        leaf: false,
                        children,
                    });
                }
            }
            level = next;
        }

        // Create root
        if level.len() == 1 {
            Some(NodeIdx::new(level[0]))
        } else {
            // Pack remaining nodes under a new root
            let children: Vec<RChild<T>> = level
                .into_iter()
                .map(|idx| RChild::Node(NodeIdx::new(idx)))
                .collect();
            let bbox = Self::node_bbox(arena, &children);
            let root_idx = arena.len();
            arena.push(RNode {
                bbox,
                leaf: false,
                children,
            });
            Some(NodeIdx::new(root_idx))
        }
    }

    /// Build an `RTree` with a custom node arity from a set of (slot, bbox) pairs.
    pub fn bulk_build_with_arity(pairs: &[(usize, Aabb2D<T>)], max_children: usize) -> Self {
        let max_children = max_children.max(2);
        let mut items = pairs.to_vec();
        let mut arena: Vec<RNode<T>> = Vec::new();
        let root = Self::bulk_build_nodes(&mut arena, &mut items[..], max_children);
        Self {
            max_children,
            root,
            arena,
            items: pairs.len(),
        }
    }

    pub(crate) fn node_bbox(arena: &[RNode<T>], children: &[RChild<T>]) -> Aabb2D<T> {
        let mut it = children.iter();
        let first = match it.next() {
            Some(RChild::Node(i)) => arena[i.get()].bbox,
            Some(RChild::Item { bbox, .. }) => *bbox,
            None => Aabb2D::new(T::zero(), T::zero(), T::zero(), T::zero()),
        };
        it.fold(first, |acc, c| match c {
            RChild::Node(i) => union_aabb(acc, arena[i.get()].bbox),
            RChild::Item { bbox, .. } => union_aabb(acc, *bbox),
        })
    }
}

impl<T: Scalar> Backend<T> for RTree<T> {
    fn build(items: &[(usize, Aabb2D<T>)]) -> Self {
        Self::bulk_build_with_arity(items, DEFAULT_MAX_CHILDREN)
    }

    fn query_rect<'a>(&'a self, rect: Aabb2D<T>) -> Box<dyn Iterator<Item = usize> + 'a> {
        let mut out = Vec::new();
        let Some(root_idx) = self.root else {
            return Box::new(out.into_iter());
        };
        let mut stack = vec![root_idx];
        while let Some(i) = stack.pop() {
            let n = &self.arena[i.get()];
            if !n.bbox.intersects(&rect) {
                continue;
            }
            if n.leaf {
                for c in &n.children {
                    if let RChild::Item { slot, bbox } = c
                        && bbox.intersects(&rect)
                    {
                        out.push(*slot);
                    }
                }
            } else {
                for c in &n.children {
                    if let RChild::Node(ci) = c {
                        stack.push(*ci);
                    }
                }
            }
        }
        Box::new(out.into_iter())
    }
}

impl<T: Scalar> Debug for RTree<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RTree")
            .field("max_children", &self.max_children)
            .field("arena_nodes", &self.arena.len())
            .field("items", &self.items)
            .field("has_root", &self.root.is_some())
            .finish_non_exhaustive()
    }
}

/// Convenience type aliases.
/// R-tree with f32 coordinates.
pub type RTreeF32 = RTree<f32>;

/// R-tree with f64 coordinates.
pub type RTreeF64 = RTree<f64>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::flatvec::FlatVec;

    fn grid(n: usize, cell: f64) -> Vec<(usize, Aabb2D<f64>)> {
        let mut out = Vec::with_capacity(n * n);
        for y in 0..n {
            for x in 0..n {
                let slot = out.len();
                out.push((
                    slot,
                    Aabb2D::from_xywh(x as f64 * cell, y as f64 * cell, cell * 0.5, cell * 0.5),
                ));
            }
        }
        out
    }

    fn sorted(mut v: Vec<usize>) -> Vec<usize> {
        v.sort_unstable();
        v
    }

    #[test]
    fn empty_tree_answers_nothing() {
        let t = RTreeF64::build(&[]);
        assert!(t.is_empty());
        assert_eq!(t.height(), 0);
        assert!(t.bounds().is_none());
        assert_eq!(t.query_rect(Aabb2D::new(-1.0, -1.0, 1.0, 1.0)).count(), 0);
    }

    #[test]
    fn bulk_build_packs_levels() {
        let items = grid(30, 10.0);
        let t = RTreeF64::build(&items);
        assert_eq!(t.len(), 900);
        // 900 items at arity 9 need 100 leaves, 12 parents, 2 grandparents, and a root.
        assert!(t.height() >= 3, "unexpected height {}", t.height());
        assert_eq!(t.bounds(), Some(Aabb2D::new(0.0, 0.0, 295.0, 295.0)));
        for node in &t.arena {
            assert!(node.children.len() <= DEFAULT_MAX_CHILDREN);
        }
    }

    #[test]
    fn query_matches_linear_scan() {
        let items = grid(25, 4.0);
        let tree = RTreeF64::build(&items);
        let flat = FlatVec::build(&items);
        let queries = [
            Aabb2D::new(0.0, 0.0, 0.0, 0.0),
            Aabb2D::new(3.0, 3.0, 9.0, 9.0),
            Aabb2D::new(-50.0, -50.0, 200.0, 200.0),
            Aabb2D::new(41.0, 0.0, 41.5, 100.0),
            Aabb2D::new(1000.0, 1000.0, 1001.0, 1001.0),
        ];
        for q in queries {
            assert_eq!(
                sorted(tree.query_rect(q).collect()),
                sorted(flat.query_rect(q).collect()),
                "mismatch for {q:?}"
            );
        }
    }

    #[test]
    fn query_order_is_deterministic() {
        let items = grid(12, 3.0);
        let a = RTreeF64::build(&items);
        let b = RTreeF64::build(&items);
        let q = Aabb2D::new(5.0, 5.0, 20.0, 20.0);
        let ra: Vec<_> = a.query_rect(q).collect();
        let rb: Vec<_> = b.query_rect(q).collect();
        assert_eq!(ra, rb);
        assert_eq!(ra, a.query_rect(q).collect::<Vec<_>>());
    }
}
