// Copyright 2025 the Meridian Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport boxes seen since the view last settled.

use meridian_index::BoundingBox;

/// Ordered viewport boxes, oldest first.
///
/// Boxes accumulate for as long as moves keep coming; nothing is evicted
/// until [`trim_to_latest`](Self::trim_to_latest).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BoxHistory {
    boxes: Vec<BoundingBox>,
}

impl BoxHistory {
    /// Create an empty history.
    pub const fn new() -> Self {
        Self { boxes: Vec::new() }
    }

    /// Append the newest box.
    pub fn push(&mut self, bbox: BoundingBox) {
        self.boxes.push(bbox);
    }

    /// Number of boxes held.
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    /// Whether no box has been recorded.
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// The newest box.
    pub fn latest(&self) -> Option<BoundingBox> {
        self.boxes.last().copied()
    }

    /// All boxes, oldest first.
    pub fn as_slice(&self) -> &[BoundingBox] {
        &self.boxes
    }

    /// Smallest box enclosing every box held.
    pub fn union(&self) -> Option<BoundingBox> {
        self.boxes.iter().copied().reduce(|a, b| a.union(&b))
    }

    /// The union the history would have after pushing `next`.
    pub fn union_with(&self, next: BoundingBox) -> BoundingBox {
        self.boxes.iter().fold(next, |acc, b| acc.union(b))
    }

    /// Keep only the newest box. Returns how many were dropped.
    pub fn trim_to_latest(&mut self) -> usize {
        let dropped = self.boxes.len().saturating_sub(1);
        self.boxes.drain(..dropped);
        dropped
    }
}
