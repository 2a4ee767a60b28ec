// Copyright 2025 the Meridian Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend trait for spatial indexing implementations.

use alloc::boxed::Box;

use crate::types::Aabb2D;
use core::fmt::Debug;

/// Spatial backend abstraction used by `IndexGeneric`.
///
/// Backends are built once from `(slot, aabb)` pairs and are read-only afterwards.
/// Slots are positions in the owning index's entry table.
pub trait Backend<T: Copy + PartialOrd + Debug> {
    /// Build the spatial structure over all `(slot, aabb)` pairs at once.
    fn build(items: &[(usize, Aabb2D<T>)]) -> Self
    where
        Self: Sized;

    /// Query slots whose AABB intersects the rectangle.
    ///
    /// The order is backend specific but deterministic for a given build.
    fn query_rect<'a>(&'a self, rect: Aabb2D<T>) -> Box<dyn Iterator<Item = usize> + 'a>;
}
