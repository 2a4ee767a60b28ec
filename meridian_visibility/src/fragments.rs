// Copyright 2025 the Meridian Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared geometry table addressed by fragment id.

use std::sync::Arc;

use meridian_index::FragmentId;

/// An immutable table of fragment geometries.
///
/// Cloning shares the table. The spatial index only ever hands out ids;
/// this is where a renderer turns them back into geometry.
#[derive(Debug)]
pub struct FragmentTable<G> {
    items: Arc<[G]>,
}

impl<G> FragmentTable<G> {
    /// Number of fragments.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Geometry of a fragment, if the id is in range.
    pub fn get(&self, id: FragmentId) -> Option<&G> {
        self.items.get(id.index())
    }

    /// Look up a list of ids, skipping those the table does not hold.
    pub fn resolve<'a>(
        &'a self,
        ids: &'a [FragmentId],
    ) -> impl Iterator<Item = (FragmentId, &'a G)> + 'a {
        ids.iter().filter_map(|&id| self.get(id).map(|g| (id, g)))
    }
}

impl<G> Clone for FragmentTable<G> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
        }
    }
}

impl<G> From<Vec<G>> for FragmentTable<G> {
    fn from(items: Vec<G>) -> Self {
        Self {
            items: items.into(),
        }
    }
}

impl<G> FromIterator<G> for FragmentTable<G> {
    fn from_iter<I: IntoIterator<Item = G>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
