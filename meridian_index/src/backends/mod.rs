// Copyright 2025 the Meridian Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend implementations for different spatial strategies.
//!
//! - `flatvec`: flat vector with linear scans; the brute-force reference.
//! - `rtree`: packed R-tree (`T: Scalar`), built either with an STR-like bulk
//!   pass or directly from an rbush snapshot (aliases: `RTreeF32`, `RTreeF64`).
//!
//! STR note
//! --------
//! Sort-Tile-Recursive packing sorts items by centroid x, cuts the sequence into
//! `ceil(sqrt(leaves))` vertical slices, sorts each slice by centroid y, and packs
//! consecutive runs of `max_children` items into leaves. Parents are packed the
//! same way from the leaf level upward until a single root remains.

pub mod flatvec;
pub mod rtree;
