// Copyright 2025 the Meridian Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=meridian_visibility --heading-base-level=0

//! Meridian Visibility: which map fragments to draw for a moving viewport.
//!
//! ## Overview
//!
//! The map is split into fragments indexed by geographic bounding box in two
//! layers ([`MapLayers`]: areas and boundary lines). For every viewport
//! change the [`VisibilityResolver`]:
//!
//! 1) rejects invalid states and ignores unchanged ones;
//! 2) builds the projection for the viewport size and derives the panned
//!    center with [`calculator::zoom_center`];
//! 3) computes the viewport's geographic box with
//!    [`calculator::viewport_bounding_box`];
//! 4) appends it to the [`BoxHistory`] and queries both layers with the
//!    union of the history;
//! 5) arms a trim for when the animated move ends.
//!
//! Querying with the union keeps the geometry the view is moving away from
//! until the animation is over, so nothing disappears mid-move.
//!
//! ## Driving the resolver
//!
//! The resolver reads time from a [`Clock`](meridian_timing::Clock) and never
//! spawns anything. The host calls [`VisibilityResolver::advance`] from its
//! event loop to let pending trims happen.
//!
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use kurbo::Vec2;
//! use meridian_index::{Aabb2D, FragmentId, SpatialIndex};
//! use meridian_timing::ManualClock;
//! use meridian_visibility::{MapLayers, ResolverConfig, ViewportState, VisibilityResolver};
//!
//! let layers = Arc::new(MapLayers::new(
//!     SpatialIndex::bulk(&[(Aabb2D::new(-5.0, -5.0, 5.0, 5.0), FragmentId(0))]),
//!     SpatialIndex::bulk(&[]),
//! ));
//! let clock = ManualClock::new();
//! let mut resolver = VisibilityResolver::new(layers, ResolverConfig::default(), &clock).unwrap();
//!
//! let home = ViewportState::new(800.0, 600.0);
//! assert_eq!(resolver.update(&home).unwrap().areas, [FragmentId(0)]);
//!
//! // Pan; both viewports stay queryable until the move has settled.
//! resolver.update(&home.with_offset(Vec2::new(400.0, 0.0))).unwrap();
//! assert_eq!(resolver.history().len(), 2);
//!
//! clock.advance(Duration::from_millis(2000));
//! assert!(resolver.advance().unwrap());
//! assert_eq!(resolver.history().len(), 1);
//! ```

pub mod calculator;
pub mod config;
pub mod error;
pub mod fragments;
pub mod history;
pub mod layers;
pub mod resolver;
pub mod viewport;

pub use config::{DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM, DEFAULT_MOVE_DURATION_MS, ResolverConfig};
pub use error::{ResolverConfigIssue, ViewportIssue, VisibilityError};
pub use fragments::FragmentTable;
pub use history::BoxHistory;
pub use layers::{MapLayers, VisibilityResult};
pub use resolver::{ResolverPhase, ViewFrame, VisibilityResolver};
pub use viewport::{ViewportChanges, ViewportState};
