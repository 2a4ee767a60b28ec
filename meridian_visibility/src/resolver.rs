// Copyright 2025 the Meridian Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The visibility resolver state machine.

use core::fmt;
use core::time::Duration;
use std::sync::Arc;

use meridian_index::BoundingBox;
use meridian_projection::{GeoPoint, Projection};
use meridian_timing::{Clock, Scheduler};

use crate::calculator::{viewport_bounding_box, zoom_center};
use crate::config::ResolverConfig;
use crate::error::VisibilityError;
use crate::history::BoxHistory;
use crate::layers::{MapLayers, VisibilityResult};
use crate::viewport::ViewportState;

/// Where the resolver is in its lifecycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ResolverPhase {
    /// No move in flight; the history holds at most one box.
    Idle,
    /// A move is animating; the history will be trimmed at `deadline`.
    Transitioning {
        /// Clock reading at which the history is trimmed.
        deadline: Duration,
    },
    /// Torn down; no further updates are accepted.
    Disposed,
}

/// What the last accepted update computed, for the renderer.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ViewFrame {
    /// The geographic point to center the map on.
    pub zoom_center: GeoPoint,
    /// Zoom level of the update.
    pub zoom: f64,
    /// Box covered by this viewport alone.
    pub bounding_box: BoundingBox,
    /// Box the indexes were queried with.
    pub query_box: BoundingBox,
}

/// Marker task for the end of an animated move.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct TransitionEnd;

/// Decides which fragments to draw for a changing viewport.
///
/// Each accepted [`update`](Self::update) appends the new viewport's box to a
/// history and queries both layers with the union of the whole history. While
/// a move animates, geometry from where the view came from thus stays
/// visible. Once the move duration passes without further changes,
/// [`advance`](Self::advance) trims the history back to the newest box.
///
/// The resolver does not run timers itself. The host calls `advance` from its
/// event loop, typically when [`next_deadline`](Self::next_deadline) is
/// reached, and owns the clock the resolver reads.
pub struct VisibilityResolver<C: Clock> {
    layers: Arc<MapLayers>,
    config: ResolverConfig,
    clock: C,
    history: BoxHistory,
    last_state: Option<ViewportState>,
    result: VisibilityResult,
    frame: Option<ViewFrame>,
    transition: Scheduler<TransitionEnd>,
    disposed: bool,
}

impl<C: Clock> VisibilityResolver<C> {
    /// Create a resolver over shared layers.
    ///
    /// Nothing is visible until the first [`update`](Self::update).
    pub fn new(
        layers: Arc<MapLayers>,
        config: ResolverConfig,
        clock: C,
    ) -> Result<Self, VisibilityError> {
        config.validate()?;
        Ok(Self {
            layers,
            config,
            clock,
            history: BoxHistory::new(),
            last_state: None,
            result: VisibilityResult::default(),
            frame: None,
            transition: Scheduler::new(),
            disposed: false,
        })
    }

    /// Apply a viewport state and return what is visible.
    ///
    /// A state identical to the last accepted one changes nothing and returns
    /// the current result. On error the resolver is left exactly as it was.
    pub fn update(&mut self, state: &ViewportState) -> Result<&VisibilityResult, VisibilityError> {
        if self.disposed {
            return Err(VisibilityError::Disposed);
        }
        state.validate(self.config.min_zoom, self.config.max_zoom)?;

        let changes = state.changes_since(self.last_state.as_ref());
        if changes.is_empty() {
            tracing::trace!("viewport unchanged");
            return Ok(&self.result);
        }

        let projection = Projection::new(&self.config.projection, state.size())?;
        let center = zoom_center(state.center, state.offset, &projection, state.zoom)?;
        let bbox = viewport_bounding_box(center, state.width, state.height, &projection, state.zoom)?;
        let query_box = self.history.union_with(bbox);
        let result = self.layers.query(query_box)?;

        self.history.push(bbox);
        self.result = result;
        self.frame = Some(ViewFrame {
            zoom_center: center,
            zoom: state.zoom,
            bounding_box: bbox,
            query_box,
        });
        self.last_state = Some(*state);

        if self.history.len() > 1 {
            self.transition.schedule(
                self.clock.now(),
                self.config.move_duration(),
                TransitionEnd,
            );
        }

        tracing::debug!(
            ?changes,
            history = self.history.len(),
            areas = self.result.areas.len(),
            lines = self.result.lines.len(),
            "viewport updated"
        );
        Ok(&self.result)
    }

    /// Finish a move whose duration has passed. Returns whether it did.
    ///
    /// Trims the history to the newest box and, with
    /// [`ResolverConfig::requery_on_trim`], narrows the result to that box.
    /// Does nothing before the deadline or after [`dispose`](Self::dispose).
    pub fn advance(&mut self) -> Result<bool, VisibilityError> {
        if self.disposed {
            return Ok(false);
        }
        let now = self.clock.now();
        let Some(end) = self.transition.poll(now) else {
            return Ok(false);
        };

        let narrowed = match self.history.latest() {
            Some(latest) if self.config.requery_on_trim => match self.layers.query(latest) {
                Ok(result) => Some((latest, result)),
                Err(err) => {
                    // Keep the move open so the next advance retries the settle.
                    self.transition.schedule(now, Duration::ZERO, end);
                    return Err(err.into());
                }
            },
            _ => None,
        };

        let dropped = self.history.trim_to_latest();
        if let Some((latest, result)) = narrowed {
            self.result = result;
            if let Some(frame) = &mut self.frame {
                frame.query_box = latest;
            }
        }
        tracing::debug!(
            dropped,
            requeried = self.config.requery_on_trim,
            "move settled"
        );
        Ok(true)
    }

    /// Tear down: cancel the pending trim and refuse further updates.
    ///
    /// Safe to call more than once. Dropping the resolver does the same.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        if self.transition.cancel().is_some() {
            tracing::debug!("pending transition cancelled on dispose");
        }
    }

    /// The result of the last accepted update.
    pub fn current_result(&self) -> &VisibilityResult {
        &self.result
    }

    /// Center, zoom and boxes of the last accepted update.
    pub fn frame(&self) -> Option<&ViewFrame> {
        self.frame.as_ref()
    }

    /// Boxes of the moves since the view last settled.
    pub fn history(&self) -> &BoxHistory {
        &self.history
    }

    /// The last accepted viewport state.
    pub fn last_state(&self) -> Option<&ViewportState> {
        self.last_state.as_ref()
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> ResolverPhase {
        if self.disposed {
            ResolverPhase::Disposed
        } else if let Some(deadline) = self.transition.deadline() {
            ResolverPhase::Transitioning { deadline }
        } else {
            ResolverPhase::Idle
        }
    }

    /// When the host should next call [`advance`](Self::advance).
    pub fn next_deadline(&self) -> Option<Duration> {
        self.transition.deadline()
    }

    /// Whether [`dispose`](Self::dispose) has run.
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// The configuration in use.
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// The shared layers.
    pub fn layers(&self) -> &Arc<MapLayers> {
        &self.layers
    }

    /// The clock the resolver reads.
    pub fn clock(&self) -> &C {
        &self.clock
    }
}

impl<C: Clock> Drop for VisibilityResolver<C> {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl<C: Clock> fmt::Debug for VisibilityResolver<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VisibilityResolver")
            .field("phase", &self.phase())
            .field("history", &self.history.len())
            .field("areas", &self.result.areas.len())
            .field("lines", &self.result.lines.len())
            .field("frame", &self.frame)
            .finish_non_exhaustive()
    }
}
