// Copyright 2025 the Meridian Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=meridian_timing --heading-base-level=0

//! Meridian Timing: host-driven deferred tasks for map transitions.
//!
//! A pan or zoom animates for a fixed duration; some work should only happen
//! once the view has settled. This crate provides the two pieces needed for
//! that without owning an event loop or spawning threads:
//!
//! - [`Clock`]: where "now" comes from. [`ManualClock`] is advanced by the
//!   host (or a test); `SystemClock` reads the monotonic OS clock (`std`
//!   feature).
//! - [`Scheduler`]: a single pending timer. Arming it again replaces the
//!   pending task, so only the last of a burst of moves fires.
//!
//! The host polls the scheduler from its own loop, on its own thread.
//!
//! ## Example
//!
//! ```rust
//! use core::time::Duration;
//! use meridian_timing::{Clock, ManualClock, Scheduler};
//!
//! let clock = ManualClock::new();
//! let mut settle = Scheduler::new();
//!
//! settle.schedule(clock.now(), Duration::from_millis(2000), "first move");
//! clock.advance(Duration::from_millis(1500));
//! settle.schedule(clock.now(), Duration::from_millis(2000), "second move");
//!
//! clock.advance(Duration::from_millis(1000));
//! assert_eq!(settle.poll(clock.now()), None);
//! clock.advance(Duration::from_millis(1000));
//! assert_eq!(settle.poll(clock.now()), Some("second move"));
//! ```

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod clock;
pub mod scheduler;

#[cfg(feature = "std")]
pub use clock::SystemClock;
pub use clock::{Clock, ManualClock};
pub use scheduler::{Scheduler, TimerId};
