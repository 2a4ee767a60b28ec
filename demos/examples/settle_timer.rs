// Copyright 2025 the Meridian Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A cooperative event loop driving a settle timer off the system clock.
//!
//! Moves arrive every 300 ms; each one re-arms a 1 s timer, so the callback
//! runs once, a second after the last move.
//!
//! Run:
//! - `RUST_LOG=trace cargo run -p meridian_demos --example settle_timer`

use std::cell::Cell;
use std::rc::Rc;
use std::thread;
use std::time::Duration;

use meridian_timing::{Clock, Scheduler, SystemClock};
use tracing_subscriber::EnvFilter;

const SETTLE: Duration = Duration::from_millis(1_000);
const MOVE_EVERY: Duration = Duration::from_millis(300);
const TICK: Duration = Duration::from_millis(50);

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let clock = SystemClock::new();
    let settled = Rc::new(Cell::new(0_u32));
    let mut timer: Scheduler<Box<dyn FnOnce()>> = Scheduler::new();

    let mut moves = 0;
    let mut next_move = Duration::ZERO;
    loop {
        let now = clock.now();
        if moves < 5 && now >= next_move {
            moves += 1;
            next_move = now + MOVE_EVERY;
            let settled = Rc::clone(&settled);
            let id = timer.schedule(
                now,
                SETTLE,
                Box::new(move || {
                    settled.set(settled.get() + 1);
                    println!("settled after move {moves}");
                }),
            );
            println!("{:>6} ms: move {moves} ({id})", now.as_millis());
        }
        if timer.fire_due(now) {
            break;
        }
        thread::sleep(TICK);
    }
    assert_eq!(settled.get(), 1, "only the last arming fires");
}
