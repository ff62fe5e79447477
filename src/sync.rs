//! Concurrency primitives for the request/response engine.
//!
//! The engine correlates replies with waiters through a fixed table of 256
//! single-shot delivery channels, one per possible service ID. Submitters
//! install a sender, receive workers look it up and push the decoded
//! response through it, and the submitter removes its own slot on every
//! exit path. Close coordination uses a single-flight gate so concurrent
//! callers share one teardown.

use std::convert::Infallible;
use std::time::Duration;

use crossbeam_channel::{after, bounded, select, Receiver, Sender, TryRecvError};
use parking_lot::Mutex;

use crate::response::Response;

/// Monotonic service-ID allocator: a mutexed byte incremented before
/// issue. Wraps at 256; with 256 requests in flight a new request reuses
/// the slot of the oldest waiter, which then times out.
pub(crate) struct SidCounter(Mutex<u8>);

impl SidCounter {
    pub fn new() -> Self {
        Self(Mutex::new(0))
    }

    pub fn next(&self) -> u8 {
        let mut v = self.0.lock();
        *v = v.wrapping_add(1);
        *v
    }
}

/// The 256-slot response router. At most one delivery sink per SID.
pub(crate) struct SlotTable {
    slots: Mutex<[Option<Sender<Response>>; 256]>,
}

impl SlotTable {
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(std::array::from_fn(|_| None)),
        }
    }

    /// Installs a sink, replacing whatever was present.
    pub fn install(&self, sid: u8, sink: Sender<Response>) {
        self.slots.lock()[usize::from(sid)] = Some(sink);
    }

    /// Returns the sink for a SID without removing it; the submitter owns
    /// removal.
    pub fn take(&self, sid: u8) -> Option<Sender<Response>> {
        self.slots.lock()[usize::from(sid)].clone()
    }

    /// Clears the slot.
    pub fn remove(&self, sid: u8) {
        self.slots.lock()[usize::from(sid)] = None;
    }
}

/// At-most-one-concurrent-run gate: the first caller runs `f`, later
/// callers block until the leader finishes and then return without
/// running anything. The cell is cleared after the run so the gate can be
/// used again.
pub(crate) struct SingleFlight {
    running: Mutex<Option<Receiver<Infallible>>>,
}

impl SingleFlight {
    pub fn new() -> Self {
        Self {
            running: Mutex::new(None),
        }
    }

    pub fn run<F: FnOnce()>(&self, f: F) {
        enum Role {
            Leader(Sender<Infallible>),
            Follower(Receiver<Infallible>),
        }

        let role = {
            let mut running = self.running.lock();
            match running.as_ref() {
                Some(done) => Role::Follower(done.clone()),
                None => {
                    let (tx, rx) = bounded(0);
                    *running = Some(rx);
                    Role::Leader(tx)
                }
            }
        };

        match role {
            Role::Follower(done) => {
                let _ = done.recv();
            }
            Role::Leader(_tx) => {
                // Clear the cell before `_tx` drops and releases the
                // followers, even if `f` panics.
                struct Reset<'a>(&'a SingleFlight);
                impl Drop for Reset<'_> {
                    fn drop(&mut self) {
                        *self.0.running.lock() = None;
                    }
                }
                let _reset = Reset(self);
                f();
            }
        }
    }
}

/// Returns whether the cancel signal has fired (all senders dropped).
pub(crate) fn cancelled(cancel: &Receiver<Infallible>) -> bool {
    matches!(cancel.try_recv(), Err(TryRecvError::Disconnected))
}

/// Sleeps for `d`, waking early if the cancel signal fires.
pub(crate) fn wait_moment(cancel: &Receiver<Infallible>, d: Duration) {
    select! {
        recv(cancel) -> _ => {}
        recv(after(d)) -> _ => {}
    }
}
