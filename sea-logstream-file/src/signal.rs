use flume::{bounded, Receiver, Sender};
use std::{
    sync::{Condvar, Mutex, MutexGuard, PoisonError},
    time::Instant,
};

/// The broadcast latch shared between a `LogStream` and its readers.
///
/// `generation` is bumped on every append and on close, under the mutex.
/// A reader snapshots it before touching the file; if the file then yields
/// nothing, the reader only goes to sleep when the generation is still the
/// same, so a write or close that raced with the file read is never missed.
pub(crate) struct Signal {
    state: Mutex<State>,
    cond: Condvar,
}

struct State {
    generation: u64,
    closed: bool,
    /// One-shot wakers of suspended async readers.
    wakers: Vec<Sender<()>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Wake {
    /// Something happened since the snapshot; read again.
    Changed,
    /// Closed, and nothing happened since the snapshot.
    Ended,
    TimedOut,
}

pub(crate) enum Subscription {
    Ready(Wake),
    Pending(Receiver<()>),
}

impl Signal {
    pub(crate) fn new() -> Self {
        Self {
            state: Mutex::new(State {
                generation: 0,
                closed: false,
                wakers: Vec::new(),
            }),
            cond: Condvar::new(),
        }
    }

    // Every transition leaves `State` consistent, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn generation(&self) -> u64 {
        self.lock().generation
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.lock().closed
    }

    /// New bytes have been appended.
    pub(crate) fn notify(&self) {
        let mut state = self.lock();
        state.generation += 1;
        self.broadcast(&mut state);
    }

    /// Returns false if it was already closed.
    pub(crate) fn close(&self) -> bool {
        let mut state = self.lock();
        if state.closed {
            return false;
        }
        state.closed = true;
        state.generation += 1;
        self.broadcast(&mut state);
        true
    }

    fn broadcast(&self, state: &mut State) {
        self.cond.notify_all();
        for waker in state.wakers.drain(..) {
            // the receiver may have been dropped by a cancelled read
            waker.try_send(()).ok();
        }
    }

    fn check(state: &State, seen: u64) -> Option<Wake> {
        if state.generation != seen {
            Some(Wake::Changed)
        } else if state.closed {
            Some(Wake::Ended)
        } else {
            None
        }
    }

    /// Block the current thread until the generation moves past `seen`,
    /// the stream is closed, or `deadline` passes.
    pub(crate) fn wait(&self, seen: u64, deadline: Option<Instant>) -> Wake {
        let mut state = self.lock();
        loop {
            if let Some(wake) = Self::check(&state, seen) {
                return wake;
            }
            state = match deadline {
                None => self
                    .cond
                    .wait(state)
                    .unwrap_or_else(PoisonError::into_inner),
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        return Wake::TimedOut;
                    }
                    self.cond
                        .wait_timeout(state, deadline - now)
                        .unwrap_or_else(PoisonError::into_inner)
                        .0
                }
            };
        }
    }

    /// The async counterpart of `wait`: the check and the registration happen
    /// under the lock, the caller then awaits the receiver without holding it.
    pub(crate) fn subscribe(&self, seen: u64) -> Subscription {
        let mut state = self.lock();
        if let Some(wake) = Self::check(&state, seen) {
            return Subscription::Ready(wake);
        }
        state.wakers.retain(|w| !w.is_disconnected());
        let (sender, receiver) = bounded(1);
        state.wakers.push(sender);
        Subscription::Pending(receiver)
    }
}

impl std::fmt::Debug for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("Signal")
            .field("generation", &state.generation)
            .field("closed", &state.closed)
            .field("wakers", &state.wakers.len())
            .finish()
    }
}
