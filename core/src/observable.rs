//! Push-based observables for the presentation layer.
//!
//! # Design
//! Two flavors share one subscription type:
//!
//! - `Property<T>` holds a current value. A new subscriber first receives that
//!   value, then every later value in publish order.
//! - `EventStream<T>` holds nothing. Subscribers receive only what is emitted
//!   after they subscribed, each event exactly once.
//!
//! Every subscriber owns an unbounded channel, so a slow reader never loses
//! intermediate values (the loading flag relies on seeing `true` before
//! `false`). Dropping or calling `unsubscribe` on a `Subscription` closes its
//! channel; the publisher prunes closed channels on the next publish.
//!
//! Only the owning accumulator or loader publishes; handles given out to
//! observers can read and subscribe but not write.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Receiving end of one subscription.
#[derive(Debug)]
pub struct Subscription<T> {
    rx: UnboundedReceiver<T>,
}

impl<T> Subscription<T> {
    /// Wait for the next value. `None` once the publisher is gone and the
    /// backlog is drained.
    pub async fn next(&mut self) -> Option<T> {
        self.rx.recv().await
    }

    /// The next already-delivered value, without waiting.
    pub fn try_next(&mut self) -> Option<T> {
        self.rx.try_recv().ok()
    }

    /// Everything delivered so far.
    pub fn drain(&mut self) -> Vec<T> {
        std::iter::from_fn(|| self.try_next()).collect()
    }

    pub fn unsubscribe(mut self) {
        self.rx.close();
    }
}

#[derive(Debug)]
struct PropertyState<T> {
    value: T,
    subscribers: Vec<UnboundedSender<T>>,
}

/// Latest-value observable. Cloning yields another handle to the same value.
#[derive(Debug, Clone)]
pub struct Property<T> {
    state: Arc<Mutex<PropertyState<T>>>,
}

impl<T: Clone> Property<T> {
    pub fn new(initial: T) -> Self {
        Self {
            state: Arc::new(Mutex::new(PropertyState {
                value: initial,
                subscribers: Vec::new(),
            })),
        }
    }

    pub fn get(&self) -> T {
        lock(&self.state).value.clone()
    }

    /// Subscribe, receiving the current value immediately.
    pub fn subscribe(&self) -> Subscription<T> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut state = lock(&self.state);
        if tx.send(state.value.clone()).is_ok() {
            state.subscribers.push(tx);
        }
        Subscription { rx }
    }

    pub fn subscriber_count(&self) -> usize {
        let mut state = lock(&self.state);
        state.subscribers.retain(|tx| !tx.is_closed());
        state.subscribers.len()
    }

    pub(crate) fn set(&self, value: T) {
        let mut state = lock(&self.state);
        state
            .subscribers
            .retain(|tx| tx.send(value.clone()).is_ok());
        state.value = value;
    }

    /// Replace the value with `f(current)` under one lock.
    pub(crate) fn update(&self, f: impl FnOnce(&T) -> T) {
        let mut state = lock(&self.state);
        let value = f(&state.value);
        state
            .subscribers
            .retain(|tx| tx.send(value.clone()).is_ok());
        state.value = value;
    }
}

/// Fire-once event observable.
#[derive(Debug, Clone)]
pub struct EventStream<T> {
    subscribers: Arc<Mutex<Vec<UnboundedSender<T>>>>,
}

impl<T: Clone> EventStream<T> {
    pub fn new() -> Self {
        Self {
            subscribers: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn subscribe(&self) -> Subscription<T> {
        let (tx, rx) = mpsc::unbounded_channel();
        lock(&self.subscribers).push(tx);
        Subscription { rx }
    }

    pub fn subscriber_count(&self) -> usize {
        let mut subscribers = lock(&self.subscribers);
        subscribers.retain(|tx| !tx.is_closed());
        subscribers.len()
    }

    pub(crate) fn emit(&self, event: T) {
        lock(&self.subscribers).retain(|tx| tx.send(event.clone()).is_ok());
    }
}

impl<T: Clone> Default for EventStream<T> {
    fn default() -> Self {
        Self::new()
    }
}

// Publishing never panics while holding the lock, but a subscriber list is
// still usable if some other holder did.
fn lock<S>(mutex: &Mutex<S>) -> MutexGuard<'_, S> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
