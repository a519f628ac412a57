//! Pointer events and the outside-interaction subscription.
//!
//! A picker closes its panel when the user clicks anywhere outside of it. The
//! picker does not hook a global listener itself; it asks an injected
//! [`PointerEventSource`] for a [`PointerSubscription`] when it mounts. The
//! subscription is a guard: dropping it unregisters the listener, so every
//! exit path of the picker releases it.
//!
//! [`PointerHub`] is the in-process source. The rendering layer feeds raw
//! pointer activations into [`PointerHub::dispatch`], which fans them out to
//! every live subscription.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::mpsc::{Receiver, Sender, channel};
use std::sync::{Arc, Mutex, Weak};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle covering the picker's rendered area.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Inclusive on the top/left edges, exclusive on the bottom/right edges.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.y >= self.y
            && point.x < self.x + self.width
            && point.y < self.y + self.height
    }
}

/// A pointer activation somewhere on screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub position: Point,
}

impl PointerEvent {
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            position: Point::new(x, y),
        }
    }
}

/// Capability handed to a picker for outside-interaction detection.
#[cfg_attr(test, mockall::automock)]
pub trait PointerEventSource {
    /// Register a listener. The listener stays registered until the returned
    /// guard is dropped.
    fn subscribe(&self) -> Result<PointerSubscription>;
}

type Release = Box<dyn FnOnce(u64) + Send>;

/// Live registration with a [`PointerEventSource`].
pub struct PointerSubscription {
    id: u64,
    events: Receiver<PointerEvent>,
    release: Option<Release>,
}

impl PointerSubscription {
    /// Build a subscription. `release` runs exactly once, on drop.
    pub fn new<F>(id: u64, events: Receiver<PointerEvent>, release: F) -> Self
    where
        F: FnOnce(u64) + Send + 'static,
    {
        Self {
            id,
            events,
            release: Some(Box::new(release)),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Take every event delivered since the last call, oldest first.
    pub fn drain(&self) -> Vec<PointerEvent> {
        self.events.try_iter().collect()
    }
}

impl std::fmt::Debug for PointerSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PointerSubscription")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

impl Drop for PointerSubscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release(self.id);
        }
    }
}

#[derive(Default)]
struct HubListeners {
    next_id: u64,
    senders: HashMap<u64, Sender<PointerEvent>>,
}

/// In-process broadcast source of pointer events.
///
/// Cloning the hub shares the same listener registry.
#[derive(Clone, Default)]
pub struct PointerHub {
    listeners: Arc<Mutex<HubListeners>>,
}

impl PointerHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `event` to every live subscription. Returns how many received it.
    pub fn dispatch(&self, event: PointerEvent) -> usize {
        let mut listeners = lock(&self.listeners);
        // A receiver can only vanish without release if its guard leaked.
        listeners
            .senders
            .retain(|_, sender| sender.send(event).is_ok());
        listeners.senders.len()
    }

    pub fn listener_count(&self) -> usize {
        lock(&self.listeners).senders.len()
    }
}

impl PointerEventSource for PointerHub {
    fn subscribe(&self) -> Result<PointerSubscription> {
        let (tx, rx) = channel();
        let id = {
            let mut listeners = lock(&self.listeners);
            listeners.next_id += 1;
            let id = listeners.next_id;
            listeners.senders.insert(id, tx);
            id
        };

        let registry: Weak<Mutex<HubListeners>> = Arc::downgrade(&self.listeners);
        Ok(PointerSubscription::new(id, rx, move |id| {
            if let Some(registry) = registry.upgrade() {
                lock(&registry).senders.remove(&id);
            }
        }))
    }
}

fn lock(listeners: &Mutex<HubListeners>) -> std::sync::MutexGuard<'_, HubListeners> {
    listeners
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}
