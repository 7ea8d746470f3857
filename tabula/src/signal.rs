//! Window-level pointer signals.
//!
//! Pointer movement during a resize has to be seen wherever the pointer goes,
//! not only over the header. The host feeds every window-level pointer move
//! and release into a [`PointerSignals`] hub; gestures that care subscribe for
//! exactly as long as they run. A [`Subscription`] removes its listener when
//! dropped, so a gesture that ends on any path releases it.

use std::fmt;
use std::sync::{Arc, RwLock, Weak};

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

/// Kind of pointer signal a listener receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalKind {
    Move,
    Up,
}

/// A window-level pointer signal, in pointer coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerSignal {
    Move { x: i32, y: i32 },
    Up { x: i32, y: i32 },
}

impl PointerSignal {
    pub fn kind(&self) -> SignalKind {
        match self {
            PointerSignal::Move { .. } => SignalKind::Move,
            PointerSignal::Up { .. } => SignalKind::Up,
        }
    }

    pub fn x(&self) -> i32 {
        match self {
            PointerSignal::Move { x, .. } | PointerSignal::Up { x, .. } => *x,
        }
    }

    /// Translate a terminal mouse event.
    ///
    /// Left-button drags and plain moves become `Move`, a left-button release
    /// becomes `Up`. Everything else is not a pointer signal.
    pub fn from_mouse(event: &MouseEvent) -> Option<Self> {
        let x = event.column as i32;
        let y = event.row as i32;
        match event.kind {
            MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {
                Some(PointerSignal::Move { x, y })
            }
            MouseEventKind::Up(MouseButton::Left) => Some(PointerSignal::Up { x, y }),
            _ => None,
        }
    }
}

type Listener = Arc<dyn Fn(&PointerSignal) + Send + Sync>;

struct Entry {
    id: u64,
    kind: SignalKind,
    listener: Listener,
}

#[derive(Default)]
struct SignalsInner {
    next_id: u64,
    entries: Vec<Entry>,
}

/// Hub of window-level pointer listeners.
///
/// Clones share the same listener list, so several tables in one window can
/// subscribe to a single hub the host dispatches into.
#[derive(Clone, Default)]
pub struct PointerSignals {
    inner: Arc<RwLock<SignalsInner>>,
}

impl PointerSignals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Listen for signals of `kind` until the returned guard is dropped.
    pub fn subscribe(
        &self,
        kind: SignalKind,
        listener: impl Fn(&PointerSignal) + Send + Sync + 'static,
    ) -> Subscription {
        let id = match self.inner.write() {
            Ok(mut guard) => {
                let id = guard.next_id;
                guard.next_id += 1;
                guard.entries.push(Entry {
                    id,
                    kind,
                    listener: Arc::new(listener),
                });
                id
            }
            Err(_) => u64::MAX,
        };
        log::trace!("Pointer listener {} subscribed to {:?}", id, kind);
        Subscription {
            id,
            signals: Arc::downgrade(&self.inner),
        }
    }

    /// Deliver a signal to every listener of its kind.
    ///
    /// Listeners run without the hub locked, so a listener may drop its own
    /// (or any other) subscription. Returns how many listeners ran.
    pub fn dispatch(&self, signal: PointerSignal) -> usize {
        let kind = signal.kind();
        let listeners: Vec<Listener> = self
            .inner
            .read()
            .map(|g| {
                g.entries
                    .iter()
                    .filter(|e| e.kind == kind)
                    .map(|e| Arc::clone(&e.listener))
                    .collect()
            })
            .unwrap_or_default();

        for listener in &listeners {
            listener(&signal);
        }
        listeners.len()
    }

    /// Number of live listeners for `kind`.
    pub fn listener_count(&self, kind: SignalKind) -> usize {
        self.inner
            .read()
            .map(|g| g.entries.iter().filter(|e| e.kind == kind).count())
            .unwrap_or(0)
    }
}

impl fmt::Debug for PointerSignals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PointerSignals")
            .field("move_listeners", &self.listener_count(SignalKind::Move))
            .field("up_listeners", &self.listener_count(SignalKind::Up))
            .finish()
    }
}

/// Guard for one listener. Dropping it unsubscribes.
pub struct Subscription {
    id: u64,
    signals: Weak<RwLock<SignalsInner>>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.signals.upgrade()
            && let Ok(mut guard) = inner.write()
        {
            guard.entries.retain(|e| e.id != self.id);
            log::trace!("Pointer listener {} unsubscribed", self.id);
        }
    }
}
