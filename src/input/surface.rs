//! Subscription seams between hosts and controls.
//!
//! An [`InputSurface`] delivers [`InputEvent`]s to registered handlers and a
//! [`FrameSource`] fires once per rendered frame. [`EventBus`] and
//! [`FrameSignal`] are in-memory implementations for native hosts (feed them
//! from a window event loop) and for tests.

use std::{cell::RefCell, rc::Rc};

use super::event::{EventKind, InputEvent};

/// Input callback. Returns `true` when the host should suppress the
/// platform default action for the event.
pub type InputHandler = Box<dyn FnMut(&InputEvent) -> bool>;

/// Per-frame callback.
pub type FrameCallback = Box<dyn FnMut()>;

/// Something that can deliver input events to subscribed handlers.
pub trait InputSurface {
    /// Receipt returned by [`subscribe`](Self::subscribe), handed back to
    /// [`unsubscribe`](Self::unsubscribe) to release the handler.
    type Subscription;

    /// Register `handler` for events of `kind`. Returns `None` when the
    /// surface could not register it.
    fn subscribe(
        &mut self,
        kind: EventKind,
        handler: InputHandler,
    ) -> Option<Self::Subscription>;

    /// Release a previously registered handler.
    fn unsubscribe(&mut self, subscription: Self::Subscription);
}

/// Something that fires a callback once per rendered frame.
pub trait FrameSource {
    /// Receipt for a registered callback.
    type Token;

    /// Register `callback` to run every frame.
    fn on_frame(&mut self, callback: FrameCallback) -> Option<Self::Token>;

    /// Stop running a registered callback.
    fn off_frame(&mut self, token: Self::Token);
}

/// Opaque id returned by the in-memory surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type SharedHandler = Rc<RefCell<InputHandler>>;

#[derive(Default)]
struct BusInner {
    next_id: u64,
    listeners: Vec<(ListenerId, EventKind, SharedHandler)>,
}

/// In-memory input surface. Clones share one listener table.
#[derive(Clone, Default)]
pub struct EventBus {
    inner: Rc<RefCell<BusInner>>,
}

impl EventBus {
    /// Create an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `event` to every handler subscribed to its kind. Returns
    /// `true` if any handler asked to prevent the default action.
    ///
    /// Handlers may subscribe or unsubscribe while being dispatched; the
    /// change takes effect from the next dispatch.
    pub fn dispatch(&self, event: &InputEvent) -> bool {
        let kind = event.kind();
        let handlers: Vec<SharedHandler> = self
            .inner
            .borrow()
            .listeners
            .iter()
            .filter(|(_, k, _)| *k == kind)
            .map(|(_, _, h)| Rc::clone(h))
            .collect();

        let mut prevent_default = false;
        for handler in handlers {
            // A handler re-entering dispatch for itself is skipped.
            if let Ok(mut handler) = handler.try_borrow_mut() {
                prevent_default |= (*handler)(event);
            }
        }
        prevent_default
    }

    /// Number of registered handlers across all kinds.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

impl InputSurface for EventBus {
    type Subscription = ListenerId;

    fn subscribe(
        &mut self,
        kind: EventKind,
        handler: InputHandler,
    ) -> Option<ListenerId> {
        let mut inner = self.inner.borrow_mut();
        let id = ListenerId(inner.next_id);
        inner.next_id += 1;
        inner
            .listeners
            .push((id, kind, Rc::new(RefCell::new(handler))));
        Some(id)
    }

    fn unsubscribe(&mut self, subscription: ListenerId) {
        self.inner
            .borrow_mut()
            .listeners
            .retain(|(id, _, _)| *id != subscription);
    }
}

type SharedCallback = Rc<RefCell<FrameCallback>>;

#[derive(Default)]
struct SignalInner {
    next_id: u64,
    callbacks: Vec<(ListenerId, SharedCallback)>,
}

/// In-memory frame source: calling [`tick`](Self::tick) runs every
/// registered callback once. Clones share one callback table.
#[derive(Clone, Default)]
pub struct FrameSignal {
    inner: Rc<RefCell<SignalInner>>,
}

impl FrameSignal {
    /// Create a signal with no callbacks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every registered callback once.
    pub fn tick(&self) {
        let callbacks: Vec<SharedCallback> = self
            .inner
            .borrow()
            .callbacks
            .iter()
            .map(|(_, cb)| Rc::clone(cb))
            .collect();
        for callback in callbacks {
            if let Ok(mut callback) = callback.try_borrow_mut() {
                (*callback)();
            }
        }
    }

    /// Number of registered callbacks.
    #[must_use]
    pub fn callback_count(&self) -> usize {
        self.inner.borrow().callbacks.len()
    }
}

impl FrameSource for FrameSignal {
    type Token = ListenerId;

    fn on_frame(&mut self, callback: FrameCallback) -> Option<ListenerId> {
        let mut inner = self.inner.borrow_mut();
        let id = ListenerId(inner.next_id);
        inner.next_id += 1;
        inner.callbacks.push((id, Rc::new(RefCell::new(callback))));
        Some(id)
    }

    fn off_frame(&mut self, token: ListenerId) {
        self.inner
            .borrow_mut()
            .callbacks
            .retain(|(id, _)| *id != token);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn dispatch_reaches_only_matching_kind() {
        let mut bus = EventBus::new();
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let _ = bus.subscribe(
            EventKind::Wheel,
            Box::new(move |_| {
                counter.set(counter.get() + 1);
                true
            }),
        );

        assert!(bus.dispatch(&InputEvent::Wheel { delta_y: 1.0 }));
        assert!(!bus.dispatch(&InputEvent::PointerUp));
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn unsubscribe_removes_handler() {
        let mut bus = EventBus::new();
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let id = bus
            .subscribe(
                EventKind::PointerUp,
                Box::new(move |_| {
                    counter.set(counter.get() + 1);
                    false
                }),
            )
            .unwrap();
        assert_eq!(bus.listener_count(), 1);

        bus.unsubscribe(id);
        assert_eq!(bus.listener_count(), 0);
        assert!(!bus.dispatch(&InputEvent::PointerUp));
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn clones_share_listeners() {
        let mut bus = EventBus::new();
        let other = bus.clone();
        let _ = bus.subscribe(EventKind::ContextMenu, Box::new(|_| true));
        assert!(other.dispatch(&InputEvent::ContextMenu));
    }

    #[test]
    fn frame_signal_ticks_until_removed() {
        let mut frames = FrameSignal::new();
        let count = Rc::new(Cell::new(0));
        let counter = Rc::clone(&count);
        let token = frames
            .on_frame(Box::new(move || counter.set(counter.get() + 1)))
            .unwrap();

        frames.tick();
        frames.tick();
        frames.off_frame(token);
        frames.tick();
        assert_eq!(count.get(), 2);
        assert_eq!(frames.callback_count(), 0);
    }
}
