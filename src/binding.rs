//! Scoped attachment of an orbit controller to an input surface and a
//! frame source.
//!
//! A [`ControlsBinding`] owns every subscription it makes and releases them
//! on [`detach`](ControlsBinding::detach), [`destroy`](ControlsBinding::destroy)
//! or drop. Handlers hold only a weak reference to the controller, so a
//! binding never keeps its controller alive.

use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use crate::{
    camera::{CameraHandle, OrbitController},
    input::{
        EventBus, EventKind, FrameSignal, FrameSource, InputEvent,
        InputSurface,
    },
    util::clock::{Clock, SystemClock},
};

/// Orbit controller shared between the host and its bindings.
pub type SharedController<C, K = SystemClock> =
    Rc<RefCell<OrbitController<C, K>>>;

/// What a binding drives: input in, one update per frame, teardown.
pub trait ControlsTarget {
    /// Process one input event; returns "prevent default".
    fn handle_input(&mut self, event: InputEvent) -> bool;
    /// Per-frame update; returns whether the pose was recomputed.
    fn update(&mut self) -> bool;
    /// Permanently disable the target.
    fn destroy(&mut self);
}

impl<C: CameraHandle, K: Clock> ControlsTarget for OrbitController<C, K> {
    fn handle_input(&mut self, event: InputEvent) -> bool {
        Self::handle_input(self, event)
    }

    fn update(&mut self) -> bool {
        Self::update(self)
    }

    fn destroy(&mut self) {
        Self::destroy(self);
    }
}

type WeakTarget = Weak<RefCell<dyn ControlsTarget>>;

/// Live subscriptions of one controller on one surface and one frame
/// source.
pub struct ControlsBinding<
    S: InputSurface = EventBus,
    F: FrameSource = FrameSignal,
> {
    target: WeakTarget,
    surface: Option<(S, Vec<S::Subscription>)>,
    frames: Option<(F, F::Token)>,
}

impl<S: InputSurface, F: FrameSource> ControlsBinding<S, F> {
    /// Unattached binding for `controller`.
    #[must_use]
    pub fn new<T: ControlsTarget + 'static>(
        controller: &Rc<RefCell<T>>,
    ) -> Self {
        let target: Rc<RefCell<dyn ControlsTarget>> = controller.clone();
        Self {
            target: Rc::downgrade(&target),
            surface: None,
            frames: None,
        }
    }

    /// Whether input handlers are currently registered.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.surface.is_some()
    }

    /// Whether per-frame updates are currently registered.
    #[must_use]
    pub fn drives_frames(&self) -> bool {
        self.frames.is_some()
    }

    /// Register pointer, wheel and context-menu handlers on `surface`.
    /// Any previously attached surface is released first.
    pub fn attach(&mut self, mut surface: S) {
        self.detach_surface();

        let mut subscriptions = Vec::with_capacity(EventKind::ALL.len());
        for kind in EventKind::ALL {
            let target = self.target.clone();
            let handler = Box::new(move |event: &InputEvent| {
                with_target(&target, |t| t.handle_input(*event))
                    .unwrap_or(false)
            });
            match surface.subscribe(kind, handler) {
                Some(subscription) => subscriptions.push(subscription),
                None => log::warn!(
                    "controls: could not subscribe to '{}'",
                    kind.dom_name()
                ),
            }
        }
        log::debug!("controls attached ({} listeners)", subscriptions.len());
        self.surface = Some((surface, subscriptions));
    }

    /// Run the controller's `update()` on every frame of `frames`. Any
    /// previously registered frame source is released first.
    pub fn attach_frames(&mut self, mut frames: F) {
        self.detach_frames();

        let target = self.target.clone();
        let callback = Box::new(move || {
            let _ = with_target(&target, |t| t.update());
        });
        match frames.on_frame(callback) {
            Some(token) => self.frames = Some((frames, token)),
            None => log::warn!("controls: could not register frame callback"),
        }
    }

    /// Release every subscription. Safe to call repeatedly.
    pub fn detach(&mut self) {
        let was_attached = self.surface.is_some() || self.frames.is_some();
        self.detach_surface();
        self.detach_frames();
        if was_attached {
            log::debug!("controls detached");
        }
    }

    /// Detach and permanently disable the controller.
    pub fn destroy(&mut self) {
        self.detach();
        let _ = with_target(&self.target, |t| t.destroy());
    }

    fn detach_surface(&mut self) {
        if let Some((mut surface, subscriptions)) = self.surface.take() {
            for subscription in subscriptions {
                surface.unsubscribe(subscription);
            }
        }
    }

    fn detach_frames(&mut self) {
        if let Some((mut frames, token)) = self.frames.take() {
            frames.off_frame(token);
        }
    }
}

impl<S: InputSurface, F: FrameSource> Drop for ControlsBinding<S, F> {
    fn drop(&mut self) {
        self.detach();
    }
}

/// Run `f` on the target if it is still alive and not already borrowed.
fn with_target<R>(
    target: &WeakTarget,
    f: impl FnOnce(&mut dyn ControlsTarget) -> R,
) -> Option<R> {
    let strong = target.upgrade()?;
    let Ok(mut guard) = strong.try_borrow_mut() else {
        log::debug!("controls: controller busy, event dropped");
        return None;
    };
    Some(f(&mut *guard))
}
