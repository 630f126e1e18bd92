use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use wasm_bindgen::{closure::Closure, JsCast};

use crate::{
    input::{FrameCallback, FrameSource},
    util::clock::ManualClock,
};

/// Receipt for an [`AnimationFrames`] callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameToken(u64);

type SharedCallback = Rc<RefCell<FrameCallback>>;

#[derive(Default)]
struct FramesInner {
    next_id: u64,
    callbacks: Vec<(FrameToken, SharedCallback)>,
    /// Fed the `requestAnimationFrame` timestamp before callbacks run.
    clock: Option<ManualClock>,
    tick: Option<Closure<dyn FnMut(f64)>>,
    pending: Option<i32>,
}

impl Drop for FramesInner {
    fn drop(&mut self) {
        if let (Some(handle), Some(window)) = (self.pending, web_sys::window()) {
            let _ = window.cancel_animation_frame(handle);
        }
    }
}

/// Frame source driven by `requestAnimationFrame`. The loop runs while at
/// least one callback is registered. Clones share one loop.
#[derive(Clone, Default)]
pub struct AnimationFrames {
    inner: Rc<RefCell<FramesInner>>,
}

impl AnimationFrames {
    /// Frame source with no callbacks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance `clock` to each frame's timestamp before running callbacks,
    /// so tweens are timed by the browser's frame clock.
    #[must_use]
    pub fn with_clock(self, clock: ManualClock) -> Self {
        self.inner.borrow_mut().clock = Some(clock);
        self
    }

    fn schedule(inner: &Rc<RefCell<FramesInner>>) {
        let mut state = inner.borrow_mut();
        if state.pending.is_some() {
            return;
        }
        if state.tick.is_none() {
            let weak = Rc::downgrade(inner);
            state.tick = Some(Closure::new(move |timestamp: f64| {
                Self::run_frame(&weak, timestamp);
            }));
        }
        let Some(window) = web_sys::window() else {
            log::warn!("requestAnimationFrame: no window");
            return;
        };
        let Some(tick) = state.tick.as_ref() else {
            return;
        };
        match window.request_animation_frame(tick.as_ref().unchecked_ref()) {
            Ok(handle) => state.pending = Some(handle),
            Err(e) => log::warn!("requestAnimationFrame failed: {e:?}"),
        }
    }

    fn run_frame(weak: &Weak<RefCell<FramesInner>>, timestamp: f64) {
        let Some(inner) = weak.upgrade() else {
            return;
        };
        let callbacks: Vec<SharedCallback> = {
            let mut state = inner.borrow_mut();
            state.pending = None;
            if let Some(clock) = &state.clock {
                clock.set(timestamp);
            }
            state.callbacks.iter().map(|(_, cb)| Rc::clone(cb)).collect()
        };
        for callback in callbacks {
            if let Ok(mut callback) = callback.try_borrow_mut() {
                (*callback)();
            }
        }
        if !inner.borrow().callbacks.is_empty() {
            Self::schedule(&inner);
        }
    }
}

impl FrameSource for AnimationFrames {
    type Token = FrameToken;

    fn on_frame(&mut self, callback: FrameCallback) -> Option<FrameToken> {
        let token = {
            let mut state = self.inner.borrow_mut();
            let token = FrameToken(state.next_id);
            state.next_id += 1;
            state.callbacks.push((token, Rc::new(RefCell::new(callback))));
            token
        };
        Self::schedule(&self.inner);
        Some(token)
    }

    fn off_frame(&mut self, token: FrameToken) {
        let mut state = self.inner.borrow_mut();
        state.callbacks.retain(|(id, _)| *id != token);
        if state.callbacks.is_empty() {
            if let (Some(handle), Some(window)) =
                (state.pending.take(), web_sys::window())
            {
                let _ = window.cancel_animation_frame(handle);
            }
        }
    }
}
