use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{
    AddEventListenerOptions, Event, HtmlCanvasElement, MouseEvent, WheelEvent,
};

use crate::{
    error::SplatViewError,
    input::{EventKind, InputEvent, InputHandler, InputSurface, MouseButton},
};

/// Input surface over an `HtmlCanvasElement`. Clones share the element.
#[derive(Debug, Clone)]
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
}

/// A DOM listener registered on the canvas. Dropping it without
/// unsubscribing leaves a dangling listener, so hand it back to
/// [`InputSurface::unsubscribe`].
pub struct CanvasListener {
    kind: EventKind,
    closure: Closure<dyn FnMut(Event)>,
}

impl CanvasSurface {
    /// Wrap `canvas` and disable browser touch gestures on it.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        if let Err(e) = canvas.style().set_property("touch-action", "none") {
            log::warn!("could not set touch-action on canvas: {e:?}");
        }
        Self { canvas }
    }

    /// Look up a canvas by element id.
    pub fn from_element_id(id: &str) -> Result<Self, SplatViewError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| SplatViewError::Web("no document".to_owned()))?;
        let element = document.get_element_by_id(id).ok_or_else(|| {
            SplatViewError::Web(format!("no element with id '{id}'"))
        })?;
        let canvas = element.dyn_into::<HtmlCanvasElement>().map_err(|_| {
            SplatViewError::Web(format!("element '{id}' is not a canvas"))
        })?;
        Ok(Self::new(canvas))
    }

    /// The wrapped element.
    #[must_use]
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl InputSurface for CanvasSurface {
    type Subscription = CanvasListener;

    fn subscribe(
        &mut self,
        kind: EventKind,
        mut handler: InputHandler,
    ) -> Option<CanvasListener> {
        let closure =
            Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                let Some(input) = translate(kind, &event) else {
                    return;
                };
                if handler(&input) {
                    event.prevent_default();
                }
            });

        // Wheel listeners must be non-passive to cancel page scroll.
        let options = AddEventListenerOptions::new();
        options.set_passive(false);
        let added = self
            .canvas
            .add_event_listener_with_callback_and_add_event_listener_options(
                kind.dom_name(),
                closure.as_ref().unchecked_ref(),
                &options,
            );
        match added {
            Ok(()) => Some(CanvasListener { kind, closure }),
            Err(e) => {
                log::warn!("addEventListener('{}') failed: {e:?}", kind.dom_name());
                None
            }
        }
    }

    fn unsubscribe(&mut self, subscription: CanvasListener) {
        let removed = self.canvas.remove_event_listener_with_callback(
            subscription.kind.dom_name(),
            subscription.closure.as_ref().unchecked_ref(),
        );
        if let Err(e) = removed {
            log::warn!(
                "removeEventListener('{}') failed: {e:?}",
                subscription.kind.dom_name()
            );
        }
    }
}

/// Convert a DOM event into an [`InputEvent`]. Events of an unexpected
/// type are dropped.
fn translate(kind: EventKind, event: &Event) -> Option<InputEvent> {
    match kind {
        EventKind::PointerDown => {
            let mouse = event.dyn_ref::<MouseEvent>()?;
            Some(InputEvent::PointerDown {
                x: mouse.client_x() as f32,
                y: mouse.client_y() as f32,
                button: MouseButton::from_dom(mouse.button()),
                shift: mouse.shift_key(),
            })
        }
        EventKind::PointerMove => {
            let mouse = event.dyn_ref::<MouseEvent>()?;
            Some(InputEvent::PointerMove {
                x: mouse.client_x() as f32,
                y: mouse.client_y() as f32,
            })
        }
        EventKind::PointerUp => Some(InputEvent::PointerUp),
        EventKind::PointerLeave => Some(InputEvent::PointerLeave),
        EventKind::Wheel => {
            let wheel = event.dyn_ref::<WheelEvent>()?;
            Some(InputEvent::Wheel {
                delta_y: wheel.delta_y() as f32,
            })
        }
        EventKind::ContextMenu => Some(InputEvent::ContextMenu),
    }
}
