/// Platform-agnostic pointer input events.
///
/// These are fed into
/// [`OrbitController::handle_input`](crate::camera::OrbitController::handle_input),
/// usually by an [`InputSurface`](super::InputSurface) subscription.
///
/// # Example
///
/// ```ignore
/// let prevent_default = controller.handle_input(InputEvent::PointerDown {
///     x: 100.0,
///     y: 200.0,
///     button: MouseButton::Primary,
///     shift: false,
/// });
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A pointer button went down over the surface.
    PointerDown {
        /// Horizontal client coordinate in CSS pixels.
        x: f32,
        /// Vertical client coordinate in CSS pixels.
        y: f32,
        /// Which button went down.
        button: MouseButton,
        /// Whether the shift modifier was held.
        shift: bool,
    },
    /// The pointer moved to a new client position.
    PointerMove {
        /// Horizontal client coordinate in CSS pixels.
        x: f32,
        /// Vertical client coordinate in CSS pixels.
        y: f32,
    },
    /// A pointer button was released.
    PointerUp,
    /// The pointer left the surface.
    PointerLeave,
    /// Wheel scroll (positive = scroll down / zoom out).
    Wheel {
        /// Vertical scroll amount; only its sign is used.
        delta_y: f32,
    },
    /// The browser asked to open a context menu.
    ContextMenu,
}

impl InputEvent {
    /// The event family this event belongs to.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            Self::PointerDown { .. } => EventKind::PointerDown,
            Self::PointerMove { .. } => EventKind::PointerMove,
            Self::PointerUp => EventKind::PointerUp,
            Self::PointerLeave => EventKind::PointerLeave,
            Self::Wheel { .. } => EventKind::Wheel,
            Self::ContextMenu => EventKind::ContextMenu,
        }
    }
}

/// Event families an input surface can deliver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// `pointerdown`
    PointerDown,
    /// `pointermove`
    PointerMove,
    /// `pointerup`
    PointerUp,
    /// `pointerleave`
    PointerLeave,
    /// `wheel`
    Wheel,
    /// `contextmenu`
    ContextMenu,
}

impl EventKind {
    /// Every event family, in subscription order.
    pub const ALL: [EventKind; 6] = [
        EventKind::PointerDown,
        EventKind::PointerMove,
        EventKind::PointerUp,
        EventKind::PointerLeave,
        EventKind::Wheel,
        EventKind::ContextMenu,
    ];

    /// The DOM event type string.
    #[must_use]
    pub fn dom_name(self) -> &'static str {
        match self {
            Self::PointerDown => "pointerdown",
            Self::PointerMove => "pointermove",
            Self::PointerUp => "pointerup",
            Self::PointerLeave => "pointerleave",
            Self::Wheel => "wheel",
            Self::ContextMenu => "contextmenu",
        }
    }
}

/// Platform-agnostic mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary (usually left) button.
    Primary,
    /// Middle button (wheel click).
    Middle,
    /// Secondary (usually right) button.
    Secondary,
    /// Any other button, by DOM index.
    Other(i16),
}

impl MouseButton {
    /// Map a DOM `MouseEvent.button` index.
    #[must_use]
    pub fn from_dom(button: i16) -> Self {
        match button {
            0 => Self::Primary,
            1 => Self::Middle,
            2 => Self::Secondary,
            other => Self::Other(other),
        }
    }
}

#[cfg(feature = "viewer")]
impl From<winit::event::MouseButton> for MouseButton {
    fn from(button: winit::event::MouseButton) -> Self {
        match button {
            winit::event::MouseButton::Left => Self::Primary,
            winit::event::MouseButton::Right => Self::Secondary,
            winit::event::MouseButton::Middle => Self::Middle,
            winit::event::MouseButton::Back => Self::Other(3),
            winit::event::MouseButton::Forward => Self::Other(4),
            winit::event::MouseButton::Other(n) => {
                Self::Other(i16::try_from(n).unwrap_or(i16::MAX))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dom_button_indices() {
        assert_eq!(MouseButton::from_dom(0), MouseButton::Primary);
        assert_eq!(MouseButton::from_dom(1), MouseButton::Middle);
        assert_eq!(MouseButton::from_dom(2), MouseButton::Secondary);
        assert_eq!(MouseButton::from_dom(4), MouseButton::Other(4));
    }

    #[test]
    fn event_kinds_match_dom_names() {
        let ev = InputEvent::Wheel { delta_y: 3.0 };
        assert_eq!(ev.kind(), EventKind::Wheel);
        assert_eq!(ev.kind().dom_name(), "wheel");
        assert_eq!(InputEvent::PointerLeave.kind().dom_name(), "pointerleave");
        assert_eq!(EventKind::ALL.len(), 6);
    }
}
