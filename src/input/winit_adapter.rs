use glam::Vec2;
use winit::event::{ElementState, MouseScrollDelta, WindowEvent};

use super::event::{InputEvent, MouseButton};

/// Pixel-delta wheel events are scaled to line units.
const PIXELS_PER_LINE: f32 = 100.0;

/// Converts `winit` window events into [`InputEvent`]s.
///
/// winit reports button presses without a position and tracks modifiers
/// separately, so the adapter remembers the last cursor position and the
/// shift state.
#[derive(Debug, Clone, Copy, Default)]
pub struct WinitInputAdapter {
    cursor: Vec2,
    shift: bool,
}

impl WinitInputAdapter {
    /// Create an adapter with the cursor at the origin.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last known cursor position in physical pixels.
    #[must_use]
    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }

    /// Translate one window event. Returns `None` for events the orbit
    /// controls do not consume.
    pub fn translate(&mut self, event: &WindowEvent) -> Option<InputEvent> {
        match event {
            WindowEvent::ModifiersChanged(modifiers) => {
                self.shift = modifiers.state().shift_key();
                None
            }
            WindowEvent::CursorMoved { position, .. } => {
                Some(self.cursor_moved(position.x as f32, position.y as f32))
            }
            WindowEvent::CursorLeft { .. } => Some(InputEvent::PointerLeave),
            WindowEvent::MouseInput { state, button, .. } => {
                Some(self.button(*state, MouseButton::from(*button)))
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => {
                        pos.y as f32 / PIXELS_PER_LINE
                    }
                };
                Some(Self::wheel(lines))
            }
            _ => None,
        }
    }

    fn cursor_moved(&mut self, x: f32, y: f32) -> InputEvent {
        self.cursor = Vec2::new(x, y);
        InputEvent::PointerMove { x, y }
    }

    fn button(&self, state: ElementState, button: MouseButton) -> InputEvent {
        match state {
            ElementState::Pressed => InputEvent::PointerDown {
                x: self.cursor.x,
                y: self.cursor.y,
                button,
                shift: self.shift,
            },
            ElementState::Released => InputEvent::PointerUp,
        }
    }

    /// winit scrolls positive away from the user; DOM `deltaY` (and the
    /// controller) treat positive as zoom out.
    fn wheel(lines: f32) -> InputEvent {
        InputEvent::Wheel { delta_y: -lines }
    }
}
