use glam::Vec2;

use super::event::MouseButton;

/// What a drag does to the orbit, fixed when the drag starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    /// Rotate yaw/pitch around the target.
    Orbit,
    /// Translate the target along the camera's right/up axes.
    Pan,
}

impl DragMode {
    /// Secondary or middle button, or shift held, pans; anything else
    /// orbits.
    #[must_use]
    pub fn for_press(button: MouseButton, shift: bool) -> Self {
        match button {
            MouseButton::Secondary | MouseButton::Middle => Self::Pan,
            _ if shift => Self::Pan,
            _ => Self::Orbit,
        }
    }
}

/// Transient state between pointer-down and pointer-up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    mode: DragMode,
    last: Vec2,
}

impl DragSession {
    /// Start a drag at the given client position.
    #[must_use]
    pub fn begin(mode: DragMode, x: f32, y: f32) -> Self {
        Self {
            mode,
            last: Vec2::new(x, y),
        }
    }

    /// Mode chosen at drag start.
    #[must_use]
    pub fn mode(&self) -> DragMode {
        self.mode
    }

    /// Record a new pointer position and return the pixel delta since the
    /// previous one.
    pub fn advance(&mut self, x: f32, y: f32) -> Vec2 {
        let current = Vec2::new(x, y);
        let delta = current - self.last;
        self.last = current;
        delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_selection() {
        assert_eq!(DragMode::for_press(MouseButton::Primary, false), DragMode::Orbit);
        assert_eq!(DragMode::for_press(MouseButton::Primary, true), DragMode::Pan);
        assert_eq!(DragMode::for_press(MouseButton::Secondary, false), DragMode::Pan);
        assert_eq!(DragMode::for_press(MouseButton::Middle, false), DragMode::Pan);
        assert_eq!(DragMode::for_press(MouseButton::Other(3), false), DragMode::Orbit);
    }

    #[test]
    fn deltas_are_incremental() {
        let mut drag = DragSession::begin(DragMode::Orbit, 10.0, 10.0);
        assert_eq!(drag.advance(15.0, 8.0), Vec2::new(5.0, -2.0));
        assert_eq!(drag.advance(15.0, 8.0), Vec2::ZERO);
        assert_eq!(drag.advance(0.0, 0.0), Vec2::new(-15.0, -8.0));
    }
}
