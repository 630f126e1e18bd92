//! Input handling: event types, drag sessions, and the subscription seams
//! that connect hosts to the orbit controller.

/// Drag mode selection and pointer deltas.
pub mod drag;
/// Platform-agnostic input events.
pub mod event;
/// Input surfaces and frame sources.
pub mod surface;
/// Converts `winit` window events into input events.
#[cfg(feature = "viewer")]
pub mod winit_adapter;

pub use drag::{DragMode, DragSession};
pub use event::{EventKind, InputEvent, MouseButton};
pub use surface::{
    EventBus, FrameCallback, FrameSignal, FrameSource, InputHandler,
    InputSurface, ListenerId,
};
#[cfg(feature = "viewer")]
pub use winit_adapter::WinitInputAdapter;
