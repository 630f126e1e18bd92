//! Browser bindings: a canvas input surface, a `requestAnimationFrame`
//! frame source, and console logging.
//!
//! ```ignore
//! splatview::web::init_logging(log::Level::Info);
//! let canvas = CanvasSurface::from_element_id("splatCanvas")?;
//! let mut viewer = SplatViewer::builder().build(canvas, AnimationFrames::new());
//! viewer.initialize();
//! ```

mod canvas;
mod frame;

pub use canvas::{CanvasListener, CanvasSurface};
pub use frame::{AnimationFrames, FrameToken};

/// Route `log` output to the browser console and panics to
/// `console.error`. Safe to call more than once.
pub fn init_logging(level: log::Level) {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(level).is_err() {
        log::debug!("console logger already installed");
    }
}
