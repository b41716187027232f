// VIEW: Rendering and on-screen text
pub mod render;

pub use render::{FrameRenderer, TraceRenderer};
#[cfg(target_arch = "wasm32")]
pub use render::CanvasRenderer;
