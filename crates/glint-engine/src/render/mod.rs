//! Frame rendering: context handles, transform math, and the quad renderer.

mod ctx;
mod quad;
mod transform;

pub use ctx::{RenderCtx, RenderTarget};
pub use quad::{QUAD_EXTENT, QuadRenderer};
pub use transform::{cursor_translation, screen_projection};
