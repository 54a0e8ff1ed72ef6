//! Coordinate and color value types shared across the engine.
//!
//! Canonical CPU space:
//! - Logical pixels (DPI-aware)
//! - Origin top-left
//! - +X right, +Y down
//!
//! The quad renderer converts logical px to clip space with an off-center
//! orthographic projection built from a [`Viewport`].

mod color;
mod vec2;
mod viewport;

pub use color::Color;
pub use vec2::Vec2;
pub use viewport::Viewport;
