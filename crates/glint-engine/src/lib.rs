//! Glint engine crate.
//!
//! This crate owns the platform + GPU runtime pieces used by the demo binary.

pub mod device;
pub mod window;
pub mod input;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
