// PixelPanel
// copyright PixelPanel developers 2026

//! # Render module
//!
//! Everything between a decoded image and the bytes sent to a device.
//!
//! ## Submodules
//! - `canvas`: the panel drawing surface and resize / draw-over helpers
//! - `codec`: canvas to rgb565 little-endian frame buffer
//! - `gif`: raw gif frames, bounding box and the accumulating compositor
//! - `text`: centred, wrapped message frames drawn with fontdue

pub mod canvas;
pub mod codec;
pub mod gif;
pub mod text;

pub use canvas::Canvas;
pub use codec::{encode, rgb565};
pub use self::gif::{AnimatedImage, CompositedAnimation, SourceFrame};
pub use text::TextRenderer;
