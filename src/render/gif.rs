// PixelPanel
// copyright PixelPanel developers 2026

//! Animated gif support.
//!
//! `decode_animation` keeps the raw frames as stored in the file: each frame
//! is only its own rectangle, positioned by (left, top). `composite` then
//! turns them into full frames of the animation's bounding size.
//!
//! Composited frame `i` is frame 0 drawn as the base layer, then frames
//! `0..i` drawn over it in order. Frame `i` itself is not part of composited
//! frame `i`, each composited frame shows the state accumulated by the
//! frames before it. Panels in the field play animations this way, so the
//! compositor keeps it.

use super::canvas::{draw_over, draw_src, new_canvas};
use crate::error::{PanelError, PanelResult};
use image::RgbaImage;
use std::io::Cursor;

/// one frame as stored in the file
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFrame {
    pub left: u32,
    pub top: u32,
    pub image: RgbaImage,
}

impl SourceFrame {
    /// (min_x, min_y, max_x, max_y), max exclusive
    pub fn bounds(&self) -> (u32, u32, u32, u32) {
        (
            self.left,
            self.top,
            self.left + self.image.width(),
            self.top + self.image.height(),
        )
    }
}

#[derive(Debug, Clone)]
pub struct AnimatedImage {
    pub frames: Vec<SourceFrame>,
    /// per frame delay in 1/100 s
    pub delays: Vec<u16>,
    /// 0 plays forever
    pub loop_count: u32,
}

/// composited frames plus the untouched timing of the source
#[derive(Debug, Clone)]
pub struct CompositedAnimation {
    pub frames: Vec<RgbaImage>,
    pub delays: Vec<u16>,
    pub loop_count: u32,
}

impl CompositedAnimation {
    /// delay of frame `i` in milliseconds
    pub fn delay_ms(&self, i: usize) -> u64 {
        self.delays.get(i).copied().unwrap_or(0) as u64 * 10
    }
}

pub fn is_gif(data: &[u8]) -> bool {
    data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a")
}

/// Decode every frame of a gif without compositing.
pub fn decode_animation(data: &[u8]) -> PanelResult<AnimatedImage> {
    let mut options = gif::DecodeOptions::new();
    options.set_color_output(gif::ColorOutput::RGBA);
    let mut decoder = options.read_info(Cursor::new(data))?;

    let mut frames = vec![];
    let mut delays = vec![];
    while let Some(frame) = decoder.read_next_frame()? {
        let image = RgbaImage::from_raw(
            frame.width as u32,
            frame.height as u32,
            frame.buffer.to_vec(),
        )
        .ok_or_else(|| PanelError::Decode("gif frame buffer size mismatch".to_string()))?;
        frames.push(SourceFrame {
            left: frame.left as u32,
            top: frame.top as u32,
            image,
        });
        delays.push(frame.delay);
    }
    if frames.is_empty() {
        return Err(PanelError::Decode("gif has no frames".to_string()));
    }

    // no NETSCAPE extension reads as Finite(0), played forever like Infinite
    let loop_count = match decoder.repeat() {
        gif::Repeat::Infinite => 0,
        gif::Repeat::Finite(n) => n as u32,
    };

    Ok(AnimatedImage {
        frames,
        delays,
        loop_count,
    })
}

/// Union of all frame rectangles, starting from an origin of (0, 0).
pub fn bounding_size(anim: &AnimatedImage) -> (u32, u32) {
    let (mut max_x, mut max_y) = (0, 0);
    for f in &anim.frames {
        let (_, _, x, y) = f.bounds();
        max_x = max_x.max(x);
        max_y = max_y.max(y);
    }
    (max_x, max_y)
}

pub fn composite(anim: &AnimatedImage) -> CompositedAnimation {
    let (width, height) = bounding_size(anim);
    let mut frames = Vec::with_capacity(anim.frames.len());

    if let Some(base) = anim.frames.first() {
        for i in 0..anim.frames.len() {
            let mut img = new_canvas(width, height);
            draw_src(&mut img, &base.image, base.left as i64, base.top as i64);
            for f in &anim.frames[..i] {
                draw_over(&mut img, &f.image, f.left as i64, f.top as i64);
            }
            frames.push(img);
        }
    }

    CompositedAnimation {
        frames,
        delays: anim.delays.clone(),
        loop_count: anim.loop_count,
    }
}
