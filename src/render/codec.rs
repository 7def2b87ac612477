// PixelPanel
// copyright PixelPanel developers 2026

//! Converts a canvas into the controller's native frame buffer:
//! 2 bytes per pixel, little-endian rgb565, row-major.
//!
//! Channel reduction works on 16-bit samples (the 8-bit value widened as
//! `v * 0x101` and alpha-premultiplied) and keeps bits 3..7 of red, 2..7 of
//! green and 3..7 of blue. The deployed firmware decodes exactly this
//! layout, do not change the shifts without replacing the firmware too.
//!
//! Pixel (x, y) lands at byte `((y * row_width) + x) * 2`. `row_width` is
//! the firmware's fixed stride and may differ from the canvas width. Pixels
//! whose offset falls past the end of the buffer are dropped.

use image::Rgba;
use image::RgbaImage;

/// 16-bit alpha-premultiplied sample of an 8-bit straight-alpha channel
fn sample16(v: u8, a: u8) -> u32 {
    let v = v as u32 * 0x101;
    let a = a as u32 * 0x101;
    v * a / 0xffff
}

pub fn rgb565(px: Rgba<u8>) -> u16 {
    let [r, g, b, a] = px.0;
    let r = ((sample16(r, a) >> 3) & 0x1f) << 11;
    let g = ((sample16(g, a) >> 2) & 0x3f) << 5;
    let b = (sample16(b, a) >> 3) & 0x1f;
    (r | g | b) as u16
}

/// Encode the whole canvas. Output is always width * height * 2 bytes.
pub fn encode(canvas: &RgbaImage, row_width: u32) -> Vec<u8> {
    let (w, h) = canvas.dimensions();
    let mut data = vec![0u8; w as usize * h as usize * 2];
    for (x, y, px) in canvas.enumerate_pixels() {
        let off = (y as usize * row_width as usize + x as usize) * 2;
        if off + 2 > data.len() {
            continue;
        }
        data[off..off + 2].copy_from_slice(&rgb565(*px).to_le_bytes());
    }
    data
}
