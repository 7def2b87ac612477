// PixelPanel
// copyright PixelPanel developers 2026

//! Canvas is the panel's drawing surface, a plain RGBA buffer sized to the
//! panel. A fresh canvas is transparent black, which the codec sends as
//! black.

use image::{
    imageops::{self, FilterType},
    DynamicImage, Rgba, RgbaImage,
};

pub type Canvas = RgbaImage;

pub fn new_canvas(width: u32, height: u32) -> Canvas {
    RgbaImage::new(width, height)
}

/// Resize to exactly width x height. Aspect ratio is not kept, the panel
/// is always filled edge to edge.
pub fn fit(img: &RgbaImage, width: u32, height: u32, filter: FilterType) -> RgbaImage {
    if width == 0 || height == 0 || img.width() == 0 || img.height() == 0 {
        return RgbaImage::new(width, height);
    }
    if img.dimensions() == (width, height) {
        return img.clone();
    }
    imageops::resize(img, width, height, filter)
}

/// decoded still image resized to the panel, bilinear
pub fn fit_still(img: &DynamicImage, width: u32, height: u32) -> RgbaImage {
    fit(&img.to_rgba8(), width, height, FilterType::Triangle)
}

/// alpha composite `img` over the canvas with its top-left at (x, y)
pub fn draw_over(canvas: &mut Canvas, img: &RgbaImage, x: i64, y: i64) {
    imageops::overlay(canvas, img, x, y);
}

/// copy `img` into the canvas at (x, y), alpha included
pub fn draw_src(canvas: &mut Canvas, img: &RgbaImage, x: i64, y: i64) {
    imageops::replace(canvas, img, x, y);
}

pub fn fill(canvas: &mut Canvas, color: Rgba<u8>) {
    for px in canvas.pixels_mut() {
        *px = color;
    }
}
