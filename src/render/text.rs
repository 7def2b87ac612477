// PixelPanel
// copyright PixelPanel developers 2026

//! Text frames. Messages are split on '\n', word wrapped to the canvas
//! width and drawn centred, both ways, with the bundled DejaVu Sans Mono.

use super::canvas::Canvas;
use crate::error::{PanelError, PanelResult};
use fontdue::{Font, FontSettings};
use image::Rgba;
use std::sync::{Arc, OnceLock};

/// Embedded DejaVu Sans Mono, Latin/ASCII
pub static DEJAVU_MONO: &[u8] = include_bytes!("../../assets/fonts/DejaVuSansMono.ttf");

/// pixel size used on panels at least 24 rows high
pub const TEXT_PX: f32 = 12.0;

static BUILTIN: OnceLock<Result<Arc<TextRenderer>, String>> = OnceLock::new();

pub struct TextRenderer {
    font: Font,
}

impl TextRenderer {
    pub fn from_bytes(data: &[u8]) -> PanelResult<Self> {
        let font = Font::from_bytes(data, FontSettings::default())
            .map_err(|e| PanelError::Decode(format!("font: {}", e)))?;
        Ok(Self { font })
    }

    /// The bundled font, parsed once per process.
    pub fn builtin() -> PanelResult<Arc<Self>> {
        BUILTIN
            .get_or_init(|| {
                Self::from_bytes(DEJAVU_MONO)
                    .map(Arc::new)
                    .map_err(|e| e.to_string())
            })
            .clone()
            .map_err(PanelError::Decode)
    }

    /// text size for a canvas `height` rows high
    pub fn size_for(height: u32) -> f32 {
        TEXT_PX.min(height as f32 / 2.0).max(1.0)
    }

    pub fn text_width(&self, text: &str, size: f32) -> f32 {
        text.chars()
            .map(|c| self.font.metrics(c, size).advance_width)
            .sum()
    }

    /// Greedy word wrap. A word wider than `max_width` gets a line of its own.
    pub fn wrap(&self, msg: &str, size: f32, max_width: f32) -> Vec<String> {
        let mut lines = vec![];
        for para in msg.split('\n') {
            let mut line = String::new();
            for word in para.split_whitespace() {
                if line.is_empty() {
                    line.push_str(word);
                    continue;
                }
                let candidate = format!("{} {}", line, word);
                if self.text_width(&candidate, size) <= max_width {
                    line = candidate;
                } else {
                    lines.push(std::mem::take(&mut line));
                    line.push_str(word);
                }
            }
            lines.push(line);
        }
        lines
    }

    /// Draw `msg` centred on the canvas, glyph coverage blended over what
    /// is already there.
    pub fn draw_centered(&self, canvas: &mut Canvas, msg: &str, color: Rgba<u8>) {
        let (w, h) = canvas.dimensions();
        if w == 0 || h == 0 {
            return;
        }
        let size = Self::size_for(h);
        let (ascent, line_h) = match self.font.horizontal_line_metrics(size) {
            Some(m) => (m.ascent, m.new_line_size),
            None => (size, size),
        };

        let lines = self.wrap(msg, size, w as f32);
        let top = (h as f32 - line_h * lines.len() as f32) / 2.0;
        for (k, line) in lines.iter().enumerate() {
            let baseline = (top + k as f32 * line_h + ascent).round() as i32;
            let mut x = (w as f32 - self.text_width(line, size)) / 2.0;
            for c in line.chars() {
                let (m, bitmap) = self.font.rasterize(c, size);
                let gx = x.round() as i32 + m.xmin;
                let gy = baseline - m.height as i32 - m.ymin;
                for row in 0..m.height {
                    for col in 0..m.width {
                        let coverage = bitmap[row * m.width + col];
                        let (px, py) = (gx + col as i32, gy + row as i32);
                        if coverage == 0 || px < 0 || py < 0 || px >= w as i32 || py >= h as i32 {
                            continue;
                        }
                        blend(canvas.get_pixel_mut(px as u32, py as u32), color, coverage);
                    }
                }
                x += m.advance_width;
            }
        }
    }
}

fn blend(dst: &mut Rgba<u8>, src: Rgba<u8>, coverage: u8) {
    let a = coverage as u32;
    for i in 0..3 {
        dst.0[i] = ((src.0[i] as u32 * a + dst.0[i] as u32 * (255 - a)) / 255) as u8;
    }
    dst.0[3] = dst.0[3].max(coverage);
}
