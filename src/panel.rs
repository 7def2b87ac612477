// PixelPanel
// copyright PixelPanel developers 2026

//! Panel is a named, addressable LED-matrix display.
//!
//! The persisted part (name, address, width, height) lives in a PanelRecord.
//! The runtime part is the canvas and the animation slot. Canvas and slot
//! are never written to disk.
//!
//! Ingestion decides per input: a gif with more than one frame is composited
//! and played on an animation thread, anything else is decoded as a still
//! image, resized bilinear to the panel and pushed once from the caller's
//! thread. While gif frames are composited the panel shows a short
//! "Decoding GIF" message.

use crate::animation::{play, AnimationState, AnimationTask, Animator};
use crate::error::PanelResult;
use crate::render::{
    canvas::{draw_over, fill, fit_still, new_canvas, Canvas},
    codec::encode,
    gif::{composite, decode_animation, is_gif, AnimatedImage},
    text::TextRenderer,
};
use crate::transport::Transport;
use image::{DynamicImage, Rgba, RgbaImage};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::Path,
    sync::{Arc, Mutex, MutexGuard},
};

/// shown while an animation is being composited
pub const DECODING_MESSAGE: &str = "Decoding\nGIF";

/// what a panel record file holds
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelRecord {
    pub name: String,
    pub address: String,
    pub width: u8,
    pub height: u8,
}

/// The part of a panel shared with its animation thread:
/// where the device is, how big it is, and the canvas.
pub struct Display {
    address: String,
    width: u8,
    height: u8,
    row_width: u32,
    canvas: Mutex<Canvas>,
    transport: Arc<dyn Transport>,
    text: Option<Arc<TextRenderer>>,
}

impl Display {
    fn new(address: &str, width: u8, height: u8, row_width: u32, transport: Arc<dyn Transport>) -> Self {
        let text = match TextRenderer::builtin() {
            Ok(t) => Some(t),
            Err(e) => {
                warn!("{}: text frames disabled: {}", address, e);
                None
            }
        };
        Self {
            address: address.to_string(),
            width,
            height,
            row_width,
            canvas: Mutex::new(new_canvas(width as u32, height as u32)),
            transport,
            text,
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn geometry(&self) -> (u32, u32) {
        (self.width as u32, self.height as u32)
    }

    fn lock_canvas(&self) -> MutexGuard<'_, Canvas> {
        self.canvas.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Draw a panel sized frame over the canvas and push the result.
    pub fn render(&self, frame: &RgbaImage) -> PanelResult<()> {
        let data = {
            let mut canvas = self.lock_canvas();
            draw_over(&mut canvas, frame, 0, 0);
            encode(&canvas, self.row_width)
        };
        self.transport.push_frame(&self.address, &data)
    }

    /// push the canvas as it is
    pub fn draw(&self) -> PanelResult<()> {
        let data = encode(&self.lock_canvas(), self.row_width);
        self.transport.push_frame(&self.address, &data)
    }

    /// Clear the device, then push `msg` as white text on black.
    pub fn print(&self, msg: &str) -> PanelResult<()> {
        self.clear_device()?;
        {
            let mut canvas = self.lock_canvas();
            fill(&mut canvas, Rgba([0, 0, 0, 255]));
            if let Some(text) = &self.text {
                text.draw_centered(&mut canvas, msg, Rgba([255, 255, 255, 255]));
            }
        }
        self.draw()
    }

    fn blank(&self) {
        fill(&mut self.lock_canvas(), Rgba([0, 0, 0, 255]));
    }

    fn clear_device(&self) -> PanelResult<()> {
        self.transport.clear(&self.address)
    }
}

pub struct Panel {
    id: String,
    name: String,
    display: Arc<Display>,
    animator: Animator,
}

impl Panel {
    /// `row_width` None makes the codec use the panel's own width as stride.
    pub fn new(
        id: &str,
        record: &PanelRecord,
        row_width: Option<u32>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let row_width = row_width.unwrap_or(record.width as u32);
        Self {
            id: id.to_string(),
            name: record.name.clone(),
            display: Arc::new(Display::new(
                &record.address,
                record.width,
                record.height,
                row_width,
                transport,
            )),
            animator: Animator::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &str {
        self.display.address()
    }

    pub fn width(&self) -> u8 {
        self.display.width
    }

    pub fn height(&self) -> u8 {
        self.display.height
    }

    pub fn record(&self) -> PanelRecord {
        PanelRecord {
            name: self.name.clone(),
            address: self.display.address.clone(),
            width: self.display.width,
            height: self.display.height,
        }
    }

    /// copy of the current canvas
    pub fn canvas(&self) -> Canvas {
        self.display.lock_canvas().clone()
    }

    pub fn fill_with_file<P: AsRef<Path>>(&self, path: P) -> PanelResult<()> {
        let data = fs::read(path)?;
        self.fill_image(&data)
    }

    /// Show encoded image data, animated gifs are played in the background.
    pub fn fill_image(&self, data: &[u8]) -> PanelResult<()> {
        if is_gif(data) {
            if let Ok(anim) = decode_animation(data) {
                if anim.frames.len() > 1 {
                    return self.fill_with_gif(anim);
                }
            }
        }
        let img = image::load_from_memory(data)?;
        self.fill_with_still(&img)
    }

    /// Stop any animation, then resize, draw and push a still image.
    pub fn fill_with_still(&self, img: &DynamicImage) -> PanelResult<()> {
        let mut slot = self.animator.lock();
        slot.stop();

        if let Err(e) = self.display.clear_device() {
            warn!("{}: clear before fill failed: {}", self.id, e);
        }
        let (w, h) = self.display.geometry();
        let frame = fit_still(img, w, h);
        self.display.render(&frame)?;
        info!("{}: still image {}x{} shown", self.id, img.width(), img.height());
        Ok(())
    }

    /// Replace whatever is shown with an animation. Returns once the
    /// animation thread is started, compositing happens on that thread.
    pub fn fill_with_gif(&self, anim: AnimatedImage) -> PanelResult<()> {
        let mut slot = self.animator.lock();
        slot.stop();

        let display = Arc::clone(&self.display);
        let id = self.id.clone();
        let task = AnimationTask::spawn(format!("panel-{}", self.id), move |token| {
            if let Err(e) = display.print(DECODING_MESSAGE) {
                warn!("{}: {}", id, e);
            }
            let composited = composite(&anim);
            info!(
                "{}: animation start, {} frames, loop count {}",
                id,
                composited.frames.len(),
                composited.loop_count
            );
            let stats = play(&display, &composited, &token);
            info!(
                "{}: animation end, {} loops, {} frames pushed, {} dropped",
                id, stats.loops, stats.pushed, stats.dropped
            );
        })?;
        slot.start(task);
        Ok(())
    }

    /// Stop any animation, blank the canvas and clear the device.
    pub fn clear(&self) -> PanelResult<()> {
        let mut slot = self.animator.lock();
        slot.stop();
        self.display.blank();
        self.display.clear_device()
    }

    /// Stop any animation and show `msg` centred, wrapped to the panel.
    pub fn print(&self, msg: &str) -> PanelResult<()> {
        let mut slot = self.animator.lock();
        slot.stop();
        self.display.print(msg)?;
        info!("{}: message shown", self.id);
        Ok(())
    }

    /// Push the current canvas again. A running animation is stopped first,
    /// its last drawn frame is what gets pushed.
    pub fn draw(&self) -> PanelResult<()> {
        let mut slot = self.animator.lock();
        slot.stop();
        self.display.draw()
    }

    pub fn animation_state(&self) -> AnimationState {
        self.animator.state()
    }

    pub fn in_animation(&self) -> bool {
        self.animation_state() == AnimationState::Running
    }

    /// stop the animation and wait for its thread to exit
    pub fn stop_animation(&self) {
        self.animator.stop();
    }

    /// block until the animation finishes its loops or is stopped elsewhere
    pub fn wait_animation(&self) {
        self.animator.wait();
    }
}
