#![allow(dead_code)]

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use pixel_panel::{
    panel::{Panel, PanelRecord},
    transport::{clear_url, upload_url, Transport},
    PanelError, PanelResult,
};
use std::{
    borrow::Cow,
    io::Cursor,
    sync::{
        atomic::{AtomicU16, Ordering},
        Arc, Mutex,
    },
    thread,
    time::{Duration, Instant},
};

/// Records every request instead of sending it, answers with `status`.
pub struct MockTransport {
    pub pushes: Mutex<Vec<(String, Vec<u8>)>>,
    pub push_times: Mutex<Vec<Instant>>,
    pub clears: Mutex<Vec<String>>,
    pub status: AtomicU16,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            pushes: Mutex::new(vec![]),
            push_times: Mutex::new(vec![]),
            clears: Mutex::new(vec![]),
            status: AtomicU16::new(200),
        })
    }

    pub fn fail_with(&self, status: u16) {
        self.status.store(status, Ordering::SeqCst);
    }

    pub fn push_count(&self) -> usize {
        self.pushes.lock().unwrap().len()
    }

    pub fn clear_count(&self) -> usize {
        self.clears.lock().unwrap().len()
    }

    fn answer(&self, url: String) -> PanelResult<()> {
        match self.status.load(Ordering::SeqCst) {
            200 => Ok(()),
            status => Err(PanelError::DeviceStatus { url, status }),
        }
    }
}

impl Transport for MockTransport {
    fn push_frame(&self, address: &str, frame: &[u8]) -> PanelResult<()> {
        let url = upload_url(address);
        self.push_times.lock().unwrap().push(Instant::now());
        self.pushes
            .lock()
            .unwrap()
            .push((url.clone(), frame.to_vec()));
        self.answer(url)
    }

    fn clear(&self, address: &str) -> PanelResult<()> {
        let url = clear_url(address);
        self.clears.lock().unwrap().push(url.clone());
        self.answer(url)
    }
}

pub fn panel_64x32(transport: Arc<MockTransport>) -> Panel {
    let record = PanelRecord {
        name: "Hall".to_string(),
        address: "dev1".to_string(),
        width: 64,
        height: 32,
    };
    Panel::new("hall", &record, Some(64), transport)
}

pub fn png_bytes(w: u32, h: u32, color: Rgba<u8>) -> Vec<u8> {
    let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(w, h, color));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).unwrap();
    out.into_inner()
}

/// 4x4 gif, palette red / green / blue, frames as (left, top, w, h, color index, delay)
pub fn gif_bytes(frames: &[(u16, u16, u16, u16, u8, u16)], repeat: gif::Repeat) -> Vec<u8> {
    let palette = [255, 0, 0, 0, 255, 0, 0, 0, 255];
    let mut out = Vec::new();
    {
        let mut enc = gif::Encoder::new(&mut out, 4, 4, &palette).unwrap();
        enc.set_repeat(repeat).unwrap();
        for &(left, top, width, height, idx, delay) in frames {
            let f = gif::Frame {
                left,
                top,
                width,
                height,
                delay,
                buffer: Cow::Owned(vec![idx; width as usize * height as usize]),
                ..gif::Frame::default()
            };
            enc.write_frame(&f).unwrap();
        }
    }
    out
}

pub fn three_frame_gif(repeat: gif::Repeat, delay: u16) -> Vec<u8> {
    gif_bytes(
        &[
            (0, 0, 4, 4, 0, delay),
            (1, 1, 2, 2, 1, delay),
            (2, 2, 2, 2, 2, delay),
        ],
        repeat,
    )
}

/// poll until `cond` holds, false on timeout
pub fn wait_until<F: Fn() -> bool>(timeout: Duration, cond: F) -> bool {
    let start = Instant::now();
    while start.elapsed() < timeout {
        if cond() {
            return true;
        }
        thread::sleep(Duration::from_millis(5));
    }
    cond()
}
