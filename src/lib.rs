// PixelPanel
// copyright PixelPanel developers 2026

//! PixelPanel drives remote LED-matrix panels over the network.
//! Still images and animated GIFs are decoded, composited and resized to the
//! panel geometry, converted to the device-native rgb565 little-endian
//! layout, and pushed to the panel's controller with a small HTTP protocol:
//!
//! POST http://<address>/upload   multipart form, one file field, raw frame
//! GET  http://<address>/clear
//!
//! A panel owns its canvas. At most one render-producing task (a static fill
//! or an animation loop) may draw into it at a time. Animations run on their
//! own thread and stop cooperatively through a cancel token.
//!
//! The Registry is built once at startup by scanning a directory of JSON
//! panel records and is passed explicitly to whoever needs it, there is no
//! global panel table.
//!
//! # Example
//!
//! ```no_run
//! use pixel_panel::{config::ServerConfig, registry::Registry, transport::HttpTransport};
//! use std::sync::Arc;
//!
//! let cfg = ServerConfig::default();
//! let transport = Arc::new(HttpTransport::new(cfg.http_timeout()).unwrap());
//! let registry = Registry::load(&cfg, transport).unwrap();
//! let panel = registry.lookup("hall").unwrap();
//! panel.fill_with_file("uploads/cat.gif").unwrap();
//! ```

/// row stride of the deployed controller firmware's frame layout
pub const DEVICE_ROW_WIDTH: u32 = 64;

/// default directory holding one JSON record per panel
pub const RECORD_DIR: &str = "panels";

/// extension of panel records
pub const RECORD_EXT: &str = "json";

/// animation loop: cancel token, task handle and Idle/Running/Stopping states
pub mod animation;

/// server configuration stored as toml
pub mod config;

/// error taxonomy shared by every module
pub mod error;

/// log
pub mod log;

/// panel entity: geometry, address, canvas and the ingestion operations
pub mod panel;

/// registry of panels backed by a directory of records
pub mod registry;

/// Render module.
/// canvas: drawing helpers on top of image::RgbaImage.
/// codec: canvas to rgb565 little-endian frame buffer.
/// gif: raw gif frames and the accumulating compositor.
/// text: message frames.
pub mod render;

/// device wire protocol (upload frame / clear)
pub mod transport;

/// path helpers
pub mod util;

pub use error::{PanelError, PanelResult};
