// PixelPanel
// copyright PixelPanel developers 2026

//! Error type for every panel operation.
//!
//! Decode errors never touch panel state. Transport errors abort a static
//! fill but only drop a frame inside an animation loop. Persistence errors
//! are fatal for the record directory itself and skipped per record.

use std::fmt;
use std::io;

#[derive(Debug)]
pub enum PanelError {
    /// filesystem access failed (records, config, image files)
    Io(io::Error),
    /// unsupported or corrupt image data
    Decode(String),
    /// network failure talking to the device
    Transport(String),
    /// device answered with something other than 200
    DeviceStatus { url: String, status: u16 },
    /// json / toml serialization
    Encode(String),
    /// invalid configuration value
    Config(String),
    /// unknown panel id
    NotFound(String),
    /// id not usable as a record file name
    InvalidId(String),
}

impl PanelError {
    /// true for errors raised while talking to a device
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            PanelError::Transport(_) | PanelError::DeviceStatus { .. }
        )
    }
}

impl fmt::Display for PanelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PanelError::Io(e) => write!(f, "io error: {}", e),
            PanelError::Decode(msg) => write!(f, "decode error: {}", msg),
            PanelError::Transport(msg) => write!(f, "transport error: {}", msg),
            PanelError::DeviceStatus { url, status } => {
                write!(f, "{} returned non-OK status code {}", url, status)
            }
            PanelError::Encode(msg) => write!(f, "encode error: {}", msg),
            PanelError::Config(msg) => write!(f, "config error: {}", msg),
            PanelError::NotFound(id) => write!(f, "panel not found: {}", id),
            PanelError::InvalidId(id) => write!(f, "invalid panel id '{}'", id),
        }
    }
}

impl std::error::Error for PanelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PanelError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for PanelError {
    fn from(err: io::Error) -> PanelError {
        PanelError::Io(err)
    }
}

// images are decoded from memory, an io error there means truncated data
impl From<image::ImageError> for PanelError {
    fn from(err: image::ImageError) -> PanelError {
        PanelError::Decode(err.to_string())
    }
}

impl From<gif::DecodingError> for PanelError {
    fn from(err: gif::DecodingError) -> PanelError {
        PanelError::Decode(err.to_string())
    }
}

impl From<serde_json::Error> for PanelError {
    fn from(err: serde_json::Error) -> PanelError {
        PanelError::Encode(err.to_string())
    }
}

impl From<toml::de::Error> for PanelError {
    fn from(err: toml::de::Error) -> PanelError {
        PanelError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for PanelError {
    fn from(err: toml::ser::Error) -> PanelError {
        PanelError::Encode(err.to_string())
    }
}

pub type PanelResult<T> = Result<T, PanelError>;
