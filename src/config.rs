// PixelPanel
// copyright PixelPanel developers 2026

//! Server configuration, kept in a small toml file next to the records.
//!
//! ```toml
//! records_dir = "panels"
//! log_file = "log/pixel_panel.log"
//! log_level = "info"
//! device_row_width = 64
//! http_timeout_ms = 5000
//! ```

use crate::error::{PanelError, PanelResult};
use crate::{DEVICE_ROW_WIDTH, RECORD_DIR};
use log::{info, LevelFilter};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf, str::FromStr, time::Duration};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub records_dir: String,
    pub log_file: String,
    pub log_level: String,
    // row stride of the device frame layout, 0 uses each panel's own width
    pub device_row_width: u32,
    pub http_timeout_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            records_dir: RECORD_DIR.to_string(),
            log_file: "log/pixel_panel.log".to_string(),
            log_level: "info".to_string(),
            device_row_width: DEVICE_ROW_WIDTH,
            http_timeout_ms: 5000,
        }
    }
}

impl ServerConfig {
    /// Reads the config at `path`. A missing file is created with defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> PanelResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            let cfg = Self::default();
            cfg.save(path)?;
            info!("config {} not found, defaults written", path.display());
            return Ok(cfg);
        }
        let content = fs::read_to_string(path)?;
        let cfg: ServerConfig = toml::from_str(&content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> PanelResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, toml::to_string(self)?)?;
        Ok(())
    }

    fn validate(&self) -> PanelResult<()> {
        if self.records_dir.is_empty() {
            return Err(PanelError::Config("records_dir is empty".to_string()));
        }
        self.level_filter().map(|_| ())
    }

    /// fixed device row stride, None when panels use their own width
    pub fn row_width(&self) -> Option<u32> {
        match self.device_row_width {
            0 => None,
            w => Some(w),
        }
    }

    pub fn level_filter(&self) -> PanelResult<LevelFilter> {
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| PanelError::Config(format!("unknown log level {}", self.log_level)))
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_millis(self.http_timeout_ms)
    }

    pub fn records_path(&self) -> PathBuf {
        PathBuf::from(&self.records_dir)
    }
}
