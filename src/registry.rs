// PixelPanel
// copyright PixelPanel developers 2026

//! Registry maps panel ids to panels.
//!
//! It is built once at startup from a directory holding one JSON record per
//! panel, the file stem being the panel id:
//!
//! ```json
//! {
//!     "name": "Hall",
//!     "address": "10.0.0.211",
//!     "width": 64,
//!     "height": 32
//! }
//! ```
//!
//! Every record is written back right after it is loaded, which normalizes
//! formatting and fills in missing fields. A record that cannot be read or
//! parsed is logged and skipped, a record directory that cannot be read
//! fails the whole load.

use crate::config::ServerConfig;
use crate::error::{PanelError, PanelResult};
use crate::panel::{Panel, PanelRecord};
use crate::transport::Transport;
use crate::util::{record_id, record_path};
use log::{debug, info, warn};
use serde::Serialize;
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

pub struct Registry {
    dir: PathBuf,
    row_width: Option<u32>,
    transport: Arc<dyn Transport>,
    panels: HashMap<String, Arc<Panel>>,
}

/// write a record as 4-space indented JSON
pub fn write_record(dir: &Path, id: &str, record: &PanelRecord) -> PanelResult<()> {
    let mut buf = Vec::new();
    let fmt = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, fmt);
    record.serialize(&mut ser)?;
    fs::write(record_path(dir, id), buf)?;
    Ok(())
}

pub fn read_record(path: &Path) -> PanelResult<PanelRecord> {
    let data = fs::read(path)?;
    Ok(serde_json::from_slice(&data)?)
}

fn check_id(id: &str) -> PanelResult<()> {
    let bad = id.is_empty()
        || id.starts_with('.')
        || id.contains(|c: char| c == '/' || c == '\\' || c.is_control());
    if bad {
        return Err(PanelError::InvalidId(id.to_string()));
    }
    Ok(())
}

impl Registry {
    pub fn load(cfg: &ServerConfig, transport: Arc<dyn Transport>) -> PanelResult<Self> {
        Self::load_dir(cfg.records_path(), cfg.row_width(), transport)
    }

    /// Scan `dir` for records. A missing directory is created empty.
    pub fn load_dir<P: AsRef<Path>>(
        dir: P,
        row_width: Option<u32>,
        transport: Arc<dyn Transport>,
    ) -> PanelResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        let mut reg = Self {
            dir,
            row_width,
            transport,
            panels: HashMap::new(),
        };

        if !reg.dir.exists() {
            fs::create_dir_all(&reg.dir)?;
            info!("record dir {} created", reg.dir.display());
            return Ok(reg);
        }

        for entry in fs::read_dir(&reg.dir)? {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warn!("{}: {}", reg.dir.display(), e);
                    continue;
                }
            };
            let path = entry.path();
            if path.is_dir() {
                continue;
            }
            let Some(id) = record_id(&path) else {
                continue;
            };

            let record = match read_record(&path) {
                Ok(r) => r,
                Err(e) => {
                    warn!("{} panel skipped: {}", id, e);
                    continue;
                }
            };
            if let Err(e) = write_record(&reg.dir, &id, &record) {
                warn!("{} panel: {}", id, e);
            }

            let panel = Panel::new(&id, &record, reg.row_width, Arc::clone(&reg.transport));
            reg.panels.insert(id, Arc::new(panel));
        }
        info!("{} panels loaded from {}", reg.panels.len(), reg.dir.display());
        Ok(reg)
    }

    /// Create and persist a panel with an empty display name.
    pub fn create(&mut self, id: &str, address: &str, width: u8, height: u8) -> PanelResult<Arc<Panel>> {
        self.create_named(id, "", address, width, height)
    }

    /// Create and persist a panel. An existing panel with the same id is
    /// stopped and replaced.
    pub fn create_named(
        &mut self,
        id: &str,
        name: &str,
        address: &str,
        width: u8,
        height: u8,
    ) -> PanelResult<Arc<Panel>> {
        check_id(id)?;
        let record = PanelRecord {
            name: name.to_string(),
            address: address.to_string(),
            width,
            height,
        };
        write_record(&self.dir, id, &record)?;

        let panel = Arc::new(Panel::new(id, &record, self.row_width, Arc::clone(&self.transport)));
        if let Some(old) = self.panels.insert(id.to_string(), Arc::clone(&panel)) {
            old.stop_animation();
        }
        info!("{} panel created: {} {}x{}", id, address, width, height);
        Ok(panel)
    }

    /// persist the identity and geometry of `panel`
    pub fn save(&self, panel: &Panel) -> PanelResult<()> {
        check_id(panel.id())?;
        write_record(&self.dir, panel.id(), &panel.record())?;
        debug!("{} panel saved", panel.id());
        Ok(())
    }

    pub fn lookup(&self, id: &str) -> PanelResult<Arc<Panel>> {
        self.panels
            .get(id)
            .cloned()
            .ok_or_else(|| PanelError::NotFound(id.to_string()))
    }

    /// all panels sorted by id
    pub fn panels(&self) -> Vec<Arc<Panel>> {
        let mut v: Vec<_> = self.panels.values().cloned().collect();
        v.sort_by(|a, b| a.id().cmp(b.id()));
        v
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_must_be_file_stems() {
        assert!(check_id("hall").is_ok());
        assert!(check_id("panel-2_b").is_ok());
        for bad in ["", ".hidden", "a/b", "a\\b", "x\ny"] {
            assert!(matches!(check_id(bad), Err(PanelError::InvalidId(_))), "{:?}", bad);
        }
    }

    #[test]
    fn records_use_four_space_indent() {
        let dir = tempfile::tempdir().unwrap();
        let rec = PanelRecord {
            name: "Hall".into(),
            address: "dev1".into(),
            width: 64,
            height: 32,
        };
        write_record(dir.path(), "hall", &rec).unwrap();
        let text = fs::read_to_string(dir.path().join("hall.json")).unwrap();
        assert_eq!(
            text,
            "{\n    \"name\": \"Hall\",\n    \"address\": \"dev1\",\n    \"width\": 64,\n    \"height\": 32\n}"
        );
        assert_eq!(read_record(&dir.path().join("hall.json")).unwrap(), rec);
    }
}
