// PixelPanel
// copyright PixelPanel developers 2026

//! Path helpers: project root lookup and panel record naming.

use crate::RECORD_EXT;
use std::{
    env,
    fs::read_dir,
    io::{self, ErrorKind},
    path::{Path, PathBuf, MAIN_SEPARATOR},
};

/// walk up from the current dir until a directory holding flag_file is found
pub fn get_project_root(flag_file: &str) -> io::Result<PathBuf> {
    let path = env::current_dir()?;

    for p in path.ancestors() {
        let found = read_dir(p)?
            .flatten()
            .any(|e| e.file_name() == *flag_file);
        if found {
            return Ok(PathBuf::from(p));
        }
    }
    Err(io::Error::new(
        ErrorKind::NotFound,
        "Ran out of places to find flag_file",
    ))
}

/// Root of a deployment is where Cargo.lock locates, "." otherwise.
/// When installing with `cargo install --path . --root ~/PANEL`, put a
/// Cargo.lock next to bin/ so the log dir resolves beside it.
pub fn get_root_path() -> String {
    match get_project_root("Cargo.lock") {
        Ok(p) => p.to_string_lossy().to_string(),
        Err(_e) => ".".to_string(),
    }
}

pub fn get_abs_path(fpath: &str) -> String {
    if Path::new(fpath).is_relative() {
        format!("{}{}{}", get_root_path(), MAIN_SEPARATOR, fpath)
    } else {
        fpath.to_string()
    }
}

/// record file for panel `id` inside `dir`
pub fn record_path(dir: &Path, id: &str) -> PathBuf {
    dir.join(format!("{}.{}", id, RECORD_EXT))
}

/// Panel id of a record file, None when the file is not a record.
/// Dotfiles and files without the record extension are ignored.
pub fn record_id(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    if name.starts_with('.') {
        return None;
    }
    if path.extension()?.to_str()? != RECORD_EXT {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    if stem.is_empty() {
        return None;
    }
    Some(stem.to_string())
}
