// PixelPanel
// copyright PixelPanel developers 2026

//! Log module installs a log4rs file logger, reference
//! https://docs.rs/log4rs
//!
//! The library itself only talks to the `log` facade. Binaries call
//! `init_log` once at startup.

use crate::error::{PanelError, PanelResult};
use crate::util::get_abs_path;
use log::LevelFilter;
use log4rs::{
    append::file::FileAppender,
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Handle,
};

/// init logs system
pub fn init_log(level: LevelFilter, file_path: &str) -> PanelResult<Handle> {
    let fpstr = get_abs_path(file_path);
    let logfile = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} {l} {t} {m}{n}",
        )))
        .build(fpstr)?;
    let config = Config::builder()
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(level)))
                .build("logfile", Box::new(logfile)),
        )
        .build(Root::builder().appender("logfile").build(level))
        .map_err(|e| PanelError::Config(e.to_string()))?;
    log4rs::init_config(config).map_err(|e| PanelError::Config(e.to_string()))
}
