// PixelPanel
// copyright PixelPanel developers 2026

//! Device wire protocol, as served by the panel controller firmware:
//!
//! POST http://<address>/upload  multipart form, field "file", raw frame
//! GET  http://<address>/clear
//!
//! Anything but 200 is a failure. There is no retry, the caller decides
//! whether a failed push aborts (static fill) or drops a frame (animation).

use crate::error::{PanelError, PanelResult};
use log::debug;
use reqwest::{
    blocking::{
        multipart::{Form, Part},
        Client, Response,
    },
    StatusCode,
};
use std::time::Duration;

pub const UPLOAD_FIELD: &str = "file";
pub const UPLOAD_FILENAME: &str = "server-upload.bin";

pub fn upload_url(address: &str) -> String {
    format!("http://{}/upload", address)
}

pub fn clear_url(address: &str) -> String {
    format!("http://{}/clear", address)
}

/// Talks to one panel controller per call. Implementations must be usable
/// from animation threads.
pub trait Transport: Send + Sync {
    fn push_frame(&self, address: &str, frame: &[u8]) -> PanelResult<()>;
    fn clear(&self, address: &str) -> PanelResult<()>;
}

/// multipart form carrying one raw frame as the upload file
pub fn upload_form(frame: &[u8]) -> PanelResult<Form> {
    let part = Part::bytes(frame.to_vec())
        .file_name(UPLOAD_FILENAME)
        .mime_str("application/octet-stream")
        .map_err(|e| PanelError::Encode(e.to_string()))?;
    Ok(Form::new().part(UPLOAD_FIELD, part))
}

pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> PanelResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PanelError::Transport(e.to_string()))?;
        Ok(Self { client })
    }
}

fn check(url: &str, result: reqwest::Result<Response>) -> PanelResult<()> {
    match result {
        Ok(resp) if resp.status() == StatusCode::OK => Ok(()),
        Ok(resp) => Err(PanelError::DeviceStatus {
            url: url.to_string(),
            status: resp.status().as_u16(),
        }),
        Err(e) => Err(PanelError::Transport(format!("{}: {}", url, e))),
    }
}

impl Transport for HttpTransport {
    fn push_frame(&self, address: &str, frame: &[u8]) -> PanelResult<()> {
        let url = upload_url(address);
        let form = upload_form(frame)?;
        debug!("push {} bytes to {}", frame.len(), url);
        check(&url, self.client.post(&url).multipart(form).send())
    }

    fn clear(&self, address: &str) -> PanelResult<()> {
        let url = clear_url(address);
        debug!("clear {}", url);
        check(&url, self.client.get(&url).send())
    }
}
