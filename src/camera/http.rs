//! HTTP camera source.
//!
//! Handles the two feed styles kiosk IP cameras expose over HTTP:
//! a `multipart/x-mixed-replace` MJPEG stream, or a plain endpoint that
//! answers every GET with a single JPEG. The style is detected from the
//! Content-Type of the first response.

use std::io::Read;

use super::{CameraConfig, Frame};
use crate::error::KioskError;

/// Upper bound for one encoded frame; anything larger is a broken feed.
const MAX_JPEG_BYTES: usize = 5 * 1024 * 1024;

pub(crate) struct HttpCameraSource {
    config: CameraConfig,
    stream: Option<HttpStream>,
    frame_count: u64,
}

enum HttpStream {
    Mjpeg(MjpegStream),
    Snapshot,
}

impl HttpCameraSource {
    pub(crate) fn new(config: CameraConfig) -> Self {
        Self {
            config,
            stream: None,
            frame_count: 0,
        }
    }

    pub(crate) fn start(&mut self) -> Result<(), KioskError> {
        let response = ureq::get(&self.config.url)
            .call()
            .map_err(|err| KioskError::Camera(format!("connect {}: {}", self.config.url, err)))?;
        let content_type = response.header("Content-Type").unwrap_or("").to_lowercase();
        if content_type.contains("multipart") {
            self.stream = Some(HttpStream::Mjpeg(MjpegStream::new(response.into_reader())));
        } else {
            // Snapshot endpoint: each frame is a fresh GET. The probe
            // response body is discarded.
            self.stream = Some(HttpStream::Snapshot);
        }
        log::info!("camera connected: {}", self.config.url);
        Ok(())
    }

    pub(crate) fn stop(&mut self) {
        if self.stream.take().is_some() {
            log::info!(
                "camera released: {} ({} frames read)",
                self.config.url,
                self.frame_count
            );
        }
    }

    pub(crate) fn is_active(&self) -> bool {
        self.stream.is_some()
    }

    pub(crate) fn current_frame(&mut self) -> Result<Frame, KioskError> {
        let stream = self
            .stream
            .as_mut()
            .ok_or_else(|| KioskError::Camera("camera not started".to_string()))?;
        let jpeg = match stream {
            HttpStream::Mjpeg(stream) => stream.read_next_jpeg()?,
            HttpStream::Snapshot => fetch_snapshot(&self.config.url)?,
        };
        self.frame_count += 1;
        decode_rgb(&jpeg)
    }
}

/// Incremental reader over a `multipart/x-mixed-replace` body. Frames are
/// recovered by scanning for JPEG SOI/EOI markers rather than parsing part
/// headers, which tolerates the loose framing real cameras emit.
struct MjpegStream {
    reader: Box<dyn Read + Send>,
    buffer: Vec<u8>,
}

impl MjpegStream {
    fn new<R: Read + Send + 'static>(reader: R) -> Self {
        Self {
            reader: Box::new(reader),
            buffer: Vec::with_capacity(64 * 1024),
        }
    }

    fn read_next_jpeg(&mut self) -> Result<Vec<u8>, KioskError> {
        let mut chunk = vec![0u8; 8192];
        loop {
            if let Some((start, end)) = jpeg_bounds(&self.buffer) {
                let frame = self.buffer[start..end].to_vec();
                self.buffer.drain(..end);
                return Ok(frame);
            }

            let read = self
                .reader
                .read(&mut chunk)
                .map_err(|err| KioskError::Camera(format!("read mjpeg chunk: {}", err)))?;
            if read == 0 {
                return Err(KioskError::Camera("mjpeg stream ended".to_string()));
            }
            self.buffer.extend_from_slice(&chunk[..read]);

            if self.buffer.len() > MAX_JPEG_BYTES {
                self.buffer.clear();
                return Err(KioskError::Camera(
                    "mjpeg frame exceeded maximum size".to_string(),
                ));
            }
        }
    }
}

/// Locate one complete JPEG (SOI..EOI inclusive) in `buf`.
fn jpeg_bounds(buf: &[u8]) -> Option<(usize, usize)> {
    let start = buf.windows(2).position(|w| w == [0xFF, 0xD8])?;
    let end = buf[start + 2..].windows(2).position(|w| w == [0xFF, 0xD9])? + start + 4;
    Some((start, end))
}

fn fetch_snapshot(url: &str) -> Result<Vec<u8>, KioskError> {
    let response = ureq::get(url)
        .call()
        .map_err(|err| KioskError::Camera(format!("fetch snapshot from {}: {}", url, err)))?;
    let mut bytes = Vec::new();
    response
        .into_reader()
        .take(MAX_JPEG_BYTES as u64 + 1)
        .read_to_end(&mut bytes)
        .map_err(|err| KioskError::Camera(format!("read snapshot: {}", err)))?;
    if bytes.is_empty() {
        return Err(KioskError::Camera("empty snapshot response".to_string()));
    }
    if bytes.len() > MAX_JPEG_BYTES {
        return Err(KioskError::Camera(
            "snapshot exceeded maximum size".to_string(),
        ));
    }
    Ok(bytes)
}

fn decode_rgb(jpeg: &[u8]) -> Result<Frame, KioskError> {
    use image::GenericImageView;

    let decoded = image::load_from_memory(jpeg)
        .map_err(|err| KioskError::Camera(format!("decode frame: {}", err)))?;
    let (width, height) = decoded.dimensions();
    Frame::from_rgb(decoded.into_rgb8().into_raw(), width, height)
}
