//! Camera session.
//!
//! The kiosk reads a live feed from a network camera and snapshots still
//! frames from it. Two backends are supported, selected by URL scheme:
//!
//! - `http(s)://` - MJPEG multipart streams or single-JPEG snapshot
//!   endpoints (typical for kiosk IP cameras)
//! - `stub://` - synthetic frames for tests and demos
//!
//! Lifecycle is `new -> start -> current_frame* -> stop`. `stop` is a
//! no-op when no stream is held and the session releases its stream on
//! drop, so an interrupted flow never leaks the device.

mod http;
mod stub;

use url::Url;

use crate::error::KioskError;
use http::HttpCameraSource;
use stub::StubCameraSource;

/// Camera settings. Loaded from `KioskConfig` or built directly in tests.
#[derive(Clone, Debug)]
pub struct CameraConfig {
    /// Feed URL. `http(s)://` for MJPEG/snapshot, `stub://` for synthetic.
    pub url: String,
    /// Target frame rate hint, used by the stub source pacing.
    pub target_fps: u32,
    /// Frame width for synthetic frames.
    pub width: u32,
    /// Frame height for synthetic frames.
    pub height: u32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            url: "stub://kiosk".to_string(),
            target_fps: 10,
            width: 640,
            height: 480,
        }
    }
}

/// A decoded RGB frame.
///
/// Frames with zero width or height are rejected at construction, so a
/// photo capture can never observe an empty frame.
#[derive(Debug)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pixels: Vec<u8>,
}

impl Frame {
    pub(crate) fn from_rgb(pixels: Vec<u8>, width: u32, height: u32) -> Result<Self, KioskError> {
        if width == 0 || height == 0 {
            return Err(KioskError::Camera(format!(
                "frame has empty dimensions {}x{}",
                width, height
            )));
        }
        let expected = (width as usize) * (height as usize) * 3;
        if pixels.len() != expected {
            return Err(KioskError::Camera(format!(
                "frame buffer is {} bytes, expected {} for {}x{} rgb",
                pixels.len(),
                expected,
                width,
                height
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Encode the frame as JPEG at the given quality (1-100).
    pub fn encode_jpeg(&self, quality: u8) -> Result<Vec<u8>, KioskError> {
        use image::codecs::jpeg::JpegEncoder;
        use image::{ExtendedColorType, ImageEncoder};

        let mut out = Vec::new();
        let encoder = JpegEncoder::new_with_quality(&mut out, quality);
        encoder
            .write_image(&self.pixels, self.width, self.height, ExtendedColorType::Rgb8)
            .map_err(KioskError::camera)?;
        Ok(out)
    }
}

/// Live camera session, backend-dispatched by URL scheme.
pub struct CameraSession {
    backend: CameraBackend,
}

enum CameraBackend {
    Http(HttpCameraSource),
    Stub(StubCameraSource),
}

impl CameraSession {
    pub fn new(config: CameraConfig) -> Result<Self, KioskError> {
        let url = Url::parse(&config.url)
            .map_err(|err| KioskError::Camera(format!("bad camera url {}: {}", config.url, err)))?;
        let backend = match url.scheme() {
            "http" | "https" => CameraBackend::Http(HttpCameraSource::new(config)),
            "stub" => CameraBackend::Stub(StubCameraSource::new(config)),
            other => {
                return Err(KioskError::Camera(format!(
                    "unsupported camera scheme '{}'; expected http(s) or stub",
                    other
                )))
            }
        };
        Ok(Self { backend })
    }

    /// Acquire the feed. Failure is reported to the caller and logged; the
    /// session stays unacquired and may be started again later.
    pub fn start(&mut self) -> Result<(), KioskError> {
        let result = match &mut self.backend {
            CameraBackend::Http(source) => source.start(),
            CameraBackend::Stub(source) => source.start(),
        };
        if let Err(err) = &result {
            log::error!("camera start failed: {}", err);
        }
        result
    }

    /// Release the feed. Safe to call when nothing is held.
    pub fn stop(&mut self) {
        match &mut self.backend {
            CameraBackend::Http(source) => source.stop(),
            CameraBackend::Stub(source) => source.stop(),
        }
    }

    pub fn is_active(&self) -> bool {
        match &self.backend {
            CameraBackend::Http(source) => source.is_active(),
            CameraBackend::Stub(source) => source.is_active(),
        }
    }

    /// Read the current frame from the feed. Errors when the session has
    /// not been started.
    pub fn current_frame(&mut self) -> Result<Frame, KioskError> {
        match &mut self.backend {
            CameraBackend::Http(source) => source.current_frame(),
            CameraBackend::Stub(source) => source.current_frame(),
        }
    }
}

impl Drop for CameraSession {
    fn drop(&mut self) {
        self.stop();
    }
}
