//! Synthetic camera source for tests and demos.
//!
//! Produces deterministic RGB gradients that change from frame to frame,
//! so re-captures of the same angle get visibly different photos.

use super::{CameraConfig, Frame};
use crate::error::KioskError;

pub(crate) struct StubCameraSource {
    config: CameraConfig,
    active: bool,
    frame_count: u64,
}

impl StubCameraSource {
    pub(crate) fn new(config: CameraConfig) -> Self {
        Self {
            config,
            active: false,
            frame_count: 0,
        }
    }

    pub(crate) fn start(&mut self) -> Result<(), KioskError> {
        self.active = true;
        log::info!("camera connected: {} (synthetic)", self.config.url);
        Ok(())
    }

    pub(crate) fn stop(&mut self) {
        self.active = false;
    }

    pub(crate) fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn current_frame(&mut self) -> Result<Frame, KioskError> {
        if !self.active {
            return Err(KioskError::Camera("camera not started".to_string()));
        }
        self.frame_count += 1;

        let width = self.config.width;
        let height = self.config.height;
        let mut pixels = vec![0u8; (width as usize) * (height as usize) * 3];
        for (i, pixel) in pixels.iter_mut().enumerate() {
            *pixel = ((i as u64 + self.frame_count * 31) % 256) as u8;
        }
        Frame::from_rgb(pixels, width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consecutive_frames_differ() {
        let mut source = StubCameraSource::new(CameraConfig::default());
        source.start().expect("start");

        let a = source.current_frame().expect("frame a").encode_jpeg(85);
        let b = source.current_frame().expect("frame b").encode_jpeg(85);
        assert_ne!(a.expect("jpeg a"), b.expect("jpeg b"));
    }
}
