//! Kiosk controller.
//!
//! Owns the camera session, the angle-keyed capture state and the backend
//! API handle, and drives the two flows:
//!
//! - registration: start camera -> capture three angles -> validate ->
//!   submit -> reset on success
//! - attendance: pick a photo file -> submit -> render the result
//!
//! The registration flow follows `Idle -> Capturing -> AllCaptured`;
//! submission returns the flow to `Idle` on success and leaves it at
//! `AllCaptured` on rejection or transport failure so the operator can
//! retry. The client is blocking and single-threaded, so a second
//! submission cannot start while one is in flight.

use std::path::Path;

use crate::camera::CameraSession;
use crate::capture::{Angle, CaptureState, Photo};
use crate::client::{AttendanceApi, AttendanceResult, RegistrationRequest};
use crate::error::KioskError;
use crate::render;

/// JPEG quality for captured photos. The backend re-encodes anyway.
const JPEG_QUALITY: u8 = 85;

/// Registration flow phase, derived from camera and capture state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Camera inactive, nothing captured.
    Idle,
    /// Capturing in progress, fewer than three angles stored.
    Capturing,
    /// All three angles captured; submission is enabled.
    AllCaptured,
}

pub struct KioskController<A: AttendanceApi> {
    camera: CameraSession,
    captures: CaptureState,
    api: A,
    results_html: Option<String>,
}

impl<A: AttendanceApi> KioskController<A> {
    pub fn new(camera: CameraSession, api: A) -> Self {
        Self {
            camera,
            captures: CaptureState::new(),
            api,
            results_html: None,
        }
    }

    // ---- camera session ----

    pub fn start_camera(&mut self) -> Result<(), KioskError> {
        self.camera.start()
    }

    pub fn stop_camera(&mut self) {
        self.camera.stop();
    }

    pub fn camera_active(&self) -> bool {
        self.camera.is_active()
    }

    // ---- photo capture ----

    /// Snapshot the current frame under `angle`. Returns the thumbnail
    /// data URI for display. Requires an active camera session.
    pub fn capture_photo(&mut self, angle: Angle) -> Result<String, KioskError> {
        let frame = self.camera.current_frame()?;
        let jpeg = frame.encode_jpeg(JPEG_QUALITY)?;
        let photo = Photo::new(jpeg, frame.width, frame.height);
        let thumbnail = photo.data_uri();

        let replaced = self.captures.store(angle, photo);
        log::info!(
            "captured {} photo ({}/3 angles{})",
            angle,
            self.captures.captured_count(),
            if replaced { ", replaced previous" } else { "" }
        );
        Ok(thumbnail)
    }

    /// True once all three angles are captured; gates submission.
    pub fn is_capture_complete(&self) -> bool {
        self.captures.is_complete()
    }

    pub fn thumbnail(&self, angle: Angle) -> Option<String> {
        self.captures.get(angle).map(Photo::data_uri)
    }

    pub fn phase(&self) -> Phase {
        if self.captures.is_complete() {
            Phase::AllCaptured
        } else if self.camera.is_active() || self.captures.captured_count() > 0 {
            Phase::Capturing
        } else {
            Phase::Idle
        }
    }

    // ---- registration ----

    /// Validate and submit a registration.
    ///
    /// Validation failures never issue a network call. On `success: true`
    /// the capture state is fully reset and the server message returned;
    /// on `success: false` or transport failure the captures are kept so
    /// the operator can retry or re-shoot.
    pub fn submit_registration(&mut self, name: &str, roll: &str) -> Result<String, KioskError> {
        let name = name.trim();
        let roll = roll.trim();
        if name.is_empty() || roll.is_empty() {
            return Err(KioskError::Validation(
                "both name and roll number are required".to_string(),
            ));
        }
        let request = self.registration_request(name, roll)?;

        let response = self.api.register(&request)?;
        if response.success {
            log::info!("registered {} ({})", name, roll);
            self.captures.reset();
            Ok(response.message)
        } else {
            log::warn!("registration rejected for {}: {}", roll, response.message);
            Err(KioskError::Rejected(response.message))
        }
    }

    fn registration_request(
        &self,
        name: &str,
        roll: &str,
    ) -> Result<RegistrationRequest, KioskError> {
        let (Some(front), Some(left), Some(right)) = (
            self.captures.get(Angle::Front),
            self.captures.get(Angle::Left),
            self.captures.get(Angle::Right),
        ) else {
            return Err(KioskError::Validation(format!(
                "all three photos are required ({}/3 captured)",
                self.captures.captured_count()
            )));
        };
        Ok(RegistrationRequest {
            name: name.to_string(),
            roll: roll.to_string(),
            front_jpeg: front.jpeg_bytes().to_vec(),
            left_jpeg: left.jpeg_bytes().to_vec(),
            right_jpeg: right.jpeg_bytes().to_vec(),
        })
    }

    // ---- attendance ----

    /// Submit a photo file for attendance marking.
    ///
    /// On success the rendered HTML replaces the results region and the
    /// parsed result is returned. On any failure the results region keeps
    /// its previous content.
    pub fn mark_attendance(&mut self, path: &Path) -> Result<AttendanceResult, KioskError> {
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| KioskError::Validation("no image selected".to_string()))?
            .to_string();
        let bytes = std::fs::read(path).map_err(|err| {
            KioskError::Validation(format!("cannot read {}: {}", path.display(), err))
        })?;

        let result = self.api.mark_attendance(&filename, &bytes)?;
        log::info!(
            "attendance marked: {} faces, {} present",
            result.total_faces,
            result.present_count
        );
        self.results_html = Some(render::to_html(&result));
        Ok(result)
    }

    /// Last successfully rendered attendance results, if any.
    pub fn results_html(&self) -> Option<&str> {
        self.results_html.as_deref()
    }
}
