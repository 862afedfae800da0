//! Wire contract with the attendance backend.
//!
//! The backend exposes two endpoints; their schemas are authoritative on
//! the server, this module mirrors what the kiosk relies on:
//!
//! - `POST /register`: multipart fields `name`, `roll` and three JPEG file
//!   parts `front_photo` / `left_photo` / `right_photo`, answered with
//!   `{success, message}`.
//! - `POST /mark-attendance`: multipart field `file` with the chosen
//!   image, answered with an `AttendanceResult`.

mod http;
mod multipart;

use serde::{Deserialize, Serialize};

use crate::capture::Angle;
use crate::error::KioskError;

pub use http::HttpApi;
pub use multipart::MultipartBody;

/// Registration payload, built per submit attempt.
pub struct RegistrationRequest {
    pub name: String,
    pub roll: String,
    pub front_jpeg: Vec<u8>,
    pub left_jpeg: Vec<u8>,
    pub right_jpeg: Vec<u8>,
}

impl RegistrationRequest {
    pub fn photo(&self, angle: Angle) -> &[u8] {
        match angle {
            Angle::Front => &self.front_jpeg,
            Angle::Left => &self.left_jpeg,
            Angle::Right => &self.right_jpeg,
        }
    }
}

/// Registration outcome as reported by the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub success: bool,
    pub message: String,
}

/// One row of the attendance table, in server order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceEntry {
    pub roll: String,
    pub name: String,
    pub status: String,
    pub time: String,
    /// Match confidence, present on newer servers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<String>,
    /// Index of the face within the submitted photo.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub face_number: Option<u64>,
}

/// Result of an attendance submission. Rendered immediately, never
/// persisted on the kiosk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceResult {
    pub total_faces: u64,
    pub present_count: u64,
    #[serde(default)]
    pub attendance: Vec<AttendanceEntry>,
}

/// Transport seam for the two backend operations.
///
/// The kiosk controller is written against this trait; production uses
/// `HttpApi`, tests use in-memory scripted implementations.
pub trait AttendanceApi {
    fn register(&self, request: &RegistrationRequest) -> Result<RegisterResponse, KioskError>;

    fn mark_attendance(
        &self,
        filename: &str,
        bytes: &[u8],
    ) -> Result<AttendanceResult, KioskError>;
}
