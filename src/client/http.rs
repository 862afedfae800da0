//! HTTP transport for the attendance backend.
//!
//! One blocking request per operation, no retry and no idempotency key; a
//! failed request is resubmitted manually by the operator.

use std::time::Duration;

use url::Url;

use super::multipart::MultipartBody;
use super::{AttendanceApi, AttendanceResult, RegisterResponse, RegistrationRequest};
use crate::capture::Angle;
use crate::error::KioskError;

const REGISTER_PATH: &str = "/register";
const ATTENDANCE_PATH: &str = "/mark-attendance";

/// Production `AttendanceApi` over ureq.
#[derive(Debug)]
pub struct HttpApi {
    agent: ureq::Agent,
    base_url: Url,
}

impl HttpApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, KioskError> {
        let base_url = Url::parse(base_url)
            .map_err(|err| KioskError::Transport(format!("bad server url {}: {}", base_url, err)))?;
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Ok(Self { agent, base_url })
    }

    fn post_multipart<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: MultipartBody,
    ) -> Result<T, KioskError> {
        let url = self
            .base_url
            .join(path)
            .map_err(|err| KioskError::Transport(format!("bad endpoint {}: {}", path, err)))?;
        let content_type = body.content_type();
        let payload = body.finish();

        let response = self
            .agent
            .post(url.as_str())
            .set("Content-Type", &content_type)
            .send_bytes(&payload)
            .map_err(|err| {
                log::error!("POST {} failed: {}", url, err);
                KioskError::Transport(format!("POST {}: {}", path, err))
            })?;

        response.into_json::<T>().map_err(|err| {
            log::error!("POST {} returned an unparseable body: {}", url, err);
            KioskError::Transport(format!("parse response from {}: {}", path, err))
        })
    }
}

impl AttendanceApi for HttpApi {
    fn register(&self, request: &RegistrationRequest) -> Result<RegisterResponse, KioskError> {
        let mut body = MultipartBody::new();
        body.add_text("name", &request.name);
        body.add_text("roll", &request.roll);
        for angle in Angle::ALL {
            body.add_file(
                angle.field_name(),
                &format!("{}.jpg", angle),
                "image/jpeg",
                request.photo(angle),
            );
        }
        self.post_multipart(REGISTER_PATH, body)
    }

    fn mark_attendance(
        &self,
        filename: &str,
        bytes: &[u8],
    ) -> Result<AttendanceResult, KioskError> {
        let mut body = MultipartBody::new();
        body.add_file("file", filename, content_type_for(filename), bytes);
        self.post_multipart(ATTENDANCE_PATH, body)
    }
}

/// Content type from the file extension. The backend accepts png and jpeg.
fn content_type_for(filename: &str) -> &'static str {
    let extension = filename.rsplit('.').next().unwrap_or("");
    match extension.to_lowercase().as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_follows_extension() {
        assert_eq!(content_type_for("class.jpg"), "image/jpeg");
        assert_eq!(content_type_for("class.JPEG"), "image/jpeg");
        assert_eq!(content_type_for("class.png"), "image/png");
        assert_eq!(content_type_for("class"), "application/octet-stream");
    }

    #[test]
    fn bad_base_url_is_a_transport_error() {
        let err = HttpApi::new("not a url", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, KioskError::Transport(_)));
    }

    #[test]
    fn endpoints_resolve_against_the_base_url() {
        let api = HttpApi::new("http://127.0.0.1:5000", Duration::from_secs(1)).expect("api");
        let url = api.base_url.join(REGISTER_PATH).expect("join");
        assert_eq!(url.as_str(), "http://127.0.0.1:5000/register");
        let url = api.base_url.join(ATTENDANCE_PATH).expect("join");
        assert_eq!(url.as_str(), "http://127.0.0.1:5000/mark-attendance");
    }
}
