#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use attendance_kiosk::{
    Angle, AttendanceApi, AttendanceEntry, AttendanceResult, CameraConfig, CameraSession,
    KioskController, KioskError, RegisterResponse, RegistrationRequest,
};

/// Scripted outcome for one `/register` call.
pub enum RegisterScript {
    Accept(&'static str),
    Reject(&'static str),
    TransportFail,
}

/// Scripted outcome for one `/mark-attendance` call.
pub enum AttendScript {
    Respond(AttendanceResult),
    TransportFail,
}

#[derive(Default)]
struct Inner {
    register_scripts: VecDeque<RegisterScript>,
    attend_scripts: VecDeque<AttendScript>,
    register_calls: usize,
    attend_calls: usize,
    last_register: Option<SeenRegistration>,
    last_attend: Option<(String, usize)>,
}

pub struct SeenRegistration {
    pub name: String,
    pub roll: String,
    pub photo_sizes: [usize; 3],
}

/// In-memory `AttendanceApi` that records calls and replays scripted
/// responses. Clones share the same log, so tests can keep a handle after
/// moving the api into a controller.
#[derive(Clone, Default)]
pub struct ScriptedApi {
    inner: Arc<Mutex<Inner>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script_register(&self, script: RegisterScript) {
        self.inner.lock().unwrap().register_scripts.push_back(script);
    }

    pub fn script_attend(&self, script: AttendScript) {
        self.inner.lock().unwrap().attend_scripts.push_back(script);
    }

    pub fn register_calls(&self) -> usize {
        self.inner.lock().unwrap().register_calls
    }

    pub fn attend_calls(&self) -> usize {
        self.inner.lock().unwrap().attend_calls
    }

    pub fn last_register(&self) -> Option<SeenRegistration> {
        self.inner.lock().unwrap().last_register.take()
    }

    pub fn last_attend(&self) -> Option<(String, usize)> {
        self.inner.lock().unwrap().last_attend.take()
    }
}

impl AttendanceApi for ScriptedApi {
    fn register(&self, request: &RegistrationRequest) -> Result<RegisterResponse, KioskError> {
        let mut inner = self.inner.lock().unwrap();
        inner.register_calls += 1;
        inner.last_register = Some(SeenRegistration {
            name: request.name.clone(),
            roll: request.roll.clone(),
            photo_sizes: [
                request.front_jpeg.len(),
                request.left_jpeg.len(),
                request.right_jpeg.len(),
            ],
        });
        match inner.register_scripts.pop_front() {
            Some(RegisterScript::Accept(message)) => Ok(RegisterResponse {
                success: true,
                message: message.to_string(),
            }),
            Some(RegisterScript::Reject(message)) => Ok(RegisterResponse {
                success: false,
                message: message.to_string(),
            }),
            Some(RegisterScript::TransportFail) | None => {
                Err(KioskError::Transport("scripted transport failure".to_string()))
            }
        }
    }

    fn mark_attendance(
        &self,
        filename: &str,
        bytes: &[u8],
    ) -> Result<AttendanceResult, KioskError> {
        let mut inner = self.inner.lock().unwrap();
        inner.attend_calls += 1;
        inner.last_attend = Some((filename.to_string(), bytes.len()));
        match inner.attend_scripts.pop_front() {
            Some(AttendScript::Respond(result)) => Ok(result),
            Some(AttendScript::TransportFail) | None => {
                Err(KioskError::Transport("scripted transport failure".to_string()))
            }
        }
    }
}

pub fn controller_with(api: ScriptedApi) -> KioskController<ScriptedApi> {
    let camera = CameraSession::new(CameraConfig::default()).expect("stub camera");
    KioskController::new(camera, api)
}

/// Start the camera and capture all three angles.
pub fn capture_all(controller: &mut KioskController<ScriptedApi>) {
    controller.start_camera().expect("start camera");
    for angle in Angle::ALL {
        controller.capture_photo(angle).expect("capture");
    }
}

pub fn sample_result() -> AttendanceResult {
    AttendanceResult {
        total_faces: 2,
        present_count: 1,
        attendance: vec![AttendanceEntry {
            roll: "R1".to_string(),
            name: "Alice".to_string(),
            status: "Present".to_string(),
            time: "09:00".to_string(),
            confidence: None,
            face_number: None,
        }],
    }
}
