//! Face-attendance kiosk client.
//!
//! This crate implements the kiosk-side half of a face-recognition
//! attendance system. Detection, matching and storage live in a backend
//! service; the kiosk only captures photos and talks to two endpoints:
//!
//! - `POST /register` - name, roll and three angle photos (front/left/right)
//! - `POST /mark-attendance` - one photo of the room, answered with a
//!   structured attendance result
//!
//! # Module structure
//!
//! - `camera`: camera session (HTTP MJPEG/snapshot sources, stub source)
//! - `capture`: angle-keyed photo state for registration
//! - `client`: wire types, multipart encoding, HTTP transport
//! - `controller`: the kiosk flows (register, mark attendance)
//! - `render`: attendance results as HTML/plain text
//! - `config`: file + environment configuration
//!
//! The kiosk holds no persistent state. A registration that fails is simply
//! retried by the operator; captured photos stay in memory until a
//! successful submission clears them.

pub mod camera;
pub mod capture;
pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod render;
pub mod ui;

pub use camera::{CameraConfig, CameraSession, Frame};
pub use capture::{Angle, CaptureState, Photo};
pub use client::{
    AttendanceApi, AttendanceEntry, AttendanceResult, HttpApi, RegisterResponse,
    RegistrationRequest,
};
pub use config::{KioskConfig, ServerSettings};
pub use controller::{KioskController, Phase};
pub use error::KioskError;
