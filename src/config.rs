use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::camera::CameraConfig;

const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CAMERA_URL: &str = "stub://kiosk";
const DEFAULT_CAMERA_FPS: u32 = 10;
const DEFAULT_CAMERA_WIDTH: u32 = 640;
const DEFAULT_CAMERA_HEIGHT: u32 = 480;

#[derive(Debug, Deserialize, Default)]
struct KioskConfigFile {
    server: Option<ServerConfigFile>,
    camera: Option<CameraConfigFile>,
}

#[derive(Debug, Deserialize, Default)]
struct ServerConfigFile {
    base_url: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize, Default)]
struct CameraConfigFile {
    url: Option<String>,
    target_fps: Option<u32>,
    width: Option<u32>,
    height: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct KioskConfig {
    pub server: ServerSettings,
    pub camera: CameraConfig,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub base_url: String,
    pub timeout: Duration,
}

impl KioskConfig {
    /// Load configuration: optional JSON file named by `KIOSK_CONFIG`,
    /// then environment overrides, then validation.
    pub fn load() -> Result<Self> {
        let config_path = std::env::var("KIOSK_CONFIG").ok();
        let file_cfg = match config_path.as_deref() {
            Some(path) => Some(read_config_file(Path::new(path))?),
            None => None,
        };
        let mut cfg = Self::from_file(file_cfg.unwrap_or_default());
        cfg.apply_env()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn from_file(file: KioskConfigFile) -> Self {
        let server = ServerSettings {
            base_url: file
                .server
                .as_ref()
                .and_then(|server| server.base_url.clone())
                .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string()),
            timeout: Duration::from_secs(
                file.server
                    .and_then(|server| server.timeout_secs)
                    .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS),
            ),
        };
        let camera = CameraConfig {
            url: file
                .camera
                .as_ref()
                .and_then(|camera| camera.url.clone())
                .unwrap_or_else(|| DEFAULT_CAMERA_URL.to_string()),
            target_fps: file
                .camera
                .as_ref()
                .and_then(|camera| camera.target_fps)
                .unwrap_or(DEFAULT_CAMERA_FPS),
            width: file
                .camera
                .as_ref()
                .and_then(|camera| camera.width)
                .unwrap_or(DEFAULT_CAMERA_WIDTH),
            height: file
                .camera
                .and_then(|camera| camera.height)
                .unwrap_or(DEFAULT_CAMERA_HEIGHT),
        };
        Self { server, camera }
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(url) = std::env::var("KIOSK_SERVER_URL") {
            if !url.trim().is_empty() {
                self.server.base_url = url;
            }
        }
        if let Ok(timeout) = std::env::var("KIOSK_HTTP_TIMEOUT_SECS") {
            let seconds: u64 = timeout.parse().map_err(|_| {
                anyhow!("KIOSK_HTTP_TIMEOUT_SECS must be an integer number of seconds")
            })?;
            self.server.timeout = Duration::from_secs(seconds);
        }
        if let Ok(url) = std::env::var("KIOSK_CAMERA_URL") {
            if !url.trim().is_empty() {
                self.camera.url = url;
            }
        }
        if let Ok(fps) = std::env::var("KIOSK_CAMERA_FPS") {
            self.camera.target_fps = fps
                .parse()
                .map_err(|_| anyhow!("KIOSK_CAMERA_FPS must be an integer"))?;
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.server.base_url)
            .map_err(|e| anyhow!("invalid server base_url {}: {}", self.server.base_url, e))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(anyhow!(
                "server base_url must be http or https, got {}",
                url.scheme()
            ));
        }
        if self.server.timeout.as_secs() == 0 {
            return Err(anyhow!("http timeout must be greater than zero"));
        }
        let camera_url = url::Url::parse(&self.camera.url)
            .map_err(|e| anyhow!("invalid camera url {}: {}", self.camera.url, e))?;
        if !matches!(camera_url.scheme(), "http" | "https" | "stub") {
            return Err(anyhow!(
                "camera url must be http, https or stub, got {}",
                camera_url.scheme()
            ));
        }
        if self.camera.target_fps == 0 {
            return Err(anyhow!("camera target_fps must be greater than zero"));
        }
        Ok(())
    }
}

fn read_config_file(path: &Path) -> Result<KioskConfigFile> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow!("failed to read config file {}: {}", path.display(), e))?;
    let cfg = serde_json::from_str(&raw)
        .map_err(|e| anyhow!("invalid config file {}: {}", path.display(), e))?;
    Ok(cfg)
}
