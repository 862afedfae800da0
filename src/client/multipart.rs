//! Minimal `multipart/form-data` encoder.
//!
//! ureq does not ship a multipart builder, so the two request bodies the
//! kiosk sends are assembled by hand. Only what the backend needs is
//! supported: text fields and in-memory file parts.

use rand::Rng;

const CRLF: &str = "\r\n";

/// Incrementally built multipart body with a random boundary.
pub struct MultipartBody {
    boundary: String,
    buf: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        let mut rng = rand::thread_rng();
        // 128 bits of boundary entropy; JPEG payloads cannot collide with
        // this in practice.
        let boundary = format!("kiosk{:016x}{:016x}", rng.gen::<u64>(), rng.gen::<u64>());
        Self {
            boundary,
            buf: Vec::new(),
        }
    }

    /// Append a plain text field.
    pub fn add_text(&mut self, name: &str, value: &str) {
        self.open_part();
        self.put(&format!(
            "Content-Disposition: form-data; name=\"{}\"{CRLF}{CRLF}",
            name
        ));
        self.put(value);
        self.put(CRLF);
    }

    /// Append a file part with the given content type.
    pub fn add_file(&mut self, name: &str, filename: &str, content_type: &str, bytes: &[u8]) {
        self.open_part();
        self.put(&format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"{CRLF}",
            name, filename
        ));
        self.put(&format!("Content-Type: {}{CRLF}{CRLF}", content_type));
        self.buf.extend_from_slice(bytes);
        self.put(CRLF);
    }

    /// Value for the request's Content-Type header.
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Close the body and return the encoded bytes.
    pub fn finish(mut self) -> Vec<u8> {
        self.put(&format!("--{}--{CRLF}", self.boundary));
        self.buf
    }

    fn open_part(&mut self) {
        self.put(&format!("--{}{CRLF}", self.boundary));
    }

    fn put(&mut self, text: &str) {
        self.buf.extend_from_slice(text.as_bytes());
    }
}

impl Default for MultipartBody {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_field_is_framed_with_boundary() {
        let mut body = MultipartBody::new();
        let boundary = body.content_type();
        let boundary = boundary.split("boundary=").nth(1).unwrap().to_string();
        body.add_text("name", "Alice");
        let bytes = body.finish();
        let text = String::from_utf8(bytes).expect("utf8 body");

        assert!(text.starts_with(&format!("--{boundary}\r\n")));
        assert!(text.contains("Content-Disposition: form-data; name=\"name\"\r\n\r\nAlice\r\n"));
        assert!(text.ends_with(&format!("--{boundary}--\r\n")));
    }

    #[test]
    fn file_part_carries_filename_and_content_type() {
        let mut body = MultipartBody::new();
        body.add_file("front_photo", "front.jpg", "image/jpeg", &[0xFF, 0xD8, 0xFF, 0xD9]);
        let bytes = body.finish();
        let text = String::from_utf8_lossy(&bytes);

        assert!(text
            .contains("Content-Disposition: form-data; name=\"front_photo\"; filename=\"front.jpg\"\r\n"));
        assert!(text.contains("Content-Type: image/jpeg\r\n\r\n"));
    }

    #[test]
    fn binary_payload_is_untouched() {
        let payload: Vec<u8> = (0u16..=255).map(|b| b as u8).collect();
        let mut body = MultipartBody::new();
        body.add_file("file", "photo.jpg", "image/jpeg", &payload);
        let bytes = body.finish();

        let found = bytes
            .windows(payload.len())
            .any(|window| window == payload.as_slice());
        assert!(found, "payload bytes must appear verbatim in the body");
    }

    #[test]
    fn boundaries_are_unique_per_body() {
        assert_ne!(
            MultipartBody::new().content_type(),
            MultipartBody::new().content_type()
        );
    }
}
