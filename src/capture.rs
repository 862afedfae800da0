//! Angle-keyed photo state for registration.
//!
//! Registration needs exactly three photos of the student, one per fixed
//! angle (front, left, right). `CaptureState` tracks which angles have been
//! captured; submission is only allowed once all three are present.
//!
//! Photos are held in memory only. They are cleared after a successful
//! registration and zeroized on drop.

use std::fmt;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use zeroize::Zeroize;

/// One of the three fixed capture viewpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Angle {
    Front,
    Left,
    Right,
}

impl Angle {
    /// All angles, in capture order.
    pub const ALL: [Angle; 3] = [Angle::Front, Angle::Left, Angle::Right];

    pub fn as_str(&self) -> &'static str {
        match self {
            Angle::Front => "front",
            Angle::Left => "left",
            Angle::Right => "right",
        }
    }

    /// Multipart field name the registration endpoint expects.
    pub fn field_name(&self) -> &'static str {
        match self {
            Angle::Front => "front_photo",
            Angle::Left => "left_photo",
            Angle::Right => "right_photo",
        }
    }

    pub fn parse(value: &str) -> Option<Angle> {
        match value.to_lowercase().as_str() {
            "front" => Some(Angle::Front),
            "left" => Some(Angle::Left),
            "right" => Some(Angle::Right),
            _ => None,
        }
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A captured still photo, JPEG-encoded.
pub struct Photo {
    jpeg: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl Photo {
    pub fn new(jpeg: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            jpeg,
            width,
            height,
        }
    }

    pub fn jpeg_bytes(&self) -> &[u8] {
        &self.jpeg
    }

    /// `data:` URI for thumbnail surfaces.
    pub fn data_uri(&self) -> String {
        format!("data:image/jpeg;base64,{}", BASE64.encode(&self.jpeg))
    }
}

impl Drop for Photo {
    fn drop(&mut self) {
        // Face photos are sensitive; scrub them once replaced or reset.
        self.jpeg.zeroize();
    }
}

/// Mapping from angle to an optionally captured photo.
///
/// Invariant: registration may only be submitted when all three angles are
/// present. `is_complete` is a pure function of this state and must be
/// consulted after every store.
#[derive(Default)]
pub struct CaptureState {
    front: Option<Photo>,
    left: Option<Photo>,
    right: Option<Photo>,
}

impl CaptureState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a photo under `angle`, replacing any previous capture for that
    /// angle. Returns true if a previous photo was replaced.
    pub fn store(&mut self, angle: Angle, photo: Photo) -> bool {
        self.slot_mut(angle).replace(photo).is_some()
    }

    pub fn get(&self, angle: Angle) -> Option<&Photo> {
        match angle {
            Angle::Front => self.front.as_ref(),
            Angle::Left => self.left.as_ref(),
            Angle::Right => self.right.as_ref(),
        }
    }

    /// True once every angle has a photo.
    pub fn is_complete(&self) -> bool {
        Angle::ALL.iter().all(|angle| self.get(*angle).is_some())
    }

    pub fn captured_count(&self) -> usize {
        Angle::ALL
            .iter()
            .filter(|angle| self.get(**angle).is_some())
            .count()
    }

    /// Clear all three angles. Dropping the photos zeroizes them.
    pub fn reset(&mut self) {
        self.front = None;
        self.left = None;
        self.right = None;
    }

    fn slot_mut(&mut self, angle: Angle) -> &mut Option<Photo> {
        match angle {
            Angle::Front => &mut self.front,
            Angle::Left => &mut self.left,
            Angle::Right => &mut self.right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo(tag: u8) -> Photo {
        Photo::new(vec![0xFF, 0xD8, tag, 0xFF, 0xD9], 640, 480)
    }

    #[test]
    fn angle_parse_round_trips() {
        for angle in Angle::ALL {
            assert_eq!(Angle::parse(angle.as_str()), Some(angle));
        }
        assert_eq!(Angle::parse("FRONT"), Some(Angle::Front));
        assert_eq!(Angle::parse("sideways"), None);
    }

    #[test]
    fn complete_only_with_all_three_angles() {
        // Every proper subset of angles must leave the state incomplete.
        let subsets: [&[Angle]; 8] = [
            &[],
            &[Angle::Front],
            &[Angle::Left],
            &[Angle::Right],
            &[Angle::Front, Angle::Left],
            &[Angle::Front, Angle::Right],
            &[Angle::Left, Angle::Right],
            &[Angle::Front, Angle::Left, Angle::Right],
        ];

        for subset in subsets {
            let mut state = CaptureState::new();
            for (i, angle) in subset.iter().enumerate() {
                state.store(*angle, photo(i as u8));
            }
            assert_eq!(
                state.is_complete(),
                subset.len() == 3,
                "subset {:?}",
                subset
            );
            assert_eq!(state.captured_count(), subset.len());
        }
    }

    #[test]
    fn recapture_overwrites_only_that_angle() {
        let mut state = CaptureState::new();
        state.store(Angle::Front, photo(1));
        state.store(Angle::Left, photo(2));

        let replaced = state.store(Angle::Front, photo(9));
        assert!(replaced);
        assert_eq!(state.get(Angle::Front).unwrap().jpeg_bytes()[2], 9);
        assert_eq!(state.get(Angle::Left).unwrap().jpeg_bytes()[2], 2);
        assert!(state.get(Angle::Right).is_none());
    }

    #[test]
    fn reset_clears_everything() {
        let mut state = CaptureState::new();
        for (i, angle) in Angle::ALL.iter().enumerate() {
            state.store(*angle, photo(i as u8));
        }
        assert!(state.is_complete());

        state.reset();
        assert_eq!(state.captured_count(), 0);
        assert!(!state.is_complete());
    }

    #[test]
    fn data_uri_is_base64_jpeg() {
        let uri = photo(0).data_uri();
        assert!(uri.starts_with("data:image/jpeg;base64,"));
        assert!(uri.len() > "data:image/jpeg;base64,".len());
    }
}
