use serde::{Deserialize, Serialize};

/// Direction a CCTV camera faces. Each direction of a camera has its own
/// display and selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CctvDirection {
    #[serde(rename = "N", alias = "n")]
    North,
    #[serde(rename = "S", alias = "s")]
    South,
    #[serde(rename = "E", alias = "e")]
    East,
    #[serde(rename = "W", alias = "w")]
    West,
}

impl CctvDirection {
    pub const ALL: [CctvDirection; 4] = [
        CctvDirection::North,
        CctvDirection::South,
        CctvDirection::East,
        CctvDirection::West,
    ];

    /// Parse a direction letter, case-insensitively.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'N' => Some(CctvDirection::North),
            'S' => Some(CctvDirection::South),
            'E' => Some(CctvDirection::East),
            'W' => Some(CctvDirection::West),
            _ => None,
        }
    }

    pub fn letter(self) -> char {
        match self {
            CctvDirection::North => 'N',
            CctvDirection::South => 'S',
            CctvDirection::East => 'E',
            CctvDirection::West => 'W',
        }
    }

    /// North- and east-facing displays follow the N/E traffic speed; the
    /// others follow S/W.
    pub fn follows_north_east(self) -> bool {
        matches!(self, CctvDirection::North | CctvDirection::East)
    }
}

/// Lookup key for one camera display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CameraKey {
    pub cctv_id: u32,
    pub direction: CctvDirection,
}

impl CameraKey {
    pub fn new(cctv_id: u32, direction: CctvDirection) -> Self {
        Self { cctv_id, direction }
    }
}
