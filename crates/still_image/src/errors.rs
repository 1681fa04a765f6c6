// ---------------------------------------------------------------------------
// Error types for image selection, display dispatch and camera configuration
// ---------------------------------------------------------------------------

use std::fmt;
use std::path::PathBuf;

use crate::camera_db::CctvDirection;
use crate::image_selector::EndpointId;

/// A stop toggle named an incident that is not the one currently shown.
///
/// This is an operator mistake rather than a fault: the selector state is
/// left untouched and the session carries on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleError {
    pub endpoint_id: EndpointId,
    pub incident_id: u32,
}

impl fmt::Display for ToggleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unable to toggle incident #{} on display {}: it is not the active incident",
            self.incident_id, self.endpoint_id
        )
    }
}

impl std::error::Error for ToggleError {}

/// Failures reported by a [`DisplayTransport`](crate::transport::DisplayTransport).
#[derive(Debug)]
pub enum RemoteDisplayError {
    /// The image to show does not exist on the display host.
    MissingSource { path: PathBuf },
    /// The display slot being replaced does not exist on the display host.
    MissingDestination { path: PathBuf },
    /// I/O error while swapping the image file.
    Io(std::io::Error),
    /// The transport refused the request for another reason.
    Rejected(String),
}

impl fmt::Display for RemoteDisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteDisplayError::MissingSource { path } => {
                write!(f, "{} does not exist", path.display())
            }
            RemoteDisplayError::MissingDestination { path } => {
                write!(f, "{} does not exist", path.display())
            }
            RemoteDisplayError::Io(e) => write!(f, "I/O error: {e}"),
            RemoteDisplayError::Rejected(msg) => write!(f, "Display rejected request: {msg}"),
        }
    }
}

impl std::error::Error for RemoteDisplayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RemoteDisplayError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for RemoteDisplayError {
    fn from(e: std::io::Error) -> Self {
        RemoteDisplayError::Io(e)
    }
}

/// Errors returned by `ImageSelector::toggle_incident`, which can both
/// reject the toggle and hit the transport.
#[derive(Debug)]
pub enum SelectorError {
    Toggle(ToggleError),
    Display(RemoteDisplayError),
}

impl fmt::Display for SelectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectorError::Toggle(e) => write!(f, "{e}"),
            SelectorError::Display(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for SelectorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SelectorError::Toggle(e) => Some(e),
            SelectorError::Display(e) => Some(e),
        }
    }
}

impl From<ToggleError> for SelectorError {
    fn from(e: ToggleError) -> Self {
        SelectorError::Toggle(e)
    }
}

impl From<RemoteDisplayError> for SelectorError {
    fn from(e: RemoteDisplayError) -> Self {
        SelectorError::Display(e)
    }
}

/// Errors raised while building selectors from camera configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    Io(std::io::Error),
    /// The configuration is not valid JSON for the camera schema.
    Parse(String),
    /// A speed range with `min > max` or a NaN bound.
    InvalidRange { min: f32, max: f32 },
    /// Two camera entries share the same id and direction.
    DuplicateCamera {
        cctv_id: u32,
        direction: CctvDirection,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "I/O error: {e}"),
            ConfigError::Parse(msg) => write!(f, "Parse error: {msg}"),
            ConfigError::InvalidRange { min, max } => {
                write!(f, "Invalid speed range [{min}, {max})")
            }
            ConfigError::DuplicateCamera { cctv_id, direction } => write!(
                f,
                "Duplicate camera entry for CCTV {cctv_id} facing {}",
                direction.letter()
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_error_display_names_incident_and_display() {
        let err = ToggleError {
            endpoint_id: 3,
            incident_id: 8,
        };
        let msg = format!("{err}");
        assert!(msg.contains("#8"), "got: {msg}");
        assert!(msg.contains("display 3"), "got: {msg}");
    }

    #[test]
    fn test_remote_display_error_display_missing_source() {
        let err = RemoteDisplayError::MissingSource {
            path: PathBuf::from("/images/crash7.xpm"),
        };
        let msg = format!("{err}");
        assert!(msg.contains("/images/crash7.xpm"), "got: {msg}");
        assert!(msg.contains("does not exist"), "got: {msg}");
    }

    #[test]
    fn test_remote_display_error_from_io_keeps_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: RemoteDisplayError = io_err.into();
        assert!(matches!(err, RemoteDisplayError::Io(_)));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_selector_error_wraps_both_kinds() {
        let toggle: SelectorError = ToggleError {
            endpoint_id: 1,
            incident_id: 2,
        }
        .into();
        assert!(matches!(toggle, SelectorError::Toggle(_)));

        let display: SelectorError = RemoteDisplayError::Rejected("offline".to_string()).into();
        assert!(matches!(display, SelectorError::Display(_)));
        assert!(format!("{display}").contains("offline"));
    }

    #[test]
    fn test_config_error_display_invalid_range() {
        let err = ConfigError::InvalidRange {
            min: 60.0,
            max: 30.0,
        };
        let msg = format!("{err}");
        assert!(msg.contains("60"), "got: {msg}");
        assert!(msg.contains("30"), "got: {msg}");
    }

    #[test]
    fn test_config_error_from_serde_json() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: ConfigError = json_err.into();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_config_error_duplicate_camera_uses_direction_letter() {
        let err = ConfigError::DuplicateCamera {
            cctv_id: 12,
            direction: CctvDirection::South,
        };
        let msg = format!("{err}");
        assert!(msg.contains("CCTV 12"), "got: {msg}");
        assert!(msg.contains('S'), "got: {msg}");
    }
}
