/// Number of consecutive updates that must agree on a new range image before
/// the selector switches to it.
pub const DEBOUNCE_THRESHOLD: u32 = 2;

/// Number of display outcomes retained by the outcome log.
pub const OUTCOME_LOG_CAPACITY: usize = 64;

/// File extension of every still image on the display host.
pub const IMAGE_EXTENSION: &str = "xpm";

/// Display slots are files named `<prefix><endpoint id>.<extension>`.
pub const DISPLAY_FILE_PREFIX: &str = "cctvImage";

/// Upper clamp for synthetic speed samples (mph).
pub const MAX_SYNTHETIC_SPEED: f32 = 90.0;
