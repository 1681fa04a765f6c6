//! File-swap transport for a display host whose image directory is mounted
//! locally.
//!
//! Each display slot is a file `cctvImage<endpoint>.xpm`; every library image
//! is `<image>.xpm` in the same directory. Showing an image replaces the slot
//! file with a copy of the library image. Both files must already exist.

use std::fs;
use std::path::{Path, PathBuf};

use bevy::prelude::*;

use super::DisplayTransport;
use crate::config::{DISPLAY_FILE_PREFIX, IMAGE_EXTENSION};
use crate::errors::RemoteDisplayError;
use crate::image_selector::EndpointId;

#[derive(Debug, Clone)]
pub struct DirectoryTransport {
    image_dir: PathBuf,
}

impl DirectoryTransport {
    pub fn new(image_dir: impl Into<PathBuf>) -> Self {
        Self {
            image_dir: image_dir.into(),
        }
    }

    pub fn image_dir(&self) -> &Path {
        &self.image_dir
    }

    pub fn image_path(&self, image_id: &str) -> PathBuf {
        self.image_dir.join(format!("{image_id}.{IMAGE_EXTENSION}"))
    }

    pub fn display_path(&self, endpoint_id: EndpointId) -> PathBuf {
        self.image_dir
            .join(format!("{DISPLAY_FILE_PREFIX}{endpoint_id}.{IMAGE_EXTENSION}"))
    }
}

impl DisplayTransport for DirectoryTransport {
    fn show_image(&self, endpoint_id: EndpointId, image_id: &str) -> Result<(), RemoteDisplayError> {
        let destination = self.display_path(endpoint_id);
        if !destination.is_file() {
            return Err(RemoteDisplayError::MissingDestination { path: destination });
        }

        let source = self.image_path(image_id);
        if !source.is_file() {
            return Err(RemoteDisplayError::MissingSource { path: source });
        }

        fs::copy(&source, &destination)?;
        info!("Showing display {endpoint_id}, with image: {image_id}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Scratch image directory removed on drop.
    struct ScratchDir(PathBuf);

    impl ScratchDir {
        fn new(name: &str) -> Self {
            let path = std::env::temp_dir().join(format!(
                "still_image_{name}_{}",
                std::process::id()
            ));
            let _ = fs::remove_dir_all(&path);
            fs::create_dir_all(&path).expect("create scratch dir");
            Self(path)
        }

        fn write(&self, file: &str, contents: &str) {
            fs::write(self.0.join(file), contents).expect("write scratch file");
        }
    }

    impl Drop for ScratchDir {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }

    #[test]
    fn test_paths_follow_display_naming() {
        let transport = DirectoryTransport::new("/atms/images");
        assert_eq!(transport.image_dir(), Path::new("/atms/images"));
        assert_eq!(
            transport.display_path(4),
            PathBuf::from("/atms/images/cctvImage4.xpm")
        );
        assert_eq!(
            transport.image_path("slow"),
            PathBuf::from("/atms/images/slow.xpm")
        );
    }

    #[test]
    fn test_show_image_replaces_display_file() {
        let dir = ScratchDir::new("replace");
        dir.write("cctvImage3.xpm", "old");
        dir.write("crash7.xpm", "crash picture");

        let transport = DirectoryTransport::new(&dir.0);
        transport.show_image(3, "crash7").expect("swap should succeed");

        let shown = fs::read_to_string(dir.0.join("cctvImage3.xpm")).unwrap();
        assert_eq!(shown, "crash picture");
        // Library image is copied, not moved.
        assert!(dir.0.join("crash7.xpm").is_file());
    }

    #[test]
    fn test_missing_display_slot_is_reported_first() {
        let dir = ScratchDir::new("no_slot");
        let transport = DirectoryTransport::new(&dir.0);

        let err = transport.show_image(9, "slow").unwrap_err();
        match err {
            RemoteDisplayError::MissingDestination { path } => {
                assert!(path.ends_with("cctvImage9.xpm"), "got: {path:?}");
            }
            other => panic!("expected MissingDestination, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_library_image_leaves_display_untouched() {
        let dir = ScratchDir::new("no_source");
        dir.write("cctvImage1.xpm", "old");
        let transport = DirectoryTransport::new(&dir.0);

        let err = transport.show_image(1, "fast").unwrap_err();
        assert!(matches!(err, RemoteDisplayError::MissingSource { .. }));
        let shown = fs::read_to_string(dir.0.join("cctvImage1.xpm")).unwrap();
        assert_eq!(shown, "old");
    }
}
