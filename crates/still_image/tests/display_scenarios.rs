//! End-to-end display scenarios through the public API.
//!
//! Covers:
//! - Debounced range switching on a single selector
//! - Incident override and fallback to the committed range image
//! - Camera config loading, directional routing and the Bevy feed pipeline
//! - Image files landing in the display directory
//!
//! Run: cargo test -p still_image --test display_scenarios

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use bevy::prelude::*;

use still_image::camera_db::CameraKey;
use still_image::transport::ShownImage;
use still_image::{
    CameraFeedQueue, CctvDirection, DirectoryTransport, DisplayOutcome, DisplayOutcomeLog,
    DisplayState, ImageSelector, IncidentImage, RecordingTransport, SelectorError,
    SharedImageSelector, SpeedRange, StillImageDb, StillImagePlugin, SyntheticSpeedFeed,
};

fn three_range_selector(transport: Arc<RecordingTransport>) -> ImageSelector {
    let mut selector = ImageSelector::new(1, transport);
    selector.add_range(SpeedRange::new(0.0, 30.0, "slow").unwrap());
    selector.add_range(SpeedRange::new(30.0, 60.0, "med").unwrap());
    selector.add_range(SpeedRange::new(60.0, 200.0, "fast").unwrap());
    selector.add_incident(IncidentImage::new(7, "crash7"));
    selector
}

// ---------------------------------------------------------------------------
// 1. Single selector
// ---------------------------------------------------------------------------

#[test]
fn test_debounced_switch_from_slow_to_medium() {
    let transport = Arc::new(RecordingTransport::new());
    let mut selector = three_range_selector(transport.clone());

    let results: Vec<bool> = [25.0, 25.0, 35.0, 35.0, 35.0]
        .into_iter()
        .map(|speed| selector.update_speed(speed))
        .collect();

    assert_eq!(results, vec![false, true, false, false, true]);
    assert_eq!(selector.current_image(), Some("med"));
    // update_speed never talks to the display on its own.
    assert!(transport.shown().is_empty());
}

#[test]
fn test_incident_override_then_fallback() {
    let transport = Arc::new(RecordingTransport::new());
    let mut selector = three_range_selector(transport.clone());
    selector.update_speed(25.0);
    selector.update_speed(25.0);

    selector.toggle_incident(7, true).unwrap();
    selector.show_current_image().unwrap();
    assert_eq!(
        transport.last_shown(),
        Some(ShownImage {
            endpoint_id: 1,
            image_id: "crash7".to_string()
        })
    );

    let err = selector.toggle_incident(8, false).unwrap_err();
    assert!(matches!(err, SelectorError::Toggle(_)));
    assert_eq!(selector.state(), DisplayState::ShowingIncident);

    selector.toggle_incident(7, false).unwrap();
    selector.show_current_image().unwrap();
    assert_eq!(transport.shown_images().last().map(String::as_str), Some("slow"));
    assert_eq!(selector.state(), DisplayState::ShowingRange);
}

#[test]
fn test_shared_selector_pushes_committed_images() {
    let transport = Arc::new(RecordingTransport::new());
    let shared = SharedImageSelector::new(three_range_selector(transport.clone()));

    assert!(!shared.update_speed(80.0).unwrap());
    assert!(shared.update_speed(80.0).unwrap());
    assert_eq!(transport.shown_images(), vec!["fast"]);
    assert_eq!(shared.current_image().as_deref(), Some("fast"));
}

// ---------------------------------------------------------------------------
// 2. Camera database and feed pipeline
// ---------------------------------------------------------------------------

const CORRIDOR: &str = r#"{
    "cameras": [
        {
            "id": 40, "display_id": 1, "direction": "N",
            "ranges": [
                { "min_speed": 0, "max_speed": 25, "image": "north_jam" },
                { "min_speed": 25, "max_speed": 120, "image": "north_free" }
            ],
            "incidents": [ { "incident": 3, "image": "north_crash" } ]
        },
        {
            "id": 40, "display_id": 2, "direction": "W",
            "ranges": [
                { "min_speed": 0, "max_speed": 25, "image": "west_jam" },
                { "min_speed": 25, "max_speed": 120, "image": "west_free" }
            ]
        }
    ]
}"#;

#[test]
fn test_speeds_route_to_matching_direction() {
    let transport = Arc::new(RecordingTransport::new());
    let mut db = StillImageDb::from_json_str(CORRIDOR, transport.clone()).unwrap();

    assert!(db.update_camera_info(40, 10.0, 90.0).is_empty());
    let outcomes = db.update_camera_info(40, 10.0, 90.0);

    assert_eq!(outcomes.len(), 2);
    assert_eq!(
        transport.shown(),
        vec![
            ShownImage {
                endpoint_id: 1,
                image_id: "north_jam".to_string()
            },
            ShownImage {
                endpoint_id: 2,
                image_id: "west_free".to_string()
            },
        ]
    );
    assert_eq!(
        db.get(40, CctvDirection::West).and_then(|s| s.current_image()),
        Some("west_free")
    );
    assert!(db.get(40, CctvDirection::South).is_none());
    assert_eq!(
        db.directions_for(40),
        vec![CctvDirection::North, CctvDirection::West]
    );
}

#[test]
fn test_feed_pipeline_through_plugin() {
    let transport = Arc::new(RecordingTransport::new());
    let db = StillImageDb::from_json_str(CORRIDOR, transport.clone()).unwrap();

    let mut app = App::new();
    app.add_plugins(StillImagePlugin);
    app.insert_resource(db);

    {
        let mut queue = app.world_mut().resource_mut::<CameraFeedQueue>();
        queue.push_speed(40, 60.0, 60.0);
        queue.push_speed(40, 60.0, 60.0);
        queue.push_incident(40, CctvDirection::North, 3, true);
        queue.push_speed(99, 1.0, 1.0);
    }
    app.update();

    assert_eq!(
        transport.shown_images(),
        vec!["north_free", "west_free", "north_crash"]
    );
    let log = app.world().resource::<DisplayOutcomeLog>();
    assert_eq!(log.len(), 4);
    assert_eq!(
        log.last_n(1),
        &[DisplayOutcome::UnknownCamera {
            cctv_id: 99,
            direction: None
        }]
    );

    let statuses = app.world().resource::<StillImageDb>().status(40);
    assert_eq!(statuses.len(), 2);
    assert_eq!(statuses[0].state, DisplayState::ShowingIncident);
    assert_eq!(statuses[0].image.as_deref(), Some("north_crash"));
    assert_eq!(statuses[1].state, DisplayState::ShowingRange);
}

#[test]
fn test_synthetic_feed_eventually_settles_display() {
    let transport = Arc::new(RecordingTransport::new());
    let mut db = StillImageDb::from_json_str(CORRIDOR, transport.clone()).unwrap();
    let mut feed = SyntheticSpeedFeed::new(42, 10.0, 5.0);

    for _ in 0..10 {
        let (ne, sw) = (feed.next_sample(), feed.next_sample());
        db.update_camera_info(40, ne, sw);
    }

    // Samples stay within 5..=15, so both displays must show their jam image.
    let key = CameraKey::new(40, CctvDirection::North);
    let north = db.iter().find(|(k, _)| **k == key).map(|(_, s)| s);
    assert_eq!(north.and_then(|s| s.current_image()), Some("north_jam"));
    assert_eq!(transport.shown_images(), vec!["north_jam", "west_jam"]);
}

// ---------------------------------------------------------------------------
// 3. Directory transport
// ---------------------------------------------------------------------------

struct ScratchDir(PathBuf);

impl ScratchDir {
    fn new(name: &str) -> Self {
        let path = std::env::temp_dir().join(format!(
            "still_image_it_{name}_{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&path);
        fs::create_dir_all(&path).unwrap();
        Self(path)
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.0);
    }
}

#[test]
fn test_directory_transport_writes_display_file() {
    let dir = ScratchDir::new("display_file");
    let transport = Arc::new(DirectoryTransport::new(&dir.0));
    fs::write(transport.image_path("north_jam"), b"jam pixels").unwrap();
    fs::write(transport.display_path(1), b"").unwrap();

    let mut selector = ImageSelector::new(1, transport.clone());
    selector.add_range(SpeedRange::new(0.0, 25.0, "north_jam").unwrap());
    selector.update_speed(5.0);
    assert!(selector.update_speed(5.0));
    selector.show_current_image().unwrap();

    assert_eq!(
        fs::read(transport.display_path(1)).unwrap(),
        b"jam pixels".to_vec()
    );
}
