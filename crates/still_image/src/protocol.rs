//! Driver text protocol for the headless `cctv_sim` binary.
//!
//! An external traffic model (or a script) feeds speed samples and incident
//! toggles as newline-delimited JSON on stdin and reads one JSON response
//! per command on stdout.
//!
//! These types live in the library crate so they can be unit-tested without
//! the binary. The I/O loop lives in `crates/app/src/headless.rs`.

use serde::{Deserialize, Serialize};

use crate::camera_db::{CameraStatus, CctvDirection, DisplayOutcome};
use crate::feed::FeedEvent;

// ---------------------------------------------------------------------------
// Commands (stdin → displays)
// ---------------------------------------------------------------------------

/// A single command read from one line of stdin. The `cmd` field is the tag.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "cmd")]
pub enum DriverCommand {
    /// Average speeds at a camera, one per travel direction.
    #[serde(rename = "speed")]
    Speed {
        cctv_id: u32,
        speed_ne: f32,
        speed_sw: f32,
    },

    /// Start or stop an incident override on one camera display.
    #[serde(rename = "incident")]
    Incident {
        cctv_id: u32,
        direction: CctvDirection,
        incident_id: u32,
        start: bool,
    },

    /// Report what every display of a camera is showing.
    #[serde(rename = "status")]
    Status { cctv_id: u32 },

    /// End the session.
    #[serde(rename = "quit")]
    Quit,
}

impl DriverCommand {
    /// The feed event carried by this command, if it is one.
    pub fn feed_event(&self) -> Option<FeedEvent> {
        match *self {
            DriverCommand::Speed {
                cctv_id,
                speed_ne,
                speed_sw,
            } => Some(FeedEvent::Speed {
                cctv_id,
                speed_ne,
                speed_sw,
            }),
            DriverCommand::Incident {
                cctv_id,
                direction,
                incident_id,
                start,
            } => Some(FeedEvent::Incident {
                cctv_id,
                direction,
                incident_id,
                start,
            }),
            DriverCommand::Status { .. } | DriverCommand::Quit => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Responses (displays → stdout)
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct DriverResponse {
    pub protocol_version: u32,
    #[serde(flatten)]
    pub payload: ResponsePayload,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum ResponsePayload {
    /// Cameras are loaded and commands are accepted.
    #[serde(rename = "ready")]
    Ready { cameras: usize },

    /// What a speed or incident command did to the displays.
    #[serde(rename = "outcomes")]
    Outcomes { outcomes: Vec<DisplayOutcome> },

    #[serde(rename = "status")]
    Status { displays: Vec<CameraStatus> },

    #[serde(rename = "error")]
    Error { message: String },

    #[serde(rename = "goodbye")]
    Goodbye,
}

/// Current protocol version. Bump when the command/response schema changes.
pub const PROTOCOL_VERSION: u32 = 1;

pub fn make_response(payload: ResponsePayload) -> DriverResponse {
    DriverResponse {
        protocol_version: PROTOCOL_VERSION,
        payload,
    }
}
