//! Headless driver loop: reads JSON commands from stdin and writes JSON
//! responses to stdout, or with `--demo` feeds the cameras from a seeded
//! synthetic speed generator.
//!
//! ## Protocol
//!
//! Each line of stdin is a JSON object with a `"cmd"` discriminator.
//! Each line of stdout is a JSON response with `"protocol_version"` and
//! `"type"` fields. See [`still_image::protocol`] for the full schema.
//! Log output goes to stderr.

use std::collections::BTreeSet;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::sync::Arc;

use bevy::log::LogPlugin;
use bevy::prelude::*;

use still_image::protocol::{
    make_response, DriverCommand, DriverResponse, ResponsePayload, PROTOCOL_VERSION,
};
use still_image::{
    CameraFeedQueue, DirectoryTransport, DisplayOutcome, DisplayOutcomeLog, DisplayTransport,
    FeedEvent, LoggingTransport, StillImageDb, StillImagePlugin, SyntheticSpeedFeed,
};

use crate::CliArgs;

/// Number of synthetic speed samples sent to every camera in demo mode.
const DEMO_TICKS: u32 = 120;

pub fn run(args: &CliArgs) -> ExitCode {
    let transport: Arc<dyn DisplayTransport> = match &args.image_dir {
        Some(dir) => Arc::new(DirectoryTransport::new(dir.clone())),
        None => Arc::new(LoggingTransport),
    };

    let mut app = App::new();
    app.add_plugins(LogPlugin::default());

    let db = match StillImageDb::load_from_path(&args.config, transport) {
        Ok(db) => db,
        Err(e) => {
            error!("Cannot load camera config {}: {e}", args.config.display());
            return ExitCode::FAILURE;
        }
    };
    setup_app(&mut app, db);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = match args.demo_seed {
        Some(seed) => run_demo(&mut app, seed, &mut out),
        None => run_driver(&mut app, io::stdin().lock(), &mut out),
    };

    match result {
        Ok(()) => {
            info!("cctv_sim shutting down");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("stdout write failed: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Add the still-image plugins to `app`, install the camera database and
/// run one update so every resource is initialised.
pub fn setup_app(app: &mut App, db: StillImageDb) {
    app.add_plugins(MinimalPlugins)
        .add_plugins(StillImagePlugin)
        .insert_resource(db);
    app.update();
}

fn write_response(out: &mut impl Write, response: &DriverResponse) -> io::Result<()> {
    serde_json::to_writer(&mut *out, response)?;
    writeln!(out)?;
    out.flush()
}

fn ready(app: &App) -> DriverResponse {
    let cameras = app.world().resource::<StillImageDb>().len();
    make_response(ResponsePayload::Ready { cameras })
}

/// Serve commands from `input` until `quit` or end of input.
pub fn run_driver(app: &mut App, input: impl BufRead, out: &mut impl Write) -> io::Result<()> {
    write_response(out, &ready(app))?;
    info!("cctv_sim driver protocol v{PROTOCOL_VERSION} ready, waiting for commands on stdin");

    for line in input.lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                warn!("stdin read error: {e}");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<DriverCommand>(&line) {
            Ok(cmd) => process_command(cmd, app),
            Err(e) => make_response(ResponsePayload::Error {
                message: format!("Parse error: {e}"),
            }),
        };
        let is_goodbye = matches!(response.payload, ResponsePayload::Goodbye);
        write_response(out, &response)?;
        if is_goodbye {
            break;
        }
    }
    Ok(())
}

/// Apply one command and build its response.
pub fn process_command(cmd: DriverCommand, app: &mut App) -> DriverResponse {
    match cmd {
        DriverCommand::Speed { .. } | DriverCommand::Incident { .. } => {
            let outcomes = feed_and_collect(app, cmd.feed_event());
            make_response(ResponsePayload::Outcomes { outcomes })
        }
        DriverCommand::Status { cctv_id } => {
            let displays = app.world().resource::<StillImageDb>().status(cctv_id);
            if displays.is_empty() {
                make_response(ResponsePayload::Error {
                    message: format!("no displays configured for CCTV {cctv_id}"),
                })
            } else {
                make_response(ResponsePayload::Status { displays })
            }
        }
        DriverCommand::Quit => make_response(ResponsePayload::Goodbye),
    }
}

/// Queue `events` one at a time, running an update for each, and return
/// the outcomes they produced. A single event touches at most one display
/// per direction, so each update stays well inside the outcome log.
fn feed_and_collect(
    app: &mut App,
    events: impl IntoIterator<Item = FeedEvent>,
) -> Vec<DisplayOutcome> {
    let mut outcomes = Vec::new();
    for event in events {
        let mark = app.world().resource::<DisplayOutcomeLog>().recorded();
        app.world_mut().resource_mut::<CameraFeedQueue>().push(event);
        app.update();

        let log = app.world().resource::<DisplayOutcomeLog>();
        let produced = log.recorded() - mark;
        let retained = log.since(mark);
        if produced > retained.len() as u64 {
            warn!(
                "Outcome log overflowed: {} of {produced} outcomes lost",
                produced - retained.len() as u64
            );
        }
        outcomes.extend_from_slice(retained);
    }
    outcomes
}

/// Drive every configured camera with synthetic speeds for [`DEMO_TICKS`]
/// updates, writing the outcomes of each tick that changed a display.
pub fn run_demo(app: &mut App, seed: u64, out: &mut impl Write) -> io::Result<()> {
    write_response(out, &ready(app))?;

    let camera_ids: BTreeSet<u32> = app
        .world()
        .resource::<StillImageDb>()
        .iter()
        .map(|(key, _)| key.cctv_id)
        .collect();
    info!(
        "Demo run: {} cameras, {DEMO_TICKS} ticks, seed {seed}",
        camera_ids.len()
    );

    let mut feed = SyntheticSpeedFeed::new(seed, 60.0, 8.0);
    for _ in 0..DEMO_TICKS {
        feed.wander(6.0);
        let events: Vec<FeedEvent> = camera_ids
            .iter()
            .map(|&cctv_id| feed.speed_event(cctv_id))
            .collect();
        let outcomes = feed_and_collect(app, events);
        if !outcomes.is_empty() {
            write_response(out, &make_response(ResponsePayload::Outcomes { outcomes }))?;
        }
    }

    write_response(out, &make_response(ResponsePayload::Goodbye))
}
