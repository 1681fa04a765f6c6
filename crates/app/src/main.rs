use std::path::PathBuf;
use std::process::ExitCode;

mod headless;

const USAGE: &str = "usage: cctv_sim --config <cameras.json> [--image-dir <dir>] [--demo <seed>]";

/// Command-line options for the headless driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub config: PathBuf,
    /// Swap real image files in this directory instead of only logging.
    pub image_dir: Option<PathBuf>,
    /// Drive the cameras from the synthetic feed instead of stdin.
    pub demo_seed: Option<u64>,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<CliArgs, String> {
    let mut config = None;
    let mut image_dir = None;
    let mut demo_seed = None;

    let mut args = args.into_iter();
    while let Some(flag) = args.next() {
        let mut value = || args.next().ok_or_else(|| format!("{flag} needs a value"));
        match flag.as_str() {
            "--config" => config = Some(PathBuf::from(value()?)),
            "--image-dir" => image_dir = Some(PathBuf::from(value()?)),
            "--demo" => {
                let raw = value()?;
                let seed = raw
                    .parse::<u64>()
                    .map_err(|e| format!("--demo seed {raw:?} is not a number: {e}"))?;
                demo_seed = Some(seed);
            }
            other => return Err(format!("unknown argument {other:?}")),
        }
    }

    Ok(CliArgs {
        config: config.ok_or_else(|| "--config is required".to_string())?,
        image_dir,
        demo_seed,
    })
}

fn main() -> ExitCode {
    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    headless::run(&args)
}
