//! Binary entrypoint for the ansidoor BBS door.
//!
//! Usage: `ansidoor --path <DIR|FILE>`, where the path is the node directory holding
//! `door32.sys` or the drop file itself. Without `--path` the door prints a usage
//! error and exits with status 2 before touching the terminal. The single-dash
//! `-path <DIR>` form found in existing BBS door setups is accepted too.
//!
//! Optional settings are read from the TOML file named by `ANSIDOOR_CONFIG`.
use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

use ansidoor::config::Config;
use ansidoor::door;

#[derive(Parser, Debug)]
#[command(name = "ansidoor")]
#[command(about = "An ANSI BBS door with a single-key test menu")]
#[command(version)]
struct Cli {
    /// Path to the DOOR32.SYS drop file or the directory containing it
    #[arg(long)]
    path: PathBuf,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse_from(normalize_args(std::env::args_os()));

    let config = Config::from_env()
        .await
        .context("failed to load door configuration")?;
    init_logging(&config);
    info!("Starting ansidoor v{}", env!("CARGO_PKG_VERSION"));

    let report = door::run_door(&cli.path, &config)
        .await
        .with_context(|| format!("door session failed (drop file: {})", cli.path.display()))?;

    info!("ansidoor exiting: {:?}", report.outcome);
    Ok(ExitCode::SUCCESS)
}

/// Rewrite `-path` and `-path=<DIR>` to their double-dash form; clap would otherwise
/// read them as a bundle of short flags.
fn normalize_args(args: impl IntoIterator<Item = OsString>) -> Vec<OsString> {
    args.into_iter()
        .map(|arg| {
            let rewritten = match arg.to_str() {
                Some("-path") => Some(OsString::from("--path")),
                Some(s) if s.starts_with("-path=") => Some(OsString::from(format!("-{s}"))),
                _ => None,
            };
            rewritten.unwrap_or(arg)
        })
        .collect()
}

fn init_logging(config: &Config) {
    use std::io::Write;
    let mut builder = env_logger::Builder::new();
    builder.filter_level(config.logging.level_filter());
    // The remote caller is on stdout, so console logging only ever goes to stderr.
    builder.target(env_logger::Target::Stderr);

    if let Some(ref file) = config.logging.file {
        if let Ok(f) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(file)
        {
            let write_mutex = std::sync::Mutex::new(f);
            builder.format(move |_fmt, record| {
                let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
                if let Ok(mut guard) = write_mutex.lock() {
                    let _ = writeln!(guard, "{} [{}] {}", ts, record.level(), record.args());
                }
                Ok(())
            });
            let _ = builder.try_init();
            return;
        }
    }

    // A terminal on stderr is the caller's screen on a local node; keep it clean.
    if atty::is(atty::Stream::Stderr) {
        builder.filter_level(log::LevelFilter::Off);
    }
    builder.format(|fmt, record| {
        let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
        writeln!(fmt, "{} [{}] {}", ts, record.level(), record.args())
    });
    let _ = builder.try_init();
}
