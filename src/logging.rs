//! Logger setup.
//!
//! Records go to three sinks:
//! - `warn` and `error` always go to stderr, whatever the configured level.
//! - Everything below `warn`, up to the configured level, goes to stdout with no decoration.
//!   Shader logs ([`SHADER_LOG_TARGET`]) always reach stdout.
//! - Everything at `debug` and above goes to the GL log file, timestamped.

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use log::LevelFilter;

use crate::settings::Settings;

/// Target of compile and link logs, which are printed at any configured level.
pub const SHADER_LOG_TARGET: &str = "shader_log";

static INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Truncates the GL log and writes the header with the local start time.
fn restart_log_file(path: &Path) -> std::io::Result<File> {
    let mut file = File::create(path)?;
    writeln!(
        file,
        "GL_LOG_FILE log. local time {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    )?;
    writeln!(file, "build version: {}\n", env!("CARGO_PKG_VERSION"))?;
    Ok(file)
}

/// The stdout and stderr sinks. Only stdout is gated by `level`.
fn console(level: LevelFilter, stdout: fern::Output, stderr: fern::Output) -> fern::Dispatch {
    let stdout = fern::Dispatch::new()
        .filter(move |meta| {
            meta.level() > log::Level::Warn
                && (meta.level() <= level
                    || (meta.target() == SHADER_LOG_TARGET && meta.level() <= log::Level::Info))
        })
        .format(|out, message, _| out.finish(format_args!("{message}")))
        .chain(stdout);
    let stderr = fern::Dispatch::new()
        .level(LevelFilter::Warn)
        .format(|out, message, record| out.finish(format_args!("{}: {message}", record.level())))
        .chain(stderr);
    fern::Dispatch::new().chain(stdout).chain(stderr)
}

/// Installs the global logger. Later calls do nothing.
pub fn init(settings: &Settings) -> Result<(), log::SetLoggerError> {
    if INITIALIZED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }

    let level = settings.level_filter();

    let mut root = fern::Dispatch::new()
        .level(level.max(LevelFilter::Debug))
        .chain(console(
            level,
            fern::Output::from(std::io::stdout()),
            fern::Output::from(std::io::stderr()),
        ));

    let mut file_error = None;
    if let Some(path) = &settings.log_file {
        match restart_log_file(path) {
            Ok(file) => {
                root = root.chain(
                    fern::Dispatch::new()
                        .level(LevelFilter::Debug)
                        .format(|out, message, record| {
                            out.finish(format_args!(
                                "[{} {} {}] {message}",
                                chrono::Local::now().format("%H:%M:%S%.3f"),
                                record.level(),
                                record.target()
                            ))
                        })
                        .chain(file),
                );
            }
            Err(e) => file_error = Some((path.clone(), e)),
        }
    }

    root.apply()?;

    if let Some((path, e)) = file_error {
        log::warn!("could not open GL log {} for writing: {e}", path.display());
    }
    log::debug!("logging initialized at {level}");
    Ok(())
}
