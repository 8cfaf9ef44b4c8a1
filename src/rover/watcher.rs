//! Polling loop feeding command files to a rover.
//!
//! Every rover watches one file. Whoever wants the rover to do something
//! writes a program into that file; the watcher picks it up, truncates the
//! file so the command is not run twice, and executes it.

use std::{
    fs, io,
    path::{Path, PathBuf},
    thread,
    time::{Duration, Instant},
};

use colored::Colorize;
use log::{debug, error, info};

use super::Rover;
use crate::run_program;

/// The command file of a named rover.
pub fn command_file(dir: &Path, rover_name: &str) -> PathBuf {
    dir.join(format!("{rover_name}.txt"))
}

/// Take a pending command out of the file, truncating it so the same command
/// is not picked up again. Returns `None` when nothing is pending.
pub fn take_command(path: &Path) -> io::Result<Option<String>> {
    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(None);
    }

    fs::write(path, "")?;

    Ok(Some(content))
}

/// Serve commands from `path` on `rover` until `max_runtime` has passed.
///
/// A failing command is reported and swallowed; the rover keeps its state and
/// the loop keeps watching.
pub fn watch(mut rover: Rover, path: &Path, poll: Duration, max_runtime: Duration) {
    let started = Instant::now();

    while started.elapsed() < max_runtime {
        debug!("{}: waiting for command...", rover.name());
        thread::sleep(poll);

        let command = match take_command(path) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                error!("{}: failed to read command file: {e}", rover.name());
                continue;
            }
        };

        info!("{}: running command", rover.name());
        let mut stdout = io::stdout();
        match run_program(&command, &mut rover, &mut stdout) {
            Ok(()) => info!("{}: finished running command", rover.name()),
            Err(e) => error!("{}: {}", rover.name(), e.to_string().red()),
        }
    }
}
