//! # rover
//!
//! The controller. It ships a RoverScript program to a running rover by
//! copying the program into the rover's command file, where the daemon's
//! watcher picks it up.

use std::{fs, path::PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;

use roverscript::rover::command_file;

/// Send a program file to a rover.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// The program file to send.
    file: PathBuf,

    /// Name of the rover that should run the program.
    #[arg(default_value = "Rover1")]
    rover: String,

    /// Directory holding the per-rover command files.
    #[arg(short, long, default_value = ".")]
    command_dir: PathBuf,
}

fn main() -> Result<()> {
    let args = Cli::parse();

    let content = fs::read_to_string(&args.file)
        .with_context(|| format!("could not read '{}'", args.file.display()))?;

    let target = command_file(&args.command_dir, &args.rover);
    if !target.exists() {
        bail!(
            "unknown rover '{}': no command file at '{}' (is roverd running?)",
            args.rover,
            target.display()
        );
    }

    fs::write(&target, content)
        .with_context(|| format!("could not write '{}'", target.display()))?;

    println!("Command sent successfully! See the rover for more details");

    Ok(())
}
