//! # roverd
//!
//! The rover daemon. It spawns one simulated rover per configured name, each
//! on its own thread with its own map copy, and keeps every rover watching
//! its command file for RoverScript programs to run.

mod cli;
mod config;

use std::{fs, thread, time::Duration};

use anyhow::{Context, Result};
use log::{error, info};

use roverscript::rover::{command_file, watch, Rover, TileMap};

use cli::Cli;
use config::Config;

fn main() -> Result<()> {
    let args = Cli::init();

    simple_logger::init_with_level((&args.verbosity).into())?;

    let config = Config::load(&args.config)?;
    let map = TileMap::load(&config.map)
        .with_context(|| format!("could not load map '{}'", config.map.display()))?;

    let poll = Duration::from_secs(config.poll_secs);
    let max_runtime = Duration::from_secs(config.max_runtime_secs);

    let mut handles = vec![];
    for name in &config.rovers {
        let path = command_file(&config.command_dir, name);
        // start with an empty command file so stale commands never run
        fs::write(&path, "")
            .with_context(|| format!("could not create command file '{}'", path.display()))?;
        info!("{name}: watching {}", path.display());

        let rover = Rover::new(name.clone(), map.clone());
        handles.push(thread::spawn(move || watch(rover, &path, poll, max_runtime)));
    }

    for handle in handles {
        if handle.join().is_err() {
            error!("a rover thread panicked");
        }
    }

    Ok(())
}
