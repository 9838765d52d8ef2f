// src/main.rs

// Declare modules
pub mod app;
pub mod canvas;
pub mod color;
pub mod config;
pub mod editor;
pub mod error;
pub mod frontend;
pub mod history;
pub mod keys;
pub mod raster;
pub mod renderer;
pub mod storage;

use crate::{
    app::{App, AppStatus},
    config::Config,
    editor::EditorState,
    frontend::ConsoleIo,
};

use anyhow::Context;
use log::{error, info};

/// Main entry point for the `cellpaint` application.
fn main() -> anyhow::Result<()> {
    // Initialize the logger. Default filter is "info" if RUST_LOG is not set.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    info!("Starting cellpaint...");

    let config = Config::load_or_default();
    info!(
        "Canvas: {}x{} cells, history capacity {}, saving to {}.",
        config.canvas.width,
        config.canvas.height,
        config.history.capacity,
        config.storage.directory.display()
    );

    let console = ConsoleIo::new().context("Failed to initialize console I/O")?;
    let editor = EditorState::new(&config);
    let mut app = App::new(console, editor).context("Failed to initialize application")?;

    app.draw().context("Failed to draw initial frame")?;

    info!("Starting main event loop...");
    loop {
        match app.process_event_cycle() {
            Ok(AppStatus::Running) => {}
            Ok(AppStatus::Shutdown) => {
                info!("Shutdown requested. Exiting main loop.");
                break;
            }
            Err(e) => {
                error!(
                    "Error in event cycle: {:#}. Root cause: {:?}. Exiting.",
                    e,
                    e.root_cause()
                );
                break;
            }
        }
    }

    // Quit always exits 0; a failed terminal restore is logged, not fatal.
    if let Err(e) = app.shutdown() {
        error!("Failed to restore console state: {:#}", e);
    }
    info!("cellpaint exited successfully.");

    Ok(())
}
