// main.rs - Conway's Game of Life desktop front end
// The engine and its ticker live in `life_engine`; this crate only reads
// their state and forwards button presses.

use std::path::{Path, PathBuf};

use clap::Parser;
use eframe::egui;
use egui::Color32;
use life_engine::{ConfigError, Dimensions, EngineError, GridEngine, LifeConfig, SimulationController};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod query;  // width/height share strings
mod ui;     // eframe::App implementation

#[derive(Debug, Parser)]
#[command(version, about = "Conway's Game of Life on a bounded grid")]
struct Args {
    /// Settings file; defaults are used when it does not exist.
    #[arg(long, default_value = "life.toml")]
    config: PathBuf,

    /// Shared grid size, e.g. "?width=40&height=30".
    #[arg(long)]
    query: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let args = Args::parse();
    let config = load_config(&args.config)?;
    info!(
        width = config.grid.width,
        height = config.grid.height,
        max_width = config.grid.max_width,
        max_height = config.grid.max_height,
        tick_interval_ms = config.simulation.tick_interval_ms,
        "Configuration loaded"
    );

    let mut engine = GridEngine::new(config.limits(), config.initial_dimensions())?;
    if let Some(shared) = args.query.as_deref() {
        apply_shared_size(&mut engine, shared);
    }

    let runtime = tokio::runtime::Runtime::new()?;
    let controller =
        SimulationController::from_config(engine, runtime.handle().clone(), &config.simulation);
    let app = GameOfLife::new(controller, runtime);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([800.0, 950.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Conway's Game of Life",
        options,
        Box::new(move |_cc| Box::new(app)),
    )?;
    Ok(())
}

fn load_config(path: &Path) -> Result<LifeConfig, ConfigError> {
    if path.exists() {
        LifeConfig::from_file(path)
    } else {
        info!(path = %path.display(), "No config file, using defaults");
        Ok(LifeConfig::default())
    }
}

/// Resizes to the dimensions in a share string. A bad pair keeps the
/// configured size.
fn apply_shared_size(engine: &mut GridEngine, shared: &str) {
    let Some((width, height)) = query::dimensions(shared) else {
        warn!(query = shared, "Share string has no width and height, ignoring it");
        return;
    };
    match engine.resize_from_input(width, height) {
        Ok(grid) => info!(dims = %grid.dimensions(), "Grid size taken from share string"),
        Err(error) => warn!(%error, "Ignoring shared grid size"),
    }
}

pub struct GameOfLife {
    // Declared before the runtime so the ticker stops before the runtime goes away.
    controller: SimulationController,
    _runtime: tokio::runtime::Runtime,

    width_input: String,
    height_input: String,
    share: String,
    message: Option<String>,
    live_color: Color32,
    dead_color: Color32,
}

impl GameOfLife {
    pub fn new(controller: SimulationController, runtime: tokio::runtime::Runtime) -> Self {
        let dims = controller.engine().dimensions();
        Self {
            controller,
            _runtime: runtime,
            width_input: dims.width().to_string(),
            height_input: dims.height().to_string(),
            share: query::encode(dims),
            message: None,
            live_color: Color32::BLACK,
            dead_color: Color32::WHITE,
        }
    }

    /// Applies the width/height fields. On rejection the fields snap back
    /// to the current size and the reason is shown.
    pub fn resize_from_inputs(&mut self) {
        match self.controller.resize(&self.width_input, &self.height_input) {
            Ok(dims) => {
                self.share = query::encode(dims);
                self.message = None;
                info!(share = %self.share, "Grid resized");
            }
            Err(error) => {
                warn!(%error, "Resize rejected");
                let dims = self.controller.engine().dimensions();
                self.reset_inputs(dims);
                self.message = Some(error.to_string());
            }
        }
    }

    pub fn clear(&mut self) {
        let result = self.controller.clear();
        self.report(result);
    }

    pub fn step(&mut self) {
        let result = self.controller.step().map(|_| ());
        self.report(result);
    }

    pub fn toggle_cell(&mut self, x: usize, y: usize) {
        let result = self.controller.toggle_cell(x, y).map(|_| ());
        self.report(result);
    }

    fn reset_inputs(&mut self, dims: Dimensions) {
        self.width_input = dims.width().to_string();
        self.height_input = dims.height().to_string();
    }

    fn report(&mut self, result: Result<(), EngineError>) {
        match result {
            Ok(()) => self.message = None,
            Err(error) => {
                warn!(%error, "Action refused");
                self.message = Some(error.to_string());
            }
        }
    }
}
