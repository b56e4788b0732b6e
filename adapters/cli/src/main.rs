#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Castle Run experience.

mod simulation;

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result};
use castle_run_core::Tuning;
use castle_run_rendering::{palette, Presentation, RenderingBackend};
use castle_run_rendering_macroquad::MacroquadBackend;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use self::simulation::Simulation;

/// Side-scrolling platformer: run right, collect coins, stomp enemies and reach the castle.
#[derive(Debug, Parser)]
#[command(name = "castle-run", version)]
struct CliArgs {
    /// TOML file overriding individual gameplay tuning values.
    #[arg(long, value_name = "FILE")]
    tuning: Option<PathBuf>,
    /// Seed for enemy patrol directions. Random when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Frame rate cap; 0 disables the cap.
    #[arg(long, default_value_t = 60)]
    target_fps: u32,
    /// How long the end screen stays up, in milliseconds.
    #[arg(long, default_value_t = 2_000)]
    end_screen_ms: u64,
    /// Longest frame time fed to the simulation, in milliseconds.
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u64).range(1..))]
    max_frame_ms: u64,
    /// Synchronise presentation with the display refresh rate. Without it the
    /// swap interval is zero and only `--target-fps` paces frames.
    #[arg(long)]
    vsync: bool,
    /// Log frame timing once per second.
    #[arg(long)]
    show_fps: bool,
}

/// Entry point for the Castle Run command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let args = CliArgs::parse();
    let tuning = load_tuning(args.tuning.as_deref())?;
    let seed = args.seed.unwrap_or_else(rand::random);
    tracing::info!(seed, "starting session");

    let mut simulation = Simulation::new(
        tuning,
        seed,
        Duration::from_millis(args.max_frame_ms),
    );
    println!("{}", simulation.welcome_banner());

    let scene = simulation.scene()?;
    let presentation = Presentation::new("Castle Run", palette::SKY, scene);
    let backend = MacroquadBackend::new()
        .with_vsync(args.vsync)
        .with_show_fps(args.show_fps)
        .with_target_fps(Some(args.target_fps))
        .with_end_screen_hold(Duration::from_millis(args.end_screen_ms));

    backend.run(presentation, move |dt, input, scene| {
        simulation.step(dt, input);
        simulation.populate_scene(scene);
    })
}

fn load_tuning(path: Option<&Path>) -> Result<Tuning> {
    let Some(path) = path else {
        return Ok(Tuning::default());
    };

    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read tuning file {}", path.display()))?;
    parse_tuning(&text).with_context(|| format!("invalid tuning file {}", path.display()))
}

fn parse_tuning(text: &str) -> Result<Tuning> {
    let tuning: Tuning = toml::from_str(text).context("failed to parse tuning")?;
    tuning.validate()?;
    Ok(tuning)
}
