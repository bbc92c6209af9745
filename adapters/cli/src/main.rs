#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Trial of Sisyphus.

mod logging;
mod simulation;

use anyhow::{Context, Result};
use clap::Parser;
use sisyphus_core::WINDOW_TITLE;
use sisyphus_rendering::{palette, Presentation, RenderingBackend, Scene};
use sisyphus_rendering_macroquad::MacroquadBackend;
use sisyphus_world::query;

use simulation::Simulation;

/// Push the boulder up the hill by alternating two keys.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Seed for the background layouts; a random seed is used when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Render as fast as possible instead of waiting for the display refresh.
    #[arg(long)]
    no_vsync: bool,
    /// Log frame timing once per second.
    #[arg(long)]
    show_fps: bool,
    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

/// Entry point for the Sisyphus command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut simulation = Simulation::new(seed);
    log::info!(
        "world seed {seed:#018x}, first layout seed {:#018x}",
        query::layout_seed(simulation.world())
    );

    let mut scene = Scene::at_start(*query::hill(simulation.world()));
    simulation.populate_scene(&mut scene);
    let presentation = Presentation::new(WINDOW_TITLE, palette::BACKGROUND, scene);

    MacroquadBackend::new()
        .with_vsync(!args.no_vsync)
        .with_show_fps(args.show_fps)
        .run(presentation, move |dt, input, scene| {
            let _ = simulation.advance(dt, &input);
            simulation.populate_scene(scene);
        })
        .context("failed to run the macroquad backend")
}
