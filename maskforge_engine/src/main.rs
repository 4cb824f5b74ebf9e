#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
//! ** Maskforge **
//! Deterministic command understanding for interactive fiction, with a
//! small demo world to walk through.

use maskforge_engine::loader::{build_engine, build_player, build_scenes, load_content};
use maskforge_engine::repl::{Session, run_repl};
use maskforge_engine::style::GameStyle;

use anyhow::{Context, Result};
use colored::Colorize;
use log::info;

fn main() -> Result<()> {
    env_logger::init();
    info!("Start: loading Maskforge content...");
    let content = load_content().context("while loading Maskforge content")?;
    info!("Maskforge content loaded successfully.");

    let engine = build_engine(&content).context("while assembling the parser engine")?;
    let scenes = build_scenes(&content);
    let player = build_player(&content);
    let start = content.player.start_scene.clone();

    println!("{:^72}", "MASKFORGE: THE SHAPING OF FACES".bright_yellow().underline());
    println!(
        "\n{}\n",
        "You carry unworn faces up the mountain. Speak, and the forge listens.".description_style()
    );

    info!("starting session at {start}");
    let mut session = Session::new(engine, scenes, player, start);
    run_repl(&mut session)
}
