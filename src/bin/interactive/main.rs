use clap::Parser;
use macroquad::prelude::Conf;
use vertical_throw::core::config::{LaunchArgs, PlaybackArgs};

mod actions;
mod app;
mod constants;
mod controls;
mod hud;
mod render;
mod state;

/// Interactive vertical throw: scene, velocity chart and height chart on one time cursor.
#[derive(Parser, Debug)]
#[command(name = "interactive", version)]
struct Cli {
    #[command(flatten)]
    launch: LaunchArgs,

    #[command(flatten)]
    playback: PlaybackArgs,
}

fn window_conf() -> Conf {
    app::window_conf()
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();
    let cli = Cli::parse();
    app::run(cli.launch, cli.playback).await;
}
