use std::error::Error;

use clap::Parser;
use vertical_throw::core::config::{LaunchArgs, SnapshotArgs};
use vertical_throw::core::export::export_all;
use vertical_throw::core::playback::Playback;
use vertical_throw::core::solution::solution_steps;

/// Vertical throw under constant gravity: milestones, readouts and SVG snapshots.
#[derive(Parser, Debug)]
#[command(name = "vertical_throw", version)]
struct Cli {
    #[command(flatten)]
    launch: LaunchArgs,

    #[command(flatten)]
    snapshot: SnapshotArgs,
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let resolved = cli.launch.resolve();
    for err in &resolved.rejected {
        eprintln!("Warning: {err}; default used.");
    }

    let mut playback = Playback::new(resolved.params);
    let params = playback.params();
    let milestones = *playback.milestones();

    println!(
        "v0 = {:.2} m/s | y0 = {:.2} m | g = {:.2} m/s^2",
        params.initial_velocity_mps, params.initial_height_m, params.gravity_mps2
    );
    println!("\nTime to apex:    {:.4} s", milestones.time_to_apex_s);
    println!("Apex height:     {:.4} m", milestones.apex_height_m);
    println!("Time to impact:  {:.4} s", milestones.time_to_impact_s);
    println!("Impact velocity: {:.4} m/s", milestones.impact_velocity_mps);

    println!();
    for (i, step) in solution_steps(params, &milestones).iter().enumerate() {
        println!("{}. {}: {}", i + 1, step.title, step.working);
    }

    if let Some(at) = cli.snapshot.at {
        playback.scrub(at);
        let readouts = playback.readouts();
        println!(
            "\nAt t = {} -> v = {} | y = {} | a = {}",
            readouts.time, readouts.velocity, readouts.height, readouts.acceleration
        );
    }

    if let Some(dir) = cli.snapshot.export.as_deref() {
        let files = export_all(&playback, dir)?;
        println!("\nWrote {}", files.scene.display());
        println!("Wrote {}", files.velocity_chart.display());
        println!("Wrote {}", files.height_chart.display());
    }

    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
