//! An executable for imposing scalar wave initial data on a uniform curvilinear grid.

use clap::{Command, arg, value_parser};
use console::style;
use datasize::DataSize;
use eyre::{Context as _, eyre};
use indicatif::{HumanBytes, HumanCount, HumanDuration, ProgressBar};
use sfcollapse::prelude::*;
use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

mod config;
mod misc;

use config::*;

fn run(config: &Config) -> eyre::Result<()> {
    let start = Instant::now();

    eyre::ensure!(
        config.evolve.cfl > 0.0,
        "CFL factor must be positive, found {}",
        config.evolve.cfl
    );
    eyre::ensure!(
        config.evolve.wavespeed > 0.0,
        "wavespeed must be positive, found {}",
        config.evolve.wavespeed
    );

    let absolute = config.directory()?;
    let chart = config.grid.chart;
    let grid = config.grid.build().context("Invalid grid settings")?;
    let initial = config
        .initial
        .build()
        .context("Failed to build initial data")?;

    log::info!(
        "{} grid with {:?} cells and {} ghost points, bounds {:?} to {:?}",
        chart.name(),
        grid.cells(),
        grid.ghost(),
        grid.bounds().aa(),
        grid.bounds().bb()
    );
    log::info!("Coordinate spacing {:?}", grid.spacing());

    // Allocate and fill grid functions.
    let mut store = GridFunctionStore::<ScalarWave>::from_grid(&grid);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(misc::spinner_style());
    spinner.set_prefix("[Impose]");
    spinner.set_message(format!(
        "{} on {} points",
        initial.name(),
        HumanCount(grid.num_points() as u64)
    ));
    spinner.enable_steady_tick(Duration::from_millis(100));

    impose_exact_solution(&grid, &chart, &initial, 0.0, &mut store);

    spinner.finish_and_clear();

    // Timestep consuming the line-element factors.
    let dt = find_timestep(&grid, &chart, config.evolve.cfl, config.evolve.wavespeed);
    eyre::ensure!(
        dt > 0.0 && dt.is_finite(),
        "grid yields a degenerate timestep {dt:e}"
    );

    // Check the imposed data against the exact solution.
    let norms = error_norms(&grid, &chart, &initial, 0.0, &store);
    for norm in &norms {
        log::debug!(
            "{} error: l2 {:.5e}, max {:.5e}",
            norm.field.name(),
            norm.l2,
            norm.max
        );
    }
    eyre::ensure!(
        norms.iter().all(|norm| norm.max == 0.0),
        "imposed data does not reproduce the exact solution"
    );

    // Write checkpoint
    std::fs::create_dir_all(&absolute)?;
    let path = absolute.join(format!("{}.ron", config.name));

    let checkpoint =
        Checkpoint::new(config.name.clone(), 0.0, grid, chart, store).with_initial(initial);
    checkpoint
        .export_ron(&path)
        .with_context(|| format!("Failed to write checkpoint {}", path.display()))?;

    println!("Finished imposing in {}", HumanDuration(start.elapsed()));
    println!("Grid Info...");
    println!("- Chart: {}", chart.name());
    println!("- Points: {}", HumanCount(checkpoint.grid.num_points() as u64));
    println!("- Timestep: {dt:.5e}");
    println!("Field Info...");
    println!(
        "- RAM usage: ~{}",
        HumanBytes(checkpoint.estimate_heap_size() as u64)
    );
    println!("Checkpoint: {}", style(path.display()).green());

    Ok(())
}

fn main() -> eyre::Result<()> {
    // Set up nice colored error handing.
    color_eyre::install()?;
    // Load configuration
    let matches = Command::new("sfinit")
        .about("A program for imposing scalar wave initial data on a curvilinear grid.")
        .author("Lukas Mesicek, lukas.m.mesicek@gmail.com")
        .version(clap::crate_version!())
        .arg(
            arg!(-c --config <FILE> "Sets a custom config file")
                .required(true)
                .value_parser(value_parser!(PathBuf)),
        )
        .get_matches();

    // Compute config path.
    let config_path = matches
        .get_one::<PathBuf>("config")
        .cloned()
        .ok_or_else(|| eyre!("failed to specify config argument"))?;
    let config_path = misc::abs_or_relative(&config_path)?;

    // Parse config file from toml.
    let config =
        misc::import_from_toml::<Config>(&config_path).context("Failed to parse config file")?;

    // Build environment logger.
    env_logger::builder()
        .filter_level(config.logging.filter())
        .init();

    println!("Simulation: {}", style(&config.name).green());
    println!(
        "Output Directory: {}",
        style(config.directory()?.display()).green()
    );
    println!("Initial Data...");
    config.initial.println();

    run(&config)
}
