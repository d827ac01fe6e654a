use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use std::path::Path;

use dirsnap::cli::{Cli, Commands, InitArgs, RunArgs};
use dirsnap::{colors, confirm_and_archive, dir_size, Config, ConsoleDialog, Dialog, DirectoryArchiver};

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let config_path = match cli.config {
        Some(path) => path,
        None => Config::default_path().context("Could not find home directory")?,
    };

    match cli.command {
        Commands::Run(args) => handle_run(&config_path, &args),
        Commands::Init(args) => handle_init(&config_path, &args),
        Commands::Show => handle_show(&config_path),
        Commands::List => handle_list(&config_path),
    }
}

fn handle_run(config_path: &Path, args: &RunArgs) -> Result<()> {
    Config::ensure_exists(config_path)?;
    let config = Config::load(config_path).context("Failed to load configuration")?;

    let dialog = ConsoleDialog;
    let archiver = match DirectoryArchiver::new(&config) {
        Ok(archiver) => archiver,
        Err(e) => {
            dialog.notify("Cannot start snapshot", &e.to_string(), true);
            std::process::exit(1);
        }
    };

    // Failures inside the run are already reported through the dialog.
    if confirm_and_archive(&archiver, &dialog, args.yes).is_err() {
        std::process::exit(1);
    }
    Ok(())
}

fn handle_init(config_path: &Path, args: &InitArgs) -> Result<()> {
    let mut config = Config::template(&args.source);
    if let Some(archive) = &args.archive {
        config.archive_directory = archive.clone();
    }

    Config::create_default(config_path, &config)
        .context("Failed to write default configuration")?;

    println!(
        "{} Wrote default config to {}",
        "✓".green(),
        config_path.display().to_string().color(colors::PATH)
    );
    println!(
        "   Source:  {}",
        config.source_directory.display().to_string().color(colors::PATH)
    );
    println!(
        "   Archive: {}",
        config.archive_directory.display().to_string().color(colors::PATH)
    );
    Ok(())
}

fn handle_show(config_path: &Path) -> Result<()> {
    Config::ensure_exists(config_path)?;
    let config = Config::load(config_path).context("Failed to load configuration")?;
    config.display();
    Ok(())
}

fn handle_list(config_path: &Path) -> Result<()> {
    Config::ensure_exists(config_path)?;
    let config = Config::load(config_path).context("Failed to load configuration")?;
    let archiver = DirectoryArchiver::new(&config)?;

    let snapshots = archiver.list_snapshots()?;
    if snapshots.is_empty() {
        println!("No snapshots found in {}", archiver.archive_dir().display());
        return Ok(());
    }

    println!(
        "{} snapshot{} in {}",
        snapshots.len(),
        if snapshots.len() == 1 { "" } else { "s" },
        archiver.archive_dir().display().to_string().color(colors::PATH)
    );
    for (path, stamp) in snapshots {
        let size_mb = dir_size(&path)? as f64 / (1024.0 * 1024.0);
        println!(
            "   {} ({:.1} MB)",
            stamp.format("%Y-%m-%d %H:%M:%S").to_string().color(colors::SUCCESS),
            size_mb
        );
    }
    Ok(())
}
