//! trussview CLI - inspect joint/frame models
//!
//! Loads a model description the way the viewer does and reports what was
//! built: joints, frames, skipped frames, and the scene layout.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use trussview::{CoordinatePolicy, FileSource, LoadReport, Viewer, ViewerConfig, ViewerError};

#[derive(Parser)]
#[command(name = "trussview")]
#[command(about = "Inspect joint/frame structural models", long_about = None)]
struct Cli {
    /// Log every joint and frame mutation
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Free a joint's position when the joint is removed
    #[arg(long, global = true)]
    reclaim: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show joint and frame counts for a model
    Info {
        /// Model description (.json)
        model: PathBuf,
    },
    /// List every frame with its derived geometry
    Frames {
        /// Model description (.json)
        model: PathBuf,
    },
    /// Print the scene layout as JSON
    Scene {
        /// Model description (.json)
        model: PathBuf,
        /// Viewer configuration (.json preset file or .toml)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Load a model and fail if anything was skipped
    Check {
        /// Model description (.json)
        model: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "trussview=debug" } else { "trussview=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let policy = if cli.reclaim {
        CoordinatePolicy::Reclaim
    } else {
        CoordinatePolicy::Retain
    };

    match cli.command {
        Commands::Info { model } => {
            let (viewer, report) = open(&model, ViewerConfig::default(), policy)?;
            show_info(&model, &viewer, &report);
        }
        Commands::Frames { model } => {
            let (viewer, _) = open(&model, ViewerConfig::default(), policy)?;
            show_frames(&viewer);
        }
        Commands::Scene { model, config } => {
            let config = match config {
                Some(path) => ViewerConfig::load(&path)
                    .with_context(|| format!("loading config {}", path.display()))?,
                None => ViewerConfig::default(),
            };
            let (viewer, _) = open(&model, config, policy)?;
            println!("{}", serde_json::to_string_pretty(&viewer.layout())?);
        }
        Commands::Check { model } => {
            check_model(&model, policy)?;
        }
    }

    Ok(())
}

fn open(
    model: &Path,
    config: ViewerConfig,
    policy: CoordinatePolicy,
) -> Result<(Viewer, LoadReport)> {
    let mut viewer = Viewer::with_policy(config, policy);
    let report = viewer
        .reload(&FileSource::new(model))
        .with_context(|| format!("loading model {}", model.display()))?;
    Ok((viewer, report))
}

fn show_info(path: &Path, viewer: &Viewer, report: &LoadReport) {
    let graph = viewer.graph();
    println!("File: {}", path.display());
    println!("Joints: {}", graph.joints().len());
    println!("Frames: {}", graph.frames().len());

    let skipped: Vec<_> = report.skipped_frames().collect();
    if !skipped.is_empty() {
        println!("\nSkipped frames:");
        for (name, reason) in skipped {
            println!("  {name}: {reason}");
        }
    }
}

fn show_frames(viewer: &Viewer) {
    for frame in viewer.graph().frames() {
        let (roll, pitch, yaw) = frame.orientation.euler_angles();
        print!(
            "{:<16} {:>8} -> {:<8} length {:>10.4}  ",
            frame.name,
            frame.from,
            frame.to,
            frame.length,
        );
        println!(
            "anchor ({:.4}, {:.4}, {:.4})  rotation ({:.2}, {:.2}, {:.2}) deg",
            frame.anchor.x,
            frame.anchor.y,
            frame.anchor.z,
            roll.to_degrees(),
            pitch.to_degrees(),
            yaw.to_degrees(),
        );
    }
}

fn check_model(model: &Path, policy: CoordinatePolicy) -> Result<()> {
    let mut viewer = Viewer::with_policy(ViewerConfig::default(), policy);
    let report = match viewer.reload(&FileSource::new(model)) {
        Ok(report) => report,
        Err(ViewerError::Load(err)) => {
            eprintln!("{err}");
            eprintln!(
                "model left partially loaded: {} joints, {} frames",
                viewer.graph().joints().len(),
                viewer.graph().frames().len()
            );
            anyhow::bail!("{} failed to load", model.display());
        }
        Err(err) => return Err(err).with_context(|| format!("loading model {}", model.display())),
    };

    let skipped = report.skipped_frames().count();
    if skipped > 0 {
        for (name, reason) in report.skipped_frames() {
            eprintln!("{name}: {reason}");
        }
        anyhow::bail!("{skipped} frame(s) skipped in {}", model.display());
    }

    println!(
        "{}: ok ({} joints, {} frames)",
        model.display(),
        viewer.graph().joints().len(),
        viewer.graph().frames().len()
    );
    Ok(())
}
