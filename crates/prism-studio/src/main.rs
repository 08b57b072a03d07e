use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};

use prism_engine::logging::{init_logging, LoggingConfig};

mod exercises;

/// Interactive graphics exercises on wgpu.
#[derive(Parser)]
#[command(name = "prism-studio")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Interactive graphics exercises")]
struct Cli {
    /// Log filter in env_logger syntax (overrides RUST_LOG)
    #[arg(long, value_name = "FILTER")]
    log: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Four colored quadrants in a square region
    Quadrants,

    /// Move a rectangle with the arrow keys
    Rect,

    /// Drag a circle, then a segment, and show their intersections
    Intersect,

    /// Textured square pyramid with drag rotation and wheel zoom
    Pyramid {
        /// PNG or JPEG image for the pyramid faces; without it the faces are
        /// plain blue
        #[arg(long, value_name = "IMAGE")]
        texture: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(LoggingConfig {
        env_filter: cli.log.clone(),
        ..Default::default()
    });

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err:#}");
            eprintln!("prism-studio: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> anyhow::Result<()> {
    let name = command.name();
    log::info!("starting exercise: {name}");

    let result = match command {
        Commands::Quadrants => exercises::quadrants::run(Default::default()),
        Commands::Rect => exercises::rect::run(Default::default()),
        Commands::Intersect => exercises::intersect::run(Default::default()),
        Commands::Pyramid { texture } => exercises::pyramid::run(exercises::pyramid::PyramidConfig {
            texture_path: texture,
            ..Default::default()
        }),
    };

    result.with_context(|| format!("{name} exercise"))
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Quadrants => "quadrants",
            Commands::Rect => "rect",
            Commands::Intersect => "intersect",
            Commands::Pyramid { .. } => "pyramid",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_pyramid_texture() {
        let cli = Cli::try_parse_from(["prism-studio", "--log", "debug", "pyramid", "--texture", "a.png"])
            .unwrap();
        assert_eq!(cli.log.as_deref(), Some("debug"));
        match cli.command {
            Commands::Pyramid { texture } => assert_eq!(texture, Some(PathBuf::from("a.png"))),
            _ => panic!("expected pyramid"),
        }
    }

    #[test]
    fn cli_pyramid_texture_is_optional() {
        let cli = Cli::try_parse_from(["prism-studio", "pyramid"]).unwrap();
        match cli.command {
            Commands::Pyramid { texture } => assert_eq!(texture, None),
            _ => panic!("expected pyramid"),
        }
    }

    #[test]
    fn cli_requires_an_exercise() {
        assert!(Cli::try_parse_from(["prism-studio"]).is_err());
    }
}
