//! Bindery - assembles EPUB packages from a prepared source tree.

mod archive;
mod asset;
mod build;
mod cli;
mod config;
mod logger;
mod transform;
mod utils;
mod validator;

use std::process::ExitCode;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::ProjectConfig;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    // Inspecting an archive needs no project
    if let Commands::Inspect { archive } = &cli.command {
        cli::inspect::inspect(archive)?;
        return Ok(ExitCode::SUCCESS);
    }

    let config = ProjectConfig::load(&cli)?;

    match &cli.command {
        Commands::Build { build_args } => {
            let all_built = cli::build::build(build_args, &config)?;
            Ok(if all_built {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Commands::Assets { relocate } => {
            cli::assets::assets(*relocate, &config)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::StripNav { paths } => {
            cli::strip_nav::strip_nav(paths, &config)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Inspect { .. } => Ok(ExitCode::SUCCESS),
    }
}
