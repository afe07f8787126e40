//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Assemble EPUB packages from a source tree
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path, searched upward from the current directory
    #[arg(short = 'C', long, default_value = "bindery.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Build every configured variant (or the selected ones)
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// List used and unused images in the content directory
    #[command(visible_alias = "a")]
    Assets {
        /// Move unused images into the configured unused directory
        #[arg(short, long)]
        relocate: bool,
    },

    /// Remove the internal navigation block from markup documents in place
    #[command(visible_alias = "n")]
    StripNav {
        /// Files or directories (default: the content directory).
        /// Use `-` to read paths from stdin.
        #[arg(value_name = "PATH", value_hint = clap::ValueHint::AnyPath)]
        paths: Vec<PathBuf>,
    },

    /// Check the container structure of an existing archive
    #[command(visible_alias = "i")]
    Inspect {
        /// Archive to inspect
        #[arg(value_hint = clap::ValueHint::FilePath)]
        archive: PathBuf,
    },
}

/// Build command arguments.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct BuildArgs {
    /// Build only this variant (repeatable)
    #[arg(short = 'v', long = "variant", value_name = "NAME")]
    pub variants: Vec<String>,

    /// Skip the external validator
    #[arg(long)]
    pub no_validate: bool,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_build_with_variants() {
        let cli = Cli::try_parse_from([
            "bindery", "b", "-v", "kdp", "-v", "standard", "--no-validate", "-V",
        ])
        .unwrap();
        let Commands::Build { build_args } = cli.command else {
            panic!("expected build");
        };
        assert_eq!(build_args.variants, vec!["kdp", "standard"]);
        assert!(build_args.no_validate);
        assert!(build_args.verbose);
        assert_eq!(cli.config, PathBuf::from("bindery.toml"));
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["bindery", "assets", "--relocate", "--color", "never"])
            .unwrap();
        assert_eq!(cli.color, ColorChoice::Never);
        assert!(matches!(cli.command, Commands::Assets { relocate: true }));
    }

    #[test]
    fn test_parse_strip_nav_and_inspect() {
        let cli = Cli::try_parse_from(["bindery", "n", "OEBPS/ch1.xhtml", "-"]).unwrap();
        let Commands::StripNav { paths } = cli.command else {
            panic!("expected strip-nav");
        };
        assert_eq!(paths.len(), 2);

        let cli = Cli::try_parse_from(["bindery", "-C", "alt.toml", "i", "Book.epub"]).unwrap();
        assert!(matches!(cli.command, Commands::Inspect { .. }));
        assert_eq!(cli.config, PathBuf::from("alt.toml"));
    }

    #[test]
    fn test_inspect_requires_archive() {
        assert!(Cli::try_parse_from(["bindery", "inspect"]).is_err());
    }
}
