//! Project configuration management for `bindery.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # One module per TOML section
//! ├── types/         # ConfigError, diagnostics, field paths
//! ├── util.rs        # Config file discovery
//! └── mod.rs         # ProjectConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section         | Purpose                                          |
//! |-----------------|--------------------------------------------------|
//! | `[book]`        | Title used in archive file names                 |
//! | `[package]`     | Package tree location, layout and exclusions     |
//! | `[transform]`   | Vendor marker token                              |
//! | `[assets]`      | Image inventory, exemptions, relocation target   |
//! | `[output]`      | Directories every archive is copied into         |
//! | `[validator]`   | External structural validator                    |
//! | `[[variants]]`  | Named builds and the passes each one runs        |
//!
//! A missing config file is not an error: defaults apply, rooted at the
//! current directory.

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

pub use section::{
    AssetsConfig, BookConfig, OutputConfig, PackageConfig, TransformConfig, ValidatorConfig,
    VariantConfig, default_variants, validate_variants,
};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};

use crate::{
    archive::Exclusions,
    cli::{BuildArgs, Cli, Commands},
    debug, log,
    utils::path::{normalize_path, resolve_path},
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing bindery.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Absolute path to the config file, whether or not it exists (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    pub book: BookConfig,
    pub package: PackageConfig,
    pub transform: TransformConfig,
    pub assets: AssetsConfig,
    pub output: OutputConfig,
    pub validator: ValidatorConfig,
    pub variants: Vec<VariantConfig>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            config_path: PathBuf::new(),
            root: PathBuf::new(),
            book: BookConfig::default(),
            package: PackageConfig::default(),
            transform: TransformConfig::default(),
            assets: AssetsConfig::default(),
            output: OutputConfig::default(),
            validator: ValidatorConfig::default(),
            variants: default_variants(),
        }
    }
}

impl ProjectConfig {
    /// Load configuration for a CLI invocation.
    ///
    /// Searches upward from cwd for the config file. The project root is the
    /// config file's parent directory, or cwd when no file is found.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let mut config = match find_config_file(&cwd, &cli.config) {
            Some(path) => {
                debug!("config"; "using {}", path.display());
                let mut config = Self::from_path(&path)?;
                config.config_path = path;
                config
            }
            None => {
                debug!("config"; "{} not found, using defaults", cli.config.display());
                Self {
                    config_path: cwd.join(&cli.config),
                    ..Self::default()
                }
            }
        };

        let root = config
            .config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or(cwd);
        config.resolve_paths(&root);
        config.apply_command_options(cli);
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        &self.root
    }

    /// Get path relative to the project root
    pub fn root_relative(&self, path: impl AsRef<Path>) -> PathBuf {
        path.as_ref()
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.as_ref().to_path_buf())
    }

    /// Archive exclusions, always including the unused-image directory.
    pub fn exclusions(&self) -> Exclusions {
        let mut exclusions = self.package.exclusions();
        if !exclusions.dirs.contains(&self.assets.unused_dir) {
            exclusions.dirs.push(self.assets.unused_dir.clone());
        }
        exclusions
    }

    /// Look up a variant by name.
    pub fn variant(&self, name: &str) -> Option<&VariantConfig> {
        self.variants.iter().find(|v| v.name == name)
    }

    /// Pick the variants named in `names`, in config order. Empty selects all.
    pub fn select_variants(&self, names: &[String]) -> Result<Vec<&VariantConfig>> {
        if let Some(unknown) = names.iter().find(|n| self.variant(n).is_none()) {
            let available: Vec<_> = self.variants.iter().map(|v| v.name.as_str()).collect();
            anyhow::bail!(
                "unknown variant `{unknown}` (available: {})",
                available.join(", ")
            );
        }

        Ok(self
            .variants
            .iter()
            .filter(|v| names.is_empty() || names.contains(&v.name))
            .collect())
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply command-specific configuration options.
    fn apply_command_options(&mut self, cli: &Cli) {
        match &cli.command {
            Commands::Build { build_args } => self.apply_build_args(build_args),
            Commands::Assets { .. } | Commands::StripNav { .. } | Commands::Inspect { .. } => {}
        }
    }

    /// Apply build arguments from CLI.
    fn apply_build_args(&mut self, args: &BuildArgs) {
        crate::logger::set_verbose(args.verbose);
        if args.no_validate {
            self.validator.enable = false;
        }
    }

    // ========================================================================
    // path normalization
    // ========================================================================

    /// Resolve every configured path against `root`.
    pub fn resolve_paths(&mut self, root: &Path) {
        let root = normalize_path(root);
        let resolve = |p: &Path| resolve_path(p, &root);

        self.config_path = normalize_path(&self.config_path);
        self.package.source = resolve(&self.package.source);
        self.output.locations = self.output.locations.iter().map(|p| resolve(p)).collect();
        if let Some(jar) = self.validator.jar.take() {
            self.validator.jar = Some(resolve(&jar));
        }
        self.root = root;
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut diag = ConfigDiagnostics::new();

        self.book.validate(&mut diag);
        self.package.validate(&mut diag);
        self.transform.validate(&mut diag);
        self.assets.validate(&mut diag);
        self.output.validate(&mut diag);
        self.validator.validate(&mut diag);
        validate_variants(&self.variants, &self.book.title, &mut diag);

        diag.print_warnings();
        diag.into_result().map_err(ConfigError::Diagnostics)
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config from a TOML snippet.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(extra: &str) -> ProjectConfig {
    let (parsed, ignored) = ProjectConfig::parse_with_ignored(extra).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================
