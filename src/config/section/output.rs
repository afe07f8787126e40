//! `[output]` section configuration.
//!
//! ```toml
//! [output]
//! locations = [".", "dist"]   # every archive is copied into each
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directories receiving the built archives. Resolved against the
    /// project root on load.
    pub locations: Vec<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            locations: vec![".".into(), "dist".into()],
        }
    }
}

impl OutputConfig {
    pub const LOCATIONS: FieldPath = FieldPath::new("output.locations");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.locations.is_empty() {
            diag.error_with_hint(
                Self::LOCATIONS,
                "at least one output location is required",
                "use `[\".\"]` to write next to bindery.toml",
            );
        }

        let mut seen = Vec::with_capacity(self.locations.len());
        for location in &self.locations {
            if seen.contains(&location) {
                diag.warn(
                    Self::LOCATIONS,
                    format!("`{}` listed more than once", location.display()),
                );
            }
            seen.push(location);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crate::config::{ConfigDiagnostics, test_parse_config};

    #[test]
    fn test_output_locations() {
        let config = test_parse_config("[output]\nlocations = [\"out\"]");
        assert_eq!(config.output.locations, vec![PathBuf::from("out")]);

        let config = test_parse_config("");
        assert_eq!(config.output.locations.len(), 2);
    }

    #[test]
    fn test_output_locations_validation() {
        let config = test_parse_config("[output]\nlocations = []");
        let mut diag = ConfigDiagnostics::new();
        config.output.validate(&mut diag);
        assert!(diag.has_errors());

        let config = test_parse_config("[output]\nlocations = [\"dist\", \"dist\"]");
        let mut diag = ConfigDiagnostics::new();
        config.output.validate(&mut diag);
        assert!(!diag.has_errors());
        assert_eq!(diag.warnings().len(), 1);
    }
}
