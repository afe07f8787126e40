//! `[validator]` section configuration.
//!
//! ```toml
//! [validator]
//! enable = true
//! command = ["java", "-jar"]             # program + leading arguments
//! jar = "epubcheck-5.2.1/epubcheck.jar"  # optional, appended if present
//! timeout = 60                           # seconds
//! ```
//!
//! The archive path is always the last argument. A missing program or jar
//! skips validation instead of failing the build.

use std::{path::PathBuf, time::Duration};

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::validator::Validator;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    pub enable: bool,
    pub command: Vec<String>,
    /// Resolved against the project root on load.
    pub jar: Option<PathBuf>,
    /// Seconds before the validator is killed.
    pub timeout: u64,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            enable: true,
            command: vec!["java".into(), "-jar".into()],
            jar: Some("epubcheck-5.2.1/epubcheck.jar".into()),
            timeout: 60,
        }
    }
}

impl ValidatorConfig {
    pub const COMMAND: FieldPath = FieldPath::new("validator.command");
    pub const TIMEOUT: FieldPath = FieldPath::new("validator.timeout");

    /// Build the validator, or `None` when disabled.
    pub fn validator(&self, workdir: &std::path::Path) -> Option<Validator> {
        if !self.enable {
            return None;
        }
        let validator = Validator::new(self.command.clone(), Duration::from_secs(self.timeout))
            .with_workdir(workdir);
        Some(match &self.jar {
            Some(jar) => validator.with_jar(jar),
            None => validator,
        })
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !self.enable {
            return;
        }
        if self.command.first().is_none_or(|p| p.trim().is_empty()) {
            diag.error_with_hint(
                Self::COMMAND,
                "must name a program",
                "set `enable = false` to skip validation",
            );
        }
        if self.timeout == 0 {
            diag.error(Self::TIMEOUT, "must be greater than 0");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use crate::config::{ConfigDiagnostics, test_parse_config};

    #[test]
    fn test_validator_defaults() {
        let config = test_parse_config("");
        assert!(config.validator.enable);
        assert_eq!(config.validator.command, vec!["java", "-jar"]);
        assert_eq!(config.validator.timeout, 60);
        assert!(config.validator.validator(Path::new(".")).is_some());
    }

    #[test]
    fn test_validator_disabled() {
        let config = test_parse_config("[validator]\nenable = false\ncommand = []");
        assert!(config.validator.validator(Path::new(".")).is_none());

        let mut diag = ConfigDiagnostics::new();
        config.validator.validate(&mut diag);
        assert!(diag.is_empty());
    }

    #[test]
    fn test_validator_rules() {
        let config = test_parse_config("[validator]\ncommand = []\ntimeout = 0");
        let mut diag = ConfigDiagnostics::new();
        config.validator.validate(&mut diag);
        assert_eq!(diag.len(), 2);
    }
}
