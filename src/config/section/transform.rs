//! `[transform]` section configuration.
//!
//! ```toml
//! [transform]
//! marker = "kdp-mode"   # class token added by the `inject-marker` pass
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    pub marker: String,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            marker: "kdp-mode".into(),
        }
    }
}

impl TransformConfig {
    pub const MARKER: FieldPath = FieldPath::new("transform.marker");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        let marker = &self.marker;
        if marker.is_empty() {
            diag.error(Self::MARKER, "must not be empty");
        } else if marker
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '"' | '\'' | '<' | '>'))
        {
            diag.error_with_hint(
                Self::MARKER,
                format!("`{marker}` is not a single class token"),
                "use letters, digits, `-` and `_` only",
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{ConfigDiagnostics, test_parse_config};

    #[test]
    fn test_marker_default_and_override() {
        assert_eq!(test_parse_config("").transform.marker, "kdp-mode");
        let config = test_parse_config("[transform]\nmarker = \"vendor-x\"");
        assert_eq!(config.transform.marker, "vendor-x");
    }

    #[test]
    fn test_marker_must_be_one_token() {
        for (marker, ok) in [("kdp-mode", true), ("", false), ("a b", false), ("x\\\"y", false)] {
            let config = test_parse_config(&format!("[transform]\nmarker = \"{marker}\""));
            let mut diag = ConfigDiagnostics::new();
            config.transform.validate(&mut diag);
            assert_eq!(diag.is_empty(), ok, "{marker:?}");
        }
    }
}
