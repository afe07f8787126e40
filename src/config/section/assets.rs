//! `[assets]` section configuration.
//!
//! ```toml
//! [assets]
//! exempt = ["cover.jpg"]          # always used (referenced from metadata only)
//! unused_dir = "unused_images"    # relocation target under the content dir
//! image_extensions = ["jpg", "jpeg", "png", "gif", "svg", "webp"]
//! ```

use std::path::{Component, Path};

use serde::{Deserialize, Serialize};

use crate::asset::AssetResolver;
use crate::config::{ConfigDiagnostics, FieldPath};
use crate::transform::paths::IMAGE_EXTENSIONS;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    pub exempt: Vec<String>,
    pub unused_dir: String,
    pub image_extensions: Vec<String>,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            exempt: vec!["cover.jpg".into()],
            unused_dir: "unused_images".into(),
            image_extensions: IMAGE_EXTENSIONS.iter().map(|e| (*e).to_string()).collect(),
        }
    }
}

impl AssetsConfig {
    pub const UNUSED_DIR: FieldPath = FieldPath::new("assets.unused_dir");
    pub const IMAGE_EXTENSIONS: FieldPath = FieldPath::new("assets.image_extensions");

    pub fn resolver(&self) -> Result<AssetResolver, regex::Error> {
        AssetResolver::new(
            self.image_extensions.as_slice(),
            self.exempt.as_slice(),
            &self.unused_dir,
        )
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        let mut components = Path::new(&self.unused_dir).components();
        let single = matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        );
        if !single {
            diag.error_with_hint(
                Self::UNUSED_DIR,
                format!("`{}` is not a single directory name", self.unused_dir),
                "the directory is created directly under the content directory",
            );
        }

        if self.image_extensions.iter().all(|e| e.trim().is_empty()) {
            diag.error(Self::IMAGE_EXTENSIONS, "must list at least one extension");
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{ConfigDiagnostics, test_parse_config};

    #[test]
    fn test_assets_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.assets.exempt, vec!["cover.jpg"]);
        assert_eq!(config.assets.unused_dir, "unused_images");
        assert!(config.assets.image_extensions.iter().any(|e| e == "png"));
        assert!(config.assets.resolver().is_ok());
    }

    #[test]
    fn test_unused_dir_single_segment() {
        for (dir, ok) in [("unused", true), ("a/b", false), ("..", false), ("", false)] {
            let config = test_parse_config(&format!("[assets]\nunused_dir = \"{dir}\""));
            let mut diag = ConfigDiagnostics::new();
            config.assets.validate(&mut diag);
            assert_eq!(diag.is_empty(), ok, "{dir:?}");
        }
    }
}
