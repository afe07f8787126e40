//! Configuration section definitions.
//!
//! Each module corresponds to a section in `bindery.toml`:
//!
//! | Module      | TOML Section     | Purpose                               |
//! |-------------|------------------|---------------------------------------|
//! | `assets`    | `[assets]`       | Image inventory, exemptions, relocation |
//! | `book`      | `[book]`         | Title used in archive names           |
//! | `output`    | `[output]`       | Archive destinations                  |
//! | `package`   | `[package]`      | Package tree layout, exclusions       |
//! | `transform` | `[transform]`    | Vendor marker token                   |
//! | `validator` | `[validator]`    | External structural validator         |
//! | `variant`   | `[[variants]]`   | Named builds and their passes         |

mod assets;
mod book;
mod output;
mod package;
mod transform;
mod validator;
mod variant;

pub use assets::AssetsConfig;
pub use book::BookConfig;
pub use output::OutputConfig;
pub use package::PackageConfig;
pub use transform::TransformConfig;
pub use validator::ValidatorConfig;
pub use variant::{VariantConfig, default_variants, validate_variants};
