//! Command-line interface module.

mod args;
pub mod assets;
pub mod build;
pub mod common;
pub mod inspect;
pub mod strip_nav;

pub use args::{BuildArgs, Cli, Commands};
