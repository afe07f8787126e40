//! Utility modules shared by the packaging pipeline.
//!
//! | Module | Purpose                                            |
//! |--------|----------------------------------------------------|
//! | `exec` | External commands with captured output and timeout |
//! | `fmt`  | Pluralization and size formatting for log output   |
//! | `fs`   | Sorted tree walking, tree cloning, atomic publish  |
//! | `path` | Path normalization and archive member naming       |

pub mod exec;
pub mod fmt;
pub mod fs;
pub mod path;

pub use fmt::{format_mb, plural_count, plural_s};
