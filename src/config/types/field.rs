//! Config field path.

use owo_colors::OwoColorize;
use std::{borrow::Cow, fmt};

/// Dotted path of a config field, used to anchor diagnostics.
///
/// ```ignore
/// diag.error(FieldPath::new("book.title"), "must not be empty");
/// diag.error(FieldPath::indexed("variants", 1, "file"), "must end in .epub");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath(Cow<'static, str>);

impl FieldPath {
    #[inline]
    pub const fn new(path: &'static str) -> Self {
        Self(Cow::Borrowed(path))
    }

    /// Path into an array-of-tables entry, e.g. `variants[1].file`.
    pub fn indexed(array: &str, index: usize, field: &str) -> Self {
        Self(Cow::Owned(format!("{array}[{index}].{field}")))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_args!("`{}`", self.0).bright_blue())
    }
}

impl AsRef<str> for FieldPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_paths() {
        assert_eq!(FieldPath::new("book.title").as_str(), "book.title");
        assert_eq!(
            FieldPath::indexed("variants", 2, "name").as_str(),
            "variants[2].name"
        );
    }
}
