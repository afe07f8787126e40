//! Vendor-marker injection on the first `<body>` element.
//!
//! Rules, in priority order:
//! 1. marker already present as a whole class token (any class attribute,
//!    either quote style, case-insensitive) -> untouched
//! 2. double-quoted `class` -> marker prepended to the existing classes
//! 3. single-quoted `class` -> same, keeping single quotes
//! 4. no `class` -> `class="marker"` inserted right after `<body`
//!
//! Token matching is whole-token: `kdp-mode-x` does not contain `kdp-mode`.

use std::sync::LazyLock;

use regex::Regex;

use super::Rewrite;

/// Opening `<body>` tag. Group 1 = attribute text (empty or leading space).
static BODY_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<body((?:\s[^>]*)?)>").unwrap());

/// `class` attribute. Group 1 = double-quoted value, 2 = single-quoted value.
static CLASS_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(?:^|\s)class\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap()
});

/// Check whether a class attribute value holds `token` as a whole class name.
pub fn has_class_token(value: &str, token: &str) -> bool {
    value
        .split_ascii_whitespace()
        .any(|class| class.eq_ignore_ascii_case(token))
}

/// Ensure the first `<body>` element carries `marker` in its class list.
///
/// `count` is 1 when the document changed, 0 otherwise.
pub fn inject_marker<'a>(text: &'a str, marker: &str) -> Rewrite<'a> {
    let Some(caps) = BODY_OPEN.captures(text) else {
        return Rewrite::unchanged(text);
    };
    let (Some(tag), Some(attrs)) = (caps.get(0), caps.get(1)) else {
        return Rewrite::unchanged(text);
    };

    let Some(new_attrs) = mark_attributes(attrs.as_str(), marker) else {
        return Rewrite::unchanged(text);
    };

    let mut out = String::with_capacity(text.len() + marker.len() + 10);
    out.push_str(&text[..tag.start()]);
    out.push_str("<body");
    out.push_str(&new_attrs);
    out.push('>');
    out.push_str(&text[tag.end()..]);
    Rewrite::changed(out, 1)
}

/// Compute the new attribute text of a body tag, or `None` if already marked.
fn mark_attributes(attrs: &str, marker: &str) -> Option<String> {
    let classes: Vec<_> = CLASS_ATTR.captures_iter(attrs).collect();

    let already_marked = classes.iter().any(|c| {
        c.get(1)
            .or_else(|| c.get(2))
            .is_some_and(|v| has_class_token(v.as_str(), marker))
    });
    if already_marked {
        return None;
    }

    let double = classes.iter().find_map(|c| c.get(1).map(|v| (c, v, '"')));
    let single = || classes.iter().find_map(|c| c.get(2).map(|v| (c, v, '\'')));

    if let Some((caps, value, quote)) = double.or_else(single) {
        let whole = caps.get(0)?;
        let existing = value.as_str().trim();
        let classes = if existing.is_empty() {
            marker.to_string()
        } else {
            format!("{marker} {existing}")
        };
        // The match may begin with the whitespace that separated it
        let lead = &whole.as_str()[..whole.as_str().len() - whole.as_str().trim_start().len()];
        return Some(format!(
            "{}{lead}class={quote}{classes}{quote}{}",
            &attrs[..whole.start()],
            &attrs[whole.end()..]
        ));
    }

    let sep = if attrs.is_empty() || attrs.starts_with(char::is_whitespace) {
        ""
    } else {
        " "
    };
    Some(format!(" class=\"{marker}\"{sep}{attrs}"))
}
