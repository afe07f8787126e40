//! Removal of the in-document navigation block.
//!
//! Preview builds append a `<nav class="navigation">` element followed by an
//! inline `<script type="text/javascript">` driving it. Packaged books use the
//! reading system's navigation instead, so both are stripped together. After
//! a removal, whitespace before `</body>` collapses to a single newline.

use std::{ops::Range, sync::LazyLock};

use regex::Regex;

use super::Rewrite;

/// Opening tag of the navigation element.
static NAV_OPEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<nav\s+class\s*=\s*["']navigation["'][^>]*>"#).unwrap()
});

static NAV_CLOSE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)</nav\s*>").unwrap());

/// Inline script starting right at the beginning of the haystack.
static LEADING_SCRIPT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?is)\A\s*<script\s+type\s*=\s*["']text/javascript["'][^>]*>.*?</script\s*>"#,
    )
    .unwrap()
});

/// Whitespace run before the closing body tag.
static BODY_CLOSE_WS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+(</body\s*>)").unwrap());

/// Byte ranges of every navigation block, including the whitespace before it.
///
/// A block is a navigation element closed by its first `</nav>` and followed
/// by nothing but whitespace before the script. A navigation element with no
/// script right after it is left alone.
fn navigation_blocks(text: &str) -> Vec<Range<usize>> {
    let mut blocks = Vec::new();
    let mut pos = 0;

    while let Some(open) = NAV_OPEN.find_at(text, pos) {
        let Some(close) = NAV_CLOSE.find_at(text, open.end()) else {
            break;
        };
        match LEADING_SCRIPT.find(&text[close.end()..]) {
            Some(script) => {
                let start = text[..open.start()].trim_end().len();
                let end = close.end() + script.end();
                blocks.push(start..end);
                pos = end;
            }
            None => pos = close.end(),
        }
    }

    blocks
}

/// Strip every navigation block. `count` is the number of blocks removed.
pub fn strip_navigation(text: &str) -> Rewrite<'_> {
    let blocks = navigation_blocks(text);
    if blocks.is_empty() {
        return Rewrite::unchanged(text);
    }

    let mut stripped = String::with_capacity(text.len());
    let mut last = 0;
    for block in &blocks {
        stripped.push_str(&text[last..block.start]);
        last = block.end;
    }
    stripped.push_str(&text[last..]);

    let collapsed = BODY_CLOSE_WS.replace_all(&stripped, "\n$1");
    Rewrite::changed(collapsed.into_owned(), blocks.len())
}
