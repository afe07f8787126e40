//! Absolute-to-relative reference normalization.
//!
//! Rewrites `src="/cover.jpg"` / `href="/chapter.xhtml"` to the
//! root-relative form (`src="cover.jpg"`). Only the leading `/` is removed;
//! `/images/a.jpg` becomes `images/a.jpg`. Protocol-relative references
//! (`//host/x.js`) and already-relative references are left alone.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::Rewrite;

/// Image extensions recognized in references.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "svg", "webp"];
/// Style sheet extensions.
pub const STYLE_EXTENSIONS: &[&str] = &["css"];
/// Script extensions.
pub const SCRIPT_EXTENSIONS: &[&str] = &["js"];

/// Every extension class eligible for normalization.
fn eligible_extensions() -> Vec<&'static str> {
    IMAGE_EXTENSIONS
        .iter()
        .chain(STYLE_EXTENSIONS)
        .chain(SCRIPT_EXTENSIONS)
        .chain(super::MARKUP_EXTENSIONS)
        .copied()
        .collect()
}

/// `src` / `href` attribute with a single-`/`-prefixed value.
///
/// Groups: 1 = attribute name, 2 = `=` with surrounding space,
/// 3 = double-quoted path, 4 = single-quoted path.
static ABSOLUTE_REF: LazyLock<Regex> = LazyLock::new(|| {
    let ext = eligible_extensions().join("|");
    let pattern = format!(
        r#"(?i)\b(src|href)(\s*=\s*)(?:"/([^"/][^"]*\.(?:{ext}))"|'/([^'/][^']*\.(?:{ext}))')"#
    );
    Regex::new(&pattern).expect("absolute reference pattern is valid")
});

/// Strip the leading `/` from absolute asset and document references.
pub fn normalize_paths(text: &str) -> Rewrite<'_> {
    let mut count = 0;
    let out = ABSOLUTE_REF.replace_all(text, |caps: &Captures<'_>| {
        count += 1;
        let attr = &caps[1];
        let eq = &caps[2];
        match (caps.get(3), caps.get(4)) {
            (Some(path), _) => format!("{attr}{eq}\"{}\"", path.as_str()),
            (None, Some(path)) => format!("{attr}{eq}'{}'", path.as_str()),
            (None, None) => caps[0].to_string(),
        }
    });

    if count == 0 {
        Rewrite::unchanged(text)
    } else {
        Rewrite::changed(out.into_owned(), count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_strips_leading_slash_from_images() {
        let r = normalize_paths(r#"<img src="/cover.jpg" alt=""/>"#);
        assert_eq!(r.text, r#"<img src="cover.jpg" alt=""/>"#);
        assert_eq!(r.count, 1);
    }

    #[test]
    fn test_preserves_quote_style_and_spacing() {
        let r = normalize_paths("<img SRC = '/a.PNG'>");
        assert_eq!(r.text, "<img SRC = 'a.PNG'>");
    }

    #[test]
    fn test_markup_style_and_script_refs() {
        let text = concat!(
            r#"<a href="/ch2.xhtml">next</a>"#,
            r#"<link href="/style.css" rel="stylesheet"/>"#,
            r#"<script src="/app.js"></script>"#,
        );
        let r = normalize_paths(text);
        assert_eq!(r.count, 3);
        assert_eq!(
            r.text,
            concat!(
                r#"<a href="ch2.xhtml">next</a>"#,
                r#"<link href="style.css" rel="stylesheet"/>"#,
                r#"<script src="app.js"></script>"#,
            )
        );
    }

    #[test]
    fn test_multi_segment_only_loses_leading_slash() {
        let r = normalize_paths(r#"<img src="/images/deep/a.jpg">"#);
        assert_eq!(r.text, r#"<img src="images/deep/a.jpg">"#);
    }

    #[test]
    fn test_relative_and_foreign_refs_untouched() {
        for text in [
            r#"<img src="a.jpg">"#,
            r#"<img src="../a.jpg">"#,
            r#"<script src="//cdn.example.com/x.js"></script>"#,
            r#"<a href="/about">about</a>"#,
            r#"<a href="/notes.txt">notes</a>"#,
            r#"<img data="/a.jpg">"#,
        ] {
            let r = normalize_paths(text);
            assert!(!r.is_changed(), "unexpected rewrite of {text}");
            assert_eq!(r.text, text);
        }
    }

    #[test]
    fn test_idempotent_on_sample() {
        let text = r#"<img src="/a.jpg"><a href='/b.html'>b</a>"#;
        let once = normalize_paths(text).text.into_owned();
        let twice = normalize_paths(&once);
        assert!(!twice.is_changed());
        assert_eq!(twice.text, once);
    }

    proptest! {
        #[test]
        fn prop_normalize_paths_is_idempotent(
            name in "[a-z0-9_/-]{0,12}",
            ext in prop::sample::select(vec!["jpg", "png", "css", "js", "xhtml", "txt"]),
            attr in prop::sample::select(vec!["src", "href", "SRC", "data-src"]),
            slashes in 0usize..3,
            quote in prop::sample::select(vec!['"', '\'']),
        ) {
            let value = format!("{}{}.{}", "/".repeat(slashes), name, ext);
            let text = format!("<p><x {attr}={quote}{value}{quote}/></p>");
            let once = normalize_paths(&text).text.into_owned();
            let twice = normalize_paths(&once);
            prop_assert!(!twice.is_changed());
            prop_assert_eq!(twice.text.as_ref(), once.as_str());
        }
    }
}
