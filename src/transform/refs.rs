//! Asset reference scanning.
//!
//! Recognizes two reference forms, restricted to a set of extensions:
//! - attribute style: `src="a.jpg"`, `href='../img/b.png'`, `xlink:href="c.svg"`
//! - style sheet `url()`: `url(a.jpg)`, `url("../b.png")`, `url('c.gif')`
//!
//! References are reduced to a lowercase lookup key by [`reference_key`].

use std::collections::BTreeSet;

use regex::Regex;

/// Compiled reference patterns for one extension set.
#[derive(Debug, Clone)]
pub struct ReferenceScanner {
    attribute: Regex,
    url: Regex,
}

impl ReferenceScanner {
    /// Build a scanner matching references ending in one of `extensions`.
    pub fn new(extensions: &[impl AsRef<str>]) -> Result<Self, regex::Error> {
        let ext = extensions
            .iter()
            .map(|e| regex::escape(e.as_ref().trim_start_matches('.')))
            .collect::<Vec<_>>()
            .join("|");

        // An optional query string or fragment may follow the extension
        let attribute = Regex::new(&format!(
            r#"(?i)[\w:-]+\s*=\s*(?:"([^"?#]+?\.(?:{ext})(?:[?#][^"]*)?)"|'([^'?#]+?\.(?:{ext})(?:[?#][^']*)?)')"#
        ))?;
        let url = Regex::new(&format!(
            r#"(?i)url\(\s*["']?([^"')?#]+?\.(?:{ext})(?:[?#][^"')]*)?)["']?\s*\)"#
        ))?;

        Ok(Self { attribute, url })
    }

    /// Raw reference strings found in `text`, in document order.
    pub fn references<'t>(&self, text: &'t str) -> Vec<&'t str> {
        let attrs = self
            .attribute
            .captures_iter(text)
            .filter_map(|c| c.get(1).or_else(|| c.get(2)));
        let urls = self.url.captures_iter(text).filter_map(|c| c.get(1));
        attrs.chain(urls).map(|m| m.as_str().trim()).collect()
    }

    /// Lookup keys of all references in `text`.
    pub fn keys(&self, text: &str) -> BTreeSet<String> {
        self.references(text)
            .into_iter()
            .filter_map(reference_key)
            .collect()
    }
}

/// Reduce a reference to its lowercase lookup key.
///
/// - external (`http:`, `data:`, ...) references yield `None`
/// - query strings and fragments are dropped
/// - a leading `/` or `./` is dropped
/// - any reference with a `..` segment is reduced to its base name
///
/// The base-name reduction does not resolve paths against the referencing
/// document, so same-named files in different directories collide.
pub fn reference_key(reference: &str) -> Option<String> {
    let reference = reference.split(['?', '#']).next().unwrap_or_default().trim();
    if reference.is_empty() || has_scheme(reference) {
        return None;
    }

    let reference = reference
        .trim_start_matches('/')
        .trim_start_matches("./");

    let key = if reference.split('/').any(|segment| segment == "..") {
        reference.rsplit('/').next().unwrap_or(reference)
    } else {
        reference
    };

    (!key.is_empty()).then(|| key.to_lowercase())
}

/// Check if a reference has a URL scheme (`http:`, `data:`, `mailto:`, ...)
fn has_scheme(reference: &str) -> bool {
    reference.split_once(':').is_some_and(|(scheme, _)| {
        !scheme.is_empty()
            && scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scanner() -> ReferenceScanner {
        ReferenceScanner::new(&["jpg", "jpeg", "png", "gif"]).unwrap()
    }

    #[test]
    fn test_attribute_references() {
        let text = r#"<img src="a.jpg"/><image xlink:href='../img/B.PNG'/><a href="ch.xhtml">"#;
        assert_eq!(scanner().references(text), vec!["a.jpg", "../img/B.PNG"]);
    }

    #[test]
    fn test_url_references() {
        let text = r#"body { background: url(../b.png) } .x { background: url( "c.gif" ) }"#;
        assert_eq!(scanner().references(text), vec!["../b.png", "c.gif"]);

        let text = r#".y { background: url(d.png#frag) } .z { background: url('e.jpg?v=3') }"#;
        assert_eq!(scanner().references(text), vec!["d.png#frag", "e.jpg?v=3"]);
    }

    #[test]
    fn test_keys_normalized() {
        let text = r#"<img src="../../Photos/Cover.JPG"><img src="/a.jpg"><img src="./b.png?v=2">"#;
        let keys = scanner().keys(text);
        assert_eq!(
            keys.into_iter().collect::<Vec<_>>(),
            vec!["a.jpg", "b.png", "cover.jpg"]
        );
    }

    #[test]
    fn test_query_and_fragment_references() {
        let text = r#"<img src="a.jpg?v=2"/><img src='b.png#x'/><img src="c.gif?x.png"/>"#;
        assert_eq!(
            scanner().keys(text).into_iter().collect::<Vec<_>>(),
            vec!["a.jpg", "b.png", "c.gif"]
        );
        // The extension must end the path, not the query
        assert!(scanner().references(r#"<a href="page.xhtml?img=a.jpg">"#).is_empty());
    }

    #[test]
    fn test_reference_key_rules() {
        assert_eq!(reference_key("a.jpg").as_deref(), Some("a.jpg"));
        assert_eq!(reference_key("images/A.jpg").as_deref(), Some("images/a.jpg"));
        assert_eq!(reference_key("../x/y/z.png").as_deref(), Some("z.png"));
        assert_eq!(reference_key("img/../z.png").as_deref(), Some("z.png"));
        assert_eq!(reference_key("https://example.com/a.jpg"), None);
        assert_eq!(reference_key("data:image/png;base64,AAAA.png"), None);
        assert_eq!(reference_key("#frag"), None);
    }

    #[test]
    fn test_unlisted_extensions_ignored() {
        let text = r#"<img src="a.webp"><link href="style.css"/>"#;
        assert!(scanner().references(text).is_empty());
    }
}
