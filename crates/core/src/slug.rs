//! URL slug derivation for content titles.

use std::sync::LazyLock;

use regex::Regex;

static STRIP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9_\s-]").expect("static slug pattern"));

static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s-]+").expect("static separator pattern"));

/// Derive a URL slug from a title.
///
/// Lowercases, drops everything except ASCII word characters, whitespace and
/// hyphens, then collapses whitespace/hyphen runs into a single hyphen.
///
/// ```
/// use envoy_core::slug::slugify;
///
/// assert_eq!(slugify("Hello, World!  Test"), "hello-world-test");
/// assert_eq!(slugify("My Service"), "my-service");
/// ```
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    let stripped = STRIP.replace_all(&lowered, "");
    let joined = SEPARATORS.replace_all(stripped.trim(), "-");
    joined.trim_matches('-').to_string()
}

/// Build the navigation path a page slug is served under.
pub fn page_path(slug: &str) -> String {
    format!("/{slug}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_punctuation_and_collapses_whitespace() {
        assert_eq!(slugify("Hello, World!  Test"), "hello-world-test");
    }

    #[test]
    fn is_deterministic() {
        let a = slugify("Digital Marketing & SEO");
        let b = slugify("Digital Marketing & SEO");
        assert_eq!(a, b);
        assert_eq!(a, "digital-marketing-seo");
    }

    #[test]
    fn keeps_existing_hyphens_and_underscores() {
        assert_eq!(slugify("pre-launch  -- offer_2024"), "pre-launch-offer_2024");
    }

    #[test]
    fn trims_edge_separators() {
        assert_eq!(slugify("  -Welcome- "), "welcome");
    }

    #[test]
    fn non_ascii_letters_are_dropped() {
        assert_eq!(slugify("Café Über"), "caf-ber");
    }

    #[test]
    fn empty_title_yields_empty_slug() {
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn page_path_prefixes_slash() {
        assert_eq!(page_path("my-service"), "/my-service");
    }
}
