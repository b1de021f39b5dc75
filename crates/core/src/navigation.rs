//! Compiled-in site navigation, served when no navigation rows exist.

/// `(label, path)` pairs in display order.
pub const DEFAULT_NAVIGATION: &[(&str, &str)] = &[
    ("Home", "/"),
    ("Services", "/services"),
    ("About", "/about"),
    ("References", "/references"),
    ("Blog", "/blog"),
    ("Contact", "/contact"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_paths_are_unique_and_rooted() {
        let mut paths: Vec<_> = DEFAULT_NAVIGATION.iter().map(|(_, p)| *p).collect();
        assert!(paths.iter().all(|p| p.starts_with('/')));
        paths.sort_unstable();
        paths.dedup();
        assert_eq!(paths.len(), DEFAULT_NAVIGATION.len());
    }
}
