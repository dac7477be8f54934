//! Path filter deciding which source files count toward the gate.
//!
//! Matching is a plain string prefix test: no globbing, no separator
//! normalization. A path is included when it starts with at least one
//! include prefix and with none of the exclude prefixes.

/// Source directories whose coverage is gated by default.
pub const DEFAULT_INCLUDE_PREFIXES: &[&str] = &[
    "src/core/",
    "src/bridge/",
    "src/satellite/",
    "src/oracle/",
    "src/risk/",
    "src/finance/",
];

/// Paths carved out of the included directories by default.
pub const DEFAULT_EXCLUDE_PREFIXES: &[&str] = &[
    "src/examples/",
    "src/faucet/",
    "src/tokens/",
    "src/Counter.sol",
    "src/bridge/via/",
    "script/",
    "test/",
    "lib/",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathFilter {
    include: Vec<String>,
    exclude: Vec<String>,
}

impl PathFilter {
    pub fn new<I, E>(include: I, exclude: E) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
        E: IntoIterator,
        E::Item: Into<String>,
    {
        Self {
            include: include.into_iter().map(Into::into).collect(),
            exclude: exclude.into_iter().map(Into::into).collect(),
        }
    }

    pub fn include_prefixes(&self) -> &[String] {
        &self.include
    }

    pub fn exclude_prefixes(&self) -> &[String] {
        &self.exclude
    }

    /// Whether `path` should contribute to the rollup.
    #[must_use]
    pub fn include(&self, path: &str) -> bool {
        self.include.iter().any(|p| path.starts_with(p.as_str()))
            && !self.exclude.iter().any(|p| path.starts_with(p.as_str()))
    }
}

impl Default for PathFilter {
    fn default() -> Self {
        Self::new(
            DEFAULT_INCLUDE_PREFIXES.iter().copied(),
            DEFAULT_EXCLUDE_PREFIXES.iter().copied(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_includes_core_sources() {
        let filter = PathFilter::default();
        assert!(filter.include("src/core/Vault.sol"));
        assert!(filter.include("src/finance/Ledger.sol"));
        assert!(filter.include("src/bridge/Relay.sol"));
    }

    #[test]
    fn test_default_rejects_unlisted_directories() {
        let filter = PathFilter::default();
        assert!(!filter.include("src/examples/Demo.sol"));
        assert!(!filter.include("src/Counter.sol"));
        assert!(!filter.include("script/Deploy.s.sol"));
        assert!(!filter.include("src/other/Thing.sol"));
    }

    #[test]
    fn test_exclude_carves_out_subpath() {
        let filter = PathFilter::default();
        assert!(!filter.include("src/bridge/via/Adapter.sol"));
        assert!(filter.include("src/bridge/viaduct.sol"));
    }

    #[test]
    fn test_exact_prefix_only() {
        let filter = PathFilter::default();
        // No separator normalization or leading-slash stripping.
        assert!(!filter.include("/src/core/Vault.sol"));
        assert!(!filter.include("src\\core\\Vault.sol"));
        assert!(!filter.include("./src/core/Vault.sol"));
    }

    #[test]
    fn test_total_over_odd_input() {
        let filter = PathFilter::default();
        assert!(!filter.include(""));
        assert!(!filter.include("src/"));
        assert!(!filter.include("\u{0}src/core/"));
    }

    #[test]
    fn test_empty_include_set_rejects_everything() {
        let filter = PathFilter::new(Vec::<String>::new(), Vec::<String>::new());
        assert!(!filter.include("src/core/Vault.sol"));
        assert!(!filter.include(""));
    }

    #[test]
    fn test_empty_prefix_matches_everything() {
        let filter = PathFilter::new([""], ["test/"]);
        assert!(filter.include(""));
        assert!(filter.include("anything"));
        assert!(!filter.include("test/Foo.t.sol"));
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn prefix() -> impl Strategy<Value = String> {
            "[ab/]{0,4}"
        }

        proptest! {
            #[test]
            fn prop_include_matches_definition(
                include in proptest::collection::vec(prefix(), 0..5),
                exclude in proptest::collection::vec(prefix(), 0..5),
                path in "[ab/]{0,8}",
            ) {
                let filter = PathFilter::new(include.clone(), exclude.clone());
                let expected = include.iter().any(|p| path.starts_with(p.as_str()))
                    && exclude.iter().all(|p| !path.starts_with(p.as_str()));
                prop_assert_eq!(filter.include(&path), expected);
            }

            #[test]
            fn prop_prefix_order_is_irrelevant(
                include in proptest::collection::vec(prefix(), 0..5),
                exclude in proptest::collection::vec(prefix(), 0..5),
                path in "[ab/]{0,8}",
            ) {
                let forward = PathFilter::new(include.clone(), exclude.clone());
                let reversed = PathFilter::new(
                    include.into_iter().rev(),
                    exclude.into_iter().rev(),
                );
                prop_assert_eq!(forward.include(&path), reversed.include(&path));
            }
        }
    }
}
