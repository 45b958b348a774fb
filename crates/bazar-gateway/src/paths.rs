//! Public path matching for the auth gate.

/// Paths the gate lets through without a credential.
///
/// A request path is public when it starts with a configured entry
/// (case-sensitive prefix) or equals one ignoring ASCII case.
#[derive(Debug, Clone)]
pub struct PublicPathSet {
    paths: Vec<String>,
}

/// Paths open by default: registration, login, the public catalog,
/// health probes, and the API document.
pub const DEFAULT_PUBLIC_PATHS: &[&str] = &[
    "/api/member/register",
    "/api/member/login",
    "/public",
    "/health",
    "/openapi.json",
];

impl Default for PublicPathSet {
    fn default() -> Self {
        Self::new(DEFAULT_PUBLIC_PATHS.iter().map(|p| p.to_string()))
    }
}

impl PublicPathSet {
    pub fn new(paths: impl IntoIterator<Item = String>) -> Self {
        Self {
            paths: paths.into_iter().collect(),
        }
    }

    /// Parse a comma-separated override list. Entries are trimmed and
    /// empty entries dropped, so a trailing comma is harmless.
    pub fn from_csv(csv: &str) -> Self {
        Self::new(
            csv.split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string),
        )
    }

    pub fn matches(&self, path: &str) -> bool {
        self.paths
            .iter()
            .any(|p| path.starts_with(p.as_str()) || path.eq_ignore_ascii_case(p))
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_match_is_case_sensitive() {
        let set = PublicPathSet::new(vec!["/public".to_string()]);
        assert!(set.matches("/public/products"));
        assert!(!set.matches("/Public/products"));
    }

    #[test]
    fn exact_match_ignores_case() {
        let set = PublicPathSet::new(vec!["/health".to_string()]);
        assert!(set.matches("/HEALTH"));
        assert!(set.matches("/Health"));
    }

    #[test]
    fn unlisted_path_does_not_match() {
        let set = PublicPathSet::default();
        assert!(!set.matches("/api/cart"));
        assert!(!set.matches("/api/member/profile"));
    }

    #[test]
    fn empty_set_matches_nothing() {
        let set = PublicPathSet::new(Vec::new());
        assert!(set.is_empty());
        assert!(!set.matches("/health"));
    }

    #[test]
    fn csv_parsing_trims_and_drops_empty_entries() {
        let set = PublicPathSet::from_csv(" /a , /b ,, ");
        assert!(set.matches("/a"));
        assert!(set.matches("/b/nested"));
        assert!(!set.matches("/c"));
    }

    #[test]
    fn defaults_cover_login_and_register() {
        let set = PublicPathSet::default();
        assert!(set.matches("/api/member/register"));
        assert!(set.matches("/api/member/login"));
        assert!(set.matches("/public/products/PRD-100001"));
        assert!(set.matches("/health/liveness"));
        assert!(set.matches("/openapi.json"));
    }
}
