//! Prefix completion over saved URLs and common header names.

use crate::constants::COMMON_HTTP_HEADERS;
use crate::storage::UrlStore;

/// Source of completion candidates for one kind of prompt.
pub trait CompletionProvider {
    /// Every candidate matching `prefix`, in suggestion order.
    fn matches(&self, prefix: &str) -> Vec<String>;

    /// The `index`-th match for `prefix`, or `None` once the matches run out.
    ///
    /// Each call recomputes the candidates. Use [`Completion`] to keep one
    /// snapshot across a burst of lookups.
    fn suggest(&self, prefix: &str, index: usize) -> Option<String> {
        self.matches(prefix).into_iter().nth(index)
    }
}

/// Matches of a single completion gesture, fixed when the gesture starts.
#[derive(Clone, Debug, Default)]
pub struct Completion {
    candidates: Vec<String>,
}

impl Completion {
    pub fn start(provider: &dyn CompletionProvider, prefix: &str) -> Self {
        Completion {
            candidates: provider.matches(prefix),
        }
    }

    pub fn suggest(&self, index: usize) -> Option<&str> {
        self.candidates.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn into_candidates(self) -> Vec<String> {
        self.candidates
    }
}

/// Completes against URLs in the history file, case-sensitively.
///
/// The file is re-read on every lookup so suggestions follow the latest save.
#[derive(Clone, Debug)]
pub struct UrlCompleter {
    store: UrlStore,
}

impl UrlCompleter {
    pub fn new(store: UrlStore) -> Self {
        UrlCompleter { store }
    }
}

impl CompletionProvider for UrlCompleter {
    fn matches(&self, prefix: &str) -> Vec<String> {
        self.store
            .urls()
            .into_iter()
            .filter(|url| url.starts_with(prefix))
            .collect()
    }
}

/// Completes against a fixed list of header names, ignoring case.
#[derive(Clone, Debug)]
pub struct HeaderCompleter {
    headers: &'static [&'static str],
}

impl HeaderCompleter {
    pub fn new(headers: &'static [&'static str]) -> Self {
        HeaderCompleter { headers }
    }
}

impl Default for HeaderCompleter {
    fn default() -> Self {
        Self::new(COMMON_HTTP_HEADERS)
    }
}

impl CompletionProvider for HeaderCompleter {
    fn matches(&self, prefix: &str) -> Vec<String> {
        let prefix = prefix.to_lowercase();
        self.headers
            .iter()
            .filter(|h| h.to_lowercase().starts_with(&prefix))
            .map(|h| h.to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_header_prefix_ignores_case() {
        let headers = HeaderCompleter::default();
        assert_eq!(headers.suggest("auth", 0).as_deref(), Some("Authorization"));
        assert_eq!(headers.suggest("auth", 1), None);
        assert_eq!(headers.suggest("AUTH", 0).as_deref(), Some("Authorization"));
    }

    #[test]
    fn test_header_x_prefix_in_list_order() {
        let completion = Completion::start(&HeaderCompleter::default(), "x-");
        assert_eq!(
            completion.clone().into_candidates(),
            vec![
                "X-Requested-With",
                "X-Forwarded-For",
                "X-Forwarded-Host",
                "X-Forwarded-Proto",
                "X-Real-IP",
                "X-CSRF-Token",
                "X-API-Key",
            ]
        );
        assert_eq!(completion.suggest(7), None);
    }

    #[test]
    fn test_empty_prefix_matches_everything() {
        let headers = HeaderCompleter::default();
        assert_eq!(headers.matches("").len(), COMMON_HTTP_HEADERS.len());
    }

    #[test]
    fn test_url_prefix_is_case_sensitive() {
        let dir = TempDir::new().unwrap();
        let store = UrlStore::new(dir.path().join("urls.json"));
        let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        store.record_use_on("https://api.example.com/a", day).unwrap();
        store.record_use_on("https://API.example.com/b", day).unwrap();
        store.record_use_on("http://plain.example.com", day).unwrap();

        let urls = UrlCompleter::new(store);
        assert_eq!(urls.matches("https://api"), vec!["https://api.example.com/a"]);
        assert_eq!(urls.matches("https://").len(), 2);
        assert_eq!(urls.suggest("ftp", 0), None);
    }

    #[test]
    fn test_snapshot_survives_store_changes() {
        let dir = TempDir::new().unwrap();
        let store = UrlStore::new(dir.path().join("urls.json"));
        store.record_use("https://one").unwrap();
        let urls = UrlCompleter::new(store.clone());

        let completion = Completion::start(&urls, "https://");
        store.record_use("https://two").unwrap();

        assert_eq!(completion.len(), 1);
        assert_eq!(completion.suggest(0), Some("https://one"));
        assert_eq!(completion.suggest(1), None);
        assert_eq!(urls.matches("https://").len(), 2);
    }
}
