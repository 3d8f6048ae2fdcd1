//! Turning registry metadata into a canonical repository URL.

use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use crate::registry::PackageMetadata;

/// Hosts whose URLs are accepted as repositories when they appear as a gem's homepage.
pub const REPOSITORY_HOSTS: &[&str] = &[
    "github.com",
    "gitlab.com",
    "bitbucket.org",
    "codeberg.org",
    "sourcehut.org",
];

// Everything from the first browsing sub-path to the end of the string, newlines included.
static SUB_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)/(?:tree|blob|commits|releases|issues|pull|tags|branches)/.*")
        .expect("sub-path pattern is valid")
});

/// A repository root URL without a browsing sub-path (`/tree/...`, `/blob/...`, ...) and without
/// a trailing slash.
///
/// Deserializing goes through [`RepositoryUrl::new`], so stored URLs are normalized too.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
#[serde(from = "String", into = "String")]
pub struct RepositoryUrl(String);

impl RepositoryUrl {
    /// Normalize `url` into a repository URL.
    pub fn new<S: AsRef<str>>(url: S) -> Self {
        Self(normalize(url.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for RepositoryUrl {
    fn from(url: String) -> Self {
        Self::new(url)
    }
}

impl From<RepositoryUrl> for String {
    fn from(url: RepositoryUrl) -> Self {
        url.0
    }
}

impl AsRef<str> for RepositoryUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RepositoryUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Strip a browsing sub-path and then a single trailing slash.
///
/// ```rust
/// use gem_clone::normalize;
///
/// assert_eq!(
///     normalize("https://github.com/rails/rails/tree/v8.0.2"),
///     "https://github.com/rails/rails"
/// );
/// assert_eq!(normalize("https://github.com/user/repo/"), "https://github.com/user/repo");
/// ```
pub fn normalize(url: &str) -> String {
    let stripped = match SUB_PATH.find(url) {
        Some(sub_path) => &url[..sub_path.start()],
        None => url,
    };
    stripped.strip_suffix('/').unwrap_or(stripped).to_string()
}

/// [`normalize`] lifted over an optional URL: `None` stays `None`.
pub fn normalize_option(url: Option<&str>) -> Option<String> {
    url.map(normalize)
}

/// Whether `url` points at one of the [`REPOSITORY_HOSTS`].
pub fn is_repository_url(url: &str) -> bool {
    !url.is_empty() && REPOSITORY_HOSTS.iter().any(|host| url.contains(host))
}

/// Pick the repository URL of a gem.
///
/// A non-empty `source_code_uri` always wins. Otherwise the `homepage_uri` is used if it is on a
/// known repository host.
pub fn resolve(metadata: &PackageMetadata) -> Option<RepositoryUrl> {
    if let Some(uri) = metadata.source_code_uri().filter(|uri| !uri.is_empty()) {
        debug!("Using source_code_uri {uri}");
        return Some(RepositoryUrl::new(uri));
    }
    match metadata.homepage_uri() {
        Some(uri) if is_repository_url(uri) => {
            debug!("Using homepage_uri {uri}");
            Some(RepositoryUrl::new(uri))
        }
        Some(uri) => {
            debug!("Ignoring homepage_uri {uri}: not a known repository host");
            None
        }
        None => None,
    }
}
