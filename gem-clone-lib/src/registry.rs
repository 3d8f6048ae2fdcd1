//! Looking up gem metadata on the registry.

use log::{debug, info};
use url::Url;

use crate::error::Error;
use crate::resolve::{self, RepositoryUrl};

/// The registry queried unless told otherwise.
pub const DEFAULT_REGISTRY: &str = "https://rubygems.org";

const USER_AGENT: &str = concat!("gem-clone/", env!("CARGO_PKG_VERSION"));

/// The JSON object the registry returns for a gem.
///
/// Only `source_code_uri` and `homepage_uri` are interpreted; everything else is carried as-is.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(transparent)]
pub struct PackageMetadata(serde_json::Map<String, serde_json::Value>);

impl PackageMetadata {
    /// Parse a registry response body. Anything but a JSON object is an error.
    pub fn from_json<S: AsRef<str>>(body: S) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body.as_ref())
    }

    /// The `source_code_uri` field, if it holds a string.
    pub fn source_code_uri(&self) -> Option<&str> {
        self.string_field("source_code_uri")
    }

    /// The `homepage_uri` field, if it holds a string.
    pub fn homepage_uri(&self) -> Option<&str> {
        self.string_field("homepage_uri")
    }

    fn string_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(serde_json::Value::as_str)
    }
}

// Reasons a lookup can fail. These never leave this module: callers only see `LookupFailed`.
#[derive(Debug, thiserror::Error)]
enum LookupError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// A gem registry exposing `/api/v1/gems/<name>.json`.
#[derive(Debug, Clone)]
pub struct Registry {
    base: Url,
    client: reqwest::blocking::Client,
}

impl Registry {
    /// Create a registry client rooted at `base_url`, e.g. [`DEFAULT_REGISTRY`].
    pub fn new<S: AsRef<str>>(base_url: S) -> Result<Self, Error> {
        let base_url = base_url.as_ref();
        let base = Url::parse(base_url).map_err(|err| Error::InvalidRegistryUrl {
            url: base_url.to_string(),
            reason: err.to_string(),
        })?;
        if base.cannot_be_a_base() {
            return Err(Error::InvalidRegistryUrl {
                url: base_url.to_string(),
                reason: "URL cannot have path segments".to_string(),
            });
        }
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { base, client })
    }

    /// The registry this client talks to.
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// The metadata endpoint for `package`.
    pub fn metadata_url(&self, package: &str) -> Url {
        let mut url = self.base.clone();
        let file_name = format!("{package}.json");
        // Can't fail: `new` rejects cannot-be-a-base URLs.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["api", "v1", "gems", file_name.as_str()]);
        }
        url
    }

    /// Fetch the metadata of `package` with a single GET.
    ///
    /// A non-200 status, a body that isn't a JSON object, and any transport error all give
    /// [`Error::LookupFailed`]. The underlying cause is only logged.
    pub fn fetch(&self, package: &str) -> Result<PackageMetadata, Error> {
        let url = self.metadata_url(package);
        let lookup_failed = || Error::LookupFailed {
            package: package.to_string(),
        };
        match self.request(url) {
            Ok(Some(metadata)) => Ok(metadata),
            Ok(None) => Err(lookup_failed()),
            Err(err) => {
                info!("Error fetching gem info: {err}");
                Err(lookup_failed())
            }
        }
    }

    /// Fetch the metadata of `package` and resolve its canonical repository URL.
    pub fn repository_url(&self, package: &str) -> Result<RepositoryUrl, Error> {
        let metadata = self.fetch(package)?;
        resolve::resolve(&metadata).ok_or_else(|| Error::NoRepositoryUrl {
            package: package.to_string(),
        })
    }

    fn request(&self, url: Url) -> Result<Option<PackageMetadata>, LookupError> {
        debug!("Sending request to {url}");
        let response = self.client.get(url).send()?;
        let status = response.status();
        debug!("Received response ({status})");
        if status != reqwest::StatusCode::OK {
            return Ok(None);
        }
        let body = response.text()?;
        Ok(Some(PackageMetadata::from_json(body)?))
    }
}
