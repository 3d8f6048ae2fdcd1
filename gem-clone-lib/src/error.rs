use crate::backend::CloneBackend;

/// The main error enum for this crate.
///
/// Every variant ends a run: nothing here is retried.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The registry lookup failed. A missing gem, a network failure and a malformed response all
    /// collapse into this variant.
    #[error("Could not find gem '{package}'")]
    LookupFailed { package: String },

    /// The gem's metadata names neither a source code URI nor a repository-like homepage.
    #[error("Could not find repository URL for gem '{package}'")]
    NoRepositoryUrl { package: String },

    /// None of the clone backends was found on `PATH`.
    #[error(
        "None of 'git goget', 'ghq', or 'git' is available in your PATH. Please install one of them."
    )]
    NoBackendAvailable,

    /// The selected backend ran but did not exit successfully.
    #[error("Failed to clone repository with {backend}.")]
    BackendInvocationFailed { backend: CloneBackend },

    /// The registry base URL could not be used to build metadata URLs.
    #[error("invalid registry URL '{url}': {reason}")]
    InvalidRegistryUrl { url: String, reason: String },

    /// The HTTP client could not be constructed.
    #[error(transparent)]
    HttpClient(#[from] reqwest::Error),
}

/// Failure to run a backend's command line.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("failed to launch '{command}'")]
    Spawn {
        command: String,
        #[source]
        err: std::io::Error,
    },
    #[error("'{command}' exited with {}", describe_exit(.code))]
    Exited { command: String, code: Option<i32> },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "no status (terminated by signal)".to_string(),
    }
}
