//! Choosing a backend and cloning with it.

use log::{debug, info};

use crate::backend::{BACKENDS, CloneBackend, Host};
use crate::error::Error;
use crate::resolve::RepositoryUrl;

/// What happened when a clone was dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloneOutcome {
    /// The backend ran and exited successfully.
    Succeeded(CloneBackend),
    /// The backend was selected but the clone failed. No other backend was tried.
    Failed(CloneBackend),
    /// None of the backends could be found.
    NoBackendAvailable,
}

impl CloneOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded(_))
    }

    /// The backend that cloned the repository, or the reason nothing was cloned.
    pub fn into_result(self) -> Result<CloneBackend, Error> {
        match self {
            Self::Succeeded(backend) => Ok(backend),
            Self::Failed(backend) => Err(Error::BackendInvocationFailed { backend }),
            Self::NoBackendAvailable => Err(Error::NoBackendAvailable),
        }
    }
}

/// The first of `backends` available on `host`.
pub fn select_backend<H: Host + ?Sized>(
    host: &H,
    backends: &[CloneBackend],
) -> Option<CloneBackend> {
    let mut unavailable = None;
    for &backend in backends {
        if host.is_available(backend.probe_name()) {
            if let Some(previous) = unavailable {
                info!("{previous} not found, falling back to {}", backend.fallback_label());
            }
            return Some(backend);
        }
        debug!("'{}' not found in PATH", backend.probe_name());
        unavailable = Some(backend);
    }
    None
}

/// Clone `url` with the preferred available backend.
pub fn dispatch<H: Host + ?Sized>(url: &RepositoryUrl, host: &H) -> CloneOutcome {
    dispatch_with(url, host, BACKENDS)
}

/// Clone `url` with the first available of `backends`.
///
/// Fallback only covers absence: once a backend is selected its result is final.
pub fn dispatch_with<H: Host + ?Sized>(
    url: &RepositoryUrl,
    host: &H,
    backends: &[CloneBackend],
) -> CloneOutcome {
    let Some(backend) = select_backend(host, backends) else {
        return CloneOutcome::NoBackendAvailable;
    };
    let invocation = backend.invocation(url);
    info!("Executing: {invocation}");
    match host.run(&invocation) {
        Ok(()) => CloneOutcome::Succeeded(backend),
        Err(err) => {
            debug!("{err}");
            CloneOutcome::Failed(backend)
        }
    }
}
