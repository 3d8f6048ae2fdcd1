use std::process::ExitCode;

/// Categories of application errors that can be matched on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppErrorKind {
    /// Argument validation errors
    ArgValidation,
    /// The gem could not be looked up on the registry
    Lookup,
    /// The gem's metadata has no usable repository URL
    NoRepositoryUrl,
    /// None of the clone backends is installed
    NoBackend,
    /// The selected clone backend failed
    Clone,
    /// The logger could not be installed
    Logging,
}

/// Internal error type that contains all application error variants.
#[derive(Debug, thiserror::Error)]
pub enum AppErrorInner {
    #[error("Argument error: {0}")]
    ArgValidation(String),
    #[error(transparent)]
    GemClone(gem_clone::Error),
    #[error("failed to initialise logging")]
    Logging(#[source] log::SetLoggerError),
}

/// The main application-level error type. The kind decides the exit code; the inner error is
/// what the user sees.
///
/// This type uses the newtype pattern to wrap a boxed inner error, reducing stack size.
#[derive(Debug)]
pub struct AppError(Box<AppErrorInner>, AppErrorKind);

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl AppError {
    /// Create a new AppError with the given inner error and kind
    pub fn new(inner: AppErrorInner, kind: AppErrorKind) -> Self {
        Self(Box::new(inner), kind)
    }

    /// Get the error kind for pattern matching
    pub fn error_kind(&self) -> &AppErrorKind {
        &self.1
    }

    /// Create an argument validation error
    pub fn arg_validation(msg: String) -> Self {
        Self::new(AppErrorInner::ArgValidation(msg), AppErrorKind::ArgValidation)
    }

    /// Create a logging setup error
    pub fn logging(err: log::SetLoggerError) -> Self {
        Self::new(AppErrorInner::Logging(err), AppErrorKind::Logging)
    }
}

impl From<gem_clone::Error> for AppError {
    fn from(err: gem_clone::Error) -> Self {
        use gem_clone::Error::*;
        let kind = match &err {
            LookupFailed { .. } | HttpClient(_) => AppErrorKind::Lookup,
            NoRepositoryUrl { .. } => AppErrorKind::NoRepositoryUrl,
            NoBackendAvailable => AppErrorKind::NoBackend,
            BackendInvocationFailed { .. } => AppErrorKind::Clone,
            InvalidRegistryUrl { .. } => AppErrorKind::ArgValidation,
        };
        Self::new(AppErrorInner::GemClone(err), kind)
    }
}

impl From<AppError> for ExitCode {
    fn from(error: AppError) -> Self {
        ExitCode::from(match error.error_kind() {
            AppErrorKind::ArgValidation => 2,
            _ => 1,
        })
    }
}
