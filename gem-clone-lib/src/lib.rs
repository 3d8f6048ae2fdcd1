//! Find the source repository of a gem and clone it.
//!
//! The lookup goes through the RubyGems.org metadata API (`/api/v1/gems/<name>.json`). The
//! repository URL is taken from the gem's `source_code_uri`, or from its `homepage_uri` when that
//! points at a known code host, and is normalized to the repository root:
//!
//! ```rust
//! use gem_clone::normalize;
//!
//! assert_eq!(
//!     normalize("https://github.com/user/repo/blob/main/README.md"),
//!     "https://github.com/user/repo"
//! );
//! ```
//!
//! # Cloning
//!
//! Cloning is delegated to the first of these tools found on `PATH`:
//!
//! 1. `git goget <url>` (when `git-goget` is installed)
//! 2. `ghq get <url>`
//! 3. `git clone <url>`
//!
//! Only absence triggers a fallback. If the chosen tool fails, nothing else is tried.
//!
//! ```rust,no_run
//! use gem_clone::{Registry, System, DEFAULT_REGISTRY};
//!
//! let registry = Registry::new(DEFAULT_REGISTRY)?;
//! let url = registry.repository_url("sinatra")?;
//! let backend = gem_clone::dispatch(&url, &System).into_result()?;
//! println!("cloned {url} with {backend}");
//! # Ok::<(), gem_clone::Error>(())
//! ```
//!
//! Everything is synchronous: the HTTP request and the child processes block the caller.

pub mod backend;
pub mod dispatch;
mod error;
pub mod registry;
pub mod resolve;

#[doc(inline)]
pub use crate::backend::{BACKENDS, CloneBackend, Host, Invocation, System};
#[doc(inline)]
pub use crate::dispatch::{CloneOutcome, dispatch, dispatch_with, select_backend};
#[doc(inline)]
pub use crate::error::{Error, RunError};
#[doc(inline)]
pub use crate::registry::{DEFAULT_REGISTRY, PackageMetadata, Registry};
#[doc(inline)]
pub use crate::resolve::{RepositoryUrl, normalize, normalize_option, resolve};
