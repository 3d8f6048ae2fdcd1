//! The external tools a repository can be cloned with, and how to find and run them.

use std::process::{Command, Stdio};

use log::debug;

use crate::error::RunError;
use crate::resolve::RepositoryUrl;

/// A tool capable of cloning a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CloneBackend {
    /// `git goget <url>`, from the `git-goget` extension.
    GitGoget,
    /// `ghq get <url>`.
    Ghq,
    /// `git clone <url>`.
    Git,
}

/// Backends in order of preference.
pub const BACKENDS: &[CloneBackend] = &[
    CloneBackend::GitGoget,
    CloneBackend::Ghq,
    CloneBackend::Git,
];

impl CloneBackend {
    /// The executable whose presence on `PATH` makes this backend usable.
    pub fn probe_name(&self) -> &'static str {
        match self {
            Self::GitGoget => "git-goget",
            Self::Ghq => "ghq",
            Self::Git => "git",
        }
    }

    /// The program actually launched.
    pub fn executable(&self) -> &'static str {
        match self {
            Self::GitGoget | Self::Git => "git",
            Self::Ghq => "ghq",
        }
    }

    pub fn subcommand(&self) -> &'static str {
        match self {
            Self::GitGoget => "goget",
            Self::Ghq => "get",
            Self::Git => "clone",
        }
    }

    /// The name used in messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::GitGoget => "git goget",
            Self::Ghq => "ghq",
            Self::Git => "git",
        }
    }

    /// The name used when falling back to this backend: plain `git` is announced as `git clone`.
    pub fn fallback_label(&self) -> &'static str {
        match self {
            Self::Git => "git clone",
            other => other.name(),
        }
    }

    /// The command line cloning `url` with this backend. The URL is passed as a single argument.
    pub fn invocation(&self, url: &RepositoryUrl) -> Invocation {
        Invocation {
            program: self.executable().to_string(),
            args: vec![self.subcommand().to_string(), url.to_string()],
        }
    }
}

impl std::fmt::Display for CloneBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A program and its arguments, run without a shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: String,
    args: Vec<String>,
}

impl Invocation {
    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// A command which inherits the standard streams of this process.
    pub fn to_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        command
    }
}

impl std::fmt::Display for Invocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Where backends are looked up and run.
pub trait Host {
    /// Whether `executable` can be found. Never fails: problems count as "not available".
    fn is_available(&self, executable: &str) -> bool;

    /// Run `invocation` to completion.
    fn run(&self, invocation: &Invocation) -> Result<(), RunError>;
}

/// The real machine: `which`/`where` for lookups, child processes for clones.
#[derive(Debug, Default, Clone, Copy)]
pub struct System;

/// The platform's executable lookup command.
pub fn lookup_command() -> &'static str {
    if cfg!(windows) { "where" } else { "which" }
}

/// Check whether `executable` is on `PATH` by running the platform's lookup command.
pub fn is_available(executable: &str) -> bool {
    let lookup = lookup_command();
    let status = Command::new(lookup)
        .arg(executable)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();
    match status {
        Ok(status) => status.success(),
        Err(err) => {
            debug!("Could not run '{lookup} {executable}': {err}");
            false
        }
    }
}

impl Host for System {
    fn is_available(&self, executable: &str) -> bool {
        is_available(executable)
    }

    fn run(&self, invocation: &Invocation) -> Result<(), RunError> {
        let status = invocation
            .to_command()
            .status()
            .map_err(|err| RunError::Spawn {
                command: invocation.to_string(),
                err,
            })?;
        if status.success() {
            Ok(())
        } else {
            Err(RunError::Exited {
                command: invocation.to_string(),
                code: status.code(),
            })
        }
    }
}
