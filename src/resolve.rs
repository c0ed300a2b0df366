//! Native binary resolution
//!
//! Locates the pre-built `loam` executable relative to the launcher's own
//! install location. In a development checkout both binaries land in
//! `target/release`, so the project root is a fixed number of parents above
//! the launcher executable.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Name of the native binary the launcher hands control to.
pub const BINARY_NAME: &str = "loam";

/// Environment variable that points directly at the native binary,
/// bypassing the directory walk.
pub const BINARY_ENV_OVERRIDE: &str = "LOAM_BIN";

/// Relative path from the project root to the release build output.
const RELEASE_DIR: &[&str] = &["target", "release"];

/// Parents between the launcher executable and the project root
/// (`exe -> release -> target -> root`).
const ROOT_WALK_DEPTH: usize = 3;

/// Errors raised while resolving or launching the native binary
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error(
        "Could not find the native {BINARY_NAME} binary (searched {searched:?}). \
         Build it with `cargo build --release`, or point {BINARY_ENV_OVERRIDE} at it."
    )]
    BinaryNotFound { searched: Vec<PathBuf> },

    #[error("{BINARY_ENV_OVERRIDE} points at {0:?}, which does not exist or is a directory")]
    BadOverride(PathBuf),

    #[error("could not determine the launcher's own location: {0}")]
    NoAnchor(#[source] std::io::Error),

    #[error("failed to launch {binary:?}: {source}")]
    LaunchFailed {
        binary: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Locates the native binary under a project root.
#[derive(Debug, Clone)]
pub struct BinaryLocator {
    /// Project root the release directory hangs off.
    root: PathBuf,
    /// Direct path override; wins over the directory walk when set.
    override_path: Option<PathBuf>,
}

impl BinaryLocator {
    /// Anchor on the running executable: the project root is a fixed number
    /// of parent directories above it.
    pub fn from_current_exe() -> Result<Self, LaunchError> {
        let exe = std::env::current_exe().map_err(LaunchError::NoAnchor)?;
        let mut root = exe.as_path();
        for _ in 0..ROOT_WALK_DEPTH {
            root = root.parent().unwrap_or(root);
        }
        Ok(Self {
            root: root.to_path_buf(),
            override_path: std::env::var_os(BINARY_ENV_OVERRIDE).map(PathBuf::from),
        })
    }

    /// Anchor on an explicit root. Used by tests and callers that already
    /// know the project layout.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            override_path: None,
        }
    }

    pub fn with_override(mut self, path: impl Into<PathBuf>) -> Self {
        self.override_path = Some(path.into());
        self
    }

    /// Resolve the native binary path.
    ///
    /// An explicit override is authoritative: if it does not point at a
    /// regular file the resolution fails rather than silently falling back
    /// to the directory walk. Otherwise the first existing non-directory
    /// candidate under `<root>/target/release` wins; on Windows the
    /// `.exe`-suffixed name is tried after the bare one.
    pub fn resolve(&self) -> Result<PathBuf, LaunchError> {
        if let Some(path) = &self.override_path {
            if is_binary(path) {
                return Ok(path.clone());
            }
            return Err(LaunchError::BadOverride(path.clone()));
        }

        let mut searched = Vec::with_capacity(2);
        for name in candidate_names() {
            let mut candidate = self.root.clone();
            candidate.extend(RELEASE_DIR);
            candidate.push(name);
            if is_binary(&candidate) {
                tracing::debug!(path = %candidate.display(), "resolved native binary");
                return Ok(candidate);
            }
            searched.push(candidate);
        }

        Err(LaunchError::BinaryNotFound { searched })
    }
}

/// Candidate file names in probe order.
fn candidate_names() -> Vec<String> {
    let mut names = vec![BINARY_NAME.to_string()];
    if !std::env::consts::EXE_SUFFIX.is_empty() {
        names.push(format!("{}{}", BINARY_NAME, std::env::consts::EXE_SUFFIX));
    }
    names
}

/// A candidate counts only if it exists and is not a directory.
fn is_binary(path: &Path) -> bool {
    path.exists() && !path.is_dir()
}
