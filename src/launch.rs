//! Process launch strategies
//!
//! Hands control to the resolved native binary. On Unix the launcher
//! replaces its own process image so the target inherits the PID and
//! signal disposition and no wrapper process lingers between the shell
//! and the tool. Windows has no `execv`, so the target runs as a child
//! and its exit code is propagated verbatim.

// SpawnAndWait is the off-platform strategy on Unix builds.
#![allow(dead_code)]

use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

use crate::resolve::LaunchError;

/// How a resolved binary is handed control.
///
/// Arguments are forwarded exactly as received: same order, same bytes,
/// nothing added. The environment is inherited unchanged.
pub trait Launcher {
    /// On success, `SpawnAndWait` returns the child's exit code;
    /// `ReplaceImage` never returns at all.
    fn launch(&self, binary: &Path, args: &[OsString]) -> Result<i32, LaunchError>;
}

/// Replace the current process image with the target (Unix only).
#[cfg(unix)]
pub struct ReplaceImage;

#[cfg(unix)]
impl Launcher for ReplaceImage {
    fn launch(&self, binary: &Path, args: &[OsString]) -> Result<i32, LaunchError> {
        use std::os::unix::process::CommandExt;

        tracing::debug!(binary = %binary.display(), "replacing process image");
        // exec only returns on failure.
        let err = Command::new(binary).args(args).exec();
        Err(LaunchError::LaunchFailed {
            binary: binary.to_path_buf(),
            source: err,
        })
    }
}

/// Run the target as a child process and mirror its exit code.
pub struct SpawnAndWait;

impl Launcher for SpawnAndWait {
    fn launch(&self, binary: &Path, args: &[OsString]) -> Result<i32, LaunchError> {
        tracing::debug!(binary = %binary.display(), "spawning child process");
        let status = Command::new(binary)
            .args(args)
            .status()
            .map_err(|source| LaunchError::LaunchFailed {
                binary: binary.to_path_buf(),
                source,
            })?;
        // A signal-terminated child has no code on Unix; report failure.
        Ok(status.code().unwrap_or(1))
    }
}

/// The strategy for the build target, selected at compile time.
#[cfg(unix)]
pub fn platform_launcher() -> impl Launcher {
    ReplaceImage
}

#[cfg(not(unix))]
pub fn platform_launcher() -> impl Launcher {
    SpawnAndWait
}
