//! loam-launch - thin entry point for the native loam binary
//!
//! All real functionality lives in the separately built `loam` executable.
//! This launcher only locates it and hands over control:
//! - On Unix the process image is replaced outright, so signals, the PID
//!   and the exit code all belong to the target with no wrapper in between.
//! - On Windows the target runs as a child and its exit code is mirrored.
//!
//! Every command-line argument is forwarded verbatim; the launcher defines
//! no flags of its own.

mod launch;
mod logging;
mod resolve;

use std::ffi::OsString;

use launch::{platform_launcher, Launcher};
use resolve::{BinaryLocator, LaunchError};

/// Launcher exit codes
#[allow(dead_code)]
mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const FAILURE: i32 = 1;
}

fn main() {
    std::process::exit(run());
}

fn run() -> i32 {
    if let Err(e) = logging::init() {
        eprintln!("Failed to initialize logging: {}", e);
        return exit_codes::FAILURE;
    }

    // Opaque pass-through: everything after the program name, untouched.
    let args: Vec<OsString> = std::env::args_os().skip(1).collect();

    match resolve_and_launch(&args) {
        // Only the spawn-and-wait strategy ever gets here; on Unix a
        // successful exec never returns.
        Ok(code) => code,
        Err(e @ (LaunchError::BinaryNotFound { .. } | LaunchError::BadOverride(_))) => {
            eprintln!("Error: {}", e);
            exit_codes::FAILURE
        }
        Err(e) => {
            eprintln!("Unexpected error: {}", e);
            exit_codes::FAILURE
        }
    }
}

fn resolve_and_launch(args: &[OsString]) -> Result<i32, LaunchError> {
    let binary = BinaryLocator::from_current_exe()?.resolve()?;
    platform_launcher().launch(&binary, args)
}
