//! Stamp the binary with the source revision and build time shown in the
//! banner and `--version`.
//!
//! `CREPPL_BUILD_GIT_HASH` / `CREPPL_BUILD_TIMESTAMP` win when set, and
//! `SOURCE_DATE_EPOCH` pins the timestamp for reproducible builds.

use std::env;
use std::process::Command;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/index");
    for var in ["CREPPL_BUILD_GIT_HASH", "CREPPL_BUILD_TIMESTAMP", "SOURCE_DATE_EPOCH"] {
        println!("cargo:rerun-if-env-changed={var}");
    }

    let revision = env::var("CREPPL_BUILD_GIT_HASH")
        .ok()
        .or_else(git_revision)
        .unwrap_or_else(|| "unknown".to_string());
    let built = env::var("CREPPL_BUILD_TIMESTAMP")
        .unwrap_or_else(|_| httpdate::fmt_http_date(build_time()));

    println!("cargo:rustc-env=CREPPL_BUILD_GIT_HASH={revision}");
    println!("cargo:rustc-env=CREPPL_BUILD_TIMESTAMP={built}");
}

/// Short hash, suffixed with `-dirty` when the tree has local edits.
fn git_revision() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--always", "--dirty", "--abbrev=12"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    let revision = text.trim();
    (!revision.is_empty()).then(|| revision.to_string())
}

fn build_time() -> SystemTime {
    env::var("SOURCE_DATE_EPOCH")
        .ok()
        .and_then(|secs| secs.trim().parse::<u64>().ok())
        .map(|secs| UNIX_EPOCH + Duration::from_secs(secs))
        .unwrap_or_else(SystemTime::now)
}
