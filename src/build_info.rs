//! Compile-time build metadata exposed to CLI/runtime surfaces.

/// Semver package version from `Cargo.toml`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// VCS commit hash captured at build time.
pub const GIT_COMMIT: &str = env!("CREPPL_BUILD_GIT_HASH");

/// Build timestamp captured at compile time.
pub const BUILD_TIMESTAMP: &str = env!("CREPPL_BUILD_TIMESTAMP");

/// Help trailer block that surfaces build metadata in `creppl --help`.
pub const HELP_BUILD_METADATA: &str = concat!(
    "Build metadata:\n  commit: ",
    env!("CREPPL_BUILD_GIT_HASH"),
    "\n  built: ",
    env!("CREPPL_BUILD_TIMESTAMP")
);

/// Version block printed by `creppl --version`.
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\ncommit: ",
    env!("CREPPL_BUILD_GIT_HASH"),
    "\nbuilt: ",
    env!("CREPPL_BUILD_TIMESTAMP")
);

/// Render concise startup metadata shown under the banner title.
pub fn startup_metadata_line() -> String {
    format!("v{VERSION} {GIT_COMMIT} (built {BUILD_TIMESTAMP})")
}
