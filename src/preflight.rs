//! Toolchain preflight validation.
//!
//! These checks run before startup to surface a missing or misnamed compiler
//! as an actionable error instead of a failed build after the first line.

use crate::config::Config;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Validate that the configured compiler can be launched.
pub fn validate_toolchain(config: &Config) -> Result<(), String> {
    validate_toolchain_with_path(config, std::env::var_os("PATH"))
}

fn validate_toolchain_with_path(config: &Config, path_var: Option<OsString>) -> Result<(), String> {
    let command = config.compiler.command.trim();
    if command.is_empty() {
        return Err(
            "No compiler configured. Set compiler.command in creppl.toml or CREPPL_COMPILER."
                .to_string(),
        );
    }
    if config.compiler.std.trim().is_empty() {
        return Err("compiler.std must not be empty (for example `c++17`).".to_string());
    }

    match find_in_path(command, path_var) {
        Some(_) => Ok(()),
        None if command.contains('/') => Err(format!(
            "compiler `{command}` does not exist. Check compiler.command or pass --compiler."
        )),
        None => Err(format!(
            "compiler `{command}` was not found on PATH. Install it or pass --compiler."
        )),
    }
}

/// Locate `command` the way a shell would: paths are taken as-is, bare
/// names are searched in each `PATH` entry.
pub fn find_in_path(command: &str, path_var: Option<OsString>) -> Option<PathBuf> {
    if command.contains('/') {
        let candidate = Path::new(command);
        return candidate.is_file().then(|| candidate.to_path_buf());
    }
    let path_var = path_var?;
    std::env::split_paths(&path_var)
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(|dir| dir.join(command))
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testsupport::TestTempDir;

    fn config_with_compiler(command: &str) -> Config {
        let mut cfg = Config::default();
        cfg.compiler.command = command.to_string();
        cfg
    }

    #[test]
    fn preflight_rejects_empty_compiler() {
        let err = validate_toolchain_with_path(&config_with_compiler("  "), None)
            .expect_err("should fail");
        assert!(err.contains("No compiler configured"), "err: {err}");
    }

    #[test]
    fn preflight_rejects_empty_std() {
        let mut cfg = config_with_compiler("g++");
        cfg.compiler.std.clear();
        let err = validate_toolchain_with_path(&cfg, None).expect_err("should fail");
        assert!(err.contains("compiler.std"), "err: {err}");
    }

    #[test]
    fn preflight_finds_compiler_on_injected_path() {
        let tmp = TestTempDir::new("preflight");
        tmp.write_text("bin/fake-gxx", "#!/bin/sh\n");
        let path_var = OsString::from(format!("/nonexistent:{}", tmp.child("bin").display()));

        let found = find_in_path("fake-gxx", Some(path_var.clone())).expect("found");
        assert_eq!(found, tmp.child("bin/fake-gxx"));
        assert!(validate_toolchain_with_path(&config_with_compiler("fake-gxx"), Some(path_var)).is_ok());
    }

    #[test]
    fn preflight_reports_missing_compiler() {
        let tmp = TestTempDir::new("preflight-missing");
        let path_var = tmp.path().as_os_str().to_os_string();
        let err = validate_toolchain_with_path(&config_with_compiler("fake-gxx"), Some(path_var))
            .expect_err("should fail");
        assert!(err.contains("not found on PATH"), "err: {err}");
    }

    #[test]
    fn explicit_compiler_path_is_checked_directly() {
        let tmp = TestTempDir::new("preflight-explicit");
        tmp.write_text("cc/g++", "");
        let explicit = tmp.child("cc/g++").display().to_string();
        assert!(find_in_path(&explicit, None).is_some());

        let missing = tmp.child("cc/clang++").display().to_string();
        let err = validate_toolchain_with_path(&config_with_compiler(&missing), None)
            .expect_err("should fail");
        assert!(err.contains("does not exist"), "err: {err}");
    }
}
