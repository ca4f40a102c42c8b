//! App-wide constants.
//!
//! Centralises the tool name, config paths, environment variable names,
//! and build metadata so a rename only requires changing this file.

/// Display name of the tool (lowercase).
pub const APP_NAME: &str = "iamctl";

/// Crate version, reported by the `version` subcommand.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Compilation target triple, injected by `build.rs`.
pub const TARGET: &str = env!("TARGET");

/// Local config filename (e.g. `.iamctl.toml` in the working directory).
pub const CONFIG_FILENAME: &str = ".iamctl.toml";

/// Directory name under `~/.config/` for the global config.
pub const CONFIG_DIR: &str = "iamctl";


// ── Environment variable names ──────────────────────────────────────

pub const ENV_REGION: &str = "IAMCTL_REGION";
pub const ENV_PROFILE: &str = "IAMCTL_PROFILE";
pub const ENV_ENDPOINT_URL: &str = "IAMCTL_ENDPOINT_URL";
pub const ENV_FORMAT: &str = "IAMCTL_FORMAT";
pub const ENV_LOG: &str = "IAMCTL_LOG";
