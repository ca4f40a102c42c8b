//! Output renderers: terminal and JSON.
//!
//! Every record shape the CLI prints goes through a [`Renderer`] so the
//! two formats stay in lockstep. JSON output is stable enough to pipe
//! into `jq`; terminal output is for humans.

pub mod json;
pub mod terminal;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::{AccessKey, AccessKeyMetadata, Group, User};

/// Trait for rendering CLI results to an output format.
pub trait Renderer {
    /// Render a user record.
    fn user(&self, user: &User) -> String;

    /// Render the absence of a user (a normal outcome, not an error).
    fn user_absent(&self, username: &str) -> String;

    /// Render a freshly created access key, secret included. This is
    /// the only renderer method that ever sees a secret.
    fn access_key(&self, key: &AccessKey) -> String;

    /// Render an access-key listing.
    fn access_keys(&self, username: &str, keys: &[AccessKeyMetadata]) -> String;

    /// Render a group-membership listing.
    fn groups(&self, username: &str, groups: &[Group]) -> String;

    /// Render a plain confirmation for mutations with no record to show.
    fn confirmation(&self, message: &str) -> String;
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
}

impl OutputFormat {
    /// The renderer implementing this format.
    pub fn renderer(&self) -> Box<dyn Renderer> {
        match self {
            OutputFormat::Terminal => Box::new(terminal::TerminalRenderer),
            OutputFormat::Json => Box::new(json::JsonRenderer),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Terminal => write!(f, "terminal"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "terminal" => Ok(OutputFormat::Terminal),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!(
                "unsupported output format: '{other}'. Supported: terminal, json"
            )),
        }
    }
}
