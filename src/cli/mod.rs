//! CLI command definitions and argument parsing.
//!
//! Uses clap derive macros for ergonomic argument definitions.

pub mod args;

use iamctl::backend::aws::AwsSettings;
use iamctl::config::Config;
use iamctl::output::OutputFormat;

/// Resolved invocation settings: CLI flags layered over loaded config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub aws: AwsSettings,
    pub format: OutputFormat,
    pub log_level: String,
}

/// Merge CLI flags over the loaded configuration (flags win).
pub fn resolve(cli: &args::Cli, config: &Config) -> Invocation {
    Invocation {
        aws: AwsSettings {
            region: cli.region.clone().or_else(|| config.aws.region.clone()),
            profile: cli.profile.clone().or_else(|| config.aws.profile.clone()),
            endpoint_url: cli
                .endpoint_url
                .clone()
                .or_else(|| config.aws.endpoint_url.clone()),
        },
        format: cli.format.unwrap_or(config.output.format),
        log_level: cli
            .log_level
            .clone()
            .unwrap_or_else(|| config.log.level.clone()),
    }
}
