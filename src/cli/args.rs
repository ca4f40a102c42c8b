//! Clap argument types and parse tests.

use clap::Parser;

use iamctl::output::OutputFormat;

/// IAM user, group, and access-key management.
#[derive(Parser, Debug)]
#[command(
    name = "iamctl",
    version = iamctl::constants::VERSION,
    about = "IAM user, group, and access-key management",
)]
pub struct Cli {
    /// Region override (default: the SDK's resolution chain).
    #[arg(long, global = true)]
    pub region: Option<String>,

    /// Named credentials profile from the shared AWS config files.
    #[arg(long, global = true)]
    pub profile: Option<String>,

    /// Endpoint override, for IAM-compatible emulators.
    #[arg(long, global = true)]
    pub endpoint_url: Option<String>,

    /// Output format: terminal or json.
    #[arg(long, global = true)]
    pub format: Option<OutputFormat>,

    /// Log filter directive (e.g. `warn`, `debug`, `iamctl=trace`).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Manage users.
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Manage access keys.
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },

    /// Manage group memberships.
    Group {
        #[command(subcommand)]
        action: GroupAction,
    },

    /// Print version and build information.
    Version,
}

/// User subcommands.
#[derive(clap::Subcommand, Debug)]
pub enum UserAction {
    /// Create a user.
    Create {
        /// Unique user name.
        username: String,
    },
    /// Look up a user and print the record.
    Get {
        /// User name to look up.
        username: String,
    },
    /// Delete a user, detaching group memberships and access keys first.
    Delete {
        /// User name to delete.
        username: String,
    },
}

/// Access-key subcommands.
#[derive(clap::Subcommand, Debug)]
pub enum KeyAction {
    /// Create an access key pair. The secret is shown exactly once.
    Create {
        /// Owning user name.
        username: String,
    },
    /// List a user's access keys (no secrets).
    List {
        /// Owning user name.
        username: String,
    },
    /// Delete one access key.
    Delete {
        /// Owning user name.
        username: String,
        /// Key identifier to delete.
        key_id: String,
    },
}

/// Group-membership subcommands.
#[derive(clap::Subcommand, Debug)]
pub enum GroupAction {
    /// Add a user to a group.
    Add {
        /// User name.
        username: String,
        /// Group name.
        group: String,
    },
    /// Remove a user from a group.
    Remove {
        /// User name.
        username: String,
        /// Group name.
        group: String,
    },
    /// List the groups a user belongs to.
    List {
        /// User name.
        username: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_user_get() {
        let cli = Cli::try_parse_from(["iamctl", "user", "get", "alice"]).unwrap();
        match cli.command {
            Command::User {
                action: UserAction::Get { username },
            } => assert_eq!(username, "alice"),
            other => panic!("expected user get, got {other:?}"),
        }
    }

    #[test]
    fn parses_user_create_and_delete() {
        let cli = Cli::try_parse_from(["iamctl", "user", "create", "bob"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::User {
                action: UserAction::Create { .. }
            }
        ));

        let cli = Cli::try_parse_from(["iamctl", "user", "delete", "bob"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::User {
                action: UserAction::Delete { .. }
            }
        ));
    }

    #[test]
    fn parses_key_delete_with_key_id() {
        let cli =
            Cli::try_parse_from(["iamctl", "key", "delete", "alice", "AKIAEXAMPLE"]).unwrap();
        match cli.command {
            Command::Key {
                action: KeyAction::Delete { username, key_id },
            } => {
                assert_eq!(username, "alice");
                assert_eq!(key_id, "AKIAEXAMPLE");
            }
            other => panic!("expected key delete, got {other:?}"),
        }
    }

    #[test]
    fn key_delete_requires_key_id() {
        let result = Cli::try_parse_from(["iamctl", "key", "delete", "alice"]);
        assert!(result.is_err());
    }

    #[test]
    fn parses_group_add() {
        let cli = Cli::try_parse_from(["iamctl", "group", "add", "alice", "admins"]).unwrap();
        match cli.command {
            Command::Group {
                action: GroupAction::Add { username, group },
            } => {
                assert_eq!(username, "alice");
                assert_eq!(group, "admins");
            }
            other => panic!("expected group add, got {other:?}"),
        }
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from([
            "iamctl",
            "user",
            "get",
            "alice",
            "--region",
            "eu-north-1",
            "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.region.as_deref(), Some("eu-north-1"));
        assert_eq!(cli.format, Some(OutputFormat::Json));
    }

    #[test]
    fn global_flags_default_to_none() {
        let cli = Cli::try_parse_from(["iamctl", "version"]).unwrap();
        assert!(cli.region.is_none());
        assert!(cli.profile.is_none());
        assert!(cli.endpoint_url.is_none());
        assert!(cli.format.is_none());
        assert!(cli.log_level.is_none());
    }

    #[test]
    fn rejects_unknown_format() {
        let result =
            Cli::try_parse_from(["iamctl", "user", "get", "alice", "--format", "xml"]);
        assert!(result.is_err());
    }

    #[test]
    fn requires_a_command() {
        assert!(Cli::try_parse_from(["iamctl"]).is_err());
    }
}
