//! Terminal renderer: styled field listings for humans.

use colored::Colorize;

use crate::models::{AccessKey, AccessKeyMetadata, Group, KeyStatus, User};
use crate::output::Renderer;

/// Terminal output renderer with colored field listings.
pub struct TerminalRenderer;

impl Renderer for TerminalRenderer {
    fn user(&self, user: &User) -> String {
        let mut out = String::new();
        out.push_str(&format!("  {}     {}\n", "User:".cyan(), user.name.bold()));
        out.push_str(&format!("  {}       {}\n", "Id:".cyan(), user.user_id));
        out.push_str(&format!("  {}      {}\n", "Arn:".cyan(), user.arn));
        out.push_str(&format!("  {}     {}\n", "Path:".cyan(), user.path));
        if let Some(ref created) = user.create_date {
            out.push_str(&format!("  {}  {}\n", "Created:".cyan(), created.dimmed()));
        }
        out
    }

    fn user_absent(&self, username: &str) -> String {
        format!("  {} user {} does not exist\n", "·".dimmed(), username.bold())
    }

    fn access_key(&self, key: &AccessKey) -> String {
        let mut out = String::new();
        out.push_str(&format!("  {}     {}\n", "User:".cyan(), key.user_name));
        out.push_str(&format!("  {}   {}\n", "Key id:".cyan(), key.key_id.bold()));
        out.push_str(&format!(
            "  {}   {}\n",
            "Secret:".cyan(),
            key.secret_access_key.bold()
        ));
        out.push_str(&format!("  {}   {}\n", "Status:".cyan(), status(key.status)));
        out.push_str(&format!(
            "\n  {} {}\n",
            "⚠".yellow().bold(),
            "Store the secret now — it cannot be retrieved again.".yellow()
        ));
        out
    }

    fn access_keys(&self, username: &str, keys: &[AccessKeyMetadata]) -> String {
        if keys.is_empty() {
            return format!("  {} no access keys for {}\n", "·".dimmed(), username.bold());
        }

        let mut out = format!(
            "  {} access key(s) for {}\n\n",
            keys.len().to_string().bold(),
            username.bold()
        );
        for key in keys {
            let created = key.create_date.as_deref().unwrap_or("-");
            out.push_str(&format!(
                "  {}  {}  {}\n",
                key.key_id.bold(),
                status(key.status),
                created.dimmed()
            ));
        }
        out
    }

    fn groups(&self, username: &str, groups: &[Group]) -> String {
        if groups.is_empty() {
            return format!(
                "  {} {} belongs to no groups\n",
                "·".dimmed(),
                username.bold()
            );
        }

        let mut out = format!(
            "  {} group(s) for {}\n\n",
            groups.len().to_string().bold(),
            username.bold()
        );
        for group in groups {
            if group.arn.is_empty() {
                out.push_str(&format!("  {}\n", group.name.bold()));
            } else {
                out.push_str(&format!(
                    "  {}  {}\n",
                    group.name.bold(),
                    group.arn.dimmed()
                ));
            }
        }
        out
    }

    fn confirmation(&self, message: &str) -> String {
        format!("  {} {}\n", "✔".green().bold(), message)
    }
}

fn status(status: KeyStatus) -> String {
    match status {
        KeyStatus::Active => "active".green().to_string(),
        KeyStatus::Inactive => "inactive".yellow().to_string(),
        KeyStatus::Unknown => "unknown".dimmed().to_string(),
    }
}
