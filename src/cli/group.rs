//! Group CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_audit_entries, format_group_details, format_group_list};
use crate::error::SplitResult;
use crate::services::GroupService;
use crate::storage::Storage;

/// Group subcommands
#[derive(Subcommand)]
pub enum GroupCommands {
    /// Create a new group
    Create {
        /// Group name
        name: String,
        /// Member name (repeat for each member)
        #[arg(short, long = "member", required = true)]
        members: Vec<String>,
    },
    /// List all groups
    List,
    /// Show members, balances and the settlement plan
    Show {
        /// Group name or ID
        group: String,
    },
    /// Delete a group and all its expenses
    Delete {
        /// Group name or ID
        group: String,
    },
    /// Add a member to a group
    AddMember {
        /// Group name or ID
        group: String,
        /// New member name
        member: String,
    },
    /// Rename a member everywhere in the group
    RenameMember {
        /// Group name or ID
        group: String,
        /// Current name
        old: String,
        /// New name
        new: String,
    },
    /// Remove a member who is not part of any expense
    RemoveMember {
        /// Group name or ID
        group: String,
        /// Member name
        member: String,
    },
    /// Show recent changes to a group
    History {
        /// Group name or ID
        group: String,
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

/// Handle a group command
pub fn handle_group_command(
    storage: &Storage,
    settings: &Settings,
    cmd: GroupCommands,
) -> SplitResult<()> {
    let service = GroupService::new(storage);

    match cmd {
        GroupCommands::Create { name, members } => {
            let group = service.create(&name, &members)?;
            println!("Created group: {}", group.name);
            println!("  Members: {}", group.members.join(", "));
            println!("  ID: {}", group.id);
        }

        GroupCommands::List => {
            let groups = service.list()?;
            print!("{}", format_group_list(&groups));
        }

        GroupCommands::Show { group } => {
            let group = service.require(&group)?;
            let summary = service.summary(&group, &settings.settlement_marker);
            print!(
                "{}",
                format_group_details(&group, &summary, &settings.currency_symbol)
            );
        }

        GroupCommands::Delete { group } => {
            let group = service.require(&group)?;
            let deleted = service.delete(group.id)?;
            println!(
                "Deleted group: {} ({} expenses)",
                deleted.name,
                deleted.expenses.len()
            );
        }

        GroupCommands::AddMember { group, member } => {
            let group = service.require(&group)?;
            let updated = service.add_member(group.id, &member)?;
            println!("Added {} to {}", member.trim(), updated.name);
        }

        GroupCommands::RenameMember { group, old, new } => {
            let group = service.require(&group)?;
            let updated = service.rename_member(group.id, &old, &new)?;
            println!("Renamed {} to {} in {}", old, new.trim(), updated.name);
        }

        GroupCommands::RemoveMember { group, member } => {
            let group = service.require(&group)?;
            let updated = service.remove_member(group.id, &member)?;
            println!("Removed {} from {}", member, updated.name);
        }

        GroupCommands::History { group, limit } => {
            let group = service.require(&group)?;
            let entries = storage.audit().read_recent(limit, Some(group.id))?;
            println!("{}", format_audit_entries(&entries));
        }
    }

    Ok(())
}
