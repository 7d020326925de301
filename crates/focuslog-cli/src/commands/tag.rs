use clap::Subcommand;
use serde_json::json;

use super::{open_tracker, print_json, CommandResult};

#[derive(Subcommand)]
pub enum TagAction {
    /// List tags with their chart colours
    List,
    /// Add a tag
    Add { name: String },
    /// Remove a tag; its sessions move to the default tag
    Remove { name: String },
}

pub fn run(action: TagAction) -> CommandResult {
    let mut tracker = open_tracker()?;

    match action {
        TagAction::List => {
            let tags = tracker.tags();
            let listing: Vec<_> = tags
                .tags()
                .iter()
                .map(|tag| {
                    json!({
                        "tag": tag,
                        "color": tags.color_of(tag),
                        "default": tag == tags.default_tag(),
                        "selected": tag == tracker.clock().tag(),
                    })
                })
                .collect();
            print_json(&listing)?;
        }
        TagAction::Add { name } => {
            if !tracker.add_tag(&name) {
                tracing::debug!(tag = %name, "tag already present or blank, nothing added");
            }
            print_json(tracker.tags())?;
        }
        TagAction::Remove { name } => {
            let moved = tracker
                .remove_tag(&name)
                .ok_or_else(|| format!("cannot remove tag: {name:?}"))?;
            print_json(&json!({
                "removed": name,
                "sessions_moved": moved,
                "moved_to": tracker.tags().default_tag(),
            }))?;
        }
    }
    Ok(())
}
