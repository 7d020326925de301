use serde::{Serialize, Serializer};

use super::SessionLog;

/// Fallback tag that every tag set contains and that cannot be removed.
pub const DEFAULT_TAG: &str = "Other";

/// Chart colours, assigned by tag position modulo the palette length.
pub const TAG_COLORS: [&str; 12] = [
    "#3b82f6", "#10b981", "#f59e0b", "#8b5cf6", "#ef4444", "#06b6d4", "#ec4899", "#6b7280",
    "#f97316", "#84cc16", "#0ea5e9", "#a855f7",
];

/// Ordered, duplicate-free set of tag names including the default tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSet {
    tags: Vec<String>,
    default_tag: String,
}

impl TagSet {
    pub fn new(default_tag: &str) -> Self {
        let default_tag = normalize(default_tag).unwrap_or(DEFAULT_TAG).to_string();
        Self {
            tags: vec![default_tag.clone()],
            default_tag,
        }
    }

    /// Build from stored names. Blanks and duplicates are dropped, and the
    /// default tag is put in front if it is missing.
    pub fn from_tags<I, T>(tags: I, default_tag: &str) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut set = Self::new(default_tag);
        let mut stored: Vec<String> = Vec::new();
        for tag in tags {
            if let Some(tag) = normalize(tag.as_ref()) {
                if !stored.iter().any(|t| t == tag) {
                    stored.push(tag.to_string());
                }
            }
        }
        if stored.contains(&set.default_tag) {
            set.tags = stored;
        } else {
            set.tags.extend(stored);
        }
        set
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn default_tag(&self) -> &str {
        &self.default_tag
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn position(&self, tag: &str) -> Option<usize> {
        self.tags.iter().position(|t| t == tag)
    }

    /// Colour for `tag`; tags outside the set get the default tag's colour.
    pub fn color_of(&self, tag: &str) -> &'static str {
        let idx = self.position(tag).or_else(|| self.position(&self.default_tag));
        TAG_COLORS[idx.unwrap_or(0) % TAG_COLORS.len()]
    }

    /// Add a tag. Blank names and existing tags are ignored.
    pub fn add(&mut self, name: &str) -> bool {
        match normalize(name) {
            Some(name) if !self.contains(name) => {
                self.tags.push(name.to_string());
                true
            }
            _ => false,
        }
    }

    /// Remove a tag and move its sessions to the default tag.
    ///
    /// Returns the number of sessions moved, or `None` if the tag is the
    /// default tag or not in the set.
    pub fn remove(&mut self, name: &str, log: &mut SessionLog) -> Option<usize> {
        if name == self.default_tag {
            return None;
        }
        let idx = self.position(name)?;
        self.tags.remove(idx);
        let moved = log.retag(name, &self.default_tag);
        tracing::info!(tag = name, moved, "tag removed");
        Some(moved)
    }
}

impl Serialize for TagSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.tags.serialize(serializer)
    }
}

fn normalize(name: &str) -> Option<&str> {
    let name = name.trim();
    (!name.is_empty()).then_some(name)
}
