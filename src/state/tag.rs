//! Tag history.
//!
//! A tag records one player capturing another. The history is wiped when the
//! game returns to Initializing.

use super::player::Name;

/// One capture interaction.
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    pub tagger: Name,
    pub tagged: Name,
    pub tagged_at: chrono::DateTime<chrono::Utc>,
}

impl Tag {
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "tagger": self.tagger.as_str(),
            "tagged": self.tagged.as_str(),
            "tagged_at": self.tagged_at.to_rfc3339()
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct TagRegistry {
    tags: Vec<Tag>,
}

impl TagRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a tag at the current time.
    pub fn add_tag(&mut self, tagger: Name, tagged: Name) -> Tag {
        let tag = Tag {
            tagger,
            tagged,
            tagged_at: chrono::Utc::now(),
        };
        self.tags.push(tag.clone());
        tag
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Tags made by or against a player.
    pub fn tags_involving(&self, name: Name) -> impl Iterator<Item = &Tag> {
        self.tags
            .iter()
            .filter(move |t| t.tagger == name || t.tagged == name)
    }

    pub fn count(&self) -> usize {
        self.tags.len()
    }

    pub fn clear_tags(&mut self) {
        self.tags.clear();
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Array(self.tags.iter().map(|t| t.to_json()).collect())
    }
}
