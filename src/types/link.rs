use serde::{Deserialize, Serialize};

/// Ordered set of user-defined tags.
///
/// Semantically a set — duplicates collapse — but first-insertion order is
/// preserved so display order stays stable. Serializes as a plain JSON array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagSet(Vec<String>);

impl TagSet {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Inserts a tag. Returns `false` if it was already present.
    pub fn insert(&mut self, tag: &str) -> bool {
        if self.contains(tag) {
            return false;
        }
        self.0.push(tag.to_string());
        true
    }

    /// Removes a tag. Returns `false` if it was not present.
    pub fn remove(&mut self, tag: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|t| t != tag);
        self.0.len() != before
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t == tag)
    }

    /// True when every tag in `required` is present in this set.
    pub fn contains_all(&self, required: &TagSet) -> bool {
        required.iter().all(|t| self.contains(t))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl From<Vec<String>> for TagSet {
    /// Collapses duplicates, keeping the first occurrence of each tag.
    fn from(tags: Vec<String>) -> Self {
        let mut set = TagSet::new();
        for tag in tags {
            set.insert(&tag);
        }
        set
    }
}

impl FromIterator<String> for TagSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

/// A saved link with its fetched page preview.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Link {
    pub id: String,
    pub owner_id: String,
    pub url: String,
    pub title: String,
    pub description: String,
    /// Favicon URL, absolute. Empty when the page had none we could resolve.
    pub image: String,
    pub tags: TagSet,
    pub created_at: i64,
}

/// Fields for a link about to be inserted. `id` and `created_at` are
/// assigned by the persistence layer.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub owner_id: String,
    pub url: String,
    pub title: String,
    pub description: String,
    pub image: String,
    pub tags: TagSet,
}
