//! Link Store for Linkstash.
//!
//! The single in-memory source of truth for the signed-in user's links,
//! plus the active filter and view mode. Every mutation goes through the
//! persistence layer first; local state only changes after the call
//! succeeds, so the list always mirrors server-confirmed truth. Failures
//! become a recorded error message for the caller to display — they are
//! never propagated as errors past the store boundary.

use chrono::Utc;

use crate::managers::link_manager::LinkManagerTrait;
use crate::services::link_filter;
use crate::services::metadata_extractor::MetadataExtractor;
use crate::types::filter::{FilterSpec, ViewMode};
use crate::types::link::{Link, NewLink, TagSet};

pub struct LinkStore<R: LinkManagerTrait> {
    repo: R,
    extractor: MetadataExtractor,
    owner_id: String,
    links: Vec<Link>,
    filter: FilterSpec,
    view_mode: ViewMode,
    loading: bool,
    error: Option<String>,
}

impl<R: LinkManagerTrait> LinkStore<R> {
    /// Creates an empty store for the owner. Call [`LinkStore::load`] to
    /// populate it.
    pub fn new(repo: R, extractor: MetadataExtractor, owner_id: &str) -> Self {
        Self {
            repo,
            extractor,
            owner_id: owner_id.to_string(),
            links: Vec::new(),
            filter: FilterSpec::default(),
            view_mode: ViewMode::default(),
            loading: false,
            error: None,
        }
    }

    /// Replaces the in-memory list with the persisted one, newest first.
    pub fn load(&mut self) {
        self.loading = true;
        match self.repo.list_for_owner(&self.owner_id) {
            Ok(links) => {
                self.links = links;
                self.error = None;
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to load links");
                self.error = Some(err.to_string());
            }
        }
        self.loading = false;
    }

    /// Fetches a preview for `url` and persists the combined record.
    ///
    /// On success the stored record (with its assigned id and timestamp) is
    /// prepended to the list. On failure the list is untouched and the error
    /// is recorded. Returns whether the link was created.
    pub async fn create(&mut self, url: &str, tags: Vec<String>) -> bool {
        let metadata = self.extractor.extract(url).await;
        let record = NewLink {
            owner_id: self.owner_id.clone(),
            url: url.to_string(),
            title: metadata.title,
            description: metadata.description,
            image: metadata.favicon,
            tags: TagSet::from(tags),
        };

        match self.repo.insert(record) {
            Ok(link) => {
                self.links.insert(0, link);
                self.error = None;
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to create link");
                self.error = Some(err.to_string());
                false
            }
        }
    }

    /// Deletes the link, removing it locally only once persistence agrees.
    pub fn delete(&mut self, id: &str) -> bool {
        match self.repo.delete(id, &self.owner_id) {
            Ok(()) => {
                self.links.retain(|link| link.id != id);
                self.error = None;
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to delete link");
                self.error = Some(err.to_string());
                false
            }
        }
    }

    /// Replaces a link's tags (deduplicated) and mirrors the result locally.
    pub fn set_tags(&mut self, id: &str, tags: Vec<String>) -> bool {
        let tags = TagSet::from(tags);
        match self.repo.update_tags(id, &self.owner_id, &tags) {
            Ok(()) => {
                if let Some(link) = self.links.iter_mut().find(|l| l.id == id) {
                    link.tags = tags;
                }
                self.error = None;
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to update tags");
                self.error = Some(err.to_string());
                false
            }
        }
    }

    /// Adds one tag to a link.
    pub fn add_tag(&mut self, id: &str, tag: &str) -> bool {
        let Some(link) = self.links.iter().find(|l| l.id == id) else {
            self.error = Some(format!("Link not found: {}", id));
            return false;
        };
        let mut tags = link.tags.clone();
        tags.insert(tag);
        self.set_tags(id, tags.as_slice().to_vec())
    }

    /// Removes one tag from a link.
    pub fn remove_tag(&mut self, id: &str, tag: &str) -> bool {
        let Some(link) = self.links.iter().find(|l| l.id == id) else {
            self.error = Some(format!("Link not found: {}", id));
            return false;
        };
        let mut tags = link.tags.clone();
        tags.remove(tag);
        self.set_tags(id, tags.as_slice().to_vec())
    }

    /// The displayed subset: the active filter applied to the loaded links.
    pub fn visible(&self) -> Vec<Link> {
        link_filter::filter_links(&self.links, &self.filter, Utc::now())
    }

    /// Every distinct tag across the loaded links, in first-seen order.
    pub fn all_tags(&self) -> Vec<String> {
        let mut all = TagSet::new();
        for link in &self.links {
            for tag in link.tags.iter() {
                all.insert(tag);
            }
        }
        all.as_slice().to_vec()
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    pub fn filter(&self) -> &FilterSpec {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: FilterSpec) {
        self.filter = filter;
    }

    pub fn set_search_term(&mut self, term: &str) {
        self.filter.search_term = term.to_string();
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
