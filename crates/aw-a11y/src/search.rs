//! Type-ahead search
//!
//! Printable keys accumulate into a query; the first item whose text
//! starts with the query matches. The query resets after
//! [`SEARCH_RESET`] without input.

use std::time::Duration;

use aw_dom::{Document, NodeId};

/// Inactivity that clears the accumulated query
pub const SEARCH_RESET: Duration = Duration::from_millis(500);

#[derive(Debug, Clone)]
enum Collection {
    /// Fixed items
    Items(Vec<NodeId>),
    /// Element children of a container, re-read on every key
    Children(NodeId),
    /// Nothing searchable
    Inert,
}

/// Type-ahead search engine
#[derive(Debug, Clone)]
pub struct Search {
    collection: Collection,
    query: String,
    last_input: Option<Duration>,
}

impl Search {
    /// Search a fixed set of items
    pub fn new(items: Vec<NodeId>) -> Self {
        Self::with_collection(Collection::Items(items))
    }

    /// Search the element children of `container`
    ///
    /// A container that is not an element yields an engine that never
    /// matches.
    pub fn children_of(doc: &Document, container: NodeId) -> Self {
        if doc.is_element(container) {
            Self::with_collection(Collection::Children(container))
        } else {
            tracing::warn!("type-ahead container {} is not an element", container);
            Self::with_collection(Collection::Inert)
        }
    }

    fn with_collection(collection: Collection) -> Self {
        Self {
            collection,
            query: String::new(),
            last_input: None,
        }
    }

    fn items(&self, doc: &Document) -> Vec<NodeId> {
        match &self.collection {
            Collection::Items(items) => items.clone(),
            Collection::Children(container) => doc.element_children(*container),
            Collection::Inert => Vec::new(),
        }
    }

    /// Feed one key at time `now` and return the first match
    pub fn get_item(&mut self, doc: &Document, key: char, now: Duration) -> Option<NodeId> {
        if matches!(self.collection, Collection::Inert) {
            return None;
        }
        self.tick(now);
        self.query.extend(key.to_lowercase());
        self.last_input = Some(now);

        let found = self.items(doc).into_iter().find(|&item| {
            doc.text_content(item)
                .trim()
                .to_lowercase()
                .starts_with(&self.query)
        });
        tracing::trace!("type-ahead {:?} -> {:?}", self.query, found);
        found
    }

    /// Clear the query if the reset delay has passed
    pub fn tick(&mut self, now: Duration) {
        if let Some(deadline) = self.deadline() {
            if now >= deadline {
                self.reset();
            }
        }
    }

    /// When the current query expires
    pub fn deadline(&self) -> Option<Duration> {
        self.last_input.map(|last| last + SEARCH_RESET)
    }

    /// A query is still accumulating at `now`
    ///
    /// Keys that normally act (Space commits a listbox) extend the query
    /// instead while this holds.
    pub fn is_pending(&self, now: Duration) -> bool {
        !self.query.is_empty() && self.deadline().is_some_and(|deadline| now < deadline)
    }

    pub fn reset(&mut self) {
        self.query.clear();
        self.last_input = None;
    }

    /// Accumulated query, lowercased
    pub fn query(&self) -> &str {
        &self.query
    }
}
