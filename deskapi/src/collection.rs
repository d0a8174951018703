//! Clients for paginated list resources.

mod any;
mod translations;

pub use any::AnyCollection;
pub use translations::TranslationCollection;

use crate::constants::topic_defaults;
use crate::errors::DeskError;
use crate::models::{DeskObject, Fields, Links};
use crate::pagination::Entries;
use crate::types::ApiHref;
use crate::Session;
use log::debug;
use std::fmt::Display;

/// Contents of a collection, which are fetched at most once.
#[derive(Debug, Clone)]
pub(crate) struct CacheState<T> {
    fetched: Option<T>,
}

impl<T> CacheState<T> {
    pub(crate) fn unfetched() -> Self {
        Self { fetched: None }
    }

    pub(crate) fn is_fetched(&self) -> bool {
        self.fetched.is_some()
    }

    /// Take out the cached value, leaving the cache unfetched.
    pub(crate) fn take(&mut self) -> Option<T> {
        self.fetched.take()
    }

    /// Store a fetched value.
    pub(crate) fn fill(&mut self, value: T) -> &T {
        self.fetched.insert(value)
    }
}

/// Variations in how a [Collection] creates new items.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CollectionKind {
    /// Create items from exactly the given fields.
    Generic,
    /// Create topics, filling in `name`, `allow_questions` and `in_support_center`.
    Topics,
}

/// A paginated list of entries at an API path.
///
/// All pages are fetched the first time the contents are needed, and kept for
/// the lifetime of the [Collection]. To see changes made on the server since,
/// create a new [Collection]. [Collection::walk] goes through the pages
/// without caching.
#[derive(Debug, Clone)]
pub struct Collection {
    session: Session,
    path: String,
    kind: CollectionKind,
    cache: CacheState<Vec<DeskObject>>,
    links: Option<Links>,
}

impl Collection {
    pub fn new(session: Session, path: impl Into<String>) -> Self {
        Self::with_kind(session, path, CollectionKind::Generic)
    }

    /// A collection of topics.
    pub fn topics(session: Session, path: impl Into<String>) -> Self {
        Self::with_kind(session, path, CollectionKind::Topics)
    }

    pub fn with_kind(session: Session, path: impl Into<String>, kind: CollectionKind) -> Self {
        Self {
            session,
            path: path.into(),
            kind,
            cache: CacheState::unfetched(),
            links: None,
        }
    }

    /// The path this collection was created with.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn kind(&self) -> CollectionKind {
        self.kind
    }

    pub fn is_fetched(&self) -> bool {
        self.cache.is_fetched()
    }

    /// All items of this collection, in the order given by the server.
    pub fn items(&mut self) -> Result<&[DeskObject], DeskError> {
        let items = match self.cache.take() {
            Some(items) => items,
            None => self.fetch_all()?,
        };
        Ok(self.cache.fill(items).as_slice())
    }

    /// Get every page, recording the first page's links. Does not touch the cache.
    pub(crate) fn fetch_all(&mut self) -> Result<Vec<DeskObject>, DeskError> {
        debug!("Fetching all of {}", self.path);
        let mut entries = self.entries();
        let items = entries
            .by_ref()
            .map(|entry| self.session.object_for(entry?))
            .collect::<Result<Vec<_>, _>>()?;
        if self.links.is_none() {
            self.links = entries.into_links();
        }
        Ok(items)
    }

    pub fn len(&mut self) -> Result<usize, DeskError> {
        self.items().map(<[_]>::len)
    }

    pub fn is_empty(&mut self) -> Result<bool, DeskError> {
        self.len().map(|len| len == 0)
    }

    /// Whether an item with the same href as `object` is in this collection.
    pub fn contains(&mut self, object: &DeskObject) -> Result<bool, DeskError> {
        let href = object.api_href();
        Ok(self.items()?.iter().any(|item| item.api_href() == href))
    }

    /// Get the item at a position.
    pub fn at(&mut self, index: usize) -> Result<&DeskObject, DeskError> {
        let items = self.items()?;
        let len = items.len();
        items
            .get(index)
            .ok_or(DeskError::IndexOutOfRange { index, len })
    }

    /// The href which the server gave for this collection. Fetches the collection if needed.
    pub fn api_href(&mut self) -> Result<&ApiHref, DeskError> {
        self.items()?;
        self.declared_href()
            .ok_or_else(|| DeskError::MissingLink("self".to_string()))
    }

    pub(crate) fn declared_href(&self) -> Option<&ApiHref> {
        self.links
            .as_ref()
            .and_then(Links::self_link)
            .map(|link| &link.href)
    }

    // ==================================================
    //                 REQUESTS
    // ==================================================

    /// Create a new item in this collection.
    pub fn create(&self, fields: Fields) -> Result<DeskObject, DeskError> {
        let body = match self.kind {
            CollectionKind::Generic => fields,
            CollectionKind::Topics => {
                let mut body = topic_defaults();
                body.extend(fields);
                body
            }
        };
        let res = self.session.post(&self.path, &body)?;
        self.session.object_for(res)
    }

    /// Get a single item by its ID.
    pub fn by_id(&self, id: impl Display) -> Result<DeskObject, DeskError> {
        self.session.fetch_object(&self.item_path(id))
    }

    /// Update a single item with the given fields (HTTP PATCH).
    pub fn update(&self, id: impl Display, fields: &Fields) -> Result<DeskObject, DeskError> {
        let path = self.item_path(id);
        let res = self.session.patch(&path, fields)?;
        self.session.updated_object(res, &path)
    }

    /// Replace a single item with the given fields (HTTP PUT).
    pub fn replace(&self, id: impl Display, fields: &Fields) -> Result<DeskObject, DeskError> {
        let path = self.item_path(id);
        let res = self.session.put(&path, fields)?;
        self.session.updated_object(res, &path)
    }

    fn item_path(&self, id: impl Display) -> String {
        format!("{}/{}", self.path.trim_end_matches('/'), id)
    }

    /// Raw entries of this collection, fetched lazily page by page.
    pub fn entries(&self) -> Entries {
        Entries::new(self.session.clone(), self.path.clone())
    }

    /// Items of this collection, fetched lazily page by page and not cached.
    pub fn walk(&self) -> impl Iterator<Item = Result<DeskObject, DeskError>> + '_ {
        self.entries()
            .map(move |entry| self.session.object_for(entry?))
    }

    /// Items of this collection which have at least one translation marked
    /// `outdated`, fetched lazily like [Collection::walk]. Each item's
    /// translations are requested as it is reached.
    pub fn untranslated(&self) -> impl Iterator<Item = Result<DeskObject, DeskError>> + '_ {
        self.walk().filter_map(|item| {
            let outdated = item.as_ref().map_or(Ok(true), has_outdated_translation);
            match outdated {
                Ok(true) => Some(item),
                Ok(false) => None,
                Err(e) => Some(Err(e)),
            }
        })
    }
}

/// Whether any translation of `object` is marked `outdated`. Objects without
/// a `translations` relation have none.
fn has_outdated_translation(object: &DeskObject) -> Result<bool, DeskError> {
    let outdated = |t: &DeskObject| t.get_bool("outdated").unwrap_or(false);
    match object.related("translations") {
        None => Ok(false),
        Some(AnyCollection::List(mut list)) => Ok(list.items()?.iter().any(outdated)),
        Some(AnyCollection::Translations(mut translations)) => {
            Ok(translations.items()?.values().any(outdated))
        }
    }
}
