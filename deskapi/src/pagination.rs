//! Helpers for pagination.

use crate::errors::DeskError;
use crate::models::Links;
use crate::Session;
use log::trace;
use serde::Deserialize;
use serde_json::Value;

/// One page of a collection, e.g. the response of `GET /api/v2/articles`.
#[derive(Debug, Deserialize)]
pub(crate) struct Page {
    #[serde(rename = "_links")]
    pub links: Option<Links>,
    #[serde(rename = "_embedded")]
    pub embedded: Option<Embedded>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Embedded {
    #[serde(default)]
    pub entries: Vec<Value>,
}

impl Page {
    fn decode(path: &str, value: Value) -> Result<Self, DeskError> {
        serde_json::from_value(value).map_err(|source| DeskError::Decode {
            url: path.to_string(),
            source,
        })
    }

    fn next_href(&self) -> Option<String> {
        self.links
            .as_ref()
            .and_then(Links::next)
            .map(|link| link.href.to_string())
    }
}

/// Produces the raw entries of a collection, page by page. Pages are requested
/// as the iterator is advanced, following each page's `next` link verbatim.
///
/// Iteration stops after a page without entries, after a page without a `next`
/// link, or after the first error. An [Entries] cannot be restarted.
pub struct Entries {
    session: Session,
    next_path: Option<String>,
    buffer: std::vec::IntoIter<Value>,
    links: Option<Links>,
}

impl Entries {
    pub(crate) fn new(session: Session, path: impl Into<String>) -> Self {
        Self {
            session,
            next_path: Some(path.into()),
            buffer: Vec::new().into_iter(),
            links: None,
        }
    }

    /// The `_links` of the first page which had any, once it has been fetched.
    pub fn links(&self) -> Option<&Links> {
        self.links.as_ref()
    }

    pub(crate) fn into_links(self) -> Option<Links> {
        self.links
    }

    fn fetch(&mut self, path: &str) -> Result<Page, DeskError> {
        let page = Page::decode(path, self.session.get(path)?)?;
        if self.links.is_none() {
            self.links = page.links.clone();
        }
        Ok(page)
    }
}

impl Iterator for Entries {
    type Item = Result<Value, DeskError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.buffer.next() {
                return Some(Ok(entry));
            }
            let path = self.next_path.take()?;
            let page = match self.fetch(&path) {
                Ok(page) => page,
                Err(e) => return Some(Err(e)),
            };
            let entries = page.embedded.as_ref().map_or(0, |e| e.entries.len());
            trace!("{} has {} entries", path, entries);
            if entries == 0 {
                return None;
            }
            self.next_path = page.next_href();
            self.buffer = page.embedded.unwrap_or_default().entries.into_iter();
        }
    }
}

impl std::iter::FusedIterator for Entries {}
