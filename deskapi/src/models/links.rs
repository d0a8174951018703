//! Hypermedia links, i.e. the `_links` block of every entry and page.

use crate::types::{ApiHref, ClassName};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A `{href, class?}` pair pointing to a related or paginated resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub href: ApiHref,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<ClassName>,
}

impl Link {
    pub fn new(href: impl Into<String>, class: Option<&str>) -> Self {
        Self {
            href: ApiHref::new(href.into()),
            class: class.map(|c| ClassName::new(c.to_string())),
        }
    }
}

/// Relation name to [Link]. Relations may be present but `null`, e.g. `"next": null`
/// on the last page of a collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Links(BTreeMap<String, Option<Link>>);

impl Links {
    /// Get the link for a relation, treating `null` the same as absent.
    pub fn get(&self, rel: &str) -> Option<&Link> {
        self.0.get(rel).and_then(Option::as_ref)
    }

    pub fn self_link(&self) -> Option<&Link> {
        self.get("self")
    }

    pub fn next(&self) -> Option<&Link> {
        self.get("next")
    }

    /// Names of relations which have a link.
    pub fn relations(&self) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .filter(|(_, link)| link.is_some())
            .map(|(rel, _)| rel.as_str())
    }
}
