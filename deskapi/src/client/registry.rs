//! Table of constructors used by [crate::Session::object_for] and
//! [crate::Session::collection_for], keyed by the `class` attribute of links.

use crate::collection::{AnyCollection, Collection, TranslationCollection};
use crate::errors::DeskError;
use crate::models::{DeskObject, Fields};
use crate::Session;
use std::collections::HashMap;

/// Constructor for an entry whose `_links.self.class` was registered.
pub type ObjectCtor = fn(Session, Fields) -> Result<DeskObject, DeskError>;

/// Constructor for a collection at the given path whose link `class` was registered.
pub type CollectionCtor = fn(Session, String) -> AnyCollection;

#[derive(Clone)]
pub struct Registry {
    objects: HashMap<String, ObjectCtor>,
    collections: HashMap<String, CollectionCtor>,
}

impl Registry {
    /// A registry without any classes, i.e. everything is a plain
    /// [DeskObject] or [Collection].
    pub fn empty() -> Self {
        Self {
            objects: HashMap::new(),
            collections: HashMap::new(),
        }
    }

    /// Register an entry constructor. Replaces any previous one for `class`.
    pub fn register_object(&mut self, class: impl Into<String>, ctor: ObjectCtor) -> &mut Self {
        self.objects.insert(class.into(), ctor);
        self
    }

    /// Register a collection constructor. Replaces any previous one for `class`.
    pub fn register_collection(
        &mut self,
        class: impl Into<String>,
        ctor: CollectionCtor,
    ) -> &mut Self {
        self.collections.insert(class.into(), ctor);
        self
    }

    pub fn object(&self, class: &str) -> Option<ObjectCtor> {
        self.objects.get(class).copied()
    }

    pub fn collection(&self, class: &str) -> Option<CollectionCtor> {
        self.collections.get(class).copied()
    }
}

/// The desk.com classes: topic collections fill in default fields on creation,
/// translation collections are keyed by locale.
impl Default for Registry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry
            .register_collection("topic", |session, path| {
                AnyCollection::List(Collection::topics(session, path))
            })
            .register_collection("article_translation", translations)
            .register_collection("topic_translation", translations);
        registry
    }
}

fn translations(session: Session, path: String) -> AnyCollection {
    AnyCollection::Translations(TranslationCollection::new(session, path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case("topic")]
    #[case("article_translation")]
    #[case("topic_translation")]
    fn test_default_collections(#[case] class: &str) {
        assert!(Registry::default().collection(class).is_some())
    }

    #[rstest]
    #[case("article")]
    #[case("page")]
    fn test_unregistered(#[case] class: &str) {
        let registry = Registry::default();
        assert!(registry.collection(class).is_none());
        assert!(registry.object(class).is_none());
    }

    #[test]
    fn test_empty() {
        assert!(Registry::empty().collection("topic").is_none())
    }
}
