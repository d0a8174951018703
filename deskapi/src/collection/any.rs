use super::{Collection, TranslationCollection};
use crate::errors::DeskError;
use crate::models::{DeskObject, Fields};
use crate::types::ApiHref;

/// Either kind of collection, as produced by [crate::Session::collection_for].
#[derive(Debug, Clone)]
pub enum AnyCollection {
    List(Collection),
    Translations(TranslationCollection),
}

impl AnyCollection {
    pub fn path(&self) -> &str {
        match self {
            Self::List(c) => c.path(),
            Self::Translations(c) => c.path(),
        }
    }

    pub fn len(&mut self) -> Result<usize, DeskError> {
        match self {
            Self::List(c) => c.len(),
            Self::Translations(c) => c.len(),
        }
    }

    pub fn is_empty(&mut self) -> Result<bool, DeskError> {
        self.len().map(|len| len == 0)
    }

    pub fn api_href(&mut self) -> Result<&ApiHref, DeskError> {
        match self {
            Self::List(c) => c.api_href(),
            Self::Translations(c) => c.api_href(),
        }
    }

    pub fn create(&self, fields: Fields) -> Result<DeskObject, DeskError> {
        match self {
            Self::List(c) => c.create(fields),
            Self::Translations(c) => c.create(fields),
        }
    }

    /// Get the list collection, failing if this is a translation collection.
    pub fn into_list(self) -> Result<Collection, DeskError> {
        match self {
            Self::List(c) => Ok(c),
            Self::Translations(c) => Err(kind_error(c.path(), "list")),
        }
    }

    /// Get the translation collection, failing if this is a list collection.
    pub fn into_translations(self) -> Result<TranslationCollection, DeskError> {
        match self {
            Self::Translations(c) => Ok(c),
            Self::List(c) => Err(kind_error(c.path(), "translation")),
        }
    }
}

fn kind_error(href: &str, expected: &'static str) -> DeskError {
    DeskError::CollectionKind {
        href: href.to_string(),
        expected,
    }
}
