use super::{CacheState, Collection};
use crate::errors::DeskError;
use crate::models::{DeskObject, Fields};
use crate::types::ApiHref;
use crate::Session;
use std::collections::BTreeMap;

/// Translations of a topic or article, keyed by locale (e.g. `"en_us"`, `"es"`).
#[derive(Debug, Clone)]
pub struct TranslationCollection {
    inner: Collection,
    by_locale: CacheState<BTreeMap<String, DeskObject>>,
}

impl TranslationCollection {
    pub fn new(session: Session, path: impl Into<String>) -> Self {
        Self {
            inner: Collection::new(session, path),
            by_locale: CacheState::unfetched(),
        }
    }

    pub fn path(&self) -> &str {
        self.inner.path()
    }

    pub fn is_fetched(&self) -> bool {
        self.by_locale.is_fetched()
    }

    /// All translations by their `locale` field. Fetched once, the first time
    /// this is called. If two translations have the same locale, the later one wins.
    pub fn items(&mut self) -> Result<&BTreeMap<String, DeskObject>, DeskError> {
        let by_locale = match self.by_locale.take() {
            Some(by_locale) => by_locale,
            None => self
                .inner
                .fetch_all()?
                .into_iter()
                .map(|t| Ok((t.get_str("locale")?.to_string(), t)))
                .collect::<Result<BTreeMap<_, _>, DeskError>>()?,
        };
        Ok(self.by_locale.fill(by_locale))
    }

    /// Number of distinct locales.
    pub fn len(&mut self) -> Result<usize, DeskError> {
        self.items().map(BTreeMap::len)
    }

    pub fn is_empty(&mut self) -> Result<bool, DeskError> {
        self.len().map(|len| len == 0)
    }

    pub fn contains(&mut self, locale: &str) -> Result<bool, DeskError> {
        self.items().map(|items| items.contains_key(locale))
    }

    pub fn get(&mut self, locale: &str) -> Result<&DeskObject, DeskError> {
        self.items()?
            .get(locale)
            .ok_or_else(|| DeskError::UnknownLocale(locale.to_string()))
    }

    /// Locales which have a translation.
    pub fn locales(&mut self) -> Result<Vec<&str>, DeskError> {
        self.items()
            .map(|items| items.keys().map(String::as_str).collect())
    }

    /// The href which the server gave for this collection. Fetches the collection if needed.
    pub fn api_href(&mut self) -> Result<&ApiHref, DeskError> {
        self.items()?;
        self.inner
            .declared_href()
            .ok_or_else(|| DeskError::MissingLink("self".to_string()))
    }

    /// Create a translation. `fields` should include `locale`.
    pub fn create(&self, fields: Fields) -> Result<DeskObject, DeskError> {
        self.inner.create(fields)
    }

    /// Get a single translation directly, e.g. `GET /api/v2/articles/1/translations/es`.
    pub fn by_locale(&self, locale: &str) -> Result<DeskObject, DeskError> {
        self.inner.by_id(locale)
    }

    /// Change some fields of the translation for `locale` (HTTP PATCH).
    pub fn update(&self, locale: &str, fields: &Fields) -> Result<DeskObject, DeskError> {
        self.inner.update(locale, fields)
    }

    /// Replace the translation for `locale` (HTTP PUT). The body always
    /// carries `locale`, unless `fields` gives one itself.
    pub fn replace(&self, locale: &str, fields: &Fields) -> Result<DeskObject, DeskError> {
        let mut body = Fields::new();
        body.insert("locale".to_string(), locale.into());
        body.extend(fields.clone());
        self.inner.replace(locale, &body)
    }
}
