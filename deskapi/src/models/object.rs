//! [DeskObject] is a client to a single desk.com entity.

use super::{Fields, Link, Links};
use crate::collection::AnyCollection;
use crate::errors::DeskError;
use crate::types::{ApiHref, ClassName, EntryId};
use crate::Session;
use serde_json::Value;

/// Field names starting with this are local to the [DeskObject] and never sent to desk.com.
const INTERNAL_MARKER: char = '_';

/// A fetched entry together with the session it came from.
///
/// Fields are read with [DeskObject::get_field] and changed with
/// [DeskObject::set_field]. Changes are remembered so that [DeskObject::save]
/// sends only the fields which were touched. Saving does not modify the
/// object, instead a new [DeskObject] is created from the response.
#[derive(Debug, Clone)]
pub struct DeskObject {
    session: Session,
    entry: Fields,
    links: Links,
    self_link: Link,
    changed: Fields,
    local: Fields,
}

impl DeskObject {
    /// Wrap an entry. The entry must have a `_links` block with a `self` link.
    pub fn new(session: Session, entry: Fields) -> Result<Self, DeskError> {
        let links = match entry.get("_links") {
            Some(value) => serde_json::from_value::<Links>(value.clone())
                .map_err(|_| DeskError::NotAnEntry(Value::Object(entry.clone()).to_string()))?,
            None => return Err(DeskError::MissingField("_links".to_string())),
        };
        let self_link = links
            .self_link()
            .cloned()
            .ok_or_else(|| DeskError::MissingLink("self".to_string()))?;
        Ok(Self {
            session,
            entry,
            links,
            self_link,
            changed: Fields::new(),
            local: Fields::new(),
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The entry as it is known locally, including changes.
    pub fn entry(&self) -> &Fields {
        &self.entry
    }

    pub fn links(&self) -> &Links {
        &self.links
    }

    /// Fields set since this object was created.
    pub fn changed_fields(&self) -> &Fields {
        &self.changed
    }

    /// The `class` of this entry's `self` link.
    pub fn class(&self) -> Option<&ClassName> {
        self.self_link().class.as_ref()
    }

    fn self_link(&self) -> &Link {
        &self.self_link
    }

    /// API href of this entity.
    pub fn api_href(&self) -> &ApiHref {
        &self.self_link().href
    }

    /// The numeric ID of this entity, which is the last segment of its href.
    pub fn id(&self) -> Result<EntryId, DeskError> {
        let href = self.api_href().as_str();
        href.trim_end_matches('/')
            .rsplit('/')
            .next()
            .and_then(|segment| segment.parse().ok())
            .map(EntryId)
            .ok_or_else(|| DeskError::InvalidId(href.to_string()))
    }

    // ==================================================
    //                 FIELDS
    // ==================================================

    pub fn get_field(&self, name: &str) -> Result<&Value, DeskError> {
        let fields = if name.starts_with(INTERNAL_MARKER) && self.local.contains_key(name) {
            &self.local
        } else {
            &self.entry
        };
        fields
            .get(name)
            .ok_or_else(|| DeskError::MissingField(name.to_string()))
    }

    pub fn get_str(&self, name: &str) -> Result<&str, DeskError> {
        self.get_field(name)?
            .as_str()
            .ok_or_else(|| field_type(name, "string"))
    }

    pub fn get_bool(&self, name: &str) -> Result<bool, DeskError> {
        self.get_field(name)?
            .as_bool()
            .ok_or_else(|| field_type(name, "boolean"))
    }

    pub fn get_i64(&self, name: &str) -> Result<i64, DeskError> {
        self.get_field(name)?
            .as_i64()
            .ok_or_else(|| field_type(name, "integer"))
    }

    /// Set a field. It will be sent by the next [DeskObject::save].
    ///
    /// Names starting with `_` are kept on this object only.
    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        if name.starts_with(INTERNAL_MARKER) {
            self.local.insert(name, value);
        } else {
            self.entry.insert(name.clone(), value.clone());
            self.changed.insert(name, value);
        }
    }

    // ==================================================
    //                 UPDATES
    // ==================================================

    /// PATCH the given fields, returning the updated entity. If the server
    /// answers without a body, the entity is fetched again.
    pub fn update(&self, fields: &Fields) -> Result<DeskObject, DeskError> {
        let path = self.api_href().as_str();
        let res = self.session.patch(path, fields)?;
        self.session.updated_object(res, path)
    }

    /// Send the changed fields, returning the updated entity.
    pub fn save(&self) -> Result<DeskObject, DeskError> {
        self.update(&self.changed)
    }

    // ==================================================
    //                 RELATIONS
    // ==================================================

    /// Collection for a relation in `_links`, if this entry has it.
    pub fn related(&self, rel: &str) -> Option<AnyCollection> {
        self.links
            .get(rel)
            .map(|link| self.session.collection_for(link))
    }

    /// Translations of this topic or article.
    pub fn translations(&self) -> Result<AnyCollection, DeskError> {
        self.related("translations")
            .ok_or_else(|| DeskError::MissingLink("translations".to_string()))
    }

    /// Articles of this topic.
    pub fn articles(&self) -> Option<AnyCollection> {
        self.related("articles")
    }
}

fn field_type(field: &str, expected: &'static str) -> DeskError {
    DeskError::FieldType {
        field: field.to_string(),
        expected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SiteUrl;
    use rstest::*;
    use serde_json::json;

    #[fixture]
    fn session() -> Session {
        Session::builder(SiteUrl::for_site("testing").unwrap())
            .build()
            .unwrap()
    }

    fn entry(value: Value) -> Fields {
        match value {
            Value::Object(fields) => fields,
            _ => panic!("not an object"),
        }
    }

    #[fixture]
    fn article(session: Session) -> DeskObject {
        let fields = entry(json!({
            "subject": "Hello",
            "in_support_center": true,
            "position": 3,
            "_links": {
                "self": {"href": "/api/v2/articles/42", "class": "article"},
                "translations": {"href": "/api/v2/articles/42/translations", "class": "article_translation"},
                "topic": null
            }
        }));
        DeskObject::new(session, fields).unwrap()
    }

    #[rstest]
    fn test_read_fields(article: DeskObject) {
        assert_eq!(article.get_field("subject").unwrap(), "Hello");
        assert_eq!(article.get_str("subject").unwrap(), "Hello");
        assert!(article.get_bool("in_support_center").unwrap());
        assert_eq!(article.get_i64("position").unwrap(), 3);
        assert!(article.changed_fields().is_empty());
    }

    #[rstest]
    fn test_missing_field(article: DeskObject) {
        assert!(matches!(
            article.get_field("body").unwrap_err(),
            DeskError::MissingField(name) if name == "body"
        ));
    }

    #[rstest]
    fn test_wrong_type(article: DeskObject) {
        assert!(matches!(
            article.get_bool("subject").unwrap_err(),
            DeskError::FieldType { expected: "boolean", .. }
        ));
    }

    #[rstest]
    fn test_set_field_is_tracked(mut article: DeskObject) {
        article.set_field("subject", "Goodbye");
        article.set_field("body", "New body");
        assert_eq!(article.get_str("subject").unwrap(), "Goodbye");
        assert_eq!(
            Value::Object(article.changed_fields().clone()),
            json!({"subject": "Goodbye", "body": "New body"})
        );
    }

    #[rstest]
    fn test_internal_field_is_not_tracked(mut article: DeskObject) {
        article.set_field("_note", "local only");
        assert_eq!(article.get_str("_note").unwrap(), "local only");
        assert!(article.changed_fields().is_empty());
        assert!(!article.entry().contains_key("_note"));
    }

    #[rstest]
    fn test_internal_field_falls_back_to_entry(article: DeskObject) {
        assert!(article.get_field("_links").unwrap().is_object());
    }

    #[rstest]
    fn test_href_and_id(article: DeskObject) {
        assert_eq!(article.api_href().as_str(), "/api/v2/articles/42");
        assert_eq!(article.id().unwrap(), EntryId(42));
        assert_eq!(article.class().map(|c| c.as_str()), Some("article"));
    }

    #[rstest]
    #[case("/api/v2/articles/42/translations/es")]
    #[case("/api/v2/articles")]
    fn test_invalid_id(session: Session, #[case] href: &str) {
        let fields = entry(json!({"_links": {"self": {"href": href}}}));
        let object = DeskObject::new(session, fields).unwrap();
        assert!(matches!(object.id().unwrap_err(), DeskError::InvalidId(_)));
    }

    #[rstest]
    fn test_relations(article: DeskObject) {
        assert!(article.articles().is_none());
        assert!(article.related("topic").is_none());
        let translations = article.translations().unwrap();
        assert_eq!(translations.path(), "/api/v2/articles/42/translations");
        assert!(matches!(translations, AnyCollection::Translations(_)));
    }

    #[rstest]
    fn test_requires_self_link(session: Session) {
        let fields = entry(json!({"subject": "x", "_links": {"translations": null}}));
        assert!(matches!(
            DeskObject::new(session.clone(), fields).unwrap_err(),
            DeskError::MissingLink(rel) if rel == "self"
        ));
        let fields = entry(json!({"subject": "x"}));
        assert!(matches!(
            DeskObject::new(session, fields).unwrap_err(),
            DeskError::MissingField(name) if name == "_links"
        ));
    }
}
