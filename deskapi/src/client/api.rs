use crate::collection::Collection;
use crate::errors::DeskError;
use crate::models::Link;
use crate::types::{SiteUrl, Username};
use crate::Session;

/// Entry point to the desk.com API v2.
#[derive(Debug, Clone)]
pub struct Api {
    session: Session,
}

impl Api {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    /// Connect to a site using basic authentication.
    pub fn connect(url: SiteUrl, username: &Username, password: &str) -> Result<Self, DeskError> {
        let session = Session::builder(url).basic_auth(username, password)?.build()?;
        Ok(Self::new(session))
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// All topics.
    pub fn topics(&self) -> Result<Collection, DeskError> {
        self.top_level("topics", "topic")
    }

    /// All articles.
    pub fn articles(&self) -> Result<Collection, DeskError> {
        self.top_level("articles", "article")
    }

    fn top_level(&self, path: &str, class: &str) -> Result<Collection, DeskError> {
        self.session
            .collection_for(&Link::new(path, Some(class)))
            .into_list()
    }
}
