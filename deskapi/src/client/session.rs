use super::registry::Registry;
use super::signer::RequestSigner;
use crate::collection::AnyCollection;
use crate::constants::API_PREFIX;
use crate::errors::{check, DeskError};
use crate::models::{DeskObject, Fields, Link};
use crate::types::{SiteUrl, Username};
use base64::Engine;
use log::{debug, trace};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// A connection to a desk.com site.
///
/// [Session] is cheap to clone: clones share the same HTTP client, credentials
/// and [Registry]. Every [crate::Collection] and [DeskObject] holds a clone
/// of the session which created it so that it can make further requests.
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    client: reqwest::blocking::Client,
    url: SiteUrl,
    signer: Option<Box<dyn RequestSigner>>,
    registry: Registry,
}

pub struct SessionBuilder {
    url: SiteUrl,
    headers: HeaderMap,
    signer: Option<Box<dyn RequestSigner>>,
    registry: Registry,
}

impl SessionBuilder {
    fn new(url: SiteUrl) -> Self {
        Self {
            url,
            headers: json_headers(),
            signer: None,
            registry: Registry::default(),
        }
    }

    /// Send the given username and password with every request.
    pub fn basic_auth(mut self, username: &Username, password: &str) -> Result<Self, DeskError> {
        self.headers
            .insert(AUTHORIZATION, basic_auth_header(username, password)?);
        Ok(self)
    }

    /// Sign every request with the given [RequestSigner].
    pub fn signer(self, signer: impl RequestSigner + 'static) -> Self {
        Self {
            signer: Some(Box::new(signer)),
            ..self
        }
    }

    /// Use a custom table of object and collection constructors.
    pub fn registry(self, registry: Registry) -> Self {
        Self { registry, ..self }
    }

    pub fn build(self) -> Result<Session, DeskError> {
        let client = reqwest::blocking::ClientBuilder::new()
            .default_headers(self.headers)
            .build()?;
        let inner = SessionInner {
            client,
            url: self.url,
            signer: self.signer,
            registry: self.registry,
        };
        Ok(Session {
            inner: Arc::new(inner),
        })
    }
}

fn json_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers
}

fn basic_auth_header(username: &Username, password: &str) -> Result<HeaderValue, DeskError> {
    let credentials = format!("{}:{}", username, password);
    let encoded = base64::engine::general_purpose::STANDARD.encode(credentials);
    let mut value = HeaderValue::from_str(&format!("Basic {}", encoded))?;
    value.set_sensitive(true);
    Ok(value)
}

/// Resource names are relative to the API root, anything starting with `/`
/// (e.g. hrefs from `_links`) is used as-is.
pub(crate) fn api_path(path: &str) -> Cow<'_, str> {
    if path.starts_with('/') {
        Cow::Borrowed(path)
    } else {
        Cow::Owned(format!("{}{}", API_PREFIX, path))
    }
}

impl Session {
    /// Create a session builder for the given site.
    pub fn builder(url: SiteUrl) -> SessionBuilder {
        SessionBuilder::new(url)
    }

    /// Base URL of the site.
    pub fn url(&self) -> &SiteUrl {
        &self.inner.url
    }

    pub fn registry(&self) -> &Registry {
        &self.inner.registry
    }

    /// Make a request to the API and decode its JSON response.
    ///
    /// `path` is either a resource name such as `"topics"`, which is requested
    /// under `/api/v2/`, or an absolute path such as a link's href.
    /// `data` is sent as the JSON request body. An empty response body is
    /// returned as [Value::Null].
    pub fn request(
        &self,
        method: Method,
        path: &str,
        params: &[(&str, &str)],
        data: Option<&Fields>,
    ) -> Result<Value, DeskError> {
        let url = format!("{}{}", self.inner.url, api_path(path));
        debug!("{} {}", method, url);
        let mut req = self.inner.client.request(method.clone(), &url);
        if !params.is_empty() {
            req = req.query(params);
        }
        if let Some(data) = data {
            req = req.body(serde_json::to_string(data).map_err(DeskError::Encode)?);
        }
        if let Some(signer) = &self.inner.signer {
            req = req.header(AUTHORIZATION, signer.authorization(&method, &url)?);
        }
        let res = check(req.send()?)?;
        let text = res.text()?;
        trace!("{} {} returned {} bytes", method, url, text.len());
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|source| DeskError::Decode { url, source })
    }

    pub fn get(&self, path: &str) -> Result<Value, DeskError> {
        self.request(Method::GET, path, &[], None)
    }

    pub fn get_with_params(&self, path: &str, params: &[(&str, &str)]) -> Result<Value, DeskError> {
        self.request(Method::GET, path, params, None)
    }

    pub fn post(&self, path: &str, data: &Fields) -> Result<Value, DeskError> {
        self.request(Method::POST, path, &[], Some(data))
    }

    pub fn patch(&self, path: &str, data: &Fields) -> Result<Value, DeskError> {
        self.request(Method::PATCH, path, &[], Some(data))
    }

    pub fn put(&self, path: &str, data: &Fields) -> Result<Value, DeskError> {
        self.request(Method::PUT, path, &[], Some(data))
    }

    // ==================================================
    //                 FACTORIES
    // ==================================================

    /// Wrap an entry using the constructor registered for its `_links.self.class`,
    /// or as a plain [DeskObject] if there is none.
    pub fn object_for(&self, entry: Value) -> Result<DeskObject, DeskError> {
        let entry = match entry {
            Value::Object(fields) => fields,
            other => return Err(DeskError::NotAnEntry(other.to_string())),
        };
        let class = entry
            .get("_links")
            .and_then(|links| links.get("self"))
            .and_then(|link| link.get("class"))
            .and_then(Value::as_str);
        match class.and_then(|c| self.inner.registry.object(c)) {
            Some(ctor) => ctor(self.clone(), entry),
            None => DeskObject::new(self.clone(), entry),
        }
    }

    /// Create the collection for a link using the constructor registered for its
    /// `class`, or a plain [crate::Collection] if there is none.
    pub fn collection_for(&self, link: &Link) -> AnyCollection {
        let href = link.href.to_string();
        let ctor = link
            .class
            .as_ref()
            .and_then(|c| self.inner.registry.collection(c.as_str()));
        match ctor {
            Some(ctor) => ctor(self.clone(), href),
            None => AnyCollection::List(crate::Collection::new(self.clone(), href)),
        }
    }

    /// Get a single entry and wrap it using [Session::object_for].
    pub fn fetch_object(&self, path: &str) -> Result<DeskObject, DeskError> {
        self.object_for(self.get(path)?)
    }

    /// Wrap the response of an update to `path`. Updates answered without a
    /// body (e.g. 204) are followed by a GET of `path`.
    pub(crate) fn updated_object(&self, res: Value, path: &str) -> Result<DeskObject, DeskError> {
        if res.is_null() {
            debug!("{} returned no entry, fetching it", path);
            self.fetch_object(path)
        } else {
            self.object_for(res)
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("url", &self.inner.url)
            .field("signed", &self.inner.signer.is_some())
            .finish_non_exhaustive()
    }
}
