//! Client for the desk.com API v2.
//!
//! ```no_run
//! use deskapi::types::{SiteUrl, Username};
//! use deskapi::Api;
//!
//! # fn main() -> Result<(), deskapi::errors::DeskError> {
//! let url = SiteUrl::for_site("example").unwrap();
//! let api = Api::connect(url, &Username::new("me@example.com".to_string()), "secret")?;
//! let mut articles = api.articles()?;
//! let mut article = articles.at(0)?.clone();
//! article.set_field("subject", "New subject");
//! article.save()?;
//! # Ok(())
//! # }
//! ```

mod client;
pub mod collection;
mod constants;
pub mod errors;
pub mod models;
mod pagination;
pub mod types;

pub use client::api::Api;
pub use client::registry::{CollectionCtor, ObjectCtor, Registry};
pub use client::session::{Session, SessionBuilder};
pub use client::signer::{OAuthCredentials, RequestSigner};
pub use collection::{AnyCollection, Collection, CollectionKind, TranslationCollection};
pub use models::{DeskObject, Fields, Link, Links};
pub use pagination::Entries;
pub use reqwest;
