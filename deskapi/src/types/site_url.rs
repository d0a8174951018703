//! NewType for the base URL of a desk.com site.

use crate::errors::InvalidSiteUrl;
use aliri_braid::braid;

/// A [SiteUrl] is the scheme and host of a desk.com site, e.g.
/// `https://eventbrite.desk.com`. API paths are appended to it.
#[braid(validator, serde)]
pub struct SiteUrl(String);

impl aliri_braid::Validator for SiteUrl {
    type Error = InvalidSiteUrl;

    fn validate(s: &str) -> Result<(), Self::Error> {
        if !(s.starts_with("http://") || s.starts_with("https://")) {
            Err(InvalidSiteUrl::Protocol(s.to_string()))
        } else if s.ends_with('/') {
            Err(InvalidSiteUrl::TrailingSlash(s.to_string()))
        } else {
            Ok(())
        }
    }
}

impl SiteUrl {
    /// URL of the hosted site with the given name: `https://{site}.desk.com`
    pub fn for_site(site: &str) -> Result<Self, InvalidSiteUrl> {
        Self::new(format!("https://{}.desk.com", site))
    }
}
