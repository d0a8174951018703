use aliri_braid::braid;

/// A hypermedia link target as given by the API, e.g. `/api/v2/articles/1`
/// or `/api/v2/articles?page=2&per_page=50`.
#[braid(serde)]
pub struct ApiHref;

/// Value of a link's `class` attribute, e.g. `article` or `topic_translation`.
#[braid(serde)]
pub struct ClassName;

/// desk.com account username, for basic authentication.
#[braid(serde)]
pub struct Username;
