/// Primitive desk.com API data types and NewType-patterns.
mod ids;
mod site_url;
mod strings;

pub use ids::*;
pub use site_url::*;
pub use strings::*;
