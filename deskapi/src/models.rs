//! Representations of data from desk.com.
//!
//! Entries are kept as JSON maps rather than typed structs: the set of fields
//! differs between topics, articles and translations, and only the fields a
//! caller changes are ever sent back (see [DeskObject::save]).

pub mod links;
pub mod object;

pub use links::*;
pub use object::*;

/// A JSON object, i.e. the fields of an entry or the body of a create/update request.
pub type Fields = serde_json::Map<String, serde_json::Value>;
