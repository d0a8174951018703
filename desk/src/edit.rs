use color_eyre::eyre::{bail, Result};
use deskapi::{Api, Fields};
use log::warn;
use serde_json::Value;

use crate::credentials::split_assignment;

pub fn create_topic(
    api: Api,
    name: String,
    allow_questions: bool,
    in_support_center: bool,
) -> Result<()> {
    let mut fields = Fields::new();
    fields.insert("name".to_string(), name.into());
    fields.insert("allow_questions".to_string(), allow_questions.into());
    fields.insert("in_support_center".to_string(), in_support_center.into());
    let topic = api.topics()?.create(fields)?;
    println!("{}", topic.api_href());
    Ok(())
}

/// Fetch an object, change the given fields and save it.
pub fn set(api: Api, href: &str, assignments: &[String]) -> Result<()> {
    let mut object = api.session().fetch_object(href)?;
    for (name, value) in parse_assignments(assignments)? {
        object.set_field(name, value);
    }
    let saved = object.save()?;
    println!("{}", serde_json::to_string_pretty(saved.entry())?);
    Ok(())
}

/// Parse `name=value` arguments. A value which is valid JSON is used as
/// such, anything else is a string.
fn parse_assignments(assignments: &[String]) -> Result<Vec<(String, Value)>> {
    let mut parsed = Vec::with_capacity(assignments.len());
    for assignment in assignments {
        let (name, value) = split_assignment(assignment)?;
        if name.starts_with('_') {
            bail!("Cannot set \"{}\": fields starting with _ are not sent", name);
        }
        let value = serde_json::from_str(value).unwrap_or_else(|_| {
            warn!("{} is not JSON, setting it as a string", value);
            Value::String(value.to_string())
        });
        parsed.push((name.to_string(), value));
    }
    Ok(parsed)
}
