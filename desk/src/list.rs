use clap::Args;
use color_eyre::eyre::Result;
use deskapi::errors::DeskError;
use deskapi::{Api, DeskObject};
use itertools::Itertools;

#[derive(Args)]
pub struct ListArgs {
    /// Do not print a header row
    #[clap(long)]
    no_header: bool,

    /// Stop after this many rows
    #[clap(short, long)]
    limit: Option<usize>,
}

pub fn topics(api: Api, args: ListArgs) -> Result<()> {
    let topics = api.topics()?;
    print_rows(
        topics.walk(),
        &["id", "name", "in_support_center"],
        &args,
    )
}

pub fn articles(api: Api, args: ListArgs) -> Result<()> {
    let articles = api.articles()?;
    print_rows(articles.walk(), &["id", "subject"], &args)
}

/// Print the locale and `self` href of every translation of an object.
pub fn translations(api: Api, href: &str) -> Result<()> {
    let object = api.session().fetch_object(href)?;
    let mut translations = object.translations()?.into_translations()?;
    for (locale, translation) in translations.items()? {
        println!("{}\t{}", locale, translation.api_href());
    }
    Ok(())
}

/// Print objects as tab-separated rows, requesting pages as they are needed.
fn print_rows(
    objects: impl Iterator<Item = Result<DeskObject, DeskError>>,
    columns: &[&str],
    args: &ListArgs,
) -> Result<()> {
    if !args.no_header {
        println!("{}", columns.iter().join("\t"));
    }
    for object in objects.take(args.limit.unwrap_or(usize::MAX)) {
        println!("{}", row(&object?, columns));
    }
    Ok(())
}

fn row(object: &DeskObject, columns: &[&str]) -> String {
    columns.iter().map(|column| cell(object, column)).join("\t")
}

/// A field as text. `id` is taken from the `self` href.
fn cell(object: &DeskObject, column: &str) -> String {
    if column == "id" {
        return object
            .id()
            .map(|id| id.to_string())
            .unwrap_or_default();
    }
    match object.get_field(column) {
        Ok(serde_json::Value::String(s)) => s.to_string(),
        Ok(serde_json::Value::Null) | Err(_) => String::new(),
        Ok(other) => other.to_string(),
    }
}
