#![allow(dead_code)]

use deskapi::types::SiteUrl;
use deskapi::{Fields, Session};
use httpmock::prelude::*;
use httpmock::Mock;
use serde_json::{json, Value};

pub type AnyResult = Result<(), Box<dyn std::error::Error>>;

pub const NUM_ARTICLES: usize = 75;
pub const PER_PAGE: usize = 50;

/// A session for the mock server, without credentials.
pub fn session(server: &MockServer) -> Session {
    Session::builder(SiteUrl::try_from(server.base_url()).unwrap())
        .build()
        .unwrap()
}

pub fn fields(value: Value) -> Fields {
    match value {
        Value::Object(fields) => fields,
        other => panic!("not an object: {}", other),
    }
}

/// An article entry, numbered from 1.
pub fn article(index: usize) -> Value {
    json!({
        "subject": format!("Article {}", index),
        "body": format!("<p>Body of article {}</p>", index),
        "in_support_center": true,
        "position": index,
        "_links": {
            "self": {"href": format!("/api/v2/articles/{}", index), "class": "article"},
            "topic": {"href": "/api/v2/topics/1", "class": "topic"},
            "translations": {
                "href": format!("/api/v2/articles/{}/translations", index),
                "class": "article_translation"
            }
        }
    })
}

pub fn translation(article: usize, locale: &str) -> Value {
    json!({
        "locale": locale,
        "subject": format!("Article {} ({})", article, locale),
        "outdated": false,
        "_links": {
            "self": {
                "href": format!("/api/v2/articles/{}/translations/{}", article, locale),
                "class": "article_translation"
            },
            "article": {"href": format!("/api/v2/articles/{}", article), "class": "article"}
        }
    })
}

pub fn topic(index: usize, name: &str) -> Value {
    json!({
        "name": name,
        "allow_questions": false,
        "in_support_center": false,
        "_links": {
            "self": {"href": format!("/api/v2/topics/{}", index), "class": "topic"},
            "articles": {"href": format!("/api/v2/topics/{}/articles", index), "class": "article"},
            "translations": {
                "href": format!("/api/v2/topics/{}/translations", index),
                "class": "topic_translation"
            }
        }
    })
}

/// A page of a collection at `base`, where pages are addressed as `{base}?page={n}`.
pub fn page(base: &str, number: usize, entries: Vec<Value>, last: usize, total: usize) -> Value {
    let link = |n: usize| json!({"href": format!("{}?page={}", base, n), "class": "page"});
    json!({
        "total_entries": total,
        "page": number,
        "page_size": PER_PAGE,
        "_links": {
            "self": link(number),
            "first": link(1),
            "last": link(last),
            "previous": if number > 1 { link(number - 1) } else { Value::Null },
            "next": if number < last { link(number + 1) } else { Value::Null }
        },
        "_embedded": {"entries": entries}
    })
}

/// Serve [NUM_ARTICLES] articles from `/api/v2/articles?page={n}`, [PER_PAGE] per page.
pub fn mount_article_pages(server: &MockServer) -> Vec<Mock<'_>> {
    let last = (NUM_ARTICLES + PER_PAGE - 1) / PER_PAGE;
    (1..=last)
        .map(|number| {
            let start = (number - 1) * PER_PAGE + 1;
            let end = (number * PER_PAGE).min(NUM_ARTICLES);
            let entries = (start..=end).map(article).collect();
            let body = page("/api/v2/articles", number, entries, last, NUM_ARTICLES);
            let number = number.to_string();
            server.mock(|when, then| {
                when.method(GET)
                    .path("/api/v2/articles")
                    .query_param("page", number.as_str());
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(body);
            })
        })
        .collect()
}

/// Serve a single page of entries at `path`.
pub fn mount_single_page<'a>(server: &'a MockServer, path: &str, entries: Vec<Value>) -> Mock<'a> {
    let total = entries.len();
    let body = page(path, 1, entries, 1, total);
    server.mock(|when, then| {
        when.method(GET).path(path);
        then.status(200)
            .header("content-type", "application/json")
            .json_body(body);
    })
}
