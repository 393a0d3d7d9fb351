//! Scripted in-memory transport for driving the client without a network.
#![allow(dead_code)]

use anyhow::{Result, anyhow};
use ons_rs::transport::{Query, Transport};
use serde_json::{Value, json};
use std::cell::RefCell;
use std::collections::HashMap;

pub const BASE: &str = "http://ons.test/v1";

/// One recorded `GET`.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub url: String,
    pub query: Vec<(String, String)>,
}

impl Request {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

type Handler = Box<dyn Fn(&[(String, String)]) -> Value>;

/// Answers by URL; records every request in order.
#[derive(Default)]
pub struct MockTransport {
    routes: HashMap<String, Handler>,
    calls: RefCell<Vec<Request>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fixed body for `url` regardless of query.
    pub fn on(mut self, url: &str, body: Value) -> Self {
        self.routes
            .insert(url.to_string(), Box::new(move |_: &[(String, String)]| body.clone()));
        self
    }

    /// Body computed from the query pairs.
    pub fn on_query(mut self, url: &str, f: impl Fn(&[(String, String)]) -> Value + 'static) -> Self {
        self.routes.insert(url.to_string(), Box::new(f));
        self
    }

    pub fn calls(&self) -> Vec<Request> {
        self.calls.borrow().clone()
    }

    pub fn calls_to(&self, url: &str) -> Vec<Request> {
        self.calls().into_iter().filter(|r| r.url == url).collect()
    }
}

impl Transport for MockTransport {
    fn get_json(&self, url: &str, query: &Query) -> Result<Value> {
        self.calls.borrow_mut().push(Request {
            url: url.to_string(),
            query: query.to_vec(),
        });
        let handler = self
            .routes
            .get(url)
            .ok_or_else(|| anyhow!("no route for {}", url))?;
        Ok(handler(query))
    }
}

pub fn param<'a>(query: &'a [(String, String)], key: &str) -> Option<&'a str> {
    query
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

pub fn dataset_json(id: &str, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "links": {
            "editions": {"href": format!("{BASE}/datasets/{id}/editions")},
            "latest_version": {"href": format!("{BASE}/datasets/{id}/editions/2021/versions/3")}
        }
    })
}

pub fn edition_url(id: &str) -> String {
    format!("{BASE}/datasets/{id}/editions/time-series/versions/7")
}

/// A one-dataset API: "UK Labour Market" with a `time-series` edition and a
/// single `sex` dimension.
pub fn labour_market_api() -> MockTransport {
    let ed = edition_url("labour");
    MockTransport::new()
        .on_query(&format!("{BASE}/datasets"), |q| {
            if param(q, "offset") == Some("0") {
                json!({"items": [dataset_json("labour", "UK Labour Market")], "count": 1})
            } else {
                json!({"items": [], "count": 0})
            }
        })
        .on(
            &format!("{BASE}/datasets/labour/editions"),
            json!({"items": [
                {"edition": "time-series", "links": {"latest_version": {"href": ed.clone()}}}
            ]}),
        )
        .on(
            &format!("{ed}/dimensions"),
            json!({"items": [
                {"name": "sex", "label": "Sex", "links": {"options": {"id": "sex"}}}
            ]}),
        )
        .on(
            &format!("{ed}/dimensions/sex/options"),
            json!({"items": [{"option": "all-adults", "label": "All adults"}], "count": 1, "total_count": 1}),
        )
        .on(
            &format!("{ed}/observations"),
            json!({"observations": [
                {"dimensions": {"Time": {"id": "Jan-Mar 2020"}}, "observation": "76.5"},
                {"dimensions": {"Time": {"id": "Jan-Mar 2019"}}, "observation": "76.1"}
            ]}),
        )
}
