//! Stateless HTTP request builder and response parser for the todo API.
//!
//! # Design
//! `TodoClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! Whoever executes the round-trip in between (the façade in `api`, or a
//! test) decides what happens when no response arrives at all.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::de::DeserializeOwned;

use crate::classify::{classify, decode_body};
use crate::either::Either;
use crate::error::ApiError;
use crate::http::{default_headers, HttpMethod, HttpRequest, HttpResponse};
use crate::types::Task;

/// Characters escaped when a task id is placed in a path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_all(&self) -> HttpRequest {
        self.request(HttpMethod::Get, self.collection_url(), None)
    }

    pub fn build_get_by_id(&self, id: &str) -> HttpRequest {
        self.request(HttpMethod::Get, self.item_url(id), None)
    }

    pub fn build_create(&self, task: &Task) -> Result<HttpRequest, serde_json::Error> {
        let body = serde_json::to_string(task)?;
        Ok(self.request(HttpMethod::Post, self.collection_url(), Some(body)))
    }

    /// The path id is taken from `task.id`.
    pub fn build_update_by_id(&self, task: &Task) -> Result<HttpRequest, serde_json::Error> {
        let body = serde_json::to_string(task)?;
        Ok(self.request(HttpMethod::Put, self.item_url(&task.id), Some(body)))
    }

    pub fn build_delete_by_id(&self, id: &str) -> HttpRequest {
        self.request(HttpMethod::Delete, self.item_url(id), None)
    }

    pub fn parse_list_all(&self, response: &HttpResponse) -> Either<ApiError, Vec<Task>> {
        parse_json(response)
    }

    /// Parse the single-task payload of get, create and update.
    pub fn parse_task(&self, response: &HttpResponse) -> Either<ApiError, Task> {
        parse_json(response)
    }

    /// Delete has no payload; any non-failing status is a unit success.
    pub fn parse_delete(&self, response: &HttpResponse) -> Either<ApiError, ()> {
        classify(response.status, Some(()))
    }

    fn request(&self, method: HttpMethod, url: String, body: Option<String>) -> HttpRequest {
        HttpRequest {
            method,
            url,
            headers: default_headers(),
            body,
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/todos", self.base_url)
    }

    fn item_url(&self, id: &str) -> String {
        format!("{}/todos/{}", self.base_url, utf8_percent_encode(id, PATH_SEGMENT))
    }
}

fn parse_json<T: DeserializeOwned>(response: &HttpResponse) -> Either<ApiError, T> {
    classify(response.status, response.body.as_deref().and_then(decode_body))
}
