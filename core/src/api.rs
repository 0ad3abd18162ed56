//! Blocking client façade: one method per todo operation.
//!
//! # Design
//! Every call issues exactly one request through its `Transport`. When the
//! transport yields no response the call short-circuits to
//! `ApiError::Network`; otherwise the response is classified and returned
//! unchanged. The client owns no mutable state, so a shared reference can be
//! used from several threads at once if the transport allows it.

use tracing::{debug, warn};

use crate::client::TodoClient;
use crate::config::ClientConfig;
use crate::either::Either;
use crate::error::{ApiError, TransportError};
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};
use crate::types::Task;

#[derive(Debug, Clone)]
pub struct TodoApiClient<T = UreqTransport> {
    client: TodoClient,
    transport: T,
}

impl TodoApiClient<UreqTransport> {
    /// Client for the default public endpoint.
    pub fn new() -> Self {
        Self::from_config(&ClientConfig::default())
    }

    /// Client for `base_url` with the default timeout.
    pub fn with_base_url(base_url: &str) -> Self {
        Self::from_config(&ClientConfig {
            base_url: base_url.to_string(),
            ..ClientConfig::default()
        })
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::with_transport(&config.base_url, UreqTransport::new(config.timeout))
    }
}

impl Default for TodoApiClient<UreqTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport> TodoApiClient<T> {
    pub fn with_transport(base_url: &str, transport: T) -> Self {
        Self {
            client: TodoClient::new(base_url),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    pub fn list_all(&self) -> Either<ApiError, Vec<Task>> {
        let response = self.send(self.client.build_list_all());
        self.finish(response, |r| self.client.parse_list_all(r))
    }

    pub fn get_by_id(&self, id: &str) -> Either<ApiError, Task> {
        let response = self.send(self.client.build_get_by_id(id));
        self.finish(response, |r| self.client.parse_task(r))
    }

    pub fn create(&self, task: &Task) -> Either<ApiError, Task> {
        let response = self
            .client
            .build_create(task)
            .map_err(TransportError::from)
            .and_then(|req| self.send(req));
        self.finish(response, |r| self.client.parse_task(r))
    }

    /// Replace the task stored under `task.id`.
    pub fn update_by_id(&self, task: &Task) -> Either<ApiError, Task> {
        let response = self
            .client
            .build_update_by_id(task)
            .map_err(TransportError::from)
            .and_then(|req| self.send(req));
        self.finish(response, |r| self.client.parse_task(r))
    }

    /// Callers usually only inspect `error()` on the result.
    pub fn delete_by_id(&self, id: &str) -> Either<ApiError, ()> {
        let response = self.send(self.client.build_delete_by_id(id));
        self.finish(response, |r| self.client.parse_delete(r))
    }

    fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let method = request.method.as_str();
        let url = request.url.clone();
        debug!(method, %url, "sending request");
        let response = self.transport.execute(request)?;
        debug!(method, %url, status = response.status, "received response");
        Ok(response)
    }

    fn finish<V>(
        &self,
        response: Result<HttpResponse, TransportError>,
        parse: impl FnOnce(&HttpResponse) -> Either<ApiError, V>,
    ) -> Either<ApiError, V> {
        match response {
            Ok(response) => parse(&response),
            Err(error) => {
                warn!(%error, base_url = self.base_url(), "no response obtained");
                Either::failure(ApiError::Network)
            }
        }
    }
}
