use reqwest::blocking::Client;
use reqwest::Method;
use tracing::debug;

use crate::config::EtcdApiConfig;
use crate::error::EtcdApiError;
use crate::payload::RequestBody;
use crate::result::EtcdResult;
use crate::url::{build_request_uri, encode_query_value, KEYS_PREFIX};

/// Blocking session against an ordered list of store endpoints.
///
/// Every operation is one stateless request/response exchange: build the
/// query and body, send it to the first reachable server, decode the body
/// into an [`EtcdResult`]. The session holds no mutable state, so it can
/// be shared freely across threads.
#[derive(Debug)]
pub struct EtcdSession {
    http: Client,
    config: EtcdApiConfig,
}

/// Outcome of one request attempt against one server.
enum Attempt {
    /// A clean HTTP exchange, including non-2xx statuses whose body
    /// carries the store's JSON error.
    Response(String),
    /// Connectivity-level failure: DNS, refused connection, timeout, or a
    /// broken body read. The next server in the list gets tried.
    Unreachable(reqwest::Error),
}

impl EtcdSession {
    pub fn new(config: EtcdApiConfig) -> Result<Self, EtcdApiError> {
        if config.servers.is_empty() {
            return Err(EtcdApiError::NoServers);
        }
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(EtcdApiError::Http)?;
        Ok(Self { http, config })
    }

    /// Build a session from a `"host:port, host:port"` list string.
    pub fn from_server_list(list: &str) -> Result<Self, EtcdApiError> {
        Self::new(EtcdApiConfig::from_server_list(list))
    }

    pub fn config(&self) -> &EtcdApiConfig {
        &self.config
    }

    /// Read a key or directory.
    ///
    /// `sorted` is three-way: `None` and `Some(false)` both omit the
    /// parameter; only `Some(true)` reaches the wire.
    pub fn get(
        &self,
        key: &str,
        recursive: bool,
        sorted: Option<bool>,
    ) -> Result<EtcdResult, EtcdApiError> {
        let mut query = Vec::new();
        if recursive {
            query.push("recursive=true".to_owned());
        }
        if sorted == Some(true) {
            query.push("sorted=true".to_owned());
        }
        self.dispatch(Method::GET, key, &query, None)
    }

    /// Write a leaf value, optionally guarded by compare-and-swap
    /// preconditions on the previous value, index, or existence.
    pub fn set_value(
        &self,
        key: &str,
        value: &str,
        ttl: Option<i64>,
        prev_value: Option<&str>,
        prev_index: Option<u64>,
        prev_exist: Option<bool>,
    ) -> Result<EtcdResult, EtcdApiError> {
        let mut query = Vec::new();
        if let Some(prev_value) = prev_value {
            query.push(format!("prevValue={}", encode_query_value(prev_value)));
        }
        if let Some(prev_index) = prev_index {
            query.push(format!("prevIndex={prev_index}"));
        }
        if prev_exist == Some(true) {
            query.push("prevExist=true".to_owned());
        }
        self.dispatch(
            Method::PUT,
            key,
            &query,
            Some(RequestBody::value(value, ttl)),
        )
    }

    /// Create or refresh a directory.
    pub fn set_dir(&self, key: &str, ttl: Option<i64>) -> Result<EtcdResult, EtcdApiError> {
        self.dispatch(Method::PUT, key, &[], Some(RequestBody::dir(ttl)))
    }

    /// Delete a leaf value, optionally guarded by compare-and-delete
    /// preconditions.
    pub fn delete_value(
        &self,
        key: &str,
        prev_value: Option<&str>,
        prev_index: Option<u64>,
    ) -> Result<EtcdResult, EtcdApiError> {
        let mut query = Vec::new();
        if let Some(prev_value) = prev_value {
            query.push(format!("prevValue={}", encode_query_value(prev_value)));
        }
        if let Some(prev_index) = prev_index {
            query.push(format!("prevIndex={prev_index}"));
        }
        self.dispatch(Method::DELETE, key, &query, None)
    }

    /// Delete a directory; `recursive` also removes its contents.
    pub fn delete_dir(&self, key: &str, recursive: bool) -> Result<EtcdResult, EtcdApiError> {
        let mut query = Vec::new();
        if recursive {
            query.push("recursive=true".to_owned());
        }
        self.dispatch(Method::DELETE, key, &query, None)
    }

    /// Push a value onto the ordered queue rooted at `key`. The store
    /// assigns the in-order child key and reports it in the result node.
    pub fn enqueue(
        &self,
        key: &str,
        value: &str,
        ttl: Option<i64>,
    ) -> Result<EtcdResult, EtcdApiError> {
        self.dispatch(
            Method::POST,
            key,
            &[],
            Some(RequestBody::value(value, ttl)),
        )
    }

    /// Long-poll watches are not supported; fails without touching the
    /// network.
    pub fn watch(&self, _key: &str, _wait_index: u64) -> Result<EtcdResult, EtcdApiError> {
        Err(EtcdApiError::WatchUnsupported)
    }

    fn dispatch(
        &self,
        method: Method,
        key: &str,
        query: &[String],
        body: Option<RequestBody>,
    ) -> Result<EtcdResult, EtcdApiError> {
        let text = self.send_over_servers(method, key, query, body.as_ref())?;
        EtcdResult::parse(&text)
    }

    /// Iterate the configured servers in list order, returning the first
    /// clean response body. Only connectivity-level failures move the
    /// iteration along; a response in hand, whatever its status, ends it.
    fn send_over_servers(
        &self,
        method: Method,
        key: &str,
        query: &[String],
        body: Option<&RequestBody>,
    ) -> Result<String, EtcdApiError> {
        let mut last_error = None;
        for server in &self.config.servers {
            let uri = build_request_uri(&server.host, server.port, KEYS_PREFIX, key, query);
            debug!(%method, %uri, "dispatching store request");
            match attempt_request(&self.http, method.clone(), &uri, body) {
                Attempt::Response(text) => return Ok(text),
                Attempt::Unreachable(error) => {
                    debug!(%uri, %error, "server unreachable, trying next");
                    last_error = Some(error.to_string());
                }
            }
        }
        Err(EtcdApiError::AllServersUnreachable {
            attempts: self.config.servers.len(),
            last_error,
        })
    }
}

fn attempt_request(
    http: &Client,
    method: Method,
    uri: &str,
    body: Option<&RequestBody>,
) -> Attempt {
    let mut request = http.request(method, uri);
    if let Some(body) = body {
        request = request.form(&body.form_fields());
    }
    let response = match request.send() {
        Ok(response) => response,
        Err(error) => return Attempt::Unreachable(error),
    };
    match response.text() {
        Ok(text) => Attempt::Response(text),
        Err(error) => Attempt::Unreachable(error),
    }
}
