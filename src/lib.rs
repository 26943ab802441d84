//! Blocking client primitives for etcd v2-style HTTP coordination stores.
//!
//! This crate owns request building, multi-endpoint failover, and response
//! normalization for the hierarchical key-value wire protocol: abstract
//! operations (get/set/delete/enqueue) become HTTP requests against the
//! first reachable server of a configured list, and the heterogeneous JSON
//! responses (success node trees vs. structured errors) come back as one
//! typed [`EtcdResult`].
//!
//! The session is stateless beyond its immutable server list; each
//! operation is a single synchronous request/response exchange with no
//! retries, backoff, or endpoint stickiness. Protocol-level rejections
//! from the store surface inside an `Ok` result; only transport
//! exhaustion and malformed bodies are client-side errors.

pub mod client;
pub mod config;
pub mod error;
pub mod node;
pub mod payload;
pub mod result;
pub mod url;

pub use client::EtcdSession;
pub use config::{parse_server_list, EtcdApiConfig, EtcdServer};
pub use error::EtcdApiError;
pub use node::EtcdNode;
pub use payload::RequestBody;
pub use result::{EtcdError, EtcdResult, UNKNOWN_ACTION};
pub use self::url::{build_request_uri, encode_query_value, KEYS_PREFIX};
