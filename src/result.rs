use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::EtcdApiError;
use crate::node::EtcdNode;

/// Action label reported when the store did not name one (and on errors).
pub const UNKNOWN_ACTION: &str = "unknown";

/// Structured rejection returned by the store inside an HTTP response
/// body, e.g. key not found or a failed compare-and-swap precondition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EtcdError {
    #[serde(rename = "errorCode")]
    pub error_code: i64,
    pub index: u64,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
}

impl fmt::Display for EtcdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "error {} at index {}: {}",
            self.error_code, self.index, self.message
        )?;
        if let Some(cause) = &self.cause {
            write!(f, " ({cause})")?;
        }
        Ok(())
    }
}

/// Normalized outcome of one request/response exchange with the store:
/// either a success payload (action plus node tree) or a protocol error,
/// never both.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EtcdResult {
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<EtcdError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node: Option<EtcdNode>,
    #[serde(rename = "prevNode", skip_serializing_if = "Option::is_none")]
    pub prev_node: Option<EtcdNode>,
}

#[derive(Debug, Deserialize)]
struct SuccessPayload {
    action: Option<String>,
    node: Option<EtcdNode>,
    #[serde(rename = "prevNode")]
    prev_node: Option<EtcdNode>,
}

impl EtcdResult {
    /// True iff the store accepted the operation.
    pub fn successful(&self) -> bool {
        self.error.is_none()
    }

    /// Decode a raw response body into a typed result.
    ///
    /// A body whose object carries `errorCode` decodes as a protocol
    /// error; anything else decodes as a success payload with `action`
    /// defaulting to [`UNKNOWN_ACTION`]. Invalid JSON, a non-object body,
    /// a missing required node field, or a node violating the
    /// value/children exclusivity invariant all fail with
    /// [`EtcdApiError::MalformedResponse`].
    pub fn parse(text: &str) -> Result<Self, EtcdApiError> {
        let value: Value = serde_json::from_str(text).map_err(|source| {
            EtcdApiError::malformed(format!("response is not valid JSON: {source}"))
        })?;
        if !value.is_object() {
            return Err(EtcdApiError::malformed(format!(
                "response is not a JSON object, got {}",
                json_type_name(&value)
            )));
        }

        if value.get("errorCode").is_some() {
            let error: EtcdError = serde_json::from_value(value).map_err(|source| {
                EtcdApiError::malformed(format!("invalid error payload: {source}"))
            })?;
            return Ok(Self {
                action: UNKNOWN_ACTION.to_owned(),
                error: Some(error),
                node: None,
                prev_node: None,
            });
        }

        let payload: SuccessPayload = serde_json::from_value(value).map_err(|source| {
            EtcdApiError::malformed(format!("invalid response payload: {source}"))
        })?;
        if let Some(node) = &payload.node {
            node.validate()?;
        }
        if let Some(node) = &payload.prev_node {
            node.validate()?;
        }

        Ok(Self {
            action: payload.action.unwrap_or_else(|| UNKNOWN_ACTION.to_owned()),
            error: None,
            node: payload.node,
            prev_node: payload.prev_node,
        })
    }
}

impl fmt::Display for EtcdResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => f.write_str(&json),
            Err(_) => Err(fmt::Error),
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
