use url::form_urlencoded;

/// Path prefix for the key-space endpoints of the v2 wire protocol.
pub const KEYS_PREFIX: &str = "keys";

/// Assemble a request URI for one store endpoint.
///
/// Produces `http://{host}:{port}/v2/{prefix}{key}`, appending the query
/// parts joined with `&` when any are given. `key` is caller-supplied,
/// starts with `/`, and is passed through without percent-encoding; query
/// values that need encoding must be encoded before they reach this
/// function (see [`encode_query_value`]).
pub fn build_request_uri(
    host: &str,
    port: u16,
    prefix: &str,
    key: &str,
    query: &[String],
) -> String {
    let mut uri = format!("http://{host}:{port}/v2/{prefix}{key}");
    if !query.is_empty() {
        uri.push('?');
        uri.push_str(&query.join("&"));
    }
    uri
}

/// Form-style percent-encode a single query value (space becomes `+`).
pub fn encode_query_value(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}
