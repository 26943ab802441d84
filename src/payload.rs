/// Form-encoded body for write operations against the store.
///
/// The store's v2 wire contract expects the `ttl` field on every write,
/// sent as the empty string when no positive TTL applies. Dropping the
/// field changes server behavior, so [`RequestBody::form_fields`] always
/// emits it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestBody {
    pub dir: Option<bool>,
    pub value: Option<String>,
    pub ttl: Option<i64>,
}

impl RequestBody {
    /// Body for a leaf-value write.
    pub fn value(value: impl Into<String>, ttl: Option<i64>) -> Self {
        Self {
            dir: None,
            value: Some(value.into()),
            ttl,
        }
    }

    /// Body for a directory write; directories carry no value.
    pub fn dir(ttl: Option<i64>) -> Self {
        Self {
            dir: Some(true),
            value: None,
            ttl,
        }
    }

    /// Ordered form fields ready for `application/x-www-form-urlencoded`
    /// serialization.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();
        if self.dir == Some(true) {
            fields.push(("dir", "true".to_owned()));
        }
        if let Some(value) = &self.value {
            fields.push(("value", value.clone()));
        }
        let ttl = match self.ttl {
            Some(ttl) if ttl > 0 => ttl.to_string(),
            _ => String::new(),
        };
        fields.push(("ttl", ttl));
        fields
    }
}
