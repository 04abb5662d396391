//! Request envelopes and response extraction helpers.

use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// HTTP method for a [`Request`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    /// Method name as sent on the wire and signed over.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

/// Builder for Phemex API requests.
///
/// Query parameters and bodies are JSON object maps; typed request models
/// produce them through [`crate::types::scale::to_wire`] so scaled fields
/// are already in wire form by the time they land here.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub path: String,
    params: Option<Map<String, Value>>,
    body: Option<Map<String, Value>>,
}

impl Request {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            params: None,
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Attach query parameters.
    pub fn params(mut self, params: Map<String, Value>) -> Self {
        self.params = Some(params);
        self
    }

    /// Attach a JSON body.
    pub fn body(mut self, body: Map<String, Value>) -> Self {
        self.body = Some(body);
        self
    }

    /// Build the deterministic query string, without the leading `?`.
    ///
    /// Keys come out in map order (sorted), booleans are lowercased, list
    /// values repeat the key once per element, and nulls are dropped.
    pub fn query_string(&self) -> String {
        let Some(params) = &self.params else {
            return String::new();
        };

        let mut parts = Vec::new();
        for (key, value) in params {
            match value {
                Value::Array(items) => {
                    for item in items {
                        if let Some(text) = query_value(item) {
                            parts.push(format!("{}={}", key, text));
                        }
                    }
                }
                other => {
                    if let Some(text) = query_value(other) {
                        parts.push(format!("{}={}", key, text));
                    }
                }
            }
        }
        parts.join("&")
    }

    /// Compact JSON encoding of the body, or the empty string when there is
    /// no body. Compactness matters: the body text is part of the signature.
    pub fn body_json(&self) -> String {
        match &self.body {
            Some(body) if !body.is_empty() => {
                serde_json::to_string(body).expect("JSON maps always serialize")
            }
            _ => String::new(),
        }
    }
}

fn query_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

/// Walks nested response envelopes. Supports chaining:
///
/// ```ignore
/// let rows = Extractor::new(&resp).data().key("rows").extract();
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Extractor<'a> {
    current: Option<&'a Value>,
}

impl<'a> Extractor<'a> {
    pub fn new(resp: &'a Value) -> Self {
        Self {
            current: Some(resp),
        }
    }

    /// Descend into a key of the current object.
    pub fn key(self, key: &str) -> Self {
        Self {
            current: self.current.and_then(|v| v.get(key)),
        }
    }

    /// Take the first element of the current array.
    pub fn first(self) -> Self {
        Self {
            current: self.current.and_then(|v| v.get(0)),
        }
    }

    /// Shortcut for the `data` key, the most common response envelope.
    pub fn data(self) -> Self {
        self.key("data")
    }

    /// Shortcut for the `result` key used by the market data envelopes.
    pub fn result(self) -> Self {
        self.key("result")
    }

    /// Finish the walk. `None` when any step was missing, and also when the
    /// value itself is JSON null (endpoints use null `data` for "nothing").
    pub fn extract(self) -> Option<&'a Value> {
        self.current.filter(|v| !v.is_null())
    }

    /// Finish the walk, failing with [`Error::MissingField`] when absent.
    pub fn require(self, what: &str) -> Result<&'a Value> {
        self.extract()
            .ok_or_else(|| Error::MissingField(what.to_string()))
    }
}
