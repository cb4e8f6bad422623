//! Incoming HTTP request type.
//!
//! A [`Request`] is built once per call from the raw `http` request. Building
//! it is the body-parsing stage of the pipeline: the query string and the body
//! (JSON or URL-encoded form) are decoded here, so everything downstream reads
//! typed values instead of raw bytes.

use std::collections::HashMap;

use bytes::Bytes;
use serde_json::{Map, Value};

use crate::error::ApiError;
use crate::method::Method;
use crate::status::Status;

/// An incoming HTTP request with its query and body already decoded.
#[derive(Debug)]
pub struct Request {
    method: Method,
    path: String,
    raw_query: String,
    query: HashMap<String, String>,
    headers: Vec<(String, String)>,
    body: Value,
    params: HashMap<String, String>,
    api_key: Option<String>,
}

impl Request {
    /// Decodes method, path, query string, headers and body.
    ///
    /// Fails with `405` for methods outside RFC 9110 and `400` for a
    /// malformed query string or body.
    pub fn from_http(req: http::Request<Bytes>) -> Result<Self, ApiError> {
        let (parts, body) = req.into_parts();

        let method = Method::try_from(&parts.method)
            .map_err(|()| ApiError::new(Status::MethodNotAllowed, "Method Not Allowed"))?;
        let query = parse_query(parts.uri.query())?;
        let headers: Vec<(String, String)> = parts.headers.iter()
            .filter_map(|(k, v)| Some((k.as_str().to_owned(), v.to_str().ok()?.to_owned())))
            .collect();

        let content_type = headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("content-type"))
            .map(|(_, v)| v.as_str());
        let body = parse_body(content_type, &body)?;

        Ok(Self {
            method,
            path: parts.uri.path().to_owned(),
            raw_query: parts.uri.query().unwrap_or_default().to_owned(),
            query,
            headers,
            body,
            params: HashMap::new(),
            api_key: None,
        })
    }

    pub fn method(&self) -> Method { self.method }
    pub fn path(&self) -> &str { &self.path }
    /// The undecoded query string, without the `?`. Empty when there is none.
    pub fn raw_query(&self) -> &str { &self.raw_query }
    pub fn headers(&self) -> &[(String, String)] { &self.headers }

    /// The decoded body. Always a JSON value; an empty or unparsed body is `{}`.
    pub fn body(&self) -> &Value { &self.body }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Returns a query-string parameter. For repeated keys the first wins.
    pub fn query(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/comments/{id}`, `req.param("id")` on `/comments/42` returns `Some("42")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// The API key admitted by the key gate, if the request passed through one.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub(crate) fn set_params(&mut self, params: HashMap<String, String>) {
        self.params = params;
    }

    pub(crate) fn set_api_key(&mut self, key: String) {
        self.api_key = Some(key);
    }
}

fn parse_query(raw: Option<&str>) -> Result<HashMap<String, String>, ApiError> {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_str(raw.unwrap_or_default())
        .map_err(|e| ApiError::bad_request(format!("Malformed query string: {e}")))?;

    let mut query = HashMap::with_capacity(pairs.len());
    for (k, v) in pairs {
        query.entry(k).or_insert(v);
    }
    Ok(query)
}

fn parse_body(content_type: Option<&str>, raw: &[u8]) -> Result<Value, ApiError> {
    if raw.is_empty() {
        return Ok(Value::Object(Map::new()));
    }

    let mime = content_type
        .and_then(|ct| ct.split(';').next())
        .map(str::trim)
        .unwrap_or_default();

    if mime.eq_ignore_ascii_case("application/json") {
        serde_json::from_slice(raw)
            .map_err(|e| ApiError::bad_request(format!("Malformed JSON body: {e}")))
    } else if mime.eq_ignore_ascii_case("application/x-www-form-urlencoded") {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(raw)
            .map_err(|e| ApiError::bad_request(format!("Malformed form body: {e}")))?;
        Ok(Value::Object(pairs.into_iter().map(|(k, v)| (k, Value::String(v))).collect()))
    } else {
        Ok(Value::Object(Map::new()))
    }
}
