//! Incoming HTTP request type, as seen by a route handler.

use bytes::Bytes;
use http::HeaderMap;

use crate::method::Method;
use crate::pattern::Params;

/// An incoming HTTP request, after routing.
pub struct Request {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) headers: HeaderMap,
    pub(crate) body: Bytes,
    pub(crate) params: Params,
}

impl Request {
    pub(crate) fn new(
        method: Method,
        parts: http::request::Parts,
        body: Bytes,
        params: Params,
    ) -> Self {
        Self {
            method,
            path: parts.uri.path().to_owned(),
            headers: parts.headers,
            body,
            params,
        }
    }

    pub fn method(&self) -> Method { self.method }
    pub fn path(&self) -> &str { &self.path }
    pub fn headers(&self) -> &HeaderMap { &self.headers }
    pub fn body(&self) -> &[u8] { &self.body }

    /// Case-insensitive header lookup. Non-UTF-8 values are skipped.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/users/{id}`, `req.param("id")` on `/users/42` returns `Some("42")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key)
    }
}
