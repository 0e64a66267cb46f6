//! Request dispatch over a frozen [`RouteMapping`].
//!
//! The dispatcher owns no routing state of its own. Per request it asks the
//! mapping for the method's route list and tries each pattern in order; the
//! first match wins. Transport (sockets, HTTP/1, HTTP/2) stays outside: feed
//! it an [`http::Request`], get an [`http::Response`] back.

use std::sync::Arc;

use bytes::Bytes;
use http::StatusCode;
use http::header::ALLOW;
use tracing::{debug, error, warn};

use crate::error::Error;
use crate::mapping::RouteMapping;
use crate::method::Method;
use crate::pattern::Params;
use crate::request::Request;
use crate::response::Response;
use crate::route::Route;

/// Routes requests through a shared, frozen [`RouteMapping`].
///
/// Cloning is one `Arc` bump; clones share the same table.
#[derive(Clone, Debug)]
pub struct Dispatcher {
    routes: Arc<RouteMapping>,
}

impl Dispatcher {
    pub fn new(routes: RouteMapping) -> Self {
        Self { routes: Arc::new(routes) }
    }

    pub fn routes(&self) -> &RouteMapping {
        &self.routes
    }

    /// First route for `method` whose pattern matches `path`, with its
    /// captured parameters.
    pub fn resolve(&self, method: Method, path: &str) -> Result<Option<(&Route, Params)>, Error> {
        let found = self.routes.routes_for(method)?
            .iter()
            .find_map(|route| route.matches(path).map(|params| (route, params)));
        Ok(found)
    }

    /// Core hot path: routes one request and produces one response.
    ///
    /// Never fails: unknown methods get `405`, known methods with no route
    /// for this path but routes under other methods get `405` plus `Allow`,
    /// everything else unmatched gets `404`.
    pub async fn dispatch(&self, req: http::Request<Bytes>) -> http::Response<Bytes> {
        let (parts, body) = req.into_parts();

        let method = match Method::try_from(&parts.method) {
            Ok(m) => m,
            Err(e) => {
                warn!("{e}");
                return Response::status(StatusCode::METHOD_NOT_ALLOWED).into_inner();
            }
        };
        let path = parts.uri.path().to_owned();

        let response = match self.resolve(method, &path) {
            Ok(Some((route, params))) => {
                debug!(%method, %path, template = route.template(), "dispatching");
                route.call(Request::new(method, parts, body, params)).await
            }
            Ok(None) => self.unmatched(method, &path),
            Err(e) => {
                error!(%method, %path, "route lookup failed: {e}");
                Response::status(StatusCode::INTERNAL_SERVER_ERROR)
            }
        };

        response.into_inner()
    }

    fn unmatched(&self, method: Method, path: &str) -> Response {
        let allowed = match self.routes.allowed_methods(path) {
            Ok(allowed) => allowed,
            Err(e) => {
                error!(%method, %path, "route lookup failed: {e}");
                return Response::status(StatusCode::INTERNAL_SERVER_ERROR);
            }
        };
        if allowed.is_empty() {
            debug!(%method, %path, "no route");
            return Response::status(StatusCode::NOT_FOUND);
        }
        let allow = allowed.iter().map(|m| m.as_str()).collect::<Vec<_>>().join(", ");
        Response::builder()
            .status(StatusCode::METHOD_NOT_ALLOWED)
            .header(ALLOW.as_str(), &allow)
            .no_body()
    }
}

impl From<RouteMapping> for Dispatcher {
    fn from(routes: RouteMapping) -> Self {
        Self::new(routes)
    }
}
