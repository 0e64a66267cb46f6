//! Routes and the builders that produce them.
//!
//! One `map(template, controller)` call yields one [`RouteBuilder`]. At build
//! time the builder expands into one [`Route`] per HTTP method the
//! controller answers.

use std::fmt;

use tracing::trace;

use crate::controller::{Controller, DEFAULT_METHODS, default_action};
use crate::error::Error;
use crate::handler::BoxedHandler;
use crate::method::Method;
use crate::pattern::{Params, UrlPattern};
use crate::request::Request;
use crate::response::Response;

/// One compiled route: a method, a pattern and the action that answers it.
///
/// Immutable. Only a [`RouteBuilder`] creates them.
#[derive(Clone)]
pub struct Route {
    method: Method,
    pattern: UrlPattern,
    action: String,
    name: Option<String>,
    handler: BoxedHandler,
}

impl Route {
    pub fn method(&self) -> Method { self.method }
    pub fn pattern(&self) -> &UrlPattern { &self.pattern }
    pub fn template(&self) -> &str { self.pattern.template() }
    pub fn action(&self) -> &str { &self.action }
    pub fn name(&self) -> Option<&str> { self.name.as_deref() }

    /// Shorthand for `self.pattern().matches(path)`.
    pub fn matches(&self, path: &str) -> Option<Params> {
        self.pattern.matches(path)
    }

    /// Runs the route's action.
    pub async fn call(&self, req: Request) -> Response {
        self.handler.call(req).await
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("method", &self.method)
            .field("template", &self.template())
            .field("action", &self.action)
            .field("name", &self.name)
            .finish()
    }
}

/// Expands one template + controller declaration into routes.
///
/// Without configuration a builder emits a route for each of `GET`, `PUT`,
/// `POST` and `DELETE` (in that order) whose default action the controller
/// has, and silently skips the rest:
///
/// | Method | Action |
/// |---|---|
/// | `GET` | `read` |
/// | `PUT` | `update` |
/// | `POST` | `create` |
/// | `DELETE` | `delete` |
///
/// ```rust
/// # use routemap::{Controller, Method, Request, Response, RouteMapping};
/// # async fn list(_: Request) -> Response { Response::text("") }
/// let routes = RouteMapping::new(|routes| {
///     routes.map("/users", Controller::new().action("list", list))?
///         .action("list", Method::Get)
///         .name("user.collection");
///     Ok(())
/// })?;
/// # Ok::<(), routemap::Error>(())
/// ```
pub struct RouteBuilder {
    template: String,
    controller: Controller,
    methods: Option<Vec<Method>>,
    bindings: Vec<(Method, String)>,
    name: Option<String>,
}

impl RouteBuilder {
    pub fn new(template: &str, controller: Controller) -> Self {
        Self {
            template: template.to_owned(),
            controller,
            methods: None,
            bindings: Vec::new(),
            name: None,
        }
    }

    /// Restricts the builder to these methods (plus any added through
    /// [`action`](Self::action)). Each must resolve to an action the
    /// controller has, or building fails.
    pub fn method(&mut self, methods: &[Method]) -> &mut Self {
        self.methods = Some(methods.to_vec());
        self
    }

    /// Answers `method` with the controller action `name`, replacing the
    /// default action for that method. Adds `method` if not already emitted.
    pub fn action(&mut self, name: &str, method: Method) -> &mut Self {
        self.bindings.retain(|(m, _)| *m != method);
        self.bindings.push((method, name.to_owned()));
        self
    }

    /// Names every route this builder produces.
    pub fn name(&mut self, name: &str) -> &mut Self {
        self.name = Some(name.to_owned());
        self
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Materializes the routes, in emission order.
    pub fn create_routes(&self) -> Result<Vec<Route>, Error> {
        let pattern = UrlPattern::parse(&self.template)?;

        let mut routes = Vec::new();
        for (method, explicit) in self.planned_methods() {
            let Some(action) = self.action_for(method) else {
                return Err(self.unsupported(method, "<none>"));
            };
            let Some(handler) = self.controller.get(action) else {
                if explicit {
                    return Err(self.unsupported(method, action));
                }
                trace!(template = %self.template, %method, action, "controller lacks default action, skipping");
                continue;
            };
            routes.push(Route {
                method,
                pattern: pattern.clone(),
                action: action.to_owned(),
                name: self.name.clone(),
                handler: handler.clone(),
            });
        }
        Ok(routes)
    }

    /// Methods to emit, each flagged with whether it was asked for explicitly.
    fn planned_methods(&self) -> Vec<(Method, bool)> {
        let mut planned: Vec<(Method, bool)> = match &self.methods {
            Some(methods) => methods.iter().map(|m| (*m, true)).collect(),
            None => DEFAULT_METHODS.iter().map(|m| (*m, false)).collect(),
        };
        for (method, _) in &self.bindings {
            match planned.iter_mut().find(|(m, _)| m == method) {
                Some(entry) => entry.1 = true,
                None => planned.push((*method, true)),
            }
        }
        let mut seen: Vec<Method> = Vec::with_capacity(planned.len());
        planned.retain(|(m, _)| {
            let first = !seen.contains(m);
            seen.push(*m);
            first
        });
        planned
    }

    fn action_for(&self, method: Method) -> Option<&str> {
        self.bindings.iter()
            .find(|(m, _)| *m == method)
            .map(|(_, a)| a.as_str())
            .or_else(|| default_action(method))
    }

    fn unsupported(&self, method: Method, action: &str) -> Error {
        Error::UnsupportedAction {
            template: self.template.clone(),
            method,
            action: action.to_owned(),
        }
    }
}

impl fmt::Debug for RouteBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteBuilder")
            .field("template", &self.template)
            .field("controller", &self.controller)
            .field("methods", &self.methods)
            .field("bindings", &self.bindings)
            .field("name", &self.name)
            .finish()
    }
}
