//! Controllers: the handler objects a route template is mapped to.
//!
//! A controller is a set of named actions. The four CRUD actions have
//! dedicated setters; anything else goes through [`Controller::action`].
//! Which action answers which HTTP method is decided by the
//! [`RouteBuilder`](crate::RouteBuilder), not here.
//!
//! ```rust
//! use routemap::{Controller, Request, Response};
//!
//! async fn list(_: Request) -> Response { Response::json(b"[]".to_vec()) }
//! async fn add(_: Request) -> Response { Response::text("added") }
//!
//! let users = Controller::new()
//!     .read(list)
//!     .create(add)
//!     .action("search", list);
//!
//! assert!(users.supports("read"));
//! assert!(!users.supports("delete"));
//! ```

use std::fmt;

use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;

/// Well-known action names.
pub mod action {
    pub const CREATE: &str = "create";
    pub const READ: &str = "read";
    pub const UPDATE: &str = "update";
    pub const DELETE: &str = "delete";
}

/// The action a method maps to when the builder is not told otherwise:
/// `GET → read`, `PUT → update`, `POST → create`, `DELETE → delete`.
pub(crate) fn default_action(method: Method) -> Option<&'static str> {
    match method {
        Method::Get    => Some(action::READ),
        Method::Put    => Some(action::UPDATE),
        Method::Post   => Some(action::CREATE),
        Method::Delete => Some(action::DELETE),
        _              => None,
    }
}

/// Methods a builder emits by default, in this order.
pub(crate) const DEFAULT_METHODS: [Method; 4] =
    [Method::Get, Method::Put, Method::Post, Method::Delete];

/// A set of named async actions.
///
/// Cloning is cheap (one `Arc` bump per action), so one controller can back
/// several templates.
#[derive(Clone, Default)]
pub struct Controller {
    actions: Vec<(String, BoxedHandler)>,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    /// `POST` by default.
    pub fn create(self, handler: impl Handler) -> Self {
        self.action(action::CREATE, handler)
    }

    /// `GET` by default.
    pub fn read(self, handler: impl Handler) -> Self {
        self.action(action::READ, handler)
    }

    /// `PUT` by default.
    pub fn update(self, handler: impl Handler) -> Self {
        self.action(action::UPDATE, handler)
    }

    /// `DELETE` by default.
    pub fn delete(self, handler: impl Handler) -> Self {
        self.action(action::DELETE, handler)
    }

    /// Registers a named action. A second registration under the same name
    /// replaces the first.
    pub fn action(mut self, name: &str, handler: impl Handler) -> Self {
        let handler = handler.into_boxed_handler();
        match self.actions.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = handler,
            None => self.actions.push((name.to_owned(), handler)),
        }
        self
    }

    pub fn supports(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Action names in registration order.
    pub fn actions(&self) -> impl Iterator<Item = &str> {
        self.actions.iter().map(|(n, _)| n.as_str())
    }

    pub(crate) fn get(&self, name: &str) -> Option<&BoxedHandler> {
        self.actions.iter().find(|(n, _)| n == name).map(|(_, h)| h)
    }
}

impl fmt::Debug for Controller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controller")
            .field("actions", &self.actions().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Request, Response};

    async fn noop(_: Request) -> Response {
        Response::text("")
    }

    #[test]
    fn crud_setters_register_well_known_names() {
        let c = Controller::new().create(noop).read(noop).update(noop).delete(noop);
        assert_eq!(c.actions().collect::<Vec<_>>(), ["create", "read", "update", "delete"]);
    }

    #[test]
    fn re_registering_replaces_in_place() {
        let c = Controller::new().read(noop).action("search", noop).read(noop);
        assert_eq!(c.actions().collect::<Vec<_>>(), ["read", "search"]);
    }

    #[test]
    fn default_actions_cover_only_crud_verbs() {
        for m in DEFAULT_METHODS {
            assert!(default_action(m).is_some(), "{m}");
        }
        assert_eq!(default_action(Method::Patch), None);
    }
}
