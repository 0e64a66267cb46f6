//! The one-shot route mapping lifecycle.
//!
//! ```text
//! Declaring ──(declaration returns)──► Compiling ──(table frozen)──► Ready
//! ```
//!
//! [`RouteMapping::new`] walks the whole arrow before returning. Declaration
//! code runs once, against a `&mut RouteMapping`, and registers builders via
//! [`RouteMapping::map`]. Compiling expands the builders into the
//! [`RouteTable`] and drops them. A `RouteMapping` you can hold is always
//! `Ready`: immutable, `Send + Sync`, and shareable behind an `Arc`.
//!
//! ```rust
//! use routemap::{Controller, Method, Request, Response, RouteMapping};
//!
//! async fn get_user(_: Request) -> Response { Response::text("alice") }
//! async fn create_user(_: Request) -> Response { Response::text("created") }
//!
//! let routes = RouteMapping::new(|routes| {
//!     routes.map("/users", Controller::new().read(get_user).create(create_user))?;
//!     Ok(())
//! })?;
//!
//! assert_eq!(routes.routes_for(Method::Get)?.len(), 1);
//! assert!(routes.routes_for(Method::Delete)?.is_empty());
//! # Ok::<(), routemap::Error>(())
//! ```

use std::mem;

use tracing::debug;

use crate::controller::Controller;
use crate::error::Error;
use crate::method::Method;
use crate::route::{Route, RouteBuilder};
use crate::table::RouteTable;

/// Route declarations as a type, for mappings that carry their own state.
///
/// ```rust
/// use routemap::{Controller, Declare, Error, Request, Response, RouteMapping};
///
/// struct Api { prefix: &'static str }
///
/// async fn health(_: Request) -> Response { Response::text("ok") }
///
/// impl Declare for Api {
///     fn declare(&self, routes: &mut RouteMapping) -> Result<(), Error> {
///         routes.map(&format!("{}/health", self.prefix), Controller::new().read(health))?;
///         Ok(())
///     }
/// }
///
/// let routes = RouteMapping::from_declarations(&Api { prefix: "/v1" })?;
/// assert_eq!(routes.table().len(), 1);
/// # Ok::<(), Error>(())
/// ```
pub trait Declare {
    fn declare(&self, routes: &mut RouteMapping) -> Result<(), Error>;
}

enum State {
    Declaring(Vec<RouteBuilder>),
    Compiling,
    Ready,
}

impl State {
    fn label(&self) -> &'static str {
        match self {
            Self::Declaring(_) => "declaring",
            Self::Compiling => "compiling",
            Self::Ready => "ready",
        }
    }
}

/// The routes of one service, built once and read many times.
pub struct RouteMapping {
    table: RouteTable,
    state: State,
}

impl RouteMapping {
    /// Runs `declare`, compiles what it mapped, and freezes the result.
    ///
    /// The first error from declaration or compiling aborts construction.
    pub fn new<F>(declare: F) -> Result<Self, Error>
    where
        F: FnOnce(&mut RouteMapping) -> Result<(), Error>,
    {
        let mut mapping = Self {
            table: RouteTable::new(),
            state: State::Declaring(Vec::new()),
        };
        declare(&mut mapping)?;
        mapping.build_routes()?;
        Ok(mapping)
    }

    pub fn from_declarations<D: Declare + ?Sized>(declarations: &D) -> Result<Self, Error> {
        Self::new(|routes| declarations.declare(routes))
    }

    /// Maps a URL template to a controller and returns the builder for
    /// further configuration. Only legal while declaring.
    pub fn map(&mut self, template: &str, controller: Controller) -> Result<&mut RouteBuilder, Error> {
        let State::Declaring(builders) = &mut self.state else {
            return Err(Error::InvalidState("routes are already built; map() is only legal while declaring"));
        };
        if template.is_empty() {
            return Err(Error::EmptyTemplate);
        }
        debug!(template, "route mapped");
        builders.push(RouteBuilder::new(template, controller));
        let last = builders.len() - 1;
        Ok(&mut builders[last])
    }

    /// Routes for `method`, in declaration order. Empty if none.
    pub fn routes_for(&self, method: Method) -> Result<&[Route], Error> {
        self.table.lookup(method)
    }

    /// The first route named `name` for `method`.
    pub fn route_named(&self, name: &str, method: Method) -> Result<Option<&Route>, Error> {
        Ok(self.routes_for(method)?.iter().find(|r| r.name() == Some(name)))
    }

    /// Every method with at least one route whose pattern matches `path`, in
    /// [`Method::ALL`] order.
    pub fn allowed_methods(&self, path: &str) -> Result<Vec<Method>, Error> {
        let mut allowed = Vec::new();
        for method in Method::ALL {
            if self.routes_for(method)?.iter().any(|r| r.matches(path).is_some()) {
                allowed.push(method);
            }
        }
        Ok(allowed)
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Expands every pending builder into the table, then freezes it. The
    /// builders are consumed, so a second call fails.
    fn build_routes(&mut self) -> Result<(), Error> {
        let builders = match mem::replace(&mut self.state, State::Compiling) {
            State::Declaring(builders) => builders,
            other => {
                debug!(state = other.label(), "repeat build rejected");
                self.state = other;
                return Err(Error::InvalidState("routes are already built"));
            }
        };

        for builder in &builders {
            for route in builder.create_routes()? {
                self.table.register(route)?;
            }
        }
        drop(builders);

        self.table.freeze()?;
        self.state = State::Ready;
        Ok(())
    }
}

impl std::fmt::Debug for RouteMapping {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteMapping")
            .field("state", &self.state.label())
            .field("table", &self.table)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::{Request, Response};

    async fn noop(_: Request) -> Response {
        Response::text("")
    }

    #[test]
    fn build_twice_fails_and_keeps_table() {
        let mut mapping = RouteMapping::new(|routes| {
            routes.map("/users", Controller::new().read(noop))?;
            Ok(())
        })
        .unwrap();

        let err = mapping.build_routes().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);
        assert_eq!(mapping.routes_for(Method::Get).unwrap().len(), 1);
    }

    #[test]
    fn lookup_during_declaration_fails() {
        let err = RouteMapping::new(|routes| {
            routes.routes_for(Method::Get)?;
            Ok(())
        })
        .unwrap_err();
        assert!(matches!(err, Error::InvalidState(_)));
    }

    #[test]
    fn empty_template_is_rejected_while_declaring() {
        let err = RouteMapping::new(|routes| {
            routes.map("", Controller::new().read(noop))?;
            Ok(())
        })
        .unwrap_err();
        assert!(matches!(err, Error::EmptyTemplate));
    }

    #[test]
    fn compile_error_aborts_construction() {
        let err = RouteMapping::new(|routes| {
            routes.map("/ok", Controller::new().read(noop))?;
            routes.map("/users", Controller::new().read(noop))?.method(&[Method::Delete]);
            Ok(())
        })
        .unwrap_err();
        assert!(matches!(err, Error::UnsupportedAction { method: Method::Delete, .. }));
    }

    #[test]
    fn debug_shows_state() {
        let mapping = RouteMapping::new(|_| Ok(())).unwrap();
        assert!(format!("{mapping:?}").contains("ready"));
    }
}
