//! The frozen, method-partitioned route index.
//!
//! One ordered list per [`Method`], allocated up front so a lookup never has
//! to answer "no such method". Order inside a list is registration order,
//! which is the order a dispatcher tries patterns in.

use tracing::{debug, info};

use crate::error::Error;
use crate::method::Method;
use crate::route::Route;

/// Per-method route lists with a build phase and a read-only phase.
///
/// Mutation takes `&mut self`; lookups take `&self` and need no locking once
/// the table is frozen and shared.
#[derive(Debug)]
pub struct RouteTable {
    routes: [Vec<Route>; Method::COUNT],
    frozen: bool,
}

impl RouteTable {
    pub fn new() -> Self {
        Self {
            routes: std::array::from_fn(|_| Vec::new()),
            frozen: false,
        }
    }

    /// Appends `route` to the list for its method.
    pub fn register(&mut self, route: Route) -> Result<(), Error> {
        if self.frozen {
            return Err(Error::InvalidState("route table is frozen; cannot register routes"));
        }
        debug!(method = %route.method(), template = route.template(), action = route.action(), "route added");
        self.routes[route.method().index()].push(route);
        Ok(())
    }

    /// Ends the build phase. Freezing twice is an error.
    pub fn freeze(&mut self) -> Result<(), Error> {
        if self.frozen {
            return Err(Error::InvalidState("route table is already frozen"));
        }
        self.frozen = true;
        info!(routes = self.len(), "route table frozen");
        Ok(())
    }

    /// Routes for `method` in registration order; empty if none.
    pub fn lookup(&self, method: Method) -> Result<&[Route], Error> {
        if !self.frozen {
            return Err(Error::InvalidState("route table is not frozen yet"));
        }
        Ok(&self.routes[method.index()])
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn len(&self) -> usize {
        self.routes.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every route, grouped by method in [`Method::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter().flatten()
    }
}

impl Default for RouteTable {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::{Controller, Request, Response, RouteBuilder};

    async fn noop(_: Request) -> Response {
        Response::text("")
    }

    fn routes(template: &str) -> Vec<Route> {
        RouteBuilder::new(template, Controller::new().read(noop).create(noop))
            .create_routes()
            .unwrap()
    }

    #[test]
    fn lookup_before_freeze_fails() {
        let table = RouteTable::new();
        assert_eq!(table.lookup(Method::Get).unwrap_err().kind(), ErrorKind::InvalidState);
    }

    #[test]
    fn register_partitions_by_method_in_order() {
        let mut table = RouteTable::new();
        for r in routes("/a").into_iter().chain(routes("/b")) {
            table.register(r).unwrap();
        }
        table.freeze().unwrap();

        let get: Vec<_> = table.lookup(Method::Get).unwrap().iter().map(Route::template).collect();
        assert_eq!(get, ["/a", "/b"]);
        assert_eq!(table.lookup(Method::Post).unwrap().len(), 2);
        assert!(table.lookup(Method::Delete).unwrap().is_empty());
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn every_method_has_an_empty_slot() {
        let mut table = RouteTable::new();
        table.freeze().unwrap();
        for m in Method::ALL {
            assert!(table.lookup(m).unwrap().is_empty());
        }
        assert!(table.is_empty());
    }

    #[test]
    fn freeze_twice_fails() {
        let mut table = RouteTable::new();
        table.freeze().unwrap();
        assert!(matches!(table.freeze(), Err(Error::InvalidState(_))));
    }

    #[test]
    fn register_after_freeze_fails_and_leaves_table_alone() {
        let mut table = RouteTable::new();
        table.freeze().unwrap();
        let route = routes("/late").remove(0);
        assert!(matches!(table.register(route), Err(Error::InvalidState(_))));
        assert!(table.lookup(Method::Get).unwrap().is_empty());
    }
}
