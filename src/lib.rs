//! # routemap
//!
//! A method-indexed route table for HTTP request dispatch. Declare your
//! routes once, get back a frozen index that any number of threads can read
//! without locks.
//!
//! ## The contract
//!
//! Building routes is a startup concern. It runs exactly once, on one
//! thread, and either produces a complete table or fails loudly. Serving is a
//! steady-state concern: lookups only, no mutation, no locks.
//!
//! - **Declaring**: your code maps URL templates to [`Controller`]s.
//! - **Compiling**: each [`RouteBuilder`] expands into one [`Route`] per
//!   method the controller answers, appended to that method's list.
//! - **Ready**: the [`RouteTable`] is frozen. [`RouteMapping::routes_for`]
//!   hands out ordered slices.
//!
//! Every step out of order is an [`Error::InvalidState`], never a silent
//! rebuild.
//!
//! Pattern syntax and matching are [`matchit`]'s (`{id}`, `{*rest}`).
//! Transport is someone else's: [`Dispatcher`] takes an [`http::Request`]
//! and returns an [`http::Response`].
//!
//! ## Quick start
//!
//! ```rust
//! use http::StatusCode;
//! use routemap::{Controller, Method, Request, Response, RouteMapping};
//!
//! let routes = RouteMapping::new(|routes| {
//!     let users = Controller::new()
//!         .read(get_user)
//!         .update(update_user)
//!         .delete(delete_user);
//!
//!     routes.map("/users", Controller::new().create(create_user))?;
//!     routes.map("/users/{id}", users)?;
//!     Ok(())
//! })?;
//!
//! assert_eq!(routes.routes_for(Method::Get)?[0].template(), "/users/{id}");
//! assert_eq!(routes.routes_for(Method::Post)?[0].template(), "/users");
//!
//! async fn get_user(req: Request) -> Response {
//!     let id = req.param("id").unwrap_or("unknown");
//!     Response::json(format!(r#"{{"id":"{id}"}}"#).into_bytes())
//! }
//!
//! async fn create_user(req: Request) -> Response {
//!     if req.body().is_empty() {
//!         return Response::status(StatusCode::BAD_REQUEST);
//!     }
//!     Response::builder()
//!         .status(StatusCode::CREATED)
//!         .header("location", "/users/99")
//!         .json(br#"{"id":"99"}"#.to_vec())
//! }
//!
//! async fn update_user(_req: Request) -> StatusCode { StatusCode::NO_CONTENT }
//! async fn delete_user(_req: Request) -> StatusCode { StatusCode::NO_CONTENT }
//! # Ok::<(), routemap::Error>(())
//! ```

mod controller;
mod dispatch;
mod error;
mod handler;
mod mapping;
mod method;
mod pattern;
mod request;
mod response;
mod route;
mod table;

pub use controller::{Controller, action};
pub use dispatch::Dispatcher;
pub use error::{Error, ErrorKind};
pub use handler::Handler;
pub use mapping::{Declare, RouteMapping};
pub use method::Method;
pub use pattern::{Params, UrlPattern};
pub use request::Request;
pub use response::{IntoResponse, Response, ResponseBuilder};
pub use route::{Route, RouteBuilder};
pub use table::RouteTable;
