//! CRUD-style routes declared once and dispatched from a few tasks.
//!
//! Run with:
//!   RUST_LOG=routemap=debug cargo run --example crud

use bytes::Bytes;
use http::StatusCode;
use routemap::{Controller, Dispatcher, Method, Request, Response, RouteMapping};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), routemap::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let routes = RouteMapping::new(|routes| {
        routes.map("/users", Controller::new().read(list_users).create(create_user))?
            .name("user.collection");

        let user = Controller::new()
            .read(get_user)
            .update(update_user)
            .delete(delete_user)
            .action("activate", activate_user);
        routes.map("/users/{id}", user.clone())?.name("user.single");
        routes.map("/users/{id}/activate", user)?
            .method(&[Method::Post])
            .action("activate", Method::Post);
        Ok(())
    })?;

    for m in [Method::Get, Method::Put, Method::Post, Method::Delete] {
        for route in routes.routes_for(m)? {
            info!(method = %m, template = route.template(), action = route.action(), "route");
        }
    }

    let app = Dispatcher::new(routes);
    let calls = [
        ("GET", "/users/42", ""),
        ("POST", "/users", r#"{"name":"alice"}"#),
        ("POST", "/users/42/activate", ""),
        ("DELETE", "/users", ""),
        ("GET", "/nowhere", ""),
    ];

    let mut tasks = tokio::task::JoinSet::new();
    for (method, uri, body) in calls {
        let app = app.clone();
        tasks.spawn(async move {
            let req = http::Request::builder()
                .method(method)
                .uri(uri)
                .body(Bytes::from_static(body.as_bytes()))
                .expect("valid request");
            let res = app.dispatch(req).await;
            info!(method, uri, status = res.status().as_u16(), "dispatched");
        });
    }
    while tasks.join_next().await.is_some() {}

    Ok(())
}

async fn list_users(_req: Request) -> Response {
    Response::json(br#"[{"id":"42","name":"alice"}]"#.to_vec())
}

async fn get_user(req: Request) -> Response {
    let id = req.param("id").unwrap_or("unknown");
    Response::json(format!(r#"{{"id":"{id}","name":"alice"}}"#).into_bytes())
}

async fn create_user(req: Request) -> Response {
    if req.body().is_empty() {
        return Response::status(StatusCode::BAD_REQUEST);
    }
    Response::builder()
        .status(StatusCode::CREATED)
        .header("location", "/users/99")
        .json(r#"{"id":"99","name":"new_user"}"#.as_bytes().to_vec())
}

async fn update_user(_req: Request) -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn delete_user(_req: Request) -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn activate_user(req: Request) -> String {
    format!("activated {}", req.param("id").unwrap_or("unknown"))
}
