use bytes::Bytes;
use http::StatusCode;
use http::header::ALLOW;

use routemap::{Controller, Dispatcher, Method, Request, Response, RouteMapping};

async fn get_user(req: Request) -> Response {
    let id = req.param("id").unwrap_or("unknown");
    Response::json(format!(r#"{{"id":"{id}"}}"#).into_bytes())
}

async fn list_users(_: Request) -> Response {
    Response::json(b"[]".to_vec())
}

async fn me(_: Request) -> &'static str {
    "me"
}

async fn create_user(req: Request) -> Response {
    if req.body().is_empty() {
        return Response::status(StatusCode::BAD_REQUEST);
    }
    Response::builder()
        .status(StatusCode::CREATED)
        .header("location", "/users/99")
        .text(String::from_utf8_lossy(req.body()).into_owned())
}

fn dispatcher() -> Dispatcher {
    RouteMapping::new(|routes| {
        routes.map("/users", Controller::new().read(list_users).create(create_user))?;
        // Registered before the parameterized route, so it wins for `/users/me`.
        routes.map("/users/me", Controller::new().read(me))?;
        routes.map("/users/{id}", Controller::new().read(get_user))?;
        Ok(())
    })
    .unwrap()
    .into()
}

fn request(method: &str, uri: &str, body: &'static [u8]) -> http::Request<Bytes> {
    http::Request::builder()
        .method(method)
        .uri(uri)
        .body(Bytes::from_static(body))
        .unwrap()
}

#[tokio::test]
async fn routes_to_handler_with_params() {
    let res = dispatcher().dispatch(request("GET", "/users/42", b"")).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.body().as_ref(), br#"{"id":"42"}"#);
}

#[tokio::test]
async fn first_registered_match_wins() {
    let res = dispatcher().dispatch(request("GET", "/users/me", b"")).await;
    assert_eq!(res.body().as_ref(), b"me");
}

#[tokio::test]
async fn passes_body_through() {
    let res = dispatcher().dispatch(request("POST", "/users", b"alice")).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(res.headers()["location"], "/users/99");
    assert_eq!(res.body().as_ref(), b"alice");
}

#[tokio::test]
async fn unknown_path_is_404() {
    let res = dispatcher().dispatch(request("GET", "/teams", b"")).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn known_path_wrong_method_is_405_with_allow() {
    let res = dispatcher().dispatch(request("DELETE", "/users", b"")).await;
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(res.headers()[ALLOW], "GET, POST");
}

#[tokio::test]
async fn unknown_method_is_405() {
    let res = dispatcher().dispatch(request("BREW", "/users", b"")).await;
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[test]
fn resolve_returns_route_and_params() {
    let d = dispatcher();
    let (route, params) = d.resolve(Method::Get, "/users/7").unwrap().unwrap();
    assert_eq!(route.template(), "/users/{id}");
    assert_eq!(params.get("id"), Some("7"));
    assert!(d.resolve(Method::Put, "/users/7").unwrap().is_none());
}

#[tokio::test]
async fn clones_share_one_table_across_tasks() {
    let d = dispatcher();
    let mut tasks = tokio::task::JoinSet::new();
    for i in 0..16 {
        let d = d.clone();
        tasks.spawn(async move {
            let res = d.dispatch(request("GET", &format!("/users/{i}"), b"")).await;
            assert_eq!(res.status(), StatusCode::OK);
        });
    }
    while let Some(joined) = tasks.join_next().await {
        joined.unwrap();
    }
}
