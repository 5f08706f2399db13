use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use remo_core::http::{Body, Method, Request, StatusCode};
use remo_core::router::{
    brace_style, compose, controller, middleware, AuthKind, AuthSpec, RouteEntry, Router,
};
use remo_core::{reply, AppError};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn ok_controller(tag: &'static str) -> remo_core::Controller {
    controller(move |_ctx| async move { Ok(reply(StatusCode::OK, Some(json!({ "tag": tag })))) })
}

async fn send(
    service: remo_core::http::Router,
    method: Method,
    path: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request = match body {
        Some(value) => Request::builder()
            .method(method)
            .uri(path)
            .header("content-type", "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(path)
            .body(Body::empty())
            .unwrap(),
    };
    let response = service.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

// ── Co-registration of docs and dispatch ────────────────────────────────────

#[test]
fn registration_creates_docs_and_binding_together() {
    let router = Router::new("/api/cats").paths([RouteEntry::new(
        "/",
        [Method::GET, Method::POST],
        ok_controller("list"),
    )
    .tags(["Cat"])
    .summary("List cats")]);

    let docs = router.docs();
    // single trailing slash stripped from the docs key
    let entry = docs.get("/api/cats").expect("docs key");
    assert!(entry.get("get").is_some());
    assert!(entry.get("post").is_some());
    assert_eq!(entry["get"]["summary"], "List cats");
    assert_eq!(entry["get"]["tags"], json!(["Cat"]));
}

#[test]
fn doc_entry_excludes_structural_fields() {
    let router = Router::new("/api/cats").paths([RouteEntry::new(
        "/:id",
        [Method::GET],
        ok_controller("show"),
    )
    .summary("Show")]);

    let doc = &router.docs()["/api/cats/:id"]["get"];
    let doc = doc.as_object().unwrap();
    assert!(!doc.contains_key("path"));
    assert!(!doc.contains_key("methods"));
    assert!(!doc.contains_key("controller"));
    assert!(!doc.contains_key("auth"));
}

#[test]
fn docs_keep_colon_syntax() {
    let router = Router::new("/api/cats").paths([RouteEntry::new(
        "/:id",
        [Method::GET],
        ok_controller("show"),
    )]);
    assert!(router.docs().contains_key("/api/cats/:id"));
}

#[test]
fn auth_annotation_adds_security_and_description_affix() {
    let router = Router::new("/api/cats").paths([RouteEntry::new(
        "/",
        [Method::GET],
        ok_controller("list"),
    )
    .description("List")
    .auth(AuthSpec::new(AuthKind::HasRoles).with_roles(["admin", "ops"]))]);

    let doc = &router.docs()["/api/cats"]["get"];
    assert_eq!(doc["security"], json!([{ "Bearer": [] }]));
    let description = doc["description"].as_str().unwrap();
    assert!(description.starts_with("List<br />\n<b>Authorization:</b> hasRoles"));
    assert!(description.ends_with("\n<b>Roles:</b> admin,ops"));
}

#[test]
fn auth_affix_without_roles_omits_roles_line() {
    let router = Router::new("/api/cats").paths([RouteEntry::new(
        "/",
        [Method::GET],
        ok_controller("list"),
    )
    .auth(AuthSpec::new(AuthKind::IsAuthenticated))]);

    let description = router.docs()["/api/cats"]["get"]["description"]
        .as_str()
        .unwrap()
        .to_string();
    assert_eq!(description, "<br />\n<b>Authorization:</b> isAuthenticated");
}

#[test]
fn duplicate_registration_merges_docs_and_replaces_binding() {
    let router = Router::new("/api/cats").paths([
        RouteEntry::new("/", [Method::GET], ok_controller("first"))
            .summary("First")
            .description("Original"),
        RouteEntry::new("/", [Method::GET], ok_controller("second")).summary("Second"),
    ]);

    let doc = &router.docs()["/api/cats"]["get"];
    // last writer wins per key; untouched keys survive
    assert_eq!(doc["summary"], "Second");
    assert_eq!(doc["description"], "Original");
}

#[tokio::test]
async fn duplicate_registration_dispatches_to_last_controller() {
    let service = Router::new("/api/cats")
        .paths([
            RouteEntry::new("/", [Method::GET], ok_controller("first")),
            RouteEntry::new("/", [Method::GET], ok_controller("second")),
        ])
        .into_service();

    let (status, body) = send(service, Method::GET, "/api/cats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tag"], "second");
}

#[tokio::test]
async fn compose_resolves_cross_router_rebinding_to_the_last_router() {
    let first = Router::new("/api/cats")
        .paths([RouteEntry::new("/", [Method::GET], ok_controller("first"))]);
    let second = Router::new("/api/cats")
        .paths([RouteEntry::new("/", [Method::GET], ok_controller("second"))]);
    let service = compose(vec![first, second]);

    let (status, body) = send(service, Method::GET, "/api/cats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tag"], "second");
}

#[tokio::test]
async fn compose_keeps_distinct_verbs_on_a_shared_path() {
    let reads = Router::new("/api/cats")
        .paths([RouteEntry::new("/", [Method::GET], ok_controller("read"))]);
    let writes = Router::new("/api/cats")
        .paths([RouteEntry::new("/", [Method::POST], ok_controller("write"))]);
    let service = compose(vec![reads, writes]);

    let (status, body) = send(service.clone(), Method::GET, "/api/cats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tag"], "read");

    let (status, body) = send(service, Method::POST, "/api/cats", Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tag"], "write");
}

// ── Dispatch ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn dispatch_exposes_params_query_and_fields() {
    let echo = controller(|ctx| async move {
        Ok(reply(
            StatusCode::OK,
            Some(json!({
                "id": ctx.path_param("id"),
                "q": ctx.query_param("q"),
                "name": ctx.field("name"),
            })),
        ))
    });
    let service = Router::new("/api/cats")
        .paths([RouteEntry::new("/:id", [Method::PUT], echo)])
        .into_service();

    let (status, body) = send(
        service,
        Method::PUT,
        "/api/cats/42?q=felix",
        Some(json!({ "name": "Felix" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "42");
    assert_eq!(body["q"], "felix");
    assert_eq!(body["name"], "Felix");
}

#[tokio::test]
async fn middleware_runs_in_order_before_controller() {
    let first = middleware(|mut ctx| async move {
        ctx.params.insert("trace".into(), "a".into());
        Ok(ctx)
    });
    let second = middleware(|mut ctx| async move {
        let trace = ctx.params.get("trace").cloned().unwrap_or_default();
        ctx.params.insert("trace".into(), trace + "b");
        Ok(ctx)
    });
    let echo = controller(|ctx| async move {
        Ok(reply(
            StatusCode::OK,
            Some(json!({ "trace": ctx.path_param("trace") })),
        ))
    });

    let service = Router::new("/api")
        .middleware(first)
        .middleware(second)
        .paths([RouteEntry::new("/x", [Method::GET], echo)])
        .into_service();

    let (_, body) = send(service, Method::GET, "/api/x", None).await;
    assert_eq!(body["trace"], "ab");
}

#[tokio::test]
async fn middleware_error_short_circuits() {
    let deny = middleware(|_ctx| async { Err(AppError::Forbidden("No permission".into())) });
    let service = Router::new("/api")
        .middleware(deny)
        .paths([RouteEntry::new("/x", [Method::GET], ok_controller("x"))])
        .into_service();

    let (status, body) = send(service, Method::GET, "/api/x", None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["statusCode"], 403);
    assert_eq!(body["error"], "Forbidden");
    assert_eq!(body["message"], "No permission");
}

#[tokio::test]
async fn controller_error_renders_boom_payload() {
    let failing =
        controller(|_ctx| async { Err(AppError::NotFound("cat not found".into())) });
    let service = Router::new("/api")
        .paths([RouteEntry::new("/missing", [Method::GET], failing)])
        .into_service();

    let (status, body) = send(service, Method::GET, "/api/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not Found");
    assert_eq!(body["message"], "cat not found");
}

#[tokio::test]
async fn non_json_body_surfaces_as_string_fields() {
    let echo = controller(|ctx| async move {
        Ok(reply(StatusCode::OK, Some(json!({ "fields": ctx.fields }))))
    });
    let service = Router::new("/api")
        .paths([RouteEntry::new("/raw", [Method::POST], echo)])
        .into_service();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/raw")
        .body(Body::from("plain text"))
        .unwrap();
    let response = service.oneshot(request).await.unwrap();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["fields"], "plain text");
}

// ── Path syntax translation ─────────────────────────────────────────────────

#[test]
fn brace_style_rewrites_every_param() {
    assert_eq!(brace_style("/api/cats/:id"), "/api/cats/{id}");
    assert_eq!(brace_style("/a/:x/b/:y"), "/a/{x}/b/{y}");
    assert_eq!(brace_style("/plain"), "/plain");
}
