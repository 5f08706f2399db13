//! Startup-phase documentation aggregation: merging per-router doc trees,
//! synthesizing OPTIONS responders, and serving the final document.

use std::sync::Arc;

use serde_json::{json, Map, Value};

use remo_core::config::{DocsConfig, DocsOptions};
use remo_core::http::{header, routing, Html, IntoResponse, Json, Router as HttpRouter};
use remo_core::json::deep_merge;
use remo_core::router::{brace_style, compose, Router};

const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <title>API documentation</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@3/swagger-ui.css" />
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@3/swagger-ui-bundle.js"></script>
  <script>
    window.onload = function() {
      window.ui = SwaggerUIBundle({
        url: "{{path}}/index.json",
        dom_id: "#swagger-ui",
        deepLinking: true,
      });
    };
  </script>
</body>
</html>
"##;

/// Merge the documentation trees of every router, in registration order.
/// Later trees win on conflicting leaves.
pub fn merge_docs(routers: &[Router]) -> Map<String, Value> {
    let mut merged = json!({});
    for router in routers {
        deep_merge(&mut merged, &Value::Object(router.docs().clone()));
    }
    match merged {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// Synthesize one OPTIONS responder per documented path, advertising the
/// documented verbs through the `Allow` header.
pub fn options_service(paths: &Map<String, Value>) -> HttpRouter {
    let mut service = HttpRouter::new();
    for (path, verbs) in paths {
        let allow = verbs
            .as_object()
            .map(|verbs| {
                verbs
                    .keys()
                    .cloned()
                    .collect::<Vec<_>>()
                    .join(",")
                    .to_uppercase()
            })
            .unwrap_or_default();
        let dispatch = brace_style(path);
        let dispatch = if dispatch.is_empty() { "/".to_string() } else { dispatch };
        let handler = move || {
            let allow = allow.clone();
            async move { ([(header::ALLOW, allow)], "").into_response() }
        };
        service = service.route(&dispatch, routing::options(handler));
    }
    service
}

/// Rewrite colon-style parameter segments to the brace display form, in the
/// documentation tree only. The colon-form key is removed.
pub fn rewrite_paths(paths: &mut Map<String, Value>) {
    let colon_keys: Vec<String> = paths
        .keys()
        .filter(|key| key.contains(':'))
        .cloned()
        .collect();
    for key in colon_keys {
        if let Some(entry) = paths.shift_remove(&key) {
            paths.insert(brace_style(&key), entry);
        }
    }
}

/// Assemble the aggregated document: the configured header fields, the
/// merged path tree, and the bearer security definition.
pub fn build_document(options: &DocsOptions, paths: Map<String, Value>) -> Value {
    let mut document = serde_json::to_value(options).unwrap_or_else(|_| json!({}));
    document["paths"] = Value::Object(paths);
    document["securityDefinitions"] = json!({
        "Bearer": {
            "description": "Authorization header using the Bearer schema. More info at [https://jwt.io/introduction/](https://jwt.io/introduction/)",
            "in": "header",
            "name": "Authorization",
            "type": "apiKey",
        },
    });
    document
}

/// Serve the documentation UI and the aggregated document itself.
pub fn docs_service(config: &DocsConfig, document: Value) -> HttpRouter {
    let mount = config.path.trim_end_matches('/');
    let page_route = if mount.is_empty() { "/".to_string() } else { mount.to_string() };
    let json_route = format!("{mount}/index.json");

    let page = INDEX_HTML.replace("{{path}}", mount);
    let document = Arc::new(document);

    HttpRouter::new()
        .route(
            &page_route,
            routing::get(move || {
                let page = page.clone();
                async move { Html(page) }
            }),
        )
        .route(
            &json_route,
            routing::get(move || {
                let document = document.clone();
                async move { Json((*document).clone()) }
            }),
        )
}

/// Assemble the whole application service.
///
/// Runs once at startup: merges every router's documentation tree, mounts
/// the synthesized OPTIONS responders and the documentation routes next to
/// the live routes, and returns the aggregated document alongside the
/// service. Routers binding the same path+verb are composed with the same
/// last-wins rule the docs merge applies.
pub fn finalize(config: &DocsConfig, routers: Vec<Router>) -> (HttpRouter, Value) {
    let mut paths = merge_docs(&routers);
    let options = options_service(&paths);
    rewrite_paths(&mut paths);
    let document = build_document(&config.options, paths);

    let service = compose(routers)
        .merge(options)
        .merge(docs_service(config, document.clone()));
    (service, document)
}
