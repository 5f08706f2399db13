use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, OnceLock};

use futures_util::future::BoxFuture;
use regex::Regex;
use serde_json::{json, Map, Value};
use tracing::warn;

use crate::context::Context;
use crate::error::AppError;
use crate::http::{
    routing, to_bytes, IntoResponse, Method, MethodFilter, MethodRouter, RawPathParams, Request,
    Response, Router as HttpRouter,
};

/// Largest request body the dispatch adapter will buffer.
const BODY_LIMIT: usize = 1024 * 1024;

/// A route handler: consumes the request context, produces a response.
pub type Controller =
    Arc<dyn Fn(Context) -> BoxFuture<'static, Result<Response, AppError>> + Send + Sync>;

/// A middleware step: passes the context through, possibly enriched, or
/// short-circuits with an error.
pub type Middleware =
    Arc<dyn Fn(Context) -> BoxFuture<'static, Result<Context, AppError>> + Send + Sync>;

/// Wrap an async fn as a [`Controller`].
pub fn controller<F, Fut>(f: F) -> Controller
where
    F: Fn(Context) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Response, AppError>> + Send + 'static,
{
    Arc::new(move |ctx| Box::pin(f(ctx)))
}

/// Wrap an async fn as a [`Middleware`].
pub fn middleware<F, Fut>(f: F) -> Middleware
where
    F: Fn(Context) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Context, AppError>> + Send + 'static,
{
    Arc::new(move |ctx| Box::pin(f(ctx)))
}

/// The authorization flavor a route asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthKind {
    Attach,
    IsAuthenticated,
    Owns,
    HasRoles,
    OwnsOrHasRoles,
}

impl AuthKind {
    /// The name used in documentation annotations.
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthKind::Attach => "attach",
            AuthKind::IsAuthenticated => "isAuthenticated",
            AuthKind::Owns => "owns",
            AuthKind::HasRoles => "hasRoles",
            AuthKind::OwnsOrHasRoles => "ownsOrHasRoles",
        }
    }
}

/// Authorization requirement on a route. An absent kind means [`AuthKind::Attach`].
#[derive(Debug, Clone, Default)]
pub struct AuthSpec {
    pub kind: Option<AuthKind>,
    pub roles: Vec<String>,
}

impl AuthSpec {
    pub fn new(kind: AuthKind) -> Self {
        Self {
            kind: Some(kind),
            roles: Vec::new(),
        }
    }

    pub fn with_roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roles = roles.into_iter().map(Into::into).collect();
        self
    }

    fn kind(&self) -> AuthKind {
        self.kind.unwrap_or(AuthKind::Attach)
    }
}

/// Lookup of the owner recorded on a document, implemented by data models.
///
/// Returns the owner id when the document exists.
pub trait OwnerLookup: Send + Sync {
    fn owner_of(&self, id: &str) -> BoxFuture<'static, Result<Option<String>, AppError>>;
}

/// Resolves an [`AuthSpec`] into the middleware that enforces it.
///
/// Implemented by the auth crate; the router only knows this seam so the
/// core carries no authentication logic.
pub trait AuthBinder: Send + Sync {
    fn bind(&self, spec: &AuthSpec, model: Option<&Arc<dyn OwnerLookup>>) -> Middleware;
}

/// A declarative route: path, verbs, handler, optional authorization, and
/// the documentation metadata registered alongside the dispatch binding.
///
/// Immutable once handed to [`Router::paths`].
#[derive(Clone)]
pub struct RouteEntry {
    pub path: String,
    pub methods: Vec<Method>,
    pub controller: Controller,
    pub auth: Option<AuthSpec>,
    pub tags: Vec<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub consumes: Vec<String>,
    pub produces: Vec<String>,
    pub parameters: Vec<Value>,
    pub responses: Map<String, Value>,
}

impl RouteEntry {
    pub fn new<I>(path: impl Into<String>, methods: I, controller: Controller) -> Self
    where
        I: IntoIterator<Item = Method>,
    {
        Self {
            path: path.into(),
            methods: methods.into_iter().collect(),
            controller,
            auth: None,
            tags: Vec::new(),
            summary: None,
            description: None,
            consumes: Vec::new(),
            produces: Vec::new(),
            parameters: Vec::new(),
            responses: Map::new(),
        }
    }

    pub fn auth(mut self, spec: AuthSpec) -> Self {
        self.auth = Some(spec);
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn consumes<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.consumes = types.into_iter().map(Into::into).collect();
        self
    }

    pub fn produces<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.produces = types.into_iter().map(Into::into).collect();
        self
    }

    pub fn parameter(mut self, parameter: Value) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn response(mut self, status: u16, body: Value) -> Self {
        self.responses.insert(status.to_string(), body);
        self
    }

    /// The documentation fields of this entry — everything except `path`,
    /// `methods`, `controller`, and `auth`.
    fn doc_fields(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        if !self.tags.is_empty() {
            fields.insert("tags".into(), json!(self.tags));
        }
        if let Some(ref summary) = self.summary {
            fields.insert("summary".into(), json!(summary));
        }
        if let Some(ref description) = self.description {
            fields.insert("description".into(), json!(description));
        }
        if !self.consumes.is_empty() {
            fields.insert("consumes".into(), json!(self.consumes));
        }
        if !self.produces.is_empty() {
            fields.insert("produces".into(), json!(self.produces));
        }
        if !self.parameters.is_empty() {
            fields.insert("parameters".into(), json!(self.parameters));
        }
        if !self.responses.is_empty() {
            fields.insert("responses".into(), Value::Object(self.responses.clone()));
        }
        fields
    }
}

struct Binding {
    method: Method,
    path: String,
    chain: Vec<Middleware>,
    controller: Controller,
}

/// Route registrar: binds declarative [`RouteEntry`]s into a live dispatch
/// table and a parallel documentation tree, as one atomic unit.
///
/// The documentation tree maps `path -> verb -> documentation entry` and is
/// only ever built together with the dispatch bindings.
pub struct Router {
    prefix: String,
    docs: Map<String, Value>,
    bindings: Vec<Binding>,
    bound: HashMap<(String, String), usize>,
    model: Option<Arc<dyn OwnerLookup>>,
    binder: Option<Arc<dyn AuthBinder>>,
    middleware: Vec<Middleware>,
}

impl Router {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            docs: Map::new(),
            bindings: Vec::new(),
            bound: HashMap::new(),
            model: None,
            binder: None,
            middleware: Vec::new(),
        }
    }

    /// Bind a data model, required by ownership-based authorization.
    pub fn bound_to(mut self, model: Arc<dyn OwnerLookup>) -> Self {
        self.model = Some(model);
        self
    }

    /// Set the resolver for route authorization requirements.
    pub fn auth_binder(mut self, binder: Arc<dyn AuthBinder>) -> Self {
        self.binder = Some(binder);
        self
    }

    /// Router-wide middleware, run before every route's own chain
    /// (e.g. bearer-token identity attachment).
    pub fn middleware(mut self, mw: Middleware) -> Self {
        self.middleware.push(mw);
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The documentation tree accumulated so far.
    pub fn docs(&self) -> &Map<String, Value> {
        &self.docs
    }

    /// Register route entries: for every declared verb, the dispatch binding
    /// and the documentation entry are created together.
    ///
    /// Registering the same path+verb again shallow-merges the documentation
    /// fields (last writer wins per key) and replaces the live binding.
    pub fn paths<I>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = RouteEntry>,
    {
        for entry in entries {
            for method in entry.methods.clone() {
                let verb = method.as_str().to_lowercase();

                // Documentation key: prefix + path, with a single trailing
                // slash stripped.
                let mut full = format!("{}{}", self.prefix, entry.path);
                if full.ends_with('/') {
                    full.truncate(full.len() - 1);
                }

                let mut chain = self.middleware.clone();
                if let Some(ref spec) = entry.auth {
                    chain.push(self.resolve_auth(spec));
                }

                let path_docs = self
                    .docs
                    .entry(full.clone())
                    .or_insert_with(|| Value::Object(Map::new()));
                let verb_docs = path_docs
                    .as_object_mut()
                    .expect("docs path node is always an object")
                    .entry(verb)
                    .or_insert_with(|| Value::Object(Map::new()));
                let doc = verb_docs
                    .as_object_mut()
                    .expect("docs verb node is always an object");
                for (key, value) in entry.doc_fields() {
                    doc.insert(key, value);
                }

                if let Some(ref spec) = entry.auth {
                    doc.insert("security".into(), json!([{ "Bearer": [] }]));
                    let existing = doc
                        .get("description")
                        .and_then(Value::as_str)
                        .unwrap_or("")
                        .to_string();
                    let mut affix =
                        format!("<br />\n<b>Authorization:</b> {}", spec.kind().as_str());
                    if !spec.roles.is_empty() {
                        affix.push_str(&format!("\n<b>Roles:</b> {}", spec.roles.join(",")));
                    }
                    doc.insert("description".into(), Value::String(existing + &affix));
                }

                self.bind(method, full, chain, entry.controller.clone());
            }
        }
        self
    }

    fn resolve_auth(&self, spec: &AuthSpec) -> Middleware {
        match self.binder {
            Some(ref binder) => binder.bind(spec, self.model.as_ref()),
            None => middleware(|_ctx| async {
                Err(AppError::Internal("no auth binder configured".into()))
            }),
        }
    }

    fn bind(&mut self, method: Method, path: String, chain: Vec<Middleware>, ctrl: Controller) {
        let key = (path.clone(), method.as_str().to_string());
        let binding = Binding {
            method,
            path,
            chain,
            controller: ctrl,
        };
        match self.bound.get(&key) {
            // Last registration wins; the underlying HTTP router rejects
            // true duplicates.
            Some(&index) => self.bindings[index] = binding,
            None => {
                self.bound.insert(key, self.bindings.len());
                self.bindings.push(binding);
            }
        }
    }

    /// Turn the accumulated bindings into a live HTTP service.
    ///
    /// Colon-style `:name` segments are translated to `{name}` at this
    /// boundary only; declared paths and the documentation tree keep their
    /// original syntax.
    pub fn into_service(self) -> HttpRouter {
        compose(vec![self])
    }
}

/// Build one live service from several routers.
///
/// Cross-router path+verb collisions resolve to the last registration,
/// mirroring the docs merge rule; the underlying HTTP router never sees a
/// duplicate method route.
pub fn compose(routers: Vec<Router>) -> HttpRouter {
    let mut bindings: Vec<Binding> = Vec::new();
    let mut bound: HashMap<(String, String), usize> = HashMap::new();
    for router in routers {
        for binding in router.bindings {
            let key = (binding.path.clone(), binding.method.as_str().to_string());
            match bound.get(&key) {
                Some(&index) => bindings[index] = binding,
                None => {
                    bound.insert(key, bindings.len());
                    bindings.push(binding);
                }
            }
        }
    }

    let mut routes: Vec<(String, MethodRouter)> = Vec::new();
    for binding in bindings {
        let Some(filter) = method_filter(&binding.method) else {
            warn!(method = %binding.method, path = %binding.path, "unroutable method, skipped");
            continue;
        };
        let path = dispatch_path(&binding.path);
        let handler = make_handler(binding.chain, binding.controller);
        match routes.iter_mut().find(|(p, _)| *p == path) {
            Some((_, method_router)) => {
                *method_router = std::mem::take(method_router).on(filter, handler);
            }
            None => routes.push((path, routing::on(filter, handler))),
        }
    }

    let mut service = HttpRouter::new();
    for (path, method_router) in routes {
        service = service.route(&path, method_router);
    }
    service
}

/// Translate koa-style `:name` path segments into `{name}` syntax, as used
/// both by the HTTP router and by documentation-tool path keys.
pub fn brace_style(path: &str) -> String {
    static PARAM: OnceLock<Regex> = OnceLock::new();
    let re = PARAM.get_or_init(|| Regex::new(r":(\w+)").expect("static pattern"));
    re.replace_all(path, "{$1}").into_owned()
}

fn dispatch_path(path: &str) -> String {
    let braced = brace_style(path);
    if braced.is_empty() {
        "/".to_string()
    } else {
        braced
    }
}

fn method_filter(method: &Method) -> Option<MethodFilter> {
    MethodFilter::try_from(method.clone()).ok()
}

fn make_handler(
    chain: Vec<Middleware>,
    ctrl: Controller,
) -> impl Fn(RawPathParams, Request) -> BoxFuture<'static, Response> + Clone + Send + Sync + 'static {
    let chain = Arc::new(chain);
    move |params: RawPathParams, req: Request| {
        let chain = chain.clone();
        let ctrl = ctrl.clone();
        Box::pin(async move {
            let mut ctx = match context_from(params, req).await {
                Ok(ctx) => ctx,
                Err(err) => return err.into_response(),
            };
            for mw in chain.iter() {
                match mw(ctx).await {
                    Ok(next) => ctx = next,
                    Err(err) => return err.into_response(),
                }
            }
            match ctrl(ctx).await {
                Ok(response) => response,
                Err(err) => err.into_response(),
            }
        })
    }
}

/// Assemble a [`Context`] from the raw request.
async fn context_from(params: RawPathParams, req: Request) -> Result<Context, AppError> {
    let (parts, body) = req.into_parts();

    let mut query = HashMap::new();
    if let Some(raw) = parts.uri.query() {
        for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
            query.insert(key.into_owned(), value.into_owned());
        }
    }

    let mut path_params = HashMap::new();
    for (key, value) in params.iter() {
        path_params.insert(key.to_string(), value.to_string());
    }

    let bytes = to_bytes(body, BODY_LIMIT)
        .await
        .map_err(|err| AppError::BadRequest(err.to_string()))?;
    let fields = if bytes.is_empty() {
        Value::Null
    } else {
        match serde_json::from_slice(&bytes) {
            Ok(value) => value,
            Err(_) => Value::String(String::from_utf8_lossy(&bytes).into_owned()),
        }
    };

    Ok(Context {
        method: parts.method,
        path: parts.uri.path().to_string(),
        headers: parts.headers,
        params: path_params,
        query,
        fields,
        auth: None,
    })
}
