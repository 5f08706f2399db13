use std::sync::Arc;

use serde_json::Value;

use remo_auth::{basic_auth_router, JwtAuth};
use remo_core::http::Router as HttpRouter;
use remo_core::router::Router;
use remo_core::AppConfig;
use remo_openapi::finalize;

/// Application assembly: collects routers, mounts the built-in auth routes
/// when enabled, and turns everything into one servable unit.
///
/// Routers that need authorization must be built with the binder and the
/// identity-attachment middleware before their routes are registered:
///
/// ```ignore
/// let auth = Arc::new(JwtAuth::new(config.auth.clone(), store));
/// let router = Router::new("/api/cats")
///     .middleware(auth.attach_identity())
///     .auth_binder(auth.clone())
///     .paths(entries);
///
/// let (service, document) = App::new(config).auth(auth).router(router).build();
/// axum::serve(listener, service).await?;
/// ```
pub struct App {
    config: AppConfig,
    routers: Vec<Router>,
    auth: Option<Arc<JwtAuth>>,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            routers: Vec::new(),
            auth: None,
        }
    }

    pub fn auth(mut self, auth: Arc<JwtAuth>) -> Self {
        self.auth = Some(auth);
        self
    }

    pub fn router(mut self, router: Router) -> Self {
        self.routers.push(router);
        self
    }

    /// Assemble the HTTP service and the aggregated documentation document.
    pub fn build(self) -> (HttpRouter, Value) {
        let mut routers = self.routers;
        if self.config.auth.enable_basic_auth {
            if let Some(auth) = self.auth.as_ref() {
                routers.push(basic_auth_router(auth.config(), auth.store().clone()));
            }
        }
        finalize(&self.config.docs, routers)
    }
}
