pub mod config;
pub mod context;
pub mod error;
pub mod http;
pub mod json;
pub mod layers;
pub mod response;
pub mod router;

pub use config::{
    AppConfig, AuthConfig, AuthErrorMessages, AuthMessages, ConfigError, DocsConfig, DocsContact,
    DocsInfo, DocsLicense, DocsOptions,
};
pub use context::{AuthClaims, Context, Provider};
pub use error::AppError;
pub use json::deep_merge;
pub use layers::init_tracing;
pub use response::reply;
pub use router::{
    brace_style, compose, controller, middleware, AuthBinder, AuthKind, AuthSpec, Controller,
    Middleware, OwnerLookup, RouteEntry, Router,
};

/// Everything a typical application module needs.
pub mod prelude {
    pub use crate::config::AppConfig;
    pub use crate::context::Context;
    pub use crate::error::AppError;
    pub use crate::http::{Method, StatusCode};
    pub use crate::response::reply;
    pub use crate::router::{AuthKind, AuthSpec, RouteEntry, Router};
}
