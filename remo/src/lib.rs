//! Remo — a REST framework with co-registered Swagger documentation.
//!
//! Routes are declared once, as [`remo_core::router::RouteEntry`] values;
//! registration produces the live dispatch bindings and the matching
//! documentation entries as a single unit, so the docs cannot drift from
//! the routes. Data-model schemas project into the documentation, JWT
//! bearer identities drive per-route authorization, and startup merges
//! every router's documentation tree into one aggregated document served
//! next to the API.
//!
//! ```ignore
//! use remo::prelude::*;
//!
//! let config = AppConfig::from_yaml_file("config.yaml")?;
//! let auth = Arc::new(JwtAuth::new(config.auth.clone(), store));
//! let cats = Arc::new(Model::new(ModelOptions::new("cat", schema).auth(true)));
//!
//! let router = cats
//!     .routes("/api/cats", auth.clone())
//!     .middleware(auth.attach_identity())
//!     .paths(entries);
//!
//! let (service, _document) = App::new(config).auth(auth).router(router).build();
//! axum::serve(listener, service).await?;
//! ```

mod app;

pub use app::App;

pub use remo_core::*;

pub use remo_auth;
pub use remo_core;
pub use remo_data;
pub use remo_openapi;

pub mod prelude {
    pub use crate::App;
    pub use remo_auth::prelude::*;
    pub use remo_core::prelude::*;
    pub use remo_data::prelude::*;
    pub use remo_openapi::prelude::*;
}
