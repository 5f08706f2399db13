//! Authorization middleware: identity attachment plus the five route-level
//! guards, resolved from route annotations through [`JwtAuth`].

use std::sync::Arc;

use futures_util::future::BoxFuture;

use remo_core::config::AuthConfig;
use remo_core::router::{middleware, AuthBinder, AuthKind, AuthSpec, Middleware, OwnerLookup};
use remo_core::{AppError, Context, Provider};

use crate::token::{header_token, verify_token};

/// A stored account, as the authorization layer sees it.
#[derive(Debug, Clone)]
pub struct AuthAccount {
    pub id: String,
    pub username: String,
    pub roles: Vec<String>,
    pub providers: Vec<Provider>,
}

/// Backing store for accounts.
///
/// Credential hashing lives behind this trait; the middleware never sees a
/// password beyond passing it through for verification.
pub trait AuthStore: Send + Sync {
    /// Whether an account with this id still exists.
    fn exists(&self, id: &str) -> BoxFuture<'static, Result<bool, AppError>>;

    fn find_by_username(
        &self,
        username: &str,
    ) -> BoxFuture<'static, Result<Option<AuthAccount>, AppError>>;

    /// Create an account. The store validates the credentials (blank or
    /// duplicate username, blank password) and reports violations as
    /// data-format errors.
    fn create(
        &self,
        username: &str,
        password: &str,
        roles: &[String],
    ) -> BoxFuture<'static, Result<AuthAccount, AppError>>;

    fn verify_password(
        &self,
        account: &AuthAccount,
        password: &str,
    ) -> BoxFuture<'static, Result<bool, AppError>>;

    fn set_password(
        &self,
        account: &AuthAccount,
        password: &str,
    ) -> BoxFuture<'static, Result<(), AppError>>;
}

/// Attach the verified bearer identity to the context.
///
/// Runs before every route; a missing or invalid token leaves the identity
/// unset rather than failing, so unauthenticated routes stay reachable.
pub fn attach_identity(config: &AuthConfig) -> Middleware {
    let config = config.clone();
    middleware(move |mut ctx: Context| {
        let config = config.clone();
        async move {
            ctx.auth = header_token(&ctx.headers).and_then(|token| verify_token(&config, token));
            Ok(ctx)
        }
    })
}

async fn authenticated(
    config: &AuthConfig,
    store: &Arc<dyn AuthStore>,
    ctx: Context,
) -> Result<Context, AppError> {
    let Some(auth) = ctx.auth.as_ref() else {
        return Err(AppError::Unauthorized(
            config.messages.errors.unauthorized.clone(),
        ));
    };
    if !store.exists(&auth.id).await? {
        return Err(AppError::NotAcceptable(
            config.messages.errors.invalid_token.clone(),
        ));
    }
    Ok(ctx)
}

/// Pass anonymous requests through; reject a presented identity whose
/// account no longer exists.
pub fn attach(config: &AuthConfig, store: Arc<dyn AuthStore>) -> Middleware {
    let config = config.clone();
    middleware(move |ctx: Context| {
        let config = config.clone();
        let store = store.clone();
        async move {
            if let Some(auth) = ctx.auth.as_ref() {
                if !store.exists(&auth.id).await? {
                    return Err(AppError::NotAcceptable(
                        config.messages.errors.invalid_token.clone(),
                    ));
                }
            }
            Ok(ctx)
        }
    })
}

/// Require a verified identity backed by a live account.
pub fn is_authenticated(config: &AuthConfig, store: Arc<dyn AuthStore>) -> Middleware {
    let config = config.clone();
    middleware(move |ctx: Context| {
        let config = config.clone();
        let store = store.clone();
        async move { authenticated(&config, &store, ctx).await }
    })
}

/// Require every listed role. An empty role list degenerates to
/// [`is_authenticated`].
pub fn has_roles(config: &AuthConfig, store: Arc<dyn AuthStore>, roles: Vec<String>) -> Middleware {
    let config = config.clone();
    middleware(move |ctx: Context| {
        let config = config.clone();
        let store = store.clone();
        let roles = roles.clone();
        async move {
            let ctx = authenticated(&config, &store, ctx).await?;
            require_roles(&config, &ctx, &roles)?;
            Ok(ctx)
        }
    })
}

/// Require that the identity owns the addressed document, per the owner
/// recorded on it. A missing document is treated as not owned.
pub fn owns(
    config: &AuthConfig,
    store: Arc<dyn AuthStore>,
    model: Arc<dyn OwnerLookup>,
) -> Middleware {
    let config = config.clone();
    middleware(move |ctx: Context| {
        let config = config.clone();
        let store = store.clone();
        let model = model.clone();
        async move {
            let mut ctx = authenticated(&config, &store, ctx).await?;
            if !is_owner(&model, &ctx).await? {
                return Err(AppError::Forbidden(String::new()));
            }
            if let Some(auth) = ctx.auth.as_mut() {
                auth.owns = true;
            }
            Ok(ctx)
        }
    })
}

/// Ownership first; a non-owner falls through to the role check.
pub fn owns_or_has_roles(
    config: &AuthConfig,
    store: Arc<dyn AuthStore>,
    model: Arc<dyn OwnerLookup>,
    roles: Vec<String>,
) -> Middleware {
    let config = config.clone();
    middleware(move |ctx: Context| {
        let config = config.clone();
        let store = store.clone();
        let model = model.clone();
        let roles = roles.clone();
        async move {
            let mut ctx = authenticated(&config, &store, ctx).await?;
            if is_owner(&model, &ctx).await? {
                if let Some(auth) = ctx.auth.as_mut() {
                    auth.owns = true;
                }
            } else {
                require_roles(&config, &ctx, &roles)?;
            }
            Ok(ctx)
        }
    })
}

async fn is_owner(model: &Arc<dyn OwnerLookup>, ctx: &Context) -> Result<bool, AppError> {
    let id = ctx.path_param("id").unwrap_or_default();
    let owner = model.owner_of(id).await?;
    Ok(match (owner, ctx.auth.as_ref()) {
        (Some(owner), Some(auth)) => owner == auth.id,
        _ => false,
    })
}

fn require_roles(config: &AuthConfig, ctx: &Context, roles: &[String]) -> Result<(), AppError> {
    let granted = ctx.auth.as_ref().map(|auth| auth.roles.as_slice());
    for role in roles {
        if !granted.is_some_and(|granted| granted.contains(role)) {
            return Err(AppError::Forbidden(
                config.messages.errors.no_permission.clone(),
            ));
        }
    }
    Ok(())
}

/// Resolves route authorization annotations into middleware.
pub struct JwtAuth {
    config: AuthConfig,
    store: Arc<dyn AuthStore>,
}

impl JwtAuth {
    pub fn new(config: AuthConfig, store: Arc<dyn AuthStore>) -> Self {
        Self { config, store }
    }

    /// The identity-attachment middleware, for router-wide installation.
    pub fn attach_identity(&self) -> Middleware {
        attach_identity(&self.config)
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<dyn AuthStore> {
        &self.store
    }
}

impl AuthBinder for JwtAuth {
    fn bind(&self, spec: &AuthSpec, model: Option<&Arc<dyn OwnerLookup>>) -> Middleware {
        match spec.kind.unwrap_or(AuthKind::Attach) {
            AuthKind::Attach => attach(&self.config, self.store.clone()),
            AuthKind::IsAuthenticated => is_authenticated(&self.config, self.store.clone()),
            AuthKind::HasRoles => {
                has_roles(&self.config, self.store.clone(), spec.roles.clone())
            }
            AuthKind::Owns => match model {
                Some(model) => owns(&self.config, self.store.clone(), model.clone()),
                None => unbound_model(),
            },
            AuthKind::OwnsOrHasRoles => match model {
                Some(model) => owns_or_has_roles(
                    &self.config,
                    self.store.clone(),
                    model.clone(),
                    spec.roles.clone(),
                ),
                None => unbound_model(),
            },
        }
    }
}

// Ownership checks on a router without a bound model surface at request
// time, not at registration.
fn unbound_model() -> Middleware {
    middleware(|_ctx| async {
        Err(AppError::Internal(
            "ownership check requires a bound model".into(),
        ))
    })
}
