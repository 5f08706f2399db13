//! Built-in username/password routes, mounted when basic auth is enabled.

use std::sync::Arc;

use serde_json::json;

use remo_core::config::AuthConfig;
use remo_core::http::{Method, StatusCode};
use remo_core::router::{controller, RouteEntry, Router};
use remo_core::{reply, AppError, AuthClaims};

use crate::middleware::{AuthAccount, AuthStore};
use crate::token::sign_token;

fn claims_for(account: &AuthAccount) -> AuthClaims {
    AuthClaims {
        id: account.id.clone(),
        username: account.username.clone(),
        roles: account.roles.clone(),
        providers: account.providers.clone(),
        owns: false,
    }
}

fn field_str(ctx: &remo_core::Context, name: &str) -> String {
    ctx.field(name)
        .and_then(|value| value.as_str())
        .unwrap_or_default()
        .to_string()
}

/// The `/auth/basic` router: sign in, sign up, reset password.
pub fn basic_auth_router(config: &AuthConfig, store: Arc<dyn AuthStore>) -> Router {
    let signin = {
        let config = config.clone();
        let store = store.clone();
        controller(move |ctx| {
            let config = config.clone();
            let store = store.clone();
            async move {
                let username = field_str(&ctx, "username");
                let password = field_str(&ctx, "password");
                let account = store.find_by_username(&username).await?.ok_or_else(|| {
                    AppError::Forbidden(config.messages.errors.username_not_registered.clone())
                })?;
                if !store.verify_password(&account, &password).await? {
                    return Err(AppError::Forbidden(
                        config.messages.errors.invalid_password.clone(),
                    ));
                }
                let token = sign_token(&config, &claims_for(&account))?;
                Ok(reply(StatusCode::OK, Some(json!({ "token": token }))))
            }
        })
    };

    let signup = {
        let config = config.clone();
        let store = store.clone();
        controller(move |ctx| {
            let config = config.clone();
            let store = store.clone();
            async move {
                let username = field_str(&ctx, "username");
                let password = field_str(&ctx, "password");
                let account = store
                    .create(&username, &password, &config.default_roles)
                    .await?;
                let token = sign_token(&config, &claims_for(&account))?;
                Ok(reply(StatusCode::CREATED, Some(json!({ "token": token }))))
            }
        })
    };

    let reset = {
        let config = config.clone();
        let store = store.clone();
        controller(move |ctx| {
            let config = config.clone();
            let store = store.clone();
            async move {
                let username = field_str(&ctx, "username");
                let account = store.find_by_username(&username).await?.ok_or_else(|| {
                    AppError::Forbidden(config.messages.errors.username_not_registered.clone())
                })?;
                let old_password = field_str(&ctx, "oldPassword");
                if !store.verify_password(&account, &old_password).await? {
                    return Err(AppError::Forbidden(
                        config.messages.errors.invalid_password.clone(),
                    ));
                }
                let new_password = field_str(&ctx, "newPassword");
                store.set_password(&account, &new_password).await?;
                Ok(reply(StatusCode::NO_CONTENT, None))
            }
        })
    };

    let credentials_body = json!({
        "in": "body",
        "name": "body",
        "required": true,
        "schema": {
            "type": "object",
            "properties": {
                "username": { "type": "string" },
                "password": { "type": "string", "format": "password" },
            },
            "xml": { "name": "xml" },
        },
    });
    let token_response = json!({
        "description": "Successful operation",
        "schema": {
            "type": "object",
            "properties": {
                "token": { "type": "string" },
            },
            "xml": { "name": "xml" },
        },
    });

    Router::new("/auth/basic").paths([
        RouteEntry::new("/signin", [Method::POST], signin)
            .tags(["Auth"])
            .summary("Sign in")
            .description("Sign in with username and password")
            .consumes(["application/json"])
            .produces(["application/json"])
            .parameter(credentials_body.clone())
            .response(200, token_response.clone())
            .response(403, json!({ "description": "Failed" })),
        RouteEntry::new("/signup", [Method::POST], signup)
            .tags(["Auth"])
            .summary("Sign up")
            .description("Sign up with username and password")
            .consumes(["application/json"])
            .produces(["application/json"])
            .parameter(credentials_body)
            .response(201, token_response)
            .response(403, json!({ "description": "Failed" })),
        RouteEntry::new("/reset", [Method::POST], reset)
            .tags(["Auth"])
            .summary("Reset password")
            .description("Reset password")
            .consumes(["application/json"])
            .produces(["text/plain"])
            .parameter(json!({
                "in": "body",
                "name": "body",
                "required": true,
                "schema": {
                    "type": "object",
                    "properties": {
                        "username": { "type": "string" },
                        "oldPassword": { "type": "string", "format": "password" },
                        "newPassword": { "type": "string", "format": "password" },
                    },
                    "xml": { "name": "xml" },
                },
            }))
            .response(204, json!({ "description": "Successful operation" }))
            .response(403, json!({ "description": "Failed" })),
    ])
}
