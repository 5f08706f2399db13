use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::http::{HeaderMap, Method};

/// Third-party identity provider linked to an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub openid: Option<String>,
}

/// The identity attached to a request after bearer-token verification.
///
/// Field names follow the token claim shape: the subject id is serialized
/// as `_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthClaims {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub providers: Vec<Provider>,
    /// Set by ownership middleware when the identity owns the addressed
    /// document. Never part of the token.
    #[serde(skip)]
    pub owns: bool,
}

/// Per-request context handed to middleware and controllers.
///
/// Built by the dispatch adapter from the incoming request; middleware pass
/// it through (possibly enriched), controllers consume it.
#[derive(Debug, Clone)]
pub struct Context {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    /// Route parameters from the matched path pattern.
    pub params: HashMap<String, String>,
    /// Decoded query-string pairs (last occurrence wins).
    pub query: HashMap<String, String>,
    /// Parsed request body. JSON object for JSON payloads, string otherwise,
    /// `Null` when the body is empty.
    pub fields: Value,
    pub auth: Option<AuthClaims>,
}

impl Context {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: HeaderMap::new(),
            params: HashMap::new(),
            query: HashMap::new(),
            fields: Value::Null,
            auth: None,
        }
    }

    /// Get a route parameter by name.
    pub fn path_param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Get a raw query-string value by name.
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }

    /// Body field accessor for JSON payloads.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}
