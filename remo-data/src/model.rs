use std::sync::Arc;

use futures_util::future::BoxFuture;
use remo_core::router::{AuthBinder, OwnerLookup, Router};
use remo_core::AppError;

use crate::schema::{FieldSpec, ModelSchema};

/// Options for registering a data model.
pub struct ModelOptions {
    /// Model name; also the default collection name source.
    pub name: String,
    /// Backing collection, when it differs from the name.
    pub collection: Option<String>,
    /// Whether documents of this model carry an owning identity.
    pub auth: bool,
    pub schema: ModelSchema,
}

impl ModelOptions {
    pub fn new(name: impl Into<String>, schema: ModelSchema) -> Self {
        Self {
            name: name.into(),
            collection: None,
            auth: false,
            schema,
        }
    }

    pub fn collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = Some(collection.into());
        self
    }

    pub fn auth(mut self, auth: bool) -> Self {
        self.auth = auth;
        self
    }
}

/// A registered data model: the declared schema plus the implicit fields
/// every stored document carries (`_id`, `__v`, and the `__auth` owner
/// reference).
///
/// Persistence itself lives behind the data-layer boundary; the model only
/// carries what the documentation and authorization layers need.
pub struct Model {
    name: String,
    collection: String,
    schema: ModelSchema,
    owners: Option<Arc<dyn OwnerLookup>>,
}

impl Model {
    pub fn new(options: ModelOptions) -> Self {
        let mut schema = options.schema;
        let auth_ref = if options.auth {
            FieldSpec::object_id().required()
        } else {
            FieldSpec::object_id()
        };
        schema.insert("__auth".to_string(), auth_ref);
        schema.insert("_id".to_string(), FieldSpec::object_id());
        schema.insert("__v".to_string(), FieldSpec::number());

        let collection = options.collection.unwrap_or_else(|| options.name.clone());
        Self {
            name: options.name,
            collection,
            schema,
            owners: None,
        }
    }

    /// Attach the owner lookup used by ownership-based authorization.
    pub fn with_owners(mut self, owners: Arc<dyn OwnerLookup>) -> Self {
        self.owners = Some(owners);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn schema(&self) -> &ModelSchema {
        &self.schema
    }

    /// Build a router bound to this model, so `owns`-style authorization
    /// can resolve ownership of addressed documents.
    pub fn routes(self: &Arc<Self>, prefix: impl Into<String>, binder: Arc<dyn AuthBinder>) -> Router {
        Router::new(prefix)
            .bound_to(self.clone() as Arc<dyn OwnerLookup>)
            .auth_binder(binder)
    }
}

impl OwnerLookup for Model {
    fn owner_of(&self, id: &str) -> BoxFuture<'static, Result<Option<String>, AppError>> {
        match self.owners {
            Some(ref owners) => owners.owner_of(id),
            None => Box::pin(async { Err(AppError::Internal("model has no owner source".into())) }),
        }
    }
}
