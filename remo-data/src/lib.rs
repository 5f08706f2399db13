pub mod model;
pub mod query;
pub mod schema;

pub use model::{Model, ModelOptions};
pub use query::{list_query, patch_updates, show_query};
pub use schema::{FieldKind, FieldSpec, ModelSchema};

pub mod prelude {
    pub use crate::model::{Model, ModelOptions};
    pub use crate::query::{list_query, show_query};
    pub use crate::schema::{FieldKind, FieldSpec, ModelSchema};
}
