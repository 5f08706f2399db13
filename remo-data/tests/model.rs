use std::sync::Arc;

use futures_util::future::BoxFuture;
use remo_core::router::OwnerLookup;
use remo_core::AppError;
use remo_data::{FieldKind, FieldSpec, Model, ModelOptions, ModelSchema};

fn cat_schema() -> ModelSchema {
    ModelSchema::new()
        .field("name", FieldSpec::string().required())
        .field("age", FieldSpec::number())
}

#[test]
fn implicit_fields_are_appended_in_order() {
    let model = Model::new(ModelOptions::new("cat", cat_schema()));
    let names: Vec<&str> = model.schema().fields().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["name", "age", "__auth", "_id", "__v"]);
}

#[test]
fn auth_models_require_the_owner_reference() {
    let model = Model::new(ModelOptions::new("cat", cat_schema()).auth(true));
    assert!(model.schema().get("__auth").unwrap().required);

    let open = Model::new(ModelOptions::new("cat", cat_schema()));
    assert!(!open.schema().get("__auth").unwrap().required);
}

#[test]
fn implicit_kinds_match_storage_semantics() {
    let model = Model::new(ModelOptions::new("cat", cat_schema()));
    assert_eq!(model.schema().get("_id").unwrap().kind, FieldKind::ObjectId);
    assert_eq!(model.schema().get("__v").unwrap().kind, FieldKind::Number);
    assert_eq!(model.schema().get("__auth").unwrap().kind, FieldKind::ObjectId);
}

#[test]
fn collection_defaults_to_the_model_name() {
    let model = Model::new(ModelOptions::new("cat", cat_schema()));
    assert_eq!(model.collection(), "cat");

    let custom = Model::new(ModelOptions::new("cat", cat_schema()).collection("cats"));
    assert_eq!(custom.collection(), "cats");
}

#[test]
fn redeclaring_a_field_keeps_its_position() {
    let schema = cat_schema().field("name", FieldSpec::string());
    let names: Vec<&str> = schema.fields().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["name", "age"]);
    assert!(!schema.get("name").unwrap().required);
}

struct FixedOwner(&'static str);

impl OwnerLookup for FixedOwner {
    fn owner_of(&self, _id: &str) -> BoxFuture<'static, Result<Option<String>, AppError>> {
        let owner = self.0.to_string();
        Box::pin(async move { Ok(Some(owner)) })
    }
}

#[tokio::test]
async fn owner_lookup_delegates_to_the_attached_source() {
    let model = Model::new(ModelOptions::new("cat", cat_schema()).auth(true))
        .with_owners(Arc::new(FixedOwner("user-1")));
    let owner = model.owner_of("any").await.unwrap();
    assert_eq!(owner.as_deref(), Some("user-1"));
}

#[tokio::test]
async fn owner_lookup_without_a_source_is_a_server_fault() {
    let model = Model::new(ModelOptions::new("cat", cat_schema()).auth(true));
    let err = model.owner_of("any").await.unwrap_err();
    assert!(matches!(err, AppError::Internal(_)));
}

#[test]
fn required_paths_follow_declaration_order() {
    let schema = ModelSchema::new()
        .field("b", FieldSpec::string().required())
        .field("a", FieldSpec::string().required())
        .field("c", FieldSpec::string());
    assert_eq!(schema.required_paths(), vec!["b", "a"]);
}
