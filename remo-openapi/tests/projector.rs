use serde_json::json;

use remo_data::{FieldKind, FieldSpec, ModelSchema};
use remo_openapi::project;

fn single(name: &str, spec: FieldSpec) -> serde_json::Value {
    project(&ModelSchema::new().field(name, spec), "xml")
}

// ── Scalar kinds ────────────────────────────────────────────────────────────

#[test]
fn string_projects_with_required_flag() {
    let doc = single("name", FieldSpec::string().required());
    assert_eq!(doc["properties"]["name"], json!({ "type": "string", "required": true }));
}

#[test]
fn string_enum_appears_only_when_non_empty() {
    let doc = single("breed", FieldSpec::string().enum_values(["manx", "siamese"]));
    assert_eq!(doc["properties"]["breed"]["enum"], json!(["manx", "siamese"]));

    let empty = single("breed", FieldSpec::string().enum_values(Vec::<&str>::new()));
    assert!(empty["properties"]["breed"].get("enum").is_none());
}

#[test]
fn number_projects_as_int64_integer() {
    let doc = single("age", FieldSpec::number());
    assert_eq!(
        doc["properties"]["age"],
        json!({ "type": "integer", "format": "int64", "required": false })
    );
}

#[test]
fn number_enum_appears_whenever_declared() {
    let empty = single("age", FieldSpec::number().enum_values(Vec::<i64>::new()));
    assert_eq!(empty["properties"]["age"]["enum"], json!([]));
}

#[test]
fn date_projects_as_date_time_string() {
    let doc = single("born", FieldSpec::date());
    assert_eq!(
        doc["properties"]["born"],
        json!({ "type": "string", "format": "date-time", "required": false })
    );
}

#[test]
fn decimal_projects_as_double_number() {
    let doc = single("weight", FieldSpec::decimal());
    assert_eq!(
        doc["properties"]["weight"],
        json!({ "type": "number", "format": "double", "required": false })
    );
}

#[test]
fn buffer_projects_like_a_string() {
    let doc = single("avatar", FieldSpec::buffer());
    assert_eq!(doc["properties"]["avatar"], json!({ "type": "string", "required": false }));
}

#[test]
fn object_id_projects_as_plain_string() {
    let doc = single("ref", FieldSpec::object_id().enum_values(["ignored"]));
    // object ids never expose an enum
    assert_eq!(doc["properties"]["ref"], json!({ "type": "string", "required": false }));
}

#[test]
fn mixed_projects_as_schemaless_object() {
    let doc = single("extra", FieldSpec::mixed());
    assert_eq!(
        doc["properties"]["extra"],
        json!({ "type": "object", "properties": {}, "required": false })
    );
}

#[test]
fn unsupported_kinds_are_silently_skipped() {
    let schema = ModelSchema::new()
        .field("ok", FieldSpec::string())
        .field("odd", FieldSpec::unsupported());
    let doc = project(&schema, "xml");
    assert!(doc["properties"].get("odd").is_none());
    assert!(doc["properties"].get("ok").is_some());
}

// ── Arrays ──────────────────────────────────────────────────────────────────

#[test]
fn array_items_repeat_the_field_metadata() {
    let doc = single(
        "tags",
        FieldSpec::array(FieldKind::String)
            .required()
            .enum_values(["a", "b"]),
    );
    let tags = &doc["properties"]["tags"];
    assert_eq!(tags["type"], "array");
    assert_eq!(tags["required"], true);
    assert_eq!(
        tags["items"],
        json!({ "type": "string", "required": true, "enum": ["a", "b"] })
    );
}

#[test]
fn nested_arrays_project_recursively() {
    let doc = single(
        "grid",
        FieldSpec::array(FieldKind::Array(Box::new(FieldKind::Number))),
    );
    let grid = &doc["properties"]["grid"];
    assert_eq!(grid["type"], "array");
    assert_eq!(grid["items"]["type"], "array");
    assert_eq!(grid["items"]["items"]["type"], "integer");
}

// ── Embedded and document arrays ────────────────────────────────────────────

#[test]
fn embedded_schemas_take_the_field_name_as_xml_tag() {
    let inner = ModelSchema::new().field("street", FieldSpec::string().required());
    let doc = single("address", FieldSpec::embedded(inner));
    let address = &doc["properties"]["address"];
    assert_eq!(address["type"], "object");
    assert_eq!(address["xml"]["name"], "address");
    assert_eq!(address["required"], json!(["street"]));
    assert_eq!(address["properties"]["street"]["type"], "string");
}

#[test]
fn document_arrays_tag_items_as_item() {
    let inner = ModelSchema::new().field("toy", FieldSpec::string());
    let doc = single("toys", FieldSpec::document_array(inner).required());
    let toys = &doc["properties"]["toys"];
    assert_eq!(toys["type"], "array");
    assert_eq!(toys["required"], true);
    assert_eq!(toys["items"]["xml"]["name"], "item");
    assert_eq!(toys["items"]["properties"]["toy"]["type"], "string");
}

// ── Top-level shape ─────────────────────────────────────────────────────────

#[test]
fn top_level_keeps_declaration_order_and_required_list() {
    let schema = ModelSchema::new()
        .field("b", FieldSpec::string().required())
        .field("a", FieldSpec::number())
        .field("c", FieldSpec::boolean().required());
    let doc = project(&schema, "xml");

    let names: Vec<&String> = doc["properties"].as_object().unwrap().keys().collect();
    assert_eq!(names, vec!["b", "a", "c"]);
    assert_eq!(doc["required"], json!(["b", "c"]));
    assert_eq!(doc["type"], "object");
    assert_eq!(doc["xml"]["name"], "xml");
}
