//! Projection of data-model schemas into documentation schema fragments.

use serde_json::{json, Value};

use remo_data::{FieldKind, FieldSpec, ModelSchema};

/// Project a model schema into an object documentation schema.
///
/// Field order follows declaration order. The top-level object is tagged
/// `xml.name = "xml"` by [`crate::doc_schema::DocSchema`]; nested objects
/// receive their field name, document-array items receive `"item"`.
pub fn project(schema: &ModelSchema, xml_tag: &str) -> Value {
    let mut properties = serde_json::Map::new();
    for (name, spec) in schema.fields() {
        if let Some(fragment) = project_field(name, spec) {
            properties.insert(name.to_string(), fragment);
        }
    }
    json!({
        "type": "object",
        "properties": properties,
        "xml": { "name": xml_tag },
        "required": schema.required_paths(),
    })
}

fn project_field(name: &str, spec: &FieldSpec) -> Option<Value> {
    match &spec.kind {
        FieldKind::Array(element) => Some(project_array(element, spec)),
        FieldKind::DocumentArray(schema) => Some(json!({
            "type": "array",
            "items": project(schema, "item"),
            "required": spec.required,
        })),
        FieldKind::Embedded(schema) => Some(project(schema, name)),
        FieldKind::Unsupported => None,
        scalar => project_scalar(scalar, spec),
    }
}

/// Arrays carry the field's own metadata down into `items`: the element
/// fragment repeats the field's `required` flag and enum values.
fn project_array(element: &FieldKind, spec: &FieldSpec) -> Value {
    let mut fragment = json!({ "type": "array", "required": spec.required });
    let items = match element {
        FieldKind::Array(inner) => Some(project_array(inner, spec)),
        scalar => project_scalar(scalar, spec),
    };
    if let Some(items) = items {
        fragment["items"] = items;
    }
    fragment
}

fn project_scalar(kind: &FieldKind, spec: &FieldSpec) -> Option<Value> {
    let fragment = match kind {
        FieldKind::Boolean => json!({ "type": "boolean", "required": spec.required }),
        FieldKind::Date => json!({
            "type": "string",
            "format": "date-time",
            "required": spec.required,
        }),
        FieldKind::Decimal128 => {
            let mut fragment = json!({
                "type": "number",
                "format": "double",
                "required": spec.required,
            });
            // numeric kinds expose the enum whenever one was declared
            if let Some(values) = &spec.enum_values {
                fragment["enum"] = json!(values);
            }
            fragment
        }
        FieldKind::Number => {
            let mut fragment = json!({
                "type": "integer",
                "format": "int64",
                "required": spec.required,
            });
            if let Some(values) = &spec.enum_values {
                fragment["enum"] = json!(values);
            }
            fragment
        }
        FieldKind::Mixed => json!({
            "type": "object",
            "properties": {},
            "required": spec.required,
        }),
        FieldKind::ObjectId => json!({ "type": "string", "required": spec.required }),
        // string-like kinds expose the enum only when it is non-empty
        FieldKind::String | FieldKind::Buffer => {
            let mut fragment = json!({ "type": "string", "required": spec.required });
            if let Some(values) = &spec.enum_values {
                if !values.is_empty() {
                    fragment["enum"] = json!(values);
                }
            }
            fragment
        }
        _ => return None,
    };
    Some(fragment)
}
