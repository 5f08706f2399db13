//! Per-model documentation artifacts, computed on first use.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock, RwLock};

use serde_json::{json, Map, Value};

use remo_core::json::deep_merge;
use remo_data::{Model, ModelSchema};

use crate::projector::project;

/// Caller-supplied shaping of a base documentation schema.
#[derive(Debug, Clone, Default)]
pub struct ResultOptions {
    /// Space-separated field names to keep. Presence wins over `exclude`,
    /// even when empty.
    pub select: Option<String>,
    /// Space-separated field names to drop.
    pub exclude: Option<String>,
    /// Extra property fragments merged in after select/exclude.
    pub extras: Option<Map<String, Value>>,
}

impl ResultOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(mut self, select: impl Into<String>) -> Self {
        self.select = Some(select.into());
        self
    }

    pub fn exclude(mut self, exclude: impl Into<String>) -> Self {
        self.exclude = Some(exclude.into());
        self
    }

    pub fn extra(mut self, name: impl Into<String>, fragment: Value) -> Self {
        self.extras
            .get_or_insert_with(Map::new)
            .insert(name.into(), fragment);
        self
    }
}

/// The documentation artifacts of one model.
///
/// Each base artifact is computed at most once and shared thereafter; the
/// `*_with_options` variants always shape a fresh deep copy and never touch
/// the cached base.
pub struct DocSchema {
    model_name: String,
    model_schema: ModelSchema,
    schema: OnceLock<Value>,
    filters: OnceLock<Value>,
    result: OnceLock<Value>,
    paginate_result: OnceLock<Value>,
    body: OnceLock<Value>,
}

impl DocSchema {
    pub fn new(model: &Model) -> Self {
        Self {
            model_name: model.name().to_string(),
            model_schema: model.schema().clone(),
            schema: OnceLock::new(),
            filters: OnceLock::new(),
            result: OnceLock::new(),
            paginate_result: OnceLock::new(),
            body: OnceLock::new(),
        }
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// The object schema projected from the model.
    pub fn schema(&self) -> &Value {
        self.schema
            .get_or_init(|| project(&self.model_schema, "xml"))
    }

    /// The `_filters` query parameter, with a description template listing
    /// every documented property.
    pub fn filters(&self) -> &Value {
        self.filters.get_or_init(|| {
            let names: Vec<String> = self.schema()["properties"]
                .as_object()
                .map(|props| props.keys().map(|k| format!("      {k}: {{}}")).collect())
                .unwrap_or_default();
            let description = format!("\n    {{\n{}\n    }}\n", names.join(",\n"));
            json!({
                "description": description,
                "in": "query",
                "name": "_filters",
            })
        })
    }

    /// The single-document result: the schema plus the storage-assigned
    /// `_id` and `__v` properties, which lead the property list.
    pub fn result(&self) -> &Value {
        self.result.get_or_init(|| {
            let mut result = json!({
                "properties": {
                    "_id": { "type": "string" },
                    "__v": { "type": "string" },
                },
            });
            deep_merge(&mut result, self.schema());
            result
        })
    }

    /// The paginated-list result envelope around [`DocSchema::result`].
    pub fn paginate_result(&self) -> &Value {
        self.paginate_result
            .get_or_init(|| paginate_envelope(self.result()))
    }

    /// [`DocSchema::result`] shaped by the given options.
    pub fn result_with_options(&self, options: &ResultOptions) -> Value {
        shape(self.result(), options)
    }

    /// [`DocSchema::paginate_result`] with a shaped item schema.
    pub fn paginate_result_with_options(&self, options: &ResultOptions) -> Value {
        paginate_envelope(&self.result_with_options(options))
    }

    /// The request body parameter wrapping the schema.
    pub fn body(&self) -> &Value {
        self.body.get_or_init(|| {
            json!({
                "in": "body",
                "name": "body",
                "schema": self.schema(),
            })
        })
    }

    /// [`DocSchema::body`] with a shaped schema.
    pub fn body_with_options(&self, options: &ResultOptions) -> Value {
        let mut body = self.body().clone();
        let shaped = shape(&body["schema"], options);
        body["schema"] = shaped;
        body
    }

    /// The `_options` query parameter of list operations.
    pub fn paginate_options() -> Value {
        json!({
            "description": "Pagination options\n        <br />\n        {\n            \"lean\": Boolean,\n            \"leanWithId\": Boolean,\n            \"limit\": Number,\n            \"offset\": Number,\n            \"page\": Number,\n            \"populate\": String,\n            \"select\": String,\n            \"sort\": String\n        }\n        ",
            "in": "query",
            "name": "_options",
        })
    }

    /// The `_options` query parameter of single-item fetches.
    pub fn show_options() -> Value {
        json!({
            "description": "\n    {\n      \"select\": String,\n      \"populate\": String\n    }\n    ",
            "in": "query",
            "name": "_options",
        })
    }

    /// The `id` path parameter.
    pub fn param_id() -> Value {
        json!({
            "description": "Unique id",
            "in": "path",
            "name": "id",
            "required": true,
            "type": "string",
        })
    }

    pub fn response_4xx() -> Value {
        json!({ "description": "Client side errors" })
    }

    pub fn response_5xx() -> Value {
        json!({ "description": "Server side errors" })
    }
}

/// Wrap an item schema in the pagination envelope. The item is tagged
/// `xml.name = "item"`; the envelope keeps the `"xml"` tag.
pub fn paginate_envelope(item: &Value) -> Value {
    let mut envelope = json!({
        "properties": {
            "limit": { "type": "number" },
            "next": { "type": "number" },
            "offset": { "type": "number" },
            "page": { "type": "number" },
            "pages": { "type": "number" },
            "prev": { "type": "number" },
            "total": { "type": "number" },
        },
        "type": "object",
        "xml": { "name": "xml" },
    });
    let mut items = item.clone();
    deep_merge(&mut items, &json!({ "xml": { "name": "item" } }));
    deep_merge(
        &mut envelope,
        &json!({ "properties": { "docs": { "type": "array", "items": items } } }),
    );
    envelope
}

/// Shape a deep copy of a base schema with select/exclude/extras.
///
/// Select keeps the listed properties in the listed order; a selected name
/// with no matching property yields an explicit null fragment. The
/// `required` list is carried through untouched even when shaping removes
/// the fields it names.
fn shape(base: &Value, options: &ResultOptions) -> Value {
    let mut shaped = base.clone();
    if let Some(select) = &options.select {
        let original = shaped["properties"].as_object().cloned().unwrap_or_default();
        let mut selected = Map::new();
        for name in select.split(' ').filter(|n| !n.is_empty()) {
            selected.insert(
                name.to_string(),
                original.get(name).cloned().unwrap_or(Value::Null),
            );
        }
        shaped["properties"] = Value::Object(selected);
    } else if let Some(exclude) = &options.exclude {
        if let Some(properties) = shaped["properties"].as_object_mut() {
            for name in exclude.split(' ').filter(|n| !n.is_empty()) {
                properties.remove(name);
            }
        }
    }
    if let Some(extras) = &options.extras {
        deep_merge(
            &mut shaped["properties"],
            &Value::Object(extras.clone()),
        );
    }
    shaped
}

/// Registry handing out one shared [`DocSchema`] per model name.
///
/// Concurrent first lookups may project twice; the first insert wins and
/// the duplicates are identical, so no caller can observe the race.
#[derive(Default)]
pub struct DocSchemas {
    inner: RwLock<HashMap<String, Arc<DocSchema>>>,
}

impl DocSchemas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_model(&self, model: &Model) -> Arc<DocSchema> {
        if let Ok(guard) = self.inner.read() {
            if let Some(found) = guard.get(model.name()) {
                return found.clone();
            }
        }
        let fresh = Arc::new(DocSchema::new(model));
        match self.inner.write() {
            Ok(mut guard) => guard
                .entry(model.name().to_string())
                .or_insert(fresh)
                .clone(),
            Err(_) => fresh,
        }
    }
}
