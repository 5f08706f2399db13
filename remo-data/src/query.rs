use serde_json::{json, Value};

use remo_core::json::deep_merge;
use remo_core::{AppError, Context};

/// Decode the caller-controlled query parameters of a list operation.
///
/// Merge order, later over earlier:
/// 1. empty object
/// 2. programmer-supplied defaults
/// 3. the request's `_filters` / `_options` JSON
///
/// Request values therefore win over defaults on key collision. Unparseable
/// JSON fails the whole call with a 422 data-format error, even when
/// defaults were already merged.
pub fn list_query(
    ctx: &Context,
    default_filters: Option<&Value>,
    default_options: Option<&Value>,
) -> Result<(Value, Value), AppError> {
    let filters = decode_param(ctx, "_filters", default_filters)?;
    let options = decode_param(ctx, "_options", default_options)?;
    Ok((filters, options))
}

/// Decode the `_options` parameter of a single-item fetch. Same merge and
/// failure rules as [`list_query`].
pub fn show_query(ctx: &Context, default_options: Option<&Value>) -> Result<Value, AppError> {
    decode_param(ctx, "_options", default_options)
}

fn decode_param(ctx: &Context, name: &str, defaults: Option<&Value>) -> Result<Value, AppError> {
    let mut merged = json!({});
    if let Some(defaults) = defaults {
        deep_merge(&mut merged, defaults);
    }
    // An empty query value counts as absent, not as malformed JSON.
    if let Some(raw) = ctx.query_param(name).filter(|raw| !raw.is_empty()) {
        let parsed: Value = serde_json::from_str(raw)?;
        deep_merge(&mut merged, &parsed);
    }
    Ok(merged)
}

/// Apply a partial update to an entity: every top-level key of `updates`
/// replaces the corresponding entity field.
pub fn patch_updates(entity: &mut Value, updates: &Value) {
    if let (Value::Object(entity), Value::Object(updates)) = (entity, updates) {
        for (key, value) in updates {
            entity.insert(key.clone(), value.clone());
        }
    }
}
