use serde_json::Value;

/// Recursively merge `source` into `target`.
///
/// Objects merge key-by-key; any other value (including arrays) from
/// `source` replaces the target slot. Callers rely on "later wins":
/// request-supplied query values are merged after programmer defaults, and
/// later routers win over earlier ones during documentation aggregation.
pub fn deep_merge(target: &mut Value, source: &Value) {
    if let (Value::Object(t), Value::Object(s)) = (&mut *target, source) {
        for (k, v) in s {
            if let Some(slot) = t.get_mut(k) {
                if slot.is_object() && v.is_object() {
                    deep_merge(slot, v);
                    continue;
                }
            }
            t.insert(k.clone(), v.clone());
        }
    } else {
        *target = source.clone();
    }
}

/// Non-mutating variant: merge `source` over a copy of `base`.
pub fn merged(base: &Value, source: &Value) -> Value {
    let mut out = base.clone();
    deep_merge(&mut out, source);
    out
}
