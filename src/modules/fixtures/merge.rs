use serde_json::{Map, Value};

/// Layer request bodies: generic base < fixture request < call-site overrides
///
/// Later sources win per top-level key. Nested objects are replaced, never
/// merged, so a fixture's `payment_method_data` fully supersedes the base one.
/// A non-object `base` contributes nothing.
pub fn build_request_body(
    base: &Value,
    fixture_request: &Map<String, Value>,
    overrides: &[Map<String, Value>],
) -> Map<String, Value> {
    let mut body = base.as_object().cloned().unwrap_or_default();

    for (key, value) in fixture_request {
        body.insert(key.clone(), value.clone());
    }
    for layer in overrides {
        for (key, value) in layer {
            body.insert(key.clone(), value.clone());
        }
    }

    body
}

/// Build an override layer from key/value pairs, dropping `None` values
pub fn overrides<K, I>(pairs: I) -> Map<String, Value>
where
    K: Into<String>,
    I: IntoIterator<Item = (K, Option<Value>)>,
{
    pairs
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key.into(), v)))
        .collect()
}
