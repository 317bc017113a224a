use serde_json::Value;

/// Resolves a dot-separated path (e.g. `"result.text"`, `"items.0.body"`)
/// against a JSON value, used by the JSON loader's `content_key`/`jq_path`
/// option to pick out the text field from an arbitrary document shape.
///
/// Numeric segments index into arrays; any other segment indexes into an
/// object by key. Returns `None` as soon as a segment can't be resolved,
/// rather than erroring — an absent path is a loader-level "use the whole
/// document" fallback, not a hard failure.
pub fn get_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(value);
    }
    path.split('.').try_fold(value, |current, segment| {
        if let Ok(index) = segment.parse::<usize>() {
            current.as_array()?.get(index)
        } else {
            current.as_object()?.get(segment)
        }
    })
}

/// Resolves `path` and renders it as text: strings pass through verbatim,
/// every other JSON type is serialized compactly.
pub fn get_path_as_text(value: &Value, path: &str) -> Option<String> {
    let found = get_path(value, path)?;
    Some(match found {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn resolves_nested_object_path() {
        let value = json!({"result": {"text": "hello"}});
        assert_eq!(get_path_as_text(&value, "result.text").as_deref(), Some("hello"));
    }

    #[test]
    fn resolves_array_index_segment() {
        let value = json!({"items": [{"body": "first"}, {"body": "second"}]});
        assert_eq!(get_path_as_text(&value, "items.1.body").as_deref(), Some("second"));
    }

    #[test]
    fn missing_path_is_none() {
        let value = json!({"a": 1});
        assert!(get_path(&value, "a.b").is_none());
    }

    #[test]
    fn empty_path_returns_whole_value() {
        let value = json!({"a": 1});
        assert_eq!(get_path(&value, ""), Some(&value));
    }

    #[test]
    fn non_string_leaf_is_serialized() {
        let value = json!({"count": 3});
        assert_eq!(get_path_as_text(&value, "count").as_deref(), Some("3"));
    }
}
