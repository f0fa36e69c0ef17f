use serde_json::Value;

/// Canonical JSON string for `value`: object keys are sorted recursively,
/// array order is kept. Equal structures give equal strings regardless of
/// key insertion order, so the result can key a cache.
pub fn stable_hash(value: &Value) -> String {
    let mut out = String::new();
    write_canonical(value, &mut out);
    out
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));
            out.push('{');
            for (i, (key, val)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&Value::String(key.clone()).to_string());
                out.push(':');
                write_canonical(val, out);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        scalar => out.push_str(&scalar.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_key_order_does_not_matter() {
        let a: Value = serde_json::from_str(r#"{"a":1,"b":2}"#).unwrap();
        let b: Value = serde_json::from_str(r#"{"b":2,"a":1}"#).unwrap();
        assert_eq!(stable_hash(&a), stable_hash(&b));
        assert_eq!(stable_hash(&a), r#"{"a":1,"b":2}"#);
    }

    #[test]
    fn test_array_order_matters() {
        assert_ne!(stable_hash(&json!([1, 2])), stable_hash(&json!([2, 1])));
    }

    #[test]
    fn test_nested_objects_are_sorted() {
        let a: Value =
            serde_json::from_str(r#"{"outer":{"z":[{"y":1,"x":2}],"a":null}}"#).unwrap();
        assert_eq!(
            stable_hash(&a),
            r#"{"outer":{"a":null,"z":[{"x":2,"y":1}]}}"#
        );
    }

    #[test]
    fn test_strings_are_escaped() {
        assert_eq!(stable_hash(&json!({ "k\"": "v\n" })), r#"{"k\"":"v\n"}"#);
    }
}
