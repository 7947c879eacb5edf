//! Form parameters with bracket nesting.
//!
//! `featured_tag[name]=rust&ids[]=1&ids[]=2` decodes to
//! `{"featured_tag": {"name": "rust"}, "ids": ["1", "2"]}`. A key that is used
//! both as a scalar and as a nested structure is a type conflict and rejected.

use serde_json::{Map, Value};

pub type Params = Map<String, Value>;

/// Decode an `application/x-www-form-urlencoded` body.
pub fn parse_form(body: &[u8]) -> Result<Params, String> {
    let mut params = Map::new();

    for (key, value) in form_urlencoded::parse(body) {
        let (base, path) = split_key(&key);
        if base.is_empty() {
            continue;
        }
        insert(&mut params, &base, &path, value.into_owned(), &key)?;
    }

    Ok(params)
}

/// Fetch a required nested parameter, refusing scalars and arrays.
pub fn require_object<'a>(params: &'a Params, key: &str) -> Result<&'a Params, String> {
    match params.get(key) {
        Some(Value::Object(inner)) if !inner.is_empty() => Ok(inner),
        Some(Value::Object(_)) | None => Err(format!(
            "param is missing or the value is empty: {key}"
        )),
        Some(_) => Err(format!("{key} must be a nested parameter")),
    }
}

/// A scalar string field of a nested parameter.
pub fn string_field<'a>(params: &'a Params, key: &str) -> Result<Option<&'a str>, String> {
    match params.get(key) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(format!("{key} must be a string")),
    }
}

fn split_key(key: &str) -> (String, Vec<String>) {
    let Some(open) = key.find('[') else {
        return (key.to_string(), Vec::new());
    };
    if open == 0 {
        return (key.to_string(), Vec::new());
    }

    let mut path = Vec::new();
    let mut rest = &key[open..];
    while let Some(stripped) = rest.strip_prefix('[') {
        let Some(close) = stripped.find(']') else {
            return (key.to_string(), Vec::new());
        };
        path.push(stripped[..close].to_string());
        rest = &stripped[close + 1..];
    }

    if !rest.is_empty() {
        return (key.to_string(), Vec::new());
    }

    (key[..open].to_string(), path)
}

fn insert(
    slot: &mut Params,
    key: &str,
    path: &[String],
    value: String,
    full_key: &str,
) -> Result<(), String> {
    let conflict = || format!("conflicting types for parameter '{full_key}'");

    match path.split_first() {
        None => match slot.get(key) {
            Some(Value::Object(_)) | Some(Value::Array(_)) => Err(conflict()),
            _ => {
                slot.insert(key.to_string(), Value::String(value));
                Ok(())
            }
        },
        Some((segment, rest)) if segment.is_empty() => {
            if !rest.is_empty() {
                return Err(format!("nested arrays are not supported: '{full_key}'"));
            }
            let entry = slot
                .entry(key.to_string())
                .or_insert_with(|| Value::Array(Vec::new()));
            match entry {
                Value::Array(items) => {
                    items.push(Value::String(value));
                    Ok(())
                }
                _ => Err(conflict()),
            }
        }
        Some((segment, rest)) => {
            let entry = slot
                .entry(key.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            match entry {
                Value::Object(inner) => insert(inner, segment, rest, value, full_key),
                _ => Err(conflict()),
            }
        }
    }
}
