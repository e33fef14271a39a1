use std::collections::HashMap;
use serde_json::Value;

// Predicate matching for the in-memory repositories, mirroring the
// filter-expression convention of the DynamoDB helpers: keys are either a
// field name (equality) or "field:op" with op one of =, <, <=, >, >=.
pub(crate) fn entity_matches(entity: &Value, predicate: &HashMap<String, String>) -> bool {
    predicate.iter().all(|(k, v)| field_matches(entity, k, v))
}

fn field_matches(entity: &Value, key: &str, expected: &str) -> bool {
    let mut op = "=";
    let mut field = key;
    let parts = key.split(':').collect::<Vec<&str>>();
    if parts.len() > 1 {
        field = parts[0];
        op = parts[1];
    }
    let actual = match entity.get(field) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => return false,
    };
    match op {
        "=" => actual == expected,
        "<" => actual.as_str() < expected,
        "<=" => actual.as_str() <= expected,
        ">" => actual.as_str() > expected,
        ">=" => actual.as_str() >= expected,
        _ => false,
    }
}

// Offset pagination over an already filtered in-memory result set; the page
// token is the numeric offset of the first record.
pub(crate) fn paginate<T>(records: Vec<T>, page: Option<&str>, page_size: usize) -> (Vec<T>, Option<String>) {
    let offset = page.and_then(|p| p.parse::<usize>().ok()).unwrap_or(0);
    let total = records.len();
    let slice: Vec<T> = records.into_iter().skip(offset).take(page_size).collect();
    let next = offset + slice.len();
    let next_page = if next < total { Some(next.to_string()) } else { None };
    (slice, next_page)
}
