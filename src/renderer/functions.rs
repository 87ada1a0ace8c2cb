use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset};
use minijinja::value::{Value, ValueKind};
use minijinja::{Error, ErrorKind, HtmlEscape};
use std::fmt::Write;

// Case conversion filters carried over for template authors
pub use cruet::{
    case::{
        camel::to_camel_case, kebab::to_kebab_case, pascal::to_pascal_case,
        snake::to_snake_case,
    },
    string::{pluralize::to_plural, singularize::to_singular},
};

fn invalid(msg: String) -> Error {
    Error::new(ErrorKind::InvalidOperation, msg)
}

/// Structural equality.
pub fn eq(a: Value, b: Value) -> bool {
    a == b
}

/// Structural inequality.
pub fn ne(a: Value, b: Value) -> bool {
    a != b
}

/// Membership test backing the `in` function.
///
/// A sequence contains `value` if any element equals it; a string contains
/// it if `value` is a substring. Undefined or none yields `false`. Any
/// other collection type is an evaluation error.
pub fn contains(collection: Value, value: Value) -> Result<bool, Error> {
    match collection.kind() {
        ValueKind::Undefined | ValueKind::None => Ok(false),
        ValueKind::String => Ok(match (collection.as_str(), value.as_str()) {
            (Some(haystack), Some(needle)) => haystack.contains(needle),
            _ => false,
        }),
        ValueKind::Seq | ValueKind::Iterable => {
            for item in collection.try_iter()? {
                if item == value {
                    return Ok(true);
                }
            }
            Ok(false)
        }
        kind => Err(invalid(format!(
            "invalid type {kind}: valid types are sequence and string"
        ))),
    }
}

/// HTML-escapes `text` and turns every newline into `<br>`.
pub fn nl2br(text: &str) -> Value {
    let escaped = HtmlEscape(text).to_string();
    Value::from_safe_string(escaped.replace('\n', "<br>"))
}

/// Marks `text` safe for direct embedding, without escaping.
pub fn raw(text: String) -> Value {
    Value::from_safe_string(text)
}

/// Formats a timestamp with a strftime pattern.
///
/// `timestamp` is either an RFC 3339 string or integer Unix seconds.
pub fn date(timestamp: Value, layout: &str) -> Result<String, Error> {
    let datetime = parse_timestamp(&timestamp)?;
    let items: Vec<Item<'_>> = StrftimeItems::new(layout).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(invalid(format!("invalid date layout '{layout}'")));
    }
    let mut out = String::new();
    write!(out, "{}", datetime.format_with_items(items.iter()))
        .map_err(|_| invalid(format!("cannot format date with layout '{layout}'")))?;
    Ok(out)
}

fn parse_timestamp(timestamp: &Value) -> Result<DateTime<FixedOffset>, Error> {
    if let Some(s) = timestamp.as_str() {
        return DateTime::parse_from_rfc3339(s)
            .map_err(|e| invalid(format!("invalid timestamp '{s}': {e}")));
    }
    if timestamp.kind() == ValueKind::Number {
        if let Ok(secs) = i64::try_from(timestamp.clone()) {
            if let Some(utc) = DateTime::from_timestamp(secs, 0) {
                return Ok(utc.into());
            }
        }
    }
    Err(invalid(format!("invalid timestamp {timestamp}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eq_ne_structural() {
        assert!(eq(Value::from(vec![1, 2]), Value::from(vec![1, 2])));
        assert!(!eq(Value::from("a"), Value::from("b")));
        assert!(ne(Value::from(1), Value::from("1")));
    }

    #[test]
    fn test_contains_sequence() {
        let roles = Value::from(vec!["admin", "editor"]);
        assert!(contains(roles.clone(), Value::from("admin")).unwrap());
        assert!(!contains(roles, Value::from("guest")).unwrap());
    }

    #[test]
    fn test_contains_string() {
        assert!(contains(Value::from("hello world"), Value::from("lo w")).unwrap());
        assert!(!contains(Value::from("hello"), Value::from("x")).unwrap());
    }

    #[test]
    fn test_contains_empty_and_none() {
        assert!(!contains(Value::from(Vec::<Value>::new()), Value::from(1)).unwrap());
        assert!(!contains(Value::from(()), Value::from(1)).unwrap());
        assert!(!contains(Value::UNDEFINED, Value::from(1)).unwrap());
    }

    #[test]
    fn test_contains_unsupported_type_is_error() {
        let err = contains(Value::from(42), Value::from(4)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidOperation);
    }

    #[test]
    fn test_nl2br_escapes_then_breaks() {
        let out = nl2br("a<b>\nc & d");
        assert!(out.is_safe());
        assert_eq!(out.as_str(), Some("a&lt;b&gt;<br>c &amp; d"));
    }

    #[test]
    fn test_raw_is_safe() {
        let out = raw("<em>hi</em>".to_string());
        assert!(out.is_safe());
        assert_eq!(out.as_str(), Some("<em>hi</em>"));
    }

    #[test]
    fn test_date_from_rfc3339() {
        let out = date(Value::from("2024-03-05T10:20:30+00:00"), "%Y/%m/%d %H:%M").unwrap();
        assert_eq!(out, "2024/03/05 10:20");
    }

    #[test]
    fn test_date_from_unix_seconds() {
        assert_eq!(date(Value::from(0), "%Y-%m-%d").unwrap(), "1970-01-01");
    }

    #[test]
    fn test_date_rejects_bad_input() {
        assert!(date(Value::from("yesterday"), "%Y").is_err());
        assert!(date(Value::from(true), "%Y").is_err());
        assert!(date(Value::from(0), "%Q %").is_err());
    }
}
