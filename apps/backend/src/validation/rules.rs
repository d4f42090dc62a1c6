//! Value predicates behind the validator rules.

use std::borrow::Cow;

use lazy_regex::regex_is_match;
use serde_json::Value;
use validator::ValidateEmail;

/// `true` when `required` should reject the value: absent, null, empty
/// string, `"0"`, zero, `false`, or an empty collection.
pub fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty() || s == "0",
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        Some(Value::Bool(b)) => !b,
        Some(Value::Array(items)) => items.is_empty(),
        Some(Value::Object(fields)) => fields.is_empty(),
    }
}

/// `true` when a non-required rule should skip the field entirely.
pub fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        _ => false,
    }
}

/// Textual form of a scalar. Arrays and objects have none.
pub fn as_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::Bool(true) => Some(Cow::Borrowed("1")),
        Value::Bool(false) => Some(Cow::Borrowed("0")),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Address syntax per the `validator` crate, plus a dotted domain so
/// bare hosts such as `a@b` are rejected.
pub fn is_email(candidate: &str) -> bool {
    let dotted = candidate
        .rsplit_once('@')
        .is_some_and(|(_, domain)| domain.contains('.'));
    dotted && candidate.to_owned().validate_email()
}

/// Decimal or exponent notation with optional sign and surrounding whitespace.
pub fn is_numeric(value: &Value) -> bool {
    match value {
        Value::Number(_) => true,
        Value::String(s) => {
            regex_is_match!(r"^\s*[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?\s*$", s)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn blank_follows_empty_semantics() {
        assert!(is_blank(None));
        assert!(is_blank(Some(&json!(null))));
        assert!(is_blank(Some(&json!(""))));
        assert!(is_blank(Some(&json!("0"))));
        assert!(is_blank(Some(&json!(0))));
        assert!(is_blank(Some(&json!(false))));
        assert!(is_blank(Some(&json!([]))));
        assert!(!is_blank(Some(&json!(" "))));
        assert!(!is_blank(Some(&json!("00"))));
        assert!(!is_blank(Some(&json!(2))));
    }

    #[test]
    fn missing_is_narrower_than_blank() {
        assert!(is_missing(Some(&json!(""))));
        assert!(!is_missing(Some(&json!("0"))));
        assert!(!is_missing(Some(&json!(0))));
    }

    #[test]
    fn email_requires_dotted_domain() {
        assert!(!is_email("a@b"));
        assert!(is_email("a@b.com"));
        assert!(is_email("first.last+tag@sub.example.co"));
        assert!(!is_email("no-at-sign.com"));
        assert!(!is_email("@example.com"));
        assert!(!is_email("a@-example.com"));
        assert!(!is_email("a@example..com"));
        assert!(!is_email("a b@example.com"));
        assert!(!is_email("a@localhost"));
    }

    #[test]
    fn numeric_accepts_decimal_notation() {
        assert!(is_numeric(&json!("3001234567")));
        assert!(is_numeric(&json!(" 12.5 ")));
        assert!(is_numeric(&json!("-1e3")));
        assert!(is_numeric(&json!(".5")));
        assert!(is_numeric(&json!(42)));
        assert!(!is_numeric(&json!("12a")));
        assert!(!is_numeric(&json!("inf")));
        assert!(!is_numeric(&json!("")));
        assert!(!is_numeric(&json!(true)));
    }

    #[test]
    fn text_of_scalars() {
        assert_eq!(as_text(&json!("x")).as_deref(), Some("x"));
        assert_eq!(as_text(&json!(2)).as_deref(), Some("2"));
        assert_eq!(as_text(&json!(true)).as_deref(), Some("1"));
        assert!(as_text(&json!({"a": 1})).is_none());
    }
}
