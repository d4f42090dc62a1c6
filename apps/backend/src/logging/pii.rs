//! Redaction of personal data before it reaches the logs.

use std::fmt;

use lazy_regex::regex;
use ::regex::Captures;

/// Mask emails, bearer tokens and other long opaque strings.
///
/// Emails keep the first character of the local part and the full domain.
/// JWTs and base64/hex runs of 16+ characters become `[REDACTED_TOKEN]`.
pub fn redact(input: &str) -> String {
    let emails = regex!(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]+\b").replace_all(
        input,
        |caps: &Captures| {
            let found = &caps[0];
            match found.split_once('@') {
                Some((local, domain)) => match local.chars().next() {
                    Some(first) => format!("{first}***@{domain}"),
                    None => format!("@{domain}"),
                },
                None => found.to_string(),
            }
        },
    );
    let jwts = regex!(r"\beyJ[A-Za-z0-9_-]*\.[A-Za-z0-9_-]+\.[A-Za-z0-9_-]+")
        .replace_all(&emails, "[REDACTED_TOKEN]");
    regex!(r"\b[A-Za-z0-9+/]{16,}={0,2}")
        .replace_all(&jwts, "[REDACTED_TOKEN]")
        .into_owned()
}

/// Display wrapper that redacts on formatting.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}
