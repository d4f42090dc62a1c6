use crate::config::optional_var;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedOrigins {
    Any,
    List(Vec<String>),
}

/// Browser cross-origin policy.
#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub origins: AllowedOrigins,
    pub max_age: usize,
}

impl CorsConfig {
    /// `CORS_ALLOWED_ORIGINS` is `*` or a comma-separated origin list.
    pub fn from_env() -> Self {
        let origins = match optional_var("CORS_ALLOWED_ORIGINS") {
            None => AllowedOrigins::Any,
            Some(raw) => parse_origins(&raw),
        };
        Self {
            origins,
            max_age: 3600,
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            origins: AllowedOrigins::Any,
            max_age: 3600,
        }
    }
}

fn parse_origins(raw: &str) -> AllowedOrigins {
    if raw.trim() == "*" {
        return AllowedOrigins::Any;
    }
    let list: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != "null")
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .map(|s| s.trim_end_matches('/').to_string())
        .collect();
    if list.is_empty() {
        AllowedOrigins::Any
    } else {
        AllowedOrigins::List(list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcard_and_lists() {
        assert_eq!(parse_origins("*"), AllowedOrigins::Any);
        assert_eq!(
            parse_origins("http://localhost:3000, https://app.example.com/ ,null"),
            AllowedOrigins::List(vec![
                "http://localhost:3000".to_string(),
                "https://app.example.com".to_string()
            ])
        );
        assert_eq!(parse_origins("ftp://nope"), AllowedOrigins::Any);
    }
}
