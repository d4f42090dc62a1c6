use std::fmt;
use std::str::FromStr;

use time::OffsetDateTime;
use time_tz::{timezones, OffsetDateTimeExt, TimeZone, Tz};

use crate::config::{parse_var, var_or};
use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeEnv {
    Development,
    Production,
    Testing,
}

impl RuntimeEnv {
    pub fn as_str(self) -> &'static str {
        match self {
            RuntimeEnv::Development => "development",
            RuntimeEnv::Production => "production",
            RuntimeEnv::Testing => "testing",
        }
    }
}

impl fmt::Display for RuntimeEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuntimeEnv {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" | "local" => Ok(RuntimeEnv::Development),
            "production" | "prod" => Ok(RuntimeEnv::Production),
            "testing" | "test" => Ok(RuntimeEnv::Testing),
            other => Err(AppError::config(format!("Unknown APP_ENV '{other}'"))),
        }
    }
}

/// IANA zone for the wall-clock times the API reports. `UTC` needs no
/// zone database lookup.
#[derive(Clone, Copy, Default)]
pub struct AppTimezone(Option<&'static Tz>);

impl AppTimezone {
    pub fn name(&self) -> &str {
        self.0.map_or("UTC", |tz| tz.name())
    }

    pub fn now(&self) -> OffsetDateTime {
        let now = OffsetDateTime::now_utc();
        match self.0 {
            Some(tz) => now.to_timezone(tz),
            None => now,
        }
    }
}

impl fmt::Debug for AppTimezone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AppTimezone").field(&self.name()).finish()
    }
}

impl FromStr for AppTimezone {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        if name.eq_ignore_ascii_case("utc") {
            return Ok(Self(None));
        }
        timezones::get_by_name(name)
            .map(|tz| Self(Some(tz)))
            .ok_or_else(|| AppError::config(format!("Unknown APP_TIMEZONE '{name}'")))
    }
}

/// Application identity reported by `/api/info`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub name: String,
    pub env: RuntimeEnv,
    pub timezone: AppTimezone,
    /// Public base URL; also the token issuer and audience.
    pub url: String,
    pub version: &'static str,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            name: var_or("APP_NAME", "miapi"),
            env: var_or("APP_ENV", "development").parse()?,
            timezone: var_or("APP_TIMEZONE", "UTC").parse()?,
            url: var_or("APP_URL", "http://localhost"),
            version: env!("CARGO_PKG_VERSION"),
        })
    }

    pub fn is_production(&self) -> bool {
        self.env == RuntimeEnv::Production
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: "miapi".to_string(),
            env: RuntimeEnv::Testing,
            timezone: AppTimezone::default(),
            url: "http://localhost".to_string(),
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            host: var_or("HOST", "127.0.0.1"),
            port: parse_var("PORT", 8080)?,
        })
    }
}
