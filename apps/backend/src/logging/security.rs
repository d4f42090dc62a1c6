use tracing::{info, warn};

use crate::logging::pii::Redacted;
use crate::trace_ctx;

/// Security event for a rejected login attempt.
pub fn login_failed(reason: &str, email: Option<&str>) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        target: "security",
        event = "SECURITY_LOGIN_FAILED",
        %trace_id,
        email = %Redacted(email.unwrap_or("")),
        reason,
        "Authentication failure"
    );
}

pub fn login_succeeded(user_id: i64) {
    let trace_id = trace_ctx::trace_id();

    info!(
        target: "security",
        event = "SECURITY_LOGIN_OK",
        %trace_id,
        user_id,
        "Authentication success"
    );
}

/// Security event for a protected route reached without a usable token.
pub fn token_rejected(reason: &str, path: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        target: "security",
        event = "SECURITY_TOKEN_REJECTED",
        %trace_id,
        reason,
        path,
        "Bearer token rejected"
    );
}
