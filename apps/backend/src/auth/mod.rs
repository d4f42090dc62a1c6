pub mod claims;
pub mod jwt;
pub mod password;

pub use claims::TokenClaims;
pub use jwt::{extract_bearer, TokenService};
