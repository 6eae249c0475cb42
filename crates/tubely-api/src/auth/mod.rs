pub mod jwt;
pub mod models;

pub use jwt::{Authenticator, JwtAuthenticator};
pub use models::{AccessClaims, AuthUser};
