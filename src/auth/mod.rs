pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, JwtHandler};
pub use middleware::require_auth;
