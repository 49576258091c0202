pub mod claims;
pub mod jwt;
pub mod middleware;

pub use claims::IdentityClaims;
pub use jwt::JwtService;
pub use middleware::{AuthMiddleware, AuthenticatedUser};
