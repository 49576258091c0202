use serde::{Deserialize, Serialize};

/// Claims carried by an identity-provider token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityClaims {
    pub sub: String, // Subject (provider user id)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub iat: usize, // Issued at (as UTC timestamp)
    pub exp: usize, // Expiration time (as UTC timestamp)
}
