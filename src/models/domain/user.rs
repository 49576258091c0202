use serde::{Deserialize, Serialize};

use crate::auth::IdentityClaims;

/// The signed-in user as reported by the identity provider.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
}

impl User {
    pub fn new(id: &str, display_name: Option<&str>, email: Option<&str>) -> Self {
        User {
            id: id.to_string(),
            display_name: display_name.map(str::to_string),
            email: email.map(str::to_string),
        }
    }

    /// Name to greet the user with, falling back to the local part of the email.
    pub fn greeting_name(&self) -> &str {
        if let Some(name) = self.display_name.as_deref().filter(|n| !n.trim().is_empty()) {
            return name;
        }

        self.email
            .as_deref()
            .and_then(|email| email.split('@').next())
            .filter(|local| !local.is_empty())
            .unwrap_or("Student")
    }
}

impl From<IdentityClaims> for User {
    fn from(claims: IdentityClaims) -> Self {
        User {
            id: claims.sub,
            display_name: claims.name,
            email: claims.email,
        }
    }
}
