use actix_web::{HttpResponse, Responder};

use crate::{auth::AuthenticatedUser, models::domain::User};

/// Mounted behind `AuthMiddleware` in `configure_routes`.
pub async fn me(auth: AuthenticatedUser) -> impl Responder {
    let user = User::from(auth.0);
    log::debug!("Resolved signed-in user {}", user.id);

    HttpResponse::Ok().json(serde_json::json!({
        "user": user,
        "greetingName": user.greeting_name(),
    }))
}
