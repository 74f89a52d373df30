use actix_web::{dev::Payload, Error, FromRequest, HttpRequest, HttpResponse};
use futures::future::{ready, Ready};
use serde::{Deserialize, Serialize};

use crate::utils::jwt;

/// Utilisateur authentifié extrait du token JWT.
/// Les routes protégées le reçoivent en paramètre; un acteur non
/// authentifié est rejeté ici, avant tout prédicat de permission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub user_id: i32,
    pub username: String,
}

fn non_autorise(message: &str) -> Error {
    let response = HttpResponse::Unauthorized().json(serde_json::json!({
        "error": message
    }));
    actix_web::error::InternalError::from_response("", response).into()
}

impl FromRequest for AuthUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        // 1. Extraire le header Authorization
        let auth_header = match req.headers().get("Authorization") {
            Some(header) => header,
            None => return ready(Err(non_autorise("Missing Authorization header"))),
        };

        let auth_str = match auth_header.to_str() {
            Ok(s) => s,
            Err(_) => return ready(Err(non_autorise("Invalid Authorization header"))),
        };

        // 2. Extraire le token (format: "Bearer <token>")
        let token = match auth_str.strip_prefix("Bearer ") {
            Some(t) => t,
            None => {
                return ready(Err(non_autorise(
                    "Invalid Authorization format (expected: Bearer <token>)",
                )))
            }
        };

        // 3. Vérifier le token JWT
        match jwt::verify_token(token) {
            Ok(claims) => ready(Ok(AuthUser {
                user_id: claims.sub,
                username: claims.username,
            })),
            Err(e) => ready(Err(non_autorise(&format!("Invalid token: {}", e)))),
        }
    }
}
