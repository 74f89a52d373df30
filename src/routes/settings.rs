use actix_web::{get, put, web, HttpResponse};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use validator::Validate;

use crate::errors::ApiError;
use crate::middleware::AuthUser;
use crate::models::dto::SettingsRequest;
use crate::models::user_settings;

/// GET /settings - Paramètres de l'utilisateur connecté
#[get("")]
pub async fn get_settings(
    db: web::Data<DatabaseConnection>,
    auth_user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    let parametres = user_settings::Entity::find()
        .filter(user_settings::Column::UserId.eq(auth_user.user_id))
        .one(db.get_ref())
        .await?
        .ok_or_else(|| ApiError::introuvable("Paramètres de l'utilisateur", auth_user.user_id))?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "settings": parametres })))
}

/// PUT /settings - Mettre à jour langue, thème et préférences de
/// notification
#[put("")]
pub async fn update_settings(
    db: web::Data<DatabaseConnection>,
    auth_user: AuthUser,
    request: web::Json<SettingsRequest>,
) -> Result<HttpResponse, ApiError> {
    if let Err(errors) = request.validate() {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "status": "error",
            "errors": errors
        })));
    }

    let parametres = user_settings::Entity::find()
        .filter(user_settings::Column::UserId.eq(auth_user.user_id))
        .one(db.get_ref())
        .await?
        .ok_or_else(|| ApiError::introuvable("Paramètres de l'utilisateur", auth_user.user_id))?;

    let request = request.into_inner();
    let mut active: user_settings::ActiveModel = parametres.into();
    if let Some(language) = request.language {
        active.language = Set(language);
    }
    if let Some(theme) = request.theme {
        active.theme = Set(theme);
    }
    if let Some(bureau) = request.receive_desktop_notifications {
        active.receive_desktop_notifications = Set(bureau);
    }
    if let Some(email) = request.receive_email_notifications {
        active.receive_email_notifications = Set(email);
    }
    active.update(db.get_ref()).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": "Paramètres mis à jour avec succès !"
    })))
}

pub fn settings_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/settings")
            .service(get_settings)
            .service(update_settings),
    );
}
